use glam::Vec3;
use walkthrough_common::{Axis, Color};

use crate::structure::WallRole;

/// One entry of a placement table: where a panel sits relative to its root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    pub role: WallRole,
    /// Translation from the root frame to the panel center.
    pub offset: Vec3,
    pub axis: Axis,
    pub degrees: f32,
    /// Panel extent along local X.
    pub width: f32,
    /// Panel extent along local Z.
    pub height: f32,
}

/// The three walls of one building, in emission order.
pub const STRUCTURE_WALLS: [WallSpec; 3] = [
    WallSpec {
        role: WallRole::Left,
        offset: Vec3::new(-2.5, 0.5, -7.5),
        axis: Axis::Z,
        degrees: -90.0,
        width: 5.0,
        height: 10.0,
    },
    WallSpec {
        role: WallRole::Face,
        offset: Vec3::new(0.0, 0.5, -12.5),
        axis: Axis::X,
        degrees: 90.0,
        width: 5.0,
        height: 5.0,
    },
    WallSpec {
        role: WallRole::Right,
        offset: Vec3::new(2.5, 0.5, -7.5),
        axis: Axis::Z,
        degrees: 90.0,
        width: 5.0,
        height: 10.0,
    },
];

/// Yaw of each building root about the world origin, degrees.
pub const BUILDING_YAWS: [f32; 3] = [0.0, -90.0, 90.0];

/// Panels closing off the entrance behind the start position.
pub const EXTRA_PANELS: [WallSpec; 2] = [
    WallSpec {
        role: WallRole::Panel,
        offset: Vec3::new(-2.5, 0.5, 7.5),
        axis: Axis::Z,
        degrees: 90.0,
        width: 5.0,
        height: 10.0,
    },
    WallSpec {
        role: WallRole::Panel,
        offset: Vec3::new(2.5, 0.5, 7.5),
        axis: Axis::Z,
        degrees: 90.0,
        width: 5.0,
        height: 10.0,
    },
];

/// Ground plane: a square in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    pub y: f32,
    pub half_extent: f32,
    pub color: Color,
}

impl Default for Ground {
    fn default() -> Self {
        Self {
            y: -2.0,
            half_extent: 500.0,
            color: Color::rgb(0.1, 0.95, 0.1),
        }
    }
}

/// Everything needed to build the maze. `Layout::default()` is the canonical one.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub structure: [WallSpec; 3],
    pub building_yaws: Vec<f32>,
    pub panels: Vec<WallSpec>,
    pub ground: Ground,
    pub wall_color: Color,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            structure: STRUCTURE_WALLS,
            building_yaws: BUILDING_YAWS.to_vec(),
            panels: EXTRA_PANELS.to_vec(),
            ground: Ground::default(),
            wall_color: Color::rgb(0.99, 0.99, 0.99),
        }
    }
}

impl Layout {
    /// Number of walls in the gate sequence.
    pub fn gate_wall_count(&self) -> usize {
        self.building_yaws.len() * self.structure.len()
    }
}
