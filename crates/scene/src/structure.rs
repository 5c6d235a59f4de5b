use glam::Vec3;
use walkthrough_common::Pose;

use crate::layout::{Layout, WallSpec};

/// Which slot of a building a wall occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallRole {
    Left,
    Face,
    Right,
    /// Standalone panel outside any building.
    Panel,
}

impl WallRole {
    pub fn label(self) -> &'static str {
        match self {
            WallRole::Left => "left",
            WallRole::Face => "face",
            WallRole::Right => "right",
            WallRole::Panel => "panel",
        }
    }
}

/// A placed rectangular panel. The panel lies in its local XZ plane; local +Y is
/// the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub pose: Pose,
    pub width: f32,
    pub height: f32,
    pub role: WallRole,
    /// Index of the owning building, `None` for standalone panels.
    pub building: Option<usize>,
}

impl Wall {
    fn place(root: &Pose, spec: &WallSpec, building: Option<usize>) -> Self {
        let pose = *root
            * Pose::from_translation(spec.offset)
            * Pose::from_axis_degrees(spec.axis, spec.degrees);
        Self {
            pose,
            width: spec.width,
            height: spec.height,
            role: spec.role,
            building,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.pose.position()
    }

    pub fn normal(&self) -> Vec3 {
        self.pose.up_axis()
    }

    /// Signed distance of `point` from the wall plane, positive on the normal side.
    pub fn clearance(&self, point: Vec3) -> f32 {
        (point - self.center()).dot(self.normal())
    }
}

/// Place the three walls of one building under `root`, in table order.
pub fn build_structure(root: &Pose, specs: &[WallSpec; 3], building: usize) -> [Wall; 3] {
    specs.map(|spec| Wall::place(root, &spec, Some(building)))
}

/// The canonical gate sequence: every building's walls, building-major.
pub fn build_all_walls(layout: &Layout) -> Vec<Wall> {
    let mut walls = Vec::with_capacity(layout.gate_wall_count());
    for (building, yaw) in layout.building_yaws.iter().enumerate() {
        let root = Pose::from_yaw_degrees(*yaw);
        walls.extend(build_structure(&root, &layout.structure, building));
    }
    walls
}

/// Standalone panels, placed directly in world space.
pub fn build_panels(layout: &Layout) -> Vec<Wall> {
    layout
        .panels
        .iter()
        .map(|spec| Wall::place(&Pose::IDENTITY, spec, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::STRUCTURE_WALLS;
    use glam::Quat;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn first_building_forms_corridor_along_neg_z() {
        let walls = build_all_walls(&Layout::default());
        assert_eq!(walls.len(), 9);

        assert!(walls[0].center().abs_diff_eq(Vec3::new(-2.5, 0.5, -7.5), EPS));
        assert!(walls[0].normal().abs_diff_eq(Vec3::X, EPS));
        assert!(walls[1].center().abs_diff_eq(Vec3::new(0.0, 0.5, -12.5), EPS));
        assert!(walls[1].normal().abs_diff_eq(Vec3::Z, EPS));
        assert!(walls[2].center().abs_diff_eq(Vec3::new(2.5, 0.5, -7.5), EPS));
        assert!(walls[2].normal().abs_diff_eq(Vec3::NEG_X, EPS));
    }

    #[test]
    fn rotated_buildings_face_the_origin() {
        let walls = build_all_walls(&Layout::default());
        // Yaw -90: corridor runs along +X, face at x = 12.5.
        assert!(walls[4].center().abs_diff_eq(Vec3::new(12.5, 0.5, 0.0), EPS));
        assert!(walls[4].normal().abs_diff_eq(Vec3::NEG_X, EPS));
        // Yaw +90: corridor runs along -X, face at x = -12.5.
        assert!(walls[7].center().abs_diff_eq(Vec3::new(-12.5, 0.5, 0.0), EPS));
        assert!(walls[7].normal().abs_diff_eq(Vec3::X, EPS));
        // Side walls of the third building bound the crossing along Z.
        assert!(walls[6].normal().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(walls[8].normal().abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn roles_and_buildings_follow_sequence_order() {
        let walls = build_all_walls(&Layout::default());
        for (i, wall) in walls.iter().enumerate() {
            assert_eq!(wall.building, Some(i / 3));
            let expected = [WallRole::Left, WallRole::Face, WallRole::Right][i % 3];
            assert_eq!(wall.role, expected);
        }
    }

    #[test]
    fn panels_are_standalone() {
        let panels = build_panels(&Layout::default());
        assert_eq!(panels.len(), 2);
        assert!(panels.iter().all(|p| p.building.is_none() && p.role == WallRole::Panel));
        assert!(panels[0].center().abs_diff_eq(Vec3::new(-2.5, 0.5, 7.5), EPS));
        assert!(panels[1].normal().abs_diff_eq(Vec3::NEG_X, EPS));
    }

    #[test]
    fn clearance_sign_tracks_normal_side() {
        let walls = build_all_walls(&Layout::default());
        let start = Vec3::new(0.0, 0.0, 3.0);
        assert!((walls[1].clearance(start) - 15.5).abs() < EPS);
        assert!((walls[0].clearance(start) - 2.5).abs() < EPS);
        let behind = Vec3::new(0.0, 0.0, -20.0);
        assert!(walls[1].clearance(behind) < 0.0);
    }

    proptest! {
        #[test]
        fn structure_is_root_times_local(
            x in -20.0f32..20.0, z in -20.0f32..20.0, yaw in -180.0f32..180.0,
        ) {
            let root = Pose::new(Vec3::new(x, 0.0, z), Quat::from_rotation_y(yaw.to_radians()));
            let walls = build_structure(&root, &STRUCTURE_WALLS, 0);
            prop_assert_eq!(walls.len(), 3);
            for (wall, spec) in walls.iter().zip(STRUCTURE_WALLS.iter()) {
                let expected = root
                    * Pose::from_translation(spec.offset)
                    * Pose::from_axis_degrees(spec.axis, spec.degrees);
                prop_assert!(wall.pose.abs_diff_eq(&expected, 1e-4));
                prop_assert_eq!(wall.role, spec.role);
            }
            // Deterministic: same input, same output.
            prop_assert_eq!(walls, build_structure(&root, &STRUCTURE_WALLS, 0));
        }
    }
}
