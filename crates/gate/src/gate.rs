use glam::Vec3;
use std::fmt;
use walkthrough_common::Pose;
use walkthrough_scene::{Layout, Wall, build_all_walls};

use crate::config::{GateConfig, Verdict};
use crate::error::GateError;

/// Which side of a wall plane a point sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    OnPlane,
}

impl Side {
    pub fn of(clearance: f32) -> Self {
        if clearance > 0.0 {
            Side::Front
        } else if clearance < 0.0 {
            Side::Back
        } else {
            Side::OnPlane
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Front => "front",
            Side::Back => "back",
            Side::OnPlane => "on plane",
        })
    }
}

/// Full result of evaluating one candidate move.
#[derive(Debug, Clone, PartialEq)]
pub struct GateCheck {
    pub proposed: Pose,
    pub clearances: Vec<f32>,
    pub verdict: Verdict,
}

/// Gate over the canonical wall sequence of a layout.
#[derive(Debug, Clone)]
pub struct MovementGate {
    config: GateConfig,
    walls: Vec<Wall>,
}

impl MovementGate {
    /// Build the gate walls from `layout` and validate `config` against them.
    pub fn new(config: GateConfig, layout: &Layout) -> Result<Self, GateError> {
        let walls = build_all_walls(layout);
        config.validate(walls.len())?;
        tracing::debug!(
            walls = walls.len(),
            low = config.branch_low,
            high = config.branch_high,
            "movement gate ready"
        );
        Ok(Self { config, walls })
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Signed clearance of `position` from every gate wall, in sequence order.
    pub fn clearances(&self, position: Vec3) -> Vec<f32> {
        self.walls.iter().map(|w| w.clearance(position)).collect()
    }

    /// Evaluate `current * movement` without committing anything.
    pub fn check(&self, current: &Pose, movement: &Pose) -> GateCheck {
        let proposed = current * movement;
        let clearances = self.clearances(proposed.position());
        for (i, d) in clearances.iter().enumerate() {
            tracing::debug!(wall = i, clearance = d, side = %Side::of(*d), "wall clearance");
        }
        let verdict = self.config.evaluate(&clearances);
        GateCheck {
            proposed,
            clearances,
            verdict,
        }
    }

    pub fn can_move(&self, current: &Pose, movement: &Pose) -> bool {
        self.check(current, movement).verdict.is_accepted()
    }

    /// Whether standing at `pose` is itself permitted.
    pub fn permits(&self, pose: &Pose) -> bool {
        self.can_move(pose, &Pose::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Branch, GateProfile, Rule};
    use proptest::prelude::*;

    fn gate() -> MovementGate {
        MovementGate::new(GateConfig::default(), &Layout::default()).unwrap()
    }

    fn at(x: f32, z: f32) -> Pose {
        Pose::from_translation(Vec3::new(x, 0.0, z))
    }

    fn step(x: f32, z: f32) -> Pose {
        Pose::from_translation(Vec3::new(x, 0.0, z))
    }

    #[test]
    fn start_position_is_permitted() {
        let gate = gate();
        let check = gate.check(&at(0.0, 3.0), &Pose::IDENTITY);
        assert_eq!(check.clearances.len(), 9);
        assert!((check.clearances[1] - 15.5).abs() < 1e-4);
        assert_eq!(
            check.verdict,
            Verdict::Accepted {
                branch: Branch::Beyond
            }
        );
    }

    #[test]
    fn walking_into_the_end_wall_is_blocked() {
        let gate = gate();
        assert!(gate.can_move(&at(0.0, -10.0), &step(0.0, -0.2)));
        let check = gate.check(&at(0.0, -10.4), &step(0.0, -0.2));
        assert_eq!(
            check.verdict,
            Verdict::Blocked {
                rule: Rule::FaceFloor,
                wall: 1
            }
        );
    }

    #[test]
    fn corridor_side_walls_block_strafing() {
        let gate = gate();
        assert!(gate.can_move(&at(1.5, -5.0), &step(0.2, 0.0)));
        assert!(!gate.can_move(&at(1.9, -5.0), &step(0.2, 0.0)));
        assert!(!gate.can_move(&at(-1.9, -5.0), &step(-0.2, 0.0)));
    }

    #[test]
    fn crossing_allows_lateral_travel_until_far_faces() {
        let gate = gate();
        // Inside the crossing (z = 0) the first corridor's side walls do not apply.
        assert!(gate.can_move(&at(5.0, 0.0), &step(0.2, 0.0)));
        assert!(gate.can_move(&at(-5.0, 0.0), &step(-0.2, 0.0)));
        // Far faces at x = +-12.5 stop the camera two units short.
        assert!(!gate.can_move(&at(10.4, 0.0), &step(0.2, 0.0)));
        assert!(!gate.can_move(&at(-10.4, 0.0), &step(-0.2, 0.0)));
    }

    #[test]
    fn movement_is_in_camera_local_frame() {
        let gate = gate();
        // Facing +X (yaw -90), "forward" is +X.
        let facing_east = at(10.0, 0.0) * Pose::from_yaw_degrees(-90.0);
        let check = gate.check(&facing_east, &step(0.0, -0.2));
        assert!(check.proposed.position().abs_diff_eq(Vec3::new(10.2, 0.0, 0.0), 1e-4));
        assert!(check.verdict.is_accepted());
        assert!(!gate.can_move(&facing_east, &step(0.0, -0.6)));
    }

    #[test]
    fn rejects_config_referencing_missing_walls() {
        let layout = Layout {
            building_yaws: vec![0.0, -90.0],
            ..Layout::default()
        };
        let err = MovementGate::new(GateConfig::default(), &layout).unwrap_err();
        assert!(matches!(err, GateError::WallIndexOutOfRange { count: 6, .. }));
    }

    #[test]
    fn profiles_disagree_near_the_crossing_edges() {
        let revised =
            MovementGate::new(GateConfig::profile(GateProfile::Revised), &Layout::default())
                .unwrap();
        // Branch clearance 14.7: crossing for the original thresholds, beyond for
        // the revised ones, where the right corridor wall is only 0.3 away.
        assert!(gate().permits(&at(2.2, 2.2)));
        assert!(!revised.permits(&at(2.2, 2.2)));
        // Branch clearance 14.95: the original crossing floor catches wall 6.
        assert!(!gate().permits(&at(0.0, 2.45)));
        assert!(revised.permits(&at(0.0, 2.45)));
    }

    #[test]
    fn side_classification() {
        assert_eq!(Side::of(1.0), Side::Front);
        assert_eq!(Side::of(-0.1), Side::Back);
        assert_eq!(Side::of(0.0), Side::OnPlane);
    }

    proptest! {
        #[test]
        fn check_is_pure(
            x in -15.0f32..15.0, z in -15.0f32..15.0,
            dx in -1.0f32..1.0, dz in -1.0f32..1.0,
            yaw in -180.0f32..180.0,
        ) {
            let gate = gate();
            let current = at(x, z) * Pose::from_yaw_degrees(yaw);
            let snapshot = current;
            let a = gate.check(&current, &step(dx, dz));
            let b = gate.check(&current, &step(dx, dz));
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(current, snapshot);
        }

        #[test]
        fn accepted_move_reverses_exactly(
            x in -1.5f32..1.5, z in -8.0f32..-2.0,
            dx in -0.2f32..0.2, dz in -0.2f32..0.2,
        ) {
            let gate = gate();
            let start = at(x, z);
            let movement = step(dx, dz);
            prop_assume!(gate.can_move(&start, &movement));
            let back = (start * movement) * movement.inverse();
            prop_assert!(back.abs_diff_eq(&start, 1e-4));
        }
    }
}
