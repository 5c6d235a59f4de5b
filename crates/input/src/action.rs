use glam::Vec3;

/// Direction of a single keyboard step, in the camera's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveDirection {
    /// Local-frame offset for a step of length `step`. Forward is local -Z.
    pub fn offset(self, step: f32) -> Vec3 {
        match self {
            MoveDirection::Forward => Vec3::new(0.0, 0.0, -step),
            MoveDirection::Backward => Vec3::new(0.0, 0.0, step),
            MoveDirection::Left => Vec3::new(-step, 0.0, 0.0),
            MoveDirection::Right => Vec3::new(step, 0.0, 0.0),
        }
    }
}

/// A high-level action produced by the desktop shell or a scripted walk.
///
/// The session consumes actions, never raw input events, so the headless CLI
/// and the windowed app share the same behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Try one gated step.
    Move(MoveDirection),
    /// Flip between the diffuse and solid shader programs.
    ToggleShader,
    /// Print the key listing.
    Help,
    /// Ask the event loop to shut down.
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_is_negative_z() {
        assert_eq!(MoveDirection::Forward.offset(0.2), Vec3::new(0.0, 0.0, -0.2));
        assert_eq!(MoveDirection::Backward.offset(0.2), Vec3::new(0.0, 0.0, 0.2));
    }

    #[test]
    fn strafe_is_along_x() {
        assert_eq!(MoveDirection::Left.offset(1.0), Vec3::NEG_X);
        assert_eq!(MoveDirection::Right.offset(1.0), Vec3::X);
    }

    #[test]
    fn opposite_directions_cancel() {
        let sum = MoveDirection::Forward.offset(0.3) + MoveDirection::Backward.offset(0.3);
        assert_eq!(sum, Vec3::ZERO);
    }
}
