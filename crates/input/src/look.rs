use glam::Quat;
use serde::{Deserialize, Serialize};
use walkthrough_common::Pose;

/// Tunables for mouse-look, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookSettings {
    /// Degrees of rotation per pixel of pointer travel.
    pub sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.2,
            pitch_limit: 89.0,
        }
    }
}

/// Yaw/pitch accumulator driving the camera orientation.
///
/// No smoothing: every pointer delta lands immediately.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookController {
    yaw: f32,
    pitch: f32,
    settings: LookSettings,
}

impl LookController {
    pub fn new(settings: LookSettings) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            settings,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Accumulate a pointer delta in screen pixels (x right, y down).
    ///
    /// Dragging right turns right, dragging down looks down.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let s = self.settings.sensitivity;
        let limit = self.settings.pitch_limit;
        self.yaw -= dx * s;
        self.pitch = (self.pitch - dy * s).clamp(-limit, limit);
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians()) * Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Replace the rotation of `pose` with the current orientation.
    pub fn apply_to(&self, pose: &Pose) -> Pose {
        Pose::new(pose.translation, self.orientation())
    }
}
