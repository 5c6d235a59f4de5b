use glam::Vec3;
use walkthrough_common::{Pose, ShaderProgram};
use walkthrough_gate::{GateError, MovementGate, Verdict};
use walkthrough_input::{Action, LookController};
use walkthrough_scene::Layout;

use crate::config::{Config, ConfigError};

/// A record of every state change, drained by the shell for logging and HUD.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Moved { from: Vec3, to: Vec3 },
    MoveBlocked { attempted: Vec3, verdict: Verdict },
    Looked { yaw: f32, pitch: f32 },
    ShaderChanged(ShaderProgram),
    HelpRequested,
    ShutdownRequested,
}

/// Result of one gated step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// The step was committed; carries the new camera pose.
    Accepted(Pose),
    /// The step was discarded.
    Blocked(Verdict),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("movement gate: {0}")]
    Gate(#[from] GateError),
}

/// All mutable walkthrough state, owned in one place and passed explicitly to
/// the input handlers and the frame builder.
#[derive(Debug, Clone)]
pub struct Session {
    camera: Pose,
    look: LookController,
    shader: ShaderProgram,
    layout: Layout,
    gate: MovementGate,
    move_step: f32,
    shutdown_requested: bool,
    event_log: Vec<SessionEvent>,
}

impl Session {
    /// Session over the canonical maze.
    pub fn new(config: &Config) -> Result<Self, SessionError> {
        Self::with_layout(config, Layout::default())
    }

    pub fn with_layout(config: &Config, layout: Layout) -> Result<Self, SessionError> {
        config.validate()?;
        let gate = MovementGate::new(config.gate.clone(), &layout)?;
        let look = LookController::new(config.look);
        let camera = look.apply_to(&Pose::from_translation(config.start_position));
        if !gate.permits(&camera) {
            tracing::warn!(
                "start position ({:.2}, {:.2}, {:.2}) is outside the permitted region",
                camera.translation.x,
                camera.translation.y,
                camera.translation.z
            );
        }
        Ok(Self {
            camera,
            look,
            shader: ShaderProgram::default(),
            layout,
            gate,
            move_step: config.move_step,
            shutdown_requested: false,
            event_log: Vec::new(),
        })
    }

    pub fn camera(&self) -> &Pose {
        &self.camera
    }

    pub fn look_controller(&self) -> &LookController {
        &self.look
    }

    pub fn shader(&self) -> ShaderProgram {
        self.shader
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn gate(&self) -> &MovementGate {
        &self.gate
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Dispatch one action. Returns the outcome for movement actions.
    pub fn apply(&mut self, action: Action) -> Option<MoveOutcome> {
        match action {
            Action::Move(direction) => Some(self.try_move(direction.offset(self.move_step))),
            Action::ToggleShader => {
                self.toggle_shader();
                None
            }
            Action::Help => {
                self.event_log.push(SessionEvent::HelpRequested);
                None
            }
            Action::Exit => {
                self.request_shutdown();
                None
            }
        }
    }

    /// Try to translate the camera by `offset` in its local frame.
    ///
    /// The candidate pose is only committed if the gate accepts it.
    pub fn try_move(&mut self, offset: Vec3) -> MoveOutcome {
        let check = self.gate.check(&self.camera, &Pose::from_translation(offset));
        if check.verdict.is_accepted() {
            let from = self.camera.position();
            self.camera = check.proposed;
            self.event_log.push(SessionEvent::Moved {
                from,
                to: self.camera.position(),
            });
            MoveOutcome::Accepted(self.camera)
        } else {
            tracing::info!("movement blocked: {}", check.verdict);
            self.event_log.push(SessionEvent::MoveBlocked {
                attempted: check.proposed.position(),
                verdict: check.verdict,
            });
            MoveOutcome::Blocked(check.verdict)
        }
    }

    /// Feed a pointer delta (pixels, y down) to the look controller.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.look.rotate(dx, dy);
        self.camera = self.look.apply_to(&self.camera);
        self.event_log.push(SessionEvent::Looked {
            yaw: self.look.yaw(),
            pitch: self.look.pitch(),
        });
    }

    pub fn toggle_shader(&mut self) -> ShaderProgram {
        self.shader = self.shader.toggled();
        tracing::debug!("shader program: {}", self.shader.name());
        self.event_log.push(SessionEvent::ShaderChanged(self.shader));
        self.shader
    }

    /// Ask the shell to stop. Teardown happens when the event loop returns.
    pub fn request_shutdown(&mut self) {
        if !self.shutdown_requested {
            self.shutdown_requested = true;
            self.event_log.push(SessionEvent::ShutdownRequested);
        }
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SessionEvent] {
        &self.event_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkthrough_gate::{GateConfig, GateProfile, Rule};
    use walkthrough_input::MoveDirection;

    fn session() -> Session {
        Session::new(&Config::default()).unwrap()
    }

    #[test]
    fn starts_at_configured_position() {
        let s = session();
        assert_eq!(s.camera().position(), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(s.shader(), ShaderProgram::Diffuse);
        assert!(!s.shutdown_requested());
        assert!(s.events().is_empty());
    }

    #[test]
    fn forward_step_is_committed() {
        let mut s = session();
        let outcome = s.apply(Action::Move(MoveDirection::Forward)).unwrap();
        assert!(outcome.is_accepted());
        assert!(s.camera().position().abs_diff_eq(Vec3::new(0.0, 0.0, 2.8), 1e-5));
        assert!(matches!(s.events(), [SessionEvent::Moved { .. }]));
    }

    #[test]
    fn blocked_step_leaves_pose_unchanged() {
        let cfg = Config {
            start_position: Vec3::new(0.0, 0.0, -5.0),
            ..Config::default()
        };
        let mut s = Session::new(&cfg).unwrap();
        // Walk to the end of the first corridor until the face wall stops us.
        let mut steps = 0;
        while s.try_move(Vec3::new(0.0, 0.0, -0.2)).is_accepted() {
            steps += 1;
            assert!(steps < 200, "never blocked");
        }
        let before = *s.camera();
        let outcome = s.try_move(Vec3::new(0.0, 0.0, -0.2));
        assert_eq!(
            outcome,
            MoveOutcome::Blocked(Verdict::Blocked {
                rule: Rule::FaceFloor,
                wall: 1
            })
        );
        assert_eq!(*s.camera(), before);
        assert!(s.camera().position().z > -10.5);
        assert!(matches!(
            s.events().last(),
            Some(SessionEvent::MoveBlocked { .. })
        ));
    }

    #[test]
    fn accepted_move_then_inverse_returns_home() {
        let mut s = session();
        s.look(40.0, 10.0);
        let start = *s.camera();
        assert!(s.try_move(Vec3::new(0.1, 0.0, -0.2)).is_accepted());
        assert!(s.try_move(Vec3::new(-0.1, 0.0, 0.2)).is_accepted());
        assert!(s.camera().abs_diff_eq(&start, 1e-4));
    }

    #[test]
    fn look_rotates_but_keeps_position() {
        let mut s = session();
        s.try_move(Vec3::new(0.0, 0.0, -1.0));
        let position = s.camera().position();
        s.look(-450.0, 0.0);
        assert_eq!(s.camera().position(), position);
        assert_eq!(s.look_controller().yaw(), 90.0);
        // Facing -X now, so forward heads toward the third building.
        s.apply(Action::Move(MoveDirection::Forward));
        assert!(s.camera().position().x < position.x);
    }

    #[test]
    fn shader_toggles_and_logs() {
        let mut s = session();
        s.apply(Action::ToggleShader);
        assert_eq!(s.shader(), ShaderProgram::Solid);
        s.apply(Action::ToggleShader);
        assert_eq!(s.shader(), ShaderProgram::Diffuse);
        let events = s.drain_events();
        assert_eq!(
            events,
            vec![
                SessionEvent::ShaderChanged(ShaderProgram::Solid),
                SessionEvent::ShaderChanged(ShaderProgram::Diffuse),
            ]
        );
        assert!(s.events().is_empty());
    }

    #[test]
    fn exit_requests_shutdown_once() {
        let mut s = session();
        assert_eq!(s.apply(Action::Exit), None);
        s.apply(Action::Exit);
        assert!(s.shutdown_requested());
        assert_eq!(s.events(), &[SessionEvent::ShutdownRequested]);
    }

    #[test]
    fn help_is_recorded() {
        let mut s = session();
        s.apply(Action::Help);
        assert_eq!(s.events(), &[SessionEvent::HelpRequested]);
    }

    #[test]
    fn revised_profile_config_is_honoured() {
        let cfg = Config {
            gate: GateConfig::profile(GateProfile::Revised),
            ..Config::default()
        };
        let s = Session::new(&cfg).unwrap();
        assert_eq!(s.gate().config().branch_low, 10.5);
    }

    #[test]
    fn bad_gate_config_is_rejected() {
        let cfg = Config {
            gate: GateConfig {
                crossing_walls: vec![6, 12],
                ..GateConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            Session::new(&cfg),
            Err(SessionError::Gate(GateError::WallIndexOutOfRange { index: 12, .. }))
        ));
    }
}
