use glam::Vec3;
use std::fmt;
use walkthrough_common::{Pose, ShaderProgram};
use walkthrough_gate::{MovementGate, Side, Verdict};
use walkthrough_kernel::Session;
use walkthrough_scene::WallRole;

/// Session inspector for developer tooling.
pub struct SessionInspector;

impl SessionInspector {
    /// Produce a summary of the session state.
    pub fn summary(session: &Session) -> SessionSummary {
        let look = session.look_controller();
        let gate = session.gate();
        SessionSummary {
            position: session.camera().position(),
            yaw: look.yaw(),
            pitch: look.pitch(),
            shader: session.shader(),
            verdict: gate.check(session.camera(), &Pose::IDENTITY).verdict,
            branch_low: gate.config().branch_low,
            branch_high: gate.config().branch_high,
            pending_events: session.events().len(),
        }
    }

    /// One line per gate wall for the committed camera position.
    pub fn clearance_report(session: &Session) -> Vec<ClearanceLine> {
        Self::clearances_at(session.gate(), session.camera().position())
    }

    /// One line per gate wall for an arbitrary position.
    pub fn clearances_at(gate: &MovementGate, position: Vec3) -> Vec<ClearanceLine> {
        gate.walls()
            .iter()
            .enumerate()
            .map(|(index, wall)| {
                let clearance = wall.clearance(position);
                ClearanceLine {
                    index,
                    building: wall.building,
                    role: wall.role,
                    clearance,
                    side: Side::of(clearance),
                }
            })
            .collect()
    }
}

/// Summary of session state for the HUD and CLI.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub shader: ShaderProgram,
    /// Whether the current spot itself passes the gate.
    pub verdict: Verdict,
    pub branch_low: f32,
    pub branch_high: f32,
    pub pending_events: usize,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Camera: pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} shader={} gate={} [{}..{}]",
            self.position.x,
            self.position.y,
            self.position.z,
            self.yaw,
            self.pitch,
            self.shader.name(),
            self.verdict,
            self.branch_low,
            self.branch_high,
        )
    }
}

/// Clearance of one gate wall.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearanceLine {
    pub index: usize,
    pub building: Option<usize>,
    pub role: WallRole,
    pub clearance: f32,
    pub side: Side,
}

impl fmt::Display for ClearanceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let building = self
            .building
            .map(|b| (b + 1).to_string())
            .unwrap_or_else(|| "-".into());
        write!(
            f,
            "wall {} (building {} {}): {:>8.3} ({})",
            self.index, building, self.role.label(), self.clearance, self.side
        )
    }
}
