use std::fmt::Write;

use crate::frame::{DrawKind, Frame};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a frame snapshot and produces output. It never touches the
/// session the frame was built from.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Headless renderer that lists every draw call as text.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let mut out = String::new();
        let eye = frame.eye.position();
        let fwd = frame.eye.forward_axis();
        let _ = writeln!(
            out,
            "=== Frame (shader={}, fov={:.1}, {}x{}) ===",
            frame.shader.name(),
            frame.projection.fov_y_degrees(),
            frame.projection.width,
            frame.projection.height
        );
        let _ = writeln!(
            out,
            "Eye: pos=({:.2}, {:.2}, {:.2}) forward=({:.2}, {:.2}, {:.2})",
            eye.x, eye.y, eye.z, fwd.x, fwd.y, fwd.z
        );
        let _ = writeln!(out, "Draw calls: {}", frame.items.len());

        for item in &frame.items {
            let label = match item.kind {
                DrawKind::Ground => "ground".to_string(),
                DrawKind::Wall(i) => format!("wall {i}"),
                DrawKind::Panel(i) => format!("panel {i}"),
            };
            let p = item.pose.position();
            let n = item.pose.up_axis();
            let _ = writeln!(
                out,
                "  [{label:>8}] center=({:.2}, {:.2}, {:.2}) normal=({:.2}, {:.2}, {:.2}) size={}x{}{}",
                p.x,
                p.y,
                p.z,
                n.x,
                n.y,
                n.z,
                item.size.x,
                item.size.y,
                if item.textured { " textured" } else { "" }
            );
        }

        out
    }
}
