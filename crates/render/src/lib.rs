//! Rendering front end: turns a session into a renderer-agnostic frame.
//!
//! # Invariants
//! - Renderers cannot mutate the session; a `Frame` is a read-only snapshot.
//! - Walls in the draw list come from the same builder the movement gate uses.
//!
//! The `Renderer` trait is what backends implement. `DebugTextRenderer` is the
//! headless one used by the CLI and tests; the GPU backend lives in
//! `walkthrough-render-wgpu`.

mod frame;
mod projection;
mod renderer;

pub use frame::{CLEAR_COLOR, DrawItem, DrawKind, Frame, LIGHTS};
pub use projection::Projection;
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "walkthrough-render v0.1.0"
}
