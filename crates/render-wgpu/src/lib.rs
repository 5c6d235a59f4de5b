//! wgpu render backend for the maze walkthrough.
//!
//! Draws every item of a [`walkthrough_render::Frame`] as an instanced unit
//! plane, with a repeating ground texture and an optional axes overlay.
//!
//! # Invariants
//! - Renderer never mutates session state; it only reads a built frame.
//! - Both shader programs share one pipeline layout and one instance format.
//! - A missing or unreadable ground image falls back to a checkerboard.

mod gpu;
mod shaders;
mod texture;

pub use gpu::WgpuRenderer;
pub use texture::{GroundImage, TextureError};
