//! Shared types for the walkthrough workspace.
//!
//! # Invariants
//! - `Pose` is always rigid: unit rotation plus translation, never scale or shear.
//! - Composition is right-to-left in the usual matrix sense: `a * b` applies `b`
//!   in `a`'s local frame.

pub mod types;

pub use types::{Axis, Color, Pose, ShaderProgram};
