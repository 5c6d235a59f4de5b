//! Input: raw keys and pointer deltas mapped to actions the session consumes.
//!
//! # Invariants
//! - The session never sees window-system key codes, only `Action`s.
//! - Look orientation is always `yaw * pitch`; translation is never touched here.

pub mod action;
pub mod bindings;
pub mod look;

pub use action::{Action, MoveDirection};
pub use bindings::{HELP_TEXT, KeyInput, action_for};
pub use look::{LookController, LookSettings};
