//! Session kernel: the single owner of mutable walkthrough state.
//!
//! # Invariants
//! - All state mutations flow through explicit `Session` operations.
//! - The committed camera pose only changes on an accepted move or a look update.
//! - A rejected move leaves the session exactly as it was, apart from the event log.

pub mod config;
pub mod session;

pub use config::{Config, ConfigError};
pub use session::{MoveOutcome, Session, SessionError, SessionEvent};
