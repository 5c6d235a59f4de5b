//! Movement gate: decides whether a proposed camera pose may be committed.
//!
//! # Invariants
//! - Evaluation is pure. The committed camera pose is only ever passed in by
//!   value; the gate has no way to mutate it.
//! - Thresholds live in `GateConfig`, never inline. Both historical threshold
//!   sets are available as `GateProfile`s.
//! - Wall indices in the config are validated against the built wall sequence at
//!   construction, so evaluation never reads past the end of it.

mod config;
mod error;
mod gate;

pub use config::{Branch, GateConfig, GateProfile, Rule, Verdict};
pub use error::GateError;
pub use gate::{GateCheck, MovementGate, Side};
