//! Developer tooling: read-only views of a session for the HUD, the CLI, and logs.
//!
//! # Invariants
//! - Tools never mutate the session.

mod inspector;

pub use inspector::{ClearanceLine, SessionInspector, SessionSummary};

pub fn crate_info() -> &'static str {
    "walkthrough-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
