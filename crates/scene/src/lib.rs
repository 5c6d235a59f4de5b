//! Scene builder: ground, three wall structures, and two standalone panels.
//!
//! # Invariants
//! - Wall placement is a pure function of a root pose and the layout tables.
//! - The gate wall sequence is building-major, `{left, face, right}` per building,
//!   buildings in `Layout::building_yaws` order. Consumers index it positionally.
//! - Standalone panels are drawn but never part of the gate sequence.

pub mod layout;
pub mod structure;

pub use layout::{Ground, Layout, WallSpec, BUILDING_YAWS, EXTRA_PANELS, STRUCTURE_WALLS};
pub use structure::{Wall, WallRole, build_all_walls, build_panels, build_structure};
