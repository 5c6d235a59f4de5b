/// Errors from building or configuring a movement gate.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GateError {
    #[error("{field} references wall {index}, but the layout only has {count} gate walls")]
    WallIndexOutOfRange {
        field: &'static str,
        index: usize,
        count: usize,
    },
    #[error("branch thresholds are inverted: low {low} > high {high}")]
    InvertedBranch { low: f32, high: f32 },
    #[error("{field} must name at least one wall")]
    EmptyWallSet { field: &'static str },
    #[error("unknown gate profile {0:?} (expected \"original\" or \"revised\")")]
    UnknownProfile(String),
}
