pub mod curve; // hdi over a discretized density curve
pub mod sample; // hdi over raw observations

use thiserror::Error;

/// Shortest interval holding a requested probability mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f32,
    pub upper: f32,
}

#[derive(Debug, Error)]
pub enum HdiError {
    /// `alpha` outside `(0, 1)`, mismatched support/density lengths, or a
    /// zero-mass density curve.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The requested window is incompatible with the sample size: too few
    /// points to form an interval, or none left to slide it.
    #[error("insufficient data: window of {window} points over {n} samples")]
    InsufficientData { window: usize, n: usize },
}
