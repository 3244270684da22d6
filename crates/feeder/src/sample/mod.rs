//! Random feeder-line synthesis.
//!
//! Purpose
//! - Polygon lines: vertices drawn independently inside a region by bounding-box
//!   rejection sampling (`polygon`).
//! - Walk lines: a start point plus random-bearing steps that consume a fixed
//!   distance budget (`walk`).
//!
//! Why this design
//! - Randomness is always an explicit `&mut impl Rng`; nothing reads global state.
//! - Every line produced by a generator carries a `ReplayToken` `(seed, index)`
//!   that derives its own `StdRng`, so lines are independent units of work and can
//!   be regenerated (or produced in parallel) without coordinating a shared stream.
//! - The rejection loop is capped (`SamplerCfg::max_attempts`) and reports
//!   `GeneratorError::DegeneratePolygon` instead of spinning.

pub mod polygon;
pub mod walk;

use geo::LineString;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

pub use polygon::{sample_point, synthesize_line, PolygonLineGenerator, PolygonLineParams};
pub use walk::{walk, WalkGenerator, WalkParams};

/// Error type shared by all samplers and generators.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// Region too thin (or empty) for rejection sampling within the attempt cap.
    DegeneratePolygon { reason: String },
    /// Fewer than two vertices requested.
    InvalidSegmentCount { got: usize },
    /// Walk inputs out of contract (distance, start, vertex count).
    InvalidWalkParameters { reason: String },
    /// Configuration rejected by `validate()`.
    InvalidParams { reason: String },
}

impl GeneratorError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegeneratePolygon {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_walk(reason: impl Into<String>) -> Self {
        Self::InvalidWalkParameters {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegeneratePolygon { reason } => write!(f, "degenerate polygon: {reason}"),
            Self::InvalidSegmentCount { got } => {
                write!(f, "invalid segment count {got}: a line needs at least 2 vertices")
            }
            Self::InvalidWalkParameters { reason } => {
                write!(f, "invalid walk parameters: {reason}")
            }
            Self::InvalidParams { reason } => write!(f, "invalid generator params: {reason}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Smallest vertex count of a line.
pub const MIN_VERTICES: usize = 2;

pub(crate) fn check_segment_count(segment_count: usize) -> Result<(), GeneratorError> {
    if segment_count < MIN_VERTICES {
        return Err(GeneratorError::InvalidSegmentCount { got: segment_count });
    }
    Ok(())
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Seed of the stream owned by this token.
    ///
    /// Neighbouring indices map to unrelated seeds, so `(seed, 0)`, `(seed, 1)`, ...
    /// behave as independent streams.
    #[inline]
    pub fn stream_seed(self) -> u64 {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)))
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        StdRng::seed_from_u64(self.stream_seed())
    }
}

/// One generated line plus the token that regenerates it.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSample {
    pub line: LineString<f64>,
    pub replay: ReplayToken,
}

/// Common trait for reproducible line sources.
pub trait LineGenerator {
    type Params: Clone;

    fn params(&self) -> &Self::Params;

    /// Draw the next line; advances the token index even on failure.
    fn generate_next(&mut self) -> Result<LineSample, GeneratorError>;

    /// Rebuild the line identified by `replay`.
    fn regenerate(&self, replay: &ReplayToken) -> Result<LineString<f64>, GeneratorError>;
}
