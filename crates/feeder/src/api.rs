//! Curated surface for the batch driver (UNSTABLE).
//!
//! - Not a public API. Breaking changes are allowed when they simplify callers.
//! - The CLI imports from here so the library layout can move underneath it.

// Geometry and measurement
pub use crate::geom::{
    haversine_km, haversine_length_km, planar_distance_km, planar_length_km, BoundingBox,
    SampleRegion, SamplerCfg,
};
// Line synthesis
pub use crate::sample::{
    sample_point, synthesize_line, walk, GeneratorError, LineGenerator, LineSample,
    PolygonLineGenerator, PolygonLineParams, ReplayToken, WalkGenerator, WalkParams,
};
