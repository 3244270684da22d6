//! Planar geometry helpers for feeder-line synthesis.
//!
//! Purpose
//! - Describe sampleable regions (`SampleRegion`) over `geo` polygons.
//! - Keep the distance conventions in one place: planar degrees for containment,
//!   an equirectangular step for walks, haversine for measurement.
//!
//! Code cross-refs: `BoundingBox`, `SamplerCfg`, `haversine_km`, `offset_planar`

pub mod distance;
mod region;
mod types;

pub use distance::{
    haversine_km, haversine_length_km, offset_planar, planar_distance_km, planar_length_km,
    EARTH_RADIUS_KM, KM_PER_DEGREE,
};
pub use region::SampleRegion;
pub use types::{BoundingBox, SamplerCfg};
