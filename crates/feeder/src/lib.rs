//! Random feeder-line geometry.
//!
//! Two synthesizers, both pure and driven by an explicit random source:
//! - lines whose vertices fall inside a (possibly concave, possibly holed) region;
//! - walks from a fixed start that spend a total distance budget across
//!   random-bearing steps.
//!
//! No I/O and no logging happen here; the `cli` crate reads records, calls into
//! this crate, and writes GeoJSON.
//!
//! Coordinates are `geo::Coord<f64>` with `x` = longitude and `y` = latitude,
//! treated as planar degrees except where a function says otherwise.

pub mod api;
pub mod geom;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{
        haversine_km, haversine_length_km, planar_length_km, BoundingBox, SampleRegion,
        SamplerCfg,
    };
    pub use crate::sample::{
        sample_point, synthesize_line, walk, GeneratorError, LineGenerator, LineSample,
        PolygonLineGenerator, PolygonLineParams, ReplayToken, WalkGenerator, WalkParams,
    };
    pub use geo::{Coord, LineString, MultiPolygon, Polygon};
}
