//! Basic planar types and sampling tolerances.
//!
//! - `BoundingBox`: axis-aligned extent of a region, recomputed per call.
//! - `SamplerCfg`: attempt cap and fill-ratio threshold for rejection sampling.
//!
//! Code cross-refs: `region::SampleRegion`, `sample::polygon::sample_point`

use geo::Rect;

/// Axis-aligned bounding box in planar degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[inline]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
    /// True when every bound is finite and both extents are strictly positive.
    ///
    /// Uniform draws over `[min, max)` need a non-empty interval on both axes.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite();
        finite && self.width() > 0.0 && self.height() > 0.0
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        let (lo, hi) = (rect.min(), rect.max());
        Self::new(lo.x, lo.y, hi.x, hi.y)
    }
}

/// Rejection-sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerCfg {
    /// Maximum candidates drawn per point before giving up.
    pub max_attempts: u32,
    /// Minimum `area / bbox_area` accepted before sampling starts. `0` disables the check.
    pub min_fill_ratio: f64,
}

impl Default for SamplerCfg {
    fn default() -> Self {
        Self {
            max_attempts: 10_000,
            min_fill_ratio: 1e-6,
        }
    }
}

impl SamplerCfg {
    pub fn validate(&self) -> Result<(), crate::sample::GeneratorError> {
        use crate::sample::GeneratorError;
        if self.max_attempts == 0 {
            return Err(GeneratorError::invalid("max_attempts must be > 0"));
        }
        if !(self.min_fill_ratio.is_finite()) || !(0.0..1.0).contains(&self.min_fill_ratio) {
            return Err(GeneratorError::invalid("min_fill_ratio must lie in [0, 1)"));
        }
        Ok(())
    }
}
