//! Random points and lines inside a polygon (bounding-box rejection sampling).
//!
//! Model
//! - Candidates are drawn uniformly from `[min_x, max_x) × [min_y, max_y)` and
//!   accepted by the region's strict-interior predicate. Accepted points are
//!   uniform over the region's area.
//! - Expected attempts per point are `1 / fill_ratio`. Regions with a fill ratio
//!   below `SamplerCfg::min_fill_ratio` (or zero area) are rejected up front; the
//!   loop itself never runs past `SamplerCfg::max_attempts`.
//! - A line is `segment_count` independent samples in draw order. Only vertices are
//!   guaranteed inside; edges may leave a concave region.

use geo::{Coord, LineString};
use rand::Rng;

use super::{check_segment_count, GeneratorError, LineGenerator, LineSample, ReplayToken};
use crate::geom::{BoundingBox, SampleRegion, SamplerCfg};

/// Draw one point inside `region`.
pub fn sample_point<S, R>(
    region: &S,
    cfg: &SamplerCfg,
    rng: &mut R,
) -> Result<Coord<f64>, GeneratorError>
where
    S: SampleRegion + ?Sized,
    R: Rng,
{
    cfg.validate()?;
    let bbox = drawable_box(region, cfg)?;
    draw_inside(region, &bbox, cfg.max_attempts, rng)
}

/// Draw a line of `segment_count` vertices, each inside `region`.
///
/// The bounding box is computed once per call and shared by every vertex.
pub fn synthesize_line<S, R>(
    region: &S,
    segment_count: usize,
    cfg: &SamplerCfg,
    rng: &mut R,
) -> Result<LineString<f64>, GeneratorError>
where
    S: SampleRegion + ?Sized,
    R: Rng,
{
    check_segment_count(segment_count)?;
    cfg.validate()?;
    let bbox = drawable_box(region, cfg)?;
    let mut coords = Vec::with_capacity(segment_count);
    for _ in 0..segment_count {
        coords.push(draw_inside(region, &bbox, cfg.max_attempts, rng)?);
    }
    Ok(LineString::from(coords))
}

/// Bounding box of `region`, provided rejection sampling can converge on it.
fn drawable_box<S>(region: &S, cfg: &SamplerCfg) -> Result<BoundingBox, GeneratorError>
where
    S: SampleRegion + ?Sized,
{
    let bbox = region
        .bounding_box()
        .ok_or_else(|| GeneratorError::degenerate("region has no vertices"))?;
    if !bbox.is_drawable() {
        return Err(GeneratorError::degenerate(format!(
            "bounding box {:?} has no interior",
            bbox
        )));
    }
    let ratio = region.fill_ratio().unwrap_or(0.0);
    if !(ratio.is_finite()) || ratio <= 0.0 {
        return Err(GeneratorError::degenerate("region has zero area"));
    }
    if ratio < cfg.min_fill_ratio {
        return Err(GeneratorError::degenerate(format!(
            "fill ratio {ratio:e} below threshold {:e}",
            cfg.min_fill_ratio
        )));
    }
    Ok(bbox)
}

fn draw_inside<S, R>(
    region: &S,
    bbox: &BoundingBox,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Coord<f64>, GeneratorError>
where
    S: SampleRegion + ?Sized,
    R: Rng,
{
    for _ in 0..max_attempts {
        let c = Coord {
            x: rng.gen_range(bbox.min_x..bbox.max_x),
            y: rng.gen_range(bbox.min_y..bbox.max_y),
        };
        if region.contains_coord(c) {
            return Ok(c);
        }
    }
    Err(GeneratorError::degenerate(format!(
        "no interior point after {max_attempts} attempts"
    )))
}

/// Parameters for lines drawn inside a region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonLineParams {
    pub segment_count: usize,
    pub sampler: SamplerCfg,
}

impl Default for PolygonLineParams {
    fn default() -> Self {
        Self {
            segment_count: 2,
            sampler: SamplerCfg::default(),
        }
    }
}

impl PolygonLineParams {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        check_segment_count(self.segment_count)?;
        self.sampler.validate()
    }
}

/// Generator of lines inside one borrowed region.
pub struct PolygonLineGenerator<'a, S: SampleRegion + ?Sized> {
    region: &'a S,
    params: PolygonLineParams,
    seed: u64,
    next_index: u64,
}

impl<'a, S: SampleRegion + ?Sized> PolygonLineGenerator<'a, S> {
    pub fn new(region: &'a S, params: PolygonLineParams, seed: u64) -> Result<Self, GeneratorError> {
        params.validate()?;
        Ok(Self {
            region,
            params,
            seed,
            next_index: 0,
        })
    }

    pub fn generate_single(
        region: &S,
        params: &PolygonLineParams,
        token: ReplayToken,
    ) -> Result<LineString<f64>, GeneratorError> {
        let mut rng = token.to_std_rng();
        synthesize_line(region, params.segment_count, &params.sampler, &mut rng)
    }
}

impl<'a, S: SampleRegion + ?Sized> LineGenerator for PolygonLineGenerator<'a, S> {
    type Params = PolygonLineParams;

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn generate_next(&mut self) -> Result<LineSample, GeneratorError> {
        let token = ReplayToken::new(self.seed, self.next_index);
        self.next_index = self.next_index.wrapping_add(1);
        let line = Self::generate_single(self.region, &self.params, token)?;
        Ok(LineSample {
            line,
            replay: token,
        })
    }

    fn regenerate(&self, replay: &ReplayToken) -> Result<LineString<f64>, GeneratorError> {
        Self::generate_single(self.region, &self.params, *replay)
    }
}
