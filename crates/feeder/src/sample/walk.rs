//! Random-bearing walks that consume a fixed distance budget.
//!
//! Model
//! - `segment_count` vertices, `segment_count - 1` steps. The first vertex is the
//!   start point, copied bit for bit.
//! - Each step draws a bearing from `[0, 360)` degrees and takes
//!   `remaining / steps_left` kilometers, so the budget is split evenly online and
//!   the last step takes exactly what is left.
//! - Distance to degrees uses `geom::offset_planar` (1° ≈ 111 km, longitude scaled
//!   by `cos(lat)` at the step's origin). Not a geodesic; unreliable near the poles.

use geo::{Coord, LineString};
use rand::Rng;

use super::{GeneratorError, LineGenerator, LineSample, ReplayToken, MIN_VERTICES};
use crate::geom::offset_planar;

/// Walk `total_km` from `start` in `segment_count - 1` random-bearing steps.
pub fn walk<R: Rng>(
    start: Coord<f64>,
    total_km: f64,
    segment_count: usize,
    rng: &mut R,
) -> Result<LineString<f64>, GeneratorError> {
    check_walk(start, total_km, segment_count)?;
    let steps = segment_count - 1;
    let mut coords = Vec::with_capacity(segment_count);
    coords.push(start);
    let mut current = start;
    let mut remaining = total_km;
    for step in 0..steps {
        let bearing: f64 = rng.gen_range(0.0..360.0);
        let steps_left = (steps - step) as f64;
        let step_km = remaining / steps_left;
        current = offset_planar(current, step_km, bearing);
        coords.push(current);
        remaining -= step_km;
    }
    Ok(LineString::from(coords))
}

fn check_walk(start: Coord<f64>, total_km: f64, segment_count: usize) -> Result<(), GeneratorError> {
    WalkParams {
        total_km,
        segment_count,
    }
    .validate()?;
    if !(start.x.is_finite() && start.y.is_finite()) {
        return Err(GeneratorError::invalid_walk("start point must be finite"));
    }
    Ok(())
}

/// Parameters for distance-budget walks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkParams {
    pub total_km: f64,
    pub segment_count: usize,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            total_km: 10.0,
            segment_count: 5,
        }
    }
}

/// Generator of walks from one fixed start point.
pub struct WalkGenerator {
    start: Coord<f64>,
    params: WalkParams,
    seed: u64,
    next_index: u64,
}

impl WalkParams {
    /// Vertex count and distance budget; the start point is checked per walk.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.segment_count < MIN_VERTICES {
            return Err(GeneratorError::invalid_walk(format!(
                "segment_count must be >= {MIN_VERTICES}, got {}",
                self.segment_count
            )));
        }
        if !(self.total_km.is_finite()) || self.total_km <= 0.0 {
            return Err(GeneratorError::invalid_walk(format!(
                "total distance must be finite and > 0 km, got {}",
                self.total_km
            )));
        }
        Ok(())
    }
}

impl WalkGenerator {
    pub fn new(start: Coord<f64>, params: WalkParams, seed: u64) -> Result<Self, GeneratorError> {
        check_walk(start, params.total_km, params.segment_count)?;
        Ok(Self {
            start,
            params,
            seed,
            next_index: 0,
        })
    }

    pub fn start(&self) -> Coord<f64> {
        self.start
    }

    pub fn generate_single(
        start: Coord<f64>,
        params: &WalkParams,
        token: ReplayToken,
    ) -> Result<LineString<f64>, GeneratorError> {
        let mut rng = token.to_std_rng();
        walk(start, params.total_km, params.segment_count, &mut rng)
    }
}

impl LineGenerator for WalkGenerator {
    type Params = WalkParams;

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn generate_next(&mut self) -> Result<LineSample, GeneratorError> {
        let token = ReplayToken::new(self.seed, self.next_index);
        self.next_index = self.next_index.wrapping_add(1);
        let line = Self::generate_single(self.start, &self.params, token)?;
        Ok(LineSample {
            line,
            replay: token,
        })
    }

    fn regenerate(&self, replay: &ReplayToken) -> Result<LineString<f64>, GeneratorError> {
        Self::generate_single(self.start, &self.params, *replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::planar_length_km;
    use geo::coord;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn ten_km_in_five_vertices() {
        let start = coord! { x: 30.0, y: 70.0 };
        let mut rng = StdRng::seed_from_u64(42);
        let line = walk(start, 10.0, 5, &mut rng).unwrap();
        assert_eq!(line.0.len(), 5);
        assert_eq!(line.0[0], start);
        assert!((planar_length_km(&line) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn two_vertices_take_the_whole_budget() {
        let start = coord! { x: 69.3451, y: 30.3753 };
        let mut rng = StdRng::seed_from_u64(5);
        let line = walk(start, 42.5, 2, &mut rng).unwrap();
        assert_eq!(line.0.len(), 2);
        assert!((planar_length_km(&line) - 42.5).abs() < 1e-9);
    }

    #[test]
    fn steps_share_the_budget_evenly() {
        let start = coord! { x: 10.0, y: -20.0 };
        let mut rng = StdRng::seed_from_u64(9);
        let line = walk(start, 12.0, 7, &mut rng).unwrap();
        for w in line.0.windows(2) {
            let d = crate::geom::planar_distance_km(w[0], w[1]);
            assert!((d - 2.0).abs() < 1e-9, "step of {d} km");
        }
    }

    #[test]
    fn out_of_contract_inputs_fail_fast() {
        let start = coord! { x: 0.0, y: 0.0 };
        let mut rng = StdRng::seed_from_u64(0);
        for (km, n) in [(0.0, 5), (-1.0, 5), (f64::NAN, 5), (f64::INFINITY, 5), (5.0, 1), (5.0, 0)] {
            let err = walk(start, km, n, &mut rng).unwrap_err();
            assert!(matches!(err, GeneratorError::InvalidWalkParameters { .. }));
        }
        let nan_start = coord! { x: f64::NAN, y: 0.0 };
        assert!(walk(nan_start, 1.0, 3, &mut rng).is_err());
    }

    #[test]
    fn params_validate_count_and_budget() {
        assert!(WalkParams::default().validate().is_ok());
        let short = WalkParams {
            segment_count: 1,
            ..WalkParams::default()
        };
        let err = short.validate().unwrap_err();
        assert!(err.to_string().contains("segment_count must be >= 2, got 1"));
        for km in [0.0, -2.0, f64::NAN] {
            let bad = WalkParams {
                total_km: km,
                ..WalkParams::default()
            };
            assert!(matches!(
                bad.validate(),
                Err(GeneratorError::InvalidWalkParameters { .. })
            ));
        }
    }

    #[test]
    fn generator_streams_are_independent_and_replayable() {
        let start = coord! { x: 69.3451, y: 30.3753 };
        let mut gen = WalkGenerator::new(start, WalkParams::default(), 7).unwrap();
        let a = gen.generate_next().unwrap();
        let b = gen.generate_next().unwrap();
        assert_ne!(a.line, b.line);
        assert_eq!(gen.regenerate(&b.replay).unwrap(), b.line);
        assert_eq!(gen.start(), start);
        let bad = WalkParams {
            total_km: 0.0,
            ..WalkParams::default()
        };
        assert!(WalkGenerator::new(start, bad, 7).is_err());
    }
}
