//! Record-level batch loops: one region feature or one feeder row in, a few line
//! features out.
//!
//! Skip policy: a record whose geometry or generation fails is logged with
//! `tracing::warn!` and left out; the batch continues.
//!
//! Every record draws from its own stream `ReplayToken { seed, index: record }`, so
//! output does not depend on which records were skipped or processed first.

use anyhow::{anyhow, Result};
use feeder::api::{
    LineGenerator, PolygonLineGenerator, PolygonLineParams, ReplayToken, WalkGenerator, WalkParams,
};
use geo::{Coord, LineString};
use serde_json::{Map, Value};

use crate::geojson::{value_label, Feature, FeatureCollection, Geometry};
use crate::records::{field_f64, Row};

/// Result of a batch: the features plus how many records were dropped.
#[derive(Debug)]
pub struct BatchOutput {
    pub collection: FeatureCollection,
    pub records_seen: usize,
    pub records_skipped: usize,
}

#[derive(Clone, Debug)]
pub struct PolygonBatchCfg {
    pub lines_per_polygon: usize,
    pub params: PolygonLineParams,
    pub limit: Option<usize>,
    pub seed: u64,
}

#[derive(Clone, Debug)]
pub struct WalkBatchCfg {
    pub segment_count: usize,
    pub default_start: Coord<f64>,
    pub default_length_km: f64,
    pub seed: u64,
}

fn log_progress(idx: usize, total: usize) {
    if idx % (total / 10).max(1) == 0 {
        tracing::info!(record = idx + 1, total, "processing");
    }
}

/// Lines inside each polygonal feature of `regions`.
pub fn polygon_lines(regions: &FeatureCollection, cfg: &PolygonBatchCfg) -> BatchOutput {
    let total = cfg
        .limit
        .map_or(regions.features.len(), |n| n.min(regions.features.len()));
    let mut features = Vec::new();
    let mut skipped = 0;
    for (idx, feature) in regions.features.iter().take(total).enumerate() {
        log_progress(idx, total);
        match lines_for_region(idx, feature, cfg) {
            Ok(lines) => features.extend(lines),
            Err(err) => {
                tracing::warn!(record = idx, error = %err, "skipping region");
                skipped += 1;
            }
        }
    }
    tracing::info!(lines = features.len(), skipped, "polygon lines generated");
    BatchOutput {
        collection: FeatureCollection::new(features),
        records_seen: total,
        records_skipped: skipped,
    }
}

fn lines_for_region(idx: usize, feature: &Feature, cfg: &PolygonBatchCfg) -> Result<Vec<Feature>> {
    let region = feature
        .geometry
        .as_ref()
        .ok_or_else(|| anyhow!("feature has no geometry"))?
        .to_multi_polygon()?
        .ok_or_else(|| anyhow!("geometry is not a Polygon or MultiPolygon"))?;
    let uc_id = feature
        .property("uc_id")
        .cloned()
        .unwrap_or_else(|| Value::from(idx));
    let uc_name = feature
        .property("uc_name")
        .cloned()
        .unwrap_or_else(|| Value::from(format!("UC_{idx}")));

    let stream = ReplayToken::new(cfg.seed, idx as u64).stream_seed();
    let mut gen = PolygonLineGenerator::new(&region, cfg.params, stream)?;
    let mut out = Vec::new();
    for line_number in 0..cfg.lines_per_polygon {
        let sample = gen.generate_next()?;
        let mut props = Map::new();
        props.insert(
            "feeder_id".into(),
            Value::from(format!("{}_{line_number}", value_label(&uc_id))),
        );
        props.insert("uc_id".into(), uc_id.clone());
        props.insert("uc_name".into(), uc_name.clone());
        props.insert("line_number".into(), Value::from(line_number));
        props.insert("coordinates_count".into(), Value::from(sample.line.0.len()));
        out.push(Feature::new(props, Geometry::line_string(&sample.line)));
    }
    Ok(out)
}

/// One walk per feeder row, starting at the row's coordinates.
pub fn walk_lines(rows: &[Row], cfg: &WalkBatchCfg) -> BatchOutput {
    let total = rows.len();
    let mut features = Vec::with_capacity(total);
    let mut skipped = 0;
    for (idx, row) in rows.iter().enumerate() {
        log_progress(idx, total);
        match walk_for_row(idx, row, cfg) {
            Ok(line) => {
                let geometry = Geometry::line_string(&line);
                features.push(Feature::new(row.clone(), geometry));
            }
            Err(err) => {
                let feeder_id = row.get("feeder_id").map(value_label);
                tracing::warn!(record = idx, feeder_id = ?feeder_id, error = %err, "skipping feeder");
                skipped += 1;
            }
        }
    }
    tracing::info!(lines = features.len(), skipped, "walk lines generated");
    BatchOutput {
        collection: FeatureCollection::new(features),
        records_seen: total,
        records_skipped: skipped,
    }
}

fn walk_for_row(idx: usize, row: &Row, cfg: &WalkBatchCfg) -> Result<LineString<f64>> {
    let lat = field_f64(row, &["lat", "coordinates_lat"])?.unwrap_or(cfg.default_start.y);
    let lon = field_f64(row, &["lon", "coordinates_lon"])?.unwrap_or(cfg.default_start.x);
    let total_km = field_f64(row, &["circuit_length_km"])?.unwrap_or(cfg.default_length_km);
    let params = WalkParams {
        total_km,
        segment_count: cfg.segment_count,
    };
    let start = Coord { x: lon, y: lat };
    let token = ReplayToken::new(cfg.seed, idx as u64);
    Ok(WalkGenerator::generate_single(start, &params, token)?)
}
