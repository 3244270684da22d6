use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feeder::api::{PolygonLineParams, SamplerCfg, WalkParams};
use geo::Coord;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod batch;
mod geojson;
mod provenance;
mod records;

use batch::{BatchOutput, PolygonBatchCfg, WalkBatchCfg};
use geojson::FeatureCollection;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Synthetic feeder line generator")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Random lines inside each polygon of a GeoJSON FeatureCollection
    PolygonLines {
        #[arg(long)]
        input: String,
        #[arg(long, default_value = "feeder_lines.geojson")]
        out: String,
        #[arg(long, default_value_t = 5)]
        lines_per_polygon: usize,
        /// Vertices per line
        #[arg(long, default_value_t = 2)]
        segments_per_line: usize,
        /// Only process the first N polygons
        #[arg(long)]
        limit: Option<usize>,
        /// Random seed; drawn from OS entropy and logged when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10_000)]
        max_attempts: u32,
        #[arg(long, default_value_t = 1e-6)]
        min_fill_ratio: f64,
    },
    /// Distance-budget walks from the coordinates of each feeder CSV row
    WalkLines {
        #[arg(long)]
        input: String,
        #[arg(long, default_value = "feeders.geojson")]
        out: String,
        /// Vertices per line
        #[arg(long, default_value_t = 5)]
        segments: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 30.3753)]
        default_lat: f64,
        #[arg(long, default_value_t = 69.3451)]
        default_lon: f64,
        #[arg(long, default_value_t = 10.0)]
        default_length_km: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::PolygonLines {
            input,
            out,
            lines_per_polygon,
            segments_per_line,
            limit,
            seed,
            max_attempts,
            min_fill_ratio,
        } => {
            let params = PolygonLineParams {
                segment_count: segments_per_line,
                sampler: SamplerCfg {
                    max_attempts,
                    min_fill_ratio,
                },
            };
            params.validate()?;
            let cfg = PolygonBatchCfg {
                lines_per_polygon,
                params,
                limit,
                seed: resolve_seed(seed),
            };
            polygon_lines(input, out, cfg)
        }
        Action::WalkLines {
            input,
            out,
            segments,
            seed,
            default_lat,
            default_lon,
            default_length_km,
        } => {
            let cfg = WalkBatchCfg {
                segment_count: segments,
                default_start: Coord {
                    x: default_lon,
                    y: default_lat,
                },
                default_length_km,
                seed: resolve_seed(seed),
            };
            walk_lines(input, out, cfg)
        }
        Action::Report => report(),
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "random seed");
    seed
}

fn polygon_lines(input: String, out: String, cfg: PolygonBatchCfg) -> Result<()> {
    tracing::info!(
        input,
        out,
        lines_per_polygon = cfg.lines_per_polygon,
        segments_per_line = cfg.params.segment_count,
        "polygon-lines"
    );
    let raw = std::fs::read(&input).with_context(|| format!("reading {input}"))?;
    let regions: FeatureCollection =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {input} as GeoJSON"))?;
    tracing::info!(features = regions.features.len(), "loaded regions");

    let output = batch::polygon_lines(&regions, &cfg);
    let params = serde_json::json!({
        "command": "polygon-lines",
        "input": input,
        "lines_per_polygon": cfg.lines_per_polygon,
        "segments_per_line": cfg.params.segment_count,
        "limit": cfg.limit,
        "max_attempts": cfg.params.sampler.max_attempts,
        "min_fill_ratio": cfg.params.sampler.min_fill_ratio,
    });
    write_output(&out, &output, params, cfg.seed)
}

fn walk_lines(input: String, out: String, cfg: WalkBatchCfg) -> Result<()> {
    tracing::info!(input, out, segments = cfg.segment_count, "walk-lines");
    WalkParams {
        total_km: cfg.default_length_km,
        segment_count: cfg.segment_count,
    }
    .validate()?;
    anyhow::ensure!(
        cfg.default_start.x.is_finite() && cfg.default_start.y.is_finite(),
        "default start must be finite, got lon={} lat={}",
        cfg.default_start.x,
        cfg.default_start.y
    );
    let rows = records::read_csv_rows(&input)?;
    tracing::info!(rows = rows.len(), "loaded feeder records");

    let output = batch::walk_lines(&rows, &cfg);
    let params = serde_json::json!({
        "command": "walk-lines",
        "input": input,
        "segments": cfg.segment_count,
        "default_lat": cfg.default_start.y,
        "default_lon": cfg.default_start.x,
        "default_length_km": cfg.default_length_km,
    });
    write_output(&out, &output, params, cfg.seed)
}

fn write_output(out: &str, output: &BatchOutput, params: serde_json::Value, seed: u64) -> Result<()> {
    write_json(out, &output.collection)?;
    let payload = provenance::Payload::new(params).with_seed(seed);
    let prov = provenance::write_sidecar(out, payload)?;
    tracing::info!(
        out,
        provenance = %prov.display(),
        features = output.collection.features.len(),
        records = output.records_seen,
        skipped = output.records_skipped,
        "done"
    );
    Ok(())
}

fn write_json<T: Serialize>(out: &str, value: &T) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {out}"))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "feeder_version": feeder::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
