//! Print a few synthetic feeder lines for a quick eyeball check.
//!
//! Usage:
//!   cargo run -p feeder --example feeder_sketch -- polygon
//!   cargo run -p feeder --example feeder_sketch -- walk
//!
//! - polygon mode: 2-vertex lines inside an L-shaped region
//! - walk mode: 5-vertex walks of 10 km, with planar and haversine lengths

use feeder::prelude::*;
use geo::{coord, polygon};

fn main() {
    let mode = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "polygon".to_string());
    match mode.as_str() {
        "polygon" => show_polygon_mode(),
        "walk" => show_walk_mode(),
        _ => {
            eprintln!("usage: feeder_sketch [polygon|walk]");
        }
    }
}

fn show_polygon_mode() {
    let region = polygon![
        (x: 0.0, y: 0.0),
        (x: 2.0, y: 0.0),
        (x: 2.0, y: 1.0),
        (x: 1.0, y: 1.0),
        (x: 1.0, y: 2.0),
        (x: 0.0, y: 2.0),
    ];
    let mut gen = PolygonLineGenerator::new(&region, PolygonLineParams::default(), 2025).unwrap();
    for i in 0..5 {
        let s = gen.generate_next().unwrap();
        println!("polygon line {i}: {:?} (replay {:?})", s.line.0, s.replay);
    }
}

fn show_walk_mode() {
    let start = coord! { x: 69.3451, y: 30.3753 };
    let mut gen = WalkGenerator::new(start, WalkParams::default(), 777).unwrap();
    for i in 0..5 {
        let s = gen.generate_next().unwrap();
        println!(
            "walk {i}: planar={:.6} km, haversine={:.6} km, end={:?}",
            planar_length_km(&s.line),
            haversine_length_km(&s.line),
            s.line.0.last()
        );
    }
}
