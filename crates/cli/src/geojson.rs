//! Minimal GeoJSON model: the subset needed to read region features and write
//! line features.
//!
//! - Input: `FeatureCollection` of `Polygon` / `MultiPolygon` features; other
//!   geometry types parse as `Geometry::Unsupported` and are skipped upstream.
//! - Output: `LineString` features with `[x, y]` positions (no elevation).

use anyhow::{bail, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `[x, y]` or `[x, y, z]`; only the first two entries are read.
pub type Position = Vec<f64>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub fn new(properties: Map<String, Value>, geometry: Geometry) -> Self {
        Self {
            kind: "Feature".to_string(),
            properties: Some(properties),
            geometry: Some(geometry),
        }
    }

    /// Property lookup that treats a missing `properties` object as empty.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Region view of a polygonal geometry; `Ok(None)` for any other type.
    pub fn to_multi_polygon(&self) -> Result<Option<MultiPolygon<f64>>> {
        match self {
            Geometry::Polygon { coordinates } => {
                Ok(Some(MultiPolygon(vec![polygon_from_rings(coordinates)?])))
            }
            Geometry::MultiPolygon { coordinates } => {
                let polys = coordinates
                    .iter()
                    .map(|rings| polygon_from_rings(rings))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Some(MultiPolygon(polys)))
            }
            _ => Ok(None),
        }
    }

    pub fn line_string(line: &LineString<f64>) -> Self {
        Geometry::LineString {
            coordinates: line.0.iter().map(|c| vec![c.x, c.y]).collect(),
        }
    }
}

fn coord_from_position(p: &[f64]) -> Result<Coord<f64>> {
    match p {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => bail!("position needs at least two numbers, got {}", p.len()),
    }
}

fn ring_from_positions(ring: &[Position]) -> Result<LineString<f64>> {
    let coords = ring
        .iter()
        .map(|p| coord_from_position(p))
        .collect::<Result<Vec<_>>>()?;
    Ok(LineString::from(coords))
}

fn polygon_from_rings(rings: &[Vec<Position>]) -> Result<Polygon<f64>> {
    let Some((exterior, holes)) = rings.split_first() else {
        bail!("polygon has no exterior ring");
    };
    let interiors = holes
        .iter()
        .map(|h| ring_from_positions(h))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(ring_from_positions(exterior)?, interiors))
}

/// Plain-text rendering of a property value (strings without quotes).
pub fn value_label(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeder::geom::SampleRegion;
    use geo::line_string;

    const UCS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"uc_id": 17, "uc_name": "Gulberg"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]],
                        [[1, 1], [3, 1], [3, 3], [1, 3], [1, 1]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[10, 10, 5], [11, 10, 5], [11, 11, 5], [10, 10, 5]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "GeometryCollection", "geometries": []}
            },
            {"type": "Feature", "properties": {}, "geometry": null}
        ]
    }"#;

    #[test]
    fn parses_polygons_and_skips_the_rest() {
        let fc: FeatureCollection = serde_json::from_str(UCS).unwrap();
        assert_eq!(fc.features.len(), 4);

        let first = fc.features[0].geometry.as_ref().unwrap();
        let region = first.to_multi_polygon().unwrap().unwrap();
        assert_eq!(region.0[0].interiors().len(), 1);
        assert!((region.area() - 12.0).abs() < 1e-12);
        assert_eq!(fc.features[0].property("uc_name"), Some(&Value::from("Gulberg")));

        let second = fc.features[1].geometry.as_ref().unwrap();
        let multi = second.to_multi_polygon().unwrap().unwrap();
        assert_eq!(multi.0.len(), 1);
        assert!(fc.features[1].property("uc_id").is_none());

        let third = fc.features[2].geometry.as_ref().unwrap();
        assert_eq!(third, &Geometry::Unsupported);
        assert!(third.to_multi_polygon().unwrap().is_none());
        assert!(fc.features[3].geometry.is_none());
    }

    #[test]
    fn short_positions_are_rejected() {
        let g = Geometry::Polygon {
            coordinates: vec![vec![vec![0.0], vec![1.0, 1.0]]],
        };
        assert!(g.to_multi_polygon().is_err());
        let empty = Geometry::Polygon {
            coordinates: vec![],
        };
        assert!(empty.to_multi_polygon().is_err());
    }

    #[test]
    fn line_features_serialize_as_xy_pairs() {
        let line = line_string![(x: 69.5, y: 30.25), (x: 69.75, y: 30.5)];
        let mut props = Map::new();
        props.insert("feeder_id".into(), Value::from("17_0"));
        let feature = Feature::new(props, Geometry::line_string(&line));
        let v = serde_json::to_value(FeatureCollection::new(vec![feature])).unwrap();
        assert_eq!(v["type"], "FeatureCollection");
        assert_eq!(v["features"][0]["type"], "Feature");
        assert_eq!(v["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(
            v["features"][0]["geometry"]["coordinates"],
            serde_json::json!([[69.5, 30.25], [69.75, 30.5]])
        );
    }

    #[test]
    fn labels_strip_string_quotes() {
        assert_eq!(value_label(&Value::from("UC_3")), "UC_3");
        assert_eq!(value_label(&Value::from(3)), "3");
    }
}
