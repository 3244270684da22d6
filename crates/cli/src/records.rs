//! Feeder record tables (CSV) read through Polars.
//!
//! Every column is kept: rows come back as JSON objects so the walk batch can copy
//! them into feature properties verbatim. Integer columns stay integers, float
//! columns stay floats, everything else is rendered as text.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::path::Path;

pub type Row = Map<String, Value>;

/// Read a CSV file into one JSON object per row.
pub fn read_csv_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let mut rows = vec![Row::new(); df.height()];
    for series in df.get_columns() {
        let name = series.name().to_string();
        let values =
            series_to_json(series).with_context(|| format!("converting column {name}"))?;
        for (row, value) in rows.iter_mut().zip(values) {
            row.insert(name.clone(), value);
        }
    }
    Ok(rows)
}

fn series_to_json(s: &Series) -> PolarsResult<Vec<Value>> {
    let dtype = s.dtype();
    if dtype.is_integer() {
        let cast = s.cast(&DataType::Int64)?;
        let values = cast.i64()?.into_iter().map(|v| v.map_or(Value::Null, Value::from));
        Ok(values.collect())
    } else if dtype.is_float() {
        let cast = s.cast(&DataType::Float64)?;
        let values = cast.f64()?.into_iter().map(|v| v.map_or(Value::Null, Value::from));
        Ok(values.collect())
    } else if matches!(dtype, DataType::Boolean) {
        let values = s.bool()?.into_iter().map(|v| v.map_or(Value::Null, Value::from));
        Ok(values.collect())
    } else {
        let cast = s.cast(&DataType::String)?;
        let values = cast.str()?.into_iter().map(|v| v.map_or(Value::Null, Value::from));
        Ok(values.collect())
    }
}

/// First present, non-null field among `keys`, read as a number.
///
/// Numeric strings are accepted. `Ok(None)` when no key holds a value; an error
/// when a value is present but not numeric.
pub fn field_f64(row: &Row, keys: &[&str]) -> Result<Option<f64>> {
    for key in keys {
        match row.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::Number(n)) => return Ok(n.as_f64()),
            Some(Value::String(s)) if s.trim().is_empty() => continue,
            Some(Value::String(s)) => {
                let parsed = s
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("field {key} = {s:?} is not a number"))?;
                return Ok(Some(parsed));
            }
            Some(other) => anyhow::bail!("field {key} = {other} is not a number"),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn rows_keep_column_types() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("feeder_data.csv");
        fs::write(
            &csv,
            "feeder_id,consumers,circuit_length_km,lat,lon,line_type\n\
             FDR_PUN_LAH_0001,1200,12.5,31.52,74.35,11kV\n\
             FDR_PUN_LAH_0002,800,7.25,,,33kV\n",
        )
        .unwrap();
        let rows = read_csv_rows(&csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["feeder_id"], "FDR_PUN_LAH_0001");
        assert_eq!(rows[0]["consumers"], 1200);
        assert_eq!(rows[0]["circuit_length_km"], 12.5);
        assert_eq!(rows[1]["line_type"], "33kV");
        assert_eq!(rows[1]["lat"], Value::Null);
    }

    #[test]
    fn numeric_fields_fall_back_across_keys() {
        let mut row = Row::new();
        row.insert("lat".into(), Value::Null);
        row.insert("coordinates_lat".into(), Value::from(24.86));
        row.insert("circuit_length_km".into(), Value::from(" 18.5 "));
        row.insert("district".into(), Value::from("Karachi"));
        assert_eq!(field_f64(&row, &["lat", "coordinates_lat"]).unwrap(), Some(24.86));
        assert_eq!(field_f64(&row, &["circuit_length_km"]).unwrap(), Some(18.5));
        assert_eq!(field_f64(&row, &["lon", "coordinates_lon"]).unwrap(), None);
        assert!(field_f64(&row, &["district"]).is_err());
    }
}
