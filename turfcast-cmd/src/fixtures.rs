//! CSV fixture readers for the CLI commands.
//!
//! All fixtures are headerless CSV. Empty fields in the horizon table are
//! survey nulls and stay `None`; the `-999` sentinel in the ET series is
//! treated as end-of-data.

use anyhow::Context;
use csv::ReaderBuilder;
use turfcast_models::texture::SoilHorizon;
use turfcast_weather::grid::{GridSeries, MISSING_SENTINEL};
use turfcast_weather::series::DateValueSeries;

/// Read raw hourly rows: each line is 11 or 12 numeric fields.
pub fn read_hourly_rows(path: &str) -> anyhow::Result<Vec<Vec<f64>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening hourly CSV {path}"))?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let row: Vec<f64> = record
            .iter()
            .map(|field| {
                field
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("hourly CSV line {}: bad field {field:?}", line + 1))
            })
            .collect::<anyhow::Result<_>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read grid rows: `date,gdd32,gdd50,precip,avg_temp`.
pub fn read_grid(path: &str) -> anyhow::Result<GridSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening grid CSV {path}"))?;

    let mut rows: Vec<(String, Vec<f64>)> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let date = record
            .get(0)
            .with_context(|| format!("grid CSV line {}: missing date", line + 1))?
            .trim()
            .to_string();
        let values: Vec<f64> = record
            .iter()
            .skip(1)
            .map(|field| {
                field
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("grid CSV line {}: bad field {field:?}", line + 1))
            })
            .collect::<anyhow::Result<_>>()?;
        rows.push((date, values));
    }

    let grid = GridSeries::parse(rows.iter().map(|(d, v)| (d.as_str(), v.as_slice())))?;
    Ok(grid)
}

/// Read a `date,value` series, stopping at the first `-999` sentinel.
pub fn read_series(path: &str) -> anyhow::Result<DateValueSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening series CSV {path}"))?;

    let mut series = DateValueSeries::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let date = record
            .get(0)
            .with_context(|| format!("series CSV line {}: missing date", line + 1))?
            .trim()
            .parse()
            .with_context(|| format!("series CSV line {}: bad date", line + 1))?;
        let value: f64 = record
            .get(1)
            .with_context(|| format!("series CSV line {}: missing value", line + 1))?
            .trim()
            .parse()
            .with_context(|| format!("series CSV line {}: bad value", line + 1))?;
        if value <= MISSING_SENTINEL {
            break;
        }
        series.push(date, value)?;
    }
    Ok(series)
}

/// Read soil horizons: `clay,sand,silt,top_cm,bottom_cm,area_pct,component`.
/// Empty numeric fields are survey nulls.
pub fn read_horizons(path: &str) -> anyhow::Result<Vec<SoilHorizon>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening horizons CSV {path}"))?;

    let mut horizons = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let line = line + 1;
        horizons.push(SoilHorizon {
            clay_pct: optional_field(&record, 0, line)?,
            sand_pct: optional_field(&record, 1, line)?,
            silt_pct: optional_field(&record, 2, line)?,
            top_depth_cm: required_field(&record, 3, line)?,
            bottom_depth_cm: required_field(&record, 4, line)?,
            area_pct: optional_field(&record, 5, line)?,
            component: get_field(&record, 6, line)?.to_string(),
        });
    }
    Ok(horizons)
}

fn get_field<'r>(record: &'r csv::StringRecord, i: usize, line: usize) -> anyhow::Result<&'r str> {
    record
        .get(i)
        .map(str::trim)
        .with_context(|| format!("horizons CSV line {line}: missing column {i}"))
}

/// Empty fields are survey nulls.
fn optional_field(
    record: &csv::StringRecord,
    i: usize,
    line: usize,
) -> anyhow::Result<Option<f64>> {
    let raw = get_field(record, i, line)?;
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .with_context(|| format!("horizons CSV line {line}: bad number {raw:?}"))
}

fn required_field(record: &csv::StringRecord, i: usize, line: usize) -> anyhow::Result<f64> {
    get_field(record, i, line)?
        .parse()
        .with_context(|| format!("horizons CSV line {line}: bad depth"))
}
