//! Subcommand bodies: read fixtures, run the core, write JSON.

use crate::fixtures;
use anyhow::Context;
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use turfcast_models::products::{compute_products, ProductInputs};
use turfcast_models::risk::assess_all;
use turfcast_models::texture::{classify, TextureClass};
use turfcast_models::water_balance::{simulate, DayForcing, WaterBalanceParams};
use turfcast_weather::align::align;
use turfcast_weather::daily::{aggregate_days, DEFAULT_HUMID_RH};
use turfcast_weather::hourly::RawHour;

/// Compute and emit every product for one location.
pub fn run_products(
    hourly_csv: &str,
    grid_csv: &str,
    et_csv: &str,
    horizons_csv: &str,
    latitude: f64,
    irrigation: Option<&str>,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let rows = fixtures::read_hourly_rows(hourly_csv)?;
    let hours = RawHour::from_rows(&rows)?;
    let days = aggregate_days(&hours, DEFAULT_HUMID_RH)?;
    let grid = fixtures::read_grid(grid_csv)?;
    let et = fixtures::read_series(et_csv)?;
    let horizons = fixtures::read_horizons(horizons_csv)?;
    let irrigation_dates = parse_dates(irrigation)?;

    info!(
        "computing products: {} daily records, {} grid days, {} ET days",
        days.len(),
        grid.len(),
        et.len()
    );

    let products = compute_products(&ProductInputs {
        days: &days,
        grid: &grid,
        et: &et,
        horizons: &horizons,
        latitude_deg: latitude,
        irrigation_dates: &irrigation_dates,
        optimal_start: None,
    })?;

    write_json(&products, output)
}

/// Compute and emit only the risk indices.
pub fn run_risk(hourly_csv: &str, output: Option<&str>) -> anyhow::Result<()> {
    let rows = fixtures::read_hourly_rows(hourly_csv)?;
    let hours = RawHour::from_rows(&rows)?;
    let days = aggregate_days(&hours, DEFAULT_HUMID_RH)?;
    info!("assessing risk over {} daily records", days.len());
    let assessments = assess_all(&days)?;
    write_json(&assessments, output)
}

/// Run the water balance for an explicit texture class.
pub fn run_water_balance(
    grid_csv: &str,
    et_csv: &str,
    texture: &str,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let grid = fixtures::read_grid(grid_csv)?;
    let et = fixtures::read_series(et_csv)?;
    let class = parse_texture(texture)?;

    let precipitation = grid.precipitation()?;
    let aligned = align(&et, &precipitation)?;
    let forcing: Vec<DayForcing> = aligned
        .left
        .iter()
        .zip(aligned.right.iter())
        .map(|(et, precip)| DayForcing {
            date: precip.date,
            precip_in: precip.value,
            pet_in: et.value,
            irrigation_in: 0.0,
        })
        .collect();

    info!("simulating {} days on {class} texture", forcing.len());
    let params = WaterBalanceParams::for_texture(class);
    let snapshots = simulate(&params, &forcing, None);
    write_json(&snapshots, output)
}

/// Classify soil texture and print the class.
pub fn run_texture(horizons_csv: &str) -> anyhow::Result<()> {
    let horizons = fixtures::read_horizons(horizons_csv)?;
    let summary = classify(&horizons)?;
    println!("{}", summary.class);
    for component in &summary.components {
        info!("component {}: {:.1}%", component.name, component.area_pct);
    }
    Ok(())
}

fn parse_dates(list: Option<&str>) -> anyhow::Result<Vec<NaiveDate>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(|s| {
            s.trim()
                .parse()
                .with_context(|| format!("bad irrigation date {s:?}"))
        })
        .collect()
}

fn parse_texture(raw: &str) -> anyhow::Result<TextureClass> {
    match raw.to_ascii_lowercase().as_str() {
        "low" => Ok(TextureClass::Low),
        "medium" => Ok(TextureClass::Medium),
        "high" => Ok(TextureClass::High),
        other => anyhow::bail!("unknown texture class {other:?} (expected low, medium, or high)"),
    }
}

fn write_json<T: Serialize>(value: &T, output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating output file {path}"))?;
            serde_json::to_writer_pretty(file, value)?;
            info!("wrote {path}");
        }
        None => {
            serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
            println!();
        }
    }
    Ok(())
}
