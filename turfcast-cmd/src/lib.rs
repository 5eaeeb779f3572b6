//! Command implementations for the turfcast CLI.
//!
//! Each subcommand reads CSV fixtures, runs the computation core, and
//! writes the derived products as JSON (or a texture class to stdout).

use clap::Subcommand;

pub mod fixtures;
pub mod products;

#[derive(Subcommand)]
pub enum Command {
    /// Compute every product for one location
    Products {
        /// Hourly observation CSV (11/12 numeric fields per row, no header)
        #[arg(long)]
        hourly_csv: String,

        /// Grid CSV: date,gdd32,gdd50,precip,avg_temp (no header)
        #[arg(long)]
        grid_csv: String,

        /// Evapotranspiration CSV: date,inches (no header)
        #[arg(long)]
        et_csv: String,

        /// Soil horizon CSV: clay,sand,silt,top_cm,bottom_cm,area_pct,component
        #[arg(long)]
        horizons_csv: String,

        /// Site latitude in degrees (negative south)
        #[arg(long)]
        latitude: f64,

        /// Comma-separated irrigation dates (YYYY-MM-DD)
        #[arg(long)]
        irrigation: Option<String>,

        /// Output path for the products JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Compute only the five risk indices from hourly observations
    Risk {
        /// Hourly observation CSV (11/12 numeric fields per row, no header)
        #[arg(long)]
        hourly_csv: String,

        /// Output path for the risk JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the water-balance simulation for a fixed texture class
    WaterBalance {
        /// Grid CSV: date,gdd32,gdd50,precip,avg_temp (no header)
        #[arg(long)]
        grid_csv: String,

        /// Evapotranspiration CSV: date,inches (no header)
        #[arg(long)]
        et_csv: String,

        /// Texture class: low, medium, or high
        #[arg(long, default_value = "medium")]
        texture: String,

        /// Output path for the daily deficit JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Classify soil texture from survey horizons
    Texture {
        /// Soil horizon CSV: clay,sand,silt,top_cm,bottom_cm,area_pct,component
        #[arg(long)]
        horizons_csv: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Products {
            hourly_csv,
            grid_csv,
            et_csv,
            horizons_csv,
            latitude,
            irrigation,
            output,
        } => products::run_products(
            &hourly_csv,
            &grid_csv,
            &et_csv,
            &horizons_csv,
            latitude,
            irrigation.as_deref(),
            output.as_deref(),
        ),
        Command::Risk { hourly_csv, output } => {
            products::run_risk(&hourly_csv, output.as_deref())
        }
        Command::WaterBalance {
            grid_csv,
            et_csv,
            texture,
            output,
        } => products::run_water_balance(&grid_csv, &et_csv, &texture, output.as_deref()),
        Command::Texture { horizons_csv } => products::run_texture(&horizons_csv),
    }
}
