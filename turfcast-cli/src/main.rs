//! turfcast - turfgrass weather product toolkit.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "turfcast",
    version,
    about = "Turfgrass weather product toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: turfcast_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    turfcast_cmd::run(cli.command)
}
