//! CropDash CLI - command line tool for field catalog aggregation and
//! saved-snapshot management.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cropdash-cli",
    version,
    about = "CropDash field data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cropdash_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cropdash_cmd::run(cli.command)
}
