//! GRSM CLI - summaries, ANC trends and SVG exports of the park datasets.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "grsm-cli",
    version,
    about = "Great Smoky Mountains data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: grsm_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    grsm_cmd::run(cli.command).await
}
