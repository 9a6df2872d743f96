//! Command implementations for the GRSM CLI.
//!
//! Every command reads the same files the web app serves, from a local
//! directory or an HTTP(S) base URL given by `--data-dir`.

use clap::Subcommand;
use grsm_data::biodiversity::TaxaGroup;

pub mod render;
pub mod source;
pub mod summary;
pub mod trend;

pub use render::Panel;

#[derive(Subcommand)]
pub enum Command {
    /// Print species totals, yearly totals and the ANC trend
    Summary {
        /// Directory or URL holding the dataset files
        #[arg(short = 'd', long, default_value = "data")]
        data_dir: String,

        /// Biodiversity taxa group
        #[arg(short = 't', long, default_value = "all")]
        taxa: TaxaGroup,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },

    /// Print park-wide ANC yearly means as CSV, optionally for a year range
    AncTrend {
        /// Directory or URL holding the dataset files
        #[arg(short = 'd', long, default_value = "data")]
        data_dir: String,

        /// First year of the range (inclusive)
        #[arg(long, requires = "end")]
        start: Option<i32>,

        /// Last year of the range (inclusive)
        #[arg(long, requires = "start")]
        end: Option<i32>,
    },

    /// Write one panel as a standalone SVG file
    Render {
        /// Directory or URL holding the dataset files
        #[arg(short = 'd', long, default_value = "data")]
        data_dir: String,

        /// Panel to draw
        #[arg(short = 'p', long, value_enum)]
        panel: Panel,

        /// Output SVG path
        #[arg(short = 'o', long)]
        out: String,

        /// Biodiversity taxa group (timeline and stacked panels)
        #[arg(short = 't', long, default_value = "all")]
        taxa: TaxaGroup,

        /// Outer width in pixels
        #[arg(long, default_value_t = 1200.0)]
        width: f64,

        /// Outer height in pixels
        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary {
            data_dir,
            taxa,
            json,
        } => summary::run_summary(&data_dir, taxa, json).await,
        Command::AncTrend {
            data_dir,
            start,
            end,
        } => {
            let range = start.zip(end);
            trend::run_anc_trend(&data_dir, range).await
        }
        Command::Render {
            data_dir,
            panel,
            out,
            taxa,
            width,
            height,
        } => render::run_render(&data_dir, panel, &out, taxa, width, height).await,
    }
}
