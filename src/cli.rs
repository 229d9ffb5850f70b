use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::map::Tiles;
use crate::report::Report;

#[derive(Parser, Debug)]
#[command(name = "wine-report")]
#[command(version, about = "Reports and charts over a SQLite wine review database")]
pub struct Cli {
    /// Log debug output to stderr (overridden by WINE_REPORT_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive terminal dashboard with every report
    Dashboard {
        /// SQLite wine database path
        db: PathBuf,
    },

    /// Print a single report
    Report {
        /// Report to run
        #[arg(value_enum)]
        report: Report,

        /// SQLite wine database path
        db: PathBuf,

        /// Only print the first N rows
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Print JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Render the average price per country as an HTML map
    Map {
        /// SQLite wine database path
        db: PathBuf,

        /// Output HTML file
        #[arg(short, long, default_value = "wine_map.html")]
        output: PathBuf,

        /// Only map the N most expensive countries
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Background tile layer
        #[arg(long, value_enum, default_value = "positron")]
        tiles: Tiles,
    },

    /// List all available reports
    ListReports,

    /// Print the SQL schema the database must provide
    Schema,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
