use std::path::PathBuf;

use clap::{Parser, Subcommand};
use simplelog::LevelFilter;

/// Render sortable tables and column charts as HTML
#[derive(Debug, Parser)]
#[command(name = "dashkit", version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LevelFilter>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sort strings, uppercase first on ties, and print one per line
    SortStrings {
        /// asc or desc; anything else sorts ascending
        #[arg(long, default_value = "asc")]
        order: String,

        items: Vec<String>,
    },

    /// Render a sortable table from JSON files
    Table {
        /// JSON array of column descriptors
        #[arg(long, value_name = "FILE")]
        columns: PathBuf,

        /// JSON array of row objects
        #[arg(long, value_name = "FILE")]
        rows: PathBuf,

        /// Column id to sort by
        #[arg(long)]
        sort: Option<String>,

        #[arg(long, default_value = "asc")]
        order: String,

        /// Row link prefix, overriding the config file
        #[arg(long)]
        row_link: Option<String>,
    },

    /// Fetch chart data once and render the column chart
    Chart {
        /// Data source, absolute or relative to the base URL
        #[arg(long)]
        url: String,

        #[arg(long, default_value = "")]
        label: String,

        /// Target of the "View all" link
        #[arg(long)]
        link: Option<String>,

        /// Range start (YYYY-MM-DD or RFC 3339). Defaults to 30 days before --to
        #[arg(long)]
        from: Option<String>,

        /// Range end (YYYY-MM-DD or RFC 3339). Defaults to now
        #[arg(long)]
        to: Option<String>,

        /// Base URL, overriding the config file
        #[arg(long)]
        base_url: Option<String>,

        /// Chart height, overriding the config file
        #[arg(long)]
        chart_height: Option<u32>,
    },
}
