//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// View to render for a query result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// Paginated record table
    #[default]
    Detail,
    /// Waste-type aggregation table
    Summary,
}

#[derive(Parser)]
#[command(name = "weighbridge-console")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Query, import and export weighbridge records from the console")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend endpoint URL (overrides the configured one)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard overview (totals, plants, waste types, daily trend)
    Dashboard {
        /// Start date (YYYY-MM-DD). Defaults to the 1st of last month.
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Defaults to the last day of this month.
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },

    /// Query weighbridge records
    Query {
        /// Start date (YYYY-MM-DD). Defaults to the 1st of this month.
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Defaults to the last day of this month.
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Plant code filter (repeatable). All plants if omitted.
        #[arg(long = "plant")]
        plants: Vec<String>,

        /// Waste-type filter ("全部" or omitted means all)
        #[arg(long)]
        waste_type: Option<String>,

        /// District source filter (mutually exclusive with --vendor)
        #[arg(long, conflicts_with = "vendor")]
        district: Option<String>,

        /// Vendor source filter
        #[arg(long)]
        vendor: Option<String>,

        /// Maximum records fetched. Uses config value if not specified.
        #[arg(long)]
        limit: Option<u32>,

        /// Page to display in the detail view
        #[arg(long, short = 'p', default_value = "1")]
        page: usize,

        /// View to render
        #[arg(long, value_enum, default_value_t = ViewArg::Detail)]
        view: ViewArg,
    },

    /// Upload a tabular file of records for one plant and month
    Import {
        /// Path to the upload file (header row plus data rows)
        file: PathBuf,

        /// Plant code the rows belong to
        #[arg(long)]
        plant: String,

        /// Target month (YYYY-MM)
        #[arg(long)]
        year_month: String,
    },

    /// Query and write the result set to an .xlsx workbook
    Export {
        /// Start date (YYYY-MM-DD). Defaults to the 1st of this month.
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Defaults to the last day of this month.
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Plant code filter (repeatable). All plants if omitted.
        #[arg(long = "plant")]
        plants: Vec<String>,

        /// Waste-type filter ("全部" or omitted means all)
        #[arg(long)]
        waste_type: Option<String>,

        /// District source filter (mutually exclusive with --vendor)
        #[arg(long, conflicts_with = "vendor")]
        district: Option<String>,

        /// Vendor source filter
        #[arg(long)]
        vendor: Option<String>,

        /// Maximum records fetched. Uses config value if not specified.
        #[arg(long)]
        limit: Option<u32>,

        /// Output file path. Defaults to 地磅查詢結果_<today>.xlsx
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List districts, vendors and waste types known to the backend
    Sources,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Fetch and print the backend's remote configuration
        #[arg(long)]
        show_remote: bool,

        /// Set the backend endpoint URL
        #[arg(long)]
        set_api_url: Option<String>,

        /// Set records per page
        #[arg(long)]
        set_page_size: Option<usize>,

        /// Set the query fetch limit
        #[arg(long)]
        set_limit: Option<u32>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
