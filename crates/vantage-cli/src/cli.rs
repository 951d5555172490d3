//! CLI argument definitions for vantage.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `intraday` | `TIME_SERIES_INTRADAY` at 1, 5, 15, 30, or 60 minute spacing |
//! | `series` | Daily, weekly, or monthly series (optionally adjusted) |
//! | `quote` | `GLOBAL_QUOTE` for one or more symbols |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--apikey` | `$VANTAGE_API_KEY` or `demo` | API key |
//! | `--datatype` | `csv` | Response encoding to request |
//! | `--output` | `<FUNCTION>.csv` | Destination file (single symbol only) |
//! | `--output-dir` | `.` | Directory for generated file names |
//! | `--stdout` | `false` | Print CSV to stdout instead of writing files |
//! | `--with-close` | `false` | Add the Close column to intraday JSON tables |
//! | `--timeout-ms` | `$VANTAGE_TIMEOUT_MS` or `10000` | Request timeout |
//!
//! # Examples
//!
//! ```bash
//! vantage intraday IBM --interval 5 --datatype json
//! vantage series MSFT --function weekly-adjusted
//! vantage quote IBM MSFT --datatype json --output-dir data
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vantage_core::{Datatype, Function};

/// Fetch Alpha Vantage stock reports and save them as CSV tables.
#[derive(Debug, Parser)]
#[command(
    name = "vantage",
    author,
    version,
    about = "Fetch Alpha Vantage stock reports as CSV tables",
    long_about = "Fetches intraday series, daily/weekly/monthly series, and global quotes \
from Alpha Vantage and writes each response as a header + rows CSV table.\n\
\n\
JSON responses are decoded and validated field by field; CSV responses are \
passed through as the API sent them."
)]
pub struct Cli {
    /// API key; overrides VANTAGE_API_KEY.
    #[arg(long, global = true)]
    pub apikey: Option<String>,

    /// Base query URL; overrides VANTAGE_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds; overrides VANTAGE_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Response encoding requested from the API.
    #[arg(long, global = true, value_enum, default_value_t = DatatypeArg::Csv)]
    pub datatype: DatatypeArg,

    /// Destination file. Only valid when fetching a single symbol.
    #[arg(long, short = 'o', global = true, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Directory for generated file names.
    #[arg(long, global = true, conflicts_with = "stdout")]
    pub output_dir: Option<PathBuf>,

    /// Print tables to stdout instead of writing files.
    #[arg(long, global = true, default_value_t = false)]
    pub stdout: bool,

    /// Include the "4. close" field as a Close column in intraday JSON tables.
    #[arg(long, global = true, default_value_t = false)]
    pub with_close: bool,

    /// Log request and decode details to stderr.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatatypeArg {
    Csv,
    Json,
}

impl From<DatatypeArg> for Datatype {
    fn from(value: DatatypeArg) -> Self {
        match value {
            DatatypeArg::Csv => Self::Csv,
            DatatypeArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Intraday time series.
    ///
    ///   vantage intraday IBM --interval 5
    ///   vantage intraday IBM MSFT --interval 60 --datatype json --with-close
    Intraday(IntradayArgs),

    /// Daily, weekly, or monthly time series.
    ///
    ///   vantage series IBM
    ///   vantage series IBM --function monthly-adjusted
    Series(SeriesArgs),

    /// Latest global quote.
    ///
    ///   vantage quote IBM --datatype json
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
pub struct IntradayArgs {
    /// One or more ticker symbols.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,

    /// Minutes between points: 1, 5, 15, 30, or 60.
    #[arg(long, default_value_t = 5)]
    pub interval: u32,
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// One or more ticker symbols.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,

    /// Which series to fetch.
    #[arg(long, value_enum, default_value_t = SeriesFunction::Daily)]
    pub function: SeriesFunction,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// One or more ticker symbols.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesFunction {
    Daily,
    DailyAdjusted,
    Weekly,
    WeeklyAdjusted,
    Monthly,
    MonthlyAdjusted,
}

impl From<SeriesFunction> for Function {
    fn from(value: SeriesFunction) -> Self {
        match value {
            SeriesFunction::Daily => Self::TimeSeriesDaily,
            SeriesFunction::DailyAdjusted => Self::TimeSeriesDailyAdjusted,
            SeriesFunction::Weekly => Self::TimeSeriesWeekly,
            SeriesFunction::WeeklyAdjusted => Self::TimeSeriesWeeklyAdjusted,
            SeriesFunction::Monthly => Self::TimeSeriesMonthly,
            SeriesFunction::MonthlyAdjusted => Self::TimeSeriesMonthlyAdjusted,
        }
    }
}
