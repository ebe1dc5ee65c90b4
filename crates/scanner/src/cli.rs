use clap::{Parser, Subcommand, ValueEnum};
use scanner_core::chart::Chart;
use scanner_core::schema::Period;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Free arguments; echoed back when no subcommand is given.
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,

    /// Sets the level of tracing
    #[arg(long, global = true, default_value = "info", ignore_case = true)]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the fundamental indicators of a ticker (P/E, P/B, EV/EBITDA, ROE, ...).
    Indicators { ticker: String },

    /// Reconstruct and chart the historical P/E of a ticker.
    Pe {
        ticker: String,

        /// Lookback window: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max.
        #[arg(long, short, default_value = "1y")]
        period: Period,

        /// Print the series as JSON instead of drawing it.
        #[arg(long)]
        json: bool,

        /// Width of the plot area, in characters (8 to 500).
        #[arg(long, default_value_t = Chart::DEFAULT_WIDTH)]
        width: usize,

        /// Height of the plot area, in rows (3 to 200).
        #[arg(long, default_value_t = Chart::DEFAULT_HEIGHT)]
        height: usize,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}
