use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands::*, TraceLevel};
use colored::Colorize;
use dotenv::dotenv;
use scanner_core::prelude::*;
use tracing::{debug, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;

fn preprocess(trace_level: Level) -> Result<()> {
    dotenv().ok();
    // stdout is kept for command output (e.g., `pe --json`)
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::DEBUG => Level::DEBUG,
        TraceLevel::INFO => Level::INFO,
        TraceLevel::WARN => Level::WARN,
        TraceLevel::ERROR => Level::ERROR,
    };

    preprocess(log_level)?;
    trace!("Command line input recorded: {cli:#?}");

    ////////////////////////////////////////////////////////////////////////////////////////////////////

    // cli framework:
    // "> scanner <COMMAND>"
    match &cli.command {
        // "> scanner [ARGS ...]"
        // echo whatever was passed
        None => println!("{}", echo(&cli.args)),

        // ---------------------------------------------------------------------------
        // "> scanner indicators AAPL"
        // print the fundamental indicators of one ticker
        Some(Indicators { ticker }) => {
            let ticker = ticker.to_uppercase();
            let yahoo = YahooFinance::new(Config::from_env())?;

            debug!("Fetching fundamentals for [{ticker}]");
            let record = yahoo.fundamentals(&ticker).await?;
            println!("{}", indicator_table(&ticker, &record));
        }

        // ---------------------------------------------------------------------------
        // "> scanner pe AAPL --period 1y"
        // reconstruct the historical P/E and chart it
        Some(Pe {
            ticker,
            period,
            json,
            width,
            height,
        }) => {
            let ticker = ticker.to_uppercase();
            let yahoo = YahooFinance::new(Config::from_env())?;

            if !json {
                println!("Fetching historical P/E for {ticker} over {period}...");
            }
            let reconstruction = historical_pe(&yahoo, &ticker, *period).await?;

            if *json {
                let series = reconstruction.into_series();
                println!("{}", serde_json::to_string_pretty(&series)?);
                return Ok(());
            }

            if let Reconstruction::Undefined { reason, .. } = &reconstruction {
                println!("P/E is undefined for {ticker}: {reason}");
            }
            let chart = reconstruction.series().and_then(|series| {
                Chart::new(series, &ticker, *period)
                    .with_size(*width, *height)
                    .render()
            });
            match chart {
                Some(chart) => println!("{chart}"),
                None => println!("Could not fetch P/E data for the chart."),
            }
        }
    }

    Ok(())
}

fn echo(args: &[String]) -> String {
    if args.is_empty() {
        "Activate without arguments".to_string()
    } else {
        format!("Arguments of main() function: {args:?}")
    }
}

fn indicator_table(ticker: &str, record: &FundamentalsRecord) -> String {
    let mut lines = vec![format!("Fundamentals for {ticker}").bold().to_string()];
    for indicator in Indicator::ALL {
        let value = match indicator.value(record) {
            Some(_) => indicator.display(record).normal(),
            None => indicator.display(record).dimmed(),
        };
        lines.push(format!("  {:<18} {value}", indicator.label()));
    }
    lines.join("\n")
}
