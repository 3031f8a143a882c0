use std::{
    fs::File,
    io::{self, Write},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use retail_client::{
    clock::{Clock, FixedClock, SystemClock},
    store::Store,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(version, about = "Opens client accounts and runs purchases from a CSV file")]
pub struct Args {
    /// Input CSV file with `kind,client,product,amount` orders
    #[clap(value_parser)]
    input: String,

    /// Stamp every receipt with this time (dd.MM.yyyy HH:mm) instead of now
    #[arg(long)]
    at: Option<String>,

    /// Write a `client,balance` CSV to stdout after all orders
    #[arg(long)]
    report: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let clock: Box<dyn Clock> = match &args.at {
        Some(at) => Box::new(
            FixedClock::parse(at).with_context(|| format!("invalid --at timestamp {at:?}"))?,
        ),
        None => Box::new(SystemClock),
    };
    let mut store = Store::new(clock);

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let start = Instant::now();
    let summary = store
        .process(input, &mut out)
        .with_context(|| format!("failed to process {}", args.input))?;
    let duration = start.elapsed();
    info!(
        "Processed {} orders ({} rejected) for {} clients in {:?}",
        summary.executed + summary.rejected,
        summary.rejected,
        store.len(),
        duration
    );

    if args.report {
        store
            .write_report(&mut out)
            .context("failed to write client report")?;
    }
    out.flush()?;

    Ok(())
}
