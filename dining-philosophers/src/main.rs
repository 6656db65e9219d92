//! Dining Philosophers
//!
//! Five philosophers, five chopsticks, and a host who lets at most two
//! non-neighbors eat at once. Runs until everyone has eaten three times.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;

use dining_philosophers::{Table, structured_logging};

#[derive(Parser)]
#[command(name = "dining-philosophers")]
#[command(about = "Dining philosophers arbitrated by a host")]
struct Args {
    /// Write the trace to the development log file instead of stdout
    #[arg(long)]
    dev_log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let flush_guard = structured_logging::init_tracing(args.dev_log)
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    let report = Table::new().serve().await.context("dinner was interrupted")?;

    for philosopher in &report.philosophers {
        info!(
            "Philosopher {} ate {} meals, rejected {} times",
            philosopher.philosopher, philosopher.meals_eaten, philosopher.rejections
        );
    }
    info!(
        "Host admitted {} and rejected {} requests, at most {} eating at once",
        report.host.admitted, report.host.rejected, report.host.peak_eaters
    );

    println!("All philosophers have finished eating, good bye");

    std::mem::drop(flush_guard);
    Ok(())
}
