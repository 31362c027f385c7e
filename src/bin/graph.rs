// Aggregator/renderer: read every snapshot in the log directory, derive the
// cumulative and per-period series for one port (or the non-trunk
// aggregate), and write the two interactive HTML charts. Re-running
// overwrites prior charts idempotently.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use f660a_monitor::series::Selector;
use f660a_monitor::{chart, log_repo, series};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[derive(Parser, Debug)]
#[command(about = "Render bandwidth charts from collected snapshot CSVs")]
struct Args {
    /// Directory of YYYYMMDD_HHMMSS.csv snapshot files.
    #[arg(long, default_value = "log")]
    logdir: PathBuf,
    /// Directory the HTML charts are written to.
    #[arg(long, default_value = "graph")]
    outdir: PathBuf,
    /// Reporting period in seconds for the rate chart.
    #[arg(long, default_value_t = 3600)]
    period: u64,
    /// Port to graph (e.g. LAN1). Omitted: sum of all non-trunk ports.
    #[arg(long)]
    interface: Option<String>,
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.period > 0, "--period must be > 0");
    let selector = match args.interface {
        Some(name) => Selector::Port(name),
        None => Selector::Aggregate,
    };

    let samples = log_repo::read_logs(&args.logdir)?;
    anyhow::ensure!(
        !samples.is_empty(),
        "no snapshot files found in {:?}",
        args.logdir
    );

    let cumulative = series::select(&samples, &selector);
    anyhow::ensure!(
        !cumulative.is_empty(),
        "no samples for {:?} in {:?}",
        selector.label(),
        args.logdir
    );
    let rates = series::rate_series(&cumulative, args.period);

    let acc = chart::render_cumulative(&cumulative, selector.label(), &args.outdir)?;
    let diff = chart::render_rate(
        &rates,
        selector.label(),
        &series::period_label(args.period),
        &args.outdir,
    )?;
    tracing::info!(
        selector = selector.label(),
        samples = cumulative.len(),
        acc = %acc.display(),
        diff = %diff.display(),
        "charts written"
    );
    Ok(())
}
