// Collector: log in to the router, scrape the port counter table, write one
// CSV snapshot to stdout. Meant to be run by a periodic scheduler that
// redirects stdout to log/YYYYMMDD_HHMMSS.csv; no retries here, the next
// scheduled run is the retry.

use anyhow::Result;
use f660a_monitor::router_repo::{RouterRepo, ScrapeError};
use f660a_monitor::{config, log_repo};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

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

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "collection failed");
        // Scrape-stage failures carry their stage's exit code (1-4) so the
        // scheduler's logs show where the run died.
        let code = e
            .downcast_ref::<ScrapeError>()
            .map(ScrapeError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let app_config = config::AppConfig::load()?;
    let repo = RouterRepo::connect(&app_config.router.hostip)?;
    let records =
        repo.fetch_port_counters(&app_config.router.username, &app_config.router.password)?;
    log_repo::write_csv(&records, std::io::stdout().lock())?;
    Ok(())
}
