use reqres_api_tests::application::runner::SuiteRunner;
use reqres_api_tests::infrastructure::config::SuiteConfig;
use reqres_api_tests::infrastructure::logging::init_logging;
use reqres_api_tests::presentation::report::log_report;
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("Loading suite configuration");
    let config = SuiteConfig::from_env()?;

    info!(base_url = %config.base_url, "Creating suite runner");
    let runner = SuiteRunner::new(config)?;

    let report = runner.run_all().await;
    log_report(&report);

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} scenarios failed",
            report.failed(),
            report.outcomes.len()
        );
    }
    Ok(())
}
