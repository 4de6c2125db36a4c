use crate::application::runner::{ScenarioOutcome, SuiteReport};
use std::fmt;
use tracing::{error, info};

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed() { "PASS" } else { "FAIL" };
        write!(
            f,
            "{} {} ({}ms)",
            verdict,
            self.scenario,
            self.elapsed.as_millis()
        )?;
        if let Some(err) = &self.error {
            write!(f, ": {}", err)?;
        }
        Ok(())
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        write!(
            f,
            "{} scenarios: {} passed, {} failed",
            self.outcomes.len(),
            self.passed(),
            self.failed()
        )
    }
}

pub fn log_report(report: &SuiteReport) {
    for outcome in &report.outcomes {
        match &outcome.error {
            None => info!(
                scenario = %outcome.scenario,
                duration_ms = outcome.elapsed.as_millis(),
                "PASS"
            ),
            Some(e) => error!(
                scenario = %outcome.scenario,
                duration_ms = outcome.elapsed.as_millis(),
                error = %e,
                "FAIL"
            ),
        }
    }
    info!(
        total = report.outcomes.len(),
        passed = report.passed(),
        failed = report.failed(),
        "Suite summary"
    );
}
