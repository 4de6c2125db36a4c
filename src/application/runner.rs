use crate::application::scenarios::{Scenario, ScenarioContext};
use crate::domain::error::{SuiteError, SuiteResult};
use crate::infrastructure::config::SuiteConfig;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub elapsed: Duration,
    pub error: Option<SuiteError>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, scenario: Scenario) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.scenario == scenario)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

/// Runs scenarios one after another; a failing scenario never stops the run.
pub struct SuiteRunner {
    context: ScenarioContext,
}

impl SuiteRunner {
    pub fn new(config: SuiteConfig) -> SuiteResult<Self> {
        Ok(Self {
            context: ScenarioContext::new(config)?,
        })
    }

    pub fn context(&self) -> &ScenarioContext {
        &self.context
    }

    pub async fn run_all(&self) -> SuiteReport {
        self.run(&Scenario::ALL).await
    }

    #[instrument(skip(self, scenarios), fields(count = scenarios.len()))]
    pub async fn run(&self, scenarios: &[Scenario]) -> SuiteReport {
        let mut report = SuiteReport::default();
        for &scenario in scenarios {
            report.outcomes.push(self.run_one(scenario).await);
        }
        info!(
            passed = report.passed(),
            failed = report.failed(),
            "Suite finished"
        );
        report
    }

    pub async fn run_one(&self, scenario: Scenario) -> ScenarioOutcome {
        info!(scenario = %scenario, "Running scenario");
        let start = Instant::now();
        let result = self.context.run(scenario).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => info!(scenario = %scenario, duration_ms = elapsed.as_millis(), "Scenario passed"),
            Err(e) => error!(scenario = %scenario, duration_ms = elapsed.as_millis(), error = %e, "Scenario failed"),
        }

        ScenarioOutcome {
            scenario,
            elapsed,
            error: result.err(),
        }
    }
}
