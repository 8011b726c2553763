//! Run Docket use case
//!
//! Deliberates a list of cases independently, a bounded number at a time.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::run_deliberation::{DeliberationError, RunDeliberationUseCase};
use futures::stream::{self, StreamExt};
use jury_domain::{Case, CaseId, DeliberationResult};
use tracing::{info, warn};

/// Outcome of one case on the docket
#[derive(Debug)]
pub struct CaseOutcome {
    pub case_id: CaseId,
    pub result: Result<DeliberationResult, DeliberationError>,
}

impl CaseOutcome {
    pub fn is_decided(&self) -> bool {
        self.result.is_ok()
    }
}

/// Use case for running every case in a docket
pub struct RunDocketUseCase<G: LlmGateway + 'static> {
    deliberation: RunDeliberationUseCase<G>,
}

impl<G: LlmGateway + 'static> RunDocketUseCase<G> {
    pub fn new(deliberation: RunDeliberationUseCase<G>) -> Self {
        Self { deliberation }
    }

    pub async fn execute(&self, cases: &[Case]) -> Vec<CaseOutcome> {
        self.execute_with_progress(cases, &NoProgress).await
    }

    /// Outcomes are returned in input order; a failed case never stops the others
    pub async fn execute_with_progress(
        &self,
        cases: &[Case],
        progress: &dyn ProgressNotifier,
    ) -> Vec<CaseOutcome> {
        let limit = self.deliberation.params().max_concurrent_cases.max(1);
        info!("Deliberating {} cases ({} at a time)", cases.len(), limit);

        let outcomes: Vec<CaseOutcome> = stream::iter(cases)
            .map(|case| async move {
                let result = self.deliberation.execute_with_progress(case, progress).await;
                if let Err(e) = &result {
                    warn!(case = %case.id(), "Case failed: {}", e);
                }
                CaseOutcome {
                    case_id: case.id(),
                    result,
                }
            })
            .buffered(limit)
            .collect()
            .await;

        let decided = outcomes.iter().filter(|o| o.is_decided()).count();
        info!("Docket complete: {}/{} cases decided", decided, outcomes.len());

        outcomes
    }
}
