//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the retrying, cancellable role call
//! used by both sequential and fanned-out rounds.

use crate::config::RetryPolicy;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::judge_claim::JudgmentEngine;
use crate::use_cases::run_deliberation::DeliberationError;
use jury_domain::{AgentRole, Case, Round};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Check if cancellation has been requested.
///
/// Returns `Err(DeliberationError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), DeliberationError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(DeliberationError::Cancelled);
    }
    Ok(())
}

/// Drive `future` to completion unless the token fires first.
async fn cancellable<F: Future>(
    token: &Option<CancellationToken>,
    future: F,
) -> Result<F::Output, DeliberationError> {
    match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(DeliberationError::Cancelled),
            output = future => Ok(output),
        },
        None => Ok(future.await),
    }
}

/// Evaluate one role, retrying transient failures with backoff.
///
/// Permanent failures, and transient ones once the policy is exhausted,
/// become `DeliberationError::Service`.
pub(crate) async fn evaluate_with_retry<G: LlmGateway + 'static>(
    engine: &JudgmentEngine<G>,
    retry: &RetryPolicy,
    cancellation_token: &Option<CancellationToken>,
    role: &AgentRole,
    case: &Case,
    round: Round,
    confrontation: Option<&str>,
) -> Result<String, DeliberationError> {
    let mut retries = 0;

    loop {
        check_cancelled(cancellation_token)?;

        let attempt =
            cancellable(cancellation_token, engine.evaluate(role, case, confrontation)).await?;

        match attempt {
            Ok(raw) => return Ok(raw),
            Err(e) if e.is_transient() && retry.allows_retry(retries) => {
                let delay = retry.backoff_for(retries);
                retries += 1;
                warn!(
                    case = %case.id(),
                    role = %role.name,
                    %round,
                    "Transient failure: {} (retry {}/{} in {:?})",
                    e,
                    retries,
                    retry.max_retries,
                    delay
                );
                cancellable(cancellation_token, tokio::time::sleep(delay)).await?;
            }
            Err(e) => {
                return Err(DeliberationError::Service {
                    role: role.name.clone(),
                    round,
                    source: e,
                });
            }
        }
    }
}
