//! Run Deliberation use case
//!
//! Orchestrates the two-round deliberation for a single case:
//! independent judgments, confrontation, re-judgment, then the decision.

use crate::config::DeliberationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::judge_claim::JudgmentEngine;
use crate::use_cases::shared::{check_cancelled, evaluate_with_retry};
use jury_domain::{AgentRoster, Case, DeliberationResult, Judgment, PromptTemplate, Round};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that abort the deliberation of a case
#[derive(Error, Debug)]
pub enum DeliberationError {
    #[error("{round} call for role '{role}' failed: {source}")]
    Service {
        role: String,
        round: Round,
        #[source]
        source: GatewayError,
    },

    #[error("Role task failed: {0}")]
    TaskFailed(String),

    #[error("Deliberation cancelled")]
    Cancelled,
}

impl DeliberationError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DeliberationError::Cancelled)
    }
}

/// Use case for deliberating one case with the configured roster
pub struct RunDeliberationUseCase<G: LlmGateway + 'static> {
    engine: JudgmentEngine<G>,
    roster: Arc<AgentRoster>,
    params: DeliberationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> RunDeliberationUseCase<G> {
    pub fn new(gateway: Arc<G>, roster: AgentRoster, params: DeliberationParams) -> Self {
        Self {
            engine: JudgmentEngine::from_params(gateway, &params),
            roster: Arc::new(roster),
            params,
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    /// Set a structured logger receiving every judgment and decision
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    pub fn params(&self) -> &DeliberationParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, case: &Case) -> Result<DeliberationResult, DeliberationError> {
        self.execute_with_progress(case, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Any service failure aborts the case; no partial result is returned.
    pub async fn execute_with_progress(
        &self,
        case: &Case,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationResult, DeliberationError> {
        let result = self.deliberate(case, progress).await;

        if let Err(e) = &result {
            self.conversation_logger.log(ConversationEvent::new(
                "case_failed",
                json!({
                    "case_id": case.id(),
                    "error": e.to_string(),
                }),
            ));
        }

        result
    }

    async fn deliberate(
        &self,
        case: &Case,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationResult, DeliberationError> {
        check_cancelled(&self.cancellation_token)?;

        info!(
            case = %case.id(),
            "Starting deliberation with {} roles",
            self.roster.len()
        );

        let round1 = self
            .run_round(case, Round::Initial, vec![None; self.roster.len()], progress)
            .await?;

        let contexts = self.confrontation_contexts(&round1);

        let round2 = self
            .run_round(case, Round::Confrontation, contexts, progress)
            .await?;

        let result = DeliberationResult::new(case, round1, round2, &self.params.aggregator);

        info!(
            case = %case.id(),
            "Decided {} from {:?}",
            result.final_decision,
            result.round2_votes()
        );
        progress.on_case_decided(case.id(), result.final_decision);
        self.conversation_logger.log(ConversationEvent::new(
            "decision",
            json!({
                "case_id": case.id(),
                "round1_votes": result.round1_votes(),
                "round2_votes": result.round2_votes(),
                "final_decision": result.final_decision,
            }),
        ));

        Ok(result)
    }

    /// Confrontation context for each role, in roster order
    fn confrontation_contexts(&self, round1: &[Judgment]) -> Vec<Option<String>> {
        if self.params.exclude_self {
            round1
                .iter()
                .map(|own| {
                    Some(PromptTemplate::confrontation_transcript(
                        round1
                            .iter()
                            .filter(|other| other.role_name() != own.role_name())
                            .map(|other| (other.role_name(), other.raw_text())),
                    ))
                })
                .collect()
        } else {
            let shared = PromptTemplate::confrontation_transcript(
                round1.iter().map(|j| (j.role_name(), j.raw_text())),
            );
            vec![Some(shared); round1.len()]
        }
    }

    /// Run one round; judgments are returned in roster order
    async fn run_round(
        &self,
        case: &Case,
        round: Round,
        contexts: Vec<Option<String>>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Judgment>, DeliberationError> {
        info!(case = %case.id(), "{}: evaluating {} roles", round, self.roster.len());
        progress.on_round_start(case.id(), round, self.roster.len());

        let judgments = if self.params.fan_out {
            self.round_concurrent(case, round, contexts, progress).await?
        } else {
            self.round_sequential(case, round, contexts, progress).await?
        };

        progress.on_round_complete(case.id(), round);
        Ok(judgments)
    }

    /// One role call at a time, in roster order
    async fn round_sequential(
        &self,
        case: &Case,
        round: Round,
        contexts: Vec<Option<String>>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Judgment>, DeliberationError> {
        let mut judgments = Vec::with_capacity(self.roster.len());

        for (role, context) in self.roster.iter().zip(contexts) {
            let raw = match evaluate_with_retry(
                &self.engine,
                &self.params.retry,
                &self.cancellation_token,
                role,
                case,
                round,
                context.as_deref(),
            )
            .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    progress.on_role_complete(case.id(), round, &role.name, None);
                    return Err(e);
                }
            };

            let judgment = Judgment::from_response(&role.name, round, raw);
            self.record(case, &judgment, progress);
            judgments.push(judgment);
        }

        Ok(judgments)
    }

    /// All role calls at once; the first failure aborts the rest
    async fn round_concurrent(
        &self,
        case: &Case,
        round: Round,
        contexts: Vec<Option<String>>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Judgment>, DeliberationError> {
        let mut join_set = JoinSet::new();

        for (index, (role, context)) in self.roster.iter().zip(contexts).enumerate() {
            let engine = self.engine.clone();
            let retry = self.params.retry.clone();
            let token = self.cancellation_token.clone();
            let role = role.clone();
            let case = case.clone();

            join_set.spawn(async move {
                let result = evaluate_with_retry(
                    &engine,
                    &retry,
                    &token,
                    &role,
                    &case,
                    round,
                    context.as_deref(),
                )
                .await;
                (index, role.name, result)
            });
        }

        let mut slots: Vec<Option<Judgment>> = vec![None; self.roster.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, role_name, Ok(raw))) => {
                    let judgment = Judgment::from_response(role_name, round, raw);
                    self.record(case, &judgment, progress);
                    slots[index] = Some(judgment);
                }
                Ok((_, role_name, Err(e))) => {
                    warn!(case = %case.id(), role = %role_name, "Aborting round: {}", e);
                    progress.on_role_complete(case.id(), round, &role_name, None);
                    join_set.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    join_set.abort_all();
                    return Err(DeliberationError::TaskFailed(e.to_string()));
                }
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// Report and log a completed judgment
    fn record(&self, case: &Case, judgment: &Judgment, progress: &dyn ProgressNotifier) {
        for anomaly in judgment.anomalies() {
            warn!(
                case = %case.id(),
                role = %judgment.role_name(),
                round = %judgment.round(),
                "Parse anomaly: {}",
                anomaly
            );
        }

        debug!(
            case = %case.id(),
            role = %judgment.role_name(),
            round = %judgment.round(),
            "Verdict: {}",
            judgment.verdict()
        );

        progress.on_role_complete(
            case.id(),
            judgment.round(),
            judgment.role_name(),
            Some(judgment.verdict()),
        );

        self.conversation_logger.log(ConversationEvent::new(
            "judgment",
            json!({
                "case_id": case.id(),
                "round": judgment.round(),
                "role": judgment.role_name(),
                "verdict": judgment.verdict(),
                "confidence": judgment.confidence(),
                "key_arguments": judgment.key_arguments(),
                "anomalies": judgment.anomalies(),
                "raw_text": judgment.raw_text(),
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::use_cases::testing::ScriptedGateway;
    use jury_domain::{AgentRole, CaseId, Decision, Verdict};
    use std::sync::Mutex;
    use std::time::Duration;

    fn roster() -> AgentRoster {
        AgentRoster::try_new(vec![
            AgentRole::new("Pedantic", "a"),
            AgentRole::new("Guardian", "b"),
            AgentRole::new("Judge", "c"),
        ])
        .unwrap()
    }

    fn params() -> DeliberationParams {
        DeliberationParams::default()
            .with_request_timeout(None)
            .with_retry(
                RetryPolicy::default()
                    .with_initial_backoff(Duration::from_millis(1))
                    .with_max_backoff(Duration::from_millis(2)),
            )
    }

    fn case() -> Case {
        Case::try_new(
            7,
            "The vaccine reduced hospitalizations by 40% among adults over 65 in 2021.",
            "The vaccine cut hospitalizations by 40%.",
        )
        .unwrap()
    }

    fn answer(verdict: &str) -> String {
        format!(
            "Verdict: {}\nConfidence: High\nKey Arguments:\n- argument for {}",
            verdict, verdict
        )
    }

    /// Round 1: [Mutated, Unclear, Mutated]; round 2: [Mutated, Mutated, Unclear]
    fn scripted() -> ScriptedGateway {
        ScriptedGateway::new()
            .reply("a", Round::Initial, &answer("Mutated"))
            .reply("b", Round::Initial, &answer("Unclear"))
            .reply("c", Round::Initial, &answer("Mutated"))
            .reply("a", Round::Confrontation, &answer("Mutated"))
            .reply("b", Round::Confrontation, &answer("Mutated"))
            .reply("c", Round::Confrontation, &answer("Unclear"))
    }

    fn confrontation_prompts(gateway: &ScriptedGateway) -> Vec<(String, String)> {
        gateway
            .calls()
            .into_iter()
            .filter(|c| c.round == Round::Confrontation)
            .map(|c| (c.system_prompt, c.user_prompt))
            .collect()
    }

    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    #[tokio::test]
    async fn test_end_to_end_mutated() {
        let gateway = Arc::new(scripted());
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), roster(), params());

        let result = use_case.execute(&case()).await.unwrap();

        assert_eq!(result.case_id, CaseId(7));
        assert_eq!(
            result.round1_votes(),
            vec![Verdict::Mutated, Verdict::Unclear, Verdict::Mutated]
        );
        assert_eq!(
            result.round2_votes(),
            vec![Verdict::Mutated, Verdict::Mutated, Verdict::Unclear]
        );
        assert_eq!(result.final_decision, Decision::Mutated);
        assert_eq!(gateway.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_rounds_run_in_roster_order() {
        let gateway = Arc::new(scripted());
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), roster(), params());

        use_case.execute(&case()).await.unwrap();

        let order: Vec<(String, Round)> = gateway
            .calls()
            .into_iter()
            .map(|c| (c.system_prompt, c.round))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a".to_string(), Round::Initial),
                ("b".to_string(), Round::Initial),
                ("c".to_string(), Round::Initial),
                ("a".to_string(), Round::Confrontation),
                ("b".to_string(), Round::Confrontation),
                ("c".to_string(), Round::Confrontation),
            ]
        );
    }

    #[tokio::test]
    async fn test_transcript_has_one_section_per_role_in_order() {
        let gateway = Arc::new(scripted());
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), roster(), params());

        use_case.execute(&case()).await.unwrap();

        let prompts = confrontation_prompts(&gateway);
        assert_eq!(prompts.len(), 3);

        for (_, prompt) in &prompts {
            assert_eq!(prompt.matches("Other agents said:").count(), 1);
            for label in ["[Pedantic]", "[Guardian]", "[Judge]"] {
                assert_eq!(prompt.matches(label).count(), 1, "label {}", label);
            }
            let pedantic = prompt.find("[Pedantic]").unwrap();
            let guardian = prompt.find("[Guardian]").unwrap();
            let judge = prompt.find("[Judge]").unwrap();
            assert!(pedantic < guardian && guardian < judge);
            assert!(prompt.contains("[Guardian]\nVerdict: Unclear\nConfidence: High"));
        }

        // Self-inclusion: every role sees the same shared transcript
        assert_eq!(prompts[0].1, prompts[1].1);
        assert_eq!(prompts[1].1, prompts[2].1);
    }

    #[tokio::test]
    async fn test_exclude_self_omits_own_section() {
        let gateway = Arc::new(scripted());
        let use_case = RunDeliberationUseCase::new(
            Arc::clone(&gateway),
            roster(),
            params().with_exclude_self(true),
        );

        use_case.execute(&case()).await.unwrap();

        let prompts = confrontation_prompts(&gateway);
        let own_labels = [("a", "[Pedantic]"), ("b", "[Guardian]"), ("c", "[Judge]")];
        for (system, prompt) in &prompts {
            for (role_system, label) in own_labels {
                let expected = usize::from(*system != role_system);
                assert_eq!(prompt.matches(label).count(), expected);
            }
        }
    }

    #[tokio::test]
    async fn test_deterministic_under_stub() {
        let first = RunDeliberationUseCase::new(Arc::new(scripted()), roster(), params())
            .execute(&case())
            .await
            .unwrap();
        let second = RunDeliberationUseCase::new(Arc::new(scripted()), roster(), params())
            .execute(&case())
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fan_out_keeps_roster_order() {
        let gateway = scripted()
            .with_delay_for("a", Duration::from_millis(40))
            .with_delay_for("b", Duration::from_millis(20));
        let sequential = RunDeliberationUseCase::new(Arc::new(scripted()), roster(), params())
            .execute(&case())
            .await
            .unwrap();
        let concurrent =
            RunDeliberationUseCase::new(Arc::new(gateway), roster(), params().with_fan_out(true))
                .execute(&case())
                .await
                .unwrap();

        assert_eq!(concurrent, sequential);
        let names: Vec<&str> = concurrent.round1.iter().map(|j| j.role_name()).collect();
        assert_eq!(names, vec!["Pedantic", "Guardian", "Judge"]);
    }

    #[tokio::test]
    async fn test_service_error_aborts_case() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .reply("a", Round::Initial, &answer("Faithful"))
                .fail(
                    "b",
                    Round::Initial,
                    GatewayError::Unauthorized("invalid api key".into()),
                )
                .reply("c", Round::Initial, &answer("Faithful")),
        );
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), roster(), params());

        let err = use_case.execute(&case()).await.unwrap_err();

        match err {
            DeliberationError::Service {
                role,
                round,
                source,
            } => {
                assert_eq!(role, "Guardian");
                assert_eq!(round, Round::Initial);
                assert_eq!(source, GatewayError::Unauthorized("invalid api key".into()));
            }
            other => panic!("unexpected error: {other}"),
        }

        // Permanent: no retry, and the case stops before "c" and round 2
        assert_eq!(gateway.calls_for("b"), 1);
        assert_eq!(gateway.calls_for("c"), 0);
        assert!(confrontation_prompts(&gateway).is_empty());
    }

    #[tokio::test]
    async fn test_transient_error_is_retried() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .reply("a", Round::Initial, &answer("Faithful"))
                .fail("b", Round::Initial, GatewayError::RateLimited("429".into()))
                .reply("b", Round::Initial, &answer("Faithful"))
                .reply("c", Round::Initial, &answer("Faithful"))
                .reply("a", Round::Confrontation, &answer("Faithful"))
                .reply("b", Round::Confrontation, &answer("Faithful"))
                .reply("c", Round::Confrontation, &answer("Faithful")),
        );
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), roster(), params());

        let result = use_case.execute(&case()).await.unwrap();

        assert_eq!(result.final_decision, Decision::Faithful);
        assert_eq!(gateway.calls_for("b"), 3);
        assert_eq!(gateway.calls_for("a"), 2);
    }

    #[tokio::test]
    async fn test_transient_error_exhausts_retries() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .reply("a", Round::Initial, &answer("Faithful"))
                .fail("b", Round::Initial, GatewayError::Timeout),
        );
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), roster(), params());

        let err = use_case.execute(&case()).await.unwrap_err();

        assert!(matches!(
            err,
            DeliberationError::Service {
                source: GatewayError::Timeout,
                ..
            }
        ));
        // First attempt plus two retries
        assert_eq!(gateway.calls_for("b"), 3);
    }

    #[tokio::test]
    async fn test_permanent_http_status_not_retried() {
        let gateway = Arc::new(ScriptedGateway::new().fail(
            "a",
            Round::Initial,
            GatewayError::HttpStatus {
                status: 400,
                body: "bad request".into(),
            },
        ));
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), roster(), params());

        assert!(use_case.execute(&case()).await.is_err());
        assert_eq!(gateway.calls_for("a"), 1);
    }

    #[tokio::test]
    async fn test_fan_out_first_error_aborts_round() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fail("a", Round::Initial, GatewayError::Unauthorized("no".into()))
                .reply("b", Round::Initial, &answer("Faithful"))
                .reply("c", Round::Initial, &answer("Faithful"))
                .with_delay_for("b", Duration::from_millis(200))
                .with_delay_for("c", Duration::from_millis(200)),
        );
        let use_case = RunDeliberationUseCase::new(
            Arc::clone(&gateway),
            roster(),
            params().with_fan_out(true),
        );

        let err = use_case.execute(&case()).await.unwrap_err();

        assert!(matches!(err, DeliberationError::Service { ref role, .. } if role == "Pedantic"));
        assert!(confrontation_prompts(&gateway).is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let gateway = Arc::new(scripted());
        let token = CancellationToken::new();
        token.cancel();
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), roster(), params())
            .with_cancellation(token);

        let err = use_case.execute(&case()).await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_logs_judgments_and_decision() {
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        let use_case = RunDeliberationUseCase::new(Arc::new(scripted()), roster(), params())
            .with_conversation_logger(logger.clone());

        use_case.execute(&case()).await.unwrap();

        let events = logger.events.lock().unwrap();
        let judgments = events.iter().filter(|(t, _)| *t == "judgment").count();
        assert_eq!(judgments, 6);

        let (event_type, payload) = events.last().unwrap();
        assert_eq!(*event_type, "decision");
        assert_eq!(payload["case_id"], 7);
        assert_eq!(payload["final_decision"], "Mutated");
    }

    #[tokio::test]
    async fn test_parse_anomalies_are_absorbed() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .reply("a", Round::Initial, "I think it is mostly fine.")
                .reply("b", Round::Initial, &answer("Faithful"))
                .reply("c", Round::Initial, &answer("Faithful"))
                .reply("a", Round::Confrontation, "Verdict: Probably faithful")
                .reply("b", Round::Confrontation, &answer("Faithful"))
                .reply("c", Round::Confrontation, &answer("Faithful")),
        );
        let use_case = RunDeliberationUseCase::new(gateway, roster(), params());

        let result = use_case.execute(&case()).await.unwrap();

        assert_eq!(result.round1[0].verdict(), Verdict::Unclear);
        assert_eq!(result.round2[0].verdict(), Verdict::Unclear);
        assert!(!result.round1[0].anomalies().is_empty());
        assert_eq!(result.final_decision, Decision::Ambiguous);
    }
}
