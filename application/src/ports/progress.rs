//! Progress notification port
//!
//! Defines the interface for reporting progress during deliberation.

use jury_domain::{CaseId, Decision, Round, Verdict};

/// Callback for progress updates during deliberation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a round starts for a case
    fn on_round_start(&self, case_id: CaseId, round: Round, total_roles: usize);

    /// Called when a role finishes within a round (`None` = the call failed)
    fn on_role_complete(&self, case_id: CaseId, round: Round, role_name: &str, verdict: Option<Verdict>);

    /// Called when a round completes for a case
    fn on_round_complete(&self, case_id: CaseId, round: Round);

    /// Called when a case reaches its decision
    fn on_case_decided(&self, _case_id: CaseId, _decision: Decision) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_round_start(&self, _case_id: CaseId, _round: Round, _total_roles: usize) {}
    fn on_role_complete(&self, _case_id: CaseId, _round: Round, _role_name: &str, _verdict: Option<Verdict>) {}
    fn on_round_complete(&self, _case_id: CaseId, _round: Round) {}
}
