//! Progress reporting for deliberation runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use jury_application::ports::progress::ProgressNotifier;
use jury_domain::{CaseId, Decision, Round, Verdict};
use std::collections::HashMap;
use std::sync::Mutex;

/// Reports progress with one bar per case in flight
///
/// Each bar spans both rounds, so its length is twice the roster size.
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<CaseId, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn case_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn round_name(round: Round) -> &'static str {
        match round {
            Round::Initial => "Round 1: Initial Judgments",
            Round::Confrontation => "Round 2: Confrontation",
        }
    }

    fn verdict_mark(role_name: &str, verdict: Option<Verdict>) -> String {
        match verdict {
            Some(verdict) => format!("{} {} ({})", "v".green(), role_name, verdict),
            None => format!("{} {}", "x".red(), role_name),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_round_start(&self, case_id: CaseId, round: Round, total_roles: usize) {
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };

        let pb = bars.entry(case_id).or_insert_with(|| {
            let pb = self.multi.add(ProgressBar::new((total_roles * 2) as u64));
            pb.set_style(Self::case_style());
            pb.set_prefix(format!("Case {}", case_id));
            pb
        });
        pb.set_message(Self::round_name(round));
    }

    fn on_role_complete(&self, case_id: CaseId, _round: Round, role_name: &str, verdict: Option<Verdict>) {
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };

        if verdict.is_none() {
            if let Some(pb) = bars.remove(&case_id) {
                pb.abandon_with_message(format!("{} failed", role_name).red().to_string());
            }
            return;
        }

        if let Some(pb) = bars.get(&case_id) {
            pb.set_message(Self::verdict_mark(role_name, verdict));
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, _case_id: CaseId, _round: Round) {}

    fn on_case_decided(&self, case_id: CaseId, decision: Decision) {
        if let Ok(mut bars) = self.bars.lock()
            && let Some(pb) = bars.remove(&case_id)
        {
            pb.finish_with_message(format!("{}", decision.as_str().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_round_start(&self, case_id: CaseId, round: Round, total_roles: usize) {
        eprintln!(
            "{} Case {}: {} ({} roles)",
            "->".cyan(),
            case_id,
            ProgressReporter::round_name(round).bold(),
            total_roles
        );
    }

    fn on_role_complete(&self, _case_id: CaseId, _round: Round, role_name: &str, verdict: Option<Verdict>) {
        match verdict {
            Some(_) => eprintln!("  {}", ProgressReporter::verdict_mark(role_name, verdict)),
            None => eprintln!("  {} {} (failed)", "x".red(), role_name),
        }
    }

    fn on_round_complete(&self, _case_id: CaseId, _round: Round) {}

    fn on_case_decided(&self, case_id: CaseId, decision: Decision) {
        eprintln!("{} Case {}: {}\n", "=>".cyan(), case_id, decision.as_str().bold());
    }
}
