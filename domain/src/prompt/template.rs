//! Prompt templates for the deliberation flow

use crate::core::case::Case;

/// Templates for generating prompts at each round
pub struct PromptTemplate;

impl PromptTemplate {
    /// Header opening every confrontation transcript
    pub const CONFRONTATION_HEADER: &'static str = "Other agents said:";

    /// Response shape appended to every evaluation request
    pub fn output_format() -> &'static str {
        r#"Respond using exactly this format:

Verdict: Faithful | Mutated | Unclear
Confidence: Low | Medium | High
Key Arguments:
- bullet point
- bullet point"#
    }

    /// User content for one evaluation request
    ///
    /// Round 1 passes no confrontation context; round 2 passes the transcript.
    pub fn evaluation_prompt(case: &Case, confrontation: Option<&str>) -> String {
        let mut prompt = format!(
            "Internal Fact:\n{}\n\nExternal Claim:\n{}\n\n",
            case.internal_fact(),
            case.external_claim()
        );

        if let Some(context) = confrontation
            && !context.trim().is_empty()
        {
            prompt.push_str(context.trim_end());
            prompt.push_str("\n\n");
        }

        prompt.push_str(Self::output_format());
        prompt
    }

    /// Label of one role's section in the transcript
    pub fn section_label(role_name: &str) -> String {
        format!("[{}]", role_name)
    }

    /// Confrontation transcript: one labeled section per `(role, output)`, in the given order
    pub fn confrontation_transcript<'a>(
        outputs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> String {
        let mut transcript = Self::CONFRONTATION_HEADER.to_string();
        transcript.push('\n');

        for (role_name, output) in outputs {
            transcript.push_str(&format!(
                "\n{}\n{}\n",
                Self::section_label(role_name),
                output
            ));
        }

        transcript
    }
}
