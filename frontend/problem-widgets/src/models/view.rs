use serde::{Deserialize, Serialize};

use super::grading::Verdict;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProblemState {
    Unanswered,
    Submitted,
    Locked,
}

/// Page update produced by a submit or run, applied by the view layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ViewTransition {
    ShowVerdict(VerdictView),
    ShowError(ErrorView),
    ShowRunOutput(RunOutputView),
    /// Remove submit/run/skip controls, disable the editor, reveal "next problem".
    Lock,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VerdictView {
    pub verdict: Verdict,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorView {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunOutputView {
    pub exit_code: i64,
    /// Already entity-escaped; safe to insert as markup.
    pub output_html: String,
}

impl ViewTransition {
    pub fn error(message: impl Into<String>) -> Self {
        ViewTransition::ShowError(ErrorView {
            message: message.into(),
        })
    }

    pub fn unknown_error() -> Self {
        Self::error(UNKNOWN_ERROR_MESSAGE)
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            ViewTransition::ShowVerdict(_) => "show-verdict",
            ViewTransition::ShowError(_) => "show-error",
            ViewTransition::ShowRunOutput(_) => "show-run-output",
            ViewTransition::Lock => "lock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transition_wire_format() {
        let transition = ViewTransition::ShowVerdict(VerdictView {
            verdict: Verdict::Correct,
            message: "Correct answer".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&transition).unwrap(),
            json!({"type": "show-verdict", "verdict": "correct", "message": "Correct answer"})
        );
        assert_eq!(
            serde_json::to_value(ViewTransition::Lock).unwrap(),
            json!({"type": "lock"})
        );
        assert_eq!(transition.event_name(), "show-verdict");
    }
}
