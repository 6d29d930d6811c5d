use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    /// Only a coefficient of exactly 1 counts as correct.
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient == 1.0 {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Correct => "correct",
            Verdict::Incorrect => "incorrect",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Correct => "Correct answer",
            Verdict::Incorrect => "Incorrect answer",
        }
    }
}

/// Response of `validate_answer/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GradingResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_answered: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GradingOutcome {
    Graded {
        verdict: Verdict,
        note: Option<String>,
    },
    Rejected(String),
    Unknown,
}

impl GradingResult {
    pub fn outcome(&self) -> GradingOutcome {
        match (self.coefficient, &self.error) {
            (Some(coefficient), _) => GradingOutcome::Graded {
                verdict: Verdict::from_coefficient(coefficient),
                note: self.supplementary_text(),
            },
            (None, Some(error)) => GradingOutcome::Rejected(error.clone()),
            (None, None) => GradingOutcome::Unknown,
        }
    }

    /// Second element of a `[sequence, text]` answer pair; any other shape has no note.
    pub fn supplementary_text(&self) -> Option<String> {
        let Some(Value::Array(answer)) = &self.answer else {
            return None;
        };
        if answer.len() != 2 || !answer[0].is_array() {
            return None;
        }
        match &answer[1] {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn locks(&self) -> bool {
        self.is_answered == Some(true)
    }
}

/// Response of `run_stdin/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Output { exit_code: i64, output: String },
    Failed(String),
    Unknown,
}

impl RunResult {
    pub fn outcome(&self) -> RunOutcome {
        if let Some(error) = &self.error {
            return RunOutcome::Failed(error.clone());
        }
        let Some(exit_code) = self.code else {
            return RunOutcome::Unknown;
        };
        let stderr = self.stderr.clone().unwrap_or_default();
        let output = if stderr.is_empty() {
            self.stdout.clone().unwrap_or_default()
        } else {
            stderr
        };
        RunOutcome::Output { exit_code, output }
    }
}
