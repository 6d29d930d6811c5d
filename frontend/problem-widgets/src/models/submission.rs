use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::AnswerKind;

/// Kind-specific part of a submission, tagged with the problem type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum AnswerPayload {
    #[serde(rename = "Multiple Choice Radio")]
    RadioChoice {
        /// Unset when nothing is checked; the platform rejects that.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer_id: Option<String>,
    },
    #[serde(rename = "Multiple Choice Checkbox")]
    CheckboxChoice { answer_id: Vec<String> },
    #[serde(rename = "Fill In Single Blank")]
    FillBlank { value: String },
    #[serde(rename = "Code")]
    Code { code: String },
}

impl AnswerPayload {
    pub fn kind(&self) -> AnswerKind {
        match self {
            AnswerPayload::RadioChoice { .. } => AnswerKind::RadioChoice,
            AnswerPayload::CheckboxChoice { .. } => AnswerKind::CheckboxChoice,
            AnswerPayload::FillBlank { .. } => AnswerKind::FillBlank,
            AnswerPayload::Code { .. } => AnswerKind::Code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub answer: AnswerPayload,
    pub problem_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_elapsed_in_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunStdinPayload {
    #[serde(flatten)]
    pub submission: SubmissionPayload,
    pub stdin: String,
}
