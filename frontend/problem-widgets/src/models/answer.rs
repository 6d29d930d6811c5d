use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashSet, fmt, str::FromStr};

use crate::error::WidgetError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    #[serde(rename = "Multiple Choice Radio")]
    RadioChoice,
    #[serde(rename = "Multiple Choice Checkbox")]
    CheckboxChoice,
    #[serde(rename = "Fill In Single Blank")]
    FillBlank,
    #[serde(rename = "Code")]
    Code,
}

impl AnswerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::RadioChoice => "Multiple Choice Radio",
            AnswerKind::CheckboxChoice => "Multiple Choice Checkbox",
            AnswerKind::FillBlank => "Fill In Single Blank",
            AnswerKind::Code => "Code",
        }
    }
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerKind {
    type Err = WidgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Multiple Choice Radio" => Ok(AnswerKind::RadioChoice),
            "Multiple Choice Checkbox" => Ok(AnswerKind::CheckboxChoice),
            "Fill In Single Blank" => Ok(AnswerKind::FillBlank),
            "Code" => Ok(AnswerKind::Code),
            other => Err(WidgetError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

/// Answer definition embedded in the problem page.
///
/// `type` stays a plain string so an unrecognised kind surfaces when the widget
/// is loaded instead of failing the whole decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub options: Value,
}

impl AnswerSpec {
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        serde_json::from_str(raw).map_err(|e| WidgetError::InvalidSpec(e.to_string()))
    }

    pub fn kind(&self) -> Result<AnswerKind, WidgetError> {
        self.kind.parse()
    }

    /// Options of a choice problem; ids must be unique.
    pub fn choice_options(&self) -> Result<Vec<AnswerOption>, WidgetError> {
        let options: Vec<AnswerOption> = serde_json::from_value(self.options.clone())
            .map_err(|e| WidgetError::InvalidSpec(format!("choice options: {}", e)))?;

        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.id.as_str()) {
                return Err(WidgetError::InvalidSpec(format!(
                    "duplicate option id '{}'",
                    option.id
                )));
            }
        }
        Ok(options)
    }

    pub fn blank_template(&self) -> Result<BlankTemplate, WidgetError> {
        let text = self
            .options
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| WidgetError::InvalidSpec("fill-in text is missing".to_string()))?;
        BlankTemplate::parse(text)
    }
}

/// Fill-in text split around its `{}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankTemplate {
    pub prefix: String,
    pub suffix: String,
}

impl BlankTemplate {
    pub const PLACEHOLDER: &'static str = "{}";

    pub fn parse(text: &str) -> Result<Self, WidgetError> {
        let (prefix, suffix) = text.split_once(Self::PLACEHOLDER).ok_or_else(|| {
            WidgetError::InvalidSpec(format!("no '{}' placeholder in '{}'", Self::PLACEHOLDER, text))
        })?;
        if suffix.contains(Self::PLACEHOLDER) {
            return Err(WidgetError::InvalidSpec(format!(
                "more than one '{}' placeholder in '{}'",
                Self::PLACEHOLDER,
                text
            )));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CorrectValue {
    One(String),
    Many(Vec<String>),
}

/// Previously recorded correct answer, present only in review mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrectAnswer {
    pub is_correct: CorrectValue,
}

impl CorrectAnswer {
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        serde_json::from_str(raw).map_err(|e| WidgetError::InvalidSpec(e.to_string()))
    }

    pub fn ids(&self) -> Vec<&str> {
        match &self.is_correct {
            CorrectValue::One(id) => vec![id.as_str()],
            CorrectValue::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    /// Accepted values as a single string; lists are comma-joined.
    pub fn joined(&self) -> String {
        match &self.is_correct {
            CorrectValue::One(value) => value.clone(),
            CorrectValue::Many(values) => values.join(","),
        }
    }
}

/// One example test of a code problem shown in review mode.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CodeTestCase {
    pub stdin: Vec<String>,
    pub stdout: String,
}

impl CodeTestCase {
    /// Lines alternate between a stdin parameter list and the expected stdout.
    pub fn parse_all(accepted: &str) -> Vec<CodeTestCase> {
        let lines: Vec<&str> = accepted.split('\n').collect();
        lines
            .chunks(2)
            .map(|pair| CodeTestCase {
                stdin: pair[0]
                    .split([',', '\r'])
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect(),
                stdout: pair
                    .get(1)
                    .map(|line| line.trim_end_matches('\r').to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }
}
