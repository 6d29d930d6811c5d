use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

/// Format of the `datetime-local` input the semester page posts.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Same input with `step` set; browsers then include seconds.
const EXPIRATION_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_expiration(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, EXPIRATION_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, EXPIRATION_FORMAT_SECONDS))
}

#[derive(Debug, Serialize)]
pub struct GenerateCodeRequest {
    #[serde(serialize_with = "serialize_expiration")]
    pub expiration_time: NaiveDateTime,
}

fn serialize_expiration<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.format(EXPIRATION_FORMAT).to_string())
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SemesterCode {
    pub code: String,
    pub is_code_expired: bool,
}

impl SemesterCode {
    pub fn display_text(&self) -> String {
        if self.is_code_expired {
            "The code has expired.".to_string()
        } else {
            format!("Join code: {}", self.code)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnrollRequest {
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum EnrollOutcome {
    /// Enrollment accepted; the semester page should be reloaded.
    Enrolled,
    Rejected(String),
    /// Neither an error nor a success status; the page stays as is.
    NoChange,
}

impl From<StatusResponse> for EnrollOutcome {
    fn from(response: StatusResponse) -> Self {
        if let Some(error) = response.error {
            return EnrollOutcome::Rejected(error);
        }
        match response.status.as_deref() {
            Some("200") => EnrollOutcome::Enrolled,
            _ => EnrollOutcome::NoChange,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TargetPointsRequest {
    pub points: String,
}
