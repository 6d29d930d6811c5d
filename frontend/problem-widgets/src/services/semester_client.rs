use chrono::NaiveDateTime;
use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::platform::{normalize_base_url, PlatformTransport};
use crate::error::ClientError;
use crate::models::semester::{
    EnrollOutcome, EnrollRequest, GenerateCodeRequest, SemesterCode, StatusResponse,
    TargetPointsRequest,
};

const ACCEPTED_STATUS: &str = "200";

/// Calls made from a semester page; relative paths resolve against `/semesters/{id}/`.
pub struct SemesterClient {
    transport: PlatformTransport,
}

impl SemesterClient {
    pub fn new(
        http: Client,
        platform_url: &Url,
        semester_id: Uuid,
        csrf_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let semester_url = normalize_base_url(platform_url.clone()).join(&format!("semesters/{}/", semester_id))?;
        Ok(Self {
            transport: PlatformTransport::new(http, semester_url, csrf_token)?,
        })
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.transport = self.transport.with_cookie(cookie);
        self
    }

    pub async fn generate_semester_code(
        &self,
        expiration_time: NaiveDateTime,
    ) -> Result<SemesterCode, ClientError> {
        let request = GenerateCodeRequest { expiration_time };
        let code: SemesterCode = self
            .transport
            .post_json("generate_semester_code", "generate_semester_code/", &request)
            .await?;
        tracing::info!(expired = code.is_code_expired, "Semester join code generated");
        Ok(code)
    }

    pub async fn enroll(&self, code: &str) -> Result<EnrollOutcome, ClientError> {
        let request = EnrollRequest {
            code: code.to_string(),
        };
        let response: StatusResponse = self
            .transport
            .post_json("enroll", "enroll/", &request)
            .await?;
        Ok(EnrollOutcome::from(response))
    }

    /// Returns whether the platform accepted the new target.
    pub async fn change_target_points(&self, points: &str) -> Result<bool, ClientError> {
        let request = TargetPointsRequest {
            points: points.to_string(),
        };
        let response: StatusResponse = self
            .transport
            .post_json("change_target_points", "/change_target_points/", &request)
            .await?;

        let accepted = response.status.as_deref() == Some(ACCEPTED_STATUS);
        if !accepted {
            tracing::warn!(status = ?response.status, "Target points change rejected");
        }
        Ok(accepted)
    }
}
