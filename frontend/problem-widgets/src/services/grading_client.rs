use async_trait::async_trait;

use super::platform::PlatformTransport;
use crate::error::ClientError;
use crate::models::grading::{GradingResult, RunResult};
use crate::models::submission::{RunStdinPayload, SubmissionPayload};
use crate::models::ProblemRef;

/// Server side of a problem: grades answers and runs code on custom stdin.
#[async_trait]
pub trait GradingBackend: Send + Sync {
    async fn validate_answer(
        &self,
        problem: &ProblemRef,
        payload: &SubmissionPayload,
    ) -> Result<GradingResult, ClientError>;

    async fn run_stdin(
        &self,
        problem: &ProblemRef,
        payload: &RunStdinPayload,
    ) -> Result<RunResult, ClientError>;
}

pub struct GradingClient {
    transport: PlatformTransport,
}

impl GradingClient {
    pub fn new(transport: PlatformTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl GradingBackend for GradingClient {
    async fn validate_answer(
        &self,
        problem: &ProblemRef,
        payload: &SubmissionPayload,
    ) -> Result<GradingResult, ClientError> {
        tracing::info!(
            problem_id = %problem.problem_id,
            kind = %payload.answer.kind(),
            "Submitting answer"
        );
        self.transport
            .post_json("validate_answer", &problem.validate_answer_path(), payload)
            .await
    }

    async fn run_stdin(
        &self,
        problem: &ProblemRef,
        payload: &RunStdinPayload,
    ) -> Result<RunResult, ClientError> {
        tracing::info!(problem_id = %problem.problem_id, "Running code on custom stdin");
        self.transport
            .post_json("run_stdin", &problem.run_stdin_path(), payload)
            .await
    }
}
