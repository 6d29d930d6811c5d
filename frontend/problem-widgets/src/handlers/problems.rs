use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{forwarded_cookie, ApiError};
use crate::middlewares::csrf::CsrfToken;
use crate::models::grading::{GradingResult, RunResult};
use crate::models::submission::{RunStdinPayload, SubmissionPayload};
use crate::models::ProblemRef;
use crate::services::grading_client::GradingBackend;
use crate::services::AppState;

fn ensure_same_problem(problem: &ProblemRef, payload: &SubmissionPayload) -> Result<(), ApiError> {
    if payload.problem_id != problem.problem_id {
        return Err(ApiError::bad_request(format!(
            "problem_id {} does not match the requested problem {}",
            payload.problem_id, problem.problem_id
        )));
    }
    Ok(())
}

pub async fn validate_answer(
    State(state): State<Arc<AppState>>,
    Path((semester_id, problem_id)): Path<(Uuid, Uuid)>,
    Extension(token): Extension<CsrfToken>,
    headers: HeaderMap,
    Json(payload): Json<SubmissionPayload>,
) -> Result<Json<GradingResult>, ApiError> {
    let problem = ProblemRef::new(semester_id, problem_id);
    ensure_same_problem(&problem, &payload)?;

    let client = state.grading_client(&token, forwarded_cookie(&headers))?;
    let result = client.validate_answer(&problem, &payload).await?;
    Ok(Json(result))
}

pub async fn run_stdin(
    State(state): State<Arc<AppState>>,
    Path((semester_id, problem_id)): Path<(Uuid, Uuid)>,
    Extension(token): Extension<CsrfToken>,
    headers: HeaderMap,
    Json(payload): Json<RunStdinPayload>,
) -> Result<Json<RunResult>, ApiError> {
    let problem = ProblemRef::new(semester_id, problem_id);
    ensure_same_problem(&problem, &payload.submission)?;

    let client = state.grading_client(&token, forwarded_cookie(&headers))?;
    let result = client.run_stdin(&problem, &payload).await?;
    Ok(Json(result))
}
