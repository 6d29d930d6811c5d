use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use super::{forwarded_cookie, ApiError};
use crate::middlewares::csrf::CsrfToken;
use crate::models::semester::{parse_expiration, EnrollOutcome};
use crate::services::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateCodeBody {
    pub expiration_time: String,
}

#[derive(Debug, Deserialize)]
pub struct EnrollBody {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct TargetPointsBody {
    pub points: String,
}

pub async fn generate_semester_code(
    State(state): State<Arc<AppState>>,
    Path(semester_id): Path<Uuid>,
    Extension(token): Extension<CsrfToken>,
    headers: HeaderMap,
    Json(body): Json<GenerateCodeBody>,
) -> Result<Json<Value>, ApiError> {
    let expiration = parse_expiration(&body.expiration_time)
        .map_err(|e| ApiError::bad_request(format!("Invalid expiration_time: {}", e)))?;

    let client = state.semester_client(semester_id, &token, forwarded_cookie(&headers))?;
    let code = client.generate_semester_code(expiration).await?;

    Ok(Json(json!({
        "code": code.code,
        "is_code_expired": code.is_code_expired,
        "message": code.display_text(),
    })))
}

pub async fn enroll(
    State(state): State<Arc<AppState>>,
    Path(semester_id): Path<Uuid>,
    Extension(token): Extension<CsrfToken>,
    headers: HeaderMap,
    Json(body): Json<EnrollBody>,
) -> Result<Json<EnrollOutcome>, ApiError> {
    let client = state.semester_client(semester_id, &token, forwarded_cookie(&headers))?;
    Ok(Json(client.enroll(&body.code).await?))
}

pub async fn change_target_points(
    State(state): State<Arc<AppState>>,
    Path(semester_id): Path<Uuid>,
    Extension(token): Extension<CsrfToken>,
    headers: HeaderMap,
    Json(body): Json<TargetPointsBody>,
) -> Result<Json<Value>, ApiError> {
    let client = state.semester_client(semester_id, &token, forwarded_cookie(&headers))?;
    let accepted = client.change_target_points(&body.points).await?;
    Ok(Json(json!({ "accepted": accepted })))
}
