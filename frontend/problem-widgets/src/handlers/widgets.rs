use axum::response::Html;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::ApiError;
use crate::models::answer::{AnswerSpec, CorrectAnswer};
use crate::services::platform::decode_value;
use crate::widgets;

/// `answer` and `correct_answers` accept a JSON object or a string holding one,
/// the way the page's data attributes carry them.
#[derive(Debug, Deserialize)]
pub struct RenderWidgetRequest {
    pub answer: Value,
    #[serde(default)]
    pub correct_answers: Option<Value>,
}

pub async fn render_widget(Json(req): Json<RenderWidgetRequest>) -> Result<Html<String>, ApiError> {
    let spec: AnswerSpec = decode_value(req.answer)
        .map_err(|e| ApiError::bad_request(format!("Invalid answer: {}", e)))?;

    let correct: Option<CorrectAnswer> = match req.correct_answers {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            decode_value(value)
                .map_err(|e| ApiError::bad_request(format!("Invalid correct_answers: {}", e)))?,
        ),
    };

    let widget = widgets::load_widget(&spec, correct.as_ref()).map_err(|e| {
        tracing::warn!("Refusing to render answer widget: {}", e);
        ApiError::from(e)
    })?;

    Ok(Html(widgets::render_container(widget.as_ref()).to_html()))
}
