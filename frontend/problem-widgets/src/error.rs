use thiserror::Error;

use crate::models::answer::AnswerKind;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Unknown type '{0}'")]
    UnknownKind(String),

    #[error("Invalid answer specification: {0}")]
    InvalidSpec(String),

    #[error("Widget is disabled")]
    Disabled,

    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("Input does not apply to a {0:?} widget")]
    UnsupportedInput(AnswerKind),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("CSRF token is missing")]
    MissingCsrfToken,

    #[error("Invalid platform URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request to platform failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Platform returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode platform response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No answer widget is loaded for this problem")]
    NoWidget,

    #[error("Problem is already answered")]
    Locked,

    #[error("Running on stdin is only available for code problems")]
    NotRunnable,

    #[error(transparent)]
    Widget(#[from] WidgetError),
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Hidden field 'csrfmiddlewaretoken' not found on page")]
    MissingCsrfToken,

    #[error("Answer element with data-answer not found on page")]
    MissingAnswer,

    #[error("Malformed JSON in page attribute '{attribute}': {source}")]
    MalformedJson {
        attribute: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
