use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error ({code}): {description}")]
    Provider { code: String, description: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
