use thiserror::Error;

/// Failures while reading the session JSON from stdin. These are the only
/// errors that abort an invocation.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read stdin: {0}")]
    Read(#[from] std::io::Error),

    #[error("stdin was empty; expected a session JSON object")]
    Empty,

    #[error("invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
}
