use thiserror::Error;

/// Everything that can abort a run.
/// A captcha prompt is not in here: it is an `ApplicationResult` the loop handles inline.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Malformed cookie string: {0}")]
    MalformedCookie(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("CSRF token not found at {url} (is the session cookie still valid?)")]
    CsrfTokenNotFound { url: String },

    #[error("Unexpected response from {url}: {message}")]
    RemoteApi { url: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SubmitError {
    pub fn remote(url: impl Into<String>, message: impl Into<String>) -> Self {
        SubmitError::RemoteApi {
            url: url.into(),
            message: message.into(),
        }
    }
}
