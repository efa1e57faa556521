use thiserror::Error;

/// Centralized error types for the application
///
/// Library code returns these; the binary wraps them in `anyhow` at the top level.
///
/// # Example
///
/// ```no_run
/// use wordly_bot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors (activity file, vocabulary file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Vocabulary could not be built
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
