use runemetrics_engine::{EngineError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Private profile; the service wants a logged-in session
    #[error("Player profile is private. Authenticate and try again.")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server error: {0}")]
    ServerError(String),
    #[error(transparent)]
    Engine(EngineError),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err.kind() {
            ErrorKind::AuthenticationRequired => ApiError::Unauthorized,
            _ => ApiError::Engine(err),
        }
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(401, _) | ureq::Error::Status(403, _) => ApiError::Unauthorized,
            ureq::Error::Status(404, response) => {
                ApiError::NotFound(response.get_url().to_string())
            }
            ureq::Error::Status(code, _) => ApiError::ServerError(format!("HTTP {}", code)),
            ureq::Error::Transport(transport) => ApiError::NetworkError(transport.to_string()),
        }
    }
}
