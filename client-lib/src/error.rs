use thiserror::Error;

/// Closed error taxonomy for everything the client surfaces.
///
/// The backend's error bodies are loosely shaped, so they are decoded
/// defensively into `Request` with a per-operation fallback message.
/// `Unauthorized` and `Validation` are produced locally and never involve
/// the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Transport failure before a response arrived. No retries anywhere;
    /// the user re-triggers the action.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Viewer not resolved or not permitted for a write action.
    #[error("{0}")]
    Unauthorized(String),

    /// Client-side form-field violation, rejected before the wire.
    #[error("{0}")]
    Validation(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> ApiError {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

pub type Result<T> = ::std::result::Result<T, ApiError>;
