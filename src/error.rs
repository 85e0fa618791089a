use thiserror::Error;

/// Failures crossing the API-client boundary.
///
/// Every variant carries a human-readable message. Screens are responsible
/// for catching these and mapping them to inline error state; nothing here
/// is fatal to the app.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (fetch-layer failure).
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-OK status.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),

    /// A submission id was rejected before any network call was made.
    #[error("submission id must be a positive integer")]
    InvalidSubmissionId,
}

impl ApiError {
    /// Message suitable for showing to the user. Server-provided messages are
    /// passed through; transport-level details are replaced by the caller's
    /// generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_passes_server_message_through() {
        let err = ApiError::Server {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    }

    #[test]
    fn user_message_hides_transport_details() {
        let err = ApiError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }
}
