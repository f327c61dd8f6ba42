// Error types for the request helper and the workflow driver.
// Nothing in the library terminates the process: every failure comes back
// as a `DemoError` and `main` decides what to do with it.

use thiserror::Error;

/// Exit code for transport failures and non-2xx responses.
pub const EXIT_HTTP_FAILURE: i32 = 1;
/// Exit code for programming or configuration mistakes.
pub const EXIT_CONFIGURATION: i32 = 2;

#[derive(Debug, Error)]
pub enum DemoError {
    /// Only GET and POST are supported by the request helper.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// An extra header could not be turned into a legal HTTP header.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The request never produced a response (connect, DNS, TLS, body read).
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status outside 200-299.
    #[error("server responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl DemoError {
    /// True for mistakes in how the helper was called, as opposed to
    /// failures reported by the network or the server.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DemoError::UnsupportedMethod(_) | DemoError::InvalidHeader { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_configuration() {
            EXIT_CONFIGURATION
        } else {
            EXIT_HTTP_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_have_their_own_exit_code() {
        let err = DemoError::UnsupportedMethod("DELETE".into());
        assert!(err.is_configuration());
        assert_eq!(err.exit_code(), EXIT_CONFIGURATION);

        let err = DemoError::InvalidHeader {
            name: "X-Topic-ID".into(),
            reason: "bad value".into(),
        };
        assert_eq!(err.exit_code(), EXIT_CONFIGURATION);
    }

    #[test]
    fn status_errors_are_http_failures() {
        let err = DemoError::Status {
            status: 404,
            body: "not found".into(),
        };
        assert!(!err.is_configuration());
        assert_eq!(err.exit_code(), EXIT_HTTP_FAILURE);
        assert_eq!(err.to_string(), "server responded with HTTP 404: not found");
    }
}
