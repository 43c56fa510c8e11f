use thiserror::Error;

/// Failures surfaced by [`crate::CompletionGateway::complete`].
///
/// Callers map each variant to one fixed user-facing text; neither is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Login failed or returned no token.
    #[error("Authorization failed")]
    Unauthorized,

    /// Transport error, non-2xx status or unreadable body from the completion endpoint.
    #[error("Completion request failed: {0}")]
    Completion(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}
