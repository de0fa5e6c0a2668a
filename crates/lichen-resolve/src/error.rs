//! Provider error types.
//!
//! These errors exist for diagnostics, not control flow: every provider
//! logs them and downgrades to "not found" so that a single provider
//! failure can never abort the resolution chain.

/// Errors from a lookup provider's HTTP path.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport error (connection failure, timeout).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The service returned a non-2xx, non-404 status.
    #[error("{provider} returned {status} for {endpoint}: {body}")]
    Api {
        provider: &'static str,
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
