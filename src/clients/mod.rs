//! External service client implementations.

mod doh;
mod geo;
mod whois;

pub use doh::DohResolver;
pub use geo::GeoProviderChain;
pub use whois::RegistryWhoisClient;

use std::time::Duration;

use crate::error::{TriageError, TriageResult};

/// Build an HTTP client applying the configured per-call timeout.
///
/// One client instance is shared by all HTTP-based collaborators of a
/// service so connection reuse works across checks.
pub(crate) fn build_http_client(timeout: Duration) -> TriageResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TriageError::UpstreamUnavailable(format!("Failed to build HTTP client: {e}")))
}
