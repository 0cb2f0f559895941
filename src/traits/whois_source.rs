//! WHOIS registration lookup abstract trait.

use async_trait::async_trait;

use crate::error::TriageResult;
use crate::types::WhoisRecord;

/// WHOIS registration lookup collaborator.
///
/// Implementations:
/// - `RegistryWhoisClient` (whois-rust over the embedded server map)
/// - `MockWhoisSource` (tests)
#[async_trait]
pub trait WhoisSource: Send + Sync {
    /// Fetch the registration record for a domain.
    ///
    /// Errors distinguish transport failures (`UpstreamUnavailable`) from
    /// unusable response formats (`UpstreamMalformed`). A registry "not
    /// found" shell is a successful result with `domain: None`.
    ///
    /// # Arguments
    /// * `domain` - Normalized domain name
    async fn lookup(&self, domain: &str) -> TriageResult<WhoisRecord>;
}
