//! IP geolocation abstract trait.

use async_trait::async_trait;

use crate::error::TriageResult;
use crate::types::{GeoInfo, GeoProviderKind};

/// IP geolocation collaborator.
///
/// Implementations:
/// - `GeoProviderChain` (primary provider with schema-remapped fallback)
/// - `MockGeoProvider` (tests)
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Look up location data for an IP address.
    ///
    /// Returns the common-shape fields plus which provider answered.
    ///
    /// # Arguments
    /// * `ip` - Validated dotted-quad IP address
    async fn lookup(&self, ip: &str) -> TriageResult<(GeoInfo, GeoProviderKind)>;
}
