//! Service configuration.

use std::time::Duration;

/// Endpoints and timeout applied to all outbound calls.
///
/// Injected into [`TriageService`](crate::TriageService) at construction time
/// so tests can point the clients at fixtures instead of the public services.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// DNS-over-HTTPS JSON endpoint (Google resolver format).
    pub doh_endpoint: String,
    /// Primary geolocation provider base URL (ipapi.co response format).
    pub geo_primary_endpoint: String,
    /// Fallback geolocation provider base URL (ip-api.com response format).
    pub geo_fallback_endpoint: String,
    /// Per-call timeout for every outbound request.
    pub request_timeout: Duration,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            doh_endpoint: "https://dns.google/resolve".to_string(),
            geo_primary_endpoint: "https://ipapi.co".to_string(),
            geo_fallback_endpoint: "http://ip-api.com".to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}
