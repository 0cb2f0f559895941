//! Service façade exposing all triage operations.
//!
//! [`TriageService`] owns the outbound clients behind trait objects, so
//! tests can swap in mocks while production wiring uses the real DoH,
//! WHOIS, and geolocation clients.

mod dns_report;
mod health;
mod ip;
#[cfg(feature = "rustls")]
mod ssl;

use std::sync::Arc;

use crate::clients::{DohResolver, GeoProviderChain, RegistryWhoisClient};
use crate::config::TriageConfig;
use crate::error::{TriageError, TriageResult};
#[cfg(feature = "rustls")]
use crate::types::CertReport;
use crate::types::{DnsReport, GeoReport, HealthReport};
use crate::{clients, traits};

/// Validate and normalise a domain name or IP address input.
///
/// Trims whitespace, lowercases, strips a pasted URL down to its host,
/// passes valid IP addresses through unchanged, converts
/// internationalised domain names (IDN) to ASCII via IDNA 2008, and
/// rejects empty or overlong inputs.
fn validate_domain(input: &str) -> TriageResult<String> {
    let mut domain = input.trim().to_lowercase();
    // Support staff paste full URLs into tickets; accept those too.
    for scheme in ["https://", "http://"] {
        if let Some(rest) = domain.strip_prefix(scheme) {
            domain = rest.to_string();
            break;
        }
    }
    if let Some((host, _path)) = domain.split_once('/') {
        domain = host.to_string();
    }
    if domain.is_empty() {
        return Err(TriageError::InputInvalid(
            "Domain name is required".to_string(),
        ));
    }
    // If it's a valid IP address, pass through without IDNA processing.
    if domain.parse::<std::net::IpAddr>().is_ok() {
        return Ok(domain);
    }
    // IDNA processing: converts Unicode labels to Punycode and validates.
    let ascii_domain = idna::domain_to_ascii_strict(&domain)
        .map_err(|_| TriageError::InputInvalid(format!("Invalid domain name: {domain}")))?;
    if ascii_domain.len() > 253 {
        return Err(TriageError::InputInvalid(format!(
            "Domain name exceeds maximum length of 253 characters (got {})",
            ascii_domain.len()
        )));
    }
    Ok(ascii_domain)
}

/// Entry point for all diagnostic operations.
///
/// ```rust,no_run
/// use domain_triage::{TriageConfig, TriageService};
/// # async fn demo() -> domain_triage::TriageResult<()> {
/// let service = TriageService::new(TriageConfig::default())?;
/// let report = service.evaluate_health("example.com").await?;
/// println!("healthy: {}", report.healthy);
/// # Ok(())
/// # }
/// ```
pub struct TriageService {
    config: TriageConfig,
    resolver: Arc<dyn traits::RecordResolver>,
    whois: Arc<dyn traits::WhoisSource>,
    geo: Arc<dyn traits::GeoProvider>,
}

impl TriageService {
    /// Build a service wired to the real outbound clients.
    pub fn new(config: TriageConfig) -> TriageResult<Self> {
        let http = clients::build_http_client(config.request_timeout)?;
        let resolver = Arc::new(DohResolver::new(config.doh_endpoint.clone(), http.clone()));
        let whois = Arc::new(RegistryWhoisClient::new(config.request_timeout)?);
        let geo = Arc::new(GeoProviderChain::new(
            config.geo_primary_endpoint.clone(),
            config.geo_fallback_endpoint.clone(),
            http,
        ));
        Ok(Self {
            config,
            resolver,
            whois,
            geo,
        })
    }

    /// Build a service over caller-supplied clients.
    pub fn with_clients(
        config: TriageConfig,
        resolver: Arc<dyn traits::RecordResolver>,
        whois: Arc<dyn traits::WhoisSource>,
        geo: Arc<dyn traits::GeoProvider>,
    ) -> Self {
        Self {
            config,
            resolver,
            whois,
            geo,
        }
    }

    /// Run the full domain health evaluation.
    ///
    /// Fetches DNS records and WHOIS data concurrently, then classifies
    /// the results into pass, warning, and critical findings in a fixed
    /// check order. Upstream outages surface as warning findings rather
    /// than errors; only invalid input fails the call.
    pub async fn evaluate_health(&self, domain: &str) -> TriageResult<HealthReport> {
        let domain = validate_domain(domain)?;
        health::evaluate(self.resolver.as_ref(), self.whois.as_ref(), &domain).await
    }

    /// Collect the full DNS picture for a domain without judging it.
    ///
    /// Returns nameservers (with resolved addresses), A/AAAA records,
    /// sorted mail exchanges, classified TXT records, the DMARC policy
    /// record, and SOA fields.
    pub async fn analyze_dns(&self, domain: &str) -> TriageResult<DnsReport> {
        let domain = validate_domain(domain)?;
        dns_report::analyze(self.resolver.as_ref(), &domain).await
    }

    /// Inspect the TLS certificate served on `domain:port`.
    ///
    /// Defaults to port 443 when `port` is `None`. Connection and
    /// handshake failures are reported as classified findings, not
    /// errors.
    #[cfg(feature = "rustls")]
    pub async fn check_certificate(
        &self,
        domain: &str,
        port: Option<u16>,
    ) -> TriageResult<CertReport> {
        let domain = validate_domain(domain)?;
        ssl::check(&domain, port, self.config.request_timeout).await
    }

    /// Look up geolocation data for an IPv4 address.
    ///
    /// Rejects malformed input before any network call; provider
    /// failures come back as a warning finding inside the report.
    pub async fn lookup_ip(&self, ip: &str) -> TriageResult<GeoReport> {
        ip::lookup(self.geo.as_ref(), ip).await
    }
}
