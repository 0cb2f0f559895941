//! TLS certificate inspection.
//!
//! Connects with rustls, parses the leaf certificate, and classifies
//! days-until-expiry. Failures are staged so each gets a distinct
//! category: hostname resolution, connect timeout, TLS negotiation
//! (expired, self-signed, name mismatch, or incomplete chain all land
//! here — the handshake does not discriminate further), and all-other.
//! A failed check still returns a report with a classified finding.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::ServerName;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use x509_parser::prelude::*;

use crate::error::TriageResult;
use crate::types::{CertReport, CertificateInfo, CheckName, Finding, Severity, TlsFailureKind};

/// Initialize the rustls `CryptoProvider` (once).
///
/// If a provider is already installed (by another part of the
/// application), this is a no-op — `install_default` returns `Err` only
/// to indicate that a provider was already set, which is perfectly fine.
fn ensure_crypto_provider() {
    // Ignore the error: Err means a provider is already installed.
    let _ = CryptoProvider::install_default(rustls::crypto::ring::default_provider());
}

fn ssllabs_hint(domain: &str) -> String {
    format!("Test manually at https://www.ssllabs.com/ssltest/analyze.html?d={domain}")
}

/// Inspect the certificate served on `domain:port`.
pub(super) async fn check(
    domain: &str,
    port: Option<u16>,
    connect_timeout: Duration,
) -> TriageResult<CertReport> {
    ensure_crypto_provider();

    let port = port.unwrap_or(443);
    debug!("[SSL] checking {domain}:{port}");

    // 1. Resolve the hostname; a failure here is its own category.
    trace!("[SSL] resolving {domain}");
    let address = match lookup_host((domain, port)).await {
        Ok(mut addresses) => match addresses.next() {
            Some(address) => address,
            None => {
                return Ok(failure_report(
                    domain,
                    port,
                    TlsFailureKind::Resolution,
                    format!("Hostname {domain} did not resolve to any address"),
                ));
            }
        },
        Err(e) => {
            return Ok(failure_report(
                domain,
                port,
                TlsFailureKind::Resolution,
                format!("Hostname {domain} did not resolve: {e}"),
            ));
        }
    };

    // 2. TCP connect with timeout.
    trace!("[SSL] connecting to {address}");
    let stream = match timeout(connect_timeout, TcpStream::connect(address)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return Ok(failure_report(
                domain,
                port,
                TlsFailureKind::Other,
                format!("Connection failed: {e}"),
            ));
        }
        Err(_) => {
            return Ok(failure_report(
                domain,
                port,
                TlsFailureKind::Timeout,
                format!(
                    "Connection timed out after {}s",
                    connect_timeout.as_secs()
                ),
            ));
        }
    };

    // 3. TLS handshake against the webpki root store.
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let connector = TlsConnector::from(Arc::new(config));

    let Ok(server_name) = ServerName::try_from(domain.to_string()) else {
        return Ok(failure_report(
            domain,
            port,
            TlsFailureKind::Other,
            format!("{domain} is not a valid TLS server name"),
        ));
    };

    trace!("[SSL] performing TLS handshake");
    let tls_stream = match timeout(connect_timeout, connector.connect(server_name, stream)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return Ok(failure_report(
                domain,
                port,
                TlsFailureKind::Negotiation,
                format!(
                    "TLS handshake failed: {e} (the certificate may be expired, \
                     self-signed, or issued for a different name)"
                ),
            ));
        }
        Err(_) => {
            return Ok(failure_report(
                domain,
                port,
                TlsFailureKind::Timeout,
                format!(
                    "TLS handshake timed out after {}s",
                    connect_timeout.as_secs()
                ),
            ));
        }
    };

    // 4. Parse the leaf certificate.
    let (_, connection) = tls_stream.get_ref();
    let Some(cert_der) = connection.peer_certificates().and_then(|certs| certs.first()) else {
        return Ok(failure_report(
            domain,
            port,
            TlsFailureKind::Other,
            "The server presented no certificate".to_string(),
        ));
    };

    let info = match X509Certificate::from_der(cert_der.as_ref()) {
        Ok((_, cert)) => parse_certificate(&cert),
        Err(e) => {
            return Ok(failure_report(
                domain,
                port,
                TlsFailureKind::Other,
                format!("Certificate parsing failed: {e}"),
            ));
        }
    };

    let finding = classify_certificate(&info);
    debug!(
        "[SSL] {domain}:{port}: expires in {} days, expired={}",
        info.days_remaining, info.is_expired
    );

    Ok(CertReport {
        domain: domain.to_string(),
        port,
        certificate: Some(info),
        failure: None,
        finding,
    })
}

/// Extract the fields the report displays from the leaf certificate.
fn parse_certificate(cert: &X509Certificate<'_>) -> CertificateInfo {
    let subject = cert.subject().to_string();
    let issuer = cert.issuer().to_string();
    let valid_from = cert.validity().not_before.to_rfc2822().unwrap_or_default();
    let valid_to = cert.validity().not_after.to_rfc2822().unwrap_or_default();

    let now = Utc::now();
    let not_after = DateTime::parse_from_rfc2822(&valid_to)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);
    let days_remaining = (not_after - now).num_days();

    let san: Vec<String> = cert
        .subject_alternative_name()
        .ok()
        .flatten()
        .map(|ext| {
            ext.value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some((*dns).to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let subject_common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(String::from);
    let issuer_common_name = cert
        .issuer()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(String::from);
    let issuer_organization = cert
        .issuer()
        .iter_organization()
        .next()
        .and_then(|org| org.as_str().ok())
        .map(String::from);

    CertificateInfo {
        subject,
        issuer,
        subject_common_name,
        issuer_common_name,
        issuer_organization,
        valid_from,
        valid_to,
        days_remaining,
        is_expired: days_remaining < 0,
        san,
        serial_number: cert.serial.to_str_radix(16).to_uppercase(),
        version: cert.version().0 + 1,
    }
}

/// Classify days-until-expiry.
///
/// Strict comparisons in the order `>30`, `>0`: 31 days is a pass, 30
/// is a warning, 0 is critical. This boundary convention deliberately
/// differs from the WHOIS expiry check.
fn classify_certificate(info: &CertificateInfo) -> Finding {
    let days = info.days_remaining;
    if days > 30 {
        Finding::new(
            CheckName::Certificate,
            Severity::Pass,
            format!(
                "Certificate is valid for {days} more days (until {})",
                info.valid_to
            ),
        )
    } else if days > 0 {
        Finding::new(
            CheckName::Certificate,
            Severity::Warning,
            format!("Certificate expires in {days} days, renew soon"),
        )
    } else if days == 0 {
        Finding::new(
            CheckName::Certificate,
            Severity::Critical,
            "Certificate expires today",
        )
    } else {
        Finding::new(
            CheckName::Certificate,
            Severity::Critical,
            format!("Certificate expired {} days ago", -days),
        )
    }
}

/// Build a report for a failed check. Resolution and negotiation
/// failures are critical (the site cannot serve HTTPS as configured);
/// timeouts and other transport problems may be transient and warn.
fn failure_report(domain: &str, port: u16, kind: TlsFailureKind, message: String) -> CertReport {
    warn!("[SSL] {domain}:{port} failed ({kind}): {message}");
    let severity = match kind {
        TlsFailureKind::Resolution | TlsFailureKind::Negotiation => Severity::Critical,
        TlsFailureKind::Timeout | TlsFailureKind::Other => Severity::Warning,
    };
    CertReport {
        domain: domain.to_string(),
        port,
        certificate: None,
        failure: Some(kind),
        finding: Finding::with_hint(CheckName::Certificate, severity, message, ssllabs_hint(domain)),
    }
}
