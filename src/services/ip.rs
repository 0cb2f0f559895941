//! IP geolocation lookup.
//!
//! Validates the dotted-quad shape locally before any network call,
//! then asks the provider chain. Provider failures degrade to a
//! warning finding; only malformed input is an error.

use log::{debug, warn};
use regex::Regex;

use crate::error::{TriageError, TriageResult};
use crate::traits::GeoProvider;
use crate::types::{CheckName, Finding, GeoReport, Severity};

/// Strict four-octet numeric shape, checked before any network call.
/// Octet range is deliberately not validated (shape only); out-of-range
/// quads fail at the provider instead.
fn is_dotted_quad(ip: &str) -> bool {
    if let Ok(re) = Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$") {
        re.is_match(ip)
    } else {
        false
    }
}

/// Look up geolocation data for one IPv4 address.
pub(super) async fn lookup(geo: &dyn GeoProvider, ip: &str) -> TriageResult<GeoReport> {
    let ip = ip.trim();
    if !is_dotted_quad(ip) {
        return Err(TriageError::InputInvalid(format!(
            "Not a valid IPv4 address: {ip}"
        )));
    }

    debug!("[GEO] looking up {ip}");
    match geo.lookup(ip).await {
        Ok((info, provider)) => {
            let mut parts = Vec::new();
            if let Some(city) = &info.city {
                parts.push(city.clone());
            }
            if let Some(country) = &info.country {
                parts.push(country.clone());
            }
            let location = if parts.is_empty() {
                "an unknown location".to_string()
            } else {
                parts.join(", ")
            };
            let message = match &info.org {
                Some(org) => format!("{ip} is located in {location}, operated by {org}"),
                None => format!("{ip} is located in {location}"),
            };
            debug!("[GEO] {ip}: answered by {provider:?}");
            Ok(GeoReport {
                ip: ip.to_string(),
                info: Some(info),
                provider: Some(provider),
                finding: Finding::new(CheckName::Geolocation, Severity::Pass, message),
            })
        }
        Err(e) => {
            warn!("[GEO] lookup for {ip} failed: {e}");
            Ok(GeoReport {
                ip: ip.to_string(),
                info: None,
                provider: None,
                finding: Finding::with_hint(
                    CheckName::Geolocation,
                    Severity::Warning,
                    format!("Could not retrieve information for {ip}"),
                    format!("Look up manually at https://who.is/whois-ip/ip-address/{ip}"),
                ),
            })
        }
    }
}
