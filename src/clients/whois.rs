//! WHOIS registry client.
//!
//! Sends registry queries through `whois-rust` using an embedded TLD to
//! server map, then extracts the structured fields the health checks need
//! from the free-form response text.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;
use regex::Regex;
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::error::{TriageError, TriageResult};
use crate::traits::WhoisSource;
use crate::types::WhoisRecord;

/// TLD to WHOIS server map, same layout as the node-whois `servers.json`.
const WHOIS_SERVERS: &str = include_str!("whois_servers.json");

const REGISTRAR_PATTERNS: &[&str] = &[
    r"(?i)Registrar:\s*(.+)",
    r"(?i)Registrar Name:\s*(.+)",
    r"(?i)Sponsoring Registrar:\s*(.+)",
];

const REGISTRANT_PATTERNS: &[&str] = &[
    r"(?i)Registrant Name:\s*(.+)",
    r"(?i)Registrant Organization:\s*(.+)",
    r"(?i)Registrant:\s*(.+)",
];

const DOMAIN_PATTERNS: &[&str] = &[r"(?i)Domain Name:\s*(.+)", r"(?im)^domain:\s*(.+)"];

const CREATION_PATTERNS: &[&str] = &[
    r"(?i)Creation Date:\s*(.+)",
    r"(?i)Created On:\s*(.+)",
    r"(?i)Created:\s*(.+)",
    r"(?i)Registration Time:\s*(.+)",
    r"(?i)Registered on:\s*(.+)",
];

const EXPIRATION_PATTERNS: &[&str] = &[
    r"(?i)Registry Expiry Date:\s*(.+)",
    r"(?i)Expiration Date:\s*(.+)",
    r"(?i)Expiry Date:\s*(.+)",
    r"(?i)Expiration Time:\s*(.+)",
    r"(?i)Expires On:\s*(.+)",
    r"(?i)Expires:\s*(.+)",
    r"(?i)paid-till:\s*(.+)",
];

const UPDATED_PATTERNS: &[&str] = &[
    r"(?i)Updated Date:\s*(.+)",
    r"(?i)Last Updated:\s*(.+)",
    r"(?i)Last Modified:\s*(.+)",
    r"(?im)^changed:\s*(.+)",
];

const STATUS_PATTERNS: &[&str] = &[
    r"(?i)Domain Status:\s*(.+)",
    r"(?i)Status:\s*(.+)",
    r"(?im)^state:\s*(.+)",
];

const NAME_SERVER_PATTERNS: &[&str] = &[
    r"(?i)Name Server:\s*(.+)",
    r"(?i)Nameserver:\s*(.+)",
    r"(?im)^nserver:\s*(.+)",
];

/// Date layouts seen across registry responses, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%Y.%m.%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%b %d %Y",
];

/// WHOIS source backed by real registry servers.
pub struct RegistryWhoisClient {
    whois: WhoIs,
    timeout: Duration,
}

impl RegistryWhoisClient {
    /// Build a client over the embedded server map.
    pub fn new(timeout: Duration) -> TriageResult<Self> {
        let whois = WhoIs::from_string(WHOIS_SERVERS).map_err(|e| {
            TriageError::UpstreamMalformed(format!("Failed to load WHOIS server map: {e}"))
        })?;
        Ok(Self { whois, timeout })
    }
}

#[async_trait]
impl WhoisSource for RegistryWhoisClient {
    async fn lookup(&self, domain: &str) -> TriageResult<WhoisRecord> {
        let mut options = WhoIsLookupOptions::from_string(domain)
            .map_err(|e| TriageError::InputInvalid(format!("Invalid WHOIS target: {e}")))?;
        options.timeout = Some(self.timeout);

        debug!("[WHOIS] querying registry for {domain}");
        let raw = self
            .whois
            .lookup_async(options)
            .await
            .map_err(|e| TriageError::UpstreamUnavailable(format!("WHOIS query failed: {e}")))?;

        if raw.trim().is_empty() {
            return Err(TriageError::UpstreamMalformed(
                "WHOIS server returned an empty response".to_string(),
            ));
        }

        debug!("[WHOIS] {domain}: received {} bytes", raw.len());
        Ok(parse_whois_response(&raw))
    }
}

/// Extract structured fields from a raw registry response.
fn parse_whois_response(raw: &str) -> WhoisRecord {
    WhoisRecord {
        domain: extract_field(raw, DOMAIN_PATTERNS).map(|d| d.to_lowercase()),
        registrar: extract_field(raw, REGISTRAR_PATTERNS),
        registrant: extract_registrant(raw),
        creation_dates: extract_dates(raw, CREATION_PATTERNS),
        updated_dates: extract_dates(raw, UPDATED_PATTERNS),
        expiration_dates: extract_dates(raw, EXPIRATION_PATTERNS),
        statuses: extract_statuses(raw),
        name_servers: extract_name_servers(raw),
        raw: raw.to_string(),
    }
}

/// First non-empty capture across the given patterns.
fn extract_field(text: &str, patterns: &[&str]) -> Option<String> {
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(captures) = re.captures(text) {
                if let Some(matched) = captures.get(1) {
                    let value = matched.as_str().trim().to_string();
                    if !value.is_empty() {
                        return Some(value);
                    }
                }
            }
        }
    }
    None
}

/// Registrant name or organization, dropped entirely when the registry
/// redacts it for privacy.
fn extract_registrant(text: &str) -> Option<String> {
    let value = extract_field(text, REGISTRANT_PATTERNS)?;
    if value.to_lowercase().contains("redacted") {
        None
    } else {
        Some(value)
    }
}

/// All parseable dates matched by the given patterns, deduplicated.
fn extract_dates(text: &str, patterns: &[&str]) -> Vec<DateTime<Utc>> {
    let mut dates = Vec::new();
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            for captures in re.captures_iter(text) {
                if let Some(matched) = captures.get(1) {
                    if let Some(parsed) = parse_date(matched.as_str()) {
                        if !dates.contains(&parsed) {
                            dates.push(parsed);
                        }
                    }
                }
            }
        }
    }
    dates
}

/// Status lines in full, including the ICANN EPP reference URL when the
/// registry appends one.
fn extract_statuses(text: &str) -> Vec<String> {
    let mut statuses = Vec::new();
    for pattern in STATUS_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            for captures in re.captures_iter(text) {
                if let Some(matched) = captures.get(1) {
                    let status = matched.as_str().trim().to_string();
                    if !status.is_empty() && !statuses.contains(&status) {
                        statuses.push(status);
                    }
                }
            }
        }
    }
    statuses
}

fn extract_name_servers(text: &str) -> Vec<String> {
    let mut servers = Vec::new();
    for pattern in NAME_SERVER_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            for captures in re.captures_iter(text) {
                if let Some(matched) = captures.get(1) {
                    let server = matched
                        .as_str()
                        .trim()
                        .trim_end_matches('.')
                        .to_lowercase();
                    if !server.is_empty() && !servers.contains(&server) {
                        servers.push(server);
                    }
                }
            }
        }
    }
    servers
}

/// Parse one date value, trying RFC 3339 first and then the known
/// registry layouts.
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let cleaned = value
        .trim()
        .trim_end_matches(" UTC")
        .trim_end_matches(" GMT")
        .to_string();
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&cleaned, format) {
            return Some(parsed.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(&cleaned, format) {
            if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
                return Some(midnight.and_utc());
            }
        }
    }

    None
}
