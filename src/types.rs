//! Public types returned by triage operations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// DNS record type used by the health evaluator and the record analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Name server record.
    Ns,
    /// Start of authority record.
    Soa,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
            Self::Ns => write!(f, "NS"),
            Self::Soa => write!(f, "SOA"),
            Self::Mx => write!(f, "MX"),
            Self::Txt => write!(f, "TXT"),
        }
    }
}

/// A single answer entry from one DNS lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordValue {
    /// Raw record data as returned by the resolver.
    pub data: String,
    /// Time-to-live in seconds, when the resolver reported one.
    pub ttl: Option<u32>,
}

/// Resolver response status for definitive non-existence (NXDOMAIN).
pub const STATUS_NXDOMAIN: u32 = 3;

/// The result of one DNS lookup for one record type.
///
/// An empty `answers` list with a zero status is a valid, meaningful state
/// ("no records of this type") — distinct from a transport failure, which is
/// an error at the client boundary and never produces a `RecordSet`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    /// Record type that was queried.
    pub record_type: RecordType,
    /// Raw resolver status code (0 = NOERROR, 3 = NXDOMAIN).
    pub status: u32,
    /// Answer entries in resolver response order.
    pub answers: Vec<RecordValue>,
}

impl RecordSet {
    /// Whether the resolver reported definitive non-existence.
    #[must_use]
    pub fn is_nxdomain(&self) -> bool {
        self.status == STATUS_NXDOMAIN
    }

    /// Whether the lookup returned at least one answer.
    #[must_use]
    pub fn has_answers(&self) -> bool {
        !self.answers.is_empty()
    }
}

/// Severity of a single classified observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Pass,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Warning => write!(f, "warning"),
            Self::Pass => write!(f, "pass"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// The check that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckName {
    /// A/AAAA resolution check.
    Resolution,
    /// NS redundancy check.
    Nameservers,
    /// SOA presence check.
    Soa,
    /// MX presence and ordering check.
    Mail,
    /// TXT / email-policy (SPF, DKIM, DMARC) check.
    Txt,
    /// WHOIS registration check.
    Whois,
    /// TLS certificate check.
    Certificate,
    /// IP geolocation lookup.
    Geolocation,
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution => write!(f, "resolution"),
            Self::Nameservers => write!(f, "nameservers"),
            Self::Soa => write!(f, "soa"),
            Self::Mail => write!(f, "mail"),
            Self::Txt => write!(f, "txt"),
            Self::Whois => write!(f, "whois"),
            Self::Certificate => write!(f, "certificate"),
            Self::Geolocation => write!(f, "geolocation"),
        }
    }
}

/// One classified observation from a check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Originating check.
    pub check: CheckName,
    /// Classification severity.
    pub severity: Severity,
    /// Plain-language message for the support agent.
    pub message: String,
    /// Manual-lookup fallback URL, set when the automated path failed.
    pub hint: Option<String>,
}

impl Finding {
    /// Create a finding without a fallback hint.
    pub fn new(check: CheckName, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            check,
            severity,
            message: message.into(),
            hint: None,
        }
    }

    /// Create a finding carrying a manual-lookup fallback URL.
    pub fn with_hint(
        check: CheckName,
        severity: Severity,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            check,
            severity,
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// Aggregate result of a domain health evaluation.
///
/// `healthy` holds iff both `issues` and `warnings` are empty; passes and
/// info notes never affect the verdict. Within each bucket, findings keep
/// the order the checks ran in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Normalized domain that was evaluated.
    pub domain: String,
    /// Critical findings.
    pub issues: Vec<Finding>,
    /// Warning findings.
    pub warnings: Vec<Finding>,
    /// Passed checks.
    pub successes: Vec<Finding>,
    /// Informational notes (display only).
    pub notes: Vec<Finding>,
    /// Overall verdict.
    pub healthy: bool,
}

impl HealthReport {
    /// Bucket findings by severity, preserving emission order, and derive
    /// the overall verdict.
    #[must_use]
    pub fn from_findings(domain: String, findings: Vec<Finding>) -> Self {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();
        let mut successes = Vec::new();
        let mut notes = Vec::new();

        for finding in findings {
            match finding.severity {
                Severity::Critical => issues.push(finding),
                Severity::Warning => warnings.push(finding),
                Severity::Pass => successes.push(finding),
                Severity::Info => notes.push(finding),
            }
        }

        let healthy = issues.is_empty() && warnings.is_empty();
        Self {
            domain,
            issues,
            warnings,
            successes,
            notes,
            healthy,
        }
    }
}

/// A parsed MX record: numeric priority prefix plus exchanger host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MxEntry {
    /// Preference value (lower is tried first).
    pub priority: u16,
    /// Mail exchanger hostname, trailing dot removed.
    pub exchange: String,
}

impl MxEntry {
    /// Parse `"10 mail.example.com."` into an entry. Returns `None` when the
    /// data has no numeric priority prefix or no exchanger.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        let mut parts = data.split_whitespace();
        let priority = parts.next()?.parse::<u16>().ok()?;
        let exchange = parts.next()?.trim_end_matches('.').to_string();
        if exchange.is_empty() {
            return None;
        }
        Some(Self { priority, exchange })
    }

    /// Sort entries by ascending priority. The sort is stable: entries with
    /// equal priority keep resolver response order.
    pub fn sort_by_priority(entries: &mut [Self]) {
        entries.sort_by_key(|entry| entry.priority);
    }
}

/// Classification of a TXT record value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxtKind {
    /// Sender Policy Framework record (`v=spf1` prefix).
    Spf,
    /// DMARC policy record (`v=DMARC1` prefix).
    Dmarc,
    /// DKIM key record (contains `dkim`, case-insensitive).
    Dkim,
    /// Any other TXT record.
    Other,
}

impl TxtKind {
    /// Classify a TXT record value by prefix/content.
    #[must_use]
    pub fn classify(value: &str) -> Self {
        if value.starts_with("v=spf1") {
            Self::Spf
        } else if value.starts_with("v=DMARC1") {
            Self::Dmarc
        } else if value.to_lowercase().contains("dkim") {
            Self::Dkim
        } else {
            Self::Other
        }
    }
}

/// A TXT record with its classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxtEntry {
    /// Record value, surrounding quotes removed.
    pub value: String,
    /// Classification.
    pub kind: TxtKind,
    /// Time-to-live in seconds.
    pub ttl: Option<u32>,
}

/// Parsed SOA record sub-fields (display only — never classified).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoaFields {
    /// Primary nameserver (mname), trailing dot removed.
    pub primary_ns: String,
    /// Responsible party, rname rewritten to mailbox form
    /// (first `.` becomes `@`).
    pub responsible_email: String,
    /// Zone serial number.
    pub serial: u32,
    /// Refresh interval in seconds.
    pub refresh: u32,
    /// Retry interval in seconds.
    pub retry: u32,
    /// Expire limit in seconds.
    pub expire: u32,
    /// Minimum / negative-caching TTL in seconds.
    pub minimum_ttl: u32,
}

impl SoaFields {
    /// Parse the seven space-separated SOA fields from resolver data.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        let parts: Vec<&str> = data.split_whitespace().collect();
        if parts.len() < 7 {
            return None;
        }
        Some(Self {
            primary_ns: parts[0].trim_end_matches('.').to_string(),
            responsible_email: parts[1].replacen('.', "@", 1).trim_end_matches('.').to_string(),
            serial: parts[2].parse().ok()?,
            refresh: parts[3].parse().ok()?,
            retry: parts[4].parse().ok()?,
            expire: parts[5].parse().ok()?,
            minimum_ttl: parts[6].parse().ok()?,
        })
    }
}

/// Normalized WHOIS registration record.
///
/// Registries are inconsistent about single-value vs. list fields; the
/// client adapter always returns lists for dates and statuses so shape
/// tolerance lives in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisRecord {
    /// Domain name field from the registry. `None` means the registry
    /// answered with a "not found" shell.
    pub domain: Option<String>,
    /// Registrar name.
    pub registrar: Option<String>,
    /// Registrant, omitted by the adapter when the registry redacted it.
    pub registrant: Option<String>,
    /// Registration creation timestamps.
    pub creation_dates: Vec<DateTime<Utc>>,
    /// Last-updated timestamps.
    pub updated_dates: Vec<DateTime<Utc>>,
    /// Expiration timestamps.
    pub expiration_dates: Vec<DateTime<Utc>>,
    /// Status lines in registry order, full text (classification reads the
    /// whole line, display uses the first token).
    pub statuses: Vec<String>,
    /// Nameserver hostnames, lowercased and deduplicated.
    pub name_servers: Vec<String>,
    /// Raw registry response for fallback display.
    pub raw: String,
}

/// A nameserver with its resolved IPv4 address, when one could be fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameserverEntry {
    /// Nameserver hostname, trailing dot removed.
    pub host: String,
    /// First A record of the nameserver, when resolvable.
    pub address: Option<String>,
}

/// A mail exchanger with priority, address enrichment, and TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailExchangeEntry {
    /// Preference value (lower is tried first).
    pub priority: u16,
    /// Mail exchanger hostname, trailing dot removed.
    pub exchange: String,
    /// First A record of the exchanger, when resolvable.
    pub address: Option<String>,
    /// Time-to-live in seconds.
    pub ttl: Option<u32>,
}

/// Record-oriented DNS analysis for one domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsReport {
    /// Normalized domain that was analyzed.
    pub domain: String,
    /// Nameservers with address enrichment.
    pub nameservers: Vec<NameserverEntry>,
    /// A records.
    pub a_records: Vec<RecordValue>,
    /// AAAA records.
    pub aaaa_records: Vec<RecordValue>,
    /// Mail exchangers, ascending priority order.
    pub mail_exchanges: Vec<MailExchangeEntry>,
    /// TXT records at the apex, classified.
    pub txt_records: Vec<TxtEntry>,
    /// DMARC record found at the `_dmarc.` subdomain, when the apex had none.
    pub dmarc_record: Option<TxtEntry>,
    /// Parsed SOA sub-fields.
    pub soa: Option<SoaFields>,
}

/// Failure category for a TLS certificate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsFailureKind {
    /// The hostname did not resolve.
    Resolution,
    /// TCP connect timed out.
    Timeout,
    /// TLS negotiation failed (expired, self-signed, name mismatch, or
    /// incomplete chain — the handshake does not discriminate further).
    Negotiation,
    /// Any other failure.
    Other,
}

impl fmt::Display for TlsFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution => write!(f, "resolution"),
            Self::Timeout => write!(f, "timeout"),
            Self::Negotiation => write!(f, "negotiation"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Leaf certificate details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInfo {
    /// Full certificate subject.
    pub subject: String,
    /// Full certificate issuer.
    pub issuer: String,
    /// Subject common name ("issued to").
    pub subject_common_name: Option<String>,
    /// Issuer common name ("issued by").
    pub issuer_common_name: Option<String>,
    /// Issuer organization.
    pub issuer_organization: Option<String>,
    /// Not-before date (RFC 2822).
    pub valid_from: String,
    /// Not-after date (RFC 2822).
    pub valid_to: String,
    /// Days until expiration (negative if expired).
    pub days_remaining: i64,
    /// Whether the certificate has expired.
    pub is_expired: bool,
    /// Subject Alternative Names.
    pub san: Vec<String>,
    /// Serial number (uppercase hex).
    pub serial_number: String,
    /// X.509 version number (3 for v3).
    pub version: u32,
}

/// Result of a TLS certificate check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertReport {
    /// Normalized host that was checked.
    pub domain: String,
    /// Port that was checked.
    pub port: u16,
    /// Certificate details when the handshake succeeded.
    pub certificate: Option<CertificateInfo>,
    /// Failure category when the check failed.
    pub failure: Option<TlsFailureKind>,
    /// Classification finding.
    pub finding: Finding,
}

/// Which geolocation provider answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoProviderKind {
    Primary,
    Fallback,
}

/// Geolocation fields in the common shape shared by both providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoInfo {
    /// Queried IP address.
    pub ip: String,
    /// City name.
    pub city: Option<String>,
    /// Region / province / state.
    pub region: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// Postal code.
    pub postal: Option<String>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// ISP / organization.
    pub org: Option<String>,
    /// IANA timezone identifier.
    pub timezone: Option<String>,
    /// Autonomous system (e.g. `"AS15169 Google LLC"`).
    pub asn: Option<String>,
}

/// Result of an IP geolocation lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoReport {
    /// Queried IP address.
    pub ip: String,
    /// Location data when a provider answered.
    pub info: Option<GeoInfo>,
    /// Provider that answered.
    pub provider: Option<GeoProviderKind>,
    /// Classification finding.
    pub finding: Finding,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== RecordType tests ====================

    #[test]
    fn test_record_type_display() {
        assert_eq!(RecordType::A.to_string(), "A");
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
        assert_eq!(RecordType::Ns.to_string(), "NS");
        assert_eq!(RecordType::Soa.to_string(), "SOA");
        assert_eq!(RecordType::Mx.to_string(), "MX");
        assert_eq!(RecordType::Txt.to_string(), "TXT");
    }

    #[test]
    fn test_record_type_serde_uppercase() {
        assert_eq!(serde_json::to_string(&RecordType::Aaaa).unwrap(), "\"AAAA\"");
        let parsed: RecordType = serde_json::from_str("\"MX\"").unwrap();
        assert_eq!(parsed, RecordType::Mx);
    }

    // ==================== RecordSet tests ====================

    #[test]
    fn test_record_set_nxdomain() {
        let set = RecordSet {
            record_type: RecordType::A,
            status: 3,
            answers: vec![],
        };
        assert!(set.is_nxdomain());
        assert!(!set.has_answers());
    }

    #[test]
    fn test_record_set_empty_noerror_is_not_nxdomain() {
        let set = RecordSet {
            record_type: RecordType::Mx,
            status: 0,
            answers: vec![],
        };
        assert!(!set.is_nxdomain());
        assert!(!set.has_answers());
    }

    // ==================== Finding / HealthReport tests ====================

    #[test]
    fn test_finding_camel_case_serialization() {
        let finding = Finding::with_hint(
            CheckName::Whois,
            Severity::Warning,
            "WHOIS data unavailable",
            "https://who.is/whois/example.com",
        );
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["check"], "whois");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["hint"], "https://who.is/whois/example.com");
    }

    #[test]
    fn test_health_report_bucketing_preserves_order() {
        let findings = vec![
            Finding::new(CheckName::Resolution, Severity::Pass, "resolving"),
            Finding::new(CheckName::Nameservers, Severity::Critical, "no nameservers"),
            Finding::new(CheckName::Soa, Severity::Warning, "no SOA"),
            Finding::new(CheckName::Mail, Severity::Warning, "no MX"),
            Finding::new(CheckName::Whois, Severity::Critical, "expired"),
        ];
        let report = HealthReport::from_findings("example.com".to_string(), findings);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues[0].check, CheckName::Nameservers);
        assert_eq!(report.issues[1].check, CheckName::Whois);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0].check, CheckName::Soa);
        assert_eq!(report.successes.len(), 1);
        assert!(!report.healthy);
    }

    #[test]
    fn test_health_report_healthy_iff_no_issues_or_warnings() {
        let report = HealthReport::from_findings(
            "example.com".to_string(),
            vec![
                Finding::new(CheckName::Resolution, Severity::Pass, "ok"),
                Finding::new(CheckName::Nameservers, Severity::Info, "note"),
            ],
        );
        assert!(report.healthy);

        let report = HealthReport::from_findings(
            "example.com".to_string(),
            vec![Finding::new(CheckName::Soa, Severity::Warning, "no SOA")],
        );
        assert!(!report.healthy);
    }

    #[test]
    fn test_health_report_serialization() {
        let report = HealthReport::from_findings("example.com".to_string(), vec![]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["domain"], "example.com");
        assert_eq!(json["healthy"], true);
        assert!(json["issues"].as_array().unwrap().is_empty());
    }

    // ==================== MxEntry tests ====================

    #[test]
    fn test_mx_entry_parse() {
        let entry = MxEntry::parse("10 mail.example.com.").unwrap();
        assert_eq!(entry.priority, 10);
        assert_eq!(entry.exchange, "mail.example.com");
    }

    #[test]
    fn test_mx_entry_parse_no_priority() {
        assert!(MxEntry::parse("mail.example.com").is_none());
        assert!(MxEntry::parse("").is_none());
        assert!(MxEntry::parse("10").is_none());
    }

    #[test]
    fn test_mx_sort_ascending() {
        let mut entries = vec![
            MxEntry {
                priority: 20,
                exchange: "b.example.com".to_string(),
            },
            MxEntry {
                priority: 10,
                exchange: "a.example.com".to_string(),
            },
        ];
        MxEntry::sort_by_priority(&mut entries);
        assert_eq!(entries[0].exchange, "a.example.com");
        assert_eq!(entries[1].exchange, "b.example.com");
    }

    #[test]
    fn test_mx_sort_stable_for_ties() {
        let mut entries = vec![
            MxEntry {
                priority: 10,
                exchange: "first.example.com".to_string(),
            },
            MxEntry {
                priority: 5,
                exchange: "top.example.com".to_string(),
            },
            MxEntry {
                priority: 10,
                exchange: "second.example.com".to_string(),
            },
        ];
        MxEntry::sort_by_priority(&mut entries);
        assert_eq!(entries[0].exchange, "top.example.com");
        assert_eq!(entries[1].exchange, "first.example.com");
        assert_eq!(entries[2].exchange, "second.example.com");
    }

    // ==================== TxtKind tests ====================

    #[test]
    fn test_txt_classify_spf() {
        assert_eq!(
            TxtKind::classify("v=spf1 include:_spf.example.com ~all"),
            TxtKind::Spf
        );
    }

    #[test]
    fn test_txt_classify_dmarc() {
        assert_eq!(
            TxtKind::classify("v=DMARC1; p=reject; rua=mailto:d@example.com"),
            TxtKind::Dmarc
        );
    }

    #[test]
    fn test_txt_classify_dmarc_requires_version_tag() {
        // "v=DMARC" without the version digit is not a DMARC policy record
        assert_eq!(TxtKind::classify("v=DMARC; p=none"), TxtKind::Other);
    }

    #[test]
    fn test_txt_classify_dkim_case_insensitive() {
        assert_eq!(TxtKind::classify("v=DKIM1; k=rsa; p=MIGf"), TxtKind::Dkim);
        assert_eq!(TxtKind::classify("selector._DKIM key"), TxtKind::Dkim);
    }

    #[test]
    fn test_txt_classify_other() {
        assert_eq!(
            TxtKind::classify("google-site-verification=abc123"),
            TxtKind::Other
        );
    }

    // ==================== SoaFields tests ====================

    #[test]
    fn test_soa_parse_full() {
        let soa = SoaFields::parse(
            "ns1.example.com. hostmaster.example.com. 2024082501 7200 3600 1209600 3600",
        )
        .unwrap();
        assert_eq!(soa.primary_ns, "ns1.example.com");
        assert_eq!(soa.responsible_email, "hostmaster@example.com");
        assert_eq!(soa.serial, 2_024_082_501);
        assert_eq!(soa.refresh, 7200);
        assert_eq!(soa.retry, 3600);
        assert_eq!(soa.expire, 1_209_600);
        assert_eq!(soa.minimum_ttl, 3600);
    }

    #[test]
    fn test_soa_parse_email_rewrites_first_dot_only() {
        let soa =
            SoaFields::parse("ns1.test. admin.mail.example.com. 1 2 3 4 5").unwrap();
        assert_eq!(soa.responsible_email, "admin@mail.example.com");
    }

    #[test]
    fn test_soa_parse_too_few_fields() {
        assert!(SoaFields::parse("ns1.example.com. hostmaster.example.com.").is_none());
        assert!(SoaFields::parse("").is_none());
    }

    #[test]
    fn test_soa_parse_non_numeric_field() {
        assert!(SoaFields::parse("ns1.test. admin.test. abc 2 3 4 5").is_none());
    }

    // ==================== serialization tests ====================

    #[test]
    fn test_whois_record_camel_case_serialization() {
        let record = WhoisRecord {
            domain: Some("example.com".to_string()),
            registrar: Some("Test Registrar".to_string()),
            registrant: None,
            creation_dates: vec![],
            updated_dates: vec![],
            expiration_dates: vec![],
            statuses: vec!["ok".to_string()],
            name_servers: vec!["ns1.example.com".to_string()],
            raw: "raw data".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("creationDates").is_some());
        assert!(json.get("expirationDates").is_some());
        assert!(json.get("nameServers").is_some());
        assert_eq!(json["registrar"], "Test Registrar");
    }

    #[test]
    fn test_dns_report_serialization() {
        let report = DnsReport {
            domain: "example.com".to_string(),
            nameservers: vec![NameserverEntry {
                host: "ns1.example.com".to_string(),
                address: Some("192.0.2.1".to_string()),
            }],
            a_records: vec![RecordValue {
                data: "192.0.2.10".to_string(),
                ttl: Some(300),
            }],
            aaaa_records: vec![],
            mail_exchanges: vec![MailExchangeEntry {
                priority: 10,
                exchange: "mail.example.com".to_string(),
                address: None,
                ttl: Some(3600),
            }],
            txt_records: vec![],
            dmarc_record: None,
            soa: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["nameservers"][0]["address"], "192.0.2.1");
        assert_eq!(json["aRecords"][0]["ttl"], 300);
        assert_eq!(json["mailExchanges"][0]["priority"], 10);
        assert_eq!(json["dmarcRecord"], serde_json::Value::Null);
    }

    #[test]
    fn test_cert_report_serialization() {
        let report = CertReport {
            domain: "example.com".to_string(),
            port: 443,
            certificate: None,
            failure: Some(TlsFailureKind::Timeout),
            finding: Finding::new(
                CheckName::Certificate,
                Severity::Warning,
                "Connection timed out",
            ),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failure"], "timeout");
        assert_eq!(json["certificate"], serde_json::Value::Null);
        assert_eq!(json["finding"]["check"], "certificate");
    }

    #[test]
    fn test_geo_report_serialization() {
        let report = GeoReport {
            ip: "8.8.8.8".to_string(),
            info: Some(GeoInfo {
                ip: "8.8.8.8".to_string(),
                city: Some("Mountain View".to_string()),
                region: Some("California".to_string()),
                country: Some("United States".to_string()),
                postal: Some("94043".to_string()),
                latitude: Some(37.422),
                longitude: Some(-122.084),
                org: Some("Google LLC".to_string()),
                timezone: Some("America/Los_Angeles".to_string()),
                asn: Some("AS15169".to_string()),
            }),
            provider: Some(GeoProviderKind::Primary),
            finding: Finding::new(CheckName::Geolocation, Severity::Pass, "found"),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["provider"], "primary");
        assert_eq!(json["info"]["city"], "Mountain View");
        assert_eq!(json["info"]["asn"], "AS15169");
    }

    #[test]
    fn test_severity_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        assert_eq!(serde_json::to_string(&Severity::Pass).unwrap(), "\"pass\"");
    }

    #[test]
    fn test_tls_failure_kind_serde() {
        assert_eq!(
            serde_json::to_string(&TlsFailureKind::Negotiation).unwrap(),
            "\"negotiation\""
        );
    }
}
