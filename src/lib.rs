//! Domain triage toolkit for first-line hosting support
//!
//! Answers the three questions behind most "my site is down" tickets:
//! does the domain resolve and is its DNS sane ([`TriageService::evaluate_health`]),
//! is the TLS certificate valid ([`TriageService::check_certificate`]),
//! and where does an IP actually point ([`TriageService::lookup_ip`]).
//! Everything is read-only: the service fans out to public resolvers,
//! registries, and geolocation providers, then classifies the answers
//! into findings a support agent can paste into a ticket.

mod clients;
mod config;
mod error;
mod services;
mod traits;
mod types;

#[cfg(test)]
mod test_utils;

pub use clients::{DohResolver, GeoProviderChain, RegistryWhoisClient};
pub use config::TriageConfig;
pub use error::{TriageError, TriageResult};
pub use services::TriageService;
pub use traits::{GeoProvider, RecordResolver, WhoisSource};
pub use types::{
    CertReport, CertificateInfo, CheckName, DnsReport, Finding, GeoInfo, GeoProviderKind,
    GeoReport, HealthReport, MailExchangeEntry, MxEntry, NameserverEntry, RecordSet, RecordType,
    RecordValue, Severity, SoaFields, TlsFailureKind, TxtEntry, TxtKind, WhoisRecord,
    STATUS_NXDOMAIN,
};
