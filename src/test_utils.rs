//! Test helpers.
//!
//! Mock implementations of the outbound traits plus factory methods for
//! wiring a `TriageService` against them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::config::TriageConfig;
use crate::error::{TriageError, TriageResult};
use crate::services::TriageService;
use crate::traits::{GeoProvider, RecordResolver, WhoisSource};
use crate::types::{
    GeoInfo, GeoProviderKind, RecordSet, RecordType, RecordValue, WhoisRecord, STATUS_NXDOMAIN,
};

// ===== MockRecordResolver =====

pub struct MockRecordResolver {
    answers: RwLock<HashMap<(String, RecordType), RecordSet>>,
    /// Per-type error messages; a scripted entry makes that query fail
    /// with `UpstreamUnavailable`.
    errors: RwLock<HashMap<RecordType, String>>,
    calls: AtomicUsize,
}

impl MockRecordResolver {
    pub fn new() -> Self {
        Self {
            answers: RwLock::new(HashMap::new()),
            errors: RwLock::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Script a NOERROR answer set for one name and record type.
    pub async fn script(&self, name: &str, record_type: RecordType, data: &[&str]) {
        let answers = data
            .iter()
            .map(|d| RecordValue {
                data: (*d).to_string(),
                ttl: Some(300),
            })
            .collect();
        self.answers.write().await.insert(
            (name.to_string(), record_type),
            RecordSet {
                record_type,
                status: 0,
                answers,
            },
        );
    }

    /// Script an NXDOMAIN reply for one name and record type.
    pub async fn script_nxdomain(&self, name: &str, record_type: RecordType) {
        self.answers.write().await.insert(
            (name.to_string(), record_type),
            RecordSet {
                record_type,
                status: STATUS_NXDOMAIN,
                answers: Vec::new(),
            },
        );
    }

    pub async fn set_error(&self, record_type: RecordType, message: &str) {
        self.errors
            .write()
            .await
            .insert(record_type, message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordResolver for MockRecordResolver {
    async fn resolve(&self, name: &str, record_type: RecordType) -> TriageResult<RecordSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.errors.read().await.get(&record_type) {
            return Err(TriageError::UpstreamUnavailable(message.clone()));
        }
        Ok(self
            .answers
            .read()
            .await
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_else(|| RecordSet {
                record_type,
                status: 0,
                answers: Vec::new(),
            }))
    }
}

// ===== MockWhoisSource =====

pub struct MockWhoisSource {
    record: RwLock<Option<WhoisRecord>>,
    error: RwLock<Option<String>>,
    calls: AtomicUsize,
}

impl MockWhoisSource {
    pub fn new() -> Self {
        Self {
            record: RwLock::new(None),
            error: RwLock::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_record(&self, record: WhoisRecord) {
        *self.record.write().await = Some(record);
    }

    /// Make lookups fail with `UpstreamUnavailable`.
    pub async fn set_error(&self, message: &str) {
        *self.error.write().await = Some(message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WhoisSource for MockWhoisSource {
    async fn lookup(&self, _domain: &str) -> TriageResult<WhoisRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.error.read().await.as_ref() {
            return Err(TriageError::UpstreamUnavailable(message.clone()));
        }
        // Unscripted lookups behave like a registry "no match" reply.
        Ok(self
            .record
            .read()
            .await
            .clone()
            .unwrap_or_else(|| WhoisRecord {
                domain: None,
                registrar: None,
                registrant: None,
                creation_dates: Vec::new(),
                updated_dates: Vec::new(),
                expiration_dates: Vec::new(),
                statuses: Vec::new(),
                name_servers: Vec::new(),
                raw: "No match for domain.".to_string(),
            }))
    }
}

// ===== MockGeoProvider =====

pub struct MockGeoProvider {
    info: RwLock<Option<GeoInfo>>,
    error: RwLock<Option<String>>,
    calls: AtomicUsize,
}

impl MockGeoProvider {
    pub fn new() -> Self {
        Self {
            info: RwLock::new(None),
            error: RwLock::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_info(&self, info: GeoInfo) {
        *self.info.write().await = Some(info);
    }

    /// Make lookups fail with `UpstreamUnavailable`.
    pub async fn set_error(&self, message: &str) {
        *self.error.write().await = Some(message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoProvider for MockGeoProvider {
    async fn lookup(&self, _ip: &str) -> TriageResult<(GeoInfo, GeoProviderKind)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.error.read().await.as_ref() {
            return Err(TriageError::UpstreamUnavailable(message.clone()));
        }
        match self.info.read().await.clone() {
            Some(info) => Ok((info, GeoProviderKind::Primary)),
            None => Err(TriageError::UpstreamUnavailable(
                "no geolocation data scripted".to_string(),
            )),
        }
    }
}

// ===== Factory methods =====

/// Create a `TriageService` wired to fresh mocks.
pub fn create_test_service() -> (
    TriageService,
    Arc<MockRecordResolver>,
    Arc<MockWhoisSource>,
    Arc<MockGeoProvider>,
) {
    let resolver = Arc::new(MockRecordResolver::new());
    let whois = Arc::new(MockWhoisSource::new());
    let geo = Arc::new(MockGeoProvider::new());
    let service = TriageService::with_clients(
        TriageConfig::default(),
        resolver.clone(),
        whois.clone(),
        geo.clone(),
    );
    (service, resolver, whois, geo)
}

/// A registered-domain WHOIS record expiring the given number of days
/// from now.
pub fn test_whois_record(domain: &str, days_until_expiry: i64) -> WhoisRecord {
    WhoisRecord {
        domain: Some(domain.to_string()),
        registrar: Some("Example Registrar, Inc.".to_string()),
        registrant: None,
        creation_dates: vec![Utc::now() - Duration::days(3650)],
        updated_dates: vec![Utc::now() - Duration::days(30)],
        expiration_dates: vec![Utc::now() + Duration::days(days_until_expiry)],
        statuses: vec!["ok https://icann.org/epp#ok".to_string()],
        name_servers: vec![
            format!("ns1.{domain}"),
            format!("ns2.{domain}"),
        ],
        raw: format!("Domain Name: {domain}\n"),
    }
}

/// Geolocation data for a test IP.
pub fn test_geo_info(ip: &str) -> GeoInfo {
    GeoInfo {
        ip: ip.to_string(),
        city: Some("Amsterdam".to_string()),
        region: Some("North Holland".to_string()),
        country: Some("Netherlands".to_string()),
        postal: Some("1012".to_string()),
        latitude: Some(52.37),
        longitude: Some(4.89),
        org: Some("Example Hosting B.V.".to_string()),
        timezone: Some("Europe/Amsterdam".to_string()),
        asn: Some("AS64496".to_string()),
    }
}
