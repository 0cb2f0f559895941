//! DNS-over-HTTPS resolver client.

use async_trait::async_trait;
use log::{debug, trace};
use serde::Deserialize;

use crate::error::{TriageError, TriageResult};
use crate::traits::RecordResolver;
use crate::types::{RecordSet, RecordType, RecordValue};

/// Response structure from a Google-format DoH JSON endpoint.
#[derive(Deserialize)]
struct DohResponse {
    #[serde(rename = "Status")]
    status: u32,
    #[serde(rename = "Answer")]
    answer: Option<Vec<DohAnswer>>,
}

#[derive(Deserialize)]
struct DohAnswer {
    data: String,
    #[serde(rename = "TTL")]
    ttl: Option<u32>,
}

/// Resolver client speaking the Google DoH JSON API
/// (`GET {endpoint}?name={name}&type={type}`).
pub struct DohResolver {
    endpoint: String,
    client: reqwest::Client,
}

impl DohResolver {
    pub fn new(endpoint: String, client: reqwest::Client) -> Self {
        Self { endpoint, client }
    }
}

/// Convert a decoded DoH response into a [`RecordSet`].
///
/// TXT answer data arrives quoted (`"v=spf1 ..."`); surrounding quotes are
/// stripped here so downstream classification sees clean values.
fn to_record_set(record_type: RecordType, response: DohResponse) -> RecordSet {
    let answers = response
        .answer
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            let data = if record_type == RecordType::Txt {
                entry.data.trim_matches('"').to_string()
            } else {
                entry.data
            };
            RecordValue {
                data,
                ttl: entry.ttl,
            }
        })
        .collect();

    RecordSet {
        record_type,
        status: response.status,
        answers,
    }
}

#[async_trait]
impl RecordResolver for DohResolver {
    async fn resolve(&self, name: &str, record_type: RecordType) -> TriageResult<RecordSet> {
        let url = format!("{}?name={name}&type={record_type}", self.endpoint);
        trace!("[DNS] GET {url}");

        let response: DohResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TriageError::UpstreamUnavailable(format!("DNS query timed out: {e}"))
                } else {
                    TriageError::UpstreamUnavailable(format!("DNS query failed: {e}"))
                }
            })?
            .error_for_status()
            .map_err(|e| {
                TriageError::UpstreamUnavailable(format!("DNS resolver rejected the query: {e}"))
            })?
            .json()
            .await
            .map_err(|e| {
                TriageError::UpstreamMalformed(format!("Failed to decode DNS response: {e}"))
            })?;

        let set = to_record_set(record_type, response);
        debug!(
            "[DNS] {name} {record_type}: status={}, {} answer(s)",
            set.status,
            set.answers.len()
        );
        Ok(set)
    }
}
