//! IP geolocation provider chain.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{TriageError, TriageResult};
use crate::traits::GeoProvider;
use crate::types::{GeoInfo, GeoProviderKind};

/// Response structure from the primary provider (ipapi.co format).
#[derive(Deserialize)]
struct PrimaryGeoResponse {
    error: Option<bool>,
    reason: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
    postal: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    org: Option<String>,
    timezone: Option<String>,
    asn: Option<String>,
}

/// Response structure from the fallback provider (ip-api.com format).
///
/// Field names differ from the primary schema and are remapped into the
/// common [`GeoInfo`] shape.
#[derive(Deserialize)]
struct FallbackGeoResponse {
    status: String,
    message: Option<String>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
    zip: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    isp: Option<String>,
    timezone: Option<String>,
    #[serde(rename = "as")]
    autonomous_system: Option<String>,
}

/// Map a decoded primary-provider body into the common shape.
///
/// A body with `error: true` is an upstream failure, which makes the
/// chain move on to the fallback provider.
fn map_primary(ip: &str, response: PrimaryGeoResponse) -> TriageResult<GeoInfo> {
    if response.error.unwrap_or(false) {
        let reason = response
            .reason
            .unwrap_or_else(|| "unspecified error".to_string());
        return Err(TriageError::UpstreamUnavailable(format!(
            "Provider reported an error: {reason}"
        )));
    }
    Ok(GeoInfo {
        ip: ip.to_string(),
        city: response.city,
        region: response.region,
        country: response.country_name,
        postal: response.postal,
        latitude: response.latitude,
        longitude: response.longitude,
        org: response.org,
        timezone: response.timezone,
        asn: response.asn,
    })
}

/// Map a decoded fallback-provider body, remapping its field names into
/// the common shape. Any `status` other than `"success"` is a failure.
fn map_fallback(ip: &str, response: FallbackGeoResponse) -> TriageResult<GeoInfo> {
    if response.status != "success" {
        let message = response
            .message
            .unwrap_or_else(|| "unspecified error".to_string());
        return Err(TriageError::UpstreamUnavailable(format!(
            "Provider reported a failure: {message}"
        )));
    }
    Ok(GeoInfo {
        ip: ip.to_string(),
        city: response.city,
        region: response.region_name,
        country: response.country,
        postal: response.zip,
        latitude: response.lat,
        longitude: response.lon,
        org: response.isp,
        timezone: response.timezone,
        asn: response.autonomous_system,
    })
}

/// Geolocation client querying the primary provider first and falling back
/// to the secondary provider on any transport error or provider-reported
/// error flag.
pub struct GeoProviderChain {
    primary_endpoint: String,
    fallback_endpoint: String,
    client: reqwest::Client,
}

impl GeoProviderChain {
    pub fn new(
        primary_endpoint: String,
        fallback_endpoint: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            primary_endpoint,
            fallback_endpoint,
            client,
        }
    }

    async fn lookup_primary(&self, ip: &str) -> TriageResult<GeoInfo> {
        let url = format!("{}/{ip}/json/", self.primary_endpoint);
        let response: PrimaryGeoResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TriageError::UpstreamUnavailable(format!("Request failed: {e}")))?
            .error_for_status()
            .map_err(|e| TriageError::UpstreamUnavailable(format!("Provider rejected: {e}")))?
            .json()
            .await
            .map_err(|e| TriageError::UpstreamMalformed(format!("Failed to decode response: {e}")))?;
        map_primary(ip, response)
    }

    async fn lookup_fallback(&self, ip: &str) -> TriageResult<GeoInfo> {
        let url = format!("{}/json/{ip}", self.fallback_endpoint);
        let response: FallbackGeoResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TriageError::UpstreamUnavailable(format!("Request failed: {e}")))?
            .error_for_status()
            .map_err(|e| TriageError::UpstreamUnavailable(format!("Provider rejected: {e}")))?
            .json()
            .await
            .map_err(|e| TriageError::UpstreamMalformed(format!("Failed to decode response: {e}")))?;
        map_fallback(ip, response)
    }
}

#[async_trait]
impl GeoProvider for GeoProviderChain {
    async fn lookup(&self, ip: &str) -> TriageResult<(GeoInfo, GeoProviderKind)> {
        match self.lookup_primary(ip).await {
            Ok(info) => {
                debug!("[GEO] Primary provider answered for {ip}");
                return Ok((info, GeoProviderKind::Primary));
            }
            Err(e) => warn!("[GEO] Primary provider failed for {ip}: {e}"),
        }

        let info = self.lookup_fallback(ip).await?;
        debug!("[GEO] Fallback provider answered for {ip}");
        Ok((info, GeoProviderKind::Fallback))
    }
}
