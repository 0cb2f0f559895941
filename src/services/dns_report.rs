//! Record-oriented DNS analysis.
//!
//! Collects the full record picture for one domain without judging it,
//! for agents who want raw data rather than a verdict. Nameservers and
//! mail exchangers are enriched with their first IPv4 address through
//! one extra lookup each; a section whose query fails comes back empty
//! instead of failing the whole analysis.

use futures::future::join_all;
use log::{debug, trace};

use crate::error::TriageResult;
use crate::traits::RecordResolver;
use crate::types::{
    DnsReport, MailExchangeEntry, MxEntry, NameserverEntry, RecordType, RecordValue, SoaFields,
    TxtEntry, TxtKind,
};

/// Collect all record sections for a validated domain.
pub(super) async fn analyze(resolver: &dyn RecordResolver, domain: &str) -> TriageResult<DnsReport> {
    debug!("[DNS] analyzing {domain}");

    let (a, aaaa, ns, soa, mx, txt) = tokio::join!(
        resolver.resolve(domain, RecordType::A),
        resolver.resolve(domain, RecordType::Aaaa),
        resolver.resolve(domain, RecordType::Ns),
        resolver.resolve(domain, RecordType::Soa),
        resolver.resolve(domain, RecordType::Mx),
        resolver.resolve(domain, RecordType::Txt),
    );

    let a_records: Vec<RecordValue> = match &a {
        Ok(set) if !set.is_nxdomain() => set.answers.clone(),
        _ => Vec::new(),
    };
    let aaaa_records: Vec<RecordValue> = match &aaaa {
        Ok(set) if !set.is_nxdomain() => set.answers.clone(),
        _ => Vec::new(),
    };

    let nameservers = match &ns {
        Ok(set) if !set.is_nxdomain() => {
            let hosts: Vec<String> = set
                .answers
                .iter()
                .map(|answer| answer.data.trim_end_matches('.').to_string())
                .collect();
            let addresses = join_all(hosts.iter().map(|host| first_address(resolver, host))).await;
            hosts
                .into_iter()
                .zip(addresses)
                .map(|(host, address)| NameserverEntry { host, address })
                .collect()
        }
        _ => Vec::new(),
    };

    let mail_exchanges = match &mx {
        Ok(set) if !set.is_nxdomain() => {
            let mut parsed: Vec<(MxEntry, Option<u32>)> = set
                .answers
                .iter()
                .filter_map(|answer| MxEntry::parse(&answer.data).map(|entry| (entry, answer.ttl)))
                .collect();
            // Stable sort: equal priorities keep resolver response order.
            parsed.sort_by_key(|(entry, _)| entry.priority);
            let addresses = join_all(
                parsed
                    .iter()
                    .map(|(entry, _)| first_address(resolver, &entry.exchange)),
            )
            .await;
            parsed
                .into_iter()
                .zip(addresses)
                .map(|((entry, ttl), address)| MailExchangeEntry {
                    priority: entry.priority,
                    exchange: entry.exchange,
                    address,
                    ttl,
                })
                .collect()
        }
        _ => Vec::new(),
    };

    let txt_records: Vec<TxtEntry> = match &txt {
        Ok(set) if !set.is_nxdomain() => set
            .answers
            .iter()
            .map(|answer| TxtEntry {
                value: answer.data.clone(),
                kind: TxtKind::classify(&answer.data),
                ttl: answer.ttl,
            })
            .collect(),
        _ => Vec::new(),
    };

    let dmarc_record = if txt_records.iter().any(|t| t.kind == TxtKind::Dmarc) {
        None
    } else {
        lookup_dmarc(resolver, domain).await
    };

    let soa = match &soa {
        Ok(set) => set
            .answers
            .first()
            .and_then(|answer| SoaFields::parse(&answer.data)),
        Err(_) => None,
    };

    debug!(
        "[DNS] {domain}: {} NS, {} A, {} AAAA, {} MX, {} TXT",
        nameservers.len(),
        a_records.len(),
        aaaa_records.len(),
        mail_exchanges.len(),
        txt_records.len()
    );

    Ok(DnsReport {
        domain: domain.to_string(),
        nameservers,
        a_records,
        aaaa_records,
        mail_exchanges,
        txt_records,
        dmarc_record,
        soa,
    })
}

/// First A record of a host, or `None` when the lookup fails or comes
/// back empty.
async fn first_address(resolver: &dyn RecordResolver, host: &str) -> Option<String> {
    match resolver.resolve(host, RecordType::A).await {
        Ok(set) => set.answers.first().map(|answer| answer.data.clone()),
        Err(e) => {
            trace!("[DNS] address enrichment for {host} failed: {e}");
            None
        }
    }
}

/// DMARC policy record at the conventional `_dmarc.` subdomain.
async fn lookup_dmarc(resolver: &dyn RecordResolver, domain: &str) -> Option<TxtEntry> {
    let subdomain = format!("_dmarc.{domain}");
    match resolver.resolve(&subdomain, RecordType::Txt).await {
        Ok(set) => set
            .answers
            .iter()
            .find(|answer| TxtKind::classify(&answer.data) == TxtKind::Dmarc)
            .map(|answer| TxtEntry {
                value: answer.data.clone(),
                kind: TxtKind::Dmarc,
                ttl: answer.ttl,
            }),
        Err(e) => {
            trace!("[DNS] DMARC lookup at {subdomain} failed: {e}");
            None
        }
    }
}
