//! Domain health evaluation.
//!
//! Runs the fixed check sequence (resolution, nameservers, SOA, mail,
//! TXT, WHOIS) over concurrently fetched records and classifies every
//! result into findings. The checks are independent: one unreachable
//! provider degrades its own check to a warning without blocking the
//! others, and the evaluation itself only fails on invalid input.

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::TriageResult;
use crate::traits::{RecordResolver, WhoisSource};
use crate::types::{
    CheckName, Finding, HealthReport, MxEntry, RecordSet, RecordType, Severity, SoaFields, TxtKind,
    WhoisRecord,
};

/// Manual WHOIS fallback shown when the automated lookup cannot answer.
const WHOIS_MANUAL_HINT: &str =
    "Check the registration manually at https://lookup.icann.org/ or https://who.is/";

/// Registry status keywords indicating a hold or suspension.
const CRITICAL_STATUS_KEYWORDS: &[&str] =
    &["hold", "lock", "suspended", "pending delete", "pendingdelete"];
/// Registry status keywords indicating a transitional state.
const WARNING_STATUS_KEYWORDS: &[&str] = &["pending", "verification", "grace"];
/// Registry status keywords indicating a healthy registration.
const PASS_STATUS_KEYWORDS: &[&str] = &["ok", "active", "registered"];

fn dns_manual_hint(domain: &str) -> String {
    format!("Inspect the records manually at https://dns.google/query?name={domain}")
}

/// Run the full check sequence against a validated domain.
pub(super) async fn evaluate(
    resolver: &dyn RecordResolver,
    whois: &dyn WhoisSource,
    domain: &str,
) -> TriageResult<HealthReport> {
    debug!("[HEALTH] evaluating {domain}");

    let (a, aaaa, ns, soa, mx, txt, registration) = tokio::join!(
        resolver.resolve(domain, RecordType::A),
        resolver.resolve(domain, RecordType::Aaaa),
        resolver.resolve(domain, RecordType::Ns),
        resolver.resolve(domain, RecordType::Soa),
        resolver.resolve(domain, RecordType::Mx),
        resolver.resolve(domain, RecordType::Txt),
        whois.lookup(domain),
    );

    let mut findings = Vec::new();
    classify_resolution(domain, &a, &aaaa, &mut findings);
    classify_nameservers(domain, &ns, &mut findings);
    classify_soa(domain, &soa, &mut findings);
    classify_mail(domain, &mx, &mut findings);
    classify_txt(resolver, domain, &txt, &mut findings).await;
    classify_registration(domain, &registration, Utc::now(), &mut findings);

    let report = HealthReport::from_findings(domain.to_string(), findings);
    debug!(
        "[HEALTH] {domain}: {} issues, {} warnings, {} passes",
        report.issues.len(),
        report.warnings.len(),
        report.successes.len()
    );
    Ok(report)
}

/// A/AAAA resolution. A records drive the verdict; AAAA is probed
/// separately and only ever contributes an info note, since IPv6 is
/// optional.
fn classify_resolution(
    domain: &str,
    a: &TriageResult<RecordSet>,
    aaaa: &TriageResult<RecordSet>,
    findings: &mut Vec<Finding>,
) {
    match a {
        Err(e) => findings.push(Finding::with_hint(
            CheckName::Resolution,
            Severity::Warning,
            format!("Could not query A records: {e}"),
            dns_manual_hint(domain),
        )),
        Ok(set) if set.is_nxdomain() => findings.push(Finding::with_hint(
            CheckName::Resolution,
            Severity::Critical,
            "Domain does not resolve (NXDOMAIN), it is not registered or has expired",
            WHOIS_MANUAL_HINT,
        )),
        Ok(set) if !set.has_answers() => findings.push(Finding::new(
            CheckName::Resolution,
            Severity::Critical,
            "No A records found, the domain does not point to any address",
        )),
        Ok(set) => {
            let addresses = join_answers(set);
            findings.push(Finding::new(
                CheckName::Resolution,
                Severity::Pass,
                format!("Domain resolves to {addresses}"),
            ));
        }
    }

    if let Ok(set) = aaaa {
        if !set.is_nxdomain() && set.has_answers() {
            findings.push(Finding::new(
                CheckName::Resolution,
                Severity::Info,
                format!("IPv6 enabled: {}", join_answers(set)),
            ));
        }
    }
}

fn classify_nameservers(
    domain: &str,
    ns: &TriageResult<RecordSet>,
    findings: &mut Vec<Finding>,
) {
    match ns {
        Err(e) => findings.push(Finding::with_hint(
            CheckName::Nameservers,
            Severity::Warning,
            format!("Could not query NS records: {e}"),
            dns_manual_hint(domain),
        )),
        Ok(set) => {
            let hosts: Vec<&str> = if set.is_nxdomain() {
                Vec::new()
            } else {
                set.answers
                    .iter()
                    .map(|a| a.data.trim_end_matches('.'))
                    .collect()
            };
            match hosts.len() {
                0 => {
                    findings.push(Finding::new(
                        CheckName::Nameservers,
                        Severity::Critical,
                        "No authoritative nameservers found",
                    ));
                    findings.push(Finding::new(
                        CheckName::Nameservers,
                        Severity::Info,
                        "Common causes: registrar hold, expired registration, \
                         cancelled hosting, or a recent nameserver change",
                    ));
                }
                1 => findings.push(Finding::new(
                    CheckName::Nameservers,
                    Severity::Warning,
                    format!(
                        "Only one nameserver found ({}), no redundancy if it goes down",
                        hosts[0]
                    ),
                )),
                count => findings.push(Finding::new(
                    CheckName::Nameservers,
                    Severity::Pass,
                    format!("Found {count} nameservers: {}", hosts.join(", ")),
                )),
            }
        }
    }
}

/// SOA presence check. Sub-fields are display only, so a record that
/// fails to parse still passes.
fn classify_soa(domain: &str, soa: &TriageResult<RecordSet>, findings: &mut Vec<Finding>) {
    match soa {
        Err(e) => findings.push(Finding::with_hint(
            CheckName::Soa,
            Severity::Warning,
            format!("Could not query the SOA record: {e}"),
            dns_manual_hint(domain),
        )),
        Ok(set) if set.is_nxdomain() || !set.has_answers() => findings.push(Finding::new(
            CheckName::Soa,
            Severity::Warning,
            "No SOA record found, the DNS zone may not be configured",
        )),
        Ok(set) => {
            let message = set
                .answers
                .first()
                .and_then(|answer| SoaFields::parse(&answer.data))
                .map_or_else(
                    || "SOA record present".to_string(),
                    |fields| {
                        format!(
                            "SOA record present (primary {}, contact {}, serial {})",
                            fields.primary_ns, fields.responsible_email, fields.serial
                        )
                    },
                );
            findings.push(Finding::new(CheckName::Soa, Severity::Pass, message));
        }
    }
}

/// MX check. Entries are sorted by ascending priority before display;
/// a domain without MX records gets a warning, never a critical, since
/// not receiving mail can be intentional.
fn classify_mail(domain: &str, mx: &TriageResult<RecordSet>, findings: &mut Vec<Finding>) {
    match mx {
        Err(e) => findings.push(Finding::with_hint(
            CheckName::Mail,
            Severity::Warning,
            format!("Could not query MX records: {e}"),
            dns_manual_hint(domain),
        )),
        Ok(set) if set.is_nxdomain() || !set.has_answers() => findings.push(Finding::new(
            CheckName::Mail,
            Severity::Warning,
            "No MX records found, the domain cannot receive email",
        )),
        Ok(set) => {
            let mut entries: Vec<MxEntry> = set
                .answers
                .iter()
                .filter_map(|answer| MxEntry::parse(&answer.data))
                .collect();
            if entries.is_empty() {
                findings.push(Finding::new(
                    CheckName::Mail,
                    Severity::Warning,
                    "MX records are present but could not be parsed",
                ));
            } else {
                MxEntry::sort_by_priority(&mut entries);
                let list = entries
                    .iter()
                    .map(|entry| format!("{} (priority {})", entry.exchange, entry.priority))
                    .collect::<Vec<_>>()
                    .join(", ");
                findings.push(Finding::new(
                    CheckName::Mail,
                    Severity::Pass,
                    format!("Mail is handled by {list}"),
                ));
            }
        }
    }
}

/// TXT / email-policy check. SPF is looked for at the apex only; DMARC
/// is looked for at the apex first and then at the conventional
/// `_dmarc.<domain>` subdomain before being reported absent.
async fn classify_txt(
    resolver: &dyn RecordResolver,
    domain: &str,
    txt: &TriageResult<RecordSet>,
    findings: &mut Vec<Finding>,
) {
    let values: Option<Vec<&str>> = match txt {
        Err(e) => {
            findings.push(Finding::with_hint(
                CheckName::Txt,
                Severity::Warning,
                format!("Could not query TXT records: {e}"),
                dns_manual_hint(domain),
            ));
            None
        }
        Ok(set) if set.is_nxdomain() || !set.has_answers() => {
            findings.push(Finding::new(
                CheckName::Txt,
                Severity::Warning,
                "No TXT records found",
            ));
            Some(Vec::new())
        }
        Ok(set) => Some(set.answers.iter().map(|a| a.data.as_str()).collect()),
    };

    if let Some(values) = &values {
        if !values.is_empty() {
            match values
                .iter()
                .copied()
                .find(|v| TxtKind::classify(v) == TxtKind::Spf)
            {
                Some(spf) => findings.push(Finding::new(
                    CheckName::Txt,
                    Severity::Pass,
                    format!("SPF record found: {spf}"),
                )),
                None => findings.push(Finding::new(
                    CheckName::Txt,
                    Severity::Warning,
                    "No SPF record found, receivers may reject outgoing mail",
                )),
            }
        }
    }

    let apex_dmarc = values.as_ref().and_then(|vs| {
        vs.iter()
            .copied()
            .find(|v| TxtKind::classify(v) == TxtKind::Dmarc)
    });
    if let Some(value) = apex_dmarc {
        findings.push(Finding::new(
            CheckName::Txt,
            Severity::Pass,
            format!("DMARC record found: {value}"),
        ));
        return;
    }

    let subdomain = format!("_dmarc.{domain}");
    match resolver.resolve(&subdomain, RecordType::Txt).await {
        Ok(set) => {
            let dmarc = set
                .answers
                .iter()
                .find(|a| TxtKind::classify(&a.data) == TxtKind::Dmarc);
            match dmarc {
                Some(answer) => findings.push(Finding::new(
                    CheckName::Txt,
                    Severity::Pass,
                    format!("DMARC record found at {subdomain}: {}", answer.data),
                )),
                None => findings.push(Finding::new(
                    CheckName::Txt,
                    Severity::Warning,
                    "No DMARC record found, the domain has no mail spoofing policy",
                )),
            }
        }
        // Cannot claim absence when the lookup itself failed; only report
        // the transport problem if the apex query had succeeded.
        Err(e) => {
            if txt.is_ok() {
                findings.push(Finding::with_hint(
                    CheckName::Txt,
                    Severity::Warning,
                    format!("Could not query {subdomain}: {e}"),
                    dns_manual_hint(domain),
                ));
            }
        }
    }
}

/// WHOIS check. Transport failures, malformed responses, and "no match"
/// shells all degrade to distinct warnings carrying a manual-lookup
/// hint; a usable record gets its statuses and expiry classified.
fn classify_registration(
    domain: &str,
    registration: &TriageResult<WhoisRecord>,
    now: DateTime<Utc>,
    findings: &mut Vec<Finding>,
) {
    let record = match registration {
        Err(e) => {
            findings.push(Finding::with_hint(
                CheckName::Whois,
                Severity::Warning,
                format!("WHOIS lookup failed: {e}"),
                WHOIS_MANUAL_HINT,
            ));
            return;
        }
        Ok(record) => record,
    };

    if record.domain.is_none() {
        findings.push(Finding::with_hint(
            CheckName::Whois,
            Severity::Warning,
            format!("WHOIS returned no match for {domain}, the registration may have lapsed"),
            WHOIS_MANUAL_HINT,
        ));
        return;
    }

    if let Some(registrar) = &record.registrar {
        findings.push(Finding::new(
            CheckName::Whois,
            Severity::Info,
            format!("Registered with {registrar}"),
        ));
    }

    for status in &record.statuses {
        findings.push(classify_status(status));
    }

    // Some ccTLD registries (.de, .nl) publish no expiry field at all;
    // skip the date arithmetic rather than penalize the domain for it.
    if let Some(expiry) = record.expiration_dates.first() {
        findings.push(classify_expiry(days_until(*expiry, now)));
    }
}

/// Classify one registry status line.
///
/// Substring groups are checked in priority order so overlapping matches
/// resolve deterministically: hold/suspension states win over "expired",
/// which wins over transitional states, which win over healthy markers.
/// An expired domain whose status line also says "ok" still classifies
/// as critical.
fn classify_status(status: &str) -> Finding {
    let token = status.split_whitespace().next().unwrap_or(status);
    let lowered = status.to_lowercase();
    if CRITICAL_STATUS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Finding::new(
            CheckName::Whois,
            Severity::Critical,
            format!("Registry status \"{token}\" indicates a hold or suspension"),
        )
    } else if lowered.contains("expired") {
        Finding::new(
            CheckName::Whois,
            Severity::Critical,
            format!("Registry status \"{token}\": the domain is expired"),
        )
    } else if WARNING_STATUS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Finding::new(
            CheckName::Whois,
            Severity::Warning,
            format!("Registry status \"{token}\" is a transitional state"),
        )
    } else if PASS_STATUS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Finding::new(
            CheckName::Whois,
            Severity::Pass,
            format!("Registry status \"{token}\" is healthy"),
        )
    } else {
        Finding::new(
            CheckName::Whois,
            Severity::Info,
            format!("Registry status: {token}"),
        )
    }
}

/// Whole-day difference between the expiration timestamp and now.
fn days_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expiry - now).num_days()
}

/// Classify days-until-expiry.
///
/// Comparisons run strictly in the order `<0`, `<30`, `<90` so boundary
/// values land where renewals expect them: 29 days is critical, 30 is a
/// warning, 90 is a pass.
fn classify_expiry(days: i64) -> Finding {
    if days < 0 {
        Finding::new(
            CheckName::Whois,
            Severity::Critical,
            format!("Domain expired {} days ago", -days),
        )
    } else if days < 30 {
        Finding::new(
            CheckName::Whois,
            Severity::Critical,
            format!("Domain expires in {days} days, renewal is urgent"),
        )
    } else if days < 90 {
        Finding::new(
            CheckName::Whois,
            Severity::Warning,
            format!("Domain expires in {days} days"),
        )
    } else {
        Finding::new(
            CheckName::Whois,
            Severity::Pass,
            format!("Domain expires in {days} days"),
        )
    }
}

fn join_answers(set: &RecordSet) -> String {
    set.answers
        .iter()
        .map(|a| a.data.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
