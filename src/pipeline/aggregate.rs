//! Contact aggregation — merges pattern-derived entities with the explicit
//! structured fields a row already carries.
//!
//! Explicit data outranks inferred data: a populated `contact_email` is
//! always `emails[0]`, verbatim, even when the same address also appears in
//! the free text. Total: a row with no text fields yields an all-empty
//! bundle.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::patterns;
use super::types::{ContactBundle, Row};

/// Seniority/role vocabulary matched against the text blob.
static ROLE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:sponsor|sponsorship|presenting sponsor|partner|partnership|corporate|executive|leadership|owner|founder)\b",
    )
    .expect("invalid role keyword pattern")
});

/// Market/location vocabulary for the target territory.
static MARKET_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Kansas City|KC|Royals|baseball|sports|entertainment)\b")
        .expect("invalid market keyword pattern")
});

/// Business-function vocabulary.
static FUNCTION_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:marketing|sales|business development|ticketing|hospitality)\b")
        .expect("invalid function keyword pattern")
});

/// Build one `ContactBundle` for a row.
pub fn aggregate(row: &Row) -> ContactBundle {
    // One blob for pattern extraction. Explicit email/phone fields are
    // structured already and stay out of it.
    let text_content = [
        row.snippet.as_deref(),
        row.description.as_deref(),
        row.contact_name.as_deref(),
        row.contact_title.as_deref(),
        row.company_name.as_deref(),
        row.contact_address.as_deref(),
        row.keywords.as_deref(),
    ]
    .iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    let mut bundle = ContactBundle::default();

    if !text_content.is_empty() {
        bundle.names = patterns::extract_names(&text_content);
        bundle.titles = patterns::extract_titles(&text_content);
        bundle.emails = patterns::extract_emails(&text_content);
        bundle.phones = patterns::extract_phones(&text_content);
        bundle.companies = patterns::extract_companies(&text_content);
        bundle.addresses = patterns::extract_addresses(&text_content);
    }

    // Explicit structured fields take index 0, displacing any
    // pattern-derived duplicate.
    if let Some(name) = non_empty(row.contact_name.as_deref()) {
        promote_front(&mut bundle.names, name, false);
    }
    if let Some(title) = non_empty(row.contact_title.as_deref()) {
        promote_front(&mut bundle.titles, title, false);
    }
    if let Some(email) = non_empty(row.contact_email.as_deref()) {
        promote_front(&mut bundle.emails, email, true);
    }
    if let Some(phone) = non_empty(row.contact_phone.as_deref()) {
        promote_front(&mut bundle.phones, &patterns::format_phone(phone), false);
    }
    if let Some(company) = non_empty(row.company_name.as_deref()) {
        promote_front(&mut bundle.companies, company, false);
    }
    if let Some(address) = non_empty(row.contact_address.as_deref()) {
        promote_front(&mut bundle.addresses, address, false);
    }

    // Keywords: explicit comma-separated seed list first, then the fixed
    // vocabularies matched against the blob, lowercased and deduplicated.
    let mut keywords: Vec<String> = row
        .keywords
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    for pattern in [&*ROLE_KEYWORDS, &*MARKET_KEYWORDS, &*FUNCTION_KEYWORDS] {
        for m in pattern.find_iter(&text_content) {
            keywords.push(m.as_str().to_string());
        }
    }

    let mut seen = HashSet::new();
    bundle.keywords = keywords
        .into_iter()
        .map(|k| k.to_lowercase())
        .filter(|k| seen.insert(k.clone()))
        .collect();

    bundle
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Insert `value` at the front of `list`, removing any existing duplicate.
/// Emails compare case-insensitively; everything else compares verbatim.
fn promote_front(list: &mut Vec<String>, value: &str, case_insensitive: bool) {
    if case_insensitive {
        let lowered = value.to_lowercase();
        list.retain(|existing| existing.to_lowercase() != lowered);
    } else {
        list.retain(|existing| existing != value);
    }
    list.insert(0, value.to_string());
}
