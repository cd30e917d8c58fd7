//! Pattern-based entity extraction from unstructured lead text.
//!
//! Stateless, total functions: each takes raw text and returns an
//! ordered-unique list of candidate strings, empty on no match. Extraction is
//! heuristic, not NLP-grade — the confidence scorer downstream quantifies how
//! much was actually recovered.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("invalid email pattern")
});

/// Four digit-grouping alternatives, applied in this order: dash/dot
/// separated, parenthesized area code, optional country code, bare 10-digit
/// run. Every match is canonicalized through `format_phone`.
static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b",
        r"\(\d{3}\)\s?\d{3}[-.\s]?\d{4}\b",
        r"\b\+?1?\s?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
        r"\b\d{10}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid phone pattern"))
    .collect()
});

/// Two-or-more consecutive capitalized words.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)(?:\s|$|,)")
        .expect("invalid name pattern")
});

/// Explicit "Contact:"/"Name:"/"by " lead-in.
static NAME_LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:Contact:\s*|Name:\s*|by\s+)([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)")
        .expect("invalid name lead-in pattern")
});

static TITLE_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:CEO|CTO|CFO|COO|CMO|President|Vice President|VP|Director|Manager|Founder|Owner|Principal|Partner|Executive|Administrator|Coordinator)\b",
    )
    .expect("invalid title vocabulary pattern")
});

static TITLE_LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Title:|Position:)\s*([^,\n]+)").expect("invalid title lead-in pattern")
});

static COMPANY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:Inc\.|LLC|Corp\.|Corporation|Company|Ltd\.|Limited|Partners|Partnership|Group|Holdings|Enterprises)\b",
    )
    .expect("invalid company suffix pattern")
});

static COMPANY_LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Company:|Organization:|Employer:)\s*([^,\n]+)")
        .expect("invalid company lead-in pattern")
});

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d{1,5}\s+[\w\s]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Way|Court|Ct|Plaza|Square|Park)\b[^,\n]*",
    )
    .expect("invalid address pattern")
});

static ADDRESS_LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Address:|Location:)\s*([^,\n]+)").expect("invalid address lead-in pattern")
});

/// Single words that the name/company extractors must never surface alone.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "about", "contact", "email", "phone", "address",
    "website", "page", "profile",
];

fn is_stop_word(value: &str) -> bool {
    STOP_WORDS.contains(&value.to_lowercase().as_str())
}

/// First-occurrence deduplication, order preserved.
fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Extract email addresses, lowercased, first occurrence wins.
pub fn extract_emails(text: &str) -> Vec<String> {
    dedup_preserving_order(
        EMAIL_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect(),
    )
}

/// Extract phone numbers, canonicalized to `(AAA) PPP-NNNN`.
///
/// Deduplication happens on the formatted string, so the same number written
/// three ways collapses to one entry.
pub fn extract_phones(text: &str) -> Vec<String> {
    let mut phones = Vec::new();
    for pattern in PHONE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            phones.push(format_phone(m.as_str()));
        }
    }
    dedup_preserving_order(phones)
}

/// Canonicalize a phone number to `(AAA) PPP-NNNN`.
///
/// 10 digits map directly; 11 digits with a leading country code `1` drop the
/// prefix first; anything else passes through unchanged. Idempotent on
/// already-canonical input.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else if digits.len() == 11 && digits.starts_with('1') {
        format!("({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
    } else {
        phone.to_string()
    }
}

/// Extract personal names: runs of capitalized words plus explicit lead-ins.
pub fn extract_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in NAME_PATTERN.captures_iter(text) {
        names.push(caps[1].to_string());
    }
    for caps in NAME_LEAD_IN.captures_iter(text) {
        names.push(caps[1].to_string());
    }

    dedup_preserving_order(
        names
            .into_iter()
            .filter(|n| n.len() > 2 && !is_stop_word(n))
            .collect(),
    )
}

/// Extract role titles from the fixed vocabulary plus explicit lead-ins.
pub fn extract_titles(text: &str) -> Vec<String> {
    let mut titles: Vec<String> = TITLE_VOCABULARY
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    for caps in TITLE_LEAD_IN.captures_iter(text) {
        titles.push(caps[1].trim().to_string());
    }

    dedup_preserving_order(titles.into_iter().filter(|t| t.len() > 2).collect())
}

/// Extract company names.
///
/// For every legal-entity suffix occurrence, walk back up to three words
/// within the same sentence to capture a name fragment; explicit
/// "Company:/Organization:/Employer:" lead-ins are taken verbatim.
pub fn extract_companies(text: &str) -> Vec<String> {
    let suffixes: Vec<&str> = COMPANY_SUFFIX.find_iter(text).map(|m| m.as_str()).collect();

    let mut companies: Vec<String> = Vec::new();
    for sentence in text.split(['.', '!', '?']) {
        for suffix in &suffixes {
            let Some(index) = sentence.find(suffix) else {
                continue;
            };
            if index == 0 {
                continue;
            }
            let before = sentence[..index].trim();
            if before.is_empty() {
                continue;
            }
            let words: Vec<&str> = before.split_whitespace().collect();
            let tail = &words[words.len().saturating_sub(3)..];
            companies.push(format!("{} {}", tail.join(" "), suffix));
        }
    }

    for caps in COMPANY_LEAD_IN.captures_iter(text) {
        companies.push(caps[1].trim().to_string());
    }

    dedup_preserving_order(
        companies
            .into_iter()
            .filter(|c| c.len() > 2 && !is_stop_word(c))
            .collect(),
    )
}

/// Extract street addresses: house number + street suffix, plus explicit
/// lead-ins. Fragments of 10 characters or fewer are discarded.
pub fn extract_addresses(text: &str) -> Vec<String> {
    let mut addresses: Vec<String> = ADDRESS_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect();
    for caps in ADDRESS_LEAD_IN.captures_iter(text) {
        addresses.push(caps[1].trim().to_string());
    }

    dedup_preserving_order(addresses.into_iter().filter(|a| a.len() > 10).collect())
}
