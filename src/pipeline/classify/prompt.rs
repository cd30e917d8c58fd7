//! Prompt construction for the remote classification call.
//!
//! The prompt is bounded: the content preview is capped at 1000 characters,
//! keywords at 10 entries, and raw email addresses / phone numbers are
//! reduced to presence markers — the remote service never sees them.

use crate::pipeline::types::ContactBundle;

/// Fixed system instruction: allowed types and the quality rubric.
pub const SYSTEM_INSTRUCTION: &str = "You are an AI assistant that classifies leads for the Kansas City Royals. \
Classify each lead as: person (individual profile), business (company/organization), \
event (event page/sponsor listing), or unknown. \
Rate quality 1-10 based on potential partnership value. \
Identify if businesses need contact person search. \
Skip event pages and low-value leads.";

/// Maximum characters of lead text included in the prompt.
const CONTENT_PREVIEW_CHARS: usize = 1000;

/// Maximum keywords included in the prompt.
const MAX_PROMPT_KEYWORDS: usize = 10;

/// Build the user prompt for one lead.
pub fn build_classification_prompt(url: &str, text: &str, bundle: &ContactBundle) -> String {
    let keywords: Vec<&str> = bundle
        .keywords
        .iter()
        .take(MAX_PROMPT_KEYWORDS)
        .map(String::as_str)
        .collect();

    format!(
        "Analyze this lead for Kansas City Royals sponsorship opportunities:\n\n\
        URL: {url}\n\n\
        Extracted Information:\n\
        - Names: {names}\n\
        - Titles: {titles}\n\
        - Companies: {companies}\n\
        - Emails: {emails}\n\
        - Phones: {phones}\n\
        - Keywords: {keywords}\n\n\
        Content Preview:\n\
        {preview}\n\n\
        Classify this lead and return a JSON object with:\n\
        {{\n\
          \"type\": \"person|business|event|unknown\",\n\
          \"isPerson\": boolean,\n\
          \"quality\": 1-10 (partnership potential),\n\
          \"needsContactSearch\": boolean (for businesses without contact info),\n\
          \"skipReason\": string or null (why to skip this lead),\n\
          \"reasoning\": string (brief explanation)\n\
        }}\n\n\
        Guidelines:\n\
        - High quality (8-10): CEOs, Presidents, Founders, business owners in Kansas City area\n\
        - Medium quality (5-7): Directors, Managers, established businesses\n\
        - Low quality (1-4): Generic profiles, no clear business connection\n\
        - Skip: Event pages, sponsor listings, job postings",
        url = url,
        names = join_or_none(&bundle.names),
        titles = join_or_none(&bundle.titles),
        companies = join_or_none(&bundle.companies),
        emails = presence(&bundle.emails),
        phones = presence(&bundle.phones),
        keywords = keywords.join(", "),
        preview = truncate_chars(text, CONTENT_PREVIEW_CHARS),
    )
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join(", ")
    }
}

/// Presence marker only — raw values stay out of the prompt.
fn presence(values: &[String]) -> &'static str {
    if values.is_empty() {
        "None"
    } else {
        "Found"
    }
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
