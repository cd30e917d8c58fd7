//! Deterministic confidence scoring over an aggregated contact bundle.
//!
//! Purely additive signal weights, clamped to 100. No I/O, no failure mode;
//! adding a qualifying signal never lowers the score. This scale is
//! independent of the classifier's 0-10 quality rubric.

use super::types::ContactBundle;

/// Terms that mark a senior decision-maker in a keyword or title.
const SENIORITY_TERMS: &[&str] = &["ceo", "president", "founder", "owner", "executive", "director"];

/// Terms that mark an existing sponsorship relationship.
const SPONSOR_TERMS: &[&str] = &["sponsor", "presenting sponsor", "partner"];

/// Score how much structured contact data was recovered, 0-100.
pub fn confidence_score(bundle: &ContactBundle) -> u8 {
    let mut score: u32 = 0;

    // High value indicators
    if !bundle.emails.is_empty() {
        score += 30;
    }
    if !bundle.phones.is_empty() {
        score += 25;
    }
    if !bundle.names.is_empty() && !bundle.titles.is_empty() {
        score += 20;
    }

    // Medium value indicators
    if !bundle.names.is_empty() {
        score += 10;
    }
    if !bundle.companies.is_empty() {
        score += 5;
    }
    if !bundle.addresses.is_empty() {
        score += 8;
    }
    if bundle.keywords.len() > 3 {
        score += 5;
    }

    // Keyword quality bonus
    let has_seniority_term = bundle
        .keywords
        .iter()
        .any(|k| SENIORITY_TERMS.iter().any(|term| k.contains(term)))
        || bundle
            .titles
            .iter()
            .any(|t| SENIORITY_TERMS.iter().any(|term| t.to_lowercase().contains(term)));
    if has_seniority_term {
        score += 10;
    }

    let has_sponsor_term = bundle
        .keywords
        .iter()
        .any(|k| SPONSOR_TERMS.iter().any(|term| k.contains(term)));
    if has_sponsor_term {
        score += 2;
    }

    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> ContactBundle {
        ContactBundle::default()
    }

    #[test]
    fn empty_bundle_scores_zero() {
        assert_eq!(confidence_score(&bundle()), 0);
    }

    #[test]
    fn full_bundle_clamps_at_100() {
        let full = ContactBundle {
            names: vec!["A".to_string()],
            titles: vec!["CEO".to_string()],
            emails: vec!["a@b.com".to_string()],
            phones: vec!["(913) 555-1234".to_string()],
            companies: vec!["C".to_string()],
            addresses: vec!["123 Main St".to_string()],
            keywords: vec![
                "ceo".to_string(),
                "sponsor".to_string(),
                "founder".to_string(),
                "executive".to_string(),
            ],
        };
        // 30+25+20+10+5+8+5+10+2 = 115 → clamp
        assert_eq!(confidence_score(&full), 100);
    }

    #[test]
    fn email_alone_scores_thirty() {
        let mut b = bundle();
        b.emails.push("a@b.com".to_string());
        assert_eq!(confidence_score(&b), 30);
    }

    #[test]
    fn name_without_title_skips_pair_bonus() {
        let mut b = bundle();
        b.names.push("John Doe".to_string());
        assert_eq!(confidence_score(&b), 10);
    }

    #[test]
    fn name_and_title_earn_pair_bonus() {
        let mut b = bundle();
        b.names.push("John Doe".to_string());
        b.titles.push("Coordinator".to_string());
        // 20 pair + 10 name
        assert_eq!(confidence_score(&b), 30);
    }

    #[test]
    fn seniority_title_adds_ten() {
        let mut b = bundle();
        b.names.push("John Doe".to_string());
        b.titles.push("Vice President".to_string());
        // 20 pair + 10 name + 10 seniority ("president" substring)
        assert_eq!(confidence_score(&b), 40);
    }

    #[test]
    fn sponsor_keyword_adds_two() {
        let mut b = bundle();
        b.keywords.push("presenting sponsor".to_string());
        assert_eq!(confidence_score(&b), 2);
    }

    #[test]
    fn keyword_count_bonus_needs_more_than_three() {
        let mut b = bundle();
        b.keywords = vec![
            "baseball".to_string(),
            "kc".to_string(),
            "hospitality".to_string(),
        ];
        assert_eq!(confidence_score(&b), 0);
        b.keywords.push("ticketing".to_string());
        assert_eq!(confidence_score(&b), 5);
    }

    #[test]
    fn adding_signals_is_monotonic() {
        let mut b = bundle();
        let mut last = confidence_score(&b);

        b.emails.push("a@b.com".to_string());
        let s = confidence_score(&b);
        assert!(s >= last);
        last = s;

        b.phones.push("(913) 555-1234".to_string());
        let s = confidence_score(&b);
        assert!(s >= last);
        last = s;

        b.names.push("John Doe".to_string());
        b.titles.push("CEO".to_string());
        let s = confidence_score(&b);
        assert!(s >= last);
        last = s;

        b.companies.push("Acme LLC".to_string());
        b.addresses.push("123 Main Street".to_string());
        b.keywords = vec![
            "ceo".to_string(),
            "sponsor".to_string(),
            "sports".to_string(),
            "sales".to_string(),
        ];
        let s = confidence_score(&b);
        assert!(s >= last);
        assert!(s <= 100);
    }
}
