//! Best-effort contact extraction from search-result text.
//!
//! Heuristic by design: the goal is surfacing likely outreach channels, not
//! validating them. False positives are acceptable; placeholder values that
//! show up in boilerplate (example.com addresses, short digit runs) are not.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::ContactInfo;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?(\(?\d{3}\)?[-.\s]?)?\d{3}[-.\s]?\d{4}\b")
        .expect("valid phone regex")
});
static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*")
        .expect("valid website regex")
});

/// Domains that only ever appear in documentation boilerplate.
const PLACEHOLDER_DOMAINS: [&str; 3] = ["example.com", "domain.com", "test.com"];

/// Phone candidates must keep at least this many digits to survive.
const MIN_PHONE_DIGITS: usize = 10;

/// Extracts candidate emails, phone numbers, and URLs from free text.
///
/// Pure function of its input: matches are collected in scan order and
/// deduplicated exactly, so repeated extraction over the same text always
/// yields the same sets.
#[must_use]
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let emails = dedup(
        EMAIL_RE
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|email| !PLACEHOLDER_DOMAINS.iter().any(|d| email.contains(d))),
    );

    let phones = dedup(PHONE_RE.find_iter(text).map(|m| m.as_str()).filter(|p| {
        p.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
    }));

    let websites = dedup(WEBSITE_RE.find_iter(text).map(|m| m.as_str()));

    ContactInfo {
        emails,
        phones,
        websites,
    }
}

/// Collects items into a vec, keeping first occurrences in order.
fn dedup<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_emails_and_skips_placeholders() {
        let text = "Reach Jane at jane@realfirm.com or the template jane@example.com; \
                    also admin@test.com and ops@domain.com should go.";
        let info = extract_contact_info(text);
        assert_eq!(info.emails, vec!["jane@realfirm.com"]);
    }

    #[test]
    fn phone_filter_requires_ten_digits() {
        let text = "Office: (555) 123-4567. After hours: 555-1234.";
        let info = extract_contact_info(text);
        assert_eq!(info.phones, vec!["(555) 123-4567"]);
    }

    #[test]
    fn accepts_country_code_and_dot_separators() {
        let info = extract_contact_info("Call +1 415.555.2671 today.");
        assert_eq!(info.phones, vec!["+1 415.555.2671"]);
    }

    #[test]
    fn extracts_websites() {
        let text = "Profile: https://www.smithforensics.com/experts/12 and http://caselaw.net for filings.";
        let info = extract_contact_info(text);
        assert_eq!(
            info.websites,
            vec![
                "https://www.smithforensics.com/experts/12",
                "http://caselaw.net"
            ]
        );
    }

    #[test]
    fn deduplicates_preserving_first_occurrence_order() {
        let text = "b@firm.com then a@firm.com then b@firm.com again";
        let info = extract_contact_info(text);
        assert_eq!(info.emails, vec!["b@firm.com", "a@firm.com"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "Contact dana@whitfieldforensics.com, (312) 555-0188, or \
                    https://whitfieldforensics.com today. Or dana@whitfieldforensics.com.";
        let first = extract_contact_info(text);
        let second = extract_contact_info(text);
        assert_eq!(first, second);
        assert_eq!(first.emails.len(), 1);
    }

    #[test]
    fn empty_text_yields_empty_sets() {
        let info = extract_contact_info("");
        assert!(info.emails.is_empty());
        assert!(info.phones.is_empty());
        assert!(info.websites.is_empty());
    }
}
