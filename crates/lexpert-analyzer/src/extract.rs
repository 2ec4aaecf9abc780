//! Pulling one structured object out of an unstructured completion.
//!
//! Models asked to "return only JSON" still wrap the object in prose often
//! enough that the parse step has to tolerate surrounding text. The scan
//! below finds the first balanced `{...}` substring, tracking string
//! literals so braces inside values don't end the object early.

use crate::error::AnalyzerError;
use crate::types::CaseAnalysis;

/// Returns the first balanced `{...}` substring of `text`, if any.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses a [`CaseAnalysis`] out of free-form completion text.
///
/// # Errors
///
/// Returns [`AnalyzerError::NoJsonObject`] when no balanced object exists in
/// the text, or [`AnalyzerError::Deserialize`] when the object does not
/// parse as JSON.
pub fn parse_case_analysis(text: &str) -> Result<CaseAnalysis, AnalyzerError> {
    let object = extract_json_object(text).ok_or(AnalyzerError::NoJsonObject)?;
    serde_json::from_str(object).map_err(|e| AnalyzerError::Deserialize {
        context: "case analysis completion".to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let text = r#"Here is the analysis you asked for:

{"coreConflict": "scaffolding failure", "caseType": "construction defect"}

Let me know if you need anything else."#;
        let object = extract_json_object(text).expect("object");
        assert!(object.starts_with('{'));
        assert!(object.ends_with('}'));
        assert!(object.contains("scaffolding failure"));
    }

    #[test]
    fn handles_nested_objects_and_braces_in_strings() {
        let text = r#"{"outer": {"inner": "uses } and { freely"}} trailing"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"outer": {"inner": "uses } and { freely"}}"#)
        );
    }

    #[test]
    fn handles_escaped_quotes_in_strings() {
        let text = r#"{"quote": "she said \"x}\" loudly"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn returns_none_without_any_object() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("unbalanced { only"), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn parse_fails_cleanly_on_prose_only() {
        let err = parse_case_analysis("I could not analyze this case.").unwrap_err();
        assert!(matches!(err, AnalyzerError::NoJsonObject));
    }

    #[test]
    fn parse_fails_cleanly_on_invalid_json() {
        let err = parse_case_analysis("{not: valid json}").unwrap_err();
        assert!(matches!(err, AnalyzerError::Deserialize { .. }));
    }

    #[test]
    fn parse_reads_full_shape() {
        let text = r#"{"coreConflict": "crane collapse",
                       "expertiseNeeded": ["rigging"],
                       "caseType": "construction accident",
                       "jurisdiction": "New York",
                       "keyIssues": ["maintenance records"],
                       "suggestedSpecialties": ["Crane Operations"]}"#;
        let analysis = parse_case_analysis(text).expect("parse");
        assert_eq!(analysis.core_conflict, "crane collapse");
        assert_eq!(analysis.jurisdiction.as_deref(), Some("New York"));
        assert_eq!(analysis.suggested_specialties, vec!["Crane Operations"]);
    }
}
