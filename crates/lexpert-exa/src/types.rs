use serde::{Deserialize, Serialize};

/// Contact details pulled out of free text by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub websites: Vec<String>,
}

/// One search hit, passed through from the provider.
///
/// `contact_info` is never populated by the provider; it is attached after
/// the fact when the caller asked for contact extraction, and the key is
/// omitted from serialized output entirely when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_scores: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
}

/// Provider response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoprompt_string: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_contact_info_is_not_serialized() {
        let result = SearchResult {
            id: "r1".to_string(),
            url: "https://example.org/a".to_string(),
            title: Some("A".to_string()),
            author: None,
            published_date: None,
            text: None,
            highlights: None,
            highlight_scores: None,
            contact_info: None,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert!(json.get("contactInfo").is_none());
        assert!(json.get("author").is_none());
    }

    #[test]
    fn present_contact_info_serializes_camel_case() {
        let result = SearchResult {
            id: "r1".to_string(),
            url: "https://example.org/a".to_string(),
            title: None,
            author: None,
            published_date: Some("2024-03-01".to_string()),
            text: None,
            highlights: None,
            highlight_scores: None,
            contact_info: Some(ContactInfo {
                emails: vec!["a@b.com".to_string()],
                phones: vec![],
                websites: vec![],
            }),
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["contactInfo"]["emails"][0], "a@b.com");
        assert_eq!(json["publishedDate"], "2024-03-01");
    }

    #[test]
    fn response_deserializes_provider_fields() {
        let json = r#"{
            "results": [{
                "id": "x",
                "url": "https://firm.example.net",
                "title": "Firm",
                "highlights": ["call us"],
                "highlightScores": [0.9]
            }],
            "autopromptString": "expert witness directory"
        }"#;
        let response: SearchResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(response.results.len(), 1);
        assert_eq!(
            response.autoprompt_string.as_deref(),
            Some("expert witness directory")
        );
        assert_eq!(
            response.results[0].highlight_scores.as_deref(),
            Some(&[0.9][..])
        );
    }
}
