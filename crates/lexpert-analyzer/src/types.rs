use serde::{Deserialize, Serialize};

/// Structured reading of a legal-matter description.
///
/// Every field carries a serde default: the model is free to omit or mangle
/// any of them, and a partial object is still worth using.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseAnalysis {
    pub core_conflict: String,
    pub expertise_needed: Vec<String>,
    pub case_type: String,
    pub jurisdiction: Option<String>,
    pub key_issues: Vec<String>,
    pub suggested_specialties: Vec<String>,
}

impl CaseAnalysis {
    /// Flattens the analysis into search terms: the core conflict plus every
    /// expertise area, key issue, and suggested specialty, blanks skipped.
    #[must_use]
    pub fn search_terms(&self) -> String {
        std::iter::once(self.core_conflict.as_str())
            .chain(self.expertise_needed.iter().map(String::as_str))
            .chain(self.key_issues.iter().map(String::as_str))
            .chain(self.suggested_specialties.iter().map(String::as_str))
            .filter(|term| !term.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
