//! Expert roster file: the YAML-managed source of truth for seeding the
//! expert directory.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How reachable an expert is for a new engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Green,
    Yellow,
    Red,
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactStatus::Green => write!(f, "green"),
            ContactStatus::Yellow => write!(f, "yellow"),
            ContactStatus::Red => write!(f, "red"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertConfig {
    pub full_name: String,
    pub specialization: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub years_of_experience: i32,
    pub hourly_rate: f64,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub trial_testimony: bool,
    pub contact_status: ContactStatus,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RosterFile {
    pub experts: Vec<ExpertConfig>,
}

/// Load and validate the expert roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_roster(path: &Path) -> Result<RosterFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RosterFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let roster: RosterFile = serde_yaml::from_str(&content)?;

    validate_roster(&roster)?;

    Ok(roster)
}

fn validate_roster(roster: &RosterFile) -> Result<(), ConfigError> {
    let mut seen_emails = HashSet::new();

    for expert in &roster.experts {
        if expert.full_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "expert full_name must be non-empty".to_string(),
            ));
        }
        if expert.specialization.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "expert '{}' has an empty specialization",
                expert.full_name
            )));
        }
        if expert.years_of_experience < 0 {
            return Err(ConfigError::Validation(format!(
                "expert '{}' has negative years_of_experience",
                expert.full_name
            )));
        }
        if expert.hourly_rate < 0.0 {
            return Err(ConfigError::Validation(format!(
                "expert '{}' has a negative hourly_rate",
                expert.full_name
            )));
        }
        // contact_email is the upsert key, so it must be present and unique.
        let email = expert.contact_email.trim().to_ascii_lowercase();
        if email.is_empty() {
            return Err(ConfigError::Validation(format!(
                "expert '{}' has an empty contact_email",
                expert.full_name
            )));
        }
        if !seen_emails.insert(email) {
            return Err(ConfigError::Validation(format!(
                "duplicate contact_email: {}",
                expert.contact_email
            )));
        }
    }

    Ok(())
}
