//! POST /search-experts — AI-assisted search over the expert directory.
//!
//! The handler runs in two stages: an optional case-analysis call that turns
//! a free-text matter description into extra search terms and suggested
//! specialties, then one directory query built from the merged filters.
//! Case analysis is advisory — any failure there degrades to a plain
//! filter-only search rather than failing the request.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lexpert_analyzer::{AnalyzerClient, CaseAnalysis};
use lexpert_db::{ExpertRow, ExpertSearchCriteria, SpecialtyFilter};

use super::AppState;
use crate::middleware::RequestId;

/// Dropdown value meaning "no specialty selected".
const ALL_SPECIALTIES: &str = "All Specialties";
/// Dropdown value meaning "no availability selected".
const ANY_AVAILABILITY: &str = "Any Time";

const FALLBACK_BIO: &str = "Professional expert witness with extensive experience.";
const FALLBACK_LOCATION: &str = "United States";

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

/// A numeric filter as submitted by clients: JSON number or numeric string.
/// The browser form posts its inputs as strings, so both must parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumericField {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumericField {
    fn as_i32(&self) -> Option<i32> {
        match self {
            NumericField::Int(v) => i32::try_from(*v).ok(),
            #[allow(clippy::cast_possible_truncation)]
            NumericField::Float(v) if v.fract() == 0.0 => {
                (*v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX)).then_some(*v as i32)
            }
            NumericField::Float(_) => None,
            NumericField::Text(s) => s.trim().parse::<i32>().ok(),
        }
    }

    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            NumericField::Int(v) => Some(Decimal::from(*v)),
            NumericField::Float(v) => Decimal::from_f64_retain(*v),
            NumericField::Text(s) => s.trim().parse::<Decimal>().ok(),
        }
    }
}

/// A yes/no filter as submitted by clients: JSON bool or form string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FlagField {
    Bool(bool),
    Text(String),
}

impl FlagField {
    /// Only an affirmative value becomes a constraint; both "no preference"
    /// and "not required" leave the directory unfiltered.
    fn requires(&self) -> bool {
        match self {
            FlagField::Bool(b) => *b,
            FlagField::Text(s) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "yes" | "true")
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(in crate::api) struct SearchExpertsRequest {
    query: String,
    case_description: Option<String>,
    specialty: Option<String>,
    location: Option<String>,
    availability: Option<String>,
    min_experience: Option<NumericField>,
    max_experience: Option<NumericField>,
    trial_testimony: Option<FlagField>,
    min_rate: Option<NumericField>,
    max_rate: Option<NumericField>,
    languages: Vec<String>,
    certifications: Option<String>,
}

impl SearchExpertsRequest {
    fn case_description(&self) -> Option<&str> {
        non_blank(self.case_description.as_deref())
    }

    fn explicit_specialty(&self) -> Option<&str> {
        non_blank(self.specialty.as_deref()).filter(|s| *s != ALL_SPECIALTIES)
    }

    fn explicit_location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    fn availability(&self) -> Option<&str> {
        non_blank(self.availability.as_deref()).filter(|s| *s != ANY_AVAILABILITY)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SearchExpertsResponse {
    query: String,
    original_query: String,
    case_analysis: Option<CaseAnalysis>,
    total: usize,
    experts: Vec<ExpertResult>,
}

/// Client-facing view of one directory row. Pure mapping, no mutation of the
/// source record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct ExpertResult {
    id: Uuid,
    name: String,
    specialty: String,
    category: String,
    description: String,
    location: String,
    experience: String,
    rate: String,
    rating: f64,
    reviews: i32,
    case_count: i32,
    languages: Vec<String>,
    certifications: Vec<String>,
    education: Vec<String>,
    availability: &'static str,
    availability_color: &'static str,
    contact_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_url: Option<String>,
    tags: Vec<String>,
}

impl ExpertResult {
    fn from_row(row: ExpertRow) -> Self {
        let tags = vec![
            row.specialization.clone(),
            format!("{}+ Cases", row.case_count),
            format!("{} Years", row.years_of_experience),
        ];
        let languages = if row.languages.is_empty() {
            vec!["English".to_string()]
        } else {
            row.languages
        };

        Self {
            id: row.id,
            name: row.full_name,
            specialty: row.specialization.clone(),
            category: row.specialization,
            description: row
                .bio
                .filter(|bio| !bio.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_BIO.to_string()),
            location: row
                .location
                .filter(|loc| !loc.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_LOCATION.to_string()),
            experience: format!("{} years", row.years_of_experience),
            rate: format!("${}/hr", row.hourly_rate.normalize()),
            rating: row.rating.unwrap_or(0.0),
            reviews: row.review_count,
            case_count: row.case_count,
            languages,
            certifications: row.certifications,
            education: row.education,
            availability: if row.is_active { "Available" } else { "Unavailable" },
            availability_color: if row.is_active { "green" } else { "gray" },
            contact_status: row.contact_status,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            linkedin_url: row.linkedin_url,
            profile_url: row.profile_url,
            tags,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ValidationErrorBody {
    error: &'static str,
}

#[derive(Debug, Serialize)]
struct DirectoryErrorBody {
    error: &'static str,
    experts: Vec<ExpertResult>,
}

/// A search with no matches and a failed search both render as "no results";
/// the error body is what lets clients tell the two apart.
#[derive(Debug)]
pub(in crate::api) enum SearchExpertsError {
    MissingQuery,
    Directory,
}

impl IntoResponse for SearchExpertsError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SearchExpertsError::MissingQuery => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    error: "Search query or case description is required",
                }),
            )
                .into_response(),
            SearchExpertsError::Directory => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DirectoryErrorBody {
                    error: "Database query failed",
                    experts: Vec::new(),
                }),
            )
                .into_response(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter resolution
// ---------------------------------------------------------------------------

/// An explicit specialty replaces AI suggestions outright; suggestions apply
/// only when the attorney made no selection.
pub(in crate::api) fn resolve_specialty(
    explicit: Option<&str>,
    suggested: &[String],
) -> SpecialtyFilter {
    match explicit {
        Some(s) => SpecialtyFilter::Explicit(s.to_string()),
        None if suggested.is_empty() => SpecialtyFilter::Any,
        None => SpecialtyFilter::Suggested(suggested.to_vec()),
    }
}

/// Same replace-not-combine rule for location: an explicit location wins over
/// the jurisdiction the analyzer inferred.
pub(in crate::api) fn resolve_location(
    explicit: Option<&str>,
    jurisdiction: Option<&str>,
) -> Option<String> {
    explicit
        .map(ToString::to_string)
        .or_else(|| non_blank(jurisdiction).map(ToString::to_string))
}

/// Builds the effective free-text query and directory criteria for a request.
fn build_search_plan(
    request: &SearchExpertsRequest,
    analysis: Option<&CaseAnalysis>,
) -> (String, ExpertSearchCriteria) {
    let query = request.query.trim();

    let enhanced_query = match analysis {
        Some(a) => {
            let terms = a.search_terms();
            if terms.is_empty() {
                query.to_string()
            } else if query.is_empty() {
                terms
            } else {
                format!("{query} {terms}")
            }
        }
        None => query.to_string(),
    };

    let suggested = analysis.map_or(&[][..], |a| a.suggested_specialties.as_slice());
    let jurisdiction = analysis.and_then(|a| a.jurisdiction.as_deref());

    let criteria = ExpertSearchCriteria {
        text: non_blank(Some(enhanced_query.as_str())).map(ToString::to_string),
        specialty: resolve_specialty(request.explicit_specialty(), suggested),
        location: resolve_location(request.explicit_location(), jurisdiction),
        min_experience: request.min_experience.as_ref().and_then(NumericField::as_i32),
        max_experience: request.max_experience.as_ref().and_then(NumericField::as_i32),
        trial_testimony: request
            .trial_testimony
            .as_ref()
            .is_some_and(FlagField::requires)
            .then_some(true),
        min_rate: request.min_rate.as_ref().and_then(NumericField::as_decimal),
        max_rate: request.max_rate.as_ref().and_then(NumericField::as_decimal),
        languages: request.languages.clone(),
        certifications: non_blank(request.certifications.as_deref()).map(ToString::to_string),
    };

    (enhanced_query, criteria)
}

// ---------------------------------------------------------------------------
// Case analysis (soft-fail boundary)
// ---------------------------------------------------------------------------

/// Runs case analysis, swallowing every failure.
///
/// A missing client (no API key configured) and any provider, network, or
/// parse error all land on `None`: the search proceeds with explicit filters
/// only. Nothing from the analyzer may fail a search.
async fn analyze_case(
    analyzer: Option<&AnalyzerClient>,
    case_description: &str,
) -> Option<CaseAnalysis> {
    let Some(client) = analyzer else {
        tracing::warn!("ANTHROPIC_API_KEY not configured, skipping case analysis");
        return None;
    };

    match client.analyze(case_description).await {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            tracing::error!(error = %e, "case analysis failed, continuing without it");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

pub(in crate::api) async fn search_experts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SearchExpertsRequest>,
) -> Result<Json<SearchExpertsResponse>, SearchExpertsError> {
    if request.query.trim().is_empty() && request.case_description().is_none() {
        return Err(SearchExpertsError::MissingQuery);
    }

    // The analysis must land before the directory query is built: both the
    // enhanced query and the specialty/location fallbacks depend on it.
    let analysis = match request.case_description() {
        Some(description) => analyze_case(state.analyzer.as_deref(), description).await,
        None => None,
    };

    if let Some(availability) = request.availability() {
        tracing::debug!(availability, "availability filter accepted; directory only lists active experts");
    }

    let (enhanced_query, criteria) = build_search_plan(&request, analysis.as_ref());
    if analysis.is_some() {
        tracing::info!(request_id = %req_id.0, query = %enhanced_query, "search query enhanced from case analysis");
    }

    let rows = lexpert_db::search_experts(&state.pool, &criteria)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "expert directory query failed");
            SearchExpertsError::Directory
        })?;

    let experts: Vec<ExpertResult> = rows.into_iter().map(ExpertResult::from_row).collect();

    Ok(Json(SearchExpertsResponse {
        query: enhanced_query,
        original_query: request.query.clone(),
        case_analysis: analysis,
        total: experts.len(),
        experts,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
