//! Database operations for the `experts` directory table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// Page size for directory searches.
pub const SEARCH_RESULT_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `experts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExpertRow {
    pub id: Uuid,
    pub full_name: String,
    pub specialization: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub years_of_experience: i32,
    pub hourly_rate: Decimal,
    pub rating: Option<f64>,
    pub review_count: i32,
    pub case_count: i32,
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
    pub education: Vec<String>,
    pub trial_testimony: bool,
    pub contact_status: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub profile_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Search criteria
// ---------------------------------------------------------------------------

/// Specialty constraint for a directory search.
///
/// An explicit choice replaces suggestions entirely; suggestions are
/// OR-matched against the specialization column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialtyFilter {
    Any,
    Explicit(String),
    Suggested(Vec<String>),
}

impl Default for SpecialtyFilter {
    fn default() -> Self {
        SpecialtyFilter::Any
    }
}

/// Fully-resolved search parameters for [`search_experts`].
///
/// All predicates are conjunctive. `None`/empty fields add no constraint.
#[derive(Debug, Clone, Default)]
pub struct ExpertSearchCriteria {
    /// Free text, OR-matched (case-insensitive substring) against name,
    /// specialization, bio, and location.
    pub text: Option<String>,
    pub specialty: SpecialtyFilter,
    pub location: Option<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    /// `Some(v)` requires `trial_testimony = v`; `None` adds no constraint.
    pub trial_testimony: Option<bool>,
    pub min_rate: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    /// Experts matching any of these languages pass (array overlap).
    pub languages: Vec<String>,
    /// Case-insensitive substring match against each certification entry.
    pub certifications: Option<String>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Search active experts matching the given criteria, best-rated first.
///
/// Returns at most [`SEARCH_RESULT_LIMIT`] rows ordered by rating descending
/// (unrated experts last). Every optional predicate is skipped when absent,
/// so an empty criteria returns the top-rated page of the whole directory.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_experts(
    pool: &PgPool,
    criteria: &ExpertSearchCriteria,
) -> Result<Vec<ExpertRow>, DbError> {
    let (explicit_specialty, suggested_specialties) = match &criteria.specialty {
        SpecialtyFilter::Any => (None, None),
        SpecialtyFilter::Explicit(s) => (Some(s.as_str()), None),
        SpecialtyFilter::Suggested(list) if list.is_empty() => (None, None),
        SpecialtyFilter::Suggested(list) => (None, Some(list.as_slice())),
    };

    let languages = (!criteria.languages.is_empty()).then_some(criteria.languages.as_slice());

    let rows = sqlx::query_as::<_, ExpertRow>(
        "SELECT id, full_name, specialization, bio, location, years_of_experience, \
                hourly_rate, rating, review_count, case_count, languages, certifications, \
                education, trial_testimony, contact_status, contact_email, contact_phone, \
                linkedin_url, profile_url, is_active, created_at, updated_at \
         FROM experts \
         WHERE is_active = true \
           AND ($1::text IS NULL \
                OR full_name ILIKE '%' || $1 || '%' \
                OR specialization ILIKE '%' || $1 || '%' \
                OR bio ILIKE '%' || $1 || '%' \
                OR location ILIKE '%' || $1 || '%') \
           AND ($2::text IS NULL OR specialization ILIKE '%' || $2 || '%') \
           AND ($3::text[] IS NULL OR EXISTS ( \
                SELECT 1 FROM unnest($3::text[]) AS s \
                WHERE specialization ILIKE '%' || s || '%')) \
           AND ($4::text IS NULL OR location ILIKE '%' || $4 || '%') \
           AND ($5::integer IS NULL OR years_of_experience >= $5) \
           AND ($6::integer IS NULL OR years_of_experience <= $6) \
           AND ($7::boolean IS NULL OR trial_testimony = $7) \
           AND ($8::numeric IS NULL OR hourly_rate >= $8) \
           AND ($9::numeric IS NULL OR hourly_rate <= $9) \
           AND ($10::text[] IS NULL OR languages && $10::text[]) \
           AND ($11::text IS NULL OR EXISTS ( \
                SELECT 1 FROM unnest(certifications) AS c \
                WHERE c ILIKE '%' || $11 || '%')) \
         ORDER BY rating DESC NULLS LAST \
         LIMIT $12",
    )
    .bind(criteria.text.as_deref())
    .bind(explicit_specialty)
    .bind(suggested_specialties)
    .bind(criteria.location.as_deref())
    .bind(criteria.min_experience)
    .bind(criteria.max_experience)
    .bind(criteria.trial_testimony)
    .bind(criteria.min_rate)
    .bind(criteria.max_rate)
    .bind(languages)
    .bind(criteria.certifications.as_deref())
    .bind(SEARCH_RESULT_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
