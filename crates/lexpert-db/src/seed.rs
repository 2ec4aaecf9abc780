use lexpert_core::roster::ExpertConfig;
use sqlx::PgPool;

use crate::DbError;

/// Upsert roster experts into the directory, keyed on `contact_email`.
///
/// Returns the number of experts processed (inserted or updated).
/// All upserts run inside a single transaction; if any operation fails
/// the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_experts(pool: &PgPool, experts: &[ExpertConfig]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for expert in experts {
        sqlx::query(
            "INSERT INTO experts (full_name, specialization, bio, location, years_of_experience, \
                 hourly_rate, languages, certifications, education, trial_testimony, \
                 contact_status, contact_email, contact_phone, linkedin_url, profile_url, is_active) \
             VALUES ($1, $2, $3, $4, $5, CAST($6 AS numeric), $7, $8, $9, $10, $11, $12, $13, $14, $15, true) \
             ON CONFLICT (contact_email) DO UPDATE SET \
                 full_name = EXCLUDED.full_name, \
                 specialization = EXCLUDED.specialization, \
                 bio = EXCLUDED.bio, \
                 location = EXCLUDED.location, \
                 years_of_experience = EXCLUDED.years_of_experience, \
                 hourly_rate = EXCLUDED.hourly_rate, \
                 languages = EXCLUDED.languages, \
                 certifications = EXCLUDED.certifications, \
                 education = EXCLUDED.education, \
                 trial_testimony = EXCLUDED.trial_testimony, \
                 contact_status = EXCLUDED.contact_status, \
                 contact_phone = EXCLUDED.contact_phone, \
                 linkedin_url = EXCLUDED.linkedin_url, \
                 profile_url = EXCLUDED.profile_url, \
                 updated_at = NOW()",
        )
        .bind(&expert.full_name)
        .bind(&expert.specialization)
        .bind(&expert.bio)
        .bind(&expert.location)
        .bind(expert.years_of_experience)
        .bind(expert.hourly_rate)
        .bind(&expert.languages)
        .bind(&expert.certifications)
        .bind(&expert.education)
        .bind(expert.trial_testimony)
        .bind(expert.contact_status.to_string())
        .bind(&expert.contact_email)
        .bind(&expert.contact_phone)
        .bind(&expert.linkedin_url)
        .bind(&expert.profile_url)
        .execute(&mut *tx)
        .await?;

        count += 1;
    }

    tx.commit().await?;
    Ok(count)
}
