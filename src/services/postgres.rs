use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::time::Duration;

use crate::models::{
    MatchEntry, MatchRecord, PersonalityProfile, PreferenceBreakdown, UserAttributes,
};
use crate::services::store::{MatchStore, ProfileRepository, StoreError};

/// PostgreSQL-backed persistence.
///
/// Owns the `match_records` table (created by this crate's migrations) and
/// reads the platform-owned `personality_profiles` and `users` tables for
/// profile and attribute lookups.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and run the crate's migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl MatchStore for PostgresStore {
    async fn upsert(&self, record: MatchRecord) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO match_records (user_id, matches, total_matches, calculated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id)
            DO UPDATE SET
                matches = EXCLUDED.matches,
                total_matches = EXCLUDED.total_matches,
                calculated_at = EXCLUDED.calculated_at
        "#;

        sqlx::query(query)
            .bind(&record.user_id)
            .bind(Json(&record.matches))
            .bind(record.total_matches as i32)
            .bind(record.calculated_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "stored match record for {} ({} entries, {} paired)",
            record.user_id,
            record.matches.len(),
            record.total_matches
        );

        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<MatchRecord>, StoreError> {
        let query = r#"
            SELECT user_id, matches, total_matches, calculated_at
            FROM match_records
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| {
            let Json(matches): Json<Vec<MatchEntry>> = row.try_get("matches")?;
            Ok(MatchRecord {
                user_id: row.try_get("user_id")?,
                matches,
                total_matches: row.try_get::<i32, _>("total_matches")? as u32,
                calculated_at: row.try_get("calculated_at")?,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl ProfileRepository for PostgresStore {
    async fn personality_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<PersonalityProfile>, StoreError> {
        let query = r#"
            SELECT user_id, type_code, overall_score, preference_alignment,
                   breakdown, trait_scores, created_at
            FROM personality_profiles
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(profile_from_row).transpose()
    }

    async fn candidate_profiles(
        &self,
        exclude_user_id: &str,
        cap: usize,
    ) -> Result<Vec<PersonalityProfile>, StoreError> {
        let query = r#"
            SELECT DISTINCT ON (user_id)
                   user_id, type_code, overall_score, preference_alignment,
                   breakdown, trait_scores, created_at
            FROM personality_profiles
            WHERE user_id <> $1
            ORDER BY user_id, created_at DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(exclude_user_id)
            .bind(cap as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(profile_from_row).collect()
    }

    async fn attributes_for(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, UserAttributes>, StoreError> {
        let query = r#"
            SELECT user_id, first_name, last_name, age, gender,
                   latitude, longitude, image_file_ids
            FROM users
            WHERE user_id = ANY($1)
        "#;

        let rows = sqlx::query(query)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut found = HashMap::with_capacity(rows.len());
        for row in rows {
            let attrs = UserAttributes {
                user_id: row.try_get("user_id")?,
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                age: row.try_get::<i16, _>("age")? as u8,
                gender: row.try_get("gender")?,
                latitude: row.try_get("latitude")?,
                longitude: row.try_get("longitude")?,
                image_file_ids: row.try_get("image_file_ids")?,
            };
            found.insert(attrs.user_id.clone(), attrs);
        }

        Ok(found)
    }
}

fn profile_from_row(row: sqlx::postgres::PgRow) -> Result<PersonalityProfile, StoreError> {
    let Json(breakdown): Json<PreferenceBreakdown> = row.try_get("breakdown")?;
    let Json(trait_scores): Json<std::collections::BTreeMap<String, f64>> =
        row.try_get("trait_scores")?;

    Ok(PersonalityProfile {
        user_id: row.try_get("user_id")?,
        type_code: row.try_get("type_code")?,
        overall_score: row.try_get("overall_score")?,
        preference_alignment: row.try_get("preference_alignment")?,
        breakdown,
        trait_scores,
        created_at: row.try_get("created_at")?,
    })
}
