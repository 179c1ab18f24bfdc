use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{MatchRecord, PersonalityProfile, UserAttributes};

/// Errors that can occur against persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to data produced elsewhere on the platform: completed
/// personality profiles and the user attributes the retrieval filters need.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Latest completed personality profile for a user, if any.
    async fn personality_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<PersonalityProfile>, StoreError>;

    /// Every other user's profile, up to `cap`, in stable user-id order.
    /// The cap keeps the quadratic graph stage bounded.
    async fn candidate_profiles(
        &self,
        exclude_user_id: &str,
        cap: usize,
    ) -> Result<Vec<PersonalityProfile>, StoreError>;

    /// Attribute lookup for a batch of users. Ids that resolve to nothing
    /// are simply absent from the result, never an error.
    async fn attributes_for(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, UserAttributes>, StoreError>;
}

/// Persistence for computed match records, one per user.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Replace any previous record for the same user wholesale. Concurrent
    /// recomputation for one user resolves last-writer-wins.
    async fn upsert(&self, record: MatchRecord) -> Result<(), StoreError>;

    async fn find(&self, user_id: &str) -> Result<Option<MatchRecord>, StoreError>;
}
