use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{MatchRecord, PersonalityProfile, UserAttributes};
use crate::services::store::{MatchStore, ProfileRepository, StoreError};

/// In-memory profile source. Backs the test suites and is good enough for
/// single-node deployments that hydrate profiles at startup.
#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: RwLock<HashMap<String, PersonalityProfile>>,
    attributes: RwLock<HashMap<String, UserAttributes>>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_profile(&self, profile: PersonalityProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }

    pub async fn insert_attributes(&self, attrs: UserAttributes) {
        self.attributes
            .write()
            .await
            .insert(attrs.user_id.clone(), attrs);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn personality_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<PersonalityProfile>, StoreError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn candidate_profiles(
        &self,
        exclude_user_id: &str,
        cap: usize,
    ) -> Result<Vec<PersonalityProfile>, StoreError> {
        let map = self.profiles.read().await;
        let mut pool: Vec<PersonalityProfile> = map
            .values()
            .filter(|p| p.user_id != exclude_user_id)
            .cloned()
            .collect();
        // Stable order so graph construction and pairing are reproducible.
        pool.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        pool.truncate(cap);
        Ok(pool)
    }

    async fn attributes_for(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, UserAttributes>, StoreError> {
        let map = self.attributes.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| map.get(id).map(|attrs| (id.clone(), attrs.clone())))
            .collect())
    }
}

/// In-memory match record store with the same wholesale-replace contract as
/// the PostgreSQL adapter.
#[derive(Default)]
pub struct InMemoryMatchStore {
    records: RwLock<HashMap<String, MatchRecord>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn upsert(&self, record: MatchRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.user_id.clone(), record);
        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<MatchRecord>, StoreError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }
}
