use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::distance::haversine_km;
use crate::core::filters::FilterChain;
use crate::core::matcher::MatchEngine;
use crate::models::{
    ComputeSummary, MatchEntry, MatchPage, MatchQuery, MatchRecord, ResolvedMatch,
};
use crate::services::store::{MatchStore, ProfileRepository, StoreError};

/// Errors surfaced by the matching operations.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The requester has no completed personality profile.
    #[error("no personality profile for user {0}")]
    ProfileNotFound(String),

    /// Retrieval for a user whose matches were never computed.
    #[error("no stored matches for user {0}")]
    RecordNotFound(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The matching engine's in-process surface: compute a user's matches and
/// serve filtered pages of the stored result.
pub struct MatchService {
    profiles: Arc<dyn ProfileRepository>,
    store: Arc<dyn MatchStore>,
    engine: MatchEngine,
    max_candidates: usize,
}

impl MatchService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        store: Arc<dyn MatchStore>,
        settings: &MatchingSettings,
    ) -> Self {
        Self {
            profiles,
            store,
            engine: MatchEngine::new(settings.threshold),
            max_candidates: settings.max_candidates,
        }
    }

    /// Score the requester against every other profiled user, pair the
    /// surviving candidates one-to-one, and persist the ranked list
    /// wholesale.
    ///
    /// Each invocation is self-contained; runs for different users never
    /// coordinate, and concurrent runs for the same user resolve through
    /// the store's last-writer-wins upsert. An empty candidate set is a
    /// valid outcome, not an error: the record is written with an empty
    /// list and a pairing count of zero.
    pub async fn compute(&self, user_id: &str) -> Result<ComputeSummary, MatchError> {
        let requester = self
            .profiles
            .personality_profile(user_id)
            .await?
            .ok_or_else(|| MatchError::ProfileNotFound(user_id.to_string()))?;

        let pool = self
            .profiles
            .candidate_profiles(user_id, self.max_candidates)
            .await?;
        if pool.len() == self.max_candidates {
            warn!(
                "candidate pool for {} capped at {}; later profiles not considered",
                user_id, self.max_candidates
            );
        }
        debug!("scoring {} candidates for {}", pool.len(), user_id);

        let outcome = self.engine.compute(&requester, &pool);

        let calculated_at = chrono::Utc::now();
        let record = MatchRecord {
            user_id: user_id.to_string(),
            matches: outcome
                .ranked
                .iter()
                .map(|m| MatchEntry {
                    matched_user_id: m.user_id.clone(),
                    similarity_score: m.score,
                    type_code: m.type_code.clone(),
                    timestamp: calculated_at,
                })
                .collect(),
            total_matches: outcome.total_matches as u32,
            calculated_at,
        };
        self.store.upsert(record).await?;

        info!(
            "computed matches for {}: {} ranked, {} paired",
            user_id,
            outcome.ranked.len(),
            outcome.total_matches
        );

        Ok(ComputeSummary {
            matches: outcome.ranked,
            total_matches: outcome.total_matches as u32,
        })
    }

    /// Serve one filtered, paginated page of the stored match list.
    ///
    /// The query is validated before the store is touched. Matched users
    /// are resolved to their current attributes in one batch; references
    /// that no longer resolve are dropped from the result rather than
    /// failing the call.
    pub async fn retrieve(
        &self,
        user_id: &str,
        query: &MatchQuery,
    ) -> Result<MatchPage, MatchError> {
        query
            .validate()
            .map_err(|e| MatchError::InvalidFilter(e.to_string()))?;

        let record = self
            .store
            .find(user_id)
            .await?
            .ok_or_else(|| MatchError::RecordNotFound(user_id.to_string()))?;

        // The requester's coordinates only matter under a distance cap.
        let origin = if query.max_distance_km.is_some() {
            let key = user_id.to_string();
            self.profiles
                .attributes_for(std::slice::from_ref(&key))
                .await?
                .remove(user_id)
                .and_then(|attrs| attrs.coordinates())
        } else {
            None
        };

        let ids: Vec<String> = record
            .matches
            .iter()
            .map(|m| m.matched_user_id.clone())
            .collect();
        let mut attributes = self.profiles.attributes_for(&ids).await?;

        let chain = FilterChain::new(query, origin);
        let mut filtered: Vec<ResolvedMatch> = Vec::new();
        let mut unresolved = 0usize;
        for entry in &record.matches {
            let Some(attrs) = attributes.remove(&entry.matched_user_id) else {
                unresolved += 1;
                continue;
            };
            if !chain.accepts(entry, &attrs) {
                continue;
            }
            let distance_km = match (origin, attrs.coordinates()) {
                (Some(origin), Some(target)) => Some(haversine_km(origin, target)),
                _ => None,
            };
            filtered.push(ResolvedMatch {
                matched_user_id: entry.matched_user_id.clone(),
                similarity_score: entry.similarity_score,
                type_code: entry.type_code.clone(),
                timestamp: entry.timestamp,
                first_name: attrs.first_name,
                last_name: attrs.last_name,
                age: attrs.age,
                gender: attrs.gender,
                distance_km,
            });
        }
        if unresolved > 0 {
            warn!(
                "dropped {} unresolved match references for {}",
                unresolved, user_id
            );
        }

        // Pagination indexes into this order: score descending, matched id
        // as tie-break.
        filtered.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.matched_user_id.cmp(&b.matched_user_id))
        });

        let total = filtered.len();
        let limit = query.limit as usize;
        let skip = (query.page as usize - 1) * limit;
        let matches: Vec<ResolvedMatch> = filtered.into_iter().skip(skip).take(limit).collect();

        Ok(MatchPage {
            matches,
            total,
            page: query.page,
            total_pages: total.div_ceil(limit) as u32,
        })
    }
}
