use serde::{Deserialize, Serialize};
use crate::models::domain::RankedMatch;

/// Outcome of a full match computation for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeSummary {
    pub matches: Vec<RankedMatch>,
    /// One-to-one pairing cardinality; usually smaller than `matches.len()`.
    #[serde(rename = "totalMatches")]
    pub total_matches: u32,
}

/// One stored match with the matched user's attributes resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedMatch {
    #[serde(rename = "matchedUserId")]
    pub matched_user_id: String,
    #[serde(rename = "similarityScore")]
    pub similarity_score: f64,
    #[serde(rename = "typeCode")]
    pub type_code: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub age: u8,
    pub gender: String,
    /// Distance from the requester, when both sides have coordinates.
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// A filtered, paginated page of a user's stored matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPage {
    pub matches: Vec<ResolvedMatch>,
    /// Count after filtering, across all pages.
    pub total: usize,
    pub page: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}
