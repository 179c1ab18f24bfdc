use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completed personality analysis for a single user.
///
/// Produced by the external questionnaire-analysis step and consumed here
/// read-only. A profile is never edited in place; a new completed analysis
/// replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Four-letter type code, e.g. "INTJ".
    #[serde(rename = "typeCode")]
    pub type_code: String,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
    /// Carried over from the analysis output; not part of scoring.
    #[serde(rename = "preferenceAlignment")]
    pub preference_alignment: f64,
    #[serde(rename = "preferenceBreakdown")]
    pub breakdown: PreferenceBreakdown,
    /// Trait name -> development score in [0, 100]. May be empty.
    #[serde(rename = "traitScores", default)]
    pub trait_scores: BTreeMap<String, f64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One preference axis: the dominant side and how pronounced it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisScore {
    pub preference: String,
    pub percentage: f64,
}

impl AxisScore {
    pub fn new(preference: impl Into<String>, percentage: f64) -> Self {
        Self {
            preference: preference.into(),
            percentage,
        }
    }
}

/// The four preference axes of a profile (E/I, S/N, T/F, J/P).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceBreakdown {
    #[serde(rename = "EI")]
    pub ei: AxisScore,
    #[serde(rename = "SN")]
    pub sn: AxisScore,
    #[serde(rename = "TF")]
    pub tf: AxisScore,
    #[serde(rename = "JP")]
    pub jp: AxisScore,
}

impl PreferenceBreakdown {
    /// Axes in fixed E/I, S/N, T/F, J/P order.
    pub fn axes(&self) -> [&AxisScore; 4] {
        [&self.ei, &self.sn, &self.tf, &self.jp]
    }
}

/// User attributes consumed read-only for filter evaluation.
///
/// Owned by the account service; only the fields the retrieval filters and
/// the response payload need are mapped here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAttributes {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub age: u8,
    pub gender: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "imageFileIds", default)]
    pub image_file_ids: Vec<String>,
}

impl UserAttributes {
    /// Both coordinates, or None when either is missing.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// One candidate from a compute pass, annotated with its score against the
/// requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "similarityScore")]
    pub score: f64,
    #[serde(rename = "typeCode")]
    pub type_code: String,
}

/// Persisted element of a user's match list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    #[serde(rename = "matchedUserId")]
    pub matched_user_id: String,
    #[serde(rename = "similarityScore")]
    pub similarity_score: f64,
    #[serde(rename = "typeCode")]
    pub type_code: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Persisted result of one compute pass. At most one record exists per user;
/// recomputation replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Sorted descending by similarity at write time.
    pub matches: Vec<MatchEntry>,
    /// Cardinality of the one-to-one pairing, not the length of `matches`.
    #[serde(rename = "totalMatches")]
    pub total_matches: u32,
    #[serde(rename = "calculatedAt")]
    pub calculated_at: chrono::DateTime<chrono::Utc>,
}
