use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Filters and paging for stored-match retrieval.
///
/// Validated before the store is touched; a query that fails validation
/// never reaches persistence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_age_bounds"))]
pub struct MatchQuery {
    #[serde(rename = "minSimilarity", default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_similarity: f64,
    #[serde(rename = "minAge", default)]
    #[validate(range(min = 18, max = 120))]
    pub min_age: Option<u8>,
    #[serde(rename = "maxAge", default)]
    #[validate(range(min = 18, max = 120))]
    pub max_age: Option<u8>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "maxDistanceKm", default)]
    #[validate(range(min = 0.0))]
    pub max_distance_km: Option<f64>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            min_similarity: 0.0,
            min_age: None,
            max_age: None,
            gender: None,
            max_distance_km: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

fn validate_age_bounds(query: &MatchQuery) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (query.min_age, query.max_age) {
        if min > max {
            return Err(ValidationError::new("age_range_inverted"));
        }
    }
    Ok(())
}
