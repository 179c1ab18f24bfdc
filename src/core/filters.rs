use crate::core::distance::{haversine_km, BoundingBox};
use crate::models::{MatchEntry, MatchQuery, UserAttributes};

/// Ordered predicate chain for stored-match retrieval.
///
/// Evaluation order is fixed: similarity, age range, gender, distance.
/// Keeping the whole chain in one place keeps exclusion semantics
/// reproducible instead of scattering checks across the retrieval path.
pub struct FilterChain<'a> {
    query: &'a MatchQuery,
    /// Requester coordinates; only consulted when a distance cap is set.
    origin: Option<(f64, f64)>,
    prefilter: Option<BoundingBox>,
}

impl<'a> FilterChain<'a> {
    pub fn new(query: &'a MatchQuery, origin: Option<(f64, f64)>) -> Self {
        let prefilter = match (query.max_distance_km, origin) {
            (Some(radius), Some(origin)) => Some(BoundingBox::around(origin, radius)),
            _ => None,
        };
        Self {
            query,
            origin,
            prefilter,
        }
    }

    /// Whether a stored match, with its resolved attributes, survives every
    /// requested filter.
    pub fn accepts(&self, entry: &MatchEntry, attrs: &UserAttributes) -> bool {
        entry.similarity_score >= self.query.min_similarity
            && self.within_age_range(attrs)
            && self.gender_matches(attrs)
            && self.within_distance(attrs)
    }

    #[inline]
    fn within_age_range(&self, attrs: &UserAttributes) -> bool {
        if let Some(min) = self.query.min_age {
            if attrs.age < min {
                return false;
            }
        }
        if let Some(max) = self.query.max_age {
            if attrs.age > max {
                return false;
            }
        }
        true
    }

    #[inline]
    fn gender_matches(&self, attrs: &UserAttributes) -> bool {
        self.query
            .gender
            .as_deref()
            .map_or(true, |wanted| attrs.gender == wanted)
    }

    /// With a distance cap set, both endpoints must carry coordinates; a
    /// missing side excludes the candidate rather than failing the query.
    #[inline]
    fn within_distance(&self, attrs: &UserAttributes) -> bool {
        let Some(max_km) = self.query.max_distance_km else {
            return true;
        };
        let (Some(origin), Some(target)) = (self.origin, attrs.coordinates()) else {
            return false;
        };
        if let Some(bbox) = &self.prefilter {
            if !bbox.contains(target) {
                return false;
            }
        }
        haversine_km(origin, target) <= max_km
    }
}
