use rayon::prelude::*;
use tracing::debug;

use crate::core::bipartite::maximum_matching;
use crate::core::graph::CompatibilityGraph;
use crate::core::scoring::compatibility_score;
use crate::models::{PersonalityProfile, RankedMatch};

/// Default eligibility threshold. The platform historically ran variants
/// with different cutoffs; 70 is the documented choice, overridable through
/// `matching.threshold`.
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// Result of one compute pass.
///
/// `ranked` holds every candidate at or above the threshold, ordered by
/// score. `total_matches` is the cardinality of the one-to-one pairing over
/// the candidate graph and is usually smaller than `ranked.len()`; the two
/// measure different things and callers must not assume they agree.
#[derive(Debug)]
pub struct MatchOutcome {
    pub ranked: Vec<RankedMatch>,
    pub total_matches: usize,
}

/// Pure matching engine: scoring, graph construction and pairing over an
/// in-memory candidate pool. No I/O; one call is one self-contained unit.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    threshold: f64,
}

impl MatchEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score the requester against the pool, pair the surviving candidates
    /// one-to-one, and return the ranked list plus pairing cardinality.
    ///
    /// Candidate order inside the graph follows pool order, which makes the
    /// pairing reproducible for a given pool; the ranked list is sorted by
    /// score descending with user id as tie-break.
    pub fn compute(&self, requester: &PersonalityProfile, pool: &[PersonalityProfile]) -> MatchOutcome {
        // Requester-vs-candidate pass. Pairs are independent, so this is
        // safe to fan out; order is preserved by the collect.
        let scored: Vec<(&PersonalityProfile, f64)> = pool
            .par_iter()
            .filter(|candidate| candidate.user_id != requester.user_id)
            .map(|candidate| (candidate, compatibility_score(requester, candidate)))
            .filter(|(_, score)| *score >= self.threshold)
            .collect();

        // The pairing runs among the candidates themselves, not against the
        // requester, so the graph needs candidate-to-candidate scores.
        let candidates: Vec<&PersonalityProfile> = scored.iter().map(|(p, _)| *p).collect();
        let graph = CompatibilityGraph::build(&candidates, self.threshold);
        debug!(
            "candidate graph: {} vertices, {} edges",
            graph.len(),
            graph.edge_count()
        );

        let pairing = maximum_matching(&graph);

        let mut ranked: Vec<RankedMatch> = scored
            .into_iter()
            .map(|(candidate, score)| RankedMatch {
                user_id: candidate.user_id.clone(),
                score,
                type_code: candidate.type_code.clone(),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        MatchOutcome {
            ranked,
            total_matches: pairing.count,
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
