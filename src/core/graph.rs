use rayon::prelude::*;

use crate::core::scoring::compatibility_score;
use crate::models::PersonalityProfile;

/// Thresholded compatibility adjacency over a candidate set.
///
/// Square matrix in row-major order. An edge (i, j) holds when the two
/// candidates score at or above the threshold against *each other*; the
/// diagonal stays false. The requester is not part of the candidate set —
/// the pairing downstream matches candidates with one another.
#[derive(Debug, Clone)]
pub struct CompatibilityGraph {
    n: usize,
    edges: Vec<bool>,
}

impl CompatibilityGraph {
    /// Pairwise-score the candidates and keep edges at or above `threshold`.
    ///
    /// Each pair is independent, so rows are built in parallel; the result
    /// does not depend on scheduling.
    pub fn build(candidates: &[&PersonalityProfile], threshold: f64) -> Self {
        let n = candidates.len();
        let rows: Vec<Vec<bool>> = (0..n)
            .into_par_iter()
            .map(|i| {
                (0..n)
                    .map(|j| {
                        i != j && compatibility_score(candidates[i], candidates[j]) >= threshold
                    })
                    .collect()
            })
            .collect();

        Self {
            n,
            edges: rows.concat(),
        }
    }

    /// Assemble a graph from prebuilt adjacency rows. Used by the matcher
    /// tests, where crafting profiles for every edge shape would obscure
    /// what is being exercised.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let n = rows.len();
        Self {
            n,
            edges: rows.concat(),
        }
    }

    /// Number of candidate vertices on each side.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.edges[i * self.n + j]
    }

    /// Number of directed edges; useful for logging graph density.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| **e).count()
    }
}
