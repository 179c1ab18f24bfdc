use crate::core::graph::CompatibilityGraph;

/// A maximum-cardinality pairing over a compatibility graph.
#[derive(Debug, Clone)]
pub struct Pairing {
    /// Number of paired vertices on the left side.
    pub count: usize,
    /// For each right vertex, the left vertex it ended up paired with.
    pub right_to_left: Vec<Option<usize>>,
}

impl Pairing {
    /// True when no vertex is used more than once on either side.
    pub fn is_valid(&self) -> bool {
        let mut lefts: Vec<usize> = self.right_to_left.iter().flatten().copied().collect();
        let assigned = lefts.len();
        lefts.sort_unstable();
        lefts.dedup();
        lefts.len() == assigned && assigned == self.count
    }
}

/// Kuhn's augmenting-path algorithm for maximum-cardinality bipartite
/// matching.
///
/// Left vertices are tried in increasing index order and the search prefers
/// lower-numbered right vertices, so ties resolve positionally and the
/// result is reproducible. Cardinality-maximal only: edge scores play no
/// part beyond thresholding, a deliberate simplification. O(V * E).
pub fn maximum_matching(graph: &CompatibilityGraph) -> Pairing {
    let n = graph.len();
    let mut right_to_left: Vec<Option<usize>> = vec![None; n];
    let mut count = 0;

    for u in 0..n {
        // Fresh per left vertex: a right vertex already claimed in an
        // earlier round must stay reachable so its owner can be displaced
        // along an augmenting path.
        let mut seen = vec![false; n];
        if augment(graph, u, &mut seen, &mut right_to_left) {
            count += 1;
        }
    }

    Pairing {
        count,
        right_to_left,
    }
}

/// Try to pair `u`, recursively evicting current owners along an
/// alternating path. Returns true when the matching grew by one.
fn augment(
    graph: &CompatibilityGraph,
    u: usize,
    seen: &mut [bool],
    right_to_left: &mut [Option<usize>],
) -> bool {
    for v in 0..graph.len() {
        if graph.has_edge(u, v) && !seen[v] {
            seen[v] = true;
            let claimable = match right_to_left[v] {
                None => true,
                Some(owner) => augment(graph, owner, seen, right_to_left),
            };
            if claimable {
                right_to_left[v] = Some(u);
                return true;
            }
        }
    }
    false
}
