// Core algorithm exports
pub mod bipartite;
pub mod distance;
pub mod filters;
pub mod graph;
pub mod matcher;
pub mod scoring;

pub use bipartite::{maximum_matching, Pairing};
pub use distance::{haversine_km, BoundingBox};
pub use filters::FilterChain;
pub use graph::CompatibilityGraph;
pub use matcher::{MatchEngine, MatchOutcome, DEFAULT_THRESHOLD};
pub use scoring::compatibility_score;
