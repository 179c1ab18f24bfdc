// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AxisScore, MatchEntry, MatchRecord, PersonalityProfile, PreferenceBreakdown, RankedMatch,
    UserAttributes,
};
pub use requests::MatchQuery;
pub use responses::{ComputeSummary, MatchPage, ResolvedMatch};
