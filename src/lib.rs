//! Haven Match - personality-compatibility matching engine for the Haven
//! flatmate platform.
//!
//! Every user with a completed personality analysis gets scored against
//! every other profiled user; candidates above a configurable threshold are
//! paired one-to-one over a compatibility graph, and the ranked candidate
//! list is persisted per user and served back through filtered, paginated
//! queries.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{compatibility_score, haversine_km, MatchEngine, MatchOutcome};
pub use models::{
    ComputeSummary, MatchPage, MatchQuery, MatchRecord, PersonalityProfile, RankedMatch,
};
pub use services::{MatchError, MatchService};

/// Install the global tracing subscriber according to the logging settings.
///
/// `RUST_LOG` wins over the configured level when present.
pub fn init_tracing(settings: &config::LoggingSettings) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}
