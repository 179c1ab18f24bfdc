// Service exports
pub mod matches;
pub mod memory;
pub mod postgres;
pub mod store;

pub use matches::{MatchError, MatchService};
pub use memory::{InMemoryMatchStore, InMemoryProfiles};
pub use postgres::PostgresStore;
pub use store::{MatchStore, ProfileRepository, StoreError};
