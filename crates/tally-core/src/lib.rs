//! Core domain types, configuration, and errors for Tally.

pub mod config;
pub mod error;
pub mod ids;
pub mod records;

pub use config::TallyConfig;
pub use error::{GatewayError, GatewayResult};
pub use ids::{ActorId, RecordId, SessionId};
