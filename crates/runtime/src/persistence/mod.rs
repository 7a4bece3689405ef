//! Persistence Gateway: save slot, load, and leaderboard publication.
//!
//! Every operation reports an explicit [`PersistOutcome`] or
//! [`PersistenceError`]; deciding whether to log, retry, or surface a failure
//! belongs to the caller.
mod error;
mod gateway;
mod worker;

pub use error::{MalformedDocument, PersistenceError, Result};
pub use gateway::{LoadOutcome, PersistOutcome, PersistenceGateway, SkipReason, Standings};
pub use worker::CheckpointReport;
pub(crate) use worker::{CheckpointQueue, Job};
