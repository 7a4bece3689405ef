//! Session orchestration and persistence for the mining game.
//!
//! This crate drives [`mine_core`] for one player at a time and connects it to
//! an external document store. Consumers build a [`GameSession`] (usually via
//! [`RuntimeConfig::build_session`]), call its synchronous gameplay methods,
//! and let checkpoints run in the background.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns the state and issues checkpoints
//! - [`persistence`] hosts the gateway that reads and writes user documents
//! - [`documents`] defines the versioned document schemas
//! - [`repository`] provides the document store abstraction and adapters
//! - [`identity`] answers who is signed in
pub mod config;
pub mod documents;
pub mod error;
pub mod identity;
pub mod persistence;
pub mod repository;
pub mod session;
pub mod types;

pub use config::{RuntimeConfig, StoreKind};
pub use documents::{GameStateDocument, LeaderboardEntry, PlayerProfile};
pub use error::{Result, RuntimeError};
pub use identity::{IdentityProvider, SessionIdentity};
pub use persistence::{
    CheckpointReport, LoadOutcome, MalformedDocument, PersistOutcome, PersistenceError,
    PersistenceGateway, SkipReason, Standings,
};
pub use repository::{DocumentStore, FileDocumentStore, InMemoryDocumentStore, StoreError};
pub use session::GameSession;
pub use types::{TimestampMs, UserId};
