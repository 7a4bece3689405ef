//! Document store layer for data that changes during play.
//!
//! The store is an external key-value document service: `put`/`get` by
//! collection and key, plus an ordered top-N query. Implementations here
//! back it with process memory (tests, offline play) or JSON files on disk.
//! No transactions, indexing, or retry logic live at this layer.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{Result, StoreError};
pub use file::FileDocumentStore;
pub use memory::InMemoryDocumentStore;
pub use traits::{DocumentStore, rank_by_field};
