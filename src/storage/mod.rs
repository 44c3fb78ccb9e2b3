pub mod json_pool;

pub use json_pool::JsonPoolStore;

use crate::model::{MatchEntry, StorageError, UnmatchedEntry};

/// Pool contents as loaded at process start.
#[derive(Debug, Default)]
pub struct PoolState {
    pub matches: Vec<MatchEntry>,
    pub unmatched: Vec<UnmatchedEntry>,
}

/// Persistence seam for the pools. The JSON-file store is the only
/// implementation today; the trait keeps matching logic unaware of it.
pub trait PoolStore {
    fn load(&self) -> Result<PoolState, StorageError>;
    fn save(
        &self,
        matches: &[MatchEntry],
        unmatched: &[UnmatchedEntry],
    ) -> Result<(), StorageError>;
}
