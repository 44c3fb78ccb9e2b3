// Core structs: catalog records, pool entries, resolution results
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the canonical model catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: u32,
    pub marka_id: u32,
    pub model: String,
}

/// A scraped application/compatibility record: raw brand and model text
/// as it appeared on the supplier portal.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationRecord {
    pub marka: String,
    pub model: String,
}

/// Outcome of resolving one raw (brand, model) pair. A `None` id is a
/// legitimate miss, not an error; callers must handle partial resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub marka_id: Option<u32>,
    pub model_id: Option<u32>,
}

/// Confirmed match, persisted in the match pool. Once a normalized key is
/// in the pool it is considered permanently resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub original: String,
    pub normalized: String,
    pub model_id: u32,
    pub marka_id: u32,
}

/// Failed lookup, persisted in the unmatched pool for manual curation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedEntry {
    pub marka_name: String,
    pub model_name: String,
    pub original_marka: String,
    pub original_model: String,
}

/// Per-record output row consumed by the spreadsheet-writing step.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRecord {
    pub marka: String,
    pub model: String,
    pub marka_id: Option<u32>,
    pub model_id: Option<u32>,
}

/// Envelope written to the resolutions output file.
#[derive(Debug, Serialize)]
pub struct ResolutionExport {
    pub generated_at: DateTime<Utc>,
    pub records: Vec<ResolvedRecord>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("pool file I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The pool file exists but is not valid JSON. Fatal: starting from an
    /// empty pool would re-flag entries resolved in prior runs.
    #[error("pool file corrupt at {path}: {source}")]
    PoolCorrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("pool serialize error at {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog parse error at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid brand id {id:?} in brand table")]
    InvalidBrandId { id: String },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("source parse error at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
