//! Canonical catalog loading and normalized-key index construction.
//!
//! The brand table maps string-encoded integer IDs to display names; the
//! model table is an array of records. Both are normalized once at load into
//! O(1) lookup maps that stay read-only for the rest of the run.

use std::collections::HashMap;
use std::fs;
use tracing::warn;

use crate::model::{CatalogError, ModelRecord};
use crate::normalizer::NameNormalizer;

pub fn load_brand_table(path: &str) -> Result<HashMap<String, String>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.to_string(),
        source: e,
    })
}

pub fn load_model_table(path: &str) -> Result<Vec<ModelRecord>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.to_string(),
        source: e,
    })
}

/// Normalized brand name -> brand id.
#[derive(Debug)]
pub struct BrandIndex {
    by_key: HashMap<String, u32>,
}

impl BrandIndex {
    pub fn build(
        table: &HashMap<String, String>,
        normalizer: &mut NameNormalizer,
    ) -> Result<Self, CatalogError> {
        let mut by_key = HashMap::with_capacity(table.len());
        for (raw_id, name) in table {
            let id: u32 = raw_id
                .parse()
                .map_err(|_| CatalogError::InvalidBrandId { id: raw_id.clone() })?;
            let key = normalizer.normalize_brand(name);
            if let Some(previous) = by_key.insert(key.clone(), id) {
                // last write wins, but a collision usually means a catalog
                // data-entry error worth fixing
                warn!(
                    "Brand key collision on {:?}: id {} overwrites id {}",
                    key, id, previous
                );
            }
        }
        Ok(Self { by_key })
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Normalized model name -> full catalog record.
#[derive(Debug)]
pub struct ModelIndex {
    by_key: HashMap<String, ModelRecord>,
}

impl ModelIndex {
    pub fn build(records: Vec<ModelRecord>, normalizer: &mut NameNormalizer) -> Self {
        let mut by_key = HashMap::with_capacity(records.len());
        for record in records {
            let key = normalizer.normalize_model(&record.model);
            if let Some(previous) = by_key.insert(key.clone(), record) {
                warn!(
                    "Model key collision on {:?}: id {} overwritten",
                    key, previous.id
                );
            }
        }
        Self { by_key }
    }

    pub fn get(&self, key: &str) -> Option<&ModelRecord> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
