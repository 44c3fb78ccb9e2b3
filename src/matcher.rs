//! Resolution of raw (brand, model) pairs against the canonical indexes,
//! with append-only match/unmatched pool bookkeeping.

use std::collections::HashSet;

use crate::catalog::{BrandIndex, ModelIndex};
use crate::model::{MatchEntry, Resolution, UnmatchedEntry};
use crate::normalizer::NameNormalizer;

/// Matcher owns the normalizer, the read-only indexes and both pools for the
/// duration of a batch run.
///
/// Pools are strictly append-only: entries loaded from storage are never
/// touched, and each distinct normalized key is appended at most once per
/// run. The presence check and the mark-present step run back to back with
/// no await point between them, so within the single-threaded batch the pair
/// behaves atomically.
pub struct Matcher {
    normalizer: NameNormalizer,
    brands: BrandIndex,
    models: ModelIndex,
    match_pool: Vec<MatchEntry>,
    matched_keys: HashSet<String>,
    unmatched_pool: Vec<UnmatchedEntry>,
    unmatched_keys: HashSet<String>,
    loaded_matches: usize,
    loaded_unmatched: usize,
}

impl Matcher {
    pub fn new(
        normalizer: NameNormalizer,
        brands: BrandIndex,
        models: ModelIndex,
        match_pool: Vec<MatchEntry>,
        unmatched_pool: Vec<UnmatchedEntry>,
    ) -> Self {
        let matched_keys = match_pool.iter().map(|e| e.normalized.clone()).collect();
        let unmatched_keys = unmatched_pool
            .iter()
            .map(|e| pair_key(&e.marka_name, &e.model_name))
            .collect();
        let loaded_matches = match_pool.len();
        let loaded_unmatched = unmatched_pool.len();

        Self {
            normalizer,
            brands,
            models,
            match_pool,
            matched_keys,
            unmatched_pool,
            unmatched_keys,
            loaded_matches,
            loaded_unmatched,
        }
    }

    /// Resolve one raw pair to catalog IDs.
    ///
    /// A miss on either side is a first-class outcome, returned as `None`
    /// and recorded once per distinct normalized pair in the unmatched pool.
    /// Full matches are recorded once per distinct normalized model string.
    pub fn resolve(&mut self, original_marka: &str, original_model: &str) -> Resolution {
        let marka_key = self.normalizer.normalize_brand(original_marka);
        let marka_id = self.brands.get(&marka_key);

        let model_key = self.normalizer.normalize_model(original_model);
        let model_id = self.models.get(&model_key).map(|r| r.id);

        match (marka_id, model_id) {
            (Some(marka_id), Some(model_id)) => {
                // insert-if-absent marks the key before the entry is built,
                // so a second occurrence in the same batch appends nothing
                if self.matched_keys.insert(model_key.clone()) {
                    self.match_pool.push(MatchEntry {
                        original: original_model.to_string(),
                        normalized: model_key,
                        model_id,
                        marka_id,
                    });
                }
            }
            _ => {
                if self.unmatched_keys.insert(pair_key(&marka_key, &model_key)) {
                    self.unmatched_pool.push(UnmatchedEntry {
                        marka_name: marka_key,
                        model_name: model_key,
                        original_marka: original_marka.to_string(),
                        original_model: original_model.to_string(),
                    });
                }
            }
        }

        Resolution { marka_id, model_id }
    }

    pub fn match_pool(&self) -> &[MatchEntry] {
        &self.match_pool
    }

    pub fn unmatched_pool(&self) -> &[UnmatchedEntry] {
        &self.unmatched_pool
    }

    /// Entries appended during this run (everything past the loaded prefix).
    pub fn new_matches(&self) -> &[MatchEntry] {
        &self.match_pool[self.loaded_matches..]
    }

    pub fn new_unmatched(&self) -> &[UnmatchedEntry] {
        &self.unmatched_pool[self.loaded_unmatched..]
    }
}

fn pair_key(marka_name: &str, model_name: &str) -> String {
    format!("{marka_name}_{model_name}")
}
