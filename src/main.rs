mod catalog;
mod config;
mod matcher;
mod model;
mod normalizer;
mod report;
mod source;
mod storage;

use catalog::{BrandIndex, ModelIndex, load_brand_table, load_model_table};
use chrono::Utc;
use config::load_config;
use matcher::Matcher;
use model::{ResolutionExport, ResolvedRecord};
use normalizer::NameNormalizer;
use source::{JsonFileSource, RecordSource};
use std::fs;
use storage::{JsonPoolStore, PoolStore};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file
    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    info!("Loading canonical catalogs...");
    let brand_table = match load_brand_table(&config.brand_table_path) {
        Ok(t) => t,
        Err(e) => {
            error!("Brand table load error: {}", e);
            return;
        }
    };
    let model_table = match load_model_table(&config.model_table_path) {
        Ok(t) => t,
        Err(e) => {
            error!("Model table load error: {}", e);
            return;
        }
    };

    // Canonical entries are normalized once here; queries reuse the same
    // normalizer so both land in the same key space.
    let mut normalizer = NameNormalizer::new();
    let brands = match BrandIndex::build(&brand_table, &mut normalizer) {
        Ok(index) => index,
        Err(e) => {
            error!("Brand index build error: {}", e);
            return;
        }
    };
    let models = ModelIndex::build(model_table, &mut normalizer);
    info!("Indexed {} brands and {} models", brands.len(), models.len());
    if brands.is_empty() || models.is_empty() {
        warn!("Canonical catalog is empty; every record will resolve as unmatched");
    }

    let store = JsonPoolStore::new(&config.match_pool_path, &config.unmatched_pool_path);
    let pools = match store.load() {
        Ok(p) => p,
        Err(e) => {
            error!("Pool load error: {}", e);
            return;
        }
    };
    info!(
        "Loaded pools: {} matched, {} unmatched",
        pools.matches.len(),
        pools.unmatched.len()
    );

    let mut matcher = Matcher::new(normalizer, brands, models, pools.matches, pools.unmatched);

    info!("Fetching application records...");
    let source = JsonFileSource::new(&config.input_dir);
    let records = match source.fetch().await {
        Ok(r) => r,
        Err(e) => {
            error!("Source read error: {}", e);
            return;
        }
    };

    info!("Resolving {} records...", records.len());
    let mut resolved = Vec::with_capacity(records.len());
    for record in &records {
        let resolution = matcher.resolve(&record.marka, &record.model);
        resolved.push(ResolvedRecord {
            marka: record.marka.clone(),
            model: record.model.clone(),
            marka_id: resolution.marka_id,
            model_id: resolution.model_id,
        });
    }

    let export = ResolutionExport {
        generated_at: Utc::now(),
        records: resolved,
    };
    let json = match serde_json::to_string_pretty(&export) {
        Ok(json) => json,
        Err(e) => {
            error!("Export serialize error: {}", e);
            return;
        }
    };
    if let Err(e) = fs::write(&config.output_path, json) {
        error!("Export write error: {}", e);
        return;
    }
    info!("Wrote resolutions to {}", config.output_path);

    if let Err(e) = store.save(matcher.match_pool(), matcher.unmatched_pool()) {
        error!("Pool save error: {}", e);
        return;
    }

    let summary = report::summarize(&matcher, records.len());
    report::log_summary(&matcher, &summary);
}
