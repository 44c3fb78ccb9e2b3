use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub brand_table_path: String,
    pub model_table_path: String,
    pub match_pool_path: String,
    pub unmatched_pool_path: String,
    pub input_dir: String,
    pub output_path: String,
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
