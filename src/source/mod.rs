pub mod json_files;

pub use json_files::JsonFileSource;

use crate::model::{ApplicationRecord, SourceError};

#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<ApplicationRecord>, SourceError>;
}
