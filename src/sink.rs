use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::keywords::KeywordPair;

/// One row of the output table. Field names double as the CSV header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    pub input_keywords: String,
    pub output_content: String,
}

impl ResultRecord {
    pub fn new(keywords: &KeywordPair, text: &str) -> Self {
        Self {
            input_keywords: keywords.joined(),
            output_content: text.to_string(),
        }
    }
}

/// Overwrites `path` with a header row and a single data row.
pub fn record(path: &Path, keywords: &KeywordPair, text: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.serialize(ResultRecord::new(keywords, text))?;
    writer.flush()?;

    tracing::info!(path = %path.display(), keywords = %keywords, "result recorded");
    Ok(())
}
