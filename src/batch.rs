use serde::Deserialize;
use std::path::Path;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::keywords::KeywordPair;
use crate::lookup::{lookup, UNABLE_TO_GENERATE};
use crate::sink;
use crate::wiki::ArticleSource;

#[derive(Debug, Deserialize)]
struct InputRow {
    input_keywords: String,
}

/// Reads the keyword pair from the first data row of `path`.
pub fn read_keywords(path: &Path) -> Result<KeywordPair> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = reader.deserialize::<InputRow>();

    let first = rows
        .next()
        .ok_or_else(|| AppError::InvalidInput(format!("{} has no data rows", path.display())))?
        .map_err(|e| AppError::ParseError(format!("bad row in {}: {}", path.display(), e)))?;

    let extra = rows.count();
    if extra > 0 {
        tracing::warn!(path = %path.display(), ignored = extra, "only the first input row is used");
    }

    KeywordPair::from_joined(&first.input_keywords)
}

/// Runs one batch lookup. Returns the generated text, or `None` when nothing
/// was found (the output file is left untouched in that case).
pub async fn run<S>(config: &Config, source: &S, input: &Path) -> Result<Option<String>>
where
    S: ArticleSource + ?Sized,
{
    let keywords = read_keywords(input)?;
    tracing::info!(input = %input.display(), keywords = %keywords, "batch lookup");

    match lookup(source, &keywords.primary, &keywords.secondary).await {
        Some(text) => {
            sink::record(&config.output_path, &keywords, &text)?;
            Ok(Some(text))
        }
        None => {
            println!("{}", UNABLE_TO_GENERATE);
            Ok(None)
        }
    }
}
