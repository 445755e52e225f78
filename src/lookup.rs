use crate::scraper::find_paragraph;
use crate::wiki::ArticleSource;

/// Shown and printed by every front end when a lookup comes back empty.
pub const UNABLE_TO_GENERATE: &str = "Unable to generate content!";

/// Resolves `primary` to an article and returns the first paragraph that
/// mentions both keywords as whole words.
///
/// A missing article, a failed fetch and a paragraph-less match are all
/// reported as `None`.
pub async fn lookup<S>(source: &S, primary: &str, secondary: &str) -> Option<String>
where
    S: ArticleSource + ?Sized,
{
    if primary.trim().is_empty() || secondary.trim().is_empty() {
        tracing::debug!("empty keyword, skipping lookup");
        return None;
    }

    let html = match source.fetch_article(primary).await {
        Ok(Some(html)) => html,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(primary, error = %err, "article fetch failed");
            return None;
        }
    };

    let found = find_paragraph(&html, primary, secondary);
    tracing::info!(primary, secondary, found = found.is_some(), "lookup finished");
    found
}
