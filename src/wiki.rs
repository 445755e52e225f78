//! Article retrieval from the MediaWiki Action API.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, Result};

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION"),
            " (keyword paragraph lookup)"
        ))
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// Something that can resolve a title to rendered article HTML.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// `Ok(None)` means the article does not exist.
    async fn fetch_article(&self, title: &str) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: Option<String>,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WikipediaClient {
    api_url: String,
}

impl WikipediaClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    async fn fetch_article(&self, title: &str) -> Result<Option<String>> {
        tracing::info!(title, "fetching article");

        let response = CLIENT
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchError(format!(
                "article API returned {} for {:?}",
                status, title
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| AppError::ParseError(format!("Unexpected article API response: {}", e)))?;

        let page = match body.query.and_then(|q| q.pages.into_iter().next()) {
            Some(page) => page,
            None => return Ok(None),
        };

        if page.missing || page.invalid {
            tracing::info!(title, "article does not exist");
            return Ok(None);
        }

        tracing::debug!(resolved = ?page.title, "article resolved");
        Ok(page.extract.filter(|html| !html.trim().is_empty()))
    }
}
