use super::KnowledgeProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;

const SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

/// Wikipedia REST summary lookup.
pub struct WikipediaClient {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type")]
    page_type: String,
    #[serde(default)]
    extract: String,
}

enum Lookup {
    Summary(String),
    Disambiguation,
    NotFound,
}

impl WikipediaClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, query: &str) -> Result<Lookup> {
        let url = format!("{}/{}", SUMMARY_URL, urlencoding::encode(query));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Encyclopedia request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }

        let summary = response
            .error_for_status()
            .context("Encyclopedia request rejected")?
            .json::<PageSummary>()
            .await
            .context("Failed to decode encyclopedia response")?;

        if summary.page_type == "disambiguation" {
            return Ok(Lookup::Disambiguation);
        }

        if summary.extract.is_empty() {
            return Ok(Lookup::NotFound);
        }

        Ok(Lookup::Summary(summary.extract))
    }
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeProvider for WikipediaClient {
    async fn summary(&self, query: &str) -> String {
        match self.fetch(query).await {
            Ok(Lookup::Summary(text)) => text,
            Ok(Lookup::Disambiguation) => {
                "Multiple results found. Could you be more specific?".to_string()
            }
            Ok(Lookup::NotFound) => {
                "Sorry, I couldn't find information about that topic.".to_string()
            }
            Err(e) => {
                warn!("Encyclopedia lookup for '{}' failed: {:#}", query, e);
                "Encyclopedia search is currently unavailable.".to_string()
            }
        }
    }
}
