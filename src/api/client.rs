//! HTTP client for the Star Wars API.

use super::{envelope, CatalogApi};
use crate::config::ResolvedConfig;
use crate::model::{CharacterDetails, CharacterPage, FetchError, Locator, PageQuery};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

/// Catalog client over reqwest.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http: Client,
    base_url: Url,
}

impl SwapiClient {
    /// Build a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// `FetchError::InvalidUrl` if the base address does not parse or is not
    /// http(s); `FetchError::Transport` if the TLS backend cannot initialize.
    pub fn new(config: &ResolvedConfig) -> Result<Self, FetchError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// Base address all relative requests resolve against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a list request.
    ///
    /// Plain listing: `people?page=n&limit=m`. Name search: `people?name=q`.
    pub fn page_url(&self, query: &PageQuery) -> Url {
        let mut url = self.endpoint(&["people"]);
        {
            let mut pairs = url.query_pairs_mut();
            // The search endpoint answers with one unpaginated `result` array.
            if query.is_search() {
                pairs.append_pair("name", &query.name);
            } else {
                pairs
                    .append_pair("page", &query.page.to_string())
                    .append_pair("limit", &query.limit.to_string());
            }
        }
        url
    }

    /// URL of a detail request.
    ///
    /// # Errors
    ///
    /// `FetchError::InvalidUrl` for a `Locator::Url` that is not an absolute
    /// http(s) URL.
    pub fn details_url(&self, locator: &Locator) -> Result<Url, FetchError> {
        match locator {
            Locator::Uid(uid) => Ok(self.endpoint(&["people", uid.as_str()])),
            Locator::Url(raw) => {
                let url = Url::parse(raw)?;
                ensure_http(&url)?;
                Ok(url)
            }
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, url: Url) -> Result<Value, FetchError> {
        info!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "Non-success response");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogApi for SwapiClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<CharacterPage, FetchError> {
        let value = self.get_json(self.page_url(query)).await?;
        if !value.is_object() {
            return Err(FetchError::Malformed("expected a JSON object".into()));
        }
        Ok(envelope::normalize_page(&value))
    }

    async fn fetch_details(&self, locator: &Locator) -> Result<CharacterDetails, FetchError> {
        let url = self.details_url(locator)?;
        let value = self.get_json(url).await?;
        envelope::unwrap_details(value)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim())?;
    ensure_http(&url)?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidUrl(format!("{raw} cannot be a base URL")));
    }
    Ok(url)
}

fn ensure_http(url: &Url) -> Result<(), FetchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::InvalidUrl(format!(
            "unsupported scheme `{other}` in {url}"
        ))),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
