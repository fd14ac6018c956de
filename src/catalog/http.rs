//! HTTP catalog client for the default provider

use super::parser::{SearchPageParser, parse_detail};
use super::traits::CatalogClient;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, Error};
use crate::types::{SearchResult, TrackDetail, TrackId};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, REFERER, USER_AGENT};

/// Catalog client that scrapes the provider's search page and calls its
/// detail endpoint
///
/// Every request carries the configured identifying headers and its own
/// timeout from [`CatalogConfig`].
pub struct HttpCatalogClient {
    client: reqwest::Client,
    config: CatalogConfig,
    parser: SearchPageParser,
}

impl HttpCatalogClient {
    /// Build a client from catalog settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a header value is not a valid HTTP header.
    pub fn new(config: CatalogConfig) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            header_value(&config.user_agent, "catalog.user_agent")?,
        );
        headers.insert(REFERER, header_value(&config.referer(), "catalog.base_url")?);
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            config,
            parser: SearchPageParser::new()?,
        })
    }

    /// Settings this client was built with
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn fetch_text(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<String, CatalogError> {
        let response = request.send().await.map_err(|source| CatalogError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        tracing::debug!(url, status = status.as_u16(), "catalog response");
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| CatalogError::Network {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(&self, query: &str, page: u32) -> crate::Result<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("search query must not be empty".into()));
        }
        if page == 0 {
            return Err(Error::InvalidInput("page numbers start at 1".into()));
        }

        let url = format!(
            "{}?wd={}&page={}",
            self.config.search_url(),
            urlencoding::encode(query),
            page
        );
        tracing::info!(query, page, "searching catalog");

        let body = self
            .fetch_text(
                self.client.get(&url).timeout(self.config.search_timeout),
                &url,
            )
            .await
            .inspect_err(|e| tracing::error!(query, page, error = %e, "search failed"))?;

        let result = self
            .parser
            .parse(&body)
            .inspect_err(|e| tracing::error!(query, page, error = %e, "search page not understood"))?;

        tracing::info!(
            query,
            page,
            found = result.tracks.len(),
            total_pages = result.total_pages,
            total_tracks = result.total_tracks,
            "search complete"
        );
        Ok(result)
    }

    async fn fetch_detail(&self, track_id: &TrackId) -> crate::Result<TrackDetail> {
        if track_id.as_str().trim().is_empty() {
            return Err(Error::InvalidInput("track id must not be empty".into()));
        }

        let url = self.config.detail_url();
        let request = self
            .client
            .post(&url)
            .form(&[
                ("id", track_id.as_str()),
                ("type", self.config.category.as_str()),
            ])
            .timeout(self.config.detail_timeout);

        let body = self
            .fetch_text(request, &url)
            .await
            .inspect_err(|e| tracing::error!(track_id = %track_id, error = %e, "detail lookup failed"))?;

        let detail = parse_detail(track_id, &body)
            .inspect_err(|e| tracing::warn!(track_id = %track_id, error = %e, "detail rejected"))?;

        tracing::debug!(track_id = %track_id, title = %detail.title, "resolved track detail");
        Ok(detail)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

fn header_value(value: &str, key: &str) -> crate::Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Config {
        message: format!("invalid header value '{value}': {e}"),
        key: Some(key.to_string()),
    })
}
