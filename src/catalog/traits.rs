//! Catalog capability trait

use crate::types::{SearchResult, TrackDetail, TrackId};
use async_trait::async_trait;

/// Trait for a remote track catalog
///
/// Implementations perform exactly one network round trip per call and never
/// retry. Transport failures surface as
/// [`CatalogError::Network`](crate::CatalogError::Network) or
/// [`CatalogError::Status`](crate::CatalogError::Status), malformed responses
/// as [`CatalogError::Parse`](crate::CatalogError::Parse).
///
/// # Examples
///
/// ```no_run
/// use track_dl::catalog::{CatalogClient, HttpCatalogClient};
/// use track_dl::config::CatalogConfig;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = HttpCatalogClient::new(CatalogConfig::default())?;
///
/// let page = catalog.search("阿姐鼓", 1).await?;
/// if let Some(first) = page.tracks.first() {
///     let detail = catalog.fetch_detail(&first.id).await?;
///     println!("{} -> {}", detail.title, detail.payload_url);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search the catalog for `query`, returning one page of results
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`](crate::Error::InvalidInput) if `query` is blank or `page` is 0
    /// - [`Error::Catalog`](crate::Error::Catalog) on transport or extraction failure
    async fn search(&self, query: &str, page: u32) -> crate::Result<SearchResult>;

    /// Resolve a track identifier to its playable detail
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`](crate::Error::InvalidInput) if `track_id` is blank
    /// - [`Error::Catalog`](crate::Error::Catalog) on transport failure, a
    ///   non-success status discriminator, or an undecodable body
    async fn fetch_detail(&self, track_id: &TrackId) -> crate::Result<TrackDetail>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
