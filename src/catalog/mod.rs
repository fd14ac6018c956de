//! Remote track catalog access
//!
//! The [`CatalogClient`] trait is the seam between the pipeline and a
//! specific provider. [`HttpCatalogClient`] is the default implementation: it
//! extracts search results from the provider's HTML search page and decodes
//! the JSON detail endpoint.

mod http;
mod parser;
mod traits;

pub use http::HttpCatalogClient;
pub use parser::UNKNOWN_TITLE;
pub use traits::CatalogClient;
