//! Remote catalog access (impure shell).
//!
//! - [`CatalogApi`] is the seam between controllers and the network.
//! - [`SwapiClient`] implements it over HTTP with reqwest.
//! - [`envelope`] normalizes the API's inconsistent JSON shapes.
//! - [`Dispatcher`] runs requests on the tokio runtime and feeds results back
//!   to the UI loop as [`FetchEvent`]s.

pub mod client;
pub mod dispatch;
pub mod envelope;

pub use client::SwapiClient;
pub use dispatch::{Dispatcher, FetchEvent};

use crate::model::{CharacterDetails, CharacterPage, FetchError, Locator, PageQuery};
use async_trait::async_trait;

/// Read-only access to the character catalog.
///
/// Implementations must return normalized data: shape handling belongs to
/// [`envelope`], never to callers.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of character summaries.
    async fn fetch_page(&self, query: &PageQuery) -> Result<CharacterPage, FetchError>;

    /// Fetch one character's full record.
    async fn fetch_details(&self, locator: &Locator) -> Result<CharacterDetails, FetchError>;
}
