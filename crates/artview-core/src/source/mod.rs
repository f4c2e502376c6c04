//! Page source trait and implementations for fetching artwork pages.

pub mod artic;
pub mod mock;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::record::ArtworkPage;

/// Error returned when a page could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Page numbers are 1-based; 0 never reaches the network.
    #[error("invalid page number {0} (pages start at 1)")]
    InvalidPage(u32),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rate limited (429)")]
    RateLimited { retry_after: Option<Duration> },
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    /// The load was superseded by a newer request before it completed.
    #[error("load cancelled")]
    Cancelled,
}

/// Anything that can serve 1-based pages of artworks.
pub trait PageSource: Send + Sync {
    /// Short name used in logs (e.g. "artic", "mock").
    fn name(&self) -> &str;

    /// Fetch page `page` (1-based).
    fn fetch_page<'a>(
        &'a self,
        page: u32,
    ) -> Pin<Box<dyn Future<Output = Result<ArtworkPage, FetchError>> + Send + 'a>>;
}
