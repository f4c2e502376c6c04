use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::{FetchError, PageSource};
use crate::record::ArtworkPage;

/// Default collection endpoint of the Art Institute of Chicago API.
pub const DEFAULT_API_BASE: &str = "https://api.artic.edu/api/v1/artworks";

const USER_AGENT: &str = concat!("artview/", env!("CARGO_PKG_VERSION"));

/// HTTP page source backed by the public collection API.
pub struct ArticClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ArticClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, timeout)
    }

    /// Reuse an existing client (connection pool shared with the caller).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PageSource for ArticClient {
    fn name(&self) -> &str {
        "artic"
    }

    fn fetch_page<'a>(
        &'a self,
        page: u32,
    ) -> Pin<Box<dyn Future<Output = Result<ArtworkPage, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            if page == 0 {
                return Err(FetchError::InvalidPage(page));
            }

            tracing::debug!(page, base = %self.base_url, "fetching page");

            let resp = self
                .client
                .get(&self.base_url)
                .query(&[("page", page)])
                .header("User-Agent", USER_AGENT)
                .timeout(self.timeout)
                .send()
                .await?;

            let status = resp.status();
            if status.as_u16() == 429 {
                let retry_after = resp
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .map(Duration::from_secs);
                return Err(FetchError::RateLimited { retry_after });
            }
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = resp.text().await?;
            let parsed = decode_page(&body)?;

            tracing::debug!(page, records = parsed.data.len(), total = parsed.total(), "page fetched");
            Ok(parsed)
        })
    }
}

/// Decode a response body. A body missing `pagination.total` is an error,
/// not an empty collection.
fn decode_page(body: &str) -> Result<ArtworkPage, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}
