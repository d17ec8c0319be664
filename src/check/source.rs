//! Source trait for fetching the page that carries the revision

#[cfg(test)]
use mockall::automock;

use crate::check::error::FetchError;

/// Trait for retrieving the monitored page
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    /// Location being fetched, used in logs
    fn location(&self) -> String;

    /// Fetches the whole page body
    ///
    /// # Returns
    /// * `Ok(String)` - Body of a successful (2xx) response
    /// * `Err(FetchError)` - Network failure, timeout or non-success status
    async fn fetch_page(&self) -> Result<String, FetchError>;
}
