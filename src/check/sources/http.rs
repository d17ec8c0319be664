//! HTTP source backed by reqwest

use std::time::Duration;

use tracing::{debug, warn};

use crate::check::error::FetchError;
use crate::check::source::Source;
use crate::config::CheckConfig;

/// Source that GETs a fixed URL
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Creates a source for `url` with the given connect timeout and an
    /// optional overall request timeout
    pub fn new(
        url: &str,
        user_agent: &str,
        connect_timeout: Duration,
        request_timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout);
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.to_string(),
        })
    }

    pub fn from_config(config: &CheckConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.url,
            &config.user_agent,
            config.connect_timeout(),
            config.request_timeout(),
        )
    }
}

#[async_trait::async_trait]
impl Source for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch_page(&self) -> Result<String, FetchError> {
        debug!("Fetching {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {}", self.url, status);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read body from {}: {}", self.url, e);
            FetchError::Body(e)
        })?;
        debug!("Fetched {} bytes from {}", body.len(), self.url);

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn source_for(url: &str) -> HttpSource {
        HttpSource::new(url, "check-gist-revision-test", Duration::from_secs(15), None).unwrap()
    }

    #[tokio::test]
    async fn fetch_page_returns_body_on_success() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/ervinb/ecab6ca35ec87ed0cadf")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="/ervinb/ecab6ca35ec87ed0cadf/raw/9f1c3a0/ips.txt">Raw</a>"#)
            .create_async()
            .await;

        let source = source_for(&format!("{}/ervinb/ecab6ca35ec87ed0cadf", server.url()));
        let body = source.fetch_page().await.unwrap();

        mock.assert_async().await;
        assert!(body.contains("raw/9f1c3a0/ips.txt"));
    }

    #[tokio::test]
    async fn fetch_page_sends_configured_user_agent() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/gist")
            .match_header("user-agent", "check-gist-revision-test")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let source = source_for(&format!("{}/gist", server.url()));
        source.fetch_page().await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_page_fails_on_not_found() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/gist")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let source = source_for(&format!("{}/gist", server.url()));
        let result = source.fetch_page().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(FetchError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn fetch_page_fails_on_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/gist")
            .with_status(503)
            .create_async()
            .await;

        let source = source_for(&format!("{}/gist", server.url()));
        let result = source.fetch_page().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(FetchError::HttpStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn fetch_page_fails_when_connection_is_refused() {
        // Bind then drop to get a port nobody listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let source = source_for(&format!("http://127.0.0.1:{}/gist", port));
        let result = source.fetch_page().await;

        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
