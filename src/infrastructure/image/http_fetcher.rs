//! HTTP adapter for downloading image bytes.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;
use tracing::debug;

use crate::domain::entities::SourceId;
use crate::domain::errors::{FetchError, FetchResult};
use crate::domain::ports::ImageFetcherPort;
use crate::infrastructure::config::HttpConfig;

/// Downloads images with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher from HTTP settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &HttpConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FetchError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    fn parse_source(source: &SourceId) -> FetchResult<Url> {
        let url = Url::parse(source.as_str())
            .map_err(|e| FetchError::invalid_source(format!("{source}: {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(FetchError::invalid_source(format!(
                "unsupported scheme `{scheme}`"
            ))),
        }
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, source: &SourceId) -> FetchResult<Bytes> {
        let url = Self::parse_source(source)?;
        debug!(source = %source, "Downloading image from network");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::body(e.to_string()))?;

        debug!(source = %source, size = bytes.len(), "Downloaded image");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a single canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/image.png")
    }

    fn fetcher() -> HttpImageFetcher {
        HttpImageFetcher::new(&HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once("200 OK", b"image bytes").await;

        let bytes = fetcher().fetch(&SourceId::new(url)).await.unwrap();
        assert_eq!(&bytes[..], b"image bytes");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let url = serve_once("404 Not Found", b"").await;

        let result = fetcher().fetch(&SourceId::new(url)).await;
        assert!(matches!(result, Err(FetchError::Status { status: 404 })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_relative_source() {
        let result = fetcher().fetch(&SourceId::new("images/a.png")).await;
        assert!(matches!(result, Err(FetchError::InvalidSource { .. })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_unsupported_scheme() {
        let result = fetcher().fetch(&SourceId::new("file:///etc/passwd")).await;
        assert!(matches!(result, Err(FetchError::InvalidSource { .. })));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = fetcher()
            .fetch(&SourceId::new(format!("http://{addr}/a.png")))
            .await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
