use std::time::Duration;

use {async_trait::async_trait, teloxide::prelude::*, tracing::debug};

use crate::error::{Error, Result};

/// Resolves an inbound attachment reference to raw image bytes.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    async fn fetch(&self, file_id: &str) -> Result<Vec<u8>>;
}

/// Bot API implementation: `getFile` resolution, then an HTTP download of
/// the returned path with a bounded timeout.
pub struct TelegramFetcher {
    bot: Bot,
    http: reqwest::Client,
    timeout: Duration,
}

impl TelegramFetcher {
    #[must_use]
    pub fn new(bot: Bot, timeout: Duration) -> Self {
        Self {
            bot,
            http: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl AttachmentFetcher for TelegramFetcher {
    async fn fetch(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(file_id)
            .await
            .map_err(|source| Error::Resolve { source })?;

        // Telegram file URL format: <api>/file/bot<token>/<file_path>
        let url = format!(
            "{}file/bot{}/{}",
            self.bot.api_url(),
            self.bot.token(),
            file.path
        );
        download_bytes(&self.http, &url, self.timeout).await
    }
}

/// Download a URL, failing on non-success status or interrupted transfer.
pub(crate) async fn download_bytes(
    http: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let response = http
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| Error::download(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::download(format!("HTTP {status}")));
    }

    let data = response
        .bytes()
        .await
        .map_err(|e| Error::download(format!("interrupted transfer: {e}")))?;
    debug!(bytes = data.len(), "downloaded attachment");
    Ok(data.to_vec())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn download_returns_body_bytes() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/file/bottok/photos/file_1.jpg")
            .with_status(200)
            .with_body(b"jpeg-bytes")
            .create_async()
            .await;

        let url = format!("{}/file/bottok/photos/file_1.jpg", server.url());
        let data = download_bytes(&reqwest::Client::new(), &url, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(data, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn non_success_status_is_a_download_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/file/bottok/missing.jpg")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/file/bottok/missing.jpg", server.url());
        let err = download_bytes(&reqwest::Client::new(), &url, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Download { .. }), "got: {err:?}");
    }
}
