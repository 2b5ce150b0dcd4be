//! Plain HTTP(S) fetcher.
//!
//! The locator is the URL of the file. The body is streamed to disk chunk by
//! chunk, reporting progress after each chunk.

use super::{Fetcher, ProgressFn};
use crate::download::{Locator, TransferProgress};
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};
use crate::utils::get_content_length;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::StreamExt;
use reqwest::{Response, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::path::Path;
use tokio::{fs, fs::File, io::AsyncWriteExt, time::Instant};
use tracing::debug;

/// Downloads the URL given as locator.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: ClientWithMiddleware,
}

impl HttpFetcher {
    /// Creates a fetcher on top of an existing client.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// Creates a fetcher with its own client.
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(create_http_client(config)?))
    }

    /// Sends a GET request and checks the response status.
    pub(crate) async fn send(&self, url: &str) -> Result<Response> {
        let url = Url::parse(url).map_err(|e| {
            Error::InvalidLocator(format!("The url \"{}\" cannot be parsed: {}", url, e))
        })?;

        debug!("Fetching {}", url);
        let res = self.client.get(url).send().await?;
        Ok(res.error_for_status()?)
    }

    /// Streams a response body into `destination`.
    pub(crate) async fn write_body(
        &self,
        res: Response,
        destination: &Path,
        on_progress: ProgressFn<'_>,
    ) -> Result<()> {
        let total = get_content_length(&res);

        if let Some(output_dir) = destination.parent() {
            debug!("Creating destination directory {:?}", output_dir);
            fs::create_dir_all(output_dir).await?;
        }

        debug!("Creating destination file {:?}", destination);
        let mut file = File::create(destination).await?;

        let started = Instant::now();
        let mut downloaded: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let mut chunk = item?;
            downloaded += chunk.len() as u64;
            file.write_all_buf(&mut chunk).await?;
            on_progress(TransferProgress::from_bytes(
                downloaded,
                total,
                started.elapsed(),
            ));
        }
        file.flush().await?;

        debug!("Wrote {} bytes to {:?}", downloaded, destination);
        Ok(())
    }

    /// Downloads `url` into `destination`.
    pub async fn download(
        &self,
        url: &str,
        destination: &Path,
        on_progress: ProgressFn<'_>,
    ) -> Result<()> {
        let res = self.send(url).await?;
        self.write_body(res, destination, on_progress).await
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        locator: &'a Locator,
        destination: &'a Path,
        on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        self.download(locator.as_str(), destination, on_progress)
            .boxed()
    }
}
