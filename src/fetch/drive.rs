//! Google Drive fetcher.
//!
//! Share links look like `https://drive.google.com/file/d/<id>/view?usp=sharing`
//! or `https://drive.google.com/open?id=<id>`. The file id is extracted from
//! the link and the file is requested from the direct download endpoint.
//!
//! # Examples
//!
//! ```rust
//! use tranche::download::Locator;
//! use tranche::fetch::file_id;
//!
//! let locator = Locator::from("https://drive.google.com/file/d/1Fp6Ktxx/view?usp=sharing");
//! assert_eq!(file_id(&locator)?, "1Fp6Ktxx");
//!
//! let broken = Locator::from("https://drive.google.com/drive/folders");
//! assert!(file_id(&broken).is_err());
//! # Ok::<(), tranche::Error>(())
//! ```

use super::{Fetcher, HttpFetcher, ProgressFn};
use crate::download::Locator;
use crate::error::{Error, Result};

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::path::Path;
use tracing::debug;

/// Direct download endpoint of Google Drive.
pub const DOWNLOAD_ENDPOINT: &str = "https://drive.usercontent.google.com/download";

/// Extracts the Drive file id from a share link.
///
/// Fails with [`Error::InvalidLocator`] when the link has neither a
/// `/file/d/<id>` path nor an `id` query parameter.
pub fn file_id(locator: &Locator) -> Result<String> {
    let url = Url::parse(locator.as_str()).map_err(|e| {
        Error::InvalidLocator(format!("The url \"{}\" cannot be parsed: {}", locator, e))
    })?;

    if let Some(segments) = url.path_segments() {
        let segments: Vec<&str> = segments.collect();
        let id = segments
            .windows(3)
            .find(|window| window[0] == "file" && window[1] == "d")
            .map(|window| window[2])
            .filter(|id| !id.is_empty());
        if let Some(id) = id {
            return Ok(id.to_string());
        }
    }

    url.query_pairs()
        .find(|(key, value)| key == "id" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            Error::InvalidLocator(format!(
                "The url \"{}\" does not contain a Google Drive file id",
                locator
            ))
        })
}

/// Downloads files shared on Google Drive.
#[derive(Debug, Clone)]
pub struct DriveFetcher {
    http: HttpFetcher,
    endpoint: String,
}

impl DriveFetcher {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            endpoint: DOWNLOAD_ENDPOINT.to_string(),
        }
    }

    /// Use another download endpoint, e.g. a local test server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// URL the file with the given id is requested from.
    pub fn download_url(&self, id: &str) -> String {
        format!("{}?id={}&export=download&confirm=t", self.endpoint, id)
    }

    async fn download(
        &self,
        locator: &Locator,
        destination: &Path,
        on_progress: ProgressFn<'_>,
    ) -> Result<()> {
        let id = file_id(locator)?;
        let url = self.download_url(&id);
        let res = self.http.send(&url).await?;

        // Private files and exhausted quotas come back as a 200 web page.
        let is_html = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/html"));
        if is_html {
            debug!("Drive answered {} with a web page", id);
            return Err(Error::Fetch(format!(
                "Google Drive returned a web page instead of file {}; it may be private or over its download quota",
                id
            )));
        }

        self.http.write_body(res, destination, on_progress).await
    }
}

impl Fetcher for DriveFetcher {
    fn fetch<'a>(
        &'a self,
        locator: &'a Locator,
        destination: &'a Path,
        on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        self.download(locator, destination, on_progress).boxed()
    }
}
