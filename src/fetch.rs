//! Remote asset fetching.
//!
//! Downloads stream straight to their destination file. The destination is
//! created with truncation, so re-fetching the same asset overwrites rather
//! than appends; the file handle is scoped to the download and released on
//! every path, including the error path.
//!
//! There is no retry, no resume, and no request timeout: a partial or
//! corrupt asset is worse than no asset, so any failure aborts the run.
//! Downloaded content is written as received; there is no checksum
//! verification.

use std::fs::File;
use std::path::Path;

use reqwest::blocking::Client;

use crate::error::{Result, SetupError};

/// Source of remote assets.
///
/// The seam exists so the orchestrator can be tested against a scripted
/// source; production code uses [`AssetFetcher`].
pub trait AssetSource {
    /// Fetch `url` and write it to `dest`, creating parent directories and
    /// overwriting any existing file.
    fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Fetches assets over HTTP/HTTPS.
pub struct AssetFetcher {
    client: Client,
}

impl AssetFetcher {
    /// Create a new fetcher.
    ///
    /// No request timeout is configured: downloads block until they finish
    /// or fail.
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!(
                    env!("CARGO_PKG_NAME"),
                    "/",
                    env!("CARGO_PKG_VERSION")
                ))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for AssetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for AssetFetcher {
    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let fail = |message: String| SetupError::DownloadFailed {
            url: url.to_string(),
            message,
        };

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
        }

        tracing::debug!(%url, dest = %dest.display(), "downloading asset");

        let mut response = self.client.get(url).send().map_err(|e| fail(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }

        let mut file = File::create(dest).map_err(|e| fail(e.to_string()))?;
        response
            .copy_to(&mut file)
            .map_err(|e| fail(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_constructs() {
        let _ = AssetFetcher::new();
        let _ = AssetFetcher::default();
    }

    #[test]
    fn connection_error_names_url() {
        // Nothing listens on this port.
        let fetcher = AssetFetcher::new();
        let temp = tempfile::TempDir::new().unwrap();
        let err = fetcher
            .download("http://127.0.0.1:9/nope.js", &temp.path().join("nope.js"))
            .unwrap_err();
        match err {
            SetupError::DownloadFailed { url, .. } => {
                assert_eq!(url, "http://127.0.0.1:9/nope.js");
            }
            other => panic!("expected DownloadFailed, got {other:?}"),
        }
    }
}
