//! Fetch error type.

use thiserror::Error;

/// Error returned by a single page fetch or file download.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("transfer failed: {0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    /// Writing the downloaded body failed (e.g. disk full, permission denied).
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    /// Creating or finalizing the local file failed.
    #[error("storage: {0:#}")]
    Storage(anyhow::Error),
}

impl FetchError {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Maps a response code to `Ok` for 2xx and `FetchError::Http` otherwise.
pub fn check_status(url: &str, status: u32) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::Http {
            url: url.to_string(),
            status,
        })
    }
}
