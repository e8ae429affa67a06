//! HTTP GET for listing pages and files.
//!
//! Uses the curl crate (libcurl). One `Easy` handle is reused for the whole
//! run so connections to the archive are kept alive between requests.

mod error;
mod throttle;

pub use error::{check_status, FetchError};
pub use throttle::Throttle;

use crate::config::MirrorConfig;
use crate::storage::PartFile;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// What the mirror walk needs from the network.
pub trait Fetcher {
    /// Body of a listing page as (lossily decoded) UTF-8 text.
    fn get_text(&mut self, url: &Url) -> Result<String, FetchError>;

    /// Streams `url` into `dest`; returns bytes written. `dest` only appears
    /// once the transfer has fully succeeded.
    fn download_to(&mut self, url: &Url, dest: &Path) -> Result<u64, FetchError>;
}

/// Blocking curl client with a fixed delay between requests.
pub struct HttpClient {
    easy: curl::easy::Easy,
    throttle: Throttle,
}

impl HttpClient {
    pub fn new(cfg: &MirrorConfig) -> Result<Self, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&cfg.user_agent)?;
        easy.connect_timeout(Duration::from_secs(30))?;
        easy.timeout(cfg.timeout())?;
        Ok(Self {
            easy,
            throttle: Throttle::new(cfg.request_delay()),
        })
    }
}

impl Fetcher for HttpClient {
    fn get_text(&mut self, url: &Url) -> Result<String, FetchError> {
        self.throttle.wait();
        let mut body = Vec::new();
        self.easy.url(url.as_str())?;
        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        check_status(url.as_str(), self.easy.response_code()?)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn download_to(&mut self, url: &Url, dest: &Path) -> Result<u64, FetchError> {
        self.throttle.wait();
        let mut part = PartFile::create(dest).map_err(FetchError::Storage)?;
        let mut write_err: Option<std::io::Error> = None;
        self.easy.url(url.as_str())?;
        let performed = {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| match part.write_chunk(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    // Returning a short count aborts the transfer.
                    write_err = Some(e);
                    Ok(0)
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(FetchError::Io(e));
        }
        performed?;
        check_status(url.as_str(), self.easy.response_code()?)?;
        part.finalize().map_err(FetchError::Storage)
    }
}
