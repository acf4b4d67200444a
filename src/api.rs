//! Synchronous access to the hospital feed.
//!
//! The feed is a single semicolon-separated CSV document. It is read either from
//! its public URL or from a local snapshot (handy offline and in tests).
//!
//! Typical usage:
//! ```no_run
//! # use covid_hospi::{Client, Source};
//! let client = Client::new()?;
//! let body = client.fetch_text(&Source::default())?;
//! # Ok::<(), covid_hospi::error::LoadError>(())
//! ```

use crate::config::SOURCE_URL;
use crate::error::{LoadError, Result};
use log::{debug, info};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Where the feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Default for Source {
    fn default() -> Self {
        Source::Url(SOURCE_URL.into())
    }
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    /// `http://` and `https://` strings are URLs, everything else a path.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Source::Url(s.to_string()))
        } else {
            Ok(Source::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(u) => f.write_str(u),
            Source::File(p) => write!(f, "{}", p.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5)) // data.gouv.fr redirects to its object store
            .user_agent(concat!("covid_hospi/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LoadError::Http {
                url: SOURCE_URL.into(),
                source,
            })?;
        Ok(Self { http })
    }

    /// Read the whole feed as text. A single attempt; failures propagate.
    pub fn fetch_text(&self, source: &Source) -> Result<String> {
        match source {
            Source::Url(url) => {
                info!("fetching {url}");
                let resp = self.http.get(url).send().map_err(|e| LoadError::Http {
                    url: url.clone(),
                    source: e,
                })?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status,
                    });
                }
                let body = resp.text().map_err(|e| LoadError::Http {
                    url: url.clone(),
                    source: e,
                })?;
                debug!("received {} bytes", body.len());
                Ok(body)
            }
            Source::File(path) => {
                info!("reading {}", path.display());
                std::fs::read_to_string(path).map_err(|e| LoadError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_str_detects_urls() {
        assert_eq!(
            "https://example.org/x.csv".parse::<Source>().unwrap(),
            Source::Url("https://example.org/x.csv".into())
        );
        assert_eq!(
            "HTTP://example.org".parse::<Source>().unwrap(),
            Source::Url("HTTP://example.org".into())
        );
        assert_eq!(
            "data/feed.csv".parse::<Source>().unwrap(),
            Source::File(PathBuf::from("data/feed.csv"))
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let client = Client::new().unwrap();
        let err = client
            .fetch_text(&Source::File("/definitely/not/here.csv".into()))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
