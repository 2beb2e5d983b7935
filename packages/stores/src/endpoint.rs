//! Resource endpoints.
//!
//! An [`Endpoint`] is the absolute URL of either a resource collection
//! (`{base}/products`) or one resource in it (`{base}/products/5`).

use std::fmt;

use url::Url;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Parse an absolute endpoint URL.
    pub fn parse(url: &str) -> Result<Self, Error> {
        Self::from_url(Url::parse(url)?)
    }

    pub fn from_url(url: Url) -> Result<Self, Error> {
        if url.cannot_be_a_base() {
            return Err(Error::InvalidEndpoint {
                message: format!("'{}' cannot hold path segments", url),
            });
        }
        Ok(Self { url })
    }

    /// Collection endpoint `name` under `base`.
    ///
    /// `base` keeps its full path even without a trailing slash.
    pub fn collection(base: &Url, name: &str) -> Result<Self, Error> {
        let name = name.trim_matches('/');
        if name.is_empty() {
            return Err(Error::InvalidEndpoint {
                message: "collection name is empty".to_string(),
            });
        }
        Self::from_url(normalize_base(base.clone()).join(name)?)
    }

    /// Endpoint of a single resource, `{self}/{id}`.
    ///
    /// The identifier is percent-encoded as one path segment.
    pub fn item(&self, id: impl fmt::Display) -> Result<Self, Error> {
        let id = id.to_string();
        if id.is_empty() {
            return Err(Error::InvalidEndpoint {
                message: format!("empty identifier for '{}'", self.url),
            });
        }

        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint {
                message: format!("'{}' cannot hold path segments", self.url),
            })?
            .pop_if_empty()
            .push(&id);
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Make sure `url`'s path ends with `/` so relative joins append to it.
pub fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
