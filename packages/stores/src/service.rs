//! The process-wide store set.

use std::sync::Arc;

use storefront_http::{HttpClient, HttpExecutor, ReqwestExecutor};

use crate::config::StoreConfig;
use crate::error::Error;
use crate::product::ProductStore;
use crate::resolver::{CacheBuster, ConditionalFetch};
use crate::user::UserListStore;

/// Product and user stores sharing one HTTP client and one token source.
///
/// Build it once at startup and clone it where needed; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct Stores {
    pub products: ProductStore,
    pub users: UserListStore,
}

impl Stores {
    /// Stores backed by reqwest, using the configured timeout.
    pub fn from_config(config: &StoreConfig) -> Result<Self, Error> {
        let executor = ReqwestExecutor::new(config.timeout())?;
        Self::with_executor(config, Arc::new(executor))
    }

    pub fn with_executor(
        config: &StoreConfig,
        executor: Arc<dyn HttpExecutor>,
    ) -> Result<Self, Error> {
        config.validate()?;

        let client = HttpClient::new(executor).with_default_header("Accept", "application/json");
        let fetch = ConditionalFetch::new(client, Arc::new(CacheBuster::new()))
            .with_bust_param(config.cache_bust_param.clone());

        tracing::debug!(api_base = %config.api_base, "stores initialised");
        Ok(Self {
            products: ProductStore::new(fetch.clone(), config.products_endpoint()?),
            users: UserListStore::new(fetch, config.users_endpoint()?),
        })
    }
}
