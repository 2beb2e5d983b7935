//! User list store: filtered listing and CRUD against the `users` resource.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use storefront_http::{HttpResponse, RequestOptions};

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::resolver::ConditionalFetch;

/// Pagination options for [`UserListStore::fetch_users`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub items_per_page: Option<u32>,
}

/// Filters for [`UserListStore::fetch_users`].
///
/// Unset, empty and zero values are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub options: Option<Pagination>,
}

impl UserQuery {
    /// Query parameters in the server's naming.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let filters = [
            ("q", &self.q),
            ("role", &self.role),
            ("plan", &self.plan),
            ("status", &self.status),
        ];
        for (key, value) in filters {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                params.push((key, value.to_string()));
            }
        }

        if let Some(options) = &self.options {
            if let Some(page) = options.page.filter(|p| *p > 0) {
                params.push(("page", page.to_string()));
            }
            if let Some(per_page) = options.items_per_page.filter(|n| *n > 0) {
                params.push(("itemsPerPage", per_page.to_string()));
            }
        }

        params
    }
}

#[derive(Clone)]
pub struct UserListStore {
    fetch: ConditionalFetch,
    collection: Endpoint,
}

impl UserListStore {
    pub fn new(fetch: ConditionalFetch, collection: Endpoint) -> Self {
        Self { fetch, collection }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.collection
    }

    /// List users matching `query`.
    ///
    /// Every call carries a fresh cache-bust token, so the listing never
    /// comes back as 304.
    pub async fn fetch_users(&self, query: &UserQuery) -> Result<HttpResponse, Error> {
        let mut options = RequestOptions::default();
        for (key, value) in query.to_params() {
            options = options.with_param(key, value);
        }
        options = options.with_param(
            self.fetch.bust_param(),
            self.fetch.buster().next_token().to_string(),
        );

        Ok(self
            .fetch
            .client()
            .get(self.collection.as_str(), options)
            .await?)
    }

    pub async fn add_user(&self, payload: impl Serialize) -> Result<HttpResponse, Error> {
        Ok(self
            .fetch
            .client()
            .post(self.collection.as_str(), payload)
            .await?)
    }

    /// Get one user. A 304 without any body is refetched with a cache bust.
    pub async fn fetch_user(&self, id: impl Display) -> Result<HttpResponse, Error> {
        let item = self.collection.item(id)?;
        self.fetch.fetch_item(&item).await
    }

    pub async fn delete_user(&self, id: impl Display) -> Result<HttpResponse, Error> {
        let item = self.collection.item(id)?;
        Ok(self.fetch.client().delete(item.as_str()).await?)
    }
}
