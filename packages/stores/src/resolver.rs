//! Conditional fetch with stale-304 revalidation.
//!
//! Some servers answer a plain GET with `304 Not Modified` and no body even
//! though the client never sent a conditional header. [`ConditionalFetch`]
//! accepts 304 as a non-error status, and when such a response has no usable
//! body it re-issues the GET once with a cache-bust query parameter and
//! `Cache-Control: no-cache`. The second outcome is returned as-is; there is
//! never a third attempt.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use storefront_http::{set_header, AcceptStatus, HttpClient, HttpResponse, RequestOptions};

use crate::endpoint::Endpoint;
use crate::error::Error;

/// Query key carrying the cache-bust token.
pub const CACHE_BUST_PARAM: &str = "_t";

/// Query parameters and headers for a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(name.into(), value.to_string());
        self
    }

    /// Set a header; names differing only in case replace each other.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name, value);
        self
    }

    fn into_options(self, accept: AcceptStatus) -> RequestOptions {
        RequestOptions {
            params: self.query,
            headers: self.headers,
            accept,
        }
    }
}

/// Source of strictly increasing cache-bust tokens.
///
/// Tokens are wall-clock milliseconds, bumped past the previous token when
/// two calls land in the same millisecond or the clock steps back.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_token(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(current) => last = current,
            }
        }
    }
}

/// Collection bodies are unusable when absent or an empty array.
pub fn is_empty_collection(body: &Value) -> bool {
    match body {
        Value::Array(items) => items.is_empty(),
        other => is_absent(other),
    }
}

/// Item bodies are unusable only when absent.
///
/// "Absent" follows truthiness: null, `false`, `0` and `""`. An empty object
/// or array still counts as a body, and so does a non-JSON text body, which
/// the client keeps as a string.
pub fn is_absent(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// GET with one cache-busting retry on an empty 304.
#[derive(Clone)]
pub struct ConditionalFetch {
    client: HttpClient,
    buster: Arc<CacheBuster>,
    bust_param: String,
}

impl ConditionalFetch {
    pub fn new(client: HttpClient, buster: Arc<CacheBuster>) -> Self {
        Self {
            client,
            buster,
            bust_param: CACHE_BUST_PARAM.to_string(),
        }
    }

    /// Use a different query key for the cache-bust token.
    pub fn with_bust_param(mut self, name: impl Into<String>) -> Self {
        self.bust_param = name.into();
        self
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn buster(&self) -> &Arc<CacheBuster> {
        &self.buster
    }

    pub fn bust_param(&self) -> &str {
        &self.bust_param
    }

    /// Fetch a collection; an empty-array or absent 304 body is stale.
    pub async fn fetch_collection(
        &self,
        endpoint: &Endpoint,
        params: RequestParameters,
    ) -> Result<HttpResponse, Error> {
        self.resolve(endpoint, params, is_empty_collection).await
    }

    /// Fetch a single resource; only an absent 304 body is stale.
    pub async fn fetch_item(&self, endpoint: &Endpoint) -> Result<HttpResponse, Error> {
        self.resolve(endpoint, RequestParameters::default(), is_absent)
            .await
    }

    /// Issue the GET and retry once with forced freshness when the server
    /// answers 304 with a body `is_empty` rejects.
    ///
    /// Statuses in `[200, 400)` are outcomes; anything else is the client's
    /// error and propagates unchanged from either attempt.
    pub async fn resolve<F>(
        &self,
        endpoint: &Endpoint,
        params: RequestParameters,
        is_empty: F,
    ) -> Result<HttpResponse, Error>
    where
        F: Fn(&Value) -> bool + Send + Sync,
    {
        let first = self
            .client
            .get(
                endpoint.as_str(),
                params.clone().into_options(AcceptStatus::BELOW_CLIENT_ERROR),
            )
            .await?;

        if !(first.is_not_modified() && is_empty(&first.body)) {
            return Ok(first);
        }

        tracing::info!(%endpoint, "stale 304 without body, refetching with cache bust");
        let retried = self.fetch_fresh(endpoint, params).await?;
        if retried.is_not_modified() {
            tracing::warn!(%endpoint, "server still answered 304 after cache bust");
        }

        Ok(retried)
    }

    /// GET with a fresh cache-bust token and `Cache-Control: no-cache`.
    ///
    /// Any caller `Cache-Control`, in whatever case, is replaced.
    pub async fn fetch_fresh(
        &self,
        endpoint: &Endpoint,
        mut params: RequestParameters,
    ) -> Result<HttpResponse, Error> {
        params
            .query
            .insert(self.bust_param.clone(), self.buster.next_token().to_string());
        set_header(&mut params.headers, "cache-control", "no-cache");

        let response = self
            .client
            .get(
                endpoint.as_str(),
                params.into_options(AcceptStatus::BELOW_CLIENT_ERROR),
            )
            .await?;
        Ok(response)
    }
}
