//! The client capability used by the stores.
//!
//! [`HttpClient`] exposes `get`/`post`/`put`/`delete` over any
//! [`HttpExecutor`] and turns statuses outside the request's
//! [`AcceptStatus`] range into [`Error::Status`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Error;
use crate::executor::HttpExecutor;
use crate::types::{set_header, AcceptStatus, HttpRequest, HttpResponse};

/// Per-request options for [`HttpClient::get`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub accept: AcceptStatus,
}

impl RequestOptions {
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name, value);
        self
    }

    pub fn with_accept(mut self, accept: AcceptStatus) -> Self {
        self.accept = accept;
        self
    }
}

/// Cheap-to-clone HTTP client over a shared executor.
#[derive(Clone)]
pub struct HttpClient {
    executor: Arc<dyn HttpExecutor>,
    default_headers: HashMap<String, String>,
}

impl HttpClient {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            executor,
            default_headers: HashMap::new(),
        }
    }

    /// Add a default header that will be sent with every request
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        set_header(&mut self.default_headers, name, value);
        self
    }

    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<HttpResponse, Error> {
        let request = HttpRequest {
            query: options.params,
            headers: options.headers,
            ..HttpRequest::get(url)
        }
        .with_accept(options.accept);

        self.send(request).await
    }

    pub async fn post(&self, url: &str, payload: impl Serialize) -> Result<HttpResponse, Error> {
        self.send(HttpRequest::post(url).with_body(payload)?).await
    }

    pub async fn put(&self, url: &str, payload: impl Serialize) -> Result<HttpResponse, Error> {
        self.send(HttpRequest::put(url).with_body(payload)?).await
    }

    pub async fn delete(&self, url: &str) -> Result<HttpResponse, Error> {
        self.send(HttpRequest::delete(url)).await
    }

    /// Execute a request, applying default headers and status acceptance.
    ///
    /// Header names are compared case-insensitively and sent lowercased.
    /// Request headers win over default headers with the same name.
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, Error> {
        let mut names: Vec<String> = request.headers.keys().cloned().collect();
        names.sort();
        let mut headers = HashMap::with_capacity(names.len() + self.default_headers.len());
        for name in names {
            if let Some(value) = request.headers.remove(&name) {
                set_header(&mut headers, name, value);
            }
        }
        for (name, value) in &self.default_headers {
            headers
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        request.headers = headers;

        let response = self.executor.execute(&request).await?;
        tracing::debug!(
            method = ?request.method,
            url = %request.url,
            status = response.status,
            "http request completed"
        );

        if !request.accept.accepts(response.status) {
            return Err(Error::Status {
                response: Box::new(response),
            });
        }

        Ok(response)
    }
}
