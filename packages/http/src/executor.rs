//! HTTP execution abstraction for testing.
//!
//! This module provides a trait for HTTP execution that can be mocked in tests,
//! avoiding the need for actual network calls.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse};

/// Trait for executing HTTP requests.
///
/// Implementations perform exactly one network exchange and return whatever
/// status the server produced. Status acceptance is applied by
/// [`crate::HttpClient`], not here.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Execute an HTTP request and return the response.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Production HTTP executor using reqwest.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create a new executor with the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = url::Url::parse(&request.url)?;
        let method: http::Method = request.method.into();

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        let mut req_builder = self.client.request(method, url).headers(headers);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().await?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let mut resp_headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                resp_headers.insert(name.to_string(), v.to_string());
            }
        }

        // 304 and 204 carry no body; both end up as Null
        let body_text = response.text().await?;
        let body = HttpResponse::body_from_text(&body_text);

        Ok(HttpResponse {
            status,
            status_text,
            headers: resp_headers,
            body,
            body_text: Some(body_text),
        })
    }
}

/// Mock HTTP executor for testing.
///
/// Returns predefined responses based on request matching.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// A mock HTTP executor that returns predefined responses.
    #[derive(Clone, Default)]
    pub struct MockExecutor {
        /// Response queues keyed by request URL. The last entry of a queue
        /// is replayed once the earlier ones are used up.
        responses: Arc<Mutex<HashMap<String, VecDeque<HttpResponse>>>>,
        /// Default response when no match found.
        default_response: Arc<Mutex<Option<HttpResponse>>>,
        /// Recorded requests for verification.
        recorded_requests: Arc<Mutex<Vec<HttpRequest>>>,
        /// Error message to fail every request with.
        failure: Arc<Mutex<Option<String>>>,
    }

    impl MockExecutor {
        /// Create a new mock executor.
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response for a specific URL.
        pub fn with_response(self, url: impl Into<String>, response: HttpResponse) -> Self {
            self.responses
                .lock()
                .unwrap()
                .entry(url.into())
                .or_default()
                .push_back(response);
            self
        }

        /// Set a default response when no URL matches.
        pub fn with_default_response(self, response: HttpResponse) -> Self {
            *self.default_response.lock().unwrap() = Some(response);
            self
        }

        /// Configure to fail all requests with a transport error.
        pub fn fail_with(self, message: impl Into<String>) -> Self {
            *self.failure.lock().unwrap() = Some(message.into());
            self
        }

        /// Get all recorded requests.
        pub fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.recorded_requests.lock().unwrap().clone()
        }

        /// Create a 304 Not Modified response with the given body.
        pub fn not_modified(body: serde_json::Value) -> HttpResponse {
            HttpResponse::new(304, body)
        }

        /// Create a simple success response.
        pub fn success_response(body: serde_json::Value) -> HttpResponse {
            HttpResponse::new(200, body)
        }

        /// Create a simple error response.
        pub fn error_response(status: u16, message: &str) -> HttpResponse {
            let mut response = HttpResponse::new(status, serde_json::json!({"error": message}));
            response.status_text = message.to_string();
            response
        }

        /// Create a 404 Not Found response.
        pub fn not_found() -> HttpResponse {
            Self::error_response(404, "Not Found")
        }
    }

    #[async_trait]
    impl HttpExecutor for MockExecutor {
        async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            self.recorded_requests.lock().unwrap().push(request.clone());

            if let Some(message) = self.failure.lock().unwrap().clone() {
                return Err(Error::Transport { message });
            }

            let mut responses = self.responses.lock().unwrap();
            if let Some(queue) = responses.get_mut(&request.url) {
                let next = if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                };
                if let Some(response) = next {
                    return Ok(response);
                }
            }

            if let Some(ref response) = *self.default_response.lock().unwrap() {
                return Ok(response.clone());
            }

            Ok(Self::not_found())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockExecutor;
    use super::*;
    use crate::types::Method;
    use serde_json::json;

    #[tokio::test]
    async fn mock_executor_returns_configured_response() {
        let executor = MockExecutor::new().with_response(
            "http://api.test/products",
            MockExecutor::success_response(json!([{"id": 1}])),
        );

        let request = HttpRequest::get("http://api.test/products");
        let result = executor.execute(&request).await.unwrap();

        assert_eq!(result.status, 200);
        assert_eq!(result.body, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn mock_executor_replays_queue_in_order_then_sticks_on_last() {
        let executor = MockExecutor::new()
            .with_response("http://api.test/a", MockExecutor::not_modified(json!(null)))
            .with_response(
                "http://api.test/a",
                MockExecutor::success_response(json!({"fresh": true})),
            );

        let request = HttpRequest::get("http://api.test/a");
        let first = executor.execute(&request).await.unwrap();
        let second = executor.execute(&request).await.unwrap();
        let third = executor.execute(&request).await.unwrap();

        assert_eq!(first.status, 304);
        assert_eq!(second.status, 200);
        assert_eq!(third, second);
    }

    #[tokio::test]
    async fn mock_executor_returns_default_response() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::success_response(json!({"default": true})));

        let result = executor
            .execute(&HttpRequest::get("http://api.test/any"))
            .await
            .unwrap();

        assert_eq!(result.body, json!({"default": true}));
    }

    #[tokio::test]
    async fn mock_executor_returns_404_when_no_match() {
        let executor = MockExecutor::new();
        let result = executor
            .execute(&HttpRequest::get("http://api.test/unknown"))
            .await
            .unwrap();

        assert_eq!(result.status, 404);
    }

    #[tokio::test]
    async fn mock_executor_fails_when_configured() {
        let executor = MockExecutor::new().fail_with("connection refused");
        let result = executor.execute(&HttpRequest::get("http://api.test/any")).await;

        match result {
            Err(Error::Transport { message }) => assert_eq!(message, "connection refused"),
            other => panic!("expected transport error, got {:?}", other),
        }
        assert_eq!(executor.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn mock_executor_records_requests() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::success_response(json!(null)));

        let mut first = HttpRequest::get("http://api.test/first");
        first.query.insert("page".to_string(), "2".to_string());
        executor.execute(&first).await.unwrap();
        let second = HttpRequest::post("http://api.test/second")
            .with_body(json!({"a": 1}))
            .unwrap();
        executor.execute(&second).await.unwrap();
        executor
            .execute(&HttpRequest::delete("http://api.test/third"))
            .await
            .unwrap();

        let recorded = executor.recorded_requests();
        assert_eq!(recorded.len(), 3);
        assert_eq!(recorded[0].method, Method::GET);
        assert_eq!(recorded[0].query.get("page"), Some(&"2".to_string()));
        assert_eq!(recorded[1].method, Method::POST);
        assert_eq!(recorded[1].body, Some(json!({"a": 1})));
        assert_eq!(recorded[2].url, "http://api.test/third");
    }

    #[test]
    fn mock_executor_error_response_helper() {
        let response = MockExecutor::error_response(500, "Internal Error");
        assert_eq!(response.status, 500);
        assert_eq!(response.status_text, "Internal Error");
    }

    #[test]
    fn reqwest_executor_creation() {
        assert!(ReqwestExecutor::with_default_timeout().is_ok());
        assert!(ReqwestExecutor::new(Duration::from_secs(10)).is_ok());
    }

    #[tokio::test]
    async fn reqwest_executor_rejects_relative_url() {
        let executor = ReqwestExecutor::with_default_timeout().unwrap();
        let result = executor.execute(&HttpRequest::get("products")).await;

        assert!(matches!(result, Err(Error::UrlParse(_))));
    }
}
