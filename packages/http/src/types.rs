use std::collections::HashMap;

use serde::Serialize;

/// HTTP method used by the store actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
            Method::PUT => http::Method::PUT,
            Method::DELETE => http::Method::DELETE,
        }
    }
}

/// Half-open range of status codes a request treats as a non-error outcome.
///
/// Anything outside the range is surfaced as [`crate::Error::Status`] by
/// [`crate::HttpClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptStatus {
    pub min: u16,
    pub max: u16,
}

impl AcceptStatus {
    /// `[200, 300)`, the usual success range.
    pub const SUCCESS: Self = Self { min: 200, max: 300 };

    /// `[200, 400)`. Lets callers see 304 Not Modified instead of an error.
    pub const BELOW_CLIENT_ERROR: Self = Self { min: 200, max: 400 };

    pub fn accepts(&self, status: u16) -> bool {
        (self.min..self.max).contains(&status)
    }
}

impl Default for AcceptStatus {
    fn default() -> Self {
        Self::SUCCESS
    }
}

/// Set a header, replacing any entry whose name differs only in case.
///
/// Names are stored lowercased, so one header name maps to one key.
pub fn set_header(
    headers: &mut HashMap<String, String>,
    name: impl Into<String>,
    value: impl Into<String>,
) {
    let name = name.into().to_ascii_lowercase();
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
    headers.insert(name, value.into());
}

/// A full HTTP request specification
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, DELETE)
    pub method: Method,

    /// Absolute request URL
    pub url: String,

    /// Query parameters
    pub query: HashMap<String, String>,

    /// Request headers, lowercase names
    pub headers: HashMap<String, String>,

    /// Request body (will be JSON-serialized)
    pub body: Option<serde_json::Value>,

    /// Statuses that count as a non-error outcome
    pub accept: AcceptStatus,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self {
            method: Method::PUT,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Serialize) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_accept(mut self, accept: AcceptStatus) -> Self {
        self.accept = accept;
        self
    }
}

/// HTTP response from a request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Modified")
    pub status_text: String,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body. Null when the body was empty, a JSON string when it
    /// was not valid JSON.
    pub body: serde_json::Value,

    /// Raw body as string
    pub body_text: Option<String>,
}

impl HttpResponse {
    /// Build a response from a status and a JSON body.
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        let status_text = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();
        let body_text = match &body {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };

        Self {
            status,
            status_text,
            headers: HashMap::new(),
            body,
            body_text: Some(body_text),
        }
    }

    /// Decode a raw body the way the stores see it.
    ///
    /// Blank text is no body at all; text that isn't JSON is kept as a string.
    pub fn body_from_text(text: &str) -> serde_json::Value {
        if text.trim().is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
    }

    /// Check if the response is a 304 Not Modified
    pub fn is_not_modified(&self) -> bool {
        self.status == 304
    }
}
