//! # storefront-http
//!
//! HTTP client capability for the storefront stores.
//!
//! Requests are described by [`HttpRequest`], executed by an
//! [`HttpExecutor`] and checked against the request's [`AcceptStatus`] by
//! [`HttpClient`]:
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront_http::{AcceptStatus, HttpClient, ReqwestExecutor, RequestOptions};
//!
//! let client = HttpClient::new(Arc::new(ReqwestExecutor::with_default_timeout()?));
//!
//! // 304 comes back as a response instead of an error
//! let response = client
//!     .get(
//!         "http://localhost:5000/api/products",
//!         RequestOptions::default().with_accept(AcceptStatus::BELOW_CLIENT_ERROR),
//!     )
//!     .await?;
//! ```
//!
//! Enable the `mock` feature for [`executor::mock::MockExecutor`].

pub mod client;
pub mod error;
pub mod executor;
pub mod types;

// Re-export main types
pub use client::{HttpClient, RequestOptions};
pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use types::{set_header, AcceptStatus, HttpRequest, HttpResponse, Method};
