//! # storefront-stores
//!
//! Data-access stores for the `products` and `users` REST resources.
//!
//! Each action issues one CRUD request and returns the raw
//! [`HttpResponse`](storefront_http::HttpResponse). Single-resource and
//! product-list fetches go through [`ConditionalFetch`], which refetches once
//! with a cache-bust token when the server answers `304 Not Modified` without
//! a usable body.
//!
//! ```ignore
//! use storefront_stores::{RequestParameters, StoreConfig, Stores};
//!
//! let stores = Stores::from_config(&StoreConfig::load(None)?)?;
//!
//! let products = stores.products.fetch_products(RequestParameters::default()).await?;
//! let product = stores.products.fetch_product(5).await?;
//! ```

pub mod config;
pub mod endpoint;
pub mod error;
pub mod product;
pub mod resolver;
pub mod service;
pub mod user;

pub use config::StoreConfig;
pub use endpoint::Endpoint;
pub use error::Error;
pub use product::ProductStore;
pub use resolver::{
    is_absent, is_empty_collection, CacheBuster, ConditionalFetch, RequestParameters,
    CACHE_BUST_PARAM,
};
pub use service::Stores;
pub use user::{Pagination, UserListStore, UserQuery};
