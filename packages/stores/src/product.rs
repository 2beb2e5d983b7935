//! Product store: CRUD actions against the `products` resource.

use std::fmt::Display;

use serde::Serialize;
use storefront_http::HttpResponse;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::resolver::{ConditionalFetch, RequestParameters};

#[derive(Clone)]
pub struct ProductStore {
    fetch: ConditionalFetch,
    collection: Endpoint,
}

impl ProductStore {
    pub fn new(fetch: ConditionalFetch, collection: Endpoint) -> Self {
        Self { fetch, collection }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.collection
    }

    /// List products. A body-less 304 is refetched with a cache bust.
    pub async fn fetch_products(&self, params: RequestParameters) -> Result<HttpResponse, Error> {
        self.fetch.fetch_collection(&self.collection, params).await
    }

    /// Get one product. A 304 without any body is refetched with a cache bust.
    pub async fn fetch_product(&self, id: impl Display) -> Result<HttpResponse, Error> {
        let item = self.collection.item(id)?;
        self.fetch.fetch_item(&item).await
    }

    pub async fn create_product(&self, payload: impl Serialize) -> Result<HttpResponse, Error> {
        Ok(self
            .fetch
            .client()
            .post(self.collection.as_str(), payload)
            .await?)
    }

    pub async fn update_product(
        &self,
        id: impl Display,
        payload: impl Serialize,
    ) -> Result<HttpResponse, Error> {
        let item = self.collection.item(id)?;
        Ok(self.fetch.client().put(item.as_str(), payload).await?)
    }

    pub async fn delete_product(&self, id: impl Display) -> Result<HttpResponse, Error> {
        let item = self.collection.item(id)?;
        Ok(self.fetch.client().delete(item.as_str()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{CacheBuster, CACHE_BUST_PARAM};
    use serde_json::json;
    use std::sync::Arc;
    use storefront_http::executor::mock::MockExecutor;
    use storefront_http::{HttpClient, Method};

    const PRODUCTS: &str = "http://localhost:5000/api/products";

    fn store(executor: &MockExecutor) -> ProductStore {
        let fetch = ConditionalFetch::new(
            HttpClient::new(Arc::new(executor.clone())),
            Arc::new(CacheBuster::new()),
        );
        ProductStore::new(fetch, Endpoint::parse(PRODUCTS).unwrap())
    }

    #[tokio::test]
    async fn fetch_products_refetches_stale_list() {
        let executor = MockExecutor::new()
            .with_response(PRODUCTS, MockExecutor::not_modified(json!([])))
            .with_response(
                PRODUCTS,
                MockExecutor::success_response(json!([{"id": 1, "name": "Desk"}])),
            );

        let response = store(&executor)
            .fetch_products(RequestParameters::default())
            .await
            .unwrap();

        assert_eq!(response.body, json!([{"id": 1, "name": "Desk"}]));
        let recorded = executor.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert!(recorded[1].query.contains_key(CACHE_BUST_PARAM));
    }

    #[tokio::test]
    async fn fetch_product_targets_item_url() {
        let executor = MockExecutor::new().with_response(
            format!("{}/5", PRODUCTS),
            MockExecutor::success_response(json!({"id": 5})),
        );

        let response = store(&executor).fetch_product(5).await.unwrap();

        assert_eq!(response.body, json!({"id": 5}));
        assert_eq!(executor.recorded_requests()[0].method, Method::GET);
    }

    #[tokio::test]
    async fn fetch_product_refetches_absent_304() {
        let url = format!("{}/5", PRODUCTS);
        let executor = MockExecutor::new()
            .with_response(url.clone(), MockExecutor::not_modified(json!(null)))
            .with_response(url, MockExecutor::success_response(json!({"id": 5})));

        let response = store(&executor).fetch_product(5).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(executor.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn create_update_delete_map_to_post_put_delete() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::success_response(json!({"ok": true})));
        let store = store(&executor);

        store.create_product(json!({"name": "Lamp"})).await.unwrap();
        store
            .update_product(7, json!({"name": "Floor lamp"}))
            .await
            .unwrap();
        store.delete_product(7).await.unwrap();

        let recorded = executor.recorded_requests();
        assert_eq!(recorded.len(), 3);
        assert_eq!(recorded[0].method, Method::POST);
        assert_eq!(recorded[0].url, PRODUCTS);
        assert_eq!(recorded[0].body, Some(json!({"name": "Lamp"})));
        assert_eq!(recorded[1].method, Method::PUT);
        assert_eq!(recorded[1].url, format!("{}/7", PRODUCTS));
        assert_eq!(recorded[2].method, Method::DELETE);
        assert_eq!(recorded[2].url, format!("{}/7", PRODUCTS));
    }

    #[tokio::test]
    async fn write_actions_do_not_accept_304() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::not_modified(json!(null)));

        let err = store(&executor)
            .create_product(json!({"name": "Lamp"}))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(304));
    }

    #[tokio::test]
    async fn missing_product_surfaces_as_status_error() {
        let executor = MockExecutor::new();

        let err = store(&executor).fetch_product(404).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
    }
}
