use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Product,
    protocol::{CreateProductResponse, NewProduct, ProductListResponse},
};
use tracing::debug;

use crate::{
    config::{normalize_base_url, ClientSettings},
    error::ServiceError,
};

/// The remote product API as seen by the store.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<CreateProductResponse, ServiceError>;
}

pub struct HttpProductService {
    http: Client,
    base_url: String,
    list_trailing_slash: bool,
}

impl HttpProductService {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
            list_trailing_slash: false,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build().map_err(ServiceError::Transport)?,
            base_url: normalize_base_url(&settings.api_base_url)?,
            list_trailing_slash: settings.list_trailing_slash,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self) -> String {
        if self.list_trailing_slash {
            format!("{}/products/", self.base_url)
        } else {
            format!("{}/products", self.base_url)
        }
    }

    fn create_url(&self) -> String {
        format!("{}/products/addproduct", self.base_url)
    }
}

#[async_trait]
impl ProductService for HttpProductService {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let url = self.list_url();
        debug!(%url, "listing products");
        let body: ProductListResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.data)
    }

    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<CreateProductResponse, ServiceError> {
        let url = self.create_url();
        debug!(%url, title = %product.title, "creating product");
        // `.json()` sets `Content-Type: application/json`.
        let response: CreateProductResponse = self
            .http
            .post(url)
            .json(product)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
