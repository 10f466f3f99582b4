use serde::{Deserialize, Serialize};

use crate::domain::{Price, Product, ProductId};

/// Body of `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

/// Body of `POST /products/addproduct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Price,
}

impl NewProduct {
    pub fn into_product(self, id: Option<ProductId>) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
}
