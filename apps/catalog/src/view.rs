//! Plain-text rendering of a store snapshot.

use std::fmt::Write as _;

use product_client::StoreSnapshot;
use shared::domain::Product;

pub const TITLE: &str = "Product Management";

pub fn submit_label(snapshot: &StoreSnapshot) -> &'static str {
    if snapshot.is_submitting() {
        "Adding..."
    } else {
        "Add Product"
    }
}

pub fn submit_enabled(snapshot: &StoreSnapshot) -> bool {
    !snapshot.is_loading()
}

pub fn render_product(product: &Product) -> String {
    format!(
        "{}\n  {}\n  ${}",
        product.title, product.description, product.price
    )
}

pub fn render(snapshot: &StoreSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out);

    if let Some(message) = snapshot.status.error_message() {
        let _ = writeln!(out, "Error: {message}");
        let _ = writeln!(out);
    }

    let control = submit_label(snapshot);
    if submit_enabled(snapshot) {
        let _ = writeln!(out, "[{control}]");
    } else {
        let _ = writeln!(out, "[{control}] (disabled)");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Product List");
    if snapshot.is_loading() && snapshot.products.is_empty() {
        let _ = writeln!(out, "Loading products...");
    } else if snapshot.products.is_empty() {
        let _ = writeln!(out, "No products available");
    } else {
        for product in &snapshot.products {
            let _ = writeln!(out, "- {}", render_product(product));
        }
    }
    out
}
