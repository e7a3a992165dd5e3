//! Test Helpers

use bazaar::products::{Product, ProductId};

/// Catalog product fixture.
pub(crate) fn product(id: ProductId, price: &str) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        price: price.parse().expect("fixture price should parse"),
        description: String::new(),
        category: "fixtures".to_string(),
        image: String::new(),
        stock: 10,
        store_name: "Test Store".to_string(),
    }
}
