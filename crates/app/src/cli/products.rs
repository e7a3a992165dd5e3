//! Products command.

use bazaar::currency::format_usd;
use bazaar_app::context::AppContext;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: u64,

    #[tabled(rename = "Title")]
    title: String,

    #[tabled(rename = "Price")]
    price: String,

    #[tabled(rename = "Category")]
    category: String,
}

/// Print the catalog listing as a table.
pub async fn run(context: &AppContext) -> Result<(), String> {
    let products = context
        .products
        .list_products()
        .await
        .map_err(|error| format!("failed to fetch products: {error}"))?;

    let rows: Vec<ProductRow> = products
        .into_iter()
        .map(|product| ProductRow {
            id: product.id,
            title: product.title,
            price: format_usd(product.price),
            category: product.category,
        })
        .collect();

    println!("{}", Table::new(rows));

    Ok(())
}
