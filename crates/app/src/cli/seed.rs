//! Seed command.

use bazaar_app::context::AppContext;

/// Copy the catalog into the document store with the given stock quantity.
pub async fn run(context: &AppContext, stock: u32) -> Result<(), String> {
    let written = context
        .products
        .seed_products(stock)
        .await
        .map_err(|error| format!("failed to seed products: {error}"))?;

    println!("seeded {written} products");

    Ok(())
}
