//! Seed the product catalog with sample data.
//!
//! # Usage
//!
//! ```bash
//! tam-cli seed
//! ```
//!
//! Seeding is skipped when the catalog already has products, so the command
//! is safe to run repeatedly.

use rust_decimal::Decimal;

use tamarind_storefront::db::{self, ProductRepository};
use tamarind_storefront::models::NewProduct;

use super::database_url;

/// Sample catalog spanning a few categories.
fn sample_products() -> Vec<NewProduct> {
    fn product(
        name: &str,
        description: &str,
        price: Decimal,
        image: &str,
        category: &str,
    ) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: image.to_string(),
            category: category.to_string(),
        }
    }

    vec![
        product(
            "Premium Wireless Headphones",
            "High-quality wireless headphones with noise cancellation",
            Decimal::new(299_99, 2),
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=800&q=80",
            "Electronics",
        ),
        product(
            "Smart Watch Pro",
            "Advanced smartwatch with health tracking features",
            Decimal::new(199_99, 2),
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=800&q=80",
            "Electronics",
        ),
        product(
            "Mechanical Keyboard",
            "Tenkeyless mechanical keyboard with hot-swappable switches",
            Decimal::new(159_99, 2),
            "https://images.unsplash.com/photo-1511467687858-23d96c32e4ae?w=800&q=80",
            "Electronics",
        ),
        product(
            "Leather Messenger Bag",
            "Full-grain leather bag with padded laptop sleeve",
            Decimal::new(149_50, 2),
            "https://images.unsplash.com/photo-1547949003-9792a18a2601?w=800&q=80",
            "Accessories",
        ),
        product(
            "Stainless Steel Water Bottle",
            "Vacuum-insulated bottle that keeps drinks cold for 24 hours",
            Decimal::new(24_95, 2),
            "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=800&q=80",
            "Home",
        ),
        product(
            "Pour-Over Coffee Kit",
            "Ceramic dripper, glass carafe, and a pack of filters",
            Decimal::new(54_00, 2),
            "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=800&q=80",
            "Home",
        ),
        product(
            "Trail Running Shoes",
            "Lightweight trail shoes with aggressive grip",
            Decimal::new(129_99, 2),
            "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=800&q=80",
            "Clothing",
        ),
        product(
            "Organic Cotton T-Shirt",
            "Heavyweight organic cotton tee, garment dyed",
            Decimal::new(29_99, 2),
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=800&q=80",
            "Clothing",
        ),
    ]
}

/// Insert the sample catalog.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&database_url).await?;

    let repo = ProductRepository::new(&pool);

    let existing = repo.count().await?;
    if existing > 0 {
        tracing::info!("Catalog already has {existing} products, skipping seed");
        return Ok(());
    }

    let products = sample_products();
    let total = products.len();

    for product in &products {
        let inserted = repo.insert(product).await?;
        tracing::info!(id = %inserted.id, name = %inserted.name, "Seeded product");
    }

    tracing::info!("Seeding complete! {total} products inserted");
    Ok(())
}
