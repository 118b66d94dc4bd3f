//! # Seed Data Generator
//!
//! Populates the database with a demo seller, store and products for
//! development. Every product goes through `create_product`, so seeded data
//! obeys the same rules as storefront submissions.
//!
//! ## Usage
//! ```bash
//! # 50 products into ./market_dev.db (or $DATABASE_PATH)
//! cargo run -p market-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p market-db --bin seed -- --count 200 --db ./data/market.db
//! ```

use std::env;
use std::time::Instant;

use market_core::submission::{
    CategoryInput, ProductSubmission, SellerApplication, StoreApplication, TagInput, VariantInput,
};
use market_core::{SellerActor, VariantColor, VariantSize};
use market_db::{Database, MarketConfig};
use tracing::{info, warn};

/// (product name, category) pairs; names stay within 15 characters.
const PRODUCTS: &[(&str, &str)] = &[
    ("Basic Tee", "Tops"),
    ("Polo Shirt", "Tops"),
    ("Linen Shirt", "Tops"),
    ("Hoodie", "Outerwear"),
    ("Rain Jacket", "Outerwear"),
    ("Chinos", "Bottoms"),
    ("Denim Jeans", "Bottoms"),
    ("Cargo Shorts", "Bottoms"),
    ("Sun Dress", "Dresses"),
    ("Wool Scarf", "Accessory"),
];

const TAGS: &[(&str, &str)] = &[
    ("Summer", "Light pieces for warm days"),
    ("Cotton", "Made from natural cotton"),
    ("Classic", "Wardrobe staples"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = MarketConfig::load()?;
    config.init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut count: usize = 50;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Marketplace Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to create (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: $DATABASE_PATH)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(path = %config.database_path.display(), count, "Seeding database");
    let db = Database::new(config.db_config()).await?;

    let existing = db.products().counts().await?;
    if existing.products > 0 {
        warn!(
            products = existing.products,
            "Database already has products, skipping seed"
        );
        return Ok(());
    }

    let actor = demo_seller(&db).await?;
    let store = db
        .stores()
        .create_store(
            &actor,
            &StoreApplication {
                store_name: "Demo Outfitters".to_string(),
                store_description: Some("Seeded store for local development".to_string()),
                logo_image: None,
                cover_image: None,
                is_active: true,
            },
        )
        .await?;
    info!(store_id = %store.id, slug = %store.slug, "Demo store ready");

    let started = Instant::now();
    let mut created = 0;

    for n in 0..count {
        let submission = generate_product(&store.id, n);
        match db.products().create_product(&actor, &submission).await {
            Ok(product) => {
                created += 1;
                if created % 10 == 0 {
                    info!(created, last = %product.product_id, "Progress");
                }
            }
            Err(err) => warn!(error = %err, name = %submission.name, "Failed to create product"),
        }
    }

    let counts = db.products().counts().await?;
    info!(
        created,
        variants = counts.variants,
        categories = counts.categories,
        tags = counts.tags,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Seed complete"
    );

    db.close().await;
    Ok(())
}

/// Creates a user and promotes them to seller.
async fn demo_seller(db: &Database) -> Result<SellerActor, Box<dyn std::error::Error>> {
    let user = db
        .users()
        .create(Some("Demo Seller"), Some("seller@example.com"))
        .await?;

    let seller = db
        .sellers()
        .create_seller_account(
            &user.id,
            &SellerApplication {
                business_name: "Demo Outfitters LLC".to_string(),
                phone_number: "5550100200".to_string(),
                stripe_account_id: "acct_1DemoSeller000001".to_string(),
                agreed_to_terms: true,
            },
        )
        .await?;

    Ok(SellerActor {
        user_id: user.id,
        seller_id: seller.id,
    })
}

/// Builds the `n`th demo submission: two or three variants, one category and
/// a tag on every other product.
fn generate_product(store_id: &str, n: usize) -> ProductSubmission {
    let (name, category) = PRODUCTS[n % PRODUCTS.len()];
    let color = VariantColor::PALETTE[n % VariantColor::PALETTE.len()];
    let variant_count = 2 + n % 2;
    let base_price = 1500 + (n as i64 % 7) * 250;
    let shade = color.display_name().rsplit(' ').next().unwrap_or("Std");

    let variants = VariantSize::ALL
        .iter()
        .skip(n % 3)
        .take(variant_count)
        .enumerate()
        .map(|(i, size)| VariantInput {
            name: format!("{shade} {}", size.as_str().to_uppercase()),
            color: color.hex().to_string(),
            size: size.as_str().to_string(),
            price: base_price + i as i64 * 100,
            quantity: ((n * 7 + i * 3) % 40) as i64,
        })
        .collect();

    let tags = (n % 2 == 0).then(|| {
        let (tag, description) = TAGS[n % TAGS.len()];
        vec![TagInput {
            name: tag.to_string(),
            description: description.to_string(),
        }]
    });

    ProductSubmission {
        name: name.to_string(),
        description: format!("{name} from the demo collection"),
        status: if n % 5 == 0 { "draft" } else { "active" }.to_string(),
        store_id: store_id.to_string(),
        variants,
        categories: vec![CategoryInput {
            name: category.to_string(),
        }],
        tags,
    }
}
