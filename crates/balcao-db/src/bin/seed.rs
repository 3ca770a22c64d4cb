//! # Seed Data Generator
//!
//! Prepares a development database: creates the default admin account and
//! a small Brazilian counter-store catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p balcao-db --bin seed
//!
//! # Specify database path
//! cargo run -p balcao-db --bin seed -- --db ./data/balcao.db
//! ```

use std::env;

use balcao_db::repository::product::NewProduct;
use balcao_db::{Database, DbConfig};

/// (name, category, price in centavos, stock, min stock)
const PRODUCTS: &[(&str, &str, i64, i64, i64)] = &[
    ("Café Torrado 500g", "Mercearia", 1890, 24, 5),
    ("Café Solúvel 200g", "Mercearia", 1450, 18, 5),
    ("Açúcar Cristal 1kg", "Mercearia", 499, 40, 10),
    ("Arroz Branco 5kg", "Mercearia", 2790, 30, 8),
    ("Feijão Carioca 1kg", "Mercearia", 849, 35, 8),
    ("Óleo de Soja 900ml", "Mercearia", 789, 28, 6),
    ("Farinha de Trigo 1kg", "Mercearia", 599, 22, 5),
    ("Macarrão Espaguete 500g", "Mercearia", 449, 45, 10),
    ("Leite Integral 1L", "Laticínios", 549, 48, 12),
    ("Queijo Mussarela 500g", "Laticínios", 2390, 10, 3),
    ("Manteiga 200g", "Laticínios", 1290, 14, 4),
    ("Iogurte Natural 170g", "Laticínios", 349, 30, 8),
    ("Refrigerante Cola 2L", "Bebidas", 899, 36, 10),
    ("Suco de Laranja 1L", "Bebidas", 749, 20, 6),
    ("Água Mineral 500ml", "Bebidas", 199, 60, 15),
    ("Cerveja Pilsen 350ml", "Bebidas", 399, 72, 20),
    ("Sabão em Pó 1kg", "Limpeza", 1190, 16, 4),
    ("Detergente 500ml", "Limpeza", 289, 32, 8),
    ("Água Sanitária 1L", "Limpeza", 449, 24, 6),
    ("Papel Higiênico 4un", "Higiene", 699, 26, 6),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./balcao_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Balcão POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./balcao_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Balcão POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.users().ensure_default_admin().await? {
        println!("✓ Default admin created (admin / admin123 — change it!)");
    } else {
        println!("  Users already exist, admin bootstrap skipped");
    }

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping product seed to avoid duplicates.");
        return Ok(());
    }

    println!();
    println!("Inserting products...");

    let mut inserted = 0;
    for (idx, (name, category, price_cents, quantity, min_quantity)) in
        PRODUCTS.iter().enumerate()
    {
        let product = NewProduct {
            name: (*name).to_string(),
            description: None,
            category: Some((*category).to_string()),
            price_cents: *price_cents,
            quantity: *quantity,
            min_quantity: *min_quantity,
            supplier: Some("Distribuidora Sul".to_string()),
            barcode: Some(format!("789{:010}", idx + 1)),
        };

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        inserted += 1;
    }

    println!("✓ Inserted {} products", inserted);

    let search_results = db.products().search("café", 10).await?;
    println!("  Search 'café': {} results", search_results.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
