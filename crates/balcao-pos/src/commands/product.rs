//! # Product Commands
//!
//! Catalog CRUD for the product management screen, plus the listings the
//! billing screen uses to pick items.
//!
//! Prices arrive as text from the price field and are parsed STRICTLY:
//! `"10.99"` is R$ 10.99, `"abc"` is a validation error. Only the discount
//! box is lenient (see `cart::get_cart`); a typo in a catalog price must
//! never silently become zero.

use serde::Deserialize;
use tracing::{debug, info};

use balcao_core::error::ValidationError;
use balcao_core::money::Money;
use balcao_core::types::Product;
use balcao_core::validation::{validate_price_cents, validate_product_name, validate_stock};
use balcao_db::{Database, NewProduct};

use crate::error::PosError;

/// Form input for creating or updating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Price as typed, e.g. `"10.99"` or `"10,99"`.
    pub price_input: String,
    pub quantity: i64,
    #[serde(default)]
    pub min_quantity: i64,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
}

impl ProductInput {
    /// Validates the form and parses the price field.
    fn validated(&self) -> Result<(String, Money), PosError> {
        validate_product_name(&self.name)?;

        let price = Money::parse(&self.price_input).ok_or_else(|| {
            PosError::from(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: format!("'{}' is not a decimal amount", self.price_input),
            })
        })?;
        validate_price_cents(price.cents())?;
        validate_stock(self.quantity)?;
        validate_stock(self.min_quantity)?;

        Ok((self.name.trim().to_string(), price))
    }
}

/// Creates a new product.
///
/// ## Errors
/// - `VALIDATION_ERROR` - empty name, unparsable price, negative stock,
///   or a barcode that is already taken
pub async fn create_product(db: &Database, input: ProductInput) -> Result<Product, PosError> {
    let (name, price) = input.validated()?;

    let product = db
        .products()
        .insert(&NewProduct {
            name,
            description: input.description,
            category: input.category,
            price_cents: price.cents(),
            quantity: input.quantity,
            min_quantity: input.min_quantity,
            supplier: input.supplier,
            barcode: input.barcode,
        })
        .await?;

    info!(id = product.id, name = %product.name, "Product created");
    Ok(product)
}

/// Updates an existing product with a full form submission.
///
/// ## Errors
/// - `NOT_FOUND` - no such product
/// - `VALIDATION_ERROR` - same rules as create
pub async fn update_product(
    db: &Database,
    product_id: i64,
    input: ProductInput,
) -> Result<Product, PosError> {
    let (name, price) = input.validated()?;

    let mut product = db
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| PosError::not_found("Product", product_id))?;

    product.name = name;
    product.description = input.description;
    product.category = input.category;
    product.price_cents = price.cents();
    product.quantity = input.quantity;
    product.min_quantity = input.min_quantity;
    product.supplier = input.supplier;
    product.barcode = input.barcode;

    db.products().update(&product).await?;

    info!(id = product.id, "Product updated");
    Ok(product)
}

/// Deletes a product from the catalog.
///
/// Products already sold are protected by the sale history foreign key;
/// the resulting error tells the operator why removal is refused.
pub async fn delete_product(db: &Database, product_id: i64) -> Result<(), PosError> {
    db.products().delete(product_id).await?;
    info!(id = product_id, "Product deleted");
    Ok(())
}

/// Loads one product for the edit form.
pub async fn get_product(db: &Database, product_id: i64) -> Result<Product, PosError> {
    db.products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| PosError::not_found("Product", product_id))
}

/// Lists the full catalog, depleted items included.
pub async fn list_products(db: &Database) -> Result<Vec<Product>, PosError> {
    Ok(db.products().list().await?)
}

/// Lists only products with stock, for the billing screen picker.
pub async fn list_available_products(db: &Database) -> Result<Vec<Product>, PosError> {
    Ok(db.products().list_in_stock().await?)
}

/// Lists products at or below their restock threshold.
pub async fn list_low_stock(db: &Database) -> Result<Vec<Product>, PosError> {
    Ok(db.products().list_low_stock().await?)
}

/// Searches the catalog by name, category or barcode.
pub async fn search_products(
    db: &Database,
    query: &str,
    limit: u32,
) -> Result<Vec<Product>, PosError> {
    debug!(query, limit, "search_products command");
    Ok(db.products().search(query, limit).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::PosApp;

    fn input(name: &str, price_input: &str, quantity: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: None,
            category: Some("Mercearia".to_string()),
            price_input: price_input.to_string(),
            quantity,
            min_quantity: 2,
            supplier: None,
            barcode: None,
        }
    }

    #[tokio::test]
    async fn test_create_parses_price_strictly() {
        let app = PosApp::start_in_memory().await.unwrap();

        let product = create_product(&app.db, input("Café 500g", "10,99", 10))
            .await
            .unwrap();
        assert_eq!(product.price_cents, 1099);

        // Strict parse: garbage is an error, never zero.
        let err = create_product(&app.db, input("Açúcar 1kg", "abc", 5))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_form() {
        let app = PosApp::start_in_memory().await.unwrap();

        let err = create_product(&app.db, input("", "10.00", 5)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = create_product(&app.db, input("Café 500g", "10.00", -1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_and_get() {
        let app = PosApp::start_in_memory().await.unwrap();
        let created = create_product(&app.db, input("Café 500g", "10.00", 10))
            .await
            .unwrap();

        let updated = update_product(&app.db, created.id, input("Café Torrado 500g", "11.50", 8))
            .await
            .unwrap();
        assert_eq!(updated.name, "Café Torrado 500g");
        assert_eq!(updated.price_cents, 1150);

        let fetched = get_product(&app.db, created.id).await.unwrap();
        assert_eq!(fetched.quantity, 8);

        let err = update_product(&app.db, 9999, input("X", "1.00", 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_and_listings() {
        let app = PosApp::start_in_memory().await.unwrap();
        let cafe = create_product(&app.db, input("Café 500g", "10.00", 10))
            .await
            .unwrap();
        create_product(&app.db, input("Açúcar 1kg", "5.00", 0))
            .await
            .unwrap();

        assert_eq!(list_products(&app.db).await.unwrap().len(), 2);
        assert_eq!(list_available_products(&app.db).await.unwrap().len(), 1);
        assert_eq!(list_low_stock(&app.db).await.unwrap().len(), 1);

        let hits = search_products(&app.db, "café", 20).await.unwrap();
        assert_eq!(hits.len(), 1);

        delete_product(&app.db, cafe.id).await.unwrap();
        let err = get_product(&app.db, cafe.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
