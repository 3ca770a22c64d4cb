//! # Cart Module
//!
//! The in-memory shopping cart and its totals math.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                │
//! │                                                                     │
//! │  Screen Action            Cart Change                               │
//! │  ─────────────            ───────────                               │
//! │  Pick product + qty ────► add()      merge by product_id            │
//! │  Remove line ───────────► remove()   silent no-op if absent         │
//! │  Clear button ──────────► clear()                                   │
//! │  Discount keystroke ────► subtotal() / total(discount)              │
//! │  Finalizar Venda ───────► handed to balcao-db::checkout             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is an explicit value passed into checkout; there is no
//! module-level singleton. Stock is validated against the quantity the
//! caller observed at add-time only — finalize does not re-check it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
///
/// The name and unit price are frozen at add-time so the cart display
/// stays consistent even if the product row changes underneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl CartLine {
    /// quantity × unit price.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id`; adding an existing product merges
///   quantities into the existing line (insertion order is preserved).
/// - Every accepted `add` had quantity > 0 and quantity ≤ the stock the
///   caller passed in. The *merged* quantity is not re-checked against
///   stock; the original system allowed this and we keep it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart or merges into an existing line.
    ///
    /// ## Errors
    /// - `MustBePositive` when `quantity <= 0`
    /// - `InsufficientStock` when `quantity > available_stock`
    ///
    /// Both checks use only the arguments; nothing is looked up here.
    pub fn add(
        &mut self,
        product_id: i64,
        name: &str,
        unit_price: Money,
        available_stock: i64,
        quantity: i64,
    ) -> Result<(), ValidationError> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        if quantity > available_stock {
            return Err(ValidationError::InsufficientStock {
                product: name.to_string(),
                available: available_stock,
                requested: quantity,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            // Merged quantity may exceed stock; checked at add-time only.
            line.quantity += quantity;
            return Ok(());
        }

        self.lines.push(CartLine {
            product_id,
            name: name.to_string(),
            quantity,
            unit_price,
        });
        Ok(())
    }

    /// Removes the line for `product_id`. Not an error if absent.
    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empties the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals; zero for an empty cart.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Discount-adjusted total: max(0, subtotal - discount).
    pub fn total(&self, discount: Money) -> Money {
        self.subtotal().less_discount(discount)
    }

    /// The cart lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_add_and_subtotal() {
        let mut cart = Cart::new();
        cart.add(1, "Café 500g", cents(1000), 10, 2).unwrap();
        cart.add(2, "Açúcar 1kg", cents(500), 5, 1).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal().cents(), 2500);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut cart = Cart::new();
        cart.add(1, "Café 500g", cents(1000), 10, 2).unwrap();
        cart.add(1, "Café 500g", cents(1000), 10, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.subtotal().cents(), 5000);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(1, "Café 500g", cents(1000), 10, 0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            cart.add(1, "Café 500g", cents(1000), 10, -2),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_quantity_over_stock() {
        let mut cart = Cart::new();
        let err = cart.add(1, "Café 500g", cents(1000), 3, 5).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            }
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_is_not_rechecked_against_stock() {
        // Each individual add fits the stock, the merged quantity does not.
        // Documented behavior of the original system, kept as-is.
        let mut cart = Cart::new();
        cart.add(1, "Café 500g", cents(1000), 3, 2).unwrap();
        cart.add(1, "Café 500g", cents(1000), 3, 2).unwrap();
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut cart = Cart::new();
        cart.add(1, "Café 500g", cents(1000), 10, 1).unwrap();
        cart.remove(99);
        assert_eq!(cart.len(), 1);
        cart.remove(1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(1, "Café 500g", cents(1000), 10, 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_total_with_discount() {
        let mut cart = Cart::new();
        cart.add(1, "Café 500g", cents(1000), 10, 2).unwrap();
        cart.add(2, "Açúcar 1kg", cents(500), 5, 1).unwrap();

        // Worked example: subtotal 25.00, discount 3.00 → total 22.00.
        assert_eq!(cart.total(cents(300)).cents(), 2200);
        // Discount larger than subtotal floors at zero.
        assert_eq!(cart.total(cents(99999)).cents(), 0);
        // Unparsable discount entry coerces to zero.
        assert_eq!(cart.total(Money::parse_lenient("oops")).cents(), 2500);
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.total(cents(500)), Money::zero());
    }
}
