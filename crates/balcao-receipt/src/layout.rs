//! # Receipt Layout
//!
//! Renders a `ReceiptDocument` into fixed-width text lines.
//!
//! ## The Cupom Shape
//! ```text
//! ========================================
//!               BALCÃO POS
//!            CUPOM NÃO FISCAL
//! ========================================
//! Cupom: 42
//! Data: 29/08/2026 14:33
//! Cliente: Consumidor Final
//! Operador: Administrador
//! ----------------------------------------
//! ITEM               QTD   UNIT.    TOTAL
//! Café 500g            2   10.00    20.00
//! Açúcar 1kg           1    5.00     5.00
//! ----------------------------------------
//! Subtotal:                      R$ 25.00
//! Desconto:                      R$ 3.00
//! TOTAL:                         R$ 22.00
//! Pagamento: PIX
//! ========================================
//!        Obrigado pela preferência!
//! ```
//!
//! The same lines feed the on-screen preview and the PDF writer, so the
//! two can never drift apart.

use balcao_core::receipt::ReceiptDocument;

/// Receipt column width, sized for 80mm thermal paper at ~40 columns.
pub const WIDTH: usize = 40;

/// Item name column width. Longer names are truncated, not wrapped.
const NAME_WIDTH: usize = 18;

fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(WIDTH).collect()
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= WIDTH {
        return text.to_string();
    }
    let pad = (WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn right_align(label: &str, value: &str) -> String {
    let used = label.chars().count() + value.chars().count();
    if used >= WIDTH {
        return format!("{} {}", label, value);
    }
    format!("{}{}{}", label, " ".repeat(WIDTH - used), value)
}

/// Truncates to `max` characters, char-aware so multibyte names don't get
/// split mid-codepoint.
fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Formats centavos as "12.34" without the currency prefix (column use).
fn plain_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Renders the full receipt as fixed-width lines.
pub fn lines(doc: &ReceiptDocument) -> Vec<String> {
    let mut out = Vec::new();

    out.push(rule('='));
    out.push(center("BALCÃO POS"));
    out.push(center("CUPOM NÃO FISCAL"));
    out.push(rule('='));

    out.push(format!("Cupom: {}", doc.number));
    out.push(format!("Data: {}", doc.date.format("%d/%m/%Y %H:%M")));
    out.push(format!("Cliente: {}", truncate(&doc.customer_name, WIDTH - 9)));
    if !doc.customer_doc.is_empty() {
        out.push(format!("CPF/CNPJ: {}", doc.customer_doc));
    }
    out.push(format!("Operador: {}", truncate(&doc.cashier, WIDTH - 10)));

    out.push(rule('-'));
    out.push(format!(
        "{:<width$} {:>3} {:>7} {:>8}",
        "ITEM",
        "QTD",
        "UNIT.",
        "TOTAL",
        width = NAME_WIDTH
    ));

    for item in &doc.items {
        out.push(format!(
            "{:<width$} {:>3} {:>7} {:>8}",
            truncate(&item.name, NAME_WIDTH),
            item.quantity,
            plain_amount(item.unit_price_cents),
            plain_amount(item.total_price_cents),
            width = NAME_WIDTH
        ));
    }

    out.push(rule('-'));
    out.push(right_align("Subtotal:", &doc.subtotal().to_string()));
    if doc.discount_cents > 0 {
        out.push(right_align("Desconto:", &doc.discount().to_string()));
    }
    out.push(right_align("TOTAL:", &doc.total().to_string()));
    out.push(format!("Pagamento: {}", doc.payment_method));

    out.push(rule('='));
    out.push(center("Obrigado pela preferência!"));

    out
}

/// Splits rendered lines into pages of at most `per_page` lines.
///
/// A receipt that fits on one page comes back as a single chunk; an empty
/// input still produces one empty page so the PDF always has a page.
pub fn paginate(lines: &[String], per_page: usize) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines
        .chunks(per_page.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_core::cart::Cart;
    use balcao_core::money::Money;
    use balcao_core::types::PaymentMethod;

    fn sample_doc() -> ReceiptDocument {
        let mut cart = Cart::new();
        cart.add(1, "Café 500g", Money::from_cents(1000), 10, 2).unwrap();
        cart.add(2, "Açúcar 1kg", Money::from_cents(500), 5, 1).unwrap();
        ReceiptDocument::preview(
            &cart,
            "",
            "",
            Money::from_cents(300),
            PaymentMethod::Pix,
            "Administrador",
        )
    }

    #[test]
    fn test_preview_carries_the_preview_marker() {
        let rendered = lines(&sample_doc());
        assert!(rendered.iter().any(|l| l == "Cupom: PRÉVIA"));
    }

    #[test]
    fn test_totals_section() {
        let rendered = lines(&sample_doc());
        let total = rendered.iter().find(|l| l.starts_with("TOTAL:")).unwrap();
        assert!(total.ends_with("R$ 22.00"));
        let subtotal = rendered.iter().find(|l| l.starts_with("Subtotal:")).unwrap();
        assert!(subtotal.ends_with("R$ 25.00"));
        assert!(rendered.iter().any(|l| l == "Pagamento: PIX"));
    }

    #[test]
    fn test_zero_discount_line_is_omitted() {
        let mut doc = sample_doc();
        doc.discount_cents = 0;
        doc.total_cents = doc.subtotal_cents;
        let rendered = lines(&doc);
        assert!(!rendered.iter().any(|l| l.starts_with("Desconto:")));
    }

    #[test]
    fn test_item_columns() {
        let rendered = lines(&sample_doc());
        let cafe = rendered.iter().find(|l| l.starts_with("Café 500g")).unwrap();
        assert!(cafe.contains("  2"));
        assert!(cafe.ends_with("20.00"));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let mut cart = Cart::new();
        cart.add(
            1,
            "Um Nome De Produto Extraordinariamente Longo",
            Money::from_cents(100),
            10,
            1,
        )
        .unwrap();
        let doc = ReceiptDocument::preview(
            &cart,
            "",
            "",
            Money::zero(),
            PaymentMethod::Cash,
            "Admin",
        );
        let rendered = lines(&doc);
        let item = rendered.iter().find(|l| l.starts_with("Um Nome")).unwrap();
        assert!(item.chars().count() <= WIDTH);
    }

    #[test]
    fn test_paginate() {
        let rendered = lines(&sample_doc());
        let pages = paginate(&rendered, 5);
        assert!(pages.len() > 1);
        let flattened: Vec<String> = pages.concat();
        assert_eq!(flattened, rendered);

        assert_eq!(paginate(&[], 5), vec![Vec::<String>::new()]);
    }
}
