//! # PDF Writer
//!
//! Writes the rendered receipt lines into a minimal PDF.
//!
//! ## Document Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Generated PDF                                    │
//! │                                                                         │
//! │  Catalog ──► Pages ──► Page 1 ──► Content stream (one Tj per line)     │
//! │                  └───► Page 2 ──► ...                                  │
//! │                                                                         │
//! │  Font: built-in Courier with WinAnsi encoding, so the fixed-width      │
//! │  layout columns line up and Portuguese accents render without          │
//! │  embedding a font file.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Page size matches 80mm thermal receipt paper, tall enough for one
//! layout page of lines.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

use balcao_core::receipt::ReceiptDocument;

use crate::layout;
use crate::ExportError;

/// 80mm paper in PDF points (1pt = 1/72in).
const PAGE_WIDTH: f32 = 226.8;
const PAGE_HEIGHT: f32 = 595.0;

const FONT_SIZE: f32 = 7.0;
const LINE_HEIGHT: f32 = 9.0;
const MARGIN_X: f32 = 10.0;
const MARGIN_TOP: f32 = 20.0;

/// Lines that fit one page at the metrics above.
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2.0 * MARGIN_TOP) / LINE_HEIGHT) as usize;

/// Renders the receipt and writes it to `path` as a PDF.
pub fn write_pdf(doc: &ReceiptDocument, path: &Path) -> Result<(), ExportError> {
    let lines = layout::lines(doc);
    let pages = layout::paginate(&lines, LINES_PER_PAGE);

    debug!(
        number = %doc.number,
        lines = lines.len(),
        pages = pages.len(),
        "Writing receipt PDF"
    );

    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let font_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page_lines in &pages {
        let mut ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("TL", vec![LINE_HEIGHT.into()]),
            Operation::new(
                "Td",
                vec![MARGIN_X.into(), (PAGE_HEIGHT - MARGIN_TOP).into()],
            ),
        ];

        for line in page_lines {
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(win_ansi_bytes(line), StringFormat::Literal)],
            ));
            // Advance to the next line by the leading set with TL.
            ops.push(Operation::new("T*", vec![]));
        }

        ops.push(Operation::new("ET", vec![]));

        let content = Content { operations: ops };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.compress();

    pdf.save(path).map_err(|e| ExportError::Pdf(e.to_string()))?;

    Ok(())
}

/// Converts a line to WinAnsi bytes.
///
/// WinAnsi overlaps Latin-1 for everything Portuguese needs (ç, ã, é, ...).
/// Characters outside that range degrade to '?' rather than corrupting
/// the stream.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
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
        ReceiptDocument::preview(
            &cart,
            "Maria Silva",
            "",
            Money::from_cents(300),
            PaymentMethod::Cash,
            "Admin",
        )
    }

    #[test]
    fn test_write_pdf_produces_a_pdf_file() {
        let path = std::env::temp_dir().join("balcao-test-cupom.pdf");
        write_pdf(&sample_doc(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 100);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_win_ansi_bytes() {
        assert_eq!(win_ansi_bytes("abc"), b"abc".to_vec());
        // ç is 0xE7 in Latin-1/WinAnsi
        assert_eq!(win_ansi_bytes("ç"), vec![0xE7]);
        // Outside Latin-1 degrades to '?'
        assert_eq!(win_ansi_bytes("日"), vec![b'?']);
    }
}
