//! # Print Spool
//!
//! Printing works by hand-off: the receipt is written to a uniquely-named
//! temp PDF and the caller opens it with the OS print/viewer dialog. Once
//! the dialog is done, the spool file is discarded.
//!
//! ```text
//! spool(doc) ──► /tmp/balcao-cupom-<uuid>.pdf ──► OS print dialog
//!                                                      │
//! discard(path) ◄──────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use balcao_core::receipt::ReceiptDocument;

use crate::pdf;
use crate::ExportError;

/// Writes the receipt to a uniquely-named PDF in the system temp directory
/// and returns its path.
pub fn spool(doc: &ReceiptDocument) -> Result<PathBuf, ExportError> {
    let path = std::env::temp_dir().join(format!("balcao-cupom-{}.pdf", Uuid::new_v4()));

    pdf::write_pdf(doc, &path)?;

    debug!(path = %path.display(), "Receipt spooled");
    Ok(path)
}

/// Removes a spool file. Best-effort: a file already removed (or held open
/// by the viewer on some platforms) is logged, not an error.
pub fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "Could not remove spool file");
    }
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

    #[test]
    fn test_spool_and_discard() {
        let mut cart = Cart::new();
        cart.add(1, "Café 500g", Money::from_cents(1000), 10, 1).unwrap();
        let doc = ReceiptDocument::preview(
            &cart,
            "",
            "",
            Money::zero(),
            PaymentMethod::Cash,
            "Admin",
        );

        let path = spool(&doc).unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("balcao-cupom-"));

        discard(&path);
        assert!(!path.exists());

        // Discarding again is a no-op, not a panic.
        discard(&path);
    }
}
