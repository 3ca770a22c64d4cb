//! # balcao-receipt: Receipt Rendering for Balcão POS
//!
//! Turns a [`ReceiptDocument`](balcao_core::receipt::ReceiptDocument) into
//! operator-facing output.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Rendering Pipeline                          │
//! │                                                                         │
//! │  balcao-core::ReceiptDocument                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 balcao-receipt (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐       ┌───────────┐       ┌───────────┐        │   │
//! │  │   │  layout   │──────►│    pdf    │──────►│   spool   │        │   │
//! │  │   │ 40-column │       │   lopdf   │       │ temp file │        │   │
//! │  │   │   lines   │       │  writer   │       │ hand-off  │        │   │
//! │  │   └───────────┘       └───────────┘       └───────────┘        │   │
//! │  │        │                    │                   │               │   │
//! │  └────────┼────────────────────┼───────────────────┼───────────────┘   │
//! │           ▼                    ▼                   ▼                   │
//! │    screen preview         exported PDF      OS print dialog            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One rendering path: the preview, the exported PDF and the printed cupom
//! all come from the same [`layout::lines`] output.

use thiserror::Error;

pub mod layout;
pub mod pdf;
pub mod spool;

pub use pdf::write_pdf;
pub use spool::{discard, spool};

/// Receipt export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem error while writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF assembly or serialization failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
