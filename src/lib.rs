//! # factus
//!
//! Colombian electronic toll-invoice extraction. Unwraps DIAN
//! `AttachedDocument` envelopes, classifies the UBL document inside as
//! invoice or credit note, and flattens it into a spreadsheet-ready record
//! with the toll plaza and vehicle plate parsed out of the line items.
//!
//! All monetary values go through [`rust_decimal::Decimal`] before they are
//! rendered back to strings.
//!
//! ## Quick Start
//!
//! ```rust
//! use factus::{Extractor, RowConfig, build_row, generate_sheets};
//!
//! let xml = r#"<Invoice>
//!   <ID>FAC001-123</ID>
//!   <IssueDate>2025-05-13</IssueDate>
//!   <LegalMonetaryTotal><PayableAmount>1250000.00</PayableAmount></LegalMonetaryTotal>
//! </Invoice>"#;
//!
//! let extraction = Extractor::new().extract_str(xml).unwrap();
//! assert_eq!(extraction.record.prefix, "FAC001");
//! assert_eq!(extraction.record.number, "123");
//! assert_eq!(extraction.record.total_amount, "1250000.0");
//! assert_eq!(extraction.record.formatted_issue_date, "13/05/2025");
//!
//! let config = RowConfig::default();
//! let row = build_row(&extraction.record, &config);
//! let sheets = generate_sheets(&[row], &config);
//! assert!(sheets.facturas.contains("\"FAC001-123\""));
//! ```

pub mod core;
pub mod extract;
pub mod sheet;
pub mod ubl;

// Re-export the common surface at crate root for convenience
pub use crate::core::*;
pub use crate::extract::{BatchOutcome, Extractor, FileFailure, extract_batch};
pub use crate::sheet::{RowConfig, SheetRow, SheetSet, build_row, generate_sheets};
pub use crate::ubl::{Document, load_file, load_str};
