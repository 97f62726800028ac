//! Spreadsheet output: flat named-column rows and the generated CSV sheets.
//!
//! [`build_row`] maps one extracted record onto its row; [`generate_sheets`]
//! splits a batch of rows into the invoice sheet and the credit-note sheet.
//! Fixed business columns (company codes, payment terms, warehouse codes)
//! come from [`RowConfig`] and pass through uninterpreted.

mod csv;
mod row;

pub use csv::{SheetSet, generate_sheets};
pub use row::{FixedColumn, LOGICAL_COLUMNS, RowConfig, SheetRow, build_row, headers};
