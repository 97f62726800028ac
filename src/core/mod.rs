//! Core record types, errors, decimal normalization, and NIT validation.
//!
//! Everything downstream of extraction consumes these types; nothing here
//! touches XML or the filesystem.

pub mod decimal;
mod error;
pub mod nit;
mod types;

pub use error::*;
pub use types::*;
