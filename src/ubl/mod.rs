//! UBL document loading: element tree, carrier-envelope unwrapping.
//!
//! # Example
//!
//! ```
//! use factus::ubl;
//!
//! let doc = ubl::load_str("<Invoice><ID>FAC001-123</ID></Invoice>").unwrap();
//! assert_eq!(doc.root().name(), "Invoice");
//! assert!(!doc.is_embedded());
//! ```

pub mod dom;
mod loader;

pub use dom::{XmlElement, parse};
pub use loader::{Document, load_file, load_str};

/// UBL 2.1 namespace URIs carried by DIAN documents.
pub mod ubl_ns {
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    pub const CREDIT_NOTE: &str = "urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2";
    pub const ATTACHED_DOCUMENT: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:AttachedDocument-2";
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
}
