use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::ItemWarning;

/// Document kind, derived from the effective root element's local name.
///
/// Gates which line-item collection is iterated and whether the credit-note
/// cross-reference override applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// `Invoice` root — DIAN UBL factura electrónica.
    Invoice,
    /// `CreditNote` root — DIAN UBL nota crédito.
    CreditNote,
}

impl DocumentType {
    /// Stable tag used in rows and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "INVOICE",
            Self::CreditNote => "CREDIT_NOTE",
        }
    }

    /// Classify from a root element's local name. `CreditNote` maps to
    /// [`DocumentType::CreditNote`]; everything else is an invoice.
    pub fn from_root_name(name: &str) -> Self {
        match name {
            "CreditNote" => Self::CreditNote,
            _ => Self::Invoice,
        }
    }

    /// Local name of the line-item elements for this kind
    /// (`cac:InvoiceLine` / `cac:CreditNoteLine`).
    pub fn line_element(&self) -> &'static str {
        match self {
            Self::Invoice => "InvoiceLine",
            Self::CreditNote => "CreditNoteLine",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted toll document — the core output entity.
///
/// Created once per XML file, fully populated in a single pass, then handed
/// to the row builder. Amount-like fields are normalized decimal strings
/// (see [`crate::core::decimal`]); they keep the exact rendering the sheet
/// contract expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice or credit note.
    pub document_type: DocumentType,
    /// `cbc:ID` — raw business ID as printed on the document, e.g. `FAC001-123`.
    pub document_id: String,
    /// Leading segment of the business key. For credit notes with a resolvable
    /// reference this is the *related* invoice's prefix.
    pub prefix: String,
    /// Trailing digit run of the business key. Cleared for credit notes once
    /// the prefix is overridden by the related invoice.
    pub number: String,
    /// `cbc:IssueDate` parsed as `YYYY-MM-DD`; `None` when the raw text did
    /// not parse (the raw text then survives in `formatted_issue_date`).
    pub issue_date: Option<NaiveDate>,
    /// Issue date rendered `DD/MM/YYYY`, or the raw text verbatim when
    /// unparsable.
    pub formatted_issue_date: String,
    /// `cbc:DocumentCurrencyCode`, defaulted to `COP` when absent.
    pub currency: String,
    /// `cac:LegalMonetaryTotal/cbc:PayableAmount`, normalized.
    pub total_amount: String,
    /// `cbc:RegistrationName` under the supplier party; empty when absent.
    pub supplier_name: String,
    /// `cbc:CompanyID` under the supplier party; empty when absent.
    pub supplier_tax_id: String,
    /// `cbc:RegistrationName` under the customer party; empty when absent.
    pub customer_name: String,
    /// `cbc:CompanyID` under the customer party; empty when absent.
    pub customer_tax_id: String,
    /// Plaza name from the first line item whose description matched,
    /// label-prefixed (`PEAJE …`). Never overwritten once set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_name: Option<String>,
    /// Vehicle plate from the same first-matching line item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    /// Credit notes only: the corrected invoice's full ID, verbatim from the
    /// reference element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_invoice: Option<String>,
    /// Line items in document order.
    pub items: Vec<LineItem>,
}

/// One line of an invoice or credit note. Owned by its record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// `cbc:Description` under the line's item; empty when absent.
    pub description: String,
    /// `cbc:InvoicedQuantity` / `cbc:CreditedQuantity`, integer-collapse
    /// normalized, default `1`.
    pub quantity: String,
    /// `cbc:PriceAmount`, normalized, default `0.0`.
    pub price: String,
    /// `cac:SellersItemIdentification/cbc:ID` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// quantity × price, exact decimal arithmetic, non-collapse rendering.
    pub line_total: String,
}

/// Result of extracting one document: the record plus every per-line warning
/// collected along the way. Warnings are informational; the record is
/// complete with defaults wherever a warning was recorded.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub record: InvoiceRecord,
    pub warnings: Vec<ItemWarning>,
}
