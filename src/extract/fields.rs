//! Scalar field extraction: identity, business key, dates, money, parties.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::core::{DocumentType, ExtractError, InvoiceRecord, Result, decimal, nit};
use crate::ubl::XmlElement;

/// Currency assumed when the document does not name one.
pub const DEFAULT_CURRENCY: &str = "COP";

lazy_static! {
    // Business key: minimal leading run, maximal trailing digit run.
    static ref BUSINESS_KEY: Regex =
        Regex::new(r"^(?P<prefix>[A-Za-z0-9-]+?)(?P<number>\d+)$").unwrap();
}

/// Split a printed document ID into its prefix and trailing number.
/// `FAC001-123` splits as `("FAC001-", "123")`; the trailing hyphen is the
/// caller's to strip.
pub(crate) fn split_business_key(id: &str) -> Option<(&str, &str)> {
    BUSINESS_KEY.captures(id).and_then(|caps| {
        let prefix = caps.name("prefix")?.as_str();
        let number = caps.name("number")?.as_str();
        Some((prefix, number))
    })
}

/// Extract every scalar field of the record. Items stay empty here; the item
/// processor fills them afterwards.
pub(crate) fn extract_scalars(root: &XmlElement, lenient_totals: bool) -> Result<InvoiceRecord> {
    let document_type = DocumentType::from_root_name(root.name());

    let document_id = root
        .text_at(&["ID"])
        .ok_or_else(|| ExtractError::Data("document has no ID".into()))?
        .to_string();

    let raw_date = root.text_at(&["IssueDate"]).ok_or_else(|| {
        ExtractError::Data(format!("document {document_id} has no issue date"))
    })?;
    let (issue_date, formatted_issue_date) = parse_issue_date(raw_date);

    let (mut prefix, mut number) = match split_business_key(&document_id) {
        Some((p, n)) => (p.to_string(), n.to_string()),
        None => {
            return Err(ExtractError::Data(format!(
                "document id '{document_id}' has no numeric suffix"
            )));
        }
    };

    // Credit notes inherit the prefix of the invoice they correct.
    let mut related_invoice = None;
    if document_type == DocumentType::CreditNote {
        if let Some(related) = related_reference(root) {
            match split_business_key(related) {
                Some((related_prefix, _)) => prefix = related_prefix.to_string(),
                None => prefix = related.to_string(),
            }
            number.clear();
            related_invoice = Some(related.to_string());
        } else {
            debug!("credit note {} has no related invoice reference", document_id);
        }
    }

    if prefix.ends_with('-') {
        prefix.pop();
    }

    let currency = root
        .text_at_or(&["DocumentCurrencyCode"], DEFAULT_CURRENCY)
        .to_string();

    let total_amount = match root.text_at(&["LegalMonetaryTotal", "PayableAmount"]) {
        Some(raw) => decimal::normalize(raw, "0"),
        None if lenient_totals => {
            debug!("document {} has no payable amount, defaulting to 0", document_id);
            "0".to_string()
        }
        None => {
            return Err(ExtractError::Data(format!(
                "document {document_id} has no payable amount"
            )));
        }
    };

    let (supplier_name, supplier_tax_id) = party_identity(root, "AccountingSupplierParty", "supplier");
    let (customer_name, customer_tax_id) = party_identity(root, "AccountingCustomerParty", "customer");

    Ok(InvoiceRecord {
        document_type,
        document_id,
        prefix,
        number,
        issue_date,
        formatted_issue_date,
        currency,
        total_amount,
        supplier_name,
        supplier_tax_id,
        customer_name,
        customer_tax_id,
        toll_name: None,
        plate_number: None,
        related_invoice,
        items: Vec::new(),
    })
}

/// Ordered lookup for the invoice a credit note corrects: the UBL billing
/// reference first, the bare reference id second, any descendant named
/// `ReferenceID` last.
fn related_reference(root: &XmlElement) -> Option<&str> {
    root.text_at(&["BillingReference", "InvoiceDocumentReference", "ID"])
        .or_else(|| root.text_at(&["ReferenceID"]))
        .or_else(|| root.find_text("ReferenceID"))
}

/// `YYYY-MM-DD` in, `DD/MM/YYYY` out. Anything else keeps the raw text as
/// the formatted value and leaves the parsed date unset.
fn parse_issue_date(raw: &str) -> (Option<NaiveDate>, String) {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => (Some(date), date.format("%d/%m/%Y").to_string()),
        Err(_) => (None, raw.to_string()),
    }
}

/// Name and tax id under a party container. Both default to empty; a present
/// tax id that fails its NIT check digit is worth a warning but never an
/// error.
fn party_identity(root: &XmlElement, container: &str, role: &str) -> (String, String) {
    let party = root.find(container).and_then(|c| c.find("Party"));
    let name = party
        .and_then(|p| p.find_text("RegistrationName"))
        .unwrap_or_default()
        .to_string();
    let tax_id = party
        .and_then(|p| p.find_text("CompanyID"))
        .unwrap_or_default()
        .to_string();
    if !tax_id.is_empty() && !nit::is_valid(&tax_id) {
        warn!("{} tax id '{}' fails its NIT check digit", role, tax_id);
    }
    (name, tax_id)
}
