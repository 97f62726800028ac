//! Sheet generation: semicolon-separated CSV text, one sheet per document
//! class. Every field is double-quoted with internal quotes doubled; rows
//! end in CRLF.

use crate::core::DocumentType;

use super::row::{RowConfig, SheetRow, headers};

/// The two generated sheets. Pure strings; persisting them is the caller's
/// business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSet {
    pub facturas: String,
    pub notas_credito: String,
}

/// Render rows into the invoice sheet and the credit-note sheet. Both carry
/// the header row even when no row routes to them.
pub fn generate_sheets(rows: &[SheetRow], config: &RowConfig) -> SheetSet {
    let header = headers(config);
    let mut facturas = String::new();
    let mut notas_credito = String::new();
    write_row(&mut facturas, header.iter().map(String::as_str));
    write_row(&mut notas_credito, header.iter().map(String::as_str));

    for row in rows {
        let out = match row.document_type {
            DocumentType::Invoice => &mut facturas,
            DocumentType::CreditNote => &mut notas_credito,
        };
        write_row(out, row.columns.iter().map(|(_, value)| value.as_str()));
    }

    SheetSet {
        facturas,
        notas_credito,
    }
}

fn write_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(';');
        }
        csv_field(out, field);
    }
    out.push_str("\r\n");
}

fn csv_field(out: &mut String, value: &str) {
    out.push('"');
    // Escape internal double quotes
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(document_type: DocumentType, id: &str) -> SheetRow {
        let record = crate::core::InvoiceRecord {
            document_type,
            document_id: id.into(),
            prefix: "FAC001".into(),
            number: "1".into(),
            issue_date: None,
            formatted_issue_date: "13/05/2025".into(),
            currency: "COP".into(),
            total_amount: "12500.0".into(),
            supplier_name: String::new(),
            supplier_tax_id: String::new(),
            customer_name: String::new(),
            customer_tax_id: String::new(),
            toll_name: None,
            plate_number: None,
            related_invoice: None,
            items: Vec::new(),
        };
        super::super::row::build_row(&record, &RowConfig::default())
    }

    #[test]
    fn routes_rows_by_document_type() {
        let rows = vec![
            row(DocumentType::Invoice, "FAC001-1"),
            row(DocumentType::CreditNote, "NC-001-9"),
            row(DocumentType::Invoice, "FAC001-2"),
        ];
        let sheets = generate_sheets(&rows, &RowConfig::default());

        assert_eq!(sheets.facturas.matches("\r\n").count(), 3);
        assert_eq!(sheets.notas_credito.matches("\r\n").count(), 2);
        assert!(sheets.facturas.contains("\"FAC001-1\""));
        assert!(sheets.facturas.contains("\"FAC001-2\""));
        assert!(sheets.notas_credito.contains("\"NC-001-9\""));
        assert!(!sheets.facturas.contains("NC-001-9"));
    }

    #[test]
    fn empty_input_still_yields_header_rows() {
        let sheets = generate_sheets(&[], &RowConfig::default());
        assert!(sheets.facturas.starts_with("\"FacturaID\";\"FacturaCabecera\""));
        assert_eq!(sheets.facturas, sheets.notas_credito);
        assert_eq!(sheets.facturas.matches("\r\n").count(), 1);
    }

    #[test]
    fn internal_quotes_are_doubled() {
        let mut out = String::new();
        csv_field(&mut out, "TRANSPORTES \"EL RAYO\"");
        assert_eq!(out, "\"TRANSPORTES \"\"EL RAYO\"\"\"");
    }
}
