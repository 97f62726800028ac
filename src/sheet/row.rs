//! Row building: one flat named-column row per extracted document.

use serde::{Deserialize, Serialize};

use crate::core::{DocumentType, ExtractError, InvoiceRecord, Result};

/// Column names every row starts with, in output order.
pub const LOGICAL_COLUMNS: [&str; 9] = [
    "FacturaID",
    "FacturaCabecera",
    "FacturaNumero",
    "FechaEmision",
    "ValorTotal",
    "NombrePeaje",
    "NumeroPlaca",
    "InvoiceType",
    "FacturaRelacionada",
];

/// A deployment-fixed column appended after the logical ones: company codes,
/// counterparty codes, payment terms, warehouse codes, void flags. The value
/// is opaque and passes through uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedColumn {
    pub header: String,
    pub value: String,
}

/// Sheet layout configuration: which fixed columns follow the logical ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowConfig {
    #[serde(default)]
    pub fixed: Vec<FixedColumn>,
}

impl RowConfig {
    /// Load the configuration from its JSON template.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| ExtractError::Config(format!("row configuration: {e}")))
    }
}

/// One spreadsheet row: ordered `(header, value)` pairs plus the document
/// type the caller routes sheets on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub document_type: DocumentType,
    pub columns: Vec<(String, String)>,
}

/// Header row for the given configuration: logical columns, then fixed ones.
pub fn headers(config: &RowConfig) -> Vec<String> {
    LOGICAL_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .chain(config.fixed.iter().map(|c| c.header.clone()))
        .collect()
}

/// Map a record onto its row. Pure transformation: absent optional fields
/// become empty cells, fixed columns pass through untouched.
pub fn build_row(record: &InvoiceRecord, config: &RowConfig) -> SheetRow {
    let values = [
        record.document_id.clone(),
        record.prefix.clone(),
        record.number.clone(),
        record.formatted_issue_date.clone(),
        record.total_amount.clone(),
        record.toll_name.clone().unwrap_or_default(),
        record.plate_number.clone().unwrap_or_default(),
        record.document_type.as_str().to_string(),
        record.related_invoice.clone().unwrap_or_default(),
    ];
    let mut columns: Vec<(String, String)> = LOGICAL_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .zip(values)
        .collect();
    for fixed in &config.fixed {
        columns.push((fixed.header.clone(), fixed.value.clone()));
    }
    SheetRow {
        document_type: record.document_type,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice_record() -> InvoiceRecord {
        InvoiceRecord {
            document_type: DocumentType::Invoice,
            document_id: "FAC001-123".into(),
            prefix: "FAC001".into(),
            number: "123".into(),
            issue_date: chrono::NaiveDate::from_ymd_opt(2025, 5, 13),
            formatted_issue_date: "13/05/2025".into(),
            currency: "COP".into(),
            total_amount: "1250000.0".into(),
            supplier_name: "CONCESION VIAL S.A.S.".into(),
            supplier_tax_id: "800197268-4".into(),
            customer_name: "TRANSPORTES ANDINOS LTDA".into(),
            customer_tax_id: "890903938-8".into(),
            toll_name: Some("PEAJE CHUSACA".into()),
            plate_number: Some("GKO559".into()),
            related_invoice: None,
            items: Vec::new(),
        }
    }

    #[test]
    fn logical_columns_in_contract_order() {
        let row = build_row(&invoice_record(), &RowConfig::default());
        let headers: Vec<&str> = row.columns.iter().map(|(h, _)| h.as_str()).collect();
        assert_eq!(headers, LOGICAL_COLUMNS);
        assert_eq!(row.columns[0].1, "FAC001-123");
        assert_eq!(row.columns[1].1, "FAC001");
        assert_eq!(row.columns[2].1, "123");
        assert_eq!(row.columns[3].1, "13/05/2025");
        assert_eq!(row.columns[4].1, "1250000.0");
        assert_eq!(row.columns[7].1, "INVOICE");
    }

    #[test]
    fn absent_optionals_become_empty_cells() {
        let mut record = invoice_record();
        record.toll_name = None;
        record.plate_number = None;
        let row = build_row(&record, &RowConfig::default());
        assert_eq!(row.columns[5].1, "");
        assert_eq!(row.columns[6].1, "");
        assert_eq!(row.columns[8].1, "");
    }

    #[test]
    fn fixed_columns_append_in_configuration_order() {
        let config = RowConfig {
            fixed: vec![
                FixedColumn {
                    header: "Empresa".into(),
                    value: "01".into(),
                },
                FixedColumn {
                    header: "Bodega".into(),
                    value: "PRINCIPAL".into(),
                },
            ],
        };
        let row = build_row(&invoice_record(), &config);
        assert_eq!(row.columns.len(), LOGICAL_COLUMNS.len() + 2);
        assert_eq!(row.columns[9], ("Empresa".to_string(), "01".to_string()));
        assert_eq!(row.columns[10], ("Bodega".to_string(), "PRINCIPAL".to_string()));
        assert_eq!(headers(&config).last().map(String::as_str), Some("Bodega"));
    }

    #[test]
    fn config_loads_from_json() {
        let config = RowConfig::from_json(
            r#"{"fixed": [{"header": "FormaPago", "value": "CONTADO"}]}"#,
        )
        .unwrap();
        assert_eq!(config.fixed.len(), 1);
        assert_eq!(config.fixed[0].header, "FormaPago");

        let err = RowConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }
}
