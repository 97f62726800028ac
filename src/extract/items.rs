//! Line item collection, plus the toll capture that rides along with it.

use rust_decimal::Decimal;
use tracing::warn;

use crate::core::{InvoiceRecord, ItemWarning, LineItem, decimal};
use crate::ubl::XmlElement;

use super::toll;

/// Collect every billing line of the document into the record. The first
/// line whose description reads like a toll charge also contributes the
/// plaza name and plate number; later matches are ignored.
pub(crate) fn extract_items(
    root: &XmlElement,
    record: &mut InvoiceRecord,
    warnings: &mut Vec<ItemWarning>,
) {
    let line_name = record.document_type.line_element();
    for (index, line) in root.find_all(line_name).into_iter().enumerate() {
        let description = match line
            .find_at(&["Item", "Description"])
            .and_then(XmlElement::nonblank_text)
        {
            Some(text) => text.to_string(),
            None => {
                note(warnings, index, "item has no description");
                String::new()
            }
        };

        // Invoices say InvoicedQuantity, credit notes CreditedQuantity; some
        // emitters mix them up, so both spellings are accepted everywhere.
        let quantity = match line
            .find_text("InvoicedQuantity")
            .or_else(|| line.find_text("CreditedQuantity"))
        {
            Some(raw) => decimal::parse(raw).unwrap_or_else(|| {
                note(warnings, index, format!("unreadable quantity '{raw}', assuming 1"));
                Decimal::ONE
            }),
            None => Decimal::ONE,
        };

        let price = match line
            .find_at(&["Price", "PriceAmount"])
            .and_then(XmlElement::nonblank_text)
        {
            Some(raw) => decimal::parse(raw).unwrap_or_else(|| {
                note(warnings, index, format!("unreadable price '{raw}', assuming 0"));
                Decimal::ZERO
            }),
            None => Decimal::ZERO,
        };

        let reference = line
            .find_at(&["Item", "SellersItemIdentification", "ID"])
            .and_then(XmlElement::nonblank_text)
            .map(str::to_string);

        if record.toll_name.is_none() && !description.is_empty() {
            if let Some(matched) = toll::match_description(&description) {
                record.toll_name = Some(matched.toll_name);
                record.plate_number = Some(matched.plate_number);
            }
        }

        record.items.push(LineItem {
            description,
            quantity: decimal::render_collapsed(quantity),
            price: decimal::render(price),
            reference,
            line_total: decimal::render(quantity * price),
        });
    }
}

fn note(warnings: &mut Vec<ItemWarning>, line: usize, message: impl Into<String>) {
    let warning = ItemWarning::new(line, message);
    warn!("{}", warning);
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DocumentType;

    fn invoice_with_lines(lines: &str) -> String {
        format!(
            "<Invoice>\
               <ID>FAC001-1</ID>\
               <IssueDate>2025-05-13</IssueDate>\
               <LegalMonetaryTotal><PayableAmount>0</PayableAmount></LegalMonetaryTotal>\
               {lines}\
             </Invoice>"
        )
    }

    fn extract(xml: &str) -> (InvoiceRecord, Vec<ItemWarning>) {
        let root = crate::ubl::parse(xml).unwrap();
        let mut record = super::super::fields::extract_scalars(&root, false).unwrap();
        let mut warnings = Vec::new();
        extract_items(&root, &mut record, &mut warnings);
        (record, warnings)
    }

    #[test]
    fn collects_cleaned_quantities_prices_and_totals() {
        let xml = invoice_with_lines(
            "<InvoiceLine>\
               <Item><Description>PEAJE CHUSACA GKO559 2</Description>\
                 <SellersItemIdentification><ID>TAG-88</ID></SellersItemIdentification>\
               </Item>\
               <InvoicedQuantity>2.00</InvoicedQuantity>\
               <Price><PriceAmount>12500.00</PriceAmount></Price>\
             </InvoiceLine>",
        );
        let (record, warnings) = extract(&xml);

        assert!(warnings.is_empty());
        assert_eq!(record.items.len(), 1);
        let item = &record.items[0];
        assert_eq!(item.quantity, "2");
        assert_eq!(item.price, "12500.0");
        assert_eq!(item.line_total, "25000.0");
        assert_eq!(item.reference.as_deref(), Some("TAG-88"));
    }

    #[test]
    fn accepts_credited_quantity_spelling() {
        let xml = invoice_with_lines(
            "<InvoiceLine>\
               <Item><Description>AJUSTE</Description></Item>\
               <CreditedQuantity>3</CreditedQuantity>\
               <Price><PriceAmount>100</PriceAmount></Price>\
             </InvoiceLine>",
        );
        let (record, warnings) = extract(&xml);
        assert!(warnings.is_empty());
        assert_eq!(record.items[0].quantity, "3");
        assert_eq!(record.items[0].line_total, "300.0");
    }

    #[test]
    fn defaults_missing_quantity_and_price() {
        let xml = invoice_with_lines(
            "<InvoiceLine><Item><Description>RECARGO</Description></Item></InvoiceLine>",
        );
        let (record, warnings) = extract(&xml);
        assert!(warnings.is_empty());
        assert_eq!(record.items[0].quantity, "1");
        assert_eq!(record.items[0].price, "0.0");
        assert_eq!(record.items[0].line_total, "0.0");
        assert_eq!(record.items[0].reference, None);
    }

    #[test]
    fn warns_on_unreadable_values_but_keeps_the_item() {
        let xml = invoice_with_lines(
            "<InvoiceLine>\
               <Item><Description>RECARGO</Description></Item>\
               <InvoicedQuantity>muchos</InvoicedQuantity>\
               <Price><PriceAmount>N/A</PriceAmount></Price>\
             </InvoiceLine>",
        );
        let (record, warnings) = extract(&xml);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].line, 0);
        assert!(warnings[0].message.contains("quantity"));
        assert!(warnings[1].message.contains("price"));
        assert_eq!(record.items[0].quantity, "1");
        assert_eq!(record.items[0].price, "0.0");
    }

    #[test]
    fn warns_on_missing_description_and_skips_toll_match() {
        let xml = invoice_with_lines(
            "<InvoiceLine>\
               <InvoicedQuantity>1</InvoicedQuantity>\
               <Price><PriceAmount>9800</PriceAmount></Price>\
             </InvoiceLine>",
        );
        let (record, warnings) = extract(&xml);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("description"));
        assert_eq!(record.items[0].description, "");
        assert_eq!(record.toll_name, None);
    }

    #[test]
    fn first_toll_line_wins() {
        let xml = invoice_with_lines(
            "<InvoiceLine>\
               <Item><Description>PEAJE CHUSACA GKO559 2</Description></Item>\
               <InvoicedQuantity>1</InvoicedQuantity>\
               <Price><PriceAmount>12500</PriceAmount></Price>\
             </InvoiceLine>\
             <InvoiceLine>\
               <Item><Description>PEAJE SIBERIA XYZ987 1</Description></Item>\
               <InvoicedQuantity>1</InvoicedQuantity>\
               <Price><PriceAmount>9800</PriceAmount></Price>\
             </InvoiceLine>",
        );
        let (record, _) = extract(&xml);
        assert_eq!(record.toll_name.as_deref(), Some("PEAJE CHUSACA"));
        assert_eq!(record.plate_number.as_deref(), Some("GKO559"));
        assert_eq!(record.items.len(), 2);
    }

    #[test]
    fn credit_note_lines_use_their_own_element_name() {
        let xml = "<CreditNote>\
                     <ID>NC-001-789</ID>\
                     <IssueDate>2025-05-20</IssueDate>\
                     <LegalMonetaryTotal><PayableAmount>-100</PayableAmount></LegalMonetaryTotal>\
                     <CreditNoteLine>\
                       <Item><Description>DEVOLUCION</Description></Item>\
                       <CreditedQuantity>1</CreditedQuantity>\
                       <Price><PriceAmount>-100.00</PriceAmount></Price>\
                     </CreditNoteLine>\
                   </CreditNote>";
        let (record, warnings) = extract(xml);
        assert!(warnings.is_empty());
        assert_eq!(record.document_type, DocumentType::CreditNote);
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].line_total, "-100.0");
    }
}
