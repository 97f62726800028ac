//! Document loading and carrier-envelope unwrapping.
//!
//! DIAN delivers toll invoices two ways: as a bare UBL `Invoice`/`CreditNote`,
//! or wrapped in an `AttachedDocument` whose attachment description carries
//! the real document as escaped text (sometimes with a literal `<![CDATA[`
//! marker around it). Loading resolves either form to the effective
//! invoice/credit-note root.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::{ExtractError, Result};
use crate::ubl::dom::{self, XmlElement};

/// Relative path, under any descendant `Attachment`, of the text node
/// carrying an embedded document.
const EMBEDDED_CONTENT_PATH: [&str; 3] = ["Attachment", "ExternalReference", "Description"];

/// Literal CDATA markers some senders leave inside the escaped payload.
const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// A loaded document, positioned at the effective invoice/credit-note root.
///
/// When the source was a carrier envelope, the envelope itself is discarded
/// after unwrapping; only the embedded document survives.
#[derive(Debug, Clone)]
pub struct Document {
    root: XmlElement,
    is_embedded: bool,
}

impl Document {
    /// Effective root element (`Invoice` or `CreditNote` in well-formed
    /// sources).
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Whether the root came out of a carrier envelope.
    pub fn is_embedded(&self) -> bool {
        self.is_embedded
    }
}

/// Load a document from an XML string, unwrapping a carrier envelope when
/// present.
pub fn load_str(xml: &str) -> Result<Document> {
    let root = dom::parse(xml)?;

    if matches!(root.name(), "Invoice" | "CreditNote") {
        debug!("direct {} document, no unwrapping", root.name());
        return Ok(Document {
            root,
            is_embedded: false,
        });
    }

    // Carrier envelope (AttachedDocument or similar): the real document is
    // escaped text under Attachment/ExternalReference/Description.
    let embedded_text = root
        .find_at(&EMBEDDED_CONTENT_PATH)
        .and_then(XmlElement::nonblank_text)
        .ok_or_else(|| {
            ExtractError::Format(format!(
                "no embedded content in '{}' envelope",
                root.name()
            ))
        })?;

    let payload = strip_cdata_marker(embedded_text);
    let embedded_root = dom::parse(payload)
        .map_err(|e| ExtractError::Format(format!("embedded document failed to parse: {e}")))?;

    debug!(
        "unwrapped embedded {} from {} envelope",
        embedded_root.name(),
        root.name()
    );
    Ok(Document {
        root: embedded_root,
        is_embedded: true,
    })
}

/// Load a document from a file path.
pub fn load_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&xml)
}

/// Strip a literal `<![CDATA[ ... ]]>` wrapper if the payload carries one.
/// Content before the marker is discarded; a missing closer keeps the rest
/// of the text.
fn strip_cdata_marker(text: &str) -> &str {
    match text.split_once(CDATA_OPEN) {
        Some((_, after)) => match after.split_once(CDATA_CLOSE) {
            Some((inner, _)) => inner,
            None => after,
        },
        None => text,
    }
}
