//! Document extraction pipeline.
//!
//! Turns a loaded UBL document into an [`Extraction`]: the flat
//! [`InvoiceRecord`](crate::core::InvoiceRecord) plus the per-line warnings
//! collected along the way. Scalar fields come first, then the line items,
//! with the toll plaza and plate number picked up from the first item whose
//! description matches.

mod fields;
mod items;
pub mod toll;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::{ExtractError, Extraction, Result};
use crate::ubl::{self, Document};

pub use fields::DEFAULT_CURRENCY;

/// Extraction entry point. Holds the few knobs extraction has; construct
/// with [`Extractor::new`] and chain setters.
///
/// ```
/// use factus::Extractor;
///
/// let extractor = Extractor::new().lenient_totals(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    lenient_totals: bool,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tolerate documents without a payable amount, substituting `"0"`.
    /// The default is strict: a missing total is a data error.
    pub fn lenient_totals(mut self, lenient: bool) -> Self {
        self.lenient_totals = lenient;
        self
    }

    /// Load and extract a document from XML text.
    pub fn extract_str(&self, xml: &str) -> Result<Extraction> {
        let document = ubl::load_str(xml)?;
        self.extract_document(&document)
    }

    /// Load and extract a document from a file on disk.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Extraction> {
        let document = ubl::load_file(path)?;
        self.extract_document(&document)
    }

    /// Extract an already loaded document.
    pub fn extract_document(&self, document: &Document) -> Result<Extraction> {
        let root = document.root();
        let mut record = fields::extract_scalars(root, self.lenient_totals)?;
        let mut warnings = Vec::new();
        items::extract_items(root, &mut record, &mut warnings);
        info!(
            "extracted {} {} with {} items",
            record.document_type,
            record.document_id,
            record.items.len()
        );
        Ok(Extraction { record, warnings })
    }
}

/// A file the batch driver could not extract, with the error that stopped it.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ExtractError,
}

/// What a batch run produced: extractions in input order, and the files that
/// failed. The two sides always account for every input path.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub documents: Vec<(PathBuf, Extraction)>,
    pub failures: Vec<FileFailure>,
}

/// Extract every file in `paths`, skipping failures instead of aborting.
/// Each failure is logged with its path and kept in the outcome.
pub fn extract_batch<P: AsRef<Path>>(paths: &[P], extractor: &Extractor) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for path in paths {
        let path = path.as_ref();
        match extractor.extract_file(path) {
            Ok(extraction) => outcome.documents.push((path.to_path_buf(), extraction)),
            Err(error) => {
                warn!("skipping {}: {}", path.display(), error);
                outcome.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }
    outcome
}
