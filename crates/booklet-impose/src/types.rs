use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Invalid input document: {0}")]
    InvalidInput(lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Zero-based index of a page in the source document
pub type PageIndex = usize;

/// One half of a sheet side: a source page, or `None` for a blank filler page
pub type Slot = Option<PageIndex>;

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// One candidate signature size and the padding it costs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrangement {
    /// Folded sheets nested into each signature
    pub sheets_per_signature: usize,
    /// Signatures needed to hold every source page
    pub number_of_signatures: usize,
    /// Filler pages added to complete the last signature
    pub blank_pages: usize,
}

impl Arrangement {
    pub fn pages_per_signature(&self) -> usize {
        self.sheets_per_signature.saturating_mul(crate::constants::PAGES_PER_SHEET)
    }

    /// Total page positions across all signatures (source pages + blanks)
    pub fn padded_pages(&self) -> usize {
        self.number_of_signatures.saturating_mul(self.pages_per_signature())
    }

    /// Printed sheet sides (imposed output pages) this arrangement produces
    pub fn sheet_side_count(&self) -> usize {
        self.padded_pages() / crate::constants::SLOTS_PER_SIDE
    }
}
