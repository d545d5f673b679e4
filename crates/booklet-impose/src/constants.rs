//! Shared constants for booklet imposition
//!
//! This module centralizes magic numbers used by the planner, the
//! advisor and the sheet compositor.

// =============================================================================
// Folding
// =============================================================================

/// Page positions on one folded sheet (two faces, two halves each)
pub const PAGES_PER_SHEET: usize = 4;

/// Page positions on one face of a sheet (left half, right half)
pub const SLOTS_PER_SIDE: usize = 2;

/// Printed faces per sheet
pub const SIDES_PER_SHEET: usize = 2;

/// Largest accepted sheets-per-signature value from flags or config files.
/// A saddle stitch cannot bind anything close to this many nested sheets.
pub const MAX_SHEETS_PER_SIGNATURE: usize = 1024;

// =============================================================================
// Advisor
// =============================================================================

/// Source pages per enumerated candidate when no explicit limit is given.
/// `ceil(total_pages / ADVISOR_PAGES_PER_CANDIDATE)` bounds the candidate list.
pub const ADVISOR_PAGES_PER_CANDIDATE: usize = 8;

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Output
// =============================================================================

/// Appended to the input file stem to name the imposed document
pub const OUTPUT_SUFFIX: &str = "_print";
