//! Signature slot calculation
//!
//! This module calculates how pages are ordered within saddle-stitched
//! signatures: sheets are printed double-sided, folded once, nested inside
//! each other and the signatures are gathered in order.
//!
//! ## Layouts
//!
//! **1 sheet per signature (4 pages):**
//! - Side A: [4, 1] (left=4, right=1)
//! - Side B: [2, 3] (left=2, right=3)
//!
//! **2 sheets per signature (8 pages):**
//! - Sheet 1 Side A: [8, 1], Side B: [2, 7]
//! - Sheet 2 Side A: [6, 3], Side B: [4, 5]
//!
//! Sides are visited from the outermost sheet towards the centre fold.

use crate::constants::{PAGES_PER_SHEET, SIDES_PER_SHEET, SLOTS_PER_SIDE};
use crate::types::Slot;

use super::ImpositionPlan;

// =============================================================================
// Plan
// =============================================================================

/// Build the imposition plan for a document.
///
/// The plan holds `signature_count * pages_per_signature` slots. Every page
/// in `0..total_pages` appears exactly once; the remaining slots are blank.
/// `total_pages == 0` yields an empty plan.
pub fn plan(total_pages: usize, sheets_per_signature: usize) -> ImpositionPlan {
    debug_assert!(sheets_per_signature > 0, "sheets_per_signature must be positive");

    let num_signatures = signature_count(total_pages, sheets_per_signature);
    let slots = (0..num_signatures)
        .flat_map(|sig_idx| signature_slots(sig_idx, sheets_per_signature, total_pages))
        .collect();

    ImpositionPlan::new(total_pages, sheets_per_signature, slots)
}

/// Number of signatures needed to hold `total_pages`
pub fn signature_count(total_pages: usize, sheets_per_signature: usize) -> usize {
    let pages_per_sig = sheets_per_signature.saturating_mul(PAGES_PER_SHEET);
    if pages_per_sig == 0 {
        return 0;
    }
    total_pages.div_ceil(pages_per_sig)
}

// =============================================================================
// Page Ordering
// =============================================================================

/// Calculate the slots of one signature, all sheet sides in order.
pub fn signature_slots(
    signature_index: usize,
    sheets_per_signature: usize,
    total_pages: usize,
) -> Vec<Slot> {
    let pages_per_sig = sheets_per_signature.saturating_mul(PAGES_PER_SHEET);
    let base_index = signature_index.saturating_mul(pages_per_sig);

    (0..sheets_per_signature.saturating_mul(SIDES_PER_SHEET))
        .flat_map(|side_index| {
            sheet_side_slots(base_index, side_index, sheets_per_signature, total_pages)
        })
        .collect()
}

/// Calculate the `[left, right]` slots of one sheet side.
///
/// Side `side_index` pairs the page `side_index` places from the front of
/// the signature with the page `side_index` places from the back. Odd sides
/// are the reverse face of a sheet, so the pair is mirrored there.
/// Pages at or beyond `total_pages` become blank slots.
pub fn sheet_side_slots(
    base_index: usize,
    side_index: usize,
    sheets_per_signature: usize,
    total_pages: usize,
) -> [Slot; SLOTS_PER_SIDE] {
    let from_back = sheets_per_signature
        .saturating_mul(PAGES_PER_SHEET)
        .saturating_sub(side_index + 1);
    let from_front = side_index;

    let (left, right) = if side_index % 2 == 0 {
        (base_index.saturating_add(from_back), base_index + from_front)
    } else {
        (base_index + from_front, base_index.saturating_add(from_back))
    };

    [
        real_page(left, total_pages),
        real_page(right, total_pages),
    ]
}

/// Map a padded page index to a slot, blank past the end of the document
fn real_page(index: usize, total_pages: usize) -> Slot {
    (index < total_pages).then_some(index)
}

// =============================================================================
// Tests
// =============================================================================
