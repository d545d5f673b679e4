//! Layout data types for imposition
//!
//! These types represent the planner's output: the ordered slot sequence
//! and the views the compositor walks over it.

use crate::constants::{PAGES_PER_SHEET, SIDES_PER_SHEET, SLOTS_PER_SIDE};
use crate::types::{SheetSide, Slot};

/// The ordered page slots for every signature of a document.
///
/// Slot position encodes physical placement: slots come in pairs
/// (left half, right half) per sheet side, sheet sides run outer-to-inner
/// within a signature, and signatures follow each other in binding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpositionPlan {
    total_pages: usize,
    sheets_per_signature: usize,
    slots: Vec<Slot>,
}

impl ImpositionPlan {
    pub(crate) fn new(total_pages: usize, sheets_per_signature: usize, slots: Vec<Slot>) -> Self {
        Self {
            total_pages,
            sheets_per_signature,
            slots,
        }
    }

    /// All slots in generation order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of real pages the plan was built for
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn sheets_per_signature(&self) -> usize {
        self.sheets_per_signature
    }

    pub fn pages_per_signature(&self) -> usize {
        self.sheets_per_signature.saturating_mul(PAGES_PER_SHEET)
    }

    pub fn signature_count(&self) -> usize {
        match self.pages_per_signature() {
            0 => 0,
            pps => self.slots.len() / pps,
        }
    }

    /// Number of output sheet sides (imposed pages) the plan produces
    pub fn sheet_side_count(&self) -> usize {
        self.slots.len() / SLOTS_PER_SIDE
    }

    /// Filler slots that carry no source page
    pub fn blank_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Slots grouped per signature
    pub fn signatures(&self) -> impl Iterator<Item = &[Slot]> {
        self.slots.chunks(self.pages_per_signature().max(1))
    }

    /// Slots grouped per printed sheet side, annotated with their position
    pub fn sheet_sides(&self) -> impl Iterator<Item = SheetSideSlots> + '_ {
        let sides_per_signature = self.sheets_per_signature.saturating_mul(SIDES_PER_SHEET);
        self.slots
            .chunks_exact(SLOTS_PER_SIDE)
            .enumerate()
            .map(move |(idx, pair)| {
                let side_index = idx % sides_per_signature;
                SheetSideSlots {
                    signature: idx / sides_per_signature,
                    sheet: side_index / SIDES_PER_SHEET,
                    side: if side_index % 2 == 0 {
                        SheetSide::Front
                    } else {
                        SheetSide::Back
                    },
                    left: pair[0],
                    right: pair[1],
                }
            })
    }
}

/// One face of one folded sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSideSlots {
    /// Signature this sheet belongs to
    pub signature: usize,
    /// Sheet within the signature (0 = outermost)
    pub sheet: usize,
    pub side: SheetSide,
    /// Page on the left half of the face
    pub left: Slot,
    /// Page on the right half of the face
    pub right: Slot,
}

impl SheetSideSlots {
    pub fn is_blank(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Left then right
    pub fn halves(&self) -> [Slot; SLOTS_PER_SIDE] {
        [self.left, self.right]
    }
}
