//! Saddle-stitch booklet imposition.
//!
//! [`plan`] orders source pages into signatures, [`enumerate_arrangements`]
//! compares signature sizes, and [`impose`] renders a plan onto double-wide
//! sheets with `lopdf`.

pub mod advisor;
pub mod constants;
pub mod impose;
pub mod layout;
mod options;
pub mod render;
mod types;

pub use advisor::{
    ArrangementTable, arrangement_table, best_per_signature_count, blank_pages_for,
    default_limit, enumerate_arrangements,
};
pub use impose::{HalfSize, compose_booklet, impose, load_pdf, page_size, save_pdf};
pub use layout::{
    ImpositionPlan, SheetSideSlots, plan, sheet_side_slots, signature_count, signature_slots,
};
pub use options::*;
pub use types::*;
