//! Layout calculation modules for imposition
//!
//! This module handles the page ordering for saddle-stitched booklets:
//! - Signature slot ordering (which source page goes where)
//! - Plan views grouped by signature and by sheet side

mod signature;
mod types;

pub use signature::*;
pub use types::*;
