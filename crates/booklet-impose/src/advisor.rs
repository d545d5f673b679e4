//! Signature size advice
//!
//! For a fixed page count, compares candidate sheets-per-signature values
//! by the number of blank filler pages each one needs.

use crate::constants::{ADVISOR_PAGES_PER_CANDIDATE, PAGES_PER_SHEET};
use crate::layout::signature_count;
use crate::types::Arrangement;
use std::collections::BTreeMap;
use std::fmt;

/// Calculate signatures and padding for one sheets-per-signature value.
///
/// Saturates instead of overflowing, so absurd sheet counts report one
/// signature and a clamped blank count rather than panicking.
pub fn blank_pages_for(total_pages: usize, sheets_per_signature: usize) -> Arrangement {
    let number_of_signatures = signature_count(total_pages, sheets_per_signature);
    let padded_count = number_of_signatures
        .saturating_mul(sheets_per_signature.saturating_mul(PAGES_PER_SHEET));

    Arrangement {
        sheets_per_signature,
        number_of_signatures,
        blank_pages: padded_count.saturating_sub(total_pages),
    }
}

/// Exclusive upper bound on enumerated candidates when the caller gives none
pub fn default_limit(total_pages: usize) -> usize {
    total_pages.div_ceil(ADVISOR_PAGES_PER_CANDIDATE)
}

/// Enumerate candidate arrangements for `1..limit` sheets per signature.
///
/// `limit` defaults to [`default_limit`]. When `chosen` falls outside the
/// enumerated range it is appended, so the caller's selection is always
/// represented.
pub fn enumerate_arrangements(
    total_pages: usize,
    limit: Option<usize>,
    chosen: Option<usize>,
) -> Vec<Arrangement> {
    let limit = limit.unwrap_or_else(|| default_limit(total_pages));

    let mut arrangements: Vec<Arrangement> = (1..limit)
        .map(|sheets| blank_pages_for(total_pages, sheets))
        .collect();

    if let Some(sheets) = chosen.filter(|&s| s > 0 && s >= limit.max(1)) {
        arrangements.push(blank_pages_for(total_pages, sheets));
    }

    log::debug!(
        "enumerated {} arrangements for {} pages (limit {})",
        arrangements.len(),
        total_pages,
        limit
    );
    arrangements
}

/// Keep the best arrangement for each distinct signature count.
///
/// Fewer blank pages wins; on an exact tie the smaller sheets-per-signature
/// wins. Results are ordered from most signatures to fewest.
pub fn best_per_signature_count(arrangements: &[Arrangement]) -> Vec<Arrangement> {
    let mut best: BTreeMap<usize, Arrangement> = BTreeMap::new();

    for candidate in arrangements {
        best.entry(candidate.number_of_signatures)
            .and_modify(|current| {
                let key = (candidate.blank_pages, candidate.sheets_per_signature);
                if key < (current.blank_pages, current.sheets_per_signature) {
                    *current = *candidate;
                }
            })
            .or_insert(*candidate);
    }

    best.into_values().rev().collect()
}

// =============================================================================
// Table
// =============================================================================

/// Arrangement comparison for display, with the caller's choice marked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangementTable {
    pub total_pages: usize,
    pub chosen: Option<usize>,
    pub rows: Vec<Arrangement>,
}

/// Build the full comparison table for a document
pub fn arrangement_table(
    total_pages: usize,
    limit: Option<usize>,
    chosen: Option<usize>,
) -> ArrangementTable {
    ArrangementTable {
        total_pages,
        chosen,
        rows: enumerate_arrangements(total_pages, limit, chosen),
    }
}

impl ArrangementTable {
    /// Reduce to one row per signature count, keeping the chosen row visible
    pub fn best_only(mut self) -> Self {
        let chosen_row = self
            .chosen
            .and_then(|s| self.rows.iter().find(|r| r.sheets_per_signature == s))
            .copied();

        let mut rows = best_per_signature_count(&self.rows);
        if let Some(row) = chosen_row {
            if !rows.contains(&row) {
                // Ties go after the kept best row for the same signature count
                let at = rows
                    .iter()
                    .position(|r| r.number_of_signatures < row.number_of_signatures)
                    .unwrap_or(rows.len());
                rows.insert(at, row);
            }
        }
        self.rows = rows;
        self
    }

    pub fn chosen_row(&self) -> Option<&Arrangement> {
        let chosen = self.chosen?;
        self.rows
            .iter()
            .find(|row| row.sheets_per_signature == chosen)
    }
}

const HEADERS: [&str; 4] = [
    "sheets_per_signature",
    "pages_per_signature",
    "number_of_signatures",
    "blank_pages",
];

impl fmt::Display for ArrangementTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Arrangements for {} pages", self.total_pages)?;
        writeln!(f, "  {}", HEADERS.join(" | "))?;

        for row in &self.rows {
            let marker = if Some(row.sheets_per_signature) == self.chosen {
                '*'
            } else {
                ' '
            };
            writeln!(
                f,
                "{} {:>w0$} | {:>w1$} | {:>w2$} | {:>w3$}",
                marker,
                row.sheets_per_signature,
                row.pages_per_signature(),
                row.number_of_signatures,
                row.blank_pages,
                w0 = HEADERS[0].len(),
                w1 = HEADERS[1].len(),
                w2 = HEADERS[2].len(),
                w3 = HEADERS[3].len(),
            )?;
        }
        Ok(())
    }
}
