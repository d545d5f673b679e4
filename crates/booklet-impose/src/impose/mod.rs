//! Booklet imposition - placing source pages onto double-wide sheets
//!
//! This module orchestrates the imposition process:
//! 1. Plan the slot order for the source page count
//! 2. Size the output sheets from the first source page
//! 3. Render each pair of slots onto one output page

mod io;
mod sheet;

pub use io::{load_pdf, save_pdf};
pub use sheet::HalfSize;

use crate::layout::{ImpositionPlan, plan};
use crate::options::BookletOptions;
use crate::render::{ObjectCache, get_page_dimensions};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use sheet::render_sheet_side;

/// Main imposition function
pub async fn impose(source: &Document, options: &BookletOptions) -> Result<Document> {
    options.validate()?;

    let source = source.clone();
    let sheets_per_signature = options.sheets_per_signature;

    tokio::task::spawn_blocking(move || {
        let total_pages = source.get_pages().len();
        if total_pages == 0 {
            return Err(ImposeError::NoPages);
        }
        compose_booklet(&source, &plan(total_pages, sheets_per_signature))
    })
    .await?
}

/// Page size of the first source page, used for every half of the output
pub fn page_size(source: &Document) -> Result<HalfSize> {
    let first = source
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or(ImposeError::NoPages)?;
    let (width_pt, height_pt) = get_page_dimensions(source, first)?;
    Ok(HalfSize {
        width_pt,
        height_pt,
    })
}

/// Build the imposed document for a plan.
///
/// Produces one output page per pair of slots, in plan order.
pub fn compose_booklet(source: &Document, plan: &ImpositionPlan) -> Result<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    if page_ids.is_empty() {
        return Err(ImposeError::NoPages);
    }
    if plan.total_pages() != page_ids.len() {
        return Err(ImposeError::Config(format!(
            "Plan covers {} pages but the document has {}",
            plan.total_pages(),
            page_ids.len()
        )));
    }

    let half = page_size(source)?;
    log::debug!(
        "composing {} sheet sides ({} signatures, {} blanks) at {}x{} pt",
        plan.sheet_side_count(),
        plan.signature_count(),
        plan.blank_count(),
        half.sheet_width_pt(),
        half.height_pt
    );

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut cache = ObjectCache::new();
    let mut page_refs = Vec::with_capacity(plan.sheet_side_count());

    for side in plan.sheet_sides() {
        let page_id = render_sheet_side(
            &mut output,
            source,
            &page_ids,
            &side,
            half,
            pages_tree_id,
            &mut cache,
        )?;
        page_refs.push(Object::Reference(page_id));
    }

    finalize_document(&mut output, pages_tree_id, page_refs);
    Ok(output)
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
