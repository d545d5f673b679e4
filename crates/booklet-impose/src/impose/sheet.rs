//! Sheet side rendering for imposition

use crate::layout::SheetSideSlots;
use crate::render::{ObjectCache, PageBox, create_page_xobject, get_page_box};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Size of one half of an output sheet side, and so of the output page's halves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl HalfSize {
    /// Translation of each half: left at the origin, right one page width over
    pub fn offsets(&self) -> [(f32, f32); 2] {
        [(0.0, 0.0), (self.width_pt, 0.0)]
    }

    pub fn sheet_width_pt(&self) -> f32 {
        self.width_pt * 2.0
    }
}

/// Render one sheet side to the output document.
///
/// Blank slots draw nothing; the page itself is always created.
pub(crate) fn render_sheet_side(
    output: &mut Document,
    source: &Document,
    source_page_ids: &[ObjectId],
    side: &SheetSideSlots,
    half: HalfSize,
    parent_pages_id: ObjectId,
    cache: &mut ObjectCache,
) -> Result<ObjectId> {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(half.sheet_width_pt()),
            Object::Real(half.height_pt),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (idx, (slot, (dx, dy))) in side.halves().into_iter().zip(half.offsets()).enumerate() {
        let Some(source_idx) = slot else {
            continue;
        };
        let Some(&source_page_id) = source_page_ids.get(source_idx) else {
            continue;
        };

        let xobject_name = format!("P{}", idx);
        let xobject_id = create_page_xobject(output, source, source_page_id, cache)?;
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

        let page_box = get_page_box(source, source_page_id)?;
        content_ops.push(place_command(&xobject_name, &page_box, dx, dy));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Draw an XObject translated so its MediaBox origin lands at `(dx, dy)`
fn place_command(name: &str, page_box: &PageBox, dx: f32, dy: f32) -> String {
    format!(
        "q 1 0 0 1 {} {} cm /{} Do Q\n",
        dx - page_box.x,
        dy - page_box.y,
        name
    )
}
