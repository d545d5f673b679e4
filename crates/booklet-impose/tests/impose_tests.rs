use booklet_impose::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::PathBuf;

fn media_box(width: i64, height: i64) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width),
        Object::Integer(height),
    ])
}

/// Build a document whose page `i` carries the content marker `% page i`.
/// With `inherit_box` the MediaBox lives on the Pages node only.
fn create_test_pdf_sized(
    num_pages: usize,
    width: i64,
    height: i64,
    inherit_box: bool,
) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content = format!("% page {}\nq Q", i).into_bytes();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]);
        if !inherit_box {
            page.set("MediaBox", media_box(width, height));
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    if inherit_box {
        pages_dict.set("MediaBox", media_box(width, height));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn create_test_pdf(num_pages: usize) -> Document {
    create_test_pdf_sized(num_pages, 612, 792, false)
}

fn test_options() -> BookletOptions {
    BookletOptions {
        input_file: PathBuf::from("test.pdf"),
        ..Default::default()
    }
}

/// Source page index drawn by the named XObject on an output page, if any
fn placed_page(doc: &Document, page_id: ObjectId, name: &[u8]) -> Option<usize> {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let xobject_id = xobjects.get(name).ok()?.as_reference().unwrap();
    let stream = doc.get_object(xobject_id).unwrap().as_stream().unwrap();
    let text = String::from_utf8_lossy(&stream.content).into_owned();
    let marker = text.lines().next()?.strip_prefix("% page ")?;
    marker.trim().parse().ok()
}

fn placed_pages(doc: &Document) -> Vec<Slot> {
    doc.get_pages()
        .values()
        .flat_map(|&id| [placed_page(doc, id, b"P0"), placed_page(doc, id, b"P1")])
        .collect()
}

fn page_width_height(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let page = doc.get_dictionary(page_id).unwrap();
    let mb = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let number = |obj: &Object| match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        _ => panic!("MediaBox entry is not a number"),
    };
    (number(&mb[2]), number(&mb[3]))
}

#[tokio::test]
async fn test_load_pdf() {
    use tempfile::NamedTempFile;

    let mut doc = create_test_pdf(5);
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path();

    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();

    let loaded = load_pdf(path).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 5);
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_pdf(dir.path().join("missing.pdf")).await;
    match result {
        Err(ImposeError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        _ => panic!("Expected Io error"),
    }
}

#[tokio::test]
async fn test_load_corrupt_stream() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), b"this is not a pdf").unwrap();

    let result = load_pdf(temp.path()).await;
    match result {
        Err(ImposeError::InvalidInput(_)) => {}
        _ => panic!("Expected InvalidInput error"),
    }
}

#[tokio::test]
async fn test_save_pdf() {
    use tempfile::NamedTempFile;

    let doc = create_test_pdf(2);
    let temp = NamedTempFile::new().unwrap();

    save_pdf(doc, temp.path()).await.unwrap();

    assert!(temp.path().exists());
    let loaded = Document::load(temp.path()).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
}

#[tokio::test]
async fn test_impose_no_pages() {
    let doc = create_test_pdf(0);

    let result = impose(&doc, &test_options()).await;
    match result {
        Err(ImposeError::NoPages) => {}
        _ => panic!("Expected NoPages error"),
    }
}

#[tokio::test]
async fn test_impose_validation_fails() {
    let doc = create_test_pdf(5);
    let options = BookletOptions::default(); // No input file

    let result = impose(&doc, &options).await;
    match result {
        Err(ImposeError::Config(_)) => {}
        _ => panic!("Expected Config error"),
    }
}

#[tokio::test]
async fn test_impose_two_sheet_signature() {
    let doc = create_test_pdf(8);
    let mut options = test_options();
    options.sheets_per_signature = 2;

    let output = impose(&doc, &options).await.unwrap();

    // 1 signature of 2 sheets = 4 sheet sides
    assert_eq!(output.get_pages().len(), 4);
    assert_eq!(
        placed_pages(&output),
        vec![
            Some(7),
            Some(0),
            Some(1),
            Some(6),
            Some(5),
            Some(2),
            Some(3),
            Some(4),
        ]
    );
}

#[tokio::test]
async fn test_impose_blank_slots_still_emit_pages() {
    let doc = create_test_pdf(5);

    let output = impose(&doc, &test_options()).await.unwrap();

    // 5 pages at 1 sheet per signature: 2 signatures, 4 sheet sides, 3 blanks
    assert_eq!(output.get_pages().len(), 4);
    assert_eq!(
        placed_pages(&output),
        vec![
            Some(3),
            Some(0),
            Some(1),
            Some(2),
            None,
            Some(4),
            None,
            None,
        ]
    );

    // The last sheet side is entirely blank but keeps the sheet size
    let last = *output.get_pages().values().last().unwrap();
    assert_eq!(page_width_height(&output, last), (1224.0, 792.0));
}

#[tokio::test]
async fn test_impose_right_half_translated_by_page_width() {
    let doc = create_test_pdf(4);

    let output = impose(&doc, &test_options()).await.unwrap();
    let first = *output.get_pages().values().next().unwrap();
    let content = output.get_page_content(first).unwrap();
    let text = String::from_utf8_lossy(&content);

    assert!(text.contains("q 1 0 0 1 0 0 cm /P0 Do Q"));
    assert!(text.contains("q 1 0 0 1 612 0 cm /P1 Do Q"));
}

#[tokio::test]
async fn test_impose_uses_inherited_media_box() {
    let doc = create_test_pdf_sized(4, 300, 400, true);

    let output = impose(&doc, &test_options()).await.unwrap();
    for &id in output.get_pages().values() {
        assert_eq!(page_width_height(&output, id), (600.0, 400.0));
    }
}

/// Apply `encode` to every page's content stream
fn with_encoded_contents(mut doc: Document, encode: impl Fn(&mut Stream)) -> Document {
    let content_ids: Vec<ObjectId> = doc
        .get_pages()
        .values()
        .map(|&id| {
            doc.get_dictionary(id)
                .unwrap()
                .get(b"Contents")
                .unwrap()
                .as_reference()
                .unwrap()
        })
        .collect();
    for id in content_ids {
        if let Ok(Object::Stream(stream)) = doc.get_object_mut(id) {
            encode(stream);
        }
    }
    doc
}

#[tokio::test]
async fn test_impose_decodes_flate_content() {
    let doc = with_encoded_contents(create_test_pdf(4), |stream| {
        let marker = String::from_utf8(stream.content.clone()).unwrap();
        stream.set_content(format!("{}\n{}", marker, "q Q\n".repeat(64)).into_bytes());
        stream.compress().unwrap();
        assert!(stream.dict.has(b"Filter"));
    });

    let output = impose(&doc, &test_options()).await.unwrap();
    assert_eq!(placed_pages(&output), vec![Some(3), Some(0), Some(1), Some(2)]);
}

#[tokio::test]
async fn test_impose_rejects_undecodable_content() {
    let doc = with_encoded_contents(create_test_pdf(4), |stream| {
        stream.dict.set("Filter", Object::Name(b"JBIG2Decode".to_vec()));
    });

    let result = impose(&doc, &test_options()).await;
    match result {
        Err(ImposeError::Pdf(_)) => {}
        _ => panic!("Expected Pdf error"),
    }
}

#[test]
fn test_compose_rejects_mismatched_plan() {
    let doc = create_test_pdf(4);
    let result = compose_booklet(&doc, &plan(6, 1));
    match result {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("6")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_compose_page_count_matches_plan() {
    for sheets in 1..=4 {
        let doc = create_test_pdf(13);
        let plan = plan(13, sheets);
        let output = compose_booklet(&doc, &plan).unwrap();
        assert_eq!(output.get_pages().len(), plan.len() / 2);
    }
}

#[test]
fn test_page_size_reads_first_page() {
    let doc = create_test_pdf_sized(2, 420, 595, false);
    let half = page_size(&doc).unwrap();
    assert_eq!(half.width_pt, 420.0);
    assert_eq!(half.height_pt, 595.0);
    assert_eq!(half.sheet_width_pt(), 840.0);
}

#[tokio::test]
async fn test_impose_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("booklet_print.pdf");

    let doc = create_test_pdf(10);
    let mut options = test_options();
    options.sheets_per_signature = 2;

    let imposed = impose(&doc, &options).await.unwrap();
    save_pdf(imposed, &output_path).await.unwrap();

    let reloaded = load_pdf(&output_path).await.unwrap();
    // 10 pages at 8 per signature: 16 slots, 8 sheet sides
    assert_eq!(reloaded.get_pages().len(), 8);
}
