// SPDX-License-Identifier: MPL-2.0
use auction_lots::error::ExportError;
use auction_lots::export::{
    export_catalogue, CancelToken, DocumentLayout, DocxWriter, Exporter, DETAILS_TEXT,
};
use auction_lots::lots::{LotNumber, LotProjection};
use auction_lots::media::ImageHandle;
use chrono::DateTime;
use image_rs::{ImageFormat, Rgb, RgbImage};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use zip::ZipArchive;

/// A minimal element tree, enough to check the document layout.
#[derive(Debug, Default)]
struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn descendants_named<'a>(&'a self, name: &str, out: &mut Vec<&'a Node>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.descendants_named(name, out);
        }
    }

    /// Run text of a paragraph, with `w:br` as a newline.
    fn paragraph_text(&self) -> String {
        let mut text = String::new();
        for run in self.children_named("w:r") {
            for part in &run.children {
                match part.name.as_str() {
                    "w:t" => text.push_str(&part.text),
                    "w:br" => text.push('\n'),
                    _ => {}
                }
            }
        }
        text
    }
}

fn element(e: &quick_xml::events::BytesStart<'_>) -> Node {
    Node {
        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        attrs: e
            .attributes()
            .flatten()
            .map(|a| {
                (
                    String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                    a.unescape_value().map(|v| v.into_owned()).unwrap_or_default(),
                )
            })
            .collect(),
        ..Node::default()
    }
}

fn parse(xml: &str) -> Node {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut stack = vec![Node::default()];

    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) => stack.push(element(&e)),
            Event::Empty(e) => {
                let node = element(&e);
                stack.last_mut().expect("open element").children.push(node);
            }
            Event::Text(t) => {
                let text = t.unescape().expect("valid text");
                stack.last_mut().expect("open element").text.push_str(&text);
            }
            Event::End(_) => {
                let node = stack.pop().expect("open element");
                stack.last_mut().expect("parent element").children.push(node);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let mut root = stack.pop().expect("document root");
    root.children.pop().expect("root element")
}

fn write_jpeg(dir: &Path, name: &str) -> ImageHandle {
    let path = dir.join(name);
    RgbImage::from_pixel(8, 6, Rgb([200, 120, 40]))
        .save_with_format(&path, ImageFormat::Jpeg)
        .expect("failed to write JPEG fixture");
    ImageHandle::new(path)
}

fn lot(n: u64) -> LotNumber {
    LotNumber::new(n).expect("positive lot number")
}

/// {1: [x.jpg, y.jpg], 2: [z.jpg]}
fn two_lots(dir: &Path) -> LotProjection {
    let x = write_jpeg(dir, "x.jpg");
    let y = write_jpeg(dir, "y.jpg");
    let z = write_jpeg(dir, "z.jpg");
    LotProjection::from_assignments([(&y, lot(1)), (&x, lot(1)), (&z, lot(2))])
}

fn pinned_writer() -> DocxWriter {
    DocxWriter::with_created(DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"))
}

fn export_to(projection: &LotProjection, destination: &Path) -> Result<(), ExportError> {
    export_catalogue(
        projection,
        destination,
        &pinned_writer(),
        DocumentLayout::default(),
        &CancelToken::new(),
    )
    .map(|_| ())
}

fn read_entry(path: &Path, name: &str) -> Vec<u8> {
    let bytes = std::fs::read(path).expect("document written");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut entry = archive.by_name(name).expect("entry present");
    let mut content = Vec::new();
    entry.read_to_end(&mut content).expect("readable entry");
    content
}

#[test]
fn each_lot_gets_a_title_and_one_table() {
    let dir = tempdir().expect("failed to create temp dir");
    let destination = dir.path().join("AuctionLots.docx");
    export_to(&two_lots(dir.path()), &destination).expect("export should succeed");

    let xml = String::from_utf8(read_entry(&destination, "word/document.xml")).expect("utf-8");
    let document = parse(&xml);
    assert_eq!(document.name, "w:document");
    let body = document.child("w:body").expect("body");

    let blocks: Vec<&Node> = body
        .children
        .iter()
        .filter(|c| c.name == "w:p" || c.name == "w:tbl")
        .collect();
    let titles: Vec<String> = blocks
        .iter()
        .filter(|b| b.name == "w:p")
        .map(|p| p.paragraph_text())
        .filter(|t| !t.is_empty())
        .collect();
    assert_eq!(titles, vec!["Lot 1", "Lot 2"]);

    // Title, table, title, table, then the trailing paragraph.
    let shape: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(shape, vec!["w:p", "w:tbl", "w:p", "w:tbl", "w:p"]);

    let tables: Vec<&Node> = body.children_named("w:tbl").collect();
    assert_eq!(tables.len(), 2);
    let expected_pictures = [2, 1];
    for (table, pictures) in tables.iter().zip(expected_pictures) {
        let rows: Vec<&Node> = table.children_named("w:tr").collect();
        assert_eq!(rows.len(), 1);
        let cells: Vec<&Node> = rows[0].children_named("w:tc").collect();
        assert_eq!(cells.len(), 2);

        let picture_paragraphs: Vec<&Node> = cells[0]
            .children_named("w:p")
            .filter(|p| {
                let mut drawings = Vec::new();
                p.descendants_named("w:drawing", &mut drawings);
                !drawings.is_empty()
            })
            .collect();
        assert_eq!(picture_paragraphs.len(), pictures);
        for paragraph in picture_paragraphs {
            let jc = paragraph
                .child("w:pPr")
                .and_then(|ppr| ppr.child("w:jc"))
                .and_then(|jc| jc.attr("w:val"));
            assert_eq!(jc, Some("center"));
        }

        let details: Vec<String> = cells[1]
            .children_named("w:p")
            .map(Node::paragraph_text)
            .collect();
        assert_eq!(details, vec![DETAILS_TEXT.to_string()]);
    }
}

#[test]
fn pictures_follow_lot_and_file_order() {
    let dir = tempdir().expect("failed to create temp dir");
    let destination = dir.path().join("AuctionLots.docx");
    export_to(&two_lots(dir.path()), &destination).expect("export should succeed");

    let xml = String::from_utf8(read_entry(&destination, "word/document.xml")).expect("utf-8");
    let mut pictures = Vec::new();
    let document = parse(&xml);
    document.descendants_named("wp:docPr", &mut pictures);
    let names: Vec<&str> = pictures.iter().filter_map(|p| p.attr("descr")).collect();
    assert_eq!(names, vec!["x.jpg", "y.jpg", "z.jpg"]);
}

#[test]
fn repeated_exports_are_identical() {
    let dir = tempdir().expect("failed to create temp dir");
    let projection = two_lots(dir.path());
    let first = dir.path().join("first.docx");
    let second = dir.path().join("second.docx");

    export_to(&projection, &first).expect("first export");
    export_to(&projection, &second).expect("second export");

    assert_eq!(
        std::fs::read(&first).expect("first written"),
        std::fs::read(&second).expect("second written")
    );
}

#[test]
fn unreadable_image_leaves_no_file_behind() {
    let dir = tempdir().expect("failed to create temp dir");
    let present = write_jpeg(dir.path(), "present.jpg");
    let missing = ImageHandle::new(dir.path().join("missing.jpg"));
    let projection = LotProjection::from_assignments([(&present, lot(1)), (&missing, lot(2))]);
    let destination = dir.path().join("AuctionLots.docx");

    let err = export_to(&projection, &destination).expect_err("export should fail");

    assert!(matches!(err, ExportError::ImageRead { .. }));
    assert!(!destination.exists());
    let leftovers: Vec<PathBuf> = std::fs::read_dir(dir.path())
        .expect("readable dir")
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(true, |ext| ext != "jpg"))
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
}

#[test]
fn cancelled_export_writes_nothing() {
    let dir = tempdir().expect("failed to create temp dir");
    let projection = two_lots(dir.path());
    let destination = dir.path().join("AuctionLots.docx");
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = export_catalogue(
        &projection,
        &destination,
        &pinned_writer(),
        DocumentLayout::default(),
        &cancel,
    );

    assert_eq!(result.map(|_| ()), Err(ExportError::Cancelled));
    assert!(!destination.exists());
}

#[test]
fn existing_document_is_replaced() {
    let dir = tempdir().expect("failed to create temp dir");
    let destination = dir.path().join("AuctionLots.docx");
    std::fs::write(&destination, b"stale").expect("seed file");

    export_to(&two_lots(dir.path()), &destination).expect("export should succeed");

    let bytes = std::fs::read(&destination).expect("document written");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn only_one_export_at_a_time() {
    let exporter = Exporter::new();
    let ticket = exporter.try_begin().expect("first export starts");

    assert!(matches!(exporter.try_begin(), Err(ExportError::Busy)));

    drop(ticket);
    assert!(exporter.try_begin().is_ok());
}
