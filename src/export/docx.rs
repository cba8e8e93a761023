// SPDX-License-Identifier: MPL-2.0
//! Minimal WordprocessingML (`.docx`) writer.
//!
//! The package holds only the parts Word and LibreOffice need to open the
//! file: content types, package and document relationships, the main
//! document, the embedded pictures and the two property parts.
//!
//! Output is deterministic: entries are written in a fixed order with a fixed
//! zip timestamp, and `word/document.xml` depends only on the catalogue
//! document. The creation time in `docProps/core.xml` is the sole exception.

use super::document::{CatalogueDocument, EmbeddedImage, LotSection, PictureFormat};
use super::CancelToken;
use crate::error::ExportError;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Output sink for a document writer.
pub trait WriteSeek: Write + Seek {}

impl<T: Write + Seek> WriteSeek for T {}

/// Serialises a [`CatalogueDocument`] to a concrete file format.
pub trait DocumentWriter: Send + Sync {
    /// File extension of the produced format, without the dot.
    fn extension(&self) -> &'static str;

    /// Writes `document` to `out`.
    ///
    /// # Errors
    ///
    /// I/O failures, or [`ExportError::Cancelled`] once `cancel` fires.
    fn write(
        &self,
        document: &CatalogueDocument,
        out: &mut dyn WriteSeek,
        cancel: &CancelToken,
    ) -> Result<(), ExportError>;
}

mod ns {
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
    pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
    pub const PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    pub const CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
    pub const CORE: &str =
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
    pub const EXTENDED: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";
}

mod rel_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
}

/// Title run size in half-points (14 pt).
const TITLE_HALF_POINTS: &str = "28";
/// Details run size in half-points (12 pt).
const DETAILS_HALF_POINTS: &str = "24";

const APPLICATION_NAME: &str = "Auction Lots";

/// Writes `.docx` packages.
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    created: Option<DateTime<Utc>>,
}

impl DocxWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the creation time recorded in `docProps/core.xml`.
    #[must_use]
    pub fn with_created(created: DateTime<Utc>) -> Self {
        Self {
            created: Some(created),
        }
    }
}

impl DocumentWriter for DocxWriter {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn write(
        &self,
        document: &CatalogueDocument,
        out: &mut dyn WriteSeek,
        cancel: &CancelToken,
    ) -> Result<(), ExportError> {
        let media = MediaTable::new(document);
        let created = self.created.unwrap_or_else(Utc::now);

        let xml_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        let media_options = xml_options.compression_method(CompressionMethod::Stored);

        let mut zip = ZipWriter::new(out);

        zip.start_file("[Content_Types].xml", xml_options)?;
        zip.write_all(&content_types(&media)?)?;
        zip.start_file("_rels/.rels", xml_options)?;
        zip.write_all(&package_relationships()?)?;
        zip.start_file("docProps/core.xml", xml_options)?;
        zip.write_all(&core_properties(created)?)?;
        zip.start_file("docProps/app.xml", xml_options)?;
        zip.write_all(&app_properties()?)?;
        zip.start_file("word/document.xml", xml_options)?;
        zip.write_all(&document_xml(document, &media, cancel)?)?;
        zip.start_file("word/_rels/document.xml.rels", xml_options)?;
        zip.write_all(&document_relationships(&media)?)?;

        for (entry, image) in media.entries.iter().zip(document.images()) {
            cancel.check()?;
            zip.start_file(format!("word/{}", entry.target), media_options)?;
            zip.write_all(&image.bytes)?;
        }

        zip.finish()?;
        Ok(())
    }
}

/// Relationship id and part name of every embedded picture, in document
/// order.
struct MediaTable {
    entries: Vec<MediaEntry>,
}

struct MediaEntry {
    rel_id: String,
    target: String,
    format: PictureFormat,
}

impl MediaTable {
    fn new(document: &CatalogueDocument) -> Self {
        let entries = document
            .images()
            .enumerate()
            .map(|(i, image)| MediaEntry {
                rel_id: format!("rId{}", i + 1),
                target: format!("media/image{}.{}", i + 1, image.format.extension()),
                format: image.format,
            })
            .collect();
        Self { entries }
    }

    fn has(&self, format: PictureFormat) -> bool {
        self.entries.iter().any(|e| e.format == format)
    }
}

fn xml_error(err: impl Display) -> ExportError {
    ExportError::Io(format!("XML serialisation failed: {err}"))
}

/// Thin event writer over an in-memory buffer.
struct Xml {
    writer: Writer<Vec<u8>>,
}

impl Xml {
    fn new() -> Result<Self, ExportError> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_error)?;
        Ok(Self { writer })
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::Start(
                BytesStart::new(name).with_attributes(attrs.iter().copied()),
            ))
            .map_err(xml_error)
    }

    fn close(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::Empty(
                BytesStart::new(name).with_attributes(attrs.iter().copied()),
            ))
            .map_err(xml_error)
    }

    fn text(&mut self, text: &str) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)
    }

    /// `<name>text</name>`
    fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), ExportError> {
        self.open(name, attrs)?;
        self.text(text)?;
        self.close(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn content_types(media: &MediaTable) -> Result<Vec<u8>, ExportError> {
    let mut xml = Xml::new()?;
    xml.open("Types", &[("xmlns", ns::CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for format in [PictureFormat::Jpeg, PictureFormat::Png] {
        if media.has(format) {
            xml.empty(
                "Default",
                &[
                    ("Extension", format.extension()),
                    ("ContentType", format.content_type()),
                ],
            )?;
        }
    }
    xml.empty(
        "Override",
        &[
            ("PartName", "/word/document.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            ),
        ],
    )?;
    xml.empty(
        "Override",
        &[
            ("PartName", "/docProps/core.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.core-properties+xml",
            ),
        ],
    )?;
    xml.empty(
        "Override",
        &[
            ("PartName", "/docProps/app.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.extended-properties+xml",
            ),
        ],
    )?;
    xml.close("Types")?;
    Ok(xml.finish())
}

fn package_relationships() -> Result<Vec<u8>, ExportError> {
    let mut xml = Xml::new()?;
    xml.open("Relationships", &[("xmlns", ns::PKG_RELS)])?;
    for (id, kind, target) in [
        ("rId1", rel_type::OFFICE_DOCUMENT, "word/document.xml"),
        ("rId2", rel_type::CORE_PROPERTIES, "docProps/core.xml"),
        ("rId3", rel_type::EXTENDED_PROPERTIES, "docProps/app.xml"),
    ] {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    xml.close("Relationships")?;
    Ok(xml.finish())
}

fn document_relationships(media: &MediaTable) -> Result<Vec<u8>, ExportError> {
    let mut xml = Xml::new()?;
    xml.open("Relationships", &[("xmlns", ns::PKG_RELS)])?;
    for entry in &media.entries {
        xml.empty(
            "Relationship",
            &[
                ("Id", entry.rel_id.as_str()),
                ("Type", rel_type::IMAGE),
                ("Target", entry.target.as_str()),
            ],
        )?;
    }
    xml.close("Relationships")?;
    Ok(xml.finish())
}

fn core_properties(created: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
    let stamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut xml = Xml::new()?;
    xml.open(
        "cp:coreProperties",
        &[
            ("xmlns:cp", ns::CORE),
            ("xmlns:dc", ns::DC),
            ("xmlns:dcterms", ns::DCTERMS),
            ("xmlns:xsi", ns::XSI),
        ],
    )?;
    xml.leaf("dc:title", &[], "Auction Lots")?;
    xml.leaf("dc:creator", &[], APPLICATION_NAME)?;
    xml.leaf("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    xml.leaf("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    xml.close("cp:coreProperties")?;
    Ok(xml.finish())
}

fn app_properties() -> Result<Vec<u8>, ExportError> {
    let mut xml = Xml::new()?;
    xml.open("Properties", &[("xmlns", ns::EXTENDED)])?;
    xml.leaf("Application", &[], APPLICATION_NAME)?;
    xml.close("Properties")?;
    Ok(xml.finish())
}

fn document_xml(
    document: &CatalogueDocument,
    media: &MediaTable,
    cancel: &CancelToken,
) -> Result<Vec<u8>, ExportError> {
    let mut xml = Xml::new()?;
    xml.open(
        "w:document",
        &[
            ("xmlns:w", ns::W),
            ("xmlns:r", ns::R),
            ("xmlns:wp", ns::WP),
            ("xmlns:a", ns::A),
            ("xmlns:pic", ns::PIC),
        ],
    )?;
    xml.open("w:body", &[])?;

    let mut entries = media.entries.iter();
    let mut picture_id = 0_usize;
    for section in &document.sections {
        cancel.check()?;
        write_title(&mut xml, &section.title)?;
        write_table(&mut xml, section, &mut entries, &mut picture_id)?;
    }

    // Word wants a paragraph between the last table and the section
    // properties.
    xml.empty("w:p", &[])?;
    xml.open("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", "11906"), ("w:h", "16838")])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", "1440"),
            ("w:right", "1440"),
            ("w:bottom", "1440"),
            ("w:left", "1440"),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.close("w:sectPr")?;

    xml.close("w:body")?;
    xml.close("w:document")?;
    Ok(xml.finish())
}

fn write_title(xml: &mut Xml, title: &str) -> Result<(), ExportError> {
    xml.open("w:p", &[])?;
    xml.open("w:r", &[])?;
    xml.open("w:rPr", &[])?;
    xml.empty("w:b", &[])?;
    xml.empty("w:sz", &[("w:val", TITLE_HALF_POINTS)])?;
    xml.close("w:rPr")?;
    xml.leaf("w:t", &[], title)?;
    xml.close("w:r")?;
    xml.close("w:p")
}

fn write_table<'a>(
    xml: &mut Xml,
    section: &LotSection,
    entries: &mut impl Iterator<Item = &'a MediaEntry>,
    picture_id: &mut usize,
) -> Result<(), ExportError> {
    xml.open("w:tbl", &[])?;
    xml.open("w:tblPr", &[])?;
    xml.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
    xml.open("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            edge,
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", "auto"),
            ],
        )?;
    }
    xml.close("w:tblBorders")?;
    xml.close("w:tblPr")?;
    xml.open("w:tblGrid", &[])?;
    xml.empty("w:gridCol", &[("w:w", "4513")])?;
    xml.empty("w:gridCol", &[("w:w", "4513")])?;
    xml.close("w:tblGrid")?;

    xml.open("w:tr", &[])?;

    open_cell(xml)?;
    for image in &section.images {
        let entry = entries
            .next()
            .ok_or_else(|| ExportError::Io("picture table out of step".to_string()))?;
        *picture_id += 1;
        write_picture(xml, image, entry, *picture_id)?;
    }
    if section.images.is_empty() {
        xml.empty("w:p", &[])?;
    }
    xml.close("w:tc")?;

    open_cell(xml)?;
    write_details(xml, &section.details)?;
    xml.close("w:tc")?;

    xml.close("w:tr")?;
    xml.close("w:tbl")
}

fn open_cell(xml: &mut Xml) -> Result<(), ExportError> {
    xml.open("w:tc", &[])?;
    xml.open("w:tcPr", &[])?;
    xml.empty("w:tcW", &[("w:w", "2500"), ("w:type", "pct")])?;
    xml.close("w:tcPr")
}

fn write_picture(
    xml: &mut Xml,
    image: &EmbeddedImage,
    entry: &MediaEntry,
    id: usize,
) -> Result<(), ExportError> {
    let id = id.to_string();
    let extent = image.extent_emu.to_string();
    let picture_name = format!("Picture {id}");

    xml.open("w:p", &[])?;
    xml.open("w:pPr", &[])?;
    xml.empty("w:jc", &[("w:val", "center")])?;
    xml.close("w:pPr")?;
    xml.open("w:r", &[])?;
    xml.open("w:drawing", &[])?;
    xml.open(
        "wp:inline",
        &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
    )?;
    xml.empty("wp:extent", &[("cx", extent.as_str()), ("cy", extent.as_str())])?;
    xml.empty(
        "wp:docPr",
        &[
            ("id", id.as_str()),
            ("name", picture_name.as_str()),
            ("descr", image.name.as_str()),
        ],
    )?;
    xml.open("a:graphic", &[])?;
    xml.open("a:graphicData", &[("uri", ns::PIC)])?;
    xml.open("pic:pic", &[])?;

    xml.open("pic:nvPicPr", &[])?;
    xml.empty("pic:cNvPr", &[("id", id.as_str()), ("name", image.name.as_str())])?;
    xml.empty("pic:cNvPicPr", &[])?;
    xml.close("pic:nvPicPr")?;

    xml.open("pic:blipFill", &[])?;
    xml.empty("a:blip", &[("r:embed", entry.rel_id.as_str())])?;
    xml.open("a:stretch", &[])?;
    xml.empty("a:fillRect", &[])?;
    xml.close("a:stretch")?;
    xml.close("pic:blipFill")?;

    xml.open("pic:spPr", &[])?;
    xml.open("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", extent.as_str()), ("cy", extent.as_str())])?;
    xml.close("a:xfrm")?;
    xml.open("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.close("a:prstGeom")?;
    xml.close("pic:spPr")?;

    xml.close("pic:pic")?;
    xml.close("a:graphicData")?;
    xml.close("a:graphic")?;
    xml.close("wp:inline")?;
    xml.close("w:drawing")?;
    xml.close("w:r")?;
    xml.close("w:p")
}

/// One paragraph; line breaks in `details` become `w:br`.
fn write_details(xml: &mut Xml, details: &str) -> Result<(), ExportError> {
    xml.open("w:p", &[])?;
    xml.open("w:r", &[])?;
    xml.open("w:rPr", &[])?;
    xml.empty("w:sz", &[("w:val", DETAILS_HALF_POINTS)])?;
    xml.close("w:rPr")?;
    for (i, line) in details.split('\n').enumerate() {
        if i > 0 {
            xml.empty("w:br", &[])?;
        }
        xml.leaf("w:t", &[("xml:space", "preserve")], line)?;
    }
    xml.close("w:r")?;
    xml.close("w:p")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::{DETAILS_TEXT, EMU_PER_POINT};
    use crate::lots::LotNumber;
    use chrono::TimeZone;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn image(name: &str, format: PictureFormat) -> EmbeddedImage {
        EmbeddedImage {
            name: name.to_string(),
            format,
            bytes: vec![1, 2, 3, 4],
            extent_emu: 150 * EMU_PER_POINT,
        }
    }

    fn section(lot: u64, images: Vec<EmbeddedImage>) -> LotSection {
        let lot = LotNumber::new(lot).expect("non-zero");
        LotSection {
            lot,
            title: format!("Lot {lot}"),
            images,
            details: DETAILS_TEXT.to_string(),
        }
    }

    fn sample() -> CatalogueDocument {
        CatalogueDocument {
            sections: vec![
                section(
                    1,
                    vec![
                        image("x.jpg", PictureFormat::Jpeg),
                        image("y.png", PictureFormat::Png),
                    ],
                ),
                section(2, vec![image("z.jpg", PictureFormat::Jpeg)]),
            ],
        }
    }

    fn write(document: &CatalogueDocument, writer: &DocxWriter) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        writer
            .write(document, &mut buffer, &CancelToken::new())
            .expect("write should succeed");
        buffer.into_inner()
    }

    fn entry(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
        let mut file = archive.by_name(name).expect("entry present");
        let mut content = String::new();
        file.read_to_string(&mut content).expect("utf-8 entry");
        content
    }

    #[test]
    fn package_contains_expected_parts() {
        let bytes = write(&sample(), &DocxWriter::new());
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).expect("valid zip");
        let names: Vec<_> = archive.file_names().collect();
        assert_eq!(archive.len(), 9);
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/media/image1.jpeg",
            "word/media/image2.png",
            "word/media/image3.jpeg",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn titles_are_bold_fourteen_point() {
        let bytes = write(&sample(), &DocxWriter::new());
        let body = entry(&bytes, "word/document.xml");
        assert!(body.contains(
            "<w:p><w:r><w:rPr><w:b/><w:sz w:val=\"28\"/></w:rPr><w:t>Lot 1</w:t></w:r></w:p>"
        ));
        let lot1 = body.find("Lot 1").expect("lot 1 title");
        let lot2 = body.find("Lot 2").expect("lot 2 title");
        assert!(lot1 < lot2);
    }

    #[test]
    fn details_are_split_on_line_breaks() {
        let bytes = write(&sample(), &DocxWriter::new());
        let body = entry(&bytes, "word/document.xml");
        assert!(body.contains(
            "<w:t xml:space=\"preserve\">Reserve price:</w:t><w:br/><w:t xml:space=\"preserve\">Estimation:</w:t>"
        ));
        assert!(body.contains("<w:sz w:val=\"24\"/>"));
    }

    #[test]
    fn pictures_reference_their_relationships() {
        let bytes = write(&sample(), &DocxWriter::new());
        let body = entry(&bytes, "word/document.xml");
        let rels = entry(&bytes, "word/_rels/document.xml.rels");
        for id in ["rId1", "rId2", "rId3"] {
            assert!(body.contains(&format!("r:embed=\"{id}\"")));
            assert!(rels.contains(&format!("Id=\"{id}\"")));
        }
        assert!(rels.contains("Target=\"media/image2.png\""));
        assert!(body.contains(&format!("cx=\"{}\"", 150 * EMU_PER_POINT)));
    }

    #[test]
    fn content_types_declare_only_used_picture_formats() {
        let document = CatalogueDocument {
            sections: vec![section(1, vec![image("a.png", PictureFormat::Png)])],
        };
        let bytes = write(&document, &DocxWriter::new());
        let types = entry(&bytes, "[Content_Types].xml");
        assert!(types.contains("Extension=\"png\""));
        assert!(!types.contains("Extension=\"jpeg\""));
    }

    #[test]
    fn output_is_byte_identical_for_a_pinned_timestamp() {
        let created = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid date");
        let writer = DocxWriter::with_created(created);
        assert_eq!(write(&sample(), &writer), write(&sample(), &writer));

        let core = entry(&write(&sample(), &writer), "docProps/core.xml");
        assert!(core.contains("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn cancelled_write_fails() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut buffer = Cursor::new(Vec::new());
        let err = DocxWriter::new()
            .write(&sample(), &mut buffer, &cancel)
            .expect_err("cancelled");
        assert_eq!(err, ExportError::Cancelled);
    }
}
