use std::io::{Cursor, Write};

use docx_model::Document;
use zip::write::SimpleFileOptions;

pub const WML_XMLNS: &str =
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

/// Build a DOCX container in memory from (entry name, XML text) pairs.
pub fn docx_bytes(parts: &[(&str, String)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();
        for (name, content) in parts {
            zip.start_file(*name, options).expect("start zip entry");
            zip.write_all(content.as_bytes()).expect("write zip entry");
        }
        zip.finish().expect("finish zip");
    }
    buffer
}

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document {WML_XMLNS}><w:body>{body}</w:body></w:document>"#
    )
}

pub fn styles_xml(styles: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:styles {WML_XMLNS}>{styles}</w:styles>"#)
}

pub fn footnotes_xml(notes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:footnotes {WML_XMLNS}>{notes}</w:footnotes>"#
    )
}

pub fn endnotes_xml(notes: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:endnotes {WML_XMLNS}>{notes}</w:endnotes>"#)
}

/// Parse a document built from a body fragment only.
pub fn parse_body(body: &str) -> Document {
    let bytes = docx_bytes(&[("word/document.xml", document_xml(body))]);
    docx_model::read_document_from_memory(&bytes)
}

/// Parse a document built from style definitions plus a body fragment.
pub fn parse_with_styles(styles: &str, body: &str) -> Document {
    let bytes = docx_bytes(&[
        ("word/styles.xml", styles_xml(styles)),
        ("word/document.xml", document_xml(body)),
    ]);
    docx_model::read_document_from_memory(&bytes)
}

/// Concatenated run text of a paragraph.
pub fn paragraph_text(doc: &Document, index: usize) -> String {
    doc.paragraphs[index]
        .runs
        .iter()
        .map(|r| r.text.as_str())
        .collect()
}
