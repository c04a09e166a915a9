mod styles;

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use memmap2::Mmap;

use crate::error::Error;
use crate::model::{Document, Note, Paragraph, Run, StyleDef};

use styles::{
    StyleResolver, overlay_character, parse_styles, read_paragraph_props, read_run_props,
};

pub(super) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

const STYLES_PART: &str = "word/styles.xml";
const DOCUMENT_PART: &str = "word/document.xml";
const FOOTNOTES_PART: &str = "word/footnotes.xml";
const ENDNOTES_PART: &str = "word/endnotes.xml";

pub(super) fn twips_to_pts(twips: f32) -> f32 {
    twips / 20.0
}

pub(super) fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

pub(super) fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

/// Parse a WML boolean toggle element (e.g., w:b, w:i, w:strike).
/// Present with no val or val != "0"/"false" means true.
pub(super) fn wml_bool(parent: roxmltree::Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| {
        n.attribute((WML_NS, "val"))
            .is_none_or(|v| v != "0" && v != "false")
    })
}

pub(super) fn twips_attr(node: roxmltree::Node, attr: &str) -> Option<f32> {
    node.attribute((WML_NS, attr))
        .and_then(|v| v.parse::<f32>().ok())
        .map(twips_to_pts)
}

fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

fn read_zip_text<R: Read + Seek>(zip: &mut zip::ZipArchive<R>, name: &str) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Parse a DOCX container at a filesystem path.
pub fn parse(path: &Path) -> Result<Document, Error> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    let data = unsafe { Mmap::map(&file) }.map_err(Error::Io)?;
    parse_bytes(&data)
}

/// Parse a DOCX container held in memory.
pub fn parse_bytes(bytes: &[u8]) -> Result<Document, Error> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;
    Ok(parse_archive(&mut zip))
}

/// Assemble the document from an opened archive. Every part is optional;
/// anything missing or unparsable degrades to absent data.
fn parse_archive<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> Document {
    let styles_xml = read_zip_text(zip, STYLES_PART);
    let document_xml = read_zip_text(zip, DOCUMENT_PART);
    let footnotes_xml = read_zip_text(zip, FOOTNOTES_PART);
    let endnotes_xml = read_zip_text(zip, ENDNOTES_PART);

    let styles = parse_styles(styles_xml.as_deref());
    let mut resolver = StyleResolver::new(&styles);

    let footnotes = parse_notes(footnotes_xml.as_deref(), "footnote", &mut resolver);
    let endnotes = parse_notes(endnotes_xml.as_deref(), "endnote", &mut resolver);

    let mut paragraphs = Vec::new();
    if let Some(text) = document_xml.as_deref()
        && let Ok(xml) = roxmltree::Document::parse(text)
        && let Some(body) = wml(xml.root_element(), "body")
    {
        for node in body.children().filter(|n| is_wml(*n, "p")) {
            paragraphs.push(parse_paragraph(node, &mut resolver));
        }
    }

    log::debug!(
        "parsed {} paragraphs, {} styles, {} footnotes, {} endnotes",
        paragraphs.len(),
        styles.len(),
        footnotes.len(),
        endnotes.len(),
    );

    Document {
        paragraphs,
        styles,
        footnotes,
        endnotes,
    }
}

/// Convert one `w:p` element into a Paragraph: seed from the resolved
/// paragraph style, overlay direct `w:pPr` formatting, then read and
/// coalesce the runs.
fn parse_paragraph(node: roxmltree::Node, resolver: &mut StyleResolver) -> Paragraph {
    let ppr = wml(node, "pPr");
    let style_id = ppr
        .and_then(|ppr| wml_attr(ppr, "pStyle"))
        .filter(|id| !id.is_empty())
        .unwrap_or("Normal");

    let mut effective = resolver.resolve(style_id);
    if let Some(ppr) = ppr {
        read_paragraph_props(ppr, &mut effective);
    }

    let runs: Vec<Run> = node
        .children()
        .filter(|n| is_wml(*n, "r"))
        .map(|r| parse_run(r, style_id, resolver))
        .collect();

    Paragraph {
        style_id: style_id.to_string(),
        level: effective.level,
        numbered: effective.numbered,
        number_format: effective.number_format,
        number_style: effective.number_style,
        line_spacing: effective.line_spacing,
        space_before: effective.space_before,
        space_after: effective.space_after,
        space_between_same_style: effective.space_between_same_style,
        justification: effective.justification,
        right_to_left: effective.right_to_left,
        indent_left: effective.indent_left,
        indent_right: effective.indent_right,
        indent_first_line: effective.indent_first_line,
        tabs: effective.tabs,
        runs: coalesce_runs(runs),
    }
}

fn parse_run(node: roxmltree::Node, para_style_id: &str, resolver: &mut StyleResolver) -> Run {
    if let Some(reference) = note_reference_run(node) {
        return reference;
    }

    let rpr = wml(node, "rPr");
    let style_id = rpr
        .and_then(|rpr| wml_attr(rpr, "rStyle"))
        .filter(|id| !id.is_empty())
        .unwrap_or(para_style_id);

    let mut effective = resolver.resolve(style_id);
    let mut lang = String::new();
    if let Some(rpr) = rpr {
        // Direct formatting goes through the same sticky/non-empty overlay
        // as inheritance: inline flags add to the style's, an inline
        // "auto" color cannot clear an inherited one.
        let mut direct = StyleDef::default();
        read_run_props(rpr, &mut direct);
        overlay_character(&mut effective, &direct);
        if let Some(val) = wml_attr(rpr, "lang") {
            lang = val.to_string();
        }
    }

    Run {
        text: run_text(node),
        lang,
        style_id: style_id.to_string(),
        note_id: 0,
        bold: effective.bold,
        italic: effective.italic,
        underline: effective.underline,
        strike: effective.strike,
        subscript: effective.subscript,
        superscript: effective.superscript,
        color: effective.color,
        back_color: effective.back_color,
        font_family: effective.font_family,
        font_size: effective.font_size,
    }
}

/// A run holding a `w:footnoteReference`/`w:endnoteReference` becomes a
/// marker run carrying the note id; no other properties are extracted.
fn note_reference_run(run_node: roxmltree::Node) -> Option<Run> {
    let marker = wml(run_node, "footnoteReference")
        .or_else(|| wml(run_node, "endnoteReference"))?;
    let id = marker
        .attribute((WML_NS, "id"))
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|id| *id > 0)?;
    Some(Run {
        text: marker.text().unwrap_or("").to_string(),
        note_id: id,
        ..Run::default()
    })
}

fn run_text(run_node: roxmltree::Node) -> String {
    let Some(t) = wml(run_node, "t") else {
        return String::new();
    };
    let raw = t.text().unwrap_or("");
    if t.attribute((XML_NS, "space")) == Some("preserve") {
        raw.to_string()
    } else {
        raw.trim_matches(' ').to_string()
    }
}

/// Merge adjacent runs whose style fingerprints are equal, concatenating
/// their text. Note-reference runs always stay separate.
fn coalesce_runs(runs: Vec<Run>) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(last) if last.same_style(&run) => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    merged
}

/// Parse `word/footnotes.xml` or `word/endnotes.xml`; `entry_name` is
/// "footnote" or "endnote". Separator pseudo-notes are skipped.
fn parse_notes(
    xml_text: Option<&str>,
    entry_name: &str,
    resolver: &mut StyleResolver,
) -> HashMap<i32, Note> {
    let mut notes = HashMap::new();
    let Some(text) = xml_text else {
        return notes;
    };
    let Ok(xml) = roxmltree::Document::parse(text) else {
        return notes;
    };

    for node in xml.root_element().children() {
        if !is_wml(node, entry_name) {
            continue;
        }
        if matches!(
            node.attribute((WML_NS, "type")),
            Some("separator") | Some("continuationSeparator")
        ) {
            continue;
        }
        let Some(id) = node
            .attribute((WML_NS, "id"))
            .and_then(|v| v.parse::<i32>().ok())
        else {
            continue;
        };

        let paragraphs = node
            .children()
            .filter(|n| is_wml(*n, "p"))
            .map(|p| parse_paragraph(p, resolver))
            .collect();
        notes.insert(id, Note { id, paragraphs });
    }

    notes
}
