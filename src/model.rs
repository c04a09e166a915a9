use std::collections::HashMap;

/// RGBA color parsed from a WML hex attribute.
///
/// The all-default value `(0, 0, 0, 255)` doubles as the "unset" sentinel
/// during style merging, so an explicit opaque black in a document is
/// indistinguishable from an absent color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Parse a 6-digit (RGB) or 8-digit (RGBA) hex string. Anything else,
    /// including `"auto"`, yields the default color.
    pub fn from_hex(val: &str) -> Color {
        fn octet(hex: &str, i: usize) -> Option<u8> {
            u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()
        }
        fn parse(val: &str) -> Option<Color> {
            let a = match val.len() {
                6 => 255,
                8 => octet(val, 6)?,
                _ => return None,
            };
            Some(Color {
                r: octet(val, 0)?,
                g: octet(val, 2)?,
                b: octet(val, 4)?,
                a,
            })
        }
        parse(val).unwrap_or_default()
    }

    /// Whether this color is the "unset" sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Color::default()
    }
}

impl Default for Color {
    fn default() -> Self {
        Color {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabAlignment {
    #[default]
    Left,
    Center,
    Right,
    Decimal,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabStop {
    /// Position in points.
    pub position: f32,
    pub alignment: TabAlignment,
    /// Leader name from `w:leader` (e.g. `"dot"`); empty when none.
    pub leader: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StyleKind {
    Paragraph,
    #[default]
    Run,
}

/// One entry of `styles.xml`, raw or resolved.
///
/// Fields use sentinel "unset" values (false, empty string, zero, default
/// [`Color`], [`Justification::Left`]) so the same type serves both the raw
/// style map and the output of the inheritance merge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleDef {
    pub kind: StyleKind,
    /// Parent style id; empty when the style is a root.
    pub based_on: String,

    // Character properties.
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub color: Color,
    pub back_color: Color,
    pub font_family: String,
    /// Font size in points; 0 means unset.
    pub font_size: f32,

    // Paragraph properties.
    pub level: u32,
    pub numbered: bool,
    pub number_format: String,
    pub number_style: String,
    /// Line spacing multiplier (1.0 = single); 0 means unset.
    pub line_spacing: f32,
    /// Space above the paragraph in points; 0 means unset.
    pub space_before: f32,
    /// Space below the paragraph in points; 0 means unset.
    pub space_after: f32,
    pub space_between_same_style: bool,
    pub justification: Justification,
    pub right_to_left: bool,
    pub indent_left: f32,
    pub indent_right: f32,
    pub indent_first_line: f32,
    pub tabs: Vec<TabStop>,
}

/// A contiguous span of text sharing character formatting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Run {
    pub text: String,
    /// Language tag from `w:lang`; empty when unspecified.
    pub lang: String,
    /// The character style this run resolved against.
    pub style_id: String,
    /// Non-zero marks a footnote/endnote reference; `text` then holds the
    /// marker glyph (usually empty).
    pub note_id: i32,

    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub color: Color,
    pub back_color: Color,
    pub font_family: String,
    pub font_size: f32,
}

impl Run {
    /// Whether two runs are stylistically indistinguishable and may be
    /// merged. Note-reference runs never merge.
    pub fn same_style(&self, other: &Run) -> bool {
        self.note_id == 0
            && other.note_id == 0
            && self.style_id == other.style_id
            && self.lang == other.lang
            && self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.strike == other.strike
            && self.subscript == other.subscript
            && self.superscript == other.superscript
            && self.color == other.color
            && self.back_color == other.back_color
            && self.font_family == other.font_family
            && self.font_size == other.font_size
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paragraph {
    /// Paragraph style id; `"Normal"` when the source left it out.
    pub style_id: String,
    pub level: u32,
    pub numbered: bool,
    pub number_format: String,
    pub number_style: String,
    pub line_spacing: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub space_between_same_style: bool,
    pub justification: Justification,
    pub right_to_left: bool,
    pub indent_left: f32,
    pub indent_right: f32,
    pub indent_first_line: f32,
    pub tabs: Vec<TabStop>,
    pub runs: Vec<Run>,
}

/// A footnote or endnote body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Note {
    pub id: i32,
    pub paragraphs: Vec<Paragraph>,
}

/// The parsed document. `styles` holds the raw (unmerged) definitions from
/// `styles.xml`; paragraph and run fields already carry resolved values.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
    pub styles: HashMap<String, StyleDef>,
    pub footnotes: HashMap<i32, Note>,
    pub endnotes: HashMap<i32, Note>,
}
