use std::collections::HashMap;

use crate::model::{Color, Justification, StyleDef, StyleKind, TabAlignment, TabStop};

use super::{WML_NS, twips_attr, wml, wml_attr, wml_bool};

fn parse_justification(val: &str) -> Justification {
    match val {
        "center" => Justification::Center,
        "right" => Justification::Right,
        "both" => Justification::Justify,
        _ => Justification::Left,
    }
}

fn parse_tab_alignment(val: &str) -> TabAlignment {
    match val {
        "center" => TabAlignment::Center,
        "right" => TabAlignment::Right,
        "decimal" => TabAlignment::Decimal,
        _ => TabAlignment::Left,
    }
}

fn parse_tab_stops(tabs: roxmltree::Node) -> Vec<TabStop> {
    tabs.children()
        .filter(|n| n.tag_name().name() == "tab" && n.tag_name().namespace() == Some(WML_NS))
        .filter_map(|n| {
            let position = twips_attr(n, "pos")?;
            let alignment = n
                .attribute((WML_NS, "val"))
                .map(parse_tab_alignment)
                .unwrap_or_default();
            let leader = n.attribute((WML_NS, "leader")).unwrap_or("").to_string();
            Some(TabStop {
                position,
                alignment,
                leader,
            })
        })
        .collect()
}

/// Read run (character) properties from a `w:rPr` element into `def`.
/// Fields are only touched when the corresponding element is present and
/// carries a usable value, so the function works both for populating a raw
/// style and as a direct-formatting source.
pub(super) fn read_run_props(rpr: roxmltree::Node, def: &mut StyleDef) {
    if wml_bool(rpr, "b") == Some(true) {
        def.bold = true;
    }
    if wml_bool(rpr, "i") == Some(true) {
        def.italic = true;
    }
    // w:u carries its kind in w:val; "none" explicitly disables it.
    if let Some(u) = wml(rpr, "u")
        && u.attribute((WML_NS, "val")).is_none_or(|v| v != "none")
    {
        def.underline = true;
    }
    if wml_bool(rpr, "strike") == Some(true) {
        def.strike = true;
    }
    if wml_bool(rpr, "subscript") == Some(true) {
        def.subscript = true;
    }
    if wml_bool(rpr, "superscript") == Some(true) {
        def.superscript = true;
    }
    if let Some(val) = wml_attr(rpr, "color") {
        let color = Color::from_hex(val);
        if !color.is_empty() {
            def.color = color;
        }
    }
    if let Some(fill) = wml(rpr, "shd").and_then(|n| n.attribute((WML_NS, "fill"))) {
        let color = Color::from_hex(fill);
        if !color.is_empty() {
            def.back_color = color;
        }
    }
    if let Some(family) = wml(rpr, "rFonts").and_then(|n| n.attribute((WML_NS, "ascii")))
        && !family.is_empty()
    {
        def.font_family = family.to_string();
    }
    if let Some(half_points) = wml_attr(rpr, "sz").and_then(|v| v.parse::<f32>().ok())
        && half_points > 0.0
    {
        def.font_size = half_points / 2.0;
    }
}

/// Read paragraph properties from a `w:pPr` element into `def`.
/// Each present element overrides the current value outright, which gives
/// direct formatting its unconditional precedence over seeded style values;
/// `w:tabs` replaces any tab stops already in `def`.
pub(super) fn read_paragraph_props(ppr: roxmltree::Node, def: &mut StyleDef) {
    if let Some(lvl) = wml_attr(ppr, "outlineLvl").and_then(|v| v.parse::<u32>().ok()) {
        def.level = lvl;
    }
    if let Some(num_pr) = wml(ppr, "numPr") {
        def.numbered = true;
        if wml(num_pr, "numId").is_some() {
            // A list is attached but the concrete format lives in
            // numbering.xml, which we do not resolve.
            def.number_format = "decimal".to_string();
        }
        if let Some(lvl) = wml_attr(num_pr, "ilvl").and_then(|v| v.parse::<u32>().ok()) {
            def.level = lvl;
        }
        if let Some(style) = wml_attr(num_pr, "numStyle")
            && !style.is_empty()
        {
            def.number_style = style.to_string();
        }
    }
    if let Some(spacing) = wml(ppr, "spacing") {
        if let Some(line) = spacing
            .attribute((WML_NS, "line"))
            .and_then(|v| v.parse::<f32>().ok())
        {
            def.line_spacing = line / 240.0;
        }
        if let Some(before) = twips_attr(spacing, "before") {
            def.space_before = before;
        }
        if let Some(after) = twips_attr(spacing, "after") {
            def.space_after = after;
        }
        if spacing.attribute((WML_NS, "lineRule")) == Some("exact") {
            def.space_between_same_style = true;
        }
    }
    if let Some(ind) = wml(ppr, "ind") {
        if let Some(left) = twips_attr(ind, "left") {
            def.indent_left = left;
        }
        if let Some(right) = twips_attr(ind, "right") {
            def.indent_right = right;
        }
        if let Some(first) = twips_attr(ind, "firstLine") {
            def.indent_first_line = first;
        }
    }
    if let Some(val) = wml_attr(ppr, "jc") {
        def.justification = parse_justification(val);
    }
    if let Some(tabs) = wml(ppr, "tabs") {
        def.tabs = parse_tab_stops(tabs);
    }
    if wml(ppr, "bidi").is_some() {
        def.right_to_left = true;
    }
}

/// Overlay the set character fields of `over` onto `base`: booleans are
/// sticky (true wins, false never clears), colors/strings/sizes apply only
/// when set.
pub(super) fn overlay_character(base: &mut StyleDef, over: &StyleDef) {
    base.bold |= over.bold;
    base.italic |= over.italic;
    base.underline |= over.underline;
    base.strike |= over.strike;
    base.subscript |= over.subscript;
    base.superscript |= over.superscript;
    if !over.color.is_empty() {
        base.color = over.color;
    }
    if !over.back_color.is_empty() {
        base.back_color = over.back_color;
    }
    if !over.font_family.is_empty() {
        base.font_family = over.font_family.clone();
    }
    if over.font_size > 0.0 {
        base.font_size = over.font_size;
    }
}

fn overlay_paragraph(base: &mut StyleDef, over: &StyleDef) {
    if over.level > 0 {
        base.level = over.level;
    }
    base.numbered |= over.numbered;
    if !over.number_format.is_empty() {
        base.number_format = over.number_format.clone();
    }
    if !over.number_style.is_empty() {
        base.number_style = over.number_style.clone();
    }
    if over.line_spacing > 0.0 {
        base.line_spacing = over.line_spacing;
    }
    if over.space_before > 0.0 {
        base.space_before = over.space_before;
    }
    if over.space_after > 0.0 {
        base.space_after = over.space_after;
    }
    base.space_between_same_style |= over.space_between_same_style;
    if over.justification != Justification::Left {
        base.justification = over.justification;
    }
    base.right_to_left |= over.right_to_left;
    if over.indent_left > 0.0 {
        base.indent_left = over.indent_left;
    }
    if over.indent_right > 0.0 {
        base.indent_right = over.indent_right;
    }
    if over.indent_first_line > 0.0 {
        base.indent_first_line = over.indent_first_line;
    }
    base.tabs.extend(over.tabs.iter().cloned());
}

/// Parse `word/styles.xml` into the raw (unmerged) style map. A missing or
/// unparsable part yields the empty map.
pub(super) fn parse_styles(xml_text: Option<&str>) -> HashMap<String, StyleDef> {
    let mut styles = HashMap::new();
    let Some(text) = xml_text else {
        return styles;
    };
    let Ok(xml) = roxmltree::Document::parse(text) else {
        return styles;
    };

    for style_node in xml.root_element().children() {
        if style_node.tag_name().name() != "style"
            || style_node.tag_name().namespace() != Some(WML_NS)
        {
            continue;
        }
        let Some(style_id) = style_node.attribute((WML_NS, "styleId")) else {
            continue;
        };

        let mut def = StyleDef {
            kind: match style_node.attribute((WML_NS, "type")) {
                Some("paragraph") => StyleKind::Paragraph,
                _ => StyleKind::Run,
            },
            ..StyleDef::default()
        };
        if let Some(parent) = wml_attr(style_node, "basedOn") {
            def.based_on = parent.to_string();
        }
        if let Some(rpr) = wml(style_node, "rPr") {
            read_run_props(rpr, &mut def);
        }
        if let Some(ppr) = wml(style_node, "pPr") {
            read_paragraph_props(ppr, &mut def);
        }
        styles.insert(style_id.to_string(), def);
    }

    log::debug!("parsed {} style definitions", styles.len());
    styles
}

/// Flattens `basedOn` chains on demand, memoising per document load.
///
/// The cache is a field of this value rather than anything process-global,
/// so concurrent loads of independent documents never share state.
pub(super) struct StyleResolver<'a> {
    styles: &'a HashMap<String, StyleDef>,
    cache: HashMap<String, StyleDef>,
}

impl<'a> StyleResolver<'a> {
    pub(super) fn new(styles: &'a HashMap<String, StyleDef>) -> Self {
        StyleResolver {
            styles,
            cache: HashMap::new(),
        }
    }

    /// Fully merged definition of `id`. Empty ids resolve to the default
    /// StyleDef; unknown ids resolve to the default and are cached as such.
    pub(super) fn resolve(&mut self, id: &str) -> StyleDef {
        if id.is_empty() {
            return StyleDef::default();
        }
        if let Some(hit) = self.cache.get(id) {
            return hit.clone();
        }
        // Seed the cache before recursing: a basedOn cycle then resolves to
        // this partial entry instead of recursing forever.
        self.cache.insert(id.to_string(), StyleDef::default());

        let Some(def) = self.styles.get(id) else {
            return StyleDef::default();
        };

        let mut merged = self.resolve(&def.based_on);
        overlay_character(&mut merged, def);
        overlay_paragraph(&mut merged, def);
        if !def.based_on.is_empty() {
            merged.based_on = def.based_on.clone();
        }
        // kind is per-style metadata, never inherited.
        merged.kind = def.kind;

        self.cache.insert(id.to_string(), merged.clone());
        merged
    }
}
