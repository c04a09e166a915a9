mod common;

use common::{parse_body, parse_with_styles, paragraph_text};
use docx_model::{Color, Justification};

#[test]
fn inherited_bold_via_run_style() {
    let doc = parse_with_styles(
        r#"<w:style w:type="character" w:styleId="BoldChar"><w:rPr><w:b/></w:rPr></w:style>"#,
        r#"<w:p><w:r><w:rPr><w:rStyle w:val="BoldChar"/></w:rPr><w:t>hi</w:t></w:r></w:p>"#,
    );

    assert_eq!(doc.paragraphs.len(), 1);
    let runs = &doc.paragraphs[0].runs;
    assert_eq!(runs.len(), 1);
    assert!(runs[0].bold);
    assert_eq!(runs[0].text, "hi");
    assert_eq!(runs[0].style_id, "BoldChar");
}

#[test]
fn direct_flag_overrides_inherited_false() {
    let doc = parse_with_styles(
        r#"<w:style w:type="character" w:styleId="Plain"><w:rPr><w:i/></w:rPr></w:style>"#,
        r#"<w:p><w:r><w:rPr><w:rStyle w:val="Plain"/><w:b/></w:rPr><w:t>x</w:t></w:r></w:p>"#,
    );

    let run = &doc.paragraphs[0].runs[0];
    assert!(run.bold, "inline w:b wins over the style's unset bold");
    assert!(run.italic, "inline flags add to inherited ones");
}

#[test]
fn identical_adjacent_runs_coalesce() {
    let doc = parse_body(
        r#"<w:p>
             <w:r><w:rPr><w:b/></w:rPr><w:t>foo</w:t></w:r>
             <w:r><w:rPr><w:b/></w:rPr><w:t>bar</w:t></w:r>
           </w:p>"#,
    );

    let runs = &doc.paragraphs[0].runs;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "foobar");
    assert!(runs[0].bold);
}

#[test]
fn differing_styles_stay_separate() {
    let doc = parse_body(
        r#"<w:p>
             <w:r><w:rPr><w:b/></w:rPr><w:t>foo</w:t></w:r>
             <w:r><w:t>bar</w:t></w:r>
             <w:r><w:t>baz</w:t></w:r>
           </w:p>"#,
    );

    let runs = &doc.paragraphs[0].runs;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "foo");
    assert_eq!(runs[1].text, "barbaz");
}

#[test]
fn coalescing_preserves_text_and_leaves_no_equal_neighbours() {
    let doc = parse_body(
        r#"<w:p>
             <w:r><w:t>a</w:t></w:r>
             <w:r><w:rPr><w:i/></w:rPr><w:t>b</w:t></w:r>
             <w:r><w:rPr><w:i/></w:rPr><w:t>c</w:t></w:r>
             <w:r><w:t>d</w:t></w:r>
             <w:r><w:t>e</w:t></w:r>
           </w:p>"#,
    );

    assert_eq!(paragraph_text(&doc, 0), "abcde");
    let runs = &doc.paragraphs[0].runs;
    assert_eq!(runs.len(), 3);
    for pair in runs.windows(2) {
        assert!(
            !pair[0].same_style(&pair[1]),
            "adjacent runs with equal fingerprints must have been merged"
        );
    }
}

#[test]
fn lang_splits_the_fingerprint() {
    let doc = parse_body(
        r#"<w:p>
             <w:r><w:rPr><w:lang w:val="en-US"/></w:rPr><w:t>hello </w:t></w:r>
             <w:r><w:rPr><w:lang w:val="nb-NO"/></w:rPr><w:t>hei</w:t></w:r>
           </w:p>"#,
    );

    let runs = &doc.paragraphs[0].runs;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].lang, "en-US");
    assert_eq!(runs[1].lang, "nb-NO");
}

#[test]
fn centered_right_to_left_paragraph() {
    let doc = parse_body(
        r#"<w:p><w:pPr><w:jc w:val="center"/><w:bidi/></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
    );

    let para = &doc.paragraphs[0];
    assert_eq!(para.justification, Justification::Center);
    assert!(para.right_to_left);
}

#[test]
fn preserved_space_is_kept_verbatim() {
    let doc = parse_body(
        r#"<w:p><w:r><w:t xml:space="preserve">  hello  </w:t></w:r></w:p>"#,
    );
    assert_eq!(doc.paragraphs[0].runs[0].text, "  hello  ");
}

#[test]
fn unpreserved_space_is_trimmed() {
    let doc = parse_body(r#"<w:p><w:r><w:t>  hello  </w:t></w:r></w:p>"#);
    assert_eq!(doc.paragraphs[0].runs[0].text, "hello");
}

#[test]
fn all_space_text_becomes_empty() {
    let doc = parse_body(r#"<w:p><w:r><w:t>   </w:t></w:r></w:p>"#);
    assert_eq!(doc.paragraphs[0].runs[0].text, "");
}

#[test]
fn run_without_text_element_still_counts() {
    let doc = parse_body(r#"<w:p><w:r><w:rPr><w:b/></w:rPr></w:r></w:p>"#);

    let runs = &doc.paragraphs[0].runs;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "");
    assert!(runs[0].bold);
}

#[test]
fn paragraph_without_runs_stays_empty() {
    let doc = parse_body(r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr></w:p>"#);

    assert!(doc.paragraphs[0].runs.is_empty());
    assert_eq!(doc.paragraphs[0].justification, Justification::Right);
}

#[test]
fn note_references_never_merge() {
    let doc = parse_body(
        r#"<w:p>
             <w:r><w:footnoteReference w:id="1"/></w:r>
             <w:r><w:footnoteReference w:id="2"/></w:r>
             <w:r><w:t>after</w:t></w:r>
           </w:p>"#,
    );

    let runs = &doc.paragraphs[0].runs;
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].note_id, 1);
    assert_eq!(runs[1].note_id, 2);
    assert_eq!(runs[2].note_id, 0);
    assert_eq!(runs[2].text, "after");
}

#[test]
fn color_codec_boundaries() {
    let rgb = Color::from_hex("FF8000");
    assert_eq!((rgb.r, rgb.g, rgb.b, rgb.a), (255, 128, 0, 255));

    let rgba = Color::from_hex("FF800080");
    assert_eq!(rgba.a, 128);

    assert!(Color::from_hex("auto").is_empty());
    assert!(Color::from_hex("").is_empty());
    assert!(Color::from_hex("ZZZZZZ").is_empty());
}

#[test]
fn run_colors_flow_from_markup() {
    let doc = parse_body(
        r#"<w:p><w:r>
             <w:rPr><w:color w:val="FF8000"/><w:shd w:fill="00FF00"/></w:rPr>
             <w:t>x</w:t>
           </w:r></w:p>"#,
    );

    let run = &doc.paragraphs[0].runs[0];
    assert_eq!((run.color.r, run.color.g, run.color.b), (255, 128, 0));
    assert_eq!((run.back_color.r, run.back_color.g, run.back_color.b), (0, 255, 0));
}

#[test]
fn auto_color_cannot_clear_an_inherited_one() {
    let doc = parse_with_styles(
        r#"<w:style w:type="character" w:styleId="Red"><w:rPr><w:color w:val="FF0000"/></w:rPr></w:style>"#,
        r#"<w:p><w:r><w:rPr><w:rStyle w:val="Red"/><w:color w:val="auto"/></w:rPr><w:t>x</w:t></w:r></w:p>"#,
    );

    let run = &doc.paragraphs[0].runs[0];
    assert_eq!((run.color.r, run.color.g, run.color.b), (255, 0, 0));
}

#[test]
fn font_family_and_underline_from_markup() {
    let doc = parse_body(
        r#"<w:p>
             <w:r><w:rPr><w:rFonts w:ascii="Georgia"/><w:u w:val="single"/></w:rPr><w:t>a</w:t></w:r>
             <w:r><w:rPr><w:rFonts w:ascii="Georgia"/><w:u w:val="none"/></w:rPr><w:t>b</w:t></w:r>
           </w:p>"#,
    );

    let runs = &doc.paragraphs[0].runs;
    assert_eq!(runs.len(), 2, "underline difference must keep the runs apart");
    assert_eq!(runs[0].font_family, "Georgia");
    assert!(runs[0].underline);
    assert!(!runs[1].underline);
}

#[test]
fn subscript_and_superscript_toggles() {
    let doc = parse_body(
        r#"<w:p>
             <w:r><w:rPr><w:subscript/></w:rPr><w:t>a</w:t></w:r>
             <w:r><w:rPr><w:superscript/></w:rPr><w:t>b</w:t></w:r>
           </w:p>"#,
    );

    let runs = &doc.paragraphs[0].runs;
    assert!(runs[0].subscript);
    assert!(!runs[0].superscript);
    assert!(runs[1].superscript);
}
