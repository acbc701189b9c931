//! Integration tests: binding, coloring and re-derivation of a venue map.
//!
//! Binding stamps are a cache of the section records; these tests check
//! that rebuilding them from scratch, or re-reading them from the emitted
//! markup, always lands on the same result.

use pretty_assertions::assert_eq;
use seatmap_core::binding::STAMP_SECTION_ID;
use seatmap_core::*;

fn sections() -> Vec<SectionRecord> {
    vec![
        SectionRecord::new("A1", "Block A1", "#FF0000", "blockA1"),
        SectionRecord::new("B2", "Block B2", "navy", "blockB2"),
        SectionRecord::new("ZZ", "Block ZZ", "#00FF00", "blockZZ"),
    ]
}

fn render(source: &str, sections: &[SectionRecord]) -> (SvgDocument, BindingTable) {
    let mut doc = parse_svg(source).unwrap();
    let table = bind_sections(&mut doc, sections);
    apply_base_colors(&mut doc, &table, sections, FillPolicy::default());
    (doc, table)
}

#[test]
fn two_shapes_bind_to_one_section() {
    let (doc, table) = render(include_str!("fixtures/stadium-a.svg"), &sections());
    let a1 = SectionId::intern("A1");
    let shapes = table.shapes_of(a1);
    assert_eq!(shapes.len(), 2);
    for &shape in shapes {
        let el = doc.element(shape).unwrap();
        assert_eq!(el.attr(STAMP_SECTION_ID), Some("A1"));
        assert_eq!(el.style_value("fill").as_deref(), Some("#FF000099"));
    }
}

#[test]
fn unmatched_section_colors_nothing() {
    let (doc, table) = render(include_str!("fixtures/stadium-a.svg"), &sections());
    assert!(!table.is_bound(SectionId::intern("ZZ")));
    let green = doc.select(|el| {
        el.style_value("fill")
            .is_some_and(|f| f.starts_with("#00FF00"))
    });
    assert!(green.is_empty());
}

#[test]
fn existing_inline_style_is_kept() {
    let (doc, _) = render(include_str!("fixtures/stadium-a.svg"), &sections());
    let b2 = doc.find_by_id("b2").unwrap();
    assert_eq!(
        doc.element(b2).unwrap().attr("style"),
        Some("stroke: #333; fill: #00008099;")
    );
}

#[test]
fn rebinding_from_scratch_is_identical() {
    let source = include_str!("fixtures/stadium-a.svg");
    let (first_doc, first_table) = render(source, &sections());
    let (second_doc, second_table) = render(source, &sections());
    assert_eq!(emit_svg(&first_doc), emit_svg(&second_doc));
    assert_eq!(first_table, second_table);
}

#[test]
fn rebinding_in_place_is_identical() {
    let (mut doc, table) = render(include_str!("fixtures/stadium-a.svg"), &sections());
    let before = emit_svg(&doc);
    let again = bind_sections(&mut doc, &sections());
    apply_base_colors(&mut doc, &again, &sections(), FillPolicy::default());
    assert_eq!(emit_svg(&doc), before);
    assert_eq!(again, table);
}

#[test]
fn stamps_survive_emit_and_reparse() {
    let (doc, table) = render(include_str!("fixtures/stadium-a.svg"), &sections());
    let reparsed = parse_svg(&emit_svg(&doc)).unwrap();
    // Node indices are assigned in document order, so they line up.
    assert_eq!(BindingTable::from_stamps(&reparsed), table);
}

#[test]
fn diagnostics_for_fixture() {
    let doc = parse_svg(include_str!("fixtures/stadium-a.svg")).unwrap();
    let diags = check_bindings(&doc, &sections());
    let rules: Vec<&str> = diags.iter().map(|d| d.rule).collect();
    assert_eq!(rules, vec!["unbound-section", "unmapped-shape"]);
    assert_eq!(diags[1].message, "Shape `kiosk` is not mapped to any section.");
}
