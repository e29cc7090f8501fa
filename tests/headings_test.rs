//! Heading events and their hierarchy.

mod common;

use common::{assert_positions, convert, convert_with_events, convert_with_options, of_kind, slice};
use folio::{EventKind, NodeId, Recorder, TextOptions};

fn headings(rec: &Recorder) -> Vec<(u8, Option<NodeId>, NodeId)> {
    of_kind(rec, "heading")
        .into_iter()
        .map(|r| match &r.event.kind {
            EventKind::Heading { level, .. } => (*level, r.event.parent, r.id),
            other => panic!("unexpected kind {other:?}"),
        })
        .collect()
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_heading_text() {
    assert_eq!(convert("<h1>Title</h1>"), "Title");
    assert_eq!(convert("<h1>T</h1><p>x</p>"), "T\n\nx");
    assert_eq!(convert("<h1>heading</h1>tail"), "heading\n\ntail");
    assert_eq!(convert("<h1></h1>"), "");
}

#[test]
fn test_all_levels() {
    for level in 1..=6u8 {
        let html = format!("<h{level}>x</h{level}>");
        let (text, rec) = convert_with_events(&html);
        assert_eq!(text, "x");
        let records = of_kind(&rec, "heading");
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].event.kind,
            EventKind::Heading {
                tag: format!("h{level}"),
                level
            }
        );
    }
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_heading_positions() {
    let (text, rec) = convert_with_events("<h1>Title</h1><p>body</p>");
    let h = of_kind(&rec, "heading")[0];
    assert_eq!(h.event.start, 0);
    assert_eq!(h.event.end, Some(5));
    assert_eq!(h.event.name, None);
    assert_eq!(slice(&text, 0, 5), "Title");
}

#[test]
fn test_heading_after_text_skips_separator() {
    let (text, rec) = convert_with_events("intro<h2>Sub</h2>");
    assert_eq!(text, "intro\n\nSub");
    let h = of_kind(&rec, "heading")[0];
    assert_eq!((h.event.start, h.event.end), (7, Some(10)));
}

#[test]
fn test_heading_after_owed_space() {
    let (text, rec) = convert_with_events("<span>text </span><h2>B</h2>");
    assert_eq!(text, "text\n\nB");
    let h = of_kind(&rec, "heading")[0];
    assert_eq!(slice(&text, h.event.start, h.event.end.unwrap()), "B");
}

#[test]
fn test_heading_with_inline_markup() {
    let (text, rec) = convert_with_events("<h2>Chapter <em>One</em></h2>");
    assert_eq!(text, "Chapter One");
    let h = of_kind(&rec, "heading")[0];
    assert_eq!((h.event.start, h.event.end), (0, Some(11)));
}

#[test]
fn test_empty_heading_positions_stay_ordered() {
    let (text, rec) = convert_with_events("<p>a</p><h2></h2><p>b</p>");
    assert_eq!(text, "a\n\nb");
    let h = of_kind(&rec, "heading")[0];
    assert_eq!((h.event.start, h.event.end), (1, Some(1)));
    assert_positions(&text, &rec);
}

#[test]
fn test_heading_offsets_shifted() {
    let opts = TextOptions::new().with_start_offset(100);
    let (_, rec) = convert_with_options("<h1>A</h1>", &opts);
    let h = of_kind(&rec, "heading")[0];
    assert_eq!((h.event.start, h.event.end), (100, Some(101)));
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn test_nested_levels_chain() {
    let (_, rec) = convert_with_events("<h1>A</h1><h2>B</h2><h3>C</h3>");
    let hs = headings(&rec);
    assert_eq!(hs[0].1, None);
    assert_eq!(hs[1].1, Some(hs[0].2));
    assert_eq!(hs[2].1, Some(hs[1].2));
}

#[test]
fn test_same_level_siblings_share_parent() {
    let (_, rec) = convert_with_events("<h1>A</h1><h2>B</h2><h2>C</h2>");
    let hs = headings(&rec);
    assert_eq!(hs[1].1, Some(hs[0].2));
    assert_eq!(hs[2].1, Some(hs[0].2));
}

#[test]
fn test_shallower_heading_resets() {
    let (_, rec) = convert_with_events("<h2>A</h2><h3>B</h3><h1>C</h1><h2>D</h2>");
    let hs = headings(&rec);
    assert_eq!(hs[0].1, None);
    assert_eq!(hs[1].1, Some(hs[0].2));
    assert_eq!(hs[2].1, None);
    assert_eq!(hs[3].1, Some(hs[2].2));
}

#[test]
fn test_skipped_levels() {
    let (_, rec) = convert_with_events("<h1>A</h1><h3>B</h3><h2>C</h2><h3>D</h3>");
    let hs = headings(&rec);
    assert_eq!(hs[1].1, Some(hs[0].2));
    assert_eq!(hs[2].1, Some(hs[0].2));
    assert_eq!(hs[3].1, Some(hs[2].2));
}

#[test]
fn test_deeper_first_heading_has_no_parent_later() {
    let (_, rec) = convert_with_events("<h4>A</h4><h2>B</h2>");
    let hs = headings(&rec);
    assert_eq!(hs[0].1, None);
    assert_eq!(hs[1].1, None);
}

#[test]
fn test_headings_in_sections() {
    let html = "<div><h1>Book</h1><div><h2>One</h2><p>x</p></div><div><h2>Two</h2></div></div>";
    let (text, rec) = convert_with_events(html);
    assert_eq!(text, "Book\n\nOne\n\nx\n\nTwo");
    let hs = headings(&rec);
    assert_eq!(hs[1].1, Some(hs[0].2));
    assert_eq!(hs[2].1, Some(hs[0].2));
    assert_positions(&text, &rec);
}

#[test]
fn test_no_events_without_sink() {
    assert_eq!(convert("<h1>A</h1><h2>B</h2>"), "A\n\nB");
}
