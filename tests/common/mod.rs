//! Shared helpers for the integration tests.

#![allow(dead_code)]

use folio::{NoEvents, Record, Recorder, TextOptions, html_to_text};

/// `"\n"` followed by 80 dashes.
pub use folio::text::HR_TEXT;

/// Convert markup without collecting events.
pub fn convert(html: &str) -> String {
    html_to_text(html, NoEvents, &TextOptions::new()).expect("conversion failed")
}

/// Convert markup, collecting every event.
pub fn convert_with_events(html: &str) -> (String, Recorder) {
    convert_with_options(html, &TextOptions::new())
}

pub fn convert_with_options(html: &str, options: &TextOptions) -> (String, Recorder) {
    let mut rec = Recorder::new();
    let text = html_to_text(html, &mut rec, options).expect("conversion failed");
    (text, rec)
}

/// Records of one kind, in document order.
pub fn of_kind<'a>(rec: &'a Recorder, kind: &'a str) -> Vec<&'a Record> {
    rec.of_kind(kind).collect()
}

/// Substring by character offsets.
pub fn slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Every offset lies inside the text and no event ends before it starts.
pub fn assert_positions(text: &str, rec: &Recorder) {
    let len = text.chars().count();
    for record in rec.records() {
        let event = &record.event;
        assert!(event.start <= len, "{record:?} starts beyond text length {len}");
        if let Some(end) = event.end {
            assert!(end <= len, "{record:?} ends beyond text length {len}");
            assert!(event.start <= end, "{record:?} starts after it ends");
        }
    }
}
