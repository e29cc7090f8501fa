//! Benchmarks for text extraction.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use folio::{NoEvents, Recorder, TextOptions, html_to_text, parse_markup, tree_to_text};

/// A chapter-sized XHTML document with headings, links, tables and page
/// markers spread through it.
fn sample_chapter() -> String {
    let mut body = String::new();
    for section in 1..=40 {
        body.push_str(&format!(
            "<h2 id=\"s{section}\">Section {section}</h2>\n\
             <span class=\"pagenum\" id=\"p{section}\">{section}</span>\n"
        ));
        for para in 0..12 {
            body.push_str(&format!(
                "<p>Paragraph {para} of   section {section}, with <em>inline</em> \
                 markup and a <a href=\"notes.xhtml#n{section}-{para}\">note\n  reference</a>.</p>\n"
            ));
        }
        body.push_str(
            "<table><tr><th>Key</th><th>Value</th></tr><tr><td>a</td><td>1</td></tr></table>\n\
             <pre>  preformatted\n    block</pre>\n",
        );
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>Chapter</title></head>\
         <body><h1>Chapter</h1>{body}</body></html>"
    )
}

// ============================================================================
// Parsing Benchmarks
// ============================================================================

fn bench_parse_xml(c: &mut Criterion) {
    let chapter = sample_chapter();
    c.bench_function("parse_markup_xhtml", |b| {
        b.iter(|| parse_markup(black_box(&chapter)));
    });
}

fn bench_parse_html_fallback(c: &mut Criterion) {
    // An HTML named entity makes the strict parse fail.
    let chapter = sample_chapter().replace("Chapter</h1>", "Chapter&nbsp;One</h1>");
    c.bench_function("parse_markup_html_fallback", |b| {
        b.iter(|| parse_markup(black_box(&chapter)));
    });
}

// ============================================================================
// Conversion Benchmarks
// ============================================================================

fn bench_tree_to_text(c: &mut Criterion) {
    let dom = parse_markup(&sample_chapter());
    let options = TextOptions::new().with_file("text/chapter.xhtml");

    c.bench_function("tree_to_text_no_events", |b| {
        b.iter(|| tree_to_text(black_box(&dom), NoEvents, &options).unwrap());
    });

    c.bench_function("tree_to_text_recorded", |b| {
        b.iter(|| {
            let mut rec = Recorder::new();
            tree_to_text(black_box(&dom), &mut rec, &options).unwrap();
            rec
        });
    });
}

fn bench_html_to_text(c: &mut Criterion) {
    let chapter = sample_chapter();
    let options = TextOptions::new().with_file("text/chapter.xhtml");
    c.bench_function("html_to_text_full", |b| {
        b.iter(|| {
            let mut rec = Recorder::new();
            html_to_text(black_box(&chapter), &mut rec, &options).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_parse_xml,
    bench_parse_html_fallback,
    bench_tree_to_text,
    bench_html_to_text,
);
criterion_main!(benches);
