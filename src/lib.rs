//! # folio
//!
//! Plain text and structure from ebook HTML.
//!
//! folio turns a chapter of (X)HTML into plain text and, alongside it,
//! reports the document's structure with exact character offsets into that
//! text: headings with their hierarchy, links with resolved targets, tables,
//! anchor ids and print page markers.
//!
//! ## Quick Start
//!
//! ```
//! use folio::{html_to_text, NoEvents, TextOptions};
//!
//! let text = html_to_text("<p>first</p><p>second</p>", NoEvents, &TextOptions::new()).unwrap();
//! assert_eq!(text, "first\n\nsecond");
//! ```
//!
//! ## Structural Events
//!
//! Pass an [`EventSink`] to receive events as they are found. [`Recorder`]
//! keeps them all:
//!
//! ```
//! use folio::{html_to_text, EventKind, Recorder, TextOptions};
//!
//! let mut rec = Recorder::new();
//! html_to_text("<h1>A</h1><h2>B</h2><h3>C</h3>", &mut rec, &TextOptions::new()).unwrap();
//!
//! let headings: Vec<_> = rec.of_kind("heading").collect();
//! assert_eq!(headings[1].event.parent, Some(headings[0].id));
//! assert_eq!(headings[2].event.parent, Some(headings[1].id));
//! assert!(matches!(headings[0].event.kind, EventKind::Heading { level: 1, .. }));
//! ```
//!
//! Conversions of consecutive chapters can share one offset space by
//! passing the character count of the text so far as
//! [`TextOptions::with_start_offset`].

pub mod dom;
mod error;
pub mod events;
pub mod links;
pub mod pagenum;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use dom::{ArenaDom, parse_html, parse_markup, parse_xml};
pub use error::{Error, Result};
pub use events::{Event, EventKind, EventSink, NoEvents, NodeId, Record, Recorder, SinkError, TableTag};
pub use text::{TextOptions, html_to_text, tree_to_text};
