//! Plain-text extraction with offset-tracked structural events.
//!
//! The converter walks a document in order, writing collapsed text to an
//! output buffer and reporting headings, links, tables, anchor ids and page
//! markers to an [`EventSink`] with character offsets into that text.
//!
//! ```
//! use folio::text::{html_to_text, TextOptions};
//! use folio::events::Recorder;
//!
//! let mut rec = Recorder::new();
//! let text = html_to_text(
//!     "<h1>Title</h1><p>See <a href='notes.html#n1'>note</a>.</p>",
//!     &mut rec,
//!     &TextOptions::new().with_file("text/ch1.html"),
//! )
//! .unwrap();
//!
//! assert_eq!(text, "Title\n\nSee note.");
//! let link = rec.of_kind("link").next().unwrap();
//! assert_eq!(&text[link.event.start..link.event.end.unwrap()], "note");
//! ```

mod converter;
pub mod mode;
pub mod tags;
pub mod whitespace;
pub mod writer;

use crate::dom::{ArenaDom, parse_markup};
use crate::error::Result;
use crate::events::EventSink;

use converter::Converter;

pub use mode::{ContentMode, ContentState};
pub use tags::HR_TEXT;
pub use whitespace::collapse_whitespace;
pub use writer::OffsetWriter;

/// Options for a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Added to every reported offset, for documents whose text is appended
    /// after other text.
    pub start_offset: usize,
    /// Path of the document, used to qualify ids (`file#id`) and resolve
    /// relative links.
    pub file: String,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_offset(mut self, offset: usize) -> Self {
        self.start_offset = offset;
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }
}

/// Parse `markup` and convert it to text.
///
/// Well-formed XHTML is read as XML; anything else goes through the HTML5
/// parser. Events are reported to `sink` as they are found.
pub fn html_to_text<S: EventSink>(markup: &str, sink: S, options: &TextOptions) -> Result<String> {
    let dom = parse_markup(markup);
    tree_to_text(&dom, sink, options)
}

/// Convert an already parsed document to text.
pub fn tree_to_text<S: EventSink>(dom: &ArenaDom, sink: S, options: &TextOptions) -> Result<String> {
    Converter::new(dom, sink, options.start_offset, &options.file).run(dom.document())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoEvents;

    #[test]
    fn test_options_builder() {
        let opts = TextOptions::new().with_start_offset(7).with_file("a/b.html");
        assert_eq!(opts.start_offset, 7);
        assert_eq!(opts.file, "a/b.html");
        assert_eq!(TextOptions::new(), TextOptions::default());
    }

    #[test]
    fn test_tree_to_text_reuses_dom() {
        let mut dom = ArenaDom::new();
        let p = dom.element(dom.document(), "p", &[]);
        dom.append_text(p, " hello   world ");

        let opts = TextOptions::new();
        let first = tree_to_text(&dom, NoEvents, &opts).unwrap();
        let second = tree_to_text(&dom, NoEvents, &opts).unwrap();
        assert_eq!(first, "hello world");
        assert_eq!(first, second);
    }
}
