//! Document tree and markup parsing.
//!
//! Conversions run over an [`ArenaDom`]. Callers either build one by hand or
//! get one from [`parse_markup`], which reads well-formed XHTML strictly and
//! falls back to a lenient HTML5 parse for everything else.

mod arena;
mod tree_sink;
mod xml;

pub use arena::{
    ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter, Descendants,
};
pub use tree_sink::{ArenaSink, NodeHandle};
pub use xml::parse_xml;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse markup with the HTML5 algorithm. Never fails: malformed input is
/// repaired the way a browser would repair it.
pub fn parse_html(markup: &str) -> ArenaDom {
    parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(markup.as_bytes())
        .into_dom()
}

/// Parse markup as XML if it is well-formed, otherwise as HTML.
pub fn parse_markup(markup: &str) -> ArenaDom {
    match parse_xml(markup) {
        Some(dom) => dom,
        None => {
            log::debug!("markup is not well-formed XML, parsing as HTML");
            parse_html(markup)
        }
    }
}
