//! Tag vocabulary of the converter.

use crate::events::TableTag;

/// Class attribute token marking a page-number element.
pub const PAGENUM_CLASS: &str = "pagenum";

/// Text written for `<hr>`.
pub const HR_TEXT: &str = "\n--------------------------------------------------------------------------------";

/// How the converter treats an element, by tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// `p`, `div`, `center`, `blockquote`: paragraph breaks around.
    Block,
    /// `h1` to `h6`.
    Heading(u8),
    /// `pre`, `code`: content written verbatim.
    Pre,
    /// `script`, `style`, `title`: content dropped.
    Ignored,
    Table(TableTag),
    /// `br`
    LineBreak,
    /// `hr`
    Rule,
    /// `dd`, `dt`: line break before.
    DefinitionItem,
    /// Anything else; only its text matters.
    Inline,
}

impl TagClass {
    pub fn of(tag: &str) -> Self {
        match tag {
            "p" | "div" | "center" | "blockquote" => TagClass::Block,
            "h1" => TagClass::Heading(1),
            "h2" => TagClass::Heading(2),
            "h3" => TagClass::Heading(3),
            "h4" => TagClass::Heading(4),
            "h5" => TagClass::Heading(5),
            "h6" => TagClass::Heading(6),
            "pre" | "code" => TagClass::Pre,
            "script" | "style" | "title" => TagClass::Ignored,
            "br" => TagClass::LineBreak,
            "hr" => TagClass::Rule,
            "dd" | "dt" => TagClass::DefinitionItem,
            _ => TableTag::from_tag(tag)
                .map(TagClass::Table)
                .unwrap_or(TagClass::Inline),
        }
    }
}
