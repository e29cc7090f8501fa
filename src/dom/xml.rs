//! Strict XML/XHTML parsing into the arena.
//!
//! Well-formed XHTML goes through quick-xml so it is read exactly as written
//! (an HTML5 parser would, for instance, drop the first newline inside
//! `<pre>`). Anything that is not well-formed XML is rejected here and left to
//! the HTML5 parser.

use html5ever::{LocalName, QualName, ns};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::arena::{ArenaDom, ArenaNodeId, Attribute};

/// Parse `markup` as XML. Returns `None` if it is not a single well-formed
/// XML document.
pub fn parse_xml(markup: &str) -> Option<ArenaDom> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut dom = ArenaDom::new();
    let document = dom.document();
    let mut stack: Vec<(ArenaNodeId, Vec<u8>)> = Vec::new();
    let mut seen_root = false;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                log::debug!(
                    "not well-formed XML at byte {}: {e}",
                    reader.error_position()
                );
                return None;
            }
        };

        match event {
            Event::Start(e) => {
                let parent = open_parent(&stack, document, &mut seen_root)?;
                let node = create_element(&mut dom, &e)?;
                dom.append(parent, node);
                stack.push((node, e.name().as_ref().to_vec()));
            }
            Event::Empty(e) => {
                let parent = open_parent(&stack, document, &mut seen_root)?;
                let node = create_element(&mut dom, &e)?;
                dom.append(parent, node);
            }
            Event::End(e) => {
                let (_, open_name) = stack.pop()?;
                if open_name != e.name().as_ref() {
                    return None;
                }
            }
            Event::Text(e) => {
                let text = std::str::from_utf8(e.as_ref()).ok()?;
                push_text(&mut dom, &stack, text)?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref()).ok()?;
                push_text(&mut dom, &stack, text)?;
            }
            Event::GeneralRef(e) => {
                let name = std::str::from_utf8(e.as_ref()).ok()?;
                let resolved = resolve_entity(name)?;
                push_text(&mut dom, &stack, resolved.encode_utf8(&mut [0; 4]))?;
            }
            Event::Comment(e) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                let node = dom.create_comment(text);
                dom.append(current(&stack, document), node);
            }
            Event::PI(e) => {
                let target = String::from_utf8_lossy(e.target()).into_owned();
                let data = String::from_utf8_lossy(e.content()).trim().to_string();
                let node = dom.create_processing_instruction(target, data);
                dom.append(current(&stack, document), node);
            }
            Event::DocType(e) => {
                let raw = String::from_utf8_lossy(e.as_ref());
                let name = raw.split_whitespace().next().unwrap_or("").to_string();
                let node = dom.create_doctype(name, String::new(), String::new());
                dom.append(document, node);
            }
            Event::Decl(_) => {}
            Event::Eof => break,
        }
    }

    (stack.is_empty() && seen_root).then_some(dom)
}

fn current(stack: &[(ArenaNodeId, Vec<u8>)], document: ArenaNodeId) -> ArenaNodeId {
    stack.last().map(|(id, _)| *id).unwrap_or(document)
}

/// Parent for a new element, rejecting a second root element.
fn open_parent(
    stack: &[(ArenaNodeId, Vec<u8>)],
    document: ArenaNodeId,
    seen_root: &mut bool,
) -> Option<ArenaNodeId> {
    if stack.is_empty() {
        if *seen_root {
            return None;
        }
        *seen_root = true;
        return Some(document);
    }
    Some(current(stack, document))
}

/// Append character data to the open element. Only whitespace may appear
/// outside the root element.
fn push_text(dom: &mut ArenaDom, stack: &[(ArenaNodeId, Vec<u8>)], text: &str) -> Option<()> {
    match stack.last() {
        Some((parent, _)) => {
            dom.append_text(*parent, text);
            Some(())
        }
        None => text.chars().all(char::is_whitespace).then_some(()),
    }
}

fn create_element(dom: &mut ArenaDom, start: &BytesStart<'_>) -> Option<ArenaNodeId> {
    let qname = start.name();
    let tag = std::str::from_utf8(qname.as_ref()).ok()?;
    let name = QualName::new(None, ns!(html), LocalName::from(fold_name(tag).as_str()));

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.ok()?;
        let key = std::str::from_utf8(attr.key.as_ref()).ok()?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let raw = std::str::from_utf8(&attr.value).ok()?;
        attrs.push(Attribute::new(&fold_name(key), unescape(raw)?));
    }

    Some(dom.create_element(name, attrs))
}

/// Drop any namespace prefix and ASCII-lowercase, so XHTML uses the HTML
/// tag vocabulary.
fn fold_name(name: &str) -> String {
    let local = name.rsplit_once(':').map(|(_, l)| l).unwrap_or(name);
    local.to_ascii_lowercase()
}

/// Resolve the body of a `&...;` reference. Only the predefined XML
/// entities and numeric character references are known.
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Decode entity and character references in an attribute value.
fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = after.find(';')?;
        out.push(resolve_entity(&after[..semi])?);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Some(out)
}
