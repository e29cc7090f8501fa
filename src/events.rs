//! Structural events reported alongside the extracted text.
//!
//! A conversion hands each heading, link, table cell, anchor id and page
//! marker to an [`EventSink`] the moment its position is known. The sink
//! answers with a [`NodeId`], which later events use as their `parent` and
//! which [`EventSink::set_end`] uses to close page markers and table frames.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error type a sink may return. Any sink error aborts the conversion.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Identifier assigned to an event by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Table-structural element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TableTag {
    Table,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Th,
    Td,
}

impl TableTag {
    /// Classify a lowercase tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "table" => Some(TableTag::Table),
            "thead" => Some(TableTag::Thead),
            "tbody" => Some(TableTag::Tbody),
            "tfoot" => Some(TableTag::Tfoot),
            "tr" => Some(TableTag::Tr),
            "th" => Some(TableTag::Th),
            "td" => Some(TableTag::Td),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableTag::Table => "table",
            TableTag::Thead => "thead",
            TableTag::Tbody => "tbody",
            TableTag::Tfoot => "tfoot",
            TableTag::Tr => "tr",
            TableTag::Th => "th",
            TableTag::Td => "td",
        }
    }
}

/// What an event describes, with the fields specific to that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum EventKind {
    /// An element carrying an `id` attribute.
    Id,
    /// A page marker (`class="pagenum"`).
    Page { pagenum: Option<String> },
    /// A heading, `h1` to `h6`.
    Heading { tag: String, level: u8 },
    /// An anchor with an `href`.
    Link { href: String },
    /// A table-structural element with a copy of its attributes.
    Table {
        tag: TableTag,
        attrs: BTreeMap<String, String>,
    },
}

impl EventKind {
    /// Kind name as reported to callbacks: `id`, `page`, `heading`, `link`,
    /// or the table tag name.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Id => "id",
            EventKind::Page { .. } => "page",
            EventKind::Heading { .. } => "heading",
            EventKind::Link { .. } => "link",
            EventKind::Table { tag, .. } => tag.as_str(),
        }
    }
}

/// A structural event with character offsets into the extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    pub parent: Option<NodeId>,
    pub kind: EventKind,
    /// `file#id` for ids, the marker's id for pages, the raw link text for
    /// links. Headings and tables have no name.
    pub name: Option<String>,
    pub start: usize,
    /// Known at registration for headings and links. Page markers and table
    /// frames get theirs through [`EventSink::set_end`]; ids never have one.
    pub end: Option<usize>,
}

impl Event {
    pub fn new(kind: EventKind, start: usize) -> Self {
        Self {
            parent: None,
            kind,
            name: None,
            start,
            end: None,
        }
    }

    pub fn with_parent(mut self, parent: Option<NodeId>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }
}

/// Receiver of structural events.
///
/// Events arrive synchronously and in document order. Returning an error
/// from either method aborts the conversion and surfaces as
/// [`Error::Sink`](crate::Error::Sink).
pub trait EventSink {
    /// Record an event and return the id descendants should reference.
    fn register(&mut self, event: Event) -> Result<NodeId, SinkError>;

    /// Set the end offset of a previously registered event.
    fn set_end(&mut self, id: NodeId, end: usize) -> Result<(), SinkError>;

    /// Whether this sink wants events at all. Text-only sinks return
    /// `false` so the converter skips building them.
    fn wants_events(&self) -> bool {
        true
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn register(&mut self, event: Event) -> Result<NodeId, SinkError> {
        (**self).register(event)
    }

    fn set_end(&mut self, id: NodeId, end: usize) -> Result<(), SinkError> {
        (**self).set_end(id, end)
    }

    fn wants_events(&self) -> bool {
        (**self).wants_events()
    }
}

/// Sink for text-only conversions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSink for NoEvents {
    fn register(&mut self, _event: Event) -> Result<NodeId, SinkError> {
        Ok(NodeId(0))
    }

    fn set_end(&mut self, _id: NodeId, _end: usize) -> Result<(), SinkError> {
        Ok(())
    }

    fn wants_events(&self) -> bool {
        false
    }
}

/// An event together with the id the [`Recorder`] assigned it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    pub id: NodeId,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub event: Event,
}

/// Sink that keeps every event, numbering them from 1.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    records: Vec<Record>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in registration order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records whose kind name matches `kind` (`"heading"`, `"td"`, ...).
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |r| r.event.kind.name() == kind)
    }

    pub fn get(&self, id: NodeId) -> Option<&Record> {
        let index = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.records.get(index)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl EventSink for Recorder {
    fn register(&mut self, event: Event) -> Result<NodeId, SinkError> {
        let id = NodeId(self.records.len() as u64 + 1);
        self.records.push(Record { id, event });
        Ok(id)
    }

    fn set_end(&mut self, id: NodeId, end: usize) -> Result<(), SinkError> {
        let index = usize::try_from(id.0)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .filter(|&i| i < self.records.len())
            .ok_or_else(|| format!("no event with id {id}"))?;
        self.records[index].event.end = Some(end);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_assigns_sequential_ids() {
        let mut rec = Recorder::new();
        let a = rec.register(Event::new(EventKind::Id, 0)).unwrap();
        let b = rec.register(Event::new(EventKind::Id, 3)).unwrap();
        assert_eq!(a, NodeId(1));
        assert_eq!(b, NodeId(2));
        assert_eq!(rec.get(b).unwrap().event.start, 3);
        assert!(rec.get(NodeId(0)).is_none());
    }

    #[test]
    fn test_recorder_set_end() {
        let mut rec = Recorder::new();
        let page = rec
            .register(Event::new(EventKind::Page { pagenum: None }, 5))
            .unwrap();
        rec.set_end(page, 9).unwrap();
        assert_eq!(rec.get(page).unwrap().event.end, Some(9));
        assert!(rec.set_end(NodeId(7), 1).is_err());
        assert!(rec.set_end(NodeId(0), 1).is_err());
    }

    #[test]
    fn test_kind_names() {
        let table = EventKind::Table {
            tag: TableTag::Td,
            attrs: BTreeMap::new(),
        };
        assert_eq!(table.name(), "td");
        assert_eq!(EventKind::Link { href: "x".into() }.name(), "link");
        assert_eq!(TableTag::from_tag("tfoot"), Some(TableTag::Tfoot));
        assert_eq!(TableTag::from_tag("caption"), None);
    }

    #[test]
    fn test_of_kind_filters() {
        let mut rec = Recorder::new();
        rec.register(Event::new(EventKind::Id, 0)).unwrap();
        rec.register(Event::new(
            EventKind::Heading {
                tag: "h1".into(),
                level: 1,
            },
            0,
        ))
        .unwrap();
        assert_eq!(rec.of_kind("heading").count(), 1);
        assert_eq!(rec.of_kind("id").count(), 1);
        assert_eq!(rec.of_kind("page").count(), 0);
    }

    #[test]
    fn test_no_events_wants_nothing() {
        assert!(!NoEvents.wants_events());
        assert!(Recorder::new().wants_events());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_record_serializes_flat() {
        let mut rec = Recorder::new();
        rec.register(Event::new(EventKind::Link { href: "a.html".into() }, 2).with_end(4))
            .unwrap();
        let json = serde_json::to_value(&rec.records()[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["start"], 2);
        assert_eq!(json["kind"]["type"], "link");
        assert_eq!(json["kind"]["href"], "a.html");
    }
}
