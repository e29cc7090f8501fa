//! Tree walker and structural event emitter.

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId};
use crate::error::{Error, Result};
use crate::events::{Event, EventKind, EventSink, NodeId};
use crate::links::resolve_href;
use crate::pagenum::parse_pagenum;

use super::mode::ContentMode;
use super::tags::{HR_TEXT, PAGENUM_CLASS, TagClass};
use super::whitespace::{BoundarySpace, collapse_whitespace, trim_boundaries};
use super::writer::OffsetWriter;

/// An open heading, or a closed one that later headings may nest under.
#[derive(Debug, Clone, Copy)]
struct HeadingFrame {
    level: u8,
    start: usize,
    /// `None` while the heading is still open.
    id: Option<NodeId>,
}

/// What an element's start did, so its end can undo exactly that.
#[derive(Debug)]
struct ElementFrame {
    class: TagClass,
    pagenum: bool,
    entered_pre: bool,
    entered_ignoring: bool,
    link_start: Option<usize>,
    table_start: Option<usize>,
}

enum Visit {
    Enter(ArenaNodeId),
    Leave(ArenaNodeId, ElementFrame),
}

/// State of one conversion.
pub(crate) struct Converter<'a, S> {
    dom: &'a ArenaDom,
    sink: S,
    /// Whether the sink wants events; when it does not, no event bookkeeping
    /// happens at all.
    events: bool,
    file: &'a str,
    out: OffsetWriter,
    mode: ContentMode,
    /// Separator owed before the next content: `""`, `"\n"` or `"\n\n"`.
    pending: &'static str,
    space: BoundarySpace,
    headings: Vec<HeadingFrame>,
    tables: Vec<NodeId>,
    last_page: Option<NodeId>,
}

impl<'a, S: EventSink> Converter<'a, S> {
    pub(crate) fn new(dom: &'a ArenaDom, sink: S, start_offset: usize, file: &'a str) -> Self {
        let events = sink.wants_events();
        Self {
            dom,
            sink,
            events,
            file,
            out: OffsetWriter::new(start_offset),
            mode: ContentMode::new(),
            pending: "",
            space: BoundarySpace::default(),
            headings: Vec::new(),
            tables: Vec::new(),
            last_page: None,
        }
    }

    /// Walk the subtree at `root` in document order and return the text.
    ///
    /// The walk keeps its own stack, so deeply nested documents cannot
    /// overflow the call stack.
    pub(crate) fn run(mut self, root: ArenaNodeId) -> Result<String> {
        let dom = self.dom;
        let mut stack = vec![Visit::Enter(root)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    let Some(node) = dom.get(id) else { continue };
                    match &node.data {
                        ArenaNodeData::Element { .. } => {
                            let frame = self.start_element(id)?;
                            // An ignored subtree contributes neither text nor events.
                            let descend = !frame.entered_ignoring;
                            stack.push(Visit::Leave(id, frame));
                            if descend {
                                push_children(dom, id, &mut stack);
                            }
                        }
                        ArenaNodeData::Text(text) => self.handle_data(text),
                        ArenaNodeData::Document => push_children(dom, id, &mut stack),
                        ArenaNodeData::Comment(_)
                        | ArenaNodeData::ProcessingInstruction { .. }
                        | ArenaNodeData::Doctype { .. } => {}
                    }
                }
                Visit::Leave(id, frame) => self.end_element(id, frame)?,
            }
        }

        self.finish()
    }

    fn finish(mut self) -> Result<String> {
        if let Some(page) = self.last_page.take() {
            let end = self.out.position();
            self.set_end(page, end, "page")?;
        }
        Ok(self.out.into_string())
    }

    fn start_element(&mut self, id: ArenaNodeId) -> Result<ElementFrame> {
        let dom = self.dom;
        let tag = dom.element_name(id).map(|n| &**n).unwrap_or("");
        let mut frame = ElementFrame {
            class: TagClass::of(tag),
            pagenum: dom.has_class(id, PAGENUM_CLASS),
            entered_pre: false,
            entered_ignoring: false,
            link_start: None,
            table_start: None,
        };

        if frame.pagenum || frame.class == TagClass::Ignored {
            frame.entered_ignoring = self.mode.enter_ignoring();
        } else {
            match frame.class {
                TagClass::Block => {
                    self.pending = "\n\n";
                    self.space.trailing = false;
                }
                TagClass::Heading(level) => {
                    self.pending = "\n\n";
                    if self.events {
                        let start = self.content_start();
                        self.headings.push(HeadingFrame {
                            level,
                            start,
                            id: None,
                        });
                    }
                }
                TagClass::Pre => {
                    self.pending = "\n";
                    frame.entered_pre = self.mode.enter_pre();
                }
                TagClass::DefinitionItem => self.pending = "\n",
                TagClass::Table(tag) if self.events => {
                    let start = self.separator_start();
                    let event = Event::new(
                        EventKind::Table {
                            tag,
                            attrs: dom.attributes(id),
                        },
                        start,
                    )
                    .with_parent(self.tables.last().copied());
                    let node = self.register(event)?;
                    self.tables.push(node);
                    frame.table_start = Some(start);
                }
                _ => {}
            }

            if self.events && tag == "a" && dom.has_attr(id, "href") {
                frame.link_start = Some(self.content_start());
            }
        }

        if self.events
            && let Some(anchor) = dom.element_id(id)
        {
            let start = self.separator_start();
            let name = format!("{}#{}", self.file, anchor);
            self.register(Event::new(EventKind::Id, start).with_name(name))?;
        }

        Ok(frame)
    }

    fn end_element(&mut self, id: ArenaNodeId, frame: ElementFrame) -> Result<()> {
        if frame.pagenum || frame.class == TagClass::Ignored {
            if frame.pagenum && self.events {
                self.close_page(id)?;
            }
            if frame.entered_ignoring {
                self.mode.exit_ignoring();
            }
            return Ok(());
        }

        match frame.class {
            TagClass::Block => self.pending = "\n\n",
            TagClass::LineBreak => self.write_line_text("\n"),
            TagClass::Rule => self.write_line_text(HR_TEXT),
            TagClass::Heading(level) => {
                self.pending = "\n\n";
                if self.events {
                    self.close_heading(id, level)?;
                }
            }
            TagClass::Pre => {
                if frame.entered_pre {
                    self.mode.exit_pre();
                }
            }
            TagClass::Table(_) => {
                if let Some(start) = frame.table_start
                    && let Some(node) = self.tables.pop()
                {
                    let end = self.out.position().max(start);
                    self.set_end(node, end, "table")?;
                }
            }
            _ => {}
        }

        if let Some(start) = frame.link_start {
            self.close_link(id, start)?;
        }
        Ok(())
    }

    /// Feed one text node through the mode and whitespace rules.
    fn handle_data(&mut self, data: &str) {
        if self.mode.ignoring() || data.is_empty() {
            return;
        }

        if self.mode.in_pre() {
            // Preformatted text flushes its separator even at document
            // start and is written exactly as given.
            self.flush_pending();
            self.space = BoundarySpace::default();
            self.write(data);
            return;
        }

        let collapsed = collapse_whitespace(data);
        let fragment = trim_boundaries(&collapsed);
        if fragment.leading {
            self.space.initial = true;
        }
        if fragment.body.is_empty() {
            return;
        }

        // An owed space waits out a queued separator and is paid before the
        // next fragment written without one.
        if self.space.trailing && self.pending.is_empty() {
            if !self.out.ends_with_newline() {
                self.write(" ");
                self.space.initial = false;
            }
            self.space.trailing = false;
        }
        if fragment.trailing {
            self.space.trailing = true;
        }

        if !self.mode.started() {
            self.space.initial = false;
            self.pending = "";
        }
        self.flush_pending();
        if self.space.initial && !self.out.ends_with_newline() {
            self.write(" ");
        }
        self.write(fragment.body);
        self.space.initial = false;
    }

    fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.out.write(text);
        self.mode.mark_writing();
    }

    /// Write `br`/`hr` output directly, leaving any queued separator in
    /// place.
    fn write_line_text(&mut self, text: &str) {
        self.space = BoundarySpace::default();
        self.write(text);
    }

    fn flush_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.write(pending);
    }

    /// Offset the queued separator will end at once content arrives.
    fn separator_start(&self) -> usize {
        let pos = self.out.position();
        if self.mode.started() || self.mode.in_pre() {
            // Separators are ASCII, so bytes and characters agree.
            pos + self.pending.len()
        } else {
            pos
        }
    }

    /// Offset the next content character will land at, counting the queued
    /// separator or an owed space.
    fn content_start(&self) -> usize {
        if !self.pending.is_empty() {
            return self.separator_start();
        }
        let pos = self.out.position();
        let space_owed = self.space.trailing || self.space.initial;
        if space_owed
            && self.mode.started()
            && !self.mode.in_pre()
            && !self.out.ends_with_newline()
        {
            pos + 1
        } else {
            pos
        }
    }

    fn close_heading(&mut self, id: ArenaNodeId, level: u8) -> Result<()> {
        // The innermost open heading is this one. Closed headings nested
        // inside it go with it.
        let Some(open) = self.headings.iter().rposition(|f| f.id.is_none()) else {
            return Ok(());
        };
        let frame = self.headings[open];
        self.headings.truncate(open);

        let end = self.out.position();
        let start = frame.start.min(end);
        while self
            .headings
            .last()
            .is_some_and(|f| f.level >= frame.level)
        {
            self.headings.pop();
        }
        let parent = self.headings.last().and_then(|f| f.id);

        let tag = self
            .dom
            .element_name(id)
            .map(|n| n.to_string())
            .unwrap_or_default();
        let event = Event::new(EventKind::Heading { tag, level }, start)
            .with_parent(parent)
            .with_end(end);
        let node = self.register(event)?;
        self.headings.push(HeadingFrame {
            level: frame.level,
            start,
            id: Some(node),
        });
        Ok(())
    }

    fn close_link(&mut self, id: ArenaNodeId, start: usize) -> Result<()> {
        let end = self.out.position();
        let href = self.dom.get_attr(id, "href").unwrap_or_default();
        let event = Event::new(
            EventKind::Link {
                href: resolve_href(self.file, href),
            },
            start.min(end),
        )
        .with_name(self.dom.text_content(id))
        .with_end(end);
        self.register(event)?;
        Ok(())
    }

    fn close_page(&mut self, id: ArenaNodeId) -> Result<()> {
        let pos = self.out.position();
        if let Some(previous) = self.last_page.take() {
            self.set_end(previous, pos, "page")?;
        }

        let name = self.dom.element_id(id);
        let pagenum = match name {
            Some(name) => parse_pagenum(name),
            None => {
                log::warn!("page marker without an id at offset {pos}");
                None
            }
        };
        let mut event = Event::new(EventKind::Page { pagenum }, pos);
        if let Some(name) = name {
            event = event.with_name(name);
        }
        self.last_page = Some(self.register(event)?);
        Ok(())
    }

    fn register(&mut self, event: Event) -> Result<NodeId> {
        let kind = event.kind.name();
        log::trace!(
            "{kind} event {:?} at {}..{:?}",
            event.name,
            event.start,
            event.end
        );
        self.sink
            .register(event)
            .map_err(|source| Error::Sink { kind, source })
    }

    fn set_end(&mut self, node: NodeId, end: usize, kind: &'static str) -> Result<()> {
        log::trace!("{kind} {node} ends at {end}");
        self.sink
            .set_end(node, end)
            .map_err(|source| Error::Sink { kind, source })
    }
}

fn push_children(dom: &ArenaDom, id: ArenaNodeId, stack: &mut Vec<Visit>) {
    let children: Vec<_> = dom.children(id).collect();
    stack.extend(children.into_iter().rev().map(Visit::Enter));
}
