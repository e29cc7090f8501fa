//! WASM bindings for browser-side text extraction.
//!
//! Exposes the converter to JavaScript via wasm-bindgen. Structural events
//! go to a plain JavaScript callback:
//!
//! ```js
//! const text = htmlToText(html, (parent, kind, name, fields) => {
//!   const node = { id: nextId++, parent, kind, name, ...fields };
//!   nodes.push(node);
//!   return node;
//! }, 0, "text/ch1.html");
//! ```
//!
//! The callback must return an object with an `id` property; that value is
//! passed back as `parent` for nested events. Page markers and table
//! elements learn their end offset later, which is written to the returned
//! object's `end` property.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::events::{Event, EventKind, EventSink, NoEvents, NodeId, SinkError};
use crate::text::{TextOptions, html_to_text};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert markup to text, reporting structure to `callback` if given.
#[wasm_bindgen(js_name = htmlToText)]
pub fn html_to_text_js(
    markup: &str,
    callback: Option<Function>,
    start_offset: Option<usize>,
    file: Option<String>,
) -> Result<String, JsValue> {
    let options = TextOptions::new()
        .with_start_offset(start_offset.unwrap_or(0))
        .with_file(file.unwrap_or_default());

    let result = match callback {
        Some(callback) => html_to_text(markup, JsSink::new(callback), &options),
        None => html_to_text(markup, NoEvents, &options),
    };
    result.map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Sink forwarding events to a JavaScript function.
struct JsSink {
    callback: Function,
    /// Objects returned by the callback, indexed by `NodeId`.
    nodes: Vec<Object>,
}

impl JsSink {
    fn new(callback: Function) -> Self {
        Self {
            callback,
            nodes: Vec::new(),
        }
    }

    fn node(&self, id: NodeId) -> Result<&Object, SinkError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.nodes.get(i))
            .ok_or_else(|| format!("unknown node {id}").into())
    }
}

fn js_error(err: JsValue) -> SinkError {
    err.as_string()
        .unwrap_or_else(|| format!("{err:?}"))
        .into()
}

fn set(target: &Object, key: &str, value: impl Into<JsValue>) -> Result<(), SinkError> {
    Reflect::set(target, &JsValue::from_str(key), &value.into()).map_err(js_error)?;
    Ok(())
}

fn fields(event: &Event) -> Result<Object, SinkError> {
    let fields = Object::new();
    set(&fields, "start", event.start as f64)?;
    if let Some(end) = event.end {
        set(&fields, "end", end as f64)?;
    }
    match &event.kind {
        EventKind::Id => {}
        EventKind::Page { pagenum } => {
            let value = pagenum.as_deref().map(JsValue::from_str).unwrap_or(JsValue::NULL);
            set(&fields, "pagenum", value)?;
        }
        EventKind::Heading { tag, level } => {
            set(&fields, "tag", tag.as_str())?;
            set(&fields, "level", *level)?;
        }
        EventKind::Link { href } => set(&fields, "href", href.as_str())?,
        EventKind::Table { attrs, .. } => {
            let map = Object::new();
            for (key, value) in attrs {
                set(&map, key, value.as_str())?;
            }
            set(&fields, "attrs", map)?;
        }
    }
    Ok(fields)
}

impl EventSink for JsSink {
    fn register(&mut self, event: Event) -> Result<NodeId, SinkError> {
        let parent = match event.parent {
            Some(parent) => Reflect::get(self.node(parent)?, &JsValue::from_str("id"))
                .map_err(js_error)?,
            None => JsValue::NULL,
        };
        let name = event
            .name
            .as_deref()
            .map(JsValue::from_str)
            .unwrap_or(JsValue::NULL);

        let args = Array::of4(
            &parent,
            &JsValue::from_str(event.kind.name()),
            &name,
            &fields(&event)?,
        );
        let returned = self
            .callback
            .apply(&JsValue::NULL, &args)
            .map_err(js_error)?;

        let node: Object = returned
            .dyn_into()
            .map_err(|_| "callback must return an object with an `id`")?;
        let id = Reflect::get(&node, &JsValue::from_str("id")).map_err(js_error)?;
        if id.is_undefined() || id.is_null() {
            return Err("callback result has no `id`".into());
        }

        self.nodes.push(node);
        Ok(NodeId(self.nodes.len() as u64 - 1))
    }

    fn set_end(&mut self, id: NodeId, end: usize) -> Result<(), SinkError> {
        set(self.node(id)?, "end", end as f64)
    }
}
