//! Browser glue: builds the widget markup with `web-sys` and forwards DOM
//! events into the platform-independent cores in [`crate::game`] and
//! [`crate::board`]. Styling is left to the host page's stylesheet; elements
//! only carry class names and the `hidden` attribute.

pub(crate) mod board_view;
pub(crate) mod mapping_view;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, window};

use crate::content::image_or_placeholder;

pub(crate) fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Element the widget renders into; its previous children are replaced.
pub(crate) fn mount_root(doc: &Document, root_id: &str) -> Result<Element, JsValue> {
    let root = doc
        .get_element_by_id(root_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{root_id}`")))?;
    root.set_inner_html("");
    Ok(root)
}

pub(crate) fn element(doc: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub(crate) fn text_element(
    doc: &Document,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<Element, JsValue> {
    let el = element(doc, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

/// Append a freshly built child, passing its construction error through.
pub(crate) fn append(parent: &Element, child: Result<Element, JsValue>) -> Result<Element, JsValue> {
    let child = child?;
    parent.append_child(&child)?;
    Ok(child)
}

pub(crate) fn image(doc: &Document, src: &str, alt: &str, class: &str) -> Result<Element, JsValue> {
    let img = element(doc, "img", class)?;
    img.set_attribute("src", image_or_placeholder(src))?;
    img.set_attribute("alt", alt)?;
    // Only the surrounding card is draggable.
    img.set_attribute("draggable", "false")?;
    Ok(img)
}

pub(crate) fn set_hidden(el: &Element, hidden: bool) {
    let _ = if hidden {
        el.set_attribute("hidden", "")
    } else {
        el.remove_attribute("hidden")
    };
}

pub(crate) fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Attach a listener that is allowed to call `prevent_default`. Listeners
/// are removed when the returned handle is dropped.
pub(crate) fn on<F>(target: &EventTarget, event_type: &'static str, callback: F) -> EventListener
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions::enable_prevent_default(),
        callback,
    )
}

/// Enter or Space on a focused element, the keyboard stand-in for a click.
pub(crate) fn is_activation_key(evt: &Event) -> bool {
    evt.dyn_ref::<KeyboardEvent>()
        .map(|k| matches!(k.key().as_str(), "Enter" | " "))
        .unwrap_or(false)
}

pub(crate) fn is_escape_key(evt: &Event) -> bool {
    evt.dyn_ref::<KeyboardEvent>()
        .map(|k| k.key() == "Escape")
        .unwrap_or(false)
}
