//! DOM view of the eye-mapping game.
//!
//! Eye-shape cards can be dragged natively, or selected by click / keyboard
//! and then dropped by activating a mapping-style zone. Every path calls the
//! same two [`MappingGame`] operations.

use std::cell::RefCell;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, DragEvent, Element};

use super::{
    append, document, element, image, is_activation_key, is_escape_key, mount_root, on, set_hidden,
    text_element, toggle_class,
};
use crate::config::GameConfig;
use crate::content::{Catalog, EyeShape, GUIDE_MEMO, MAPPING_GUIDE, MappingStyle, image_or_placeholder};
use crate::error::GameError;
use crate::game::{MappingGame, ShapeStatus};
use crate::timer::TimerToken;

struct ShapeCard {
    id: String,
    card: Element,
    badge: Element,
}

struct MappingView {
    root: Element,
    game: MappingGame,
    config: GameConfig,
    score_badge: Element,
    shape_cards: Vec<ShapeCard>,
    feedback: Element,
    complete: Element,
    zoom: Element,
    zoom_title: Element,
    zoom_image: Element,
    guide: Element,
    // Dropping a Timeout cancels it.
    feedback_timeout: Option<Timeout>,
    listeners: Vec<EventListener>,
}

thread_local! {
    static MAPPING_VIEW: RefCell<Option<MappingView>> = RefCell::new(None);
}

fn with_view(f: impl FnOnce(&mut MappingView)) {
    MAPPING_VIEW.with(|cell| {
        if let Some(view) = cell.borrow_mut().as_mut() {
            f(view);
        }
    });
}

fn report_game_error(err: &GameError) {
    error!("mapping game: {err}");
    if cfg!(debug_assertions) {
        panic!("mapping game: {err}");
    }
}

impl MappingView {
    fn select_shape(&mut self, shape_id: &str) {
        if let Err(err) = self.game.begin_drag(shape_id) {
            report_game_error(&err);
        }
        self.render();
    }

    fn cancel_drag(&mut self) {
        self.game.cancel_drag();
        self.render();
    }

    fn drop_on(&mut self, style_id: &str) {
        match self.game.attempt_drop(style_id) {
            Ok(Some(outcome)) => self.schedule_feedback_clear(outcome.clear_after),
            Ok(None) => {}
            Err(err) => report_game_error(&err),
        }
        self.render();
    }

    fn schedule_feedback_clear(&mut self, token: TimerToken) {
        let timeout = Timeout::new(self.config.feedback_clear_ms, move || {
            with_view(|view| {
                if view.game.expire_feedback(token) {
                    view.render();
                }
            });
        });
        // Replacing the handle cancels the previous drop's timer.
        self.feedback_timeout = Some(timeout);
    }

    fn reset(&mut self) {
        self.feedback_timeout = None;
        self.game.reset();
        self.render();
    }

    fn render(&self) {
        let state = self.game.state();
        self.score_badge.set_text_content(Some(&format!(
            "Score: {}/{}",
            state.score(),
            self.game.total_shapes()
        )));

        for card in &self.shape_cards {
            let matched = self.game.shape_status(&card.id) == ShapeStatus::Matched;
            toggle_class(&card.card, "completed", matched);
            toggle_class(
                &card.card,
                "selected",
                state.dragged_item() == Some(card.id.as_str()),
            );
            set_hidden(&card.badge, !matched);
        }

        match state.feedback() {
            Some(fb) => {
                self.feedback.set_text_content(Some(&fb.explanation));
                toggle_class(&self.feedback, "correct", fb.correct);
                toggle_class(&self.feedback, "incorrect", !fb.correct);
                set_hidden(&self.feedback, false);
            }
            None => set_hidden(&self.feedback, true),
        }

        set_hidden(&self.complete, !self.game.is_complete());

        match state.zoomed_image() {
            Some(zoomed) => {
                self.zoom_title.set_text_content(Some(&zoomed.alt));
                let _ = self
                    .zoom_image
                    .set_attribute("src", image_or_placeholder(&zoomed.src));
                let _ = self.zoom_image.set_attribute("alt", &zoomed.alt);
                set_hidden(&self.zoom, false);
            }
            None => set_hidden(&self.zoom, true),
        }

        set_hidden(&self.guide, !state.show_guide());
    }
}

/// Builds the markup and listeners, then stores the view. Any previous
/// mount is torn down first.
pub(crate) fn mount(root_id: &str, config: GameConfig, catalog: Catalog) -> Result<(), JsValue> {
    unmount();
    let doc = document()?;
    let root = mount_root(&doc, root_id)?;
    let game = MappingGame::new(catalog);
    let mut listeners = Vec::new();

    let container = element(&doc, "div", "lm-game")?;
    root.append_child(&container)?;

    // Header: title, score, guide and restart buttons
    let header = element(&doc, "div", "lm-header")?;
    append(&header, text_element(
        &doc,
        "h1",
        "lm-title",
        "Eyelash Mapping - Choose the Right Technique",
    ))?;
    append(&header, text_element(
        &doc,
        "p",
        "lm-subtitle",
        "Drag and drop the appropriate technique according to the eye morphology",
    ))?;
    let score_badge = text_element(&doc, "span", "lm-score", "")?;
    header.append_child(&score_badge)?;
    let guide_button = text_element(&doc, "button", "lm-button lm-guide-button", "GUIDE")?;
    listeners.push(on(&guide_button, "click", |_| {
        with_view(|view| {
            view.game.open_guide();
            view.render();
        })
    }));
    header.append_child(&guide_button)?;
    let restart_button = text_element(&doc, "button", "lm-button lm-restart", "Restart")?;
    listeners.push(on(&restart_button, "click", |_| with_view(MappingView::reset)));
    header.append_child(&restart_button)?;
    container.append_child(&header)?;

    let feedback = element(&doc, "div", "lm-feedback")?;
    feedback.set_attribute("role", "status")?;
    container.append_child(&feedback)?;

    let total = game.total_shapes();
    let complete = build_complete_overlay(&doc, total, &mut listeners)?;
    container.append_child(&complete)?;

    let (zoom, zoom_title, zoom_image) = build_zoom_modal(&doc, &mut listeners)?;
    container.append_child(&zoom)?;

    let guide = build_guide_modal(&doc, game.catalog(), &mut listeners)?;
    container.append_child(&guide)?;

    let board = element(&doc, "div", "lm-board")?;
    let shapes_column = element(&doc, "div", "lm-shapes")?;
    append(&shapes_column, text_element(&doc, "h2", "", "Eye Morphologies"))?;
    append(&shapes_column, text_element(
        &doc,
        "p",
        "lm-hint",
        "Drag each eye morphology towards the mapping technique you think is most appropriate",
    ))?;
    let mut shape_cards = Vec::with_capacity(total);
    for shape in &game.catalog().eye_shapes {
        let card = build_shape_card(&doc, shape, &mut listeners)?;
        shapes_column.append_child(&card.card)?;
        shape_cards.push(card);
    }
    board.append_child(&shapes_column)?;

    let zones_column = element(&doc, "div", "lm-zones")?;
    append(&zones_column, text_element(&doc, "h2", "", "Mapping Styles"))?;
    append(&zones_column, text_element(
        &doc,
        "p",
        "lm-hint",
        "Click on images to enlarge and see details",
    ))?;
    for style in &game.catalog().mapping_styles {
        append(&zones_column, build_drop_zone(&doc, style, &mut listeners))?;
    }
    board.append_child(&zones_column)?;
    container.append_child(&board)?;

    listeners.push(on(&doc, "keydown", |evt| {
        if is_escape_key(evt) {
            with_view(|view| {
                view.game.close_zoom();
                view.game.close_guide();
                view.render();
            });
        }
    }));

    let view = MappingView {
        root,
        game,
        config,
        score_badge,
        shape_cards,
        feedback,
        complete,
        zoom,
        zoom_title,
        zoom_image,
        guide,
        feedback_timeout: None,
        listeners,
    };
    view.render();
    MAPPING_VIEW.with(|cell| cell.replace(Some(view)));
    Ok(())
}

/// Drops the view: cancels the feedback timer, removes listeners and clears
/// the root element.
pub(crate) fn unmount() {
    let view = MAPPING_VIEW.with(|cell| cell.borrow_mut().take());
    if let Some(mut view) = view {
        view.game.teardown();
        view.feedback_timeout = None;
        view.listeners.clear();
        view.root.set_inner_html("");
    }
}

pub(crate) fn reset() {
    with_view(MappingView::reset);
}

pub(crate) fn score() -> Option<u32> {
    MAPPING_VIEW.with(|cell| cell.borrow().as_ref().map(|v| v.game.state().score()))
}

fn build_shape_card(
    doc: &Document,
    shape: &EyeShape,
    listeners: &mut Vec<EventListener>,
) -> Result<ShapeCard, JsValue> {
    let id = shape.id.to_string();
    let card = element(doc, "div", "lm-shape")?;
    card.set_attribute("draggable", "true")?;
    card.set_attribute("tabindex", "0")?;
    card.set_attribute("data-shape-id", &id)?;

    let img = image(doc, &shape.image, &shape.title, "lm-shape-image")?;
    card.append_child(&img)?;
    let body = element(doc, "div", "lm-shape-body")?;
    append(&body, text_element(doc, "h3", "", &shape.title))?;
    append(&body, text_element(doc, "p", "", &shape.description))?;
    let badge = text_element(doc, "span", "lm-completed-badge", "✓ Completed")?;
    body.append_child(&badge)?;
    card.append_child(&body)?;

    {
        let id = id.clone();
        listeners.push(on(&card, "dragstart", move |evt| {
            if let Some(dt) = evt.dyn_ref::<DragEvent>().and_then(|d| d.data_transfer()) {
                // Firefox refuses to start a drag without data.
                let _ = dt.set_data("text/plain", &id);
                dt.set_effect_allowed("move");
            }
            with_view(|view| view.select_shape(&id));
        }));
    }
    // `dragend` follows `drop`; a "none" effect means no zone accepted it.
    listeners.push(on(&card, "dragend", |evt| {
        let missed = evt
            .dyn_ref::<DragEvent>()
            .and_then(|d| d.data_transfer())
            .is_none_or(|dt| dt.drop_effect() == "none");
        if missed {
            with_view(MappingView::cancel_drag);
        }
    }));
    {
        let id = id.clone();
        listeners.push(on(&card, "click", move |_| {
            with_view(|view| view.select_shape(&id));
        }));
    }
    {
        let id = id.clone();
        listeners.push(on(&card, "keydown", move |evt| {
            if is_activation_key(evt) {
                evt.prevent_default();
                with_view(|view| view.select_shape(&id));
            }
        }));
    }
    {
        let src = shape.image.to_string();
        let alt = shape.title.to_string();
        listeners.push(on(&img, "click", move |evt| {
            evt.stop_propagation();
            with_view(|view| {
                view.game.open_zoom(&src, &alt);
                view.render();
            });
        }));
    }

    Ok(ShapeCard { id, card, badge })
}

fn build_drop_zone(
    doc: &Document,
    style: &MappingStyle,
    listeners: &mut Vec<EventListener>,
) -> Result<Element, JsValue> {
    let id = style.id.to_string();
    let zone = element(doc, "div", "lm-zone")?;
    zone.set_attribute("tabindex", "0")?;
    zone.set_attribute("data-style-id", &id)?;

    let img = image(doc, &style.image, &style.title, "lm-zone-image")?;
    zone.append_child(&img)?;
    let body = element(doc, "div", "lm-zone-body")?;
    append(&body, text_element(doc, "h3", "", &style.title))?;
    append(&body, text_element(doc, "p", "", &style.description))?;
    zone.append_child(&body)?;

    // Without cancelling dragover the browser never fires drop.
    listeners.push(on(&zone, "dragover", |evt| evt.prevent_default()));
    {
        let id = id.clone();
        listeners.push(on(&zone, "drop", move |evt| {
            evt.prevent_default();
            with_view(|view| view.drop_on(&id));
        }));
    }
    {
        let id = id.clone();
        listeners.push(on(&zone, "click", move |_| {
            with_view(|view| view.drop_on(&id));
        }));
    }
    listeners.push(on(&zone, "keydown", move |evt| {
        if is_activation_key(evt) {
            evt.prevent_default();
            with_view(|view| view.drop_on(&id));
        }
    }));
    {
        let src = style.image.to_string();
        let alt = style.title.to_string();
        listeners.push(on(&img, "click", move |evt| {
            evt.stop_propagation();
            with_view(|view| {
                view.game.open_zoom(&src, &alt);
                view.render();
            });
        }));
    }

    Ok(zone)
}

fn build_complete_overlay(
    doc: &Document,
    total: usize,
    listeners: &mut Vec<EventListener>,
) -> Result<Element, JsValue> {
    let overlay = element(doc, "div", "lm-overlay lm-complete")?;
    let panel = element(doc, "div", "lm-panel")?;
    append(&panel, text_element(doc, "h2", "", "🎉 Congratulations!"))?;
    append(&panel, text_element(
        doc,
        "p",
        "",
        &format!("You completed the game with a perfect score of {total}/{total}!"),
    ))?;
    let again = text_element(doc, "button", "lm-button", "Play Again")?;
    listeners.push(on(&again, "click", |_| with_view(MappingView::reset)));
    panel.append_child(&again)?;
    overlay.append_child(&panel)?;
    Ok(overlay)
}

fn build_zoom_modal(
    doc: &Document,
    listeners: &mut Vec<EventListener>,
) -> Result<(Element, Element, Element), JsValue> {
    let modal = element(doc, "div", "lm-overlay lm-zoom")?;
    let panel = element(doc, "div", "lm-panel")?;
    let title = text_element(doc, "h2", "", "")?;
    let img = image(doc, "", "", "lm-zoom-image")?;
    let close = text_element(doc, "button", "lm-close", "×")?;
    panel.append_child(&close)?;
    panel.append_child(&title)?;
    panel.append_child(&img)?;
    modal.append_child(&panel)?;

    let close_zoom = |_: &web_sys::Event| {
        with_view(|view| {
            view.game.close_zoom();
            view.render();
        })
    };
    listeners.push(on(&close, "click", close_zoom));
    listeners.push(on(&modal, "click", move |evt| {
        // Only a click on the backdrop itself closes.
        let on_backdrop = match (evt.target(), evt.current_target()) {
            (Some(t), Some(c)) => t == c,
            _ => false,
        };
        if on_backdrop {
            close_zoom(evt);
        }
    }));
    Ok((modal, title, img))
}

fn build_guide_modal(
    doc: &Document,
    catalog: &Catalog,
    listeners: &mut Vec<EventListener>,
) -> Result<Element, JsValue> {
    let modal = element(doc, "div", "lm-overlay lm-guide")?;
    let panel = element(doc, "div", "lm-panel")?;
    let close = text_element(doc, "button", "lm-close", "×")?;
    listeners.push(on(&close, "click", |_| {
        with_view(|view| {
            view.game.close_guide();
            view.render();
        })
    }));
    panel.append_child(&close)?;
    append(&panel, text_element(doc, "h2", "", "Eyelash Mapping Guide"))?;
    for entry in MAPPING_GUIDE {
        let Some(style) = catalog.style(entry.style_id) else {
            continue;
        };
        let row = element(doc, "div", "lm-guide-entry")?;
        append(&row, text_element(doc, "h3", "", &style.title))?;
        append(&row, text_element(doc, "p", "lm-guide-summary", entry.summary))?;
        append(&row, text_element(doc, "p", "lm-guide-rule", entry.rule))?;
        panel.append_child(&row)?;
    }
    let memo = element(doc, "p", "lm-guide-memo")?;
    append(&memo, text_element(doc, "strong", "", "Memo:"))?;
    append(&memo, text_element(doc, "span", "", &format!(" {GUIDE_MEMO}")))?;
    panel.append_child(&memo)?;
    modal.append_child(&panel)?;
    Ok(modal)
}
