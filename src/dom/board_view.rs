//! DOM view of the contraindication board.

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use super::{
    append, document, element, image, mount_root, set_hidden, text_element, toggle_class,
};
use crate::board::{ContraindicationBoard, IntersectionReport, VisibilityObserver};
use crate::config::BoardConfig;
use crate::content::Contraindication;

const HINT_ICON: &str = "/images/cursor-icon.png";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// `IntersectionObserver` adapter for [`VisibilityObserver`].
struct DomVisibilityObserver {
    observer: IntersectionObserver,
    targets: HashMap<u8, Element>,
    _callback: ObserverCallback,
}

impl DomVisibilityObserver {
    fn new(config: &BoardConfig, targets: HashMap<u8, Element>) -> Result<Self, JsValue> {
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let reports: Vec<IntersectionReport> = entries
                    .iter()
                    .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let card_id = entry
                            .target()
                            .get_attribute("data-card-id")?
                            .parse::<u8>()
                            .ok()?;
                        Some(IntersectionReport {
                            card_id,
                            is_intersecting: entry.is_intersecting(),
                            ratio: entry.intersection_ratio(),
                        })
                    })
                    .collect();
                with_view(|view| {
                    let revealed = view.board.apply_reports(&reports);
                    view.reveal(&revealed);
                });
            },
        )
            as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&config.root_margin_css());
        init.set_threshold(&JsValue::from_f64(config.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            observer,
            targets,
            _callback: callback,
        })
    }
}

impl VisibilityObserver for DomVisibilityObserver {
    fn observe(&mut self, card_id: u8) {
        if let Some(el) = self.targets.get(&card_id) {
            self.observer.observe(el);
        }
    }

    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

struct CardElements {
    id: u8,
    card: Element,
    hint: Element,
}

struct BoardView {
    root: Element,
    board: ContraindicationBoard,
    cards: Vec<CardElements>,
    observer: DomVisibilityObserver,
    hint_timeout: Option<Timeout>,
    listeners: Vec<EventListener>,
}

thread_local! {
    static BOARD_VIEW: RefCell<Option<BoardView>> = RefCell::new(None);
}

fn with_view(f: impl FnOnce(&mut BoardView)) {
    BOARD_VIEW.with(|cell| {
        if let Some(view) = cell.borrow_mut().as_mut() {
            f(view);
        }
    });
}

impl BoardView {
    fn reveal(&self, card_ids: &[u8]) {
        for card in self.cards.iter().filter(|c| card_ids.contains(&c.id)) {
            toggle_class(&card.card, "visible", true);
        }
    }

    fn render_hints(&self) {
        let show = self.board.hints_visible();
        for card in &self.cards {
            set_hidden(&card.hint, !show);
        }
    }

    fn interact(&mut self) {
        if self.board.interact() {
            self.hint_timeout = None;
            self.render_hints();
        }
    }
}

pub(crate) fn mount(root_id: &str, config: BoardConfig) -> Result<(), JsValue> {
    unmount();
    let doc = document()?;
    let root = mount_root(&doc, root_id)?;
    let mut board = ContraindicationBoard::new(config);
    let mut listeners = Vec::new();

    let grid = element(&doc, "div", "ci-grid")?;
    let mut cards = Vec::with_capacity(board.cards().len());
    let mut targets = HashMap::new();
    for (index, item) in board.cards().iter().enumerate() {
        let elements = build_card(&doc, item, board.entrance_delay_ms(index))?;
        // Passive: neither handler cancels the event.
        for event_type in ["mouseenter", "touchstart"] {
            listeners.push(EventListener::new(&elements.card, event_type, |_| {
                with_view(BoardView::interact)
            }));
        }
        grid.append_child(&elements.card)?;
        targets.insert(item.id, elements.card.clone());
        cards.push(elements);
    }
    root.append_child(&grid)?;

    let mut observer = DomVisibilityObserver::new(board.config(), targets)?;
    board.attach(&mut observer);

    let hint_timeout = board.start().map(|token| {
        Timeout::new(board.config().hint_delay_ms, move || {
            with_view(|view| {
                if view.board.hint_timer_fired(token) {
                    view.render_hints();
                }
            });
        })
    });

    let view = BoardView {
        root,
        board,
        cards,
        observer,
        hint_timeout,
        listeners,
    };
    view.render_hints();
    BOARD_VIEW.with(|cell| cell.replace(Some(view)));
    Ok(())
}

pub(crate) fn unmount() {
    let view = BOARD_VIEW.with(|cell| cell.borrow_mut().take());
    if let Some(mut view) = view {
        view.board.teardown();
        view.hint_timeout = None;
        view.observer.disconnect();
        view.listeners.clear();
        view.root.set_inner_html("");
    }
}

fn build_card(doc: &Document, item: &Contraindication, delay_ms: u32) -> Result<CardElements, JsValue> {
    let card = element(doc, "div", "ci-card")?;
    card.set_attribute("data-card-id", &item.id.to_string())?;
    card.set_attribute("style", &format!("transition-delay: {delay_ms}ms;"))?;

    let hint = image(doc, HINT_ICON, "Hover hint", "ci-hint")?;
    set_hidden(&hint, true);
    card.append_child(&hint)?;
    append(&card, text_element(doc, "span", "ci-warning", "WARNING"))?;

    let media = element(doc, "div", "ci-media")?;
    append(&media, image(doc, item.image, item.title, "ci-image"))?;
    card.append_child(&media)?;

    let body = element(doc, "div", "ci-body")?;
    append(&body, text_element(doc, "span", "ci-category", item.category))?;
    append(&body, text_element(doc, "h3", "ci-title", item.title))?;
    card.append_child(&body)?;

    // Revealed by the stylesheet on hover.
    let detail = element(doc, "div", "ci-detail")?;
    append(&detail, text_element(
        doc,
        "h4",
        "",
        "Why is this a contraindication?",
    ))?;
    append(&detail, text_element(doc, "p", "", item.description))?;
    card.append_child(&detail)?;

    Ok(CardElements {
        id: item.id,
        card,
        hint,
    })
}
