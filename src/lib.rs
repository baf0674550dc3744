//! Lash Academy core crate.
//!
//! Two browser widgets for eyelash-extension training: a contraindication
//! card board and an eye-mapping matching game. Game and board logic live in
//! platform-independent modules that run under native `cargo test`; the
//! `dom` module wires them to the page through `web-sys`.

use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod content;
mod dom;
pub mod error;
pub mod game;
pub mod timer;

pub use board::{ContraindicationBoard, IntersectionReport, VisibilityObserver};
pub use config::{BoardConfig, GameConfig};
pub use content::{CONTRAINDICATIONS, Catalog, EYE_SHAPES, MAPPING_STYLES};
pub use error::{ConfigError, ContentError, GameError};
pub use game::{DropOutcome, Feedback, MappingGame, ShapeStatus};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    {
        // A second init (e.g. module re-instantiated by a test runner) is harmless.
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// -----------------------------------------------------------------------------
// Mapping game
// -----------------------------------------------------------------------------

/// Render the mapping game into the element with id `root_id`.
///
/// `config_json` and `catalog_json` are optional; when absent the defaults and
/// the compiled content tables are used.
#[wasm_bindgen]
pub fn start_mapping_game(
    root_id: &str,
    config_json: Option<String>,
    catalog_json: Option<String>,
) -> Result<(), JsValue> {
    let config = GameConfig::from_json(config_json.as_deref()).map_err(js_err)?;
    let catalog = match catalog_json.as_deref() {
        Some(json) => Catalog::from_json(json).map_err(js_err)?,
        None => Catalog::default(),
    };
    dom::mapping_view::mount(root_id, config, catalog)
}

#[wasm_bindgen]
pub fn stop_mapping_game() {
    dom::mapping_view::unmount();
}

#[wasm_bindgen]
pub fn reset_mapping_game() {
    dom::mapping_view::reset();
}

/// Current score, or `None` when the game is not mounted.
#[wasm_bindgen]
pub fn mapping_game_score() -> Option<u32> {
    dom::mapping_view::score()
}

// -----------------------------------------------------------------------------
// Contraindication board
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_contraindication_board(root_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    let config = BoardConfig::from_json(config_json.as_deref()).map_err(js_err)?;
    dom::board_view::mount(root_id, config)
}

#[wasm_bindgen]
pub fn stop_contraindication_board() {
    dom::board_view::unmount();
}

/// The compiled eye-shape and mapping-style tables as JSON, in the format
/// `start_mapping_game` accepts.
#[wasm_bindgen]
pub fn catalog_json() -> Result<String, JsValue> {
    Catalog::default().to_json().map_err(js_err)
}
