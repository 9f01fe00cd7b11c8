//! Holiday Finder core crate.
//!
//! A tap-the-hidden-items game: items are scattered over a canvas without overlap,
//! every tap scores, one glowing target item pays a bonus, and clicking everything in
//! the expected order multiplies the final score. The rules engine (placement, item
//! registry, scoring, target selection, clock, high scores) is plain Rust driven
//! through [`game::Game`]; [`scene`] is the thin browser shell around it.

use wasm_bindgen::prelude::*;

pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod high_scores;
pub mod logging;
pub mod placement;
pub mod registry;
pub mod scene;
pub mod scoring;
pub mod session;
pub mod stage;
pub mod target;

pub use config::GameConfig;
pub use error::{FinderError, FinderResult};
pub use game::{ClickOutcome, Game};
pub use high_scores::{HighScoreStore, KeyValueStore, MemoryStore};
pub use registry::{Item, ItemId};
pub use scoring::{FinalScore, ScoreDelta};
pub use session::{Session, SessionState};
pub use stage::{Handle, Stage, TextStyle};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

/// Launch the game on `<canvas id="hf-canvas">`. `config_json` is an optional,
/// possibly partial, camelCase `GameConfig` object.
#[wasm_bindgen]
pub fn start_game(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => GameConfig::from_json(json)?,
        None => GameConfig::default(),
    };
    scene::start(config)?;
    Ok(())
}

/// Persisted high scores, best first (for host pages that render their own table).
#[wasm_bindgen]
pub fn high_scores(capacity: usize) -> Vec<u64> {
    HighScoreStore::new(scene::LocalStore::from_window(), capacity).top_n()
}
