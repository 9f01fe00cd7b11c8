//! Browser shell: canvas, images, pointer input, the one-second clock and the
//! animation loop. All game rules live in [`crate::game::Game`]; this module only
//! forwards DOM events into it and paints the result.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, window};

use crate::config::GameConfig;
use crate::error::{FinderError, FinderResult};
use crate::game::Game;
use crate::session::SessionState;

pub mod canvas_stage;
pub mod effects;
pub mod screens;
pub mod storage;

pub use canvas_stage::CanvasStage;
pub use storage::LocalStore;

use effects::Sparkle;
use screens::{Images, PlayView};

const CANVAS_ID: &str = "hf-canvas";
const IMAGE_KEYS: [&str; 5] = ["background", "startscreen", "item", "pumpkin", "sparkle"];
const CLOCK_INTERVAL_MS: i32 = 1000;

type WebGame = Game<CanvasStage, LocalStore>;

/// Live interval registration; the closure must outlive the JS timer.
struct IntervalClock {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

struct SceneState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: Images,
    game: WebGame,
    sparkles: Vec<Sparkle>,
    clock: Option<IntervalClock>,
}

thread_local! {
    static SCENE: RefCell<Option<SceneState>> = const { RefCell::new(None) };
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            warn!(%err, "getrandom failed, seeding from performance.now()");
            now_ms().to_bits()
        }
    }
}

fn dom_err(err: JsValue) -> FinderError {
    FinderError::Dom(format!("{err:?}"))
}

pub fn start(config: GameConfig) -> FinderResult<()> {
    let win = window().ok_or_else(|| FinderError::Dom("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| FinderError::Dom("no document".into()))?;

    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el.dyn_into().map_err(|_| FinderError::Dom("not a canvas".into()))?,
        None => {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")
                .map_err(dom_err)?
                .dyn_into()
                .map_err(|_| FinderError::Dom("not a canvas".into()))?;
            c.set_id(CANVAS_ID);
            c.set_attribute(
                "style",
                "display:block; margin:0 auto; border:2px solid #222; border-radius:12px;",
            )
            .ok();
            let body = doc
                .body()
                .ok_or_else(|| FinderError::Dom("no body".into()))?;
            body.append_child(&c).map_err(dom_err)?;
            c
        }
    };
    canvas.set_width(config.canvas_width);
    canvas.set_height(config.canvas_height);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(dom_err)?
        .ok_or_else(|| FinderError::Dom("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| FinderError::Dom("not a 2d context".into()))?;

    let mut images: Images = HashMap::new();
    for key in IMAGE_KEYS {
        let img = HtmlImageElement::new().map_err(dom_err)?;
        img.set_src(&format!("assets/images/{key}.png"));
        images.insert(key, img);
    }

    let stage = CanvasStage::new(
        f64::from(config.canvas_width),
        f64::from(config.canvas_height),
        config.item_size,
    );
    let game = Game::new(config, stage, LocalStore::from_window(), entropy_seed());

    let scene = SceneState {
        canvas: canvas.clone(),
        ctx,
        images,
        game,
        sparkles: Vec::new(),
        clock: None,
    };
    // A second start_game replaces the previous scene; the canvas listener and the
    // frame loop from the first call keep running and pick up the new state.
    let replaced = SCENE.with(|cell| {
        let old = cell.replace(None);
        let replaced = old.is_some();
        if let Some(mut old) = old {
            old.stop_clock();
        }
        cell.replace(Some(scene));
        replaced
    });
    if replaced {
        info!("holiday finder reconfigured");
        return Ok(());
    }

    // Pointer-down dispatch
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = evt.offset_x() as f64;
            let y = evt.offset_y() as f64;
            SCENE.with(|cell| {
                if let Some(scene) = cell.borrow_mut().as_mut() {
                    scene.on_pointer_down(x, y);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        closure.forget();
    }

    start_frame_loop();
    info!("holiday finder started");
    Ok(())
}

impl SceneState {
    fn bounds(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn on_pointer_down(&mut self, x: f64, y: f64) {
        let (w, h) = self.bounds();
        match self.game.session().state() {
            SessionState::Start => {
                if screens::play_button(w, h).contains(x, y) {
                    self.begin_play();
                }
            }
            SessionState::Play => {
                let Some(id) = self.game.stage().hit_test(x, y) else {
                    return;
                };
                let Some(outcome) = self.game.on_item_clicked(id) else {
                    return;
                };
                if outcome.delta.hit_target {
                    self.sparkles
                        .push(Sparkle::new(outcome.position.x, outcome.position.y, now_ms()));
                }
                if outcome.finished.is_some() {
                    self.stop_clock();
                }
            }
            SessionState::GameOver => {
                let rows = self.game.high_scores().len();
                let perfect = self.game.last_result().is_some_and(|r| r.perfect);
                if screens::game_over_layout(w, perfect, rows)
                    .play_again
                    .contains(x, y)
                {
                    self.begin_play();
                }
            }
        }
    }

    fn begin_play(&mut self) {
        self.stop_clock();
        self.sparkles.clear();
        self.game.play();
        if let Err(err) = self.start_clock() {
            warn!(%err, "session clock not started");
        }
    }

    fn start_clock(&mut self) -> FinderResult<()> {
        let win = window().ok_or_else(|| FinderError::Dom("no window".into()))?;
        let callback = Closure::wrap(Box::new(move || {
            SCENE.with(|cell| {
                if let Some(scene) = cell.borrow_mut().as_mut() {
                    scene.game.tick();
                }
            });
        }) as Box<dyn FnMut()>);
        let handle = win
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                CLOCK_INTERVAL_MS,
            )
            .map_err(dom_err)?;
        self.clock = Some(IntervalClock {
            handle,
            _callback: callback,
        });
        debug!(handle, "session clock started");
        Ok(())
    }

    /// Safe to call repeatedly.
    fn stop_clock(&mut self) {
        if let Some(clock) = self.clock.take() {
            if let Some(win) = window() {
                win.clear_interval_with_handle(clock.handle);
            }
            debug!(handle = clock.handle, "session clock stopped");
        }
    }

    fn frame(&mut self, now: f64) {
        if self.game.update().is_some() {
            self.stop_clock();
        }
        self.sparkles.retain(|s| !s.is_done(now));

        let (w, h) = self.bounds();
        let session = self.game.session();
        match session.state() {
            SessionState::Start => screens::draw_start(&self.ctx, &self.images, w, h),
            SessionState::Play => {
                let view = PlayView {
                    stage: self.game.stage(),
                    target: self.game.highlighted_target(),
                    sparkles: &self.sparkles,
                    elapsed: session.elapsed(),
                    score: session.score(),
                    now,
                };
                screens::draw_play(&self.ctx, &self.images, w, h, &view);
            }
            SessionState::GameOver => {
                let scores = self.game.high_scores();
                screens::draw_game_over(&self.ctx, w, h, self.game.last_result(), &scores);
            }
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        SCENE.with(|cell| {
            if let Some(scene) = cell.borrow_mut().as_mut() {
                scene.frame(ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
