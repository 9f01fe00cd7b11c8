//! Scene-shell controller: owns the session and drives it from play / click / tick /
//! frame events, keeping the stage and the high-score store in sync.

use fastrand::Rng;
use tracing::{debug, info};

use crate::config::{ExpectedOrder, GameConfig};
use crate::high_scores::{HighScoreStore, KeyValueStore};
use crate::placement::{self, Bounds, Point};
use crate::registry::ItemId;
use crate::scoring::{FinalScore, ScoreDelta, ScoringEngine};
use crate::session::{Session, SessionState};
use crate::stage::{Handle, Stage, TextStyle};

/// Vertical offset of a word label below its item sprite.
const LABEL_OFFSET_Y: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickOutcome {
    pub id: ItemId,
    pub delta: ScoreDelta,
    pub position: Point,
    pub new_target: Option<ItemId>,
    /// Set when this click found the last item.
    pub finished: Option<FinalScore>,
}

pub struct Game<S, K> {
    config: GameConfig,
    session: Session,
    scoring: ScoringEngine,
    stage: S,
    high_scores: HighScoreStore<K>,
    rng: Rng,
    /// Live display handles per item id (sprite + optional label).
    handles: Vec<Vec<Handle>>,
    last_result: Option<FinalScore>,
}

impl<S: Stage, K: KeyValueStore> Game<S, K> {
    pub fn new(config: GameConfig, stage: S, store: K, seed: u64) -> Self {
        let scoring = ScoringEngine::new(config.scoring.clone());
        let high_scores = HighScoreStore::new(store, config.high_score_count);
        Self {
            config,
            session: Session::new(),
            scoring,
            stage,
            high_scores,
            rng: Rng::with_seed(seed),
            handles: Vec::new(),
            last_result: None,
        }
    }

    /// Start a play-through from Start or GameOver. Ignored while already playing.
    pub fn play(&mut self) {
        match self.session.state() {
            SessionState::Play => {}
            SessionState::GameOver => self.restart(),
            SessionState::Start => self.begin(),
        }
    }

    /// Throw the current session away and play a fresh one.
    pub fn restart(&mut self) {
        info!(previous_score = self.session.score(), "restart");
        self.reset();
        self.begin();
    }

    /// Tear down every trace of the current session and return to Start. Nothing
    /// is scored or recorded.
    pub fn reset(&mut self) {
        for handle in self.handles.drain(..).flatten() {
            self.stage.destroy(handle);
        }
        self.session.reset();
        self.last_result = None;
    }

    pub fn on_item_clicked(&mut self, id: ItemId) -> Option<ClickOutcome> {
        let delta = self.scoring.on_item_clicked(&mut self.session, id)?;
        if let Some(handles) = self.handles.get_mut(id) {
            for handle in handles.drain(..) {
                self.stage.destroy(handle);
            }
        }
        let new_target = self
            .session
            .target
            .reseed_after_click(id, &self.session.registry, &mut self.rng);
        let position = self
            .session
            .registry
            .get(id)
            .map(|item| item.position)
            .unwrap_or_default();
        let finished = if self.session.remaining_count() == 0 {
            self.finish()
        } else {
            None
        };
        Some(ClickOutcome {
            id,
            delta,
            position,
            new_target,
            finished,
        })
    }

    /// Per-frame check; ends a Play session that has nothing left to find.
    pub fn update(&mut self) -> Option<FinalScore> {
        if self.session.state() == SessionState::Play && self.session.remaining_count() == 0 {
            self.finish()
        } else {
            None
        }
    }

    pub fn tick(&mut self) {
        self.session.tick();
    }

    fn begin(&mut self) {
        let (width, height) = self.stage.bounds();
        let bounds = Bounds {
            width,
            height,
            margin: self.config.margin(),
        };
        let seeds = placement::generate(&self.config.items, bounds, &mut self.rng);
        let expected = self.expected_order(seeds.len());
        self.session.begin_play(seeds, expected, &mut self.rng);
        self.spawn_items();
        info!(
            items = self.session.remaining_count(),
            target_item = ?self.session.target(),
            "play started"
        );
    }

    fn finish(&mut self) -> Option<FinalScore> {
        let result = self.scoring.finish_session(&mut self.session)?;
        self.high_scores.record(result.score);
        info!(
            score = result.score,
            perfect = result.perfect,
            elapsed = result.elapsed,
            "game over"
        );
        self.last_result = Some(result);
        Some(result)
    }

    fn expected_order(&mut self, count: usize) -> Option<Vec<ItemId>> {
        match self.config.scoring.expected_order {
            ExpectedOrder::None => None,
            ExpectedOrder::Placement => Some((0..count).collect()),
            ExpectedOrder::Shuffled => {
                let mut order: Vec<ItemId> = (0..count).collect();
                self.rng.shuffle(&mut order);
                Some(order)
            }
        }
    }

    fn spawn_items(&mut self) {
        let key = self.config.items.asset_key();
        self.handles = self
            .session
            .items()
            .iter()
            .map(|item| {
                let Point { x, y } = item.position;
                let sprite = self.stage.add_image_at(x, y, key);
                self.stage.on_pointer_down(sprite, item.id);
                let mut handles = vec![sprite];
                if let Some(label) = &item.label {
                    handles.push(
                        self.stage
                            .add_text(x, y + LABEL_OFFSET_Y, label, TextStyle::LABEL),
                    );
                }
                handles
            })
            .collect();
        debug!(handles = self.live_handle_count(), "items spawned");
    }

    pub fn live_handle_count(&self) -> usize {
        self.handles.iter().map(Vec::len).sum()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Item to draw with the bonus glow; unset when the target bonus is off.
    pub fn highlighted_target(&self) -> Option<ItemId> {
        self.session
            .target()
            .filter(|_| self.config.scoring.target_bonus)
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn high_scores(&self) -> Vec<u64> {
        self.high_scores.top_n()
    }

    pub fn last_result(&self) -> Option<FinalScore> {
        self.last_result
    }
}
