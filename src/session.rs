//! One play-through: state machine, score, items, target and clock.

use fastrand::Rng;

use crate::clock::SessionClock;
use crate::placement::ItemSeed;
use crate::registry::{Item, ItemId, ItemRegistry};
use crate::target::TargetSelector;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Start,
    Play,
    GameOver,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    pub(crate) state: SessionState,
    pub(crate) score: u64,
    pub(crate) registry: ItemRegistry,
    pub(crate) target: TargetSelector,
    pub(crate) clock: SessionClock,
    pub(crate) expected_order: Option<Vec<ItemId>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter Play with a fresh item set. Score and clock start from zero.
    pub fn begin_play(
        &mut self,
        seeds: Vec<ItemSeed>,
        expected_order: Option<Vec<ItemId>>,
        rng: &mut Rng,
    ) {
        self.reset();
        self.registry.populate(seeds);
        self.expected_order = expected_order;
        self.target.pick_initial(&self.registry, rng);
        self.clock.start();
        self.state = SessionState::Play;
    }

    /// Play -> GameOver edge. Returns true only on the call that crosses it.
    pub fn end_play(&mut self) -> bool {
        if self.state != SessionState::Play {
            return false;
        }
        self.clock.stop();
        self.state = SessionState::GameOver;
        true
    }

    /// Drop every per-session value and fall back to Start, so a torn-down
    /// session can never cross into GameOver.
    pub fn reset(&mut self) {
        self.state = SessionState::Start;
        self.score = 0;
        self.clock.reset();
        self.registry.clear();
        self.target.clear();
        self.expected_order = None;
    }

    /// Every item's click rank matches its slot in the expected order.
    pub fn is_perfect(&self) -> bool {
        let Some(expected) = &self.expected_order else {
            return false;
        };
        // nothing clicked, nothing to be perfect about
        !self.registry.is_empty()
            && expected.len() == self.registry.len()
            && self
                .registry
                .items()
                .iter()
                .all(|item| item.click_order.and_then(|rank| expected.get(rank)) == Some(&item.id))
    }

    pub fn tick(&mut self) {
        if self.state == SessionState::Play {
            self.clock.tick();
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn elapsed(&self) -> u32 {
        self.clock.elapsed()
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn remaining_count(&self) -> usize {
        self.registry.remaining_count()
    }

    pub fn items(&self) -> &[Item] {
        self.registry.items()
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn target(&self) -> Option<ItemId> {
        self.target.current()
    }

    pub fn expected_order(&self) -> Option<&[ItemId]> {
        self.expected_order.as_deref()
    }
}
