//! Per-click score deltas and the end-of-session perfect multiplier.
//!
//! Policies compose. A click is worth `points_per`, or `points_per * bonus_pts_modifier`
//! when it hits the current target (replacing, not adding to, the base). With the order
//! bonus enabled, a click that lands on the expected id for its sequence position earns
//! one extra `points_per` on top, so an in-order plain click is worth double.

use tracing::debug;

use crate::config::{OrderRule, ScoringConfig};
use crate::registry::ItemId;
use crate::session::{Session, SessionState};

/// What one accepted click was worth and why.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreDelta {
    pub points: u64,
    pub hit_target: bool,
    /// `None` when the order bonus is off.
    pub in_order: Option<bool>,
}

/// Session result, produced once on the Play -> GameOver edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalScore {
    pub score: u64,
    pub perfect: bool,
    pub elapsed: u32,
}

#[derive(Clone, Debug)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a click and mark the item found. Repeat, out-of-range, and
    /// out-of-play clicks return `None` and change nothing.
    pub fn on_item_clicked(&self, session: &mut Session, id: ItemId) -> Option<ScoreDelta> {
        if session.state != SessionState::Play || !session.registry.is_unfound(id) {
            return None;
        }
        let per = u64::from(self.config.points_per);
        let rank = session.registry.found_count();

        let hit_target = self.config.target_bonus && session.target.current() == Some(id);
        let mut points = if hit_target {
            per * u64::from(self.config.bonus_pts_modifier)
        } else {
            per
        };

        let in_order = self.order_match(session, id, rank);
        if in_order == Some(true) {
            points += per;
        }

        session.registry.mark_found(id, rank);
        session.score += points;
        debug!(id, rank, points, hit_target, ?in_order, score = session.score, "item scored");
        Some(ScoreDelta {
            points,
            hit_target,
            in_order,
        })
    }

    fn order_match(&self, session: &Session, id: ItemId, rank: usize) -> Option<bool> {
        if !self.config.order_bonus {
            return None;
        }
        let expected = session.expected_order.as_deref()?;
        let position = match self.config.order_rule {
            OrderRule::ClickRank => rank,
            OrderRule::Elapsed => session.clock.elapsed() as usize,
        };
        Some(expected.get(position) == Some(&id))
    }

    /// Close the session: cross Play -> GameOver and apply the perfect multiplier.
    /// Returns `None` if the session was not in Play, so the multiplier can never
    /// be applied twice.
    pub fn finish_session(&self, session: &mut Session) -> Option<FinalScore> {
        if !session.end_play() {
            return None;
        }
        let perfect = session.is_perfect();
        if perfect {
            if let Some(factor) = self.config.perfect_multiplier {
                session.score *= u64::from(factor);
            }
        }
        Some(FinalScore {
            score: session.score,
            perfect,
            elapsed: session.elapsed(),
        })
    }
}
