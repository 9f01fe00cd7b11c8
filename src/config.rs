//! Game configuration.
//!
//! Every struct is `#[serde(default)]` with camelCase keys, so JS can hand over a
//! partial object (e.g. `{"items":{"count":4}}`) and only override what it names.

use serde::{Deserialize, Serialize};

use crate::error::{FinderError, FinderResult};
use crate::placement::Point;

/// Upper bound on items per session, whatever the count policy.
pub const MAX_ITEMS: usize = 500;
/// Upper bound on `maxIterations`.
pub const MAX_ITERATIONS: u32 = 10_000;

/// Top-level configuration for one game instance (read-only once the game runs).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub items: ItemsConfig,
    pub scoring: ScoringConfig,
    /// Number of high scores kept and displayed.
    pub high_score_count: usize,
    /// Displayed item edge length; half of it is the placement margin.
    pub item_size: f64,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            items: ItemsConfig::default(),
            scoring: ScoringConfig::default(),
            high_score_count: 3,
            item_size: 100.0,
            canvas_width: 600,
            canvas_height: 800,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> FinderResult<Self> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> FinderResult<()> {
        if self.high_score_count == 0 {
            return Err(FinderError::Config("highScoreCount must be at least 1".into()));
        }
        if !self.item_size.is_finite() || self.item_size <= 0.0 {
            return Err(FinderError::Config(format!(
                "itemSize must be positive, got {}",
                self.item_size
            )));
        }
        if !self.items.min_distance.is_finite() || self.items.min_distance < 0.0 {
            return Err(FinderError::Config(format!(
                "minDistance must be a non-negative number, got {}",
                self.items.min_distance
            )));
        }
        if self.scoring.points_per == 0 {
            return Err(FinderError::Config("pointsPer must be at least 1".into()));
        }
        if let Some(fixed) = &self.items.fixed {
            if fixed.iter().flatten().any(|c| !c.is_finite()) {
                return Err(FinderError::Config("fixed coordinates must be finite".into()));
            }
        }
        if self.items.max_iterations > MAX_ITERATIONS {
            return Err(FinderError::Config(format!(
                "maxIterations must be at most {MAX_ITERATIONS}, got {}",
                self.items.max_iterations
            )));
        }
        let requested = match self.items.count_policy() {
            CountPolicy::Words(words) => words.len(),
            CountPolicy::Fixed(points) => points.len(),
            CountPolicy::Count(n) => n as usize,
            CountPolicy::Range { max, .. } => max as usize,
        };
        if requested > MAX_ITEMS {
            return Err(FinderError::Config(format!(
                "at most {MAX_ITEMS} items per session, got {requested}"
            )));
        }
        Ok(())
    }

    /// Distance kept between generated positions and the canvas edge.
    pub fn margin(&self) -> f64 {
        self.item_size / 2.0
    }
}

/// Item generation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemsConfig {
    /// Explicit item count. `None` draws from `[min_count, max_count]`.
    pub count: Option<u32>,
    pub min_count: u32,
    pub max_count: u32,
    pub min_distance: f64,
    /// Redraws allowed per item before a too-close candidate is accepted.
    pub max_iterations: u32,
    /// Word-tagging mode: one item per word, in order.
    pub words: Option<Vec<String>>,
    /// Same as `words`, given as one whitespace-separated string.
    pub token_string: Option<String>,
    /// Fixed coordinates: one item per `[x, y]`.
    pub fixed: Option<Vec<[f64; 2]>>,
    pub season: Option<String>,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            count: None,
            min_count: 10,
            max_count: 20,
            min_distance: 100.0,
            max_iterations: 100,
            words: None,
            token_string: None,
            fixed: None,
            season: None,
        }
    }
}

/// How many items a session gets, and where their positions come from.
#[derive(Clone, Debug, PartialEq)]
pub enum CountPolicy {
    Words(Vec<String>),
    Fixed(Vec<Point>),
    Count(u32),
    Range { min: u32, max: u32 },
}

impl ItemsConfig {
    /// Resolve the count policy in priority order: words, fixed coordinates, explicit
    /// count, random range.
    pub fn count_policy(&self) -> CountPolicy {
        if let Some(words) = &self.words {
            return CountPolicy::Words(words.clone());
        }
        if let Some(tokens) = &self.token_string {
            return CountPolicy::Words(tokens.split_whitespace().map(str::to_owned).collect());
        }
        if let Some(fixed) = &self.fixed {
            return CountPolicy::Fixed(fixed.iter().map(|&[x, y]| Point::new(x, y)).collect());
        }
        if let Some(count) = self.count {
            return CountPolicy::Count(count);
        }
        let (min, max) = if self.min_count <= self.max_count {
            (self.min_count, self.max_count)
        } else {
            (self.max_count, self.min_count)
        };
        CountPolicy::Range { min, max }
    }

    /// Image key for the item sprite, themed by season.
    pub fn asset_key(&self) -> &'static str {
        match self.season.as_deref() {
            Some("halloween") => "pumpkin",
            Some("valentine") => "item",
            _ => "item",
        }
    }
}

/// Where the order bonus reads the click's sequence position from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderRule {
    /// Number of items found before this click (0-based).
    #[default]
    ClickRank,
    /// Whole seconds elapsed on the session clock.
    Elapsed,
}

/// Source of the "correct" click sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpectedOrder {
    None,
    /// Creation order (ids ascending); in word mode this is reading order.
    #[default]
    Placement,
    Shuffled,
}

/// Scoring policies. All of them may be active at once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    pub points_per: u32,
    /// Target clicks earn `points_per * bonus_pts_modifier` instead of `points_per`.
    pub bonus_pts_modifier: u32,
    pub target_bonus: bool,
    pub order_bonus: bool,
    pub order_rule: OrderRule,
    pub expected_order: ExpectedOrder,
    /// Final-score factor for a perfect game; `None` disables it.
    pub perfect_multiplier: Option<u32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per: 10,
            bonus_pts_modifier: 5,
            target_bonus: true,
            order_bonus: false,
            order_rule: OrderRule::ClickRank,
            expected_order: ExpectedOrder::Placement,
            perfect_multiplier: Some(3),
        }
    }
}
