//! Item placement: resolves how many items a session gets and scatters them over the
//! canvas without overlap, on a best-effort basis.

use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CountPolicy, ItemsConfig, MAX_ITEMS, MAX_ITERATIONS};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Everything needed to create one item: where it goes and its optional word.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemSeed {
    pub position: Point,
    pub label: Option<String>,
}

/// Rectangle candidates are drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Bounds {
    fn axis(rng: &mut Rng, extent: f64, margin: f64) -> f64 {
        let span = extent - 2.0 * margin;
        if span <= 0.0 {
            // Canvas smaller than one item: pin to the centre line.
            return extent / 2.0;
        }
        margin + rng.f64() * span
    }

    fn draw(&self, rng: &mut Rng) -> Point {
        Point::new(
            Self::axis(rng, self.width, self.margin),
            Self::axis(rng, self.height, self.margin),
        )
    }
}

/// True when `candidate` keeps at least `min_distance` from every placed point.
pub fn is_position_valid(candidate: &Point, placed: &[Point], min_distance: f64) -> bool {
    placed.iter().all(|p| p.distance(candidate) >= min_distance)
}

/// Produce item seeds for one session. Never fails: an exhausted retry budget
/// accepts the last candidate, and an empty word list yields no items.
pub fn generate(config: &ItemsConfig, bounds: Bounds, rng: &mut Rng) -> Vec<ItemSeed> {
    match config.count_policy() {
        CountPolicy::Fixed(points) => points
            .into_iter()
            .map(|position| ItemSeed {
                position,
                label: None,
            })
            .collect(),
        CountPolicy::Words(words) => {
            let positions = scatter(words.len(), config, bounds, rng);
            words
                .into_iter()
                .zip(positions)
                .map(|(word, position)| ItemSeed {
                    position,
                    label: Some(word),
                })
                .collect()
        }
        CountPolicy::Count(n) => unlabeled(scatter(n as usize, config, bounds, rng)),
        CountPolicy::Range { min, max } => {
            let n = rng.u32(min..=max);
            unlabeled(scatter(n as usize, config, bounds, rng))
        }
    }
}

fn unlabeled(positions: Vec<Point>) -> Vec<ItemSeed> {
    positions
        .into_iter()
        .map(|position| ItemSeed {
            position,
            label: None,
        })
        .collect()
}

// Configs that skipped `validate` are clamped here so placement stays bounded.
fn scatter(count: usize, config: &ItemsConfig, bounds: Bounds, rng: &mut Rng) -> Vec<Point> {
    let count = count.min(MAX_ITEMS);
    let max_iterations = config.max_iterations.min(MAX_ITERATIONS);
    let mut placed: Vec<Point> = Vec::with_capacity(count);
    let mut overlaps = 0usize;
    for _ in 0..count {
        let mut candidate = bounds.draw(rng);
        let mut attempts = 0;
        while !is_position_valid(&candidate, &placed, config.min_distance) {
            if attempts >= max_iterations {
                overlaps += 1;
                break;
            }
            candidate = bounds.draw(rng);
            attempts += 1;
        }
        placed.push(candidate);
    }
    if overlaps > 0 {
        debug!(
            overlaps,
            count,
            min_distance = config.min_distance,
            "placement retry budget exhausted, accepting overlaps"
        );
    }
    placed
}
