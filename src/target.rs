//! The "glowing" bonus target: always an unfound item, or unset.

use fastrand::Rng;
use tracing::debug;

use crate::registry::{ItemId, ItemRegistry};

#[derive(Clone, Debug, Default)]
pub struct TargetSelector {
    current: Option<ItemId>,
}

impl TargetSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ItemId> {
        self.current
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Play entry: uniform pick among all unfound items.
    pub fn pick_initial(&mut self, registry: &ItemRegistry, rng: &mut Rng) -> Option<ItemId> {
        self.current = pick(registry, None, rng);
        debug!(target_item = ?self.current, "initial target");
        self.current
    }

    /// Call after `clicked` was marked found. Only a consumed target moves.
    pub fn reseed_after_click(
        &mut self,
        clicked: ItemId,
        registry: &ItemRegistry,
        rng: &mut Rng,
    ) -> Option<ItemId> {
        if self.current == Some(clicked) {
            self.current = pick(registry, Some(clicked), rng);
            debug!(clicked, target_item = ?self.current, "target consumed, reseeded");
        }
        self.current
    }
}

fn pick(registry: &ItemRegistry, exclude: Option<ItemId>, rng: &mut Rng) -> Option<ItemId> {
    let candidates: Vec<ItemId> = registry
        .remaining_unfound_ids()
        .filter(|&id| Some(id) != exclude)
        .collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.usize(..candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{ItemSeed, Point};

    fn registry(n: usize) -> ItemRegistry {
        let mut reg = ItemRegistry::new();
        reg.populate(
            (0..n)
                .map(|_| ItemSeed {
                    position: Point::default(),
                    label: None,
                })
                .collect(),
        );
        reg
    }

    #[test]
    fn test_initial_target_on_empty_registry_is_unset() {
        let reg = registry(0);
        let mut sel = TargetSelector::new();
        assert_eq!(sel.pick_initial(&reg, &mut Rng::with_seed(1)), None);
    }

    #[test]
    fn test_non_target_click_keeps_target() {
        let mut reg = registry(5);
        let mut rng = Rng::with_seed(2);
        let mut sel = TargetSelector::new();
        let target = sel.pick_initial(&reg, &mut rng).unwrap();
        let other = (target + 1) % 5;
        reg.mark_found(other, 0);
        assert_eq!(sel.reseed_after_click(other, &reg, &mut rng), Some(target));
    }

    #[test]
    fn test_target_click_moves_to_other_unfound_item() {
        let mut reg = registry(3);
        let mut rng = Rng::with_seed(9);
        let mut sel = TargetSelector::new();
        let target = sel.pick_initial(&reg, &mut rng).unwrap();
        reg.mark_found(target, 0);
        let next = sel.reseed_after_click(target, &reg, &mut rng).unwrap();
        assert_ne!(next, target);
        assert!(reg.is_unfound(next));
    }

    #[test]
    fn test_last_target_click_unsets() {
        let mut reg = registry(1);
        let mut rng = Rng::with_seed(4);
        let mut sel = TargetSelector::new();
        assert_eq!(sel.pick_initial(&reg, &mut rng), Some(0));
        reg.mark_found(0, 0);
        assert_eq!(sel.reseed_after_click(0, &reg, &mut rng), None);
        assert_eq!(sel.current(), None);
    }
}
