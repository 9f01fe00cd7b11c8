//! Authoritative per-item state for one play session.

use crate::placement::{ItemSeed, Point};

/// Stable 0-based item index, assigned at creation.
pub type ItemId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub position: Point,
    pub label: Option<String>,
    pub found: bool,
    /// Rank at which the item was clicked (0 = first find).
    pub click_order: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
    remaining: usize,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all items; every item starts unfound.
    pub fn populate(&mut self, seeds: Vec<ItemSeed>) {
        self.items = seeds
            .into_iter()
            .enumerate()
            .map(|(id, seed)| Item {
                id,
                position: seed.position,
                label: seed.label,
                found: false,
                click_order: None,
            })
            .collect();
        self.remaining = self.items.len();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.remaining = 0;
    }

    /// The only place `found` flips. Returns false without touching anything when
    /// `id` is out of range or already found.
    pub fn mark_found(&mut self, id: ItemId, order: usize) -> bool {
        match self.items.get_mut(id) {
            Some(item) if !item.found => {
                item.found = true;
                item.click_order = Some(order);
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_unfound(&self, id: ItemId) -> bool {
        self.items.get(id).is_some_and(|item| !item.found)
    }

    pub fn remaining_unfound_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().filter(|item| !item.found).map(|item| item.id)
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining
    }

    pub fn found_count(&self) -> usize {
        self.items.len() - self.remaining
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(n: usize) -> Vec<ItemSeed> {
        (0..n)
            .map(|i| ItemSeed {
                position: Point::new(i as f64 * 10.0, 0.0),
                label: None,
            })
            .collect()
    }

    #[test]
    fn test_populate_assigns_ids_and_resets() {
        let mut reg = ItemRegistry::new();
        reg.populate(seeds(3));
        reg.mark_found(1, 0);
        reg.populate(seeds(4));
        assert_eq!(reg.remaining_count(), 4);
        assert!(reg.items().iter().all(|i| !i.found && i.click_order.is_none()));
        assert_eq!(reg.items().iter().map(|i| i.id).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_mark_found_is_idempotent() {
        let mut reg = ItemRegistry::new();
        reg.populate(seeds(3));
        assert!(reg.mark_found(2, 0));
        assert!(!reg.mark_found(2, 1));
        assert_eq!(reg.remaining_count(), 2);
        assert_eq!(reg.get(2).unwrap().click_order, Some(0));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut reg = ItemRegistry::new();
        reg.populate(seeds(2));
        assert!(!reg.mark_found(9, 0));
        assert_eq!(reg.remaining_count(), 2);
        assert!(!reg.is_unfound(9));
    }

    #[test]
    fn test_unfound_view_tracks_state() {
        let mut reg = ItemRegistry::new();
        reg.populate(seeds(4));
        reg.mark_found(0, 0);
        reg.mark_found(3, 1);
        assert_eq!(reg.remaining_unfound_ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(reg.found_count(), 2);
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.remaining_count(), 0);
    }
}
