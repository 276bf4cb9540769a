//! Value cache consulted whenever a repeated group or category item list is regenerated.
//!
//! Entries are keyed by position and are never evicted, so shrinking a group and growing it
//! back brings the old values back.

use std::collections::HashMap;

use showbudget_domain::{CategorySlot, GroupKind, GroupSlot, ItemSlot};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedCategory {
    name: String,
    item_count: String,
}

#[derive(Debug, Clone, Default)]
pub struct GroupStore {
    slots: HashMap<(GroupKind, usize), GroupSlot>,
    categories: HashMap<usize, CachedCategory>,
    items: HashMap<(usize, usize), ItemSlot>,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.categories.clear();
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.categories.is_empty() && self.items.is_empty()
    }

    /// Records every live slot of `kind`, overwriting older entries at the same index.
    pub fn capture_group(&mut self, kind: GroupKind, slots: &[GroupSlot]) {
        for (idx, slot) in slots.iter().enumerate() {
            self.slots.insert((kind, idx + 1), slot.clone());
        }
    }

    /// Copies cached values into freshly materialized slots. Returns how many slots were restored.
    pub fn restore_group(&self, kind: GroupKind, slots: &mut [GroupSlot]) -> usize {
        let mut restored = 0;
        for (idx, slot) in slots.iter_mut().enumerate() {
            if let Some(cached) = self.slots.get(&(kind, idx + 1)) {
                for (member, value) in cached.iter() {
                    slot.set(member, value);
                }
                restored += 1;
            }
        }
        restored
    }

    /// Records every category shell together with its item rows.
    pub fn capture_categories(&mut self, categories: &[CategorySlot]) {
        for (idx, category) in categories.iter().enumerate() {
            let c = idx + 1;
            self.categories.insert(
                c,
                CachedCategory {
                    name: category.name.clone(),
                    item_count: category.item_count.clone(),
                },
            );
            self.capture_items(c, &category.items);
        }
    }

    /// Restores the name and item count of category `c`; returns `false` without a cache entry.
    pub fn restore_category(&self, c: usize, slot: &mut CategorySlot) -> bool {
        match self.categories.get(&c) {
            Some(cached) => {
                slot.name = cached.name.clone();
                slot.item_count = cached.item_count.clone();
                true
            }
            None => false,
        }
    }

    pub fn capture_items(&mut self, c: usize, items: &[ItemSlot]) {
        for (idx, item) in items.iter().enumerate() {
            self.items.insert((c, idx + 1), item.clone());
        }
    }

    pub fn restore_items(&self, c: usize, items: &mut [ItemSlot]) -> usize {
        let mut restored = 0;
        for (idx, item) in items.iter_mut().enumerate() {
            if let Some(cached) = self.items.get(&(c, idx + 1)) {
                *item = cached.clone();
                restored += 1;
            }
        }
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showbudget_domain::Member;

    #[test]
    fn restores_only_cached_indices() {
        let mut cache = GroupStore::new();
        let mut first = GroupSlot::empty(GroupKind::LocalDj);
        first.set(Member::Name, "Ana");
        cache.capture_group(GroupKind::LocalDj, &[first]);

        let mut fresh = vec![
            GroupSlot::empty(GroupKind::LocalDj),
            GroupSlot::empty(GroupKind::LocalDj),
        ];
        assert_eq!(cache.restore_group(GroupKind::LocalDj, &mut fresh), 1);
        assert_eq!(fresh[0].get(Member::Name), Some("Ana"));
        assert_eq!(fresh[1].get(Member::Name), Some(""));
    }

    #[test]
    fn item_entries_are_namespaced_by_category() {
        let mut cache = GroupStore::new();
        cache.capture_items(
            1,
            &[ItemSlot {
                name: "Fog".into(),
                fee: "80".into(),
            }],
        );
        let mut other = vec![ItemSlot::default()];
        assert_eq!(cache.restore_items(2, &mut other), 0);
        assert_eq!(other[0], ItemSlot::default());

        cache.clear();
        assert!(cache.is_empty());
    }
}
