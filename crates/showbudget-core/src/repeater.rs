//! Regeneration of repeated groups and category item lists.
//!
//! Every regeneration follows the same cycle: capture the live slots into the [`GroupStore`],
//! materialize `1..=count` empty slots, restore cached values into them, then swap them in.

use tracing::{debug, warn};

use showbudget_domain::{
    effective_count, parse_count, CategorySlot, CountField, FieldId, FieldStore, GroupKind,
    GroupSlot, ItemSlot, MAX_INSTANCES,
};

use crate::error::CoreError;
use crate::group_store::GroupStore;

/// Outcome of one regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regenerated {
    /// Count field that drove the regeneration.
    pub field: FieldId,
    pub previous: usize,
    pub current: usize,
    /// Slots that received cached values.
    pub restored: usize,
}

impl Regenerated {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Sole writer of structure in a [`FieldStore`] and sole writer of its [`GroupStore`].
pub struct Repeater<'a> {
    store: &'a mut FieldStore,
    cache: &'a mut GroupStore,
}

impl<'a> Repeater<'a> {
    pub fn new(store: &'a mut FieldStore, cache: &'a mut GroupStore) -> Self {
        Self { store, cache }
    }

    /// Writes the count input of `kind` and regenerates the group to match it.
    pub fn set_count(&mut self, kind: GroupKind, raw: &str) -> Result<Regenerated, CoreError> {
        self.store.set(&FieldId::Count(kind.count_field()), raw)?;
        Ok(self.regenerate(kind))
    }

    pub fn regenerate(&mut self, kind: GroupKind) -> Regenerated {
        let field = FieldId::Count(kind.count_field());
        let target = clamped(&field, self.store.count_input(kind.count_field()));
        let previous = self.store.group_slots(kind).len();

        self.cache.capture_group(kind, self.store.group_slots(kind));
        let mut slots: Vec<GroupSlot> = (0..target).map(|_| GroupSlot::empty(kind)).collect();
        let restored = self.cache.restore_group(kind, &mut slots);
        self.store.replace_group_slots(kind, slots);

        debug!(group = %kind, previous, current = target, restored, "group regenerated");
        Regenerated {
            field,
            previous,
            current: target,
            restored,
        }
    }

    pub fn category_count(&self) -> usize {
        self.store.categories().len()
    }

    pub fn set_category_count(&mut self, raw: &str) -> Result<Regenerated, CoreError> {
        self.store.set(&FieldId::Count(CountField::OtherCategories), raw)?;
        Ok(self.regenerate_categories())
    }

    /// Regenerates category shells. A shell restored from the cache also gets its item rows back.
    pub fn regenerate_categories(&mut self) -> Regenerated {
        let field = FieldId::Count(CountField::OtherCategories);
        let target = clamped(&field, self.store.count_input(CountField::OtherCategories));
        let previous = self.store.categories().len();

        self.cache.capture_categories(self.store.categories());
        let mut restored = 0;
        let categories = (1..=target)
            .map(|c| {
                let mut shell = CategorySlot::default();
                if self.cache.restore_category(c, &mut shell) {
                    let count = clamped(&FieldId::category_item_count(c), &shell.item_count);
                    shell.items = vec![ItemSlot::default(); count];
                    self.cache.restore_items(c, &mut shell.items);
                    restored += 1;
                }
                shell
            })
            .collect();
        self.store.replace_categories(categories);

        debug!(previous, current = target, restored, "categories regenerated");
        Regenerated {
            field,
            previous,
            current: target,
            restored,
        }
    }

    pub fn set_item_count(&mut self, category: usize, raw: &str) -> Result<Regenerated, CoreError> {
        self.store.set(&FieldId::category_item_count(category), raw)?;
        self.regenerate_items(category)
    }

    /// Regenerates the item rows of category `category` from its own item count.
    pub fn regenerate_items(&mut self, category: usize) -> Result<Regenerated, CoreError> {
        let field = FieldId::category_item_count(category);
        let Some(slot) = self.store.category(category) else {
            return Err(CoreError::InvalidOperation(format!(
                "category {category} does not exist"
            )));
        };
        let target = clamped(&field, &slot.item_count);
        let previous = slot.items.len();

        self.cache.capture_items(category, &slot.items);
        let mut items = vec![ItemSlot::default(); target];
        let restored = self.cache.restore_items(category, &mut items);
        if let Some(slot) = self.store.category_mut(category) {
            slot.items = items;
        }

        debug!(category, previous, current = target, restored, "category items regenerated");
        Ok(Regenerated {
            field,
            previous,
            current: target,
            restored,
        })
    }
}

fn clamped(field: &FieldId, raw: &str) -> usize {
    let requested = parse_count(raw);
    if requested > MAX_INSTANCES {
        warn!(field = %field, requested, max = MAX_INSTANCES, "count clamped");
    }
    effective_count(raw)
}
