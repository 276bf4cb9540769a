//! Arena of live budget fields.
//!
//! Repeated groups are stored as typed slots indexed by position. A field "exists" when its
//! slot is materialized; count inputs are kept as raw text and only become structure once a
//! repeater regenerates the group.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::field::{
    CategoryField, CountField, FieldId, GroupKind, ItemMember, Member, ScalarField,
};

/// Upper bound on materialized instances per group or category item list.
pub const MAX_INSTANCES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("field `{0}` does not exist in the current budget layout")]
    NotMaterialized(FieldId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{field}` requires {expected} instance(s) but {actual} are materialized")]
pub struct StructureError {
    pub field: FieldId,
    pub expected: usize,
    pub actual: usize,
}

/// Member values of one repeated group instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSlot {
    values: BTreeMap<Member, String>,
}

impl GroupSlot {
    pub fn empty(kind: GroupKind) -> Self {
        let values = kind
            .members()
            .iter()
            .map(|member| (*member, String::new()))
            .collect();
        Self { values }
    }

    pub fn get(&self, member: Member) -> Option<&str> {
        self.values.get(&member).map(String::as_str)
    }

    /// Writes an existing member; returns `false` when the member is not part of the slot.
    pub fn set(&mut self, member: Member, value: impl Into<String>) -> bool {
        match self.values.get_mut(&member) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Member, &str)> {
        self.values
            .iter()
            .map(|(member, value)| (*member, value.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSlot {
    pub name: String,
    pub fee: String,
}

impl ItemSlot {
    pub fn get(&self, member: ItemMember) -> &str {
        match member {
            ItemMember::Name => &self.name,
            ItemMember::Fee => &self.fee,
        }
    }

    pub fn set(&mut self, member: ItemMember, value: impl Into<String>) {
        match member {
            ItemMember::Name => self.name = value.into(),
            ItemMember::Fee => self.fee = value.into(),
        }
    }
}

/// A user-named category shell plus its own item rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlot {
    pub name: String,
    pub item_count: String,
    pub items: Vec<ItemSlot>,
}

impl Default for CategorySlot {
    fn default() -> Self {
        Self {
            name: String::new(),
            item_count: "0".into(),
            items: Vec::new(),
        }
    }
}

/// Owned live field set for one budget session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStore {
    scalars: BTreeMap<ScalarField, String>,
    counts: BTreeMap<CountField, String>,
    groups: BTreeMap<GroupKind, Vec<GroupSlot>>,
    categories: Vec<CategorySlot>,
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStore {
    /// Fresh budget: one empty headliner, every other group empty.
    pub fn new() -> Self {
        let scalars = ScalarField::ALL
            .into_iter()
            .map(|field| (field, String::new()))
            .collect();
        let counts = CountField::ALL
            .into_iter()
            .map(|field| (field, field.default_count().to_string()))
            .collect();
        let groups = GroupKind::ALL
            .into_iter()
            .map(|kind| {
                let slots = (0..kind.default_count())
                    .map(|_| GroupSlot::empty(kind))
                    .collect();
                (kind, slots)
            })
            .collect();
        Self {
            scalars,
            counts,
            groups,
            categories: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn get(&self, id: &FieldId) -> Option<&str> {
        match *id {
            FieldId::Scalar(field) => self.scalars.get(&field).map(String::as_str),
            FieldId::Count(field) => self.counts.get(&field).map(String::as_str),
            FieldId::GroupMember {
                kind,
                member,
                index,
            } => self.slot(kind, index)?.get(member),
            FieldId::CategoryMeta { category, field } => {
                let slot = self.category(category)?;
                Some(match field {
                    CategoryField::Name => slot.name.as_str(),
                    CategoryField::ItemCount => slot.item_count.as_str(),
                })
            }
            FieldId::CategoryItem {
                category,
                item,
                member,
            } => self
                .category(category)?
                .items
                .get(item.checked_sub(1)?)
                .map(|slot| slot.get(member)),
        }
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.get(id).is_some()
    }

    /// Writes a raw value onto an existing field. Count inputs are written verbatim and do not
    /// regenerate anything; structure only changes through a repeater.
    pub fn set(&mut self, id: &FieldId, value: impl Into<String>) -> Result<(), StoreError> {
        let missing = || StoreError::NotMaterialized(*id);
        match *id {
            FieldId::Scalar(field) => {
                self.scalars.insert(field, value.into());
            }
            FieldId::Count(field) => {
                self.counts.insert(field, value.into());
            }
            FieldId::GroupMember {
                kind,
                member,
                index,
            } => {
                let slot = index
                    .checked_sub(1)
                    .and_then(|idx| self.groups.get_mut(&kind)?.get_mut(idx))
                    .ok_or_else(missing)?;
                if !slot.set(member, value) {
                    return Err(missing());
                }
            }
            FieldId::CategoryMeta { category, field } => {
                let slot = self.category_mut(category).ok_or_else(missing)?;
                match field {
                    CategoryField::Name => slot.name = value.into(),
                    CategoryField::ItemCount => slot.item_count = value.into(),
                }
            }
            FieldId::CategoryItem {
                category,
                item,
                member,
            } => {
                let slot = self
                    .category_mut(category)
                    .and_then(|slot| slot.items.get_mut(item.checked_sub(1)?))
                    .ok_or_else(missing)?;
                slot.set(member, value);
            }
        }
        Ok(())
    }

    pub fn scalar(&self, field: ScalarField) -> &str {
        self.scalars.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn count_input(&self, field: CountField) -> &str {
        self.counts.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Count requested by the count input, clamped to [`MAX_INSTANCES`].
    pub fn target_count(&self, field: CountField) -> usize {
        effective_count(self.count_input(field))
    }

    pub fn group_slots(&self, kind: GroupKind) -> &[GroupSlot] {
        self.groups.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn replace_group_slots(&mut self, kind: GroupKind, slots: Vec<GroupSlot>) {
        self.groups.insert(kind, slots);
    }

    fn slot(&self, kind: GroupKind, index: usize) -> Option<&GroupSlot> {
        self.group_slots(kind).get(index.checked_sub(1)?)
    }

    pub fn categories(&self) -> &[CategorySlot] {
        &self.categories
    }

    pub fn category(&self, category: usize) -> Option<&CategorySlot> {
        self.categories.get(category.checked_sub(1)?)
    }

    pub fn category_mut(&mut self, category: usize) -> Option<&mut CategorySlot> {
        self.categories.get_mut(category.checked_sub(1)?)
    }

    pub fn replace_categories(&mut self, categories: Vec<CategorySlot>) {
        self.categories = categories;
    }

    /// Checks that every materialized group and item list matches its count input.
    pub fn verify_structure(&self) -> Result<(), StructureError> {
        for kind in GroupKind::ALL {
            let expected = self.target_count(kind.count_field());
            let actual = self.group_slots(kind).len();
            if expected != actual {
                return Err(StructureError {
                    field: FieldId::Count(kind.count_field()),
                    expected,
                    actual,
                });
            }
        }
        let expected = self.target_count(CountField::OtherCategories);
        if expected != self.categories.len() {
            return Err(StructureError {
                field: FieldId::Count(CountField::OtherCategories),
                expected,
                actual: self.categories.len(),
            });
        }
        for (idx, category) in self.categories.iter().enumerate() {
            let expected = effective_count(&category.item_count);
            if expected != category.items.len() {
                return Err(StructureError {
                    field: FieldId::category_item_count(idx + 1),
                    expected,
                    actual: category.items.len(),
                });
            }
        }
        Ok(())
    }
}

/// Reads the leading digits of a count input; anything else counts as zero.
pub fn parse_count(raw: &str) -> usize {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(usize::MAX)
}

pub fn effective_count(raw: &str) -> usize {
    parse_count(raw).min(MAX_INSTANCES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_has_one_headliner() {
        let store = FieldStore::new();
        assert_eq!(store.group_slots(GroupKind::Headliner).len(), 1);
        assert_eq!(store.count_input(CountField::Group(GroupKind::Headliner)), "1");
        assert_eq!(store.count_input(CountField::OtherCategories), "0");
        assert!(store.contains(&FieldId::member(GroupKind::Headliner, Member::Hotel, 1)));
        assert!(!store.contains(&FieldId::member(GroupKind::Headliner, Member::Hotel, 2)));
        assert!(store.verify_structure().is_ok());
    }

    #[test]
    fn writes_to_unmaterialized_fields_are_rejected() {
        let mut store = FieldStore::new();
        let id = FieldId::member(GroupKind::Cdj, Member::Fee, 1);
        assert_eq!(store.set(&id, "40"), Err(StoreError::NotMaterialized(id)));
        let item = FieldId::item(1, 1, ItemMember::Fee);
        assert!(store.set(&item, "10").is_err());
    }

    #[test]
    fn count_inputs_do_not_change_structure() {
        let mut store = FieldStore::new();
        store
            .set(&FieldId::Count(CountField::Group(GroupKind::Cdj)), "2")
            .expect("count input");
        assert!(store.group_slots(GroupKind::Cdj).is_empty());
        let err = store.verify_structure().expect_err("mismatch");
        assert_eq!(err.expected, 2);
        assert_eq!(err.actual, 0);
    }

    #[test]
    fn parse_count_follows_leading_digits() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count(" 2abc"), 2);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-4"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(effective_count("100000"), MAX_INSTANCES);
    }
}
