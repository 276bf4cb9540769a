//! Document order of the live field set.

use crate::field::{CountField, FieldId, GroupKind, ItemMember, ScalarField};
use crate::store::FieldStore;

pub const PRODUCTION_FIELDS: [ScalarField; 5] = [
    ScalarField::VjFee,
    ScalarField::Venue,
    ScalarField::LedWall,
    ScalarField::Lights,
    ScalarField::Lasers,
];

pub const GEAR_FIELDS: [ScalarField; 3] =
    [ScalarField::Sound, ScalarField::Mixer, ScalarField::Table];

pub const MARKETING_FIELDS: [ScalarField; 6] = [
    ScalarField::FacebookAdsXodia,
    ScalarField::FacebookAdsSpaceCampHq,
    ScalarField::InstagramAdsXodia,
    ScalarField::InstagramAdsSpaceCampHq,
    ScalarField::PhysicalFlyers,
    ScalarField::EventbriteAds,
];

pub const STAFF_FIELDS: [ScalarField; 3] = [
    ScalarField::DoorStaff,
    ScalarField::MerchTable,
    ScalarField::Transportation,
];

pub const SALES_FIELDS: [ScalarField; 5] = [
    ScalarField::EventbriteSales,
    ScalarField::DjPresales,
    ScalarField::PromoTeam,
    ScalarField::DoorSales,
    ScalarField::MerchSold,
];

/// Every live field of `store` in registry order.
///
/// The order is stable for a given structure: scalars keep their section position and each
/// group lists its count followed by its instances in ascending index order.
pub fn live_fields(store: &FieldStore) -> Vec<FieldId> {
    let mut out = vec![
        FieldId::Scalar(ScalarField::ShowTitle),
        FieldId::Scalar(ScalarField::ShowDate),
    ];
    push_group(&mut out, store, GroupKind::Headliner);
    out.push(FieldId::Scalar(ScalarField::DirectSupport));
    push_group(&mut out, store, GroupKind::LocalDj);
    push_scalars(&mut out, &PRODUCTION_FIELDS);
    push_group(&mut out, store, GroupKind::Cdj);
    push_scalars(&mut out, &GEAR_FIELDS);
    push_scalars(&mut out, &MARKETING_FIELDS);
    push_scalars(&mut out, &STAFF_FIELDS);
    push_group(&mut out, store, GroupKind::ShowRunner);
    push_categories(&mut out, store);
    push_scalars(&mut out, &SALES_FIELDS);
    push_group(&mut out, store, GroupKind::MerchVendor);
    out
}

fn push_scalars(out: &mut Vec<FieldId>, fields: &[ScalarField]) {
    out.extend(fields.iter().copied().map(FieldId::Scalar));
}

fn push_group(out: &mut Vec<FieldId>, store: &FieldStore, kind: GroupKind) {
    out.push(FieldId::Count(kind.count_field()));
    for index in 1..=store.group_slots(kind).len() {
        for member in kind.members() {
            out.push(FieldId::member(kind, *member, index));
        }
    }
}

fn push_categories(out: &mut Vec<FieldId>, store: &FieldStore) {
    out.push(FieldId::Count(CountField::OtherCategories));
    for (idx, category) in store.categories().iter().enumerate() {
        let c = idx + 1;
        out.push(FieldId::category_name(c));
        out.push(FieldId::category_item_count(c));
        for item in 1..=category.items.len() {
            out.push(FieldId::item(c, item, ItemMember::Name));
            out.push(FieldId::item(c, item, ItemMember::Fee));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Member;

    #[test]
    fn fresh_layout_lists_every_scalar_once() {
        let store = FieldStore::new();
        let fields = live_fields(&store);
        for scalar in ScalarField::ALL {
            let hits = fields
                .iter()
                .filter(|id| **id == FieldId::Scalar(scalar))
                .count();
            assert_eq!(hits, 1, "{scalar:?}");
        }
        assert!(fields.iter().all(|id| store.contains(id)));
    }

    #[test]
    fn group_members_follow_their_count() {
        let store = FieldStore::new();
        let fields = live_fields(&store);
        let count_pos = fields
            .iter()
            .position(|id| *id == FieldId::Count(CountField::Group(GroupKind::Headliner)))
            .expect("count present");
        assert_eq!(
            fields[count_pos + 1],
            FieldId::member(GroupKind::Headliner, Member::Name, 1)
        );
        assert_eq!(
            fields[count_pos + 4],
            FieldId::member(GroupKind::Headliner, Member::Rider, 1)
        );
    }
}
