use showbudget_core::{apply, decode, encode, GroupStore, Repeater};
use showbudget_domain::{
    CountField, FieldId, FieldStore, GroupKind, ItemMember, Member, ScalarField,
};

fn import(text: &str) -> FieldStore {
    let mut store = FieldStore::new();
    let mut cache = GroupStore::new();
    let snapshot = decode(text).expect("decode snapshot");
    apply(&mut store, &mut cache, &snapshot).expect("apply snapshot");
    store
}

fn sample_budget() -> FieldStore {
    let mut store = FieldStore::new();
    let mut cache = GroupStore::new();
    {
        let mut repeater = Repeater::new(&mut store, &mut cache);
        repeater.set_count(GroupKind::Headliner, "2").expect("headliners");
        repeater.set_count(GroupKind::LocalDj, "1").expect("local djs");
        repeater.set_count(GroupKind::MerchVendor, "1").expect("vendors");
        repeater.set_category_count("2").expect("categories");
        repeater.set_item_count(1, "2").expect("items 1");
        repeater.set_item_count(2, "1").expect("items 2");
    }
    let values = [
        (FieldId::Scalar(ScalarField::ShowTitle), "Warehouse, Vol. 2"),
        (FieldId::Scalar(ScalarField::ShowDate), "2025-03-01"),
        (FieldId::member(GroupKind::Headliner, Member::Name, 1), "Nova"),
        (FieldId::member(GroupKind::Headliner, Member::Fee, 2), "750"),
        (FieldId::member(GroupKind::LocalDj, Member::Name, 1), "Say \"Hi\""),
        (FieldId::member(GroupKind::MerchVendor, Member::Fee, 1), "60"),
        (FieldId::Scalar(ScalarField::Venue), "1200"),
        (FieldId::category_name(1), "Decor"),
        (FieldId::item(1, 2, ItemMember::Name), "Fog\nmachine"),
        (FieldId::item(2, 1, ItemMember::Fee), "35.5"),
    ];
    for (id, value) in values {
        store.set(&id, value).expect("set value");
    }
    store
}

#[test]
fn headliner_scenario_materializes_both_fees() {
    let text = "V,4\nShow Title,Test\nID:numHeadliners,2\nID:headliner_fee_1,500\nID:headliner_fee_2,750";
    let store = import(text);

    assert_eq!(
        store.get(&FieldId::member(GroupKind::Headliner, Member::Fee, 1)),
        Some("500")
    );
    assert_eq!(
        store.get(&FieldId::member(GroupKind::Headliner, Member::Fee, 2)),
        Some("750")
    );

    let encoded = encode(&store);
    let lines: Vec<&str> = encoded.lines().collect();
    assert_eq!(lines[1], "Show Title,Test");
    assert_eq!(lines[2], "Show Date,");
    let position = |needle: &str| {
        lines
            .iter()
            .position(|line| *line == needle)
            .unwrap_or_else(|| panic!("missing `{needle}` in\n{encoded}"))
    };
    let count = position("ID:numHeadliners,2");
    let first = position("ID:headliner_fee_1,500");
    let second = position("ID:headliner_fee_2,750");
    assert!(count < first && first < second);
}

#[test]
fn headliner_scenario_encodes_in_registry_order() {
    let store = import("V,4\nShow Title,Test\nID:numHeadliners,2\nID:headliner_fee_1,500\nID:headliner_fee_2,750");
    insta::assert_snapshot!(encode(&store), @r#"
    XODIA_BUDGET_VERSION,4
    Show Title,Test
    Show Date,
    ID:numHeadliners,2
    ID:headliner_name_1,
    ID:headliner_fee_1,500
    ID:headliner_hotel_1,
    ID:headliner_rider_1,
    ID:headliner_name_2,
    ID:headliner_fee_2,750
    ID:headliner_hotel_2,
    ID:headliner_rider_2,
    ID:directSupport,
    ID:numLocalDJs,0
    ID:vjFee,
    ID:venue,
    ID:ledWall,
    ID:lights,
    ID:lasers,
    ID:numCDJs,0
    ID:sound,
    ID:mixer,
    ID:table,
    ID:facebookAdsXodia,
    ID:facebookAdsSpaceCampHQ,
    ID:instagramAdsXodia,
    ID:instagramAdsSpaceCampHQ,
    ID:physicalFlyers,
    ID:eventbriteAds,
    ID:doorStaff,
    ID:merchTable,
    ID:transportation,
    ID:numShowRunners,0
    ID:numOtherCategories,0
    ID:eventbriteSales,
    ID:djPresales,
    ID:promoTeam,
    ID:doorSales,
    ID:merchSold,
    ID:numMerchVendors,0
    "#);
}

#[test]
fn category_items_arrive_before_their_counts() {
    let text = "\
ID:otherCategory_1_itemFee_3,30
ID:otherCategory_1_itemFee_1,10
ID:numOtherCategories,1
ID:otherCategory_1_itemFee_2,20
ID:otherCategoryCount_1,3
";
    let store = import(text);
    let category = store.category(1).expect("category 1");
    assert_eq!(category.items.len(), 3);
    let fees: Vec<&str> = category.items.iter().map(|item| item.fee.as_str()).collect();
    assert_eq!(fees, ["10", "20", "30"]);
}

#[test]
fn later_categories_may_arrive_before_earlier_ones() {
    let text = "\
ID:otherCategory_2_itemFee_3,23
ID:otherCategoryName_2,Security
ID:otherCategory_2_itemFee_1,21
ID:otherCategoryCount_2,3
ID:otherCategory_2_itemFee_2,22
ID:otherCategory_1_itemFee_1,11
ID:otherCategoryCount_1,1
ID:otherCategoryName_1,Decor
ID:numOtherCategories,2
";
    let store = import(text);

    let decor = store.category(1).expect("category 1");
    assert_eq!(decor.items.len(), 1);
    assert_eq!(store.get(&FieldId::category_name(1)), Some("Decor"));
    assert_eq!(store.get(&FieldId::item(1, 1, ItemMember::Fee)), Some("11"));

    let security = store.category(2).expect("category 2");
    let fees: Vec<&str> = security.items.iter().map(|item| item.fee.as_str()).collect();
    assert_eq!(fees, ["21", "22", "23"]);
    assert_eq!(store.get(&FieldId::category_name(2)), Some("Security"));
    assert!(store.category(3).is_none());
    assert!(store.verify_structure().is_ok());
}

#[test]
fn encode_then_apply_restores_the_same_budget() {
    let original = sample_budget();
    let text = encode(&original);
    assert!(text.ends_with('\n') && !text.ends_with("\n\n"));

    let restored = import(&text);
    assert_eq!(restored, original);
    assert_eq!(encode(&restored), text);
}

#[test]
fn decoded_rows_match_the_encoded_values() {
    let original = sample_budget();
    let decoded = decode(&encode(&original)).expect("decode");
    assert_eq!(decoded.version, showbudget_core::SNAPSHOT_VERSION);
    let row = |label: &str| {
        decoded
            .pairs
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.as_str())
    };
    assert_eq!(row("Show Title"), Some("Warehouse, Vol. 2"));
    assert_eq!(row("ID:localDJ_name_1"), Some("Say \"Hi\""));
    assert_eq!(row("ID:otherCategory_1_itemName_2"), Some("Fog\nmachine"));
}

#[test]
fn carriage_returns_survive_escaping() {
    let mut store = FieldStore::new();
    store
        .set(&FieldId::Scalar(ScalarField::ShowTitle), "line\r\nbreak, \"quoted\"")
        .expect("title");
    let restored = import(&encode(&store));
    assert_eq!(
        restored.scalar(ScalarField::ShowTitle),
        "line\r\nbreak, \"quoted\""
    );
}

#[test]
fn resizing_down_and_up_keeps_values() {
    let mut store = sample_budget();
    let mut cache = GroupStore::new();
    let mut repeater = Repeater::new(&mut store, &mut cache);
    repeater.set_count(GroupKind::Headliner, "1").expect("shrink");
    repeater.set_count(GroupKind::Headliner, "2").expect("regrow");
    repeater.set_item_count(1, "0").expect("shrink items");
    repeater.set_item_count(1, "2").expect("regrow items");
    drop(repeater);

    assert_eq!(
        store.get(&FieldId::member(GroupKind::Headliner, Member::Fee, 2)),
        Some("750")
    );
    assert_eq!(
        store.get(&FieldId::item(1, 2, ItemMember::Name)),
        Some("Fog\nmachine")
    );
}

#[test]
fn aliases_import_like_canonical_labels() {
    let canonical = import("Physical Flyers,45\nDirect Support Fee,300\n");
    for alias in ["Flyers", "Flyer Cost", "Physical Flyer Cost"] {
        let aliased = import(&format!("{alias},45\nDirect Support,300\n"));
        assert_eq!(aliased, canonical, "{alias}");
    }
    assert_eq!(canonical.scalar(ScalarField::PhysicalFlyers), "45");
}

#[test]
fn hand_edited_rows_unwrap_spaced_quotes() {
    let store = import("Venue, \"1,200\"\nDirect Support Fee,5\n");
    assert_eq!(store.scalar(ScalarField::Venue), "1,200");
    assert_eq!(store.scalar(ScalarField::DirectSupport), "5");
}

#[test]
fn mixed_generations_decode_in_one_pass() {
    let text = "\
Show Title,Mixed
Headliner 2 Fee,900
Merch Vendor 1 Name,Tees
ID:numCDJs,1
ID:cdj_fee_1,80
venue,500
Category 1 Items,1
Category 1 Item 1 Fee,15
";
    let store = import(text);
    assert_eq!(store.group_slots(GroupKind::Headliner).len(), 2);
    assert_eq!(store.count_input(CountField::Group(GroupKind::MerchVendor)), "1");
    assert_eq!(
        store.get(&FieldId::member(GroupKind::MerchVendor, Member::Name, 1)),
        Some("Tees")
    );
    assert_eq!(
        store.get(&FieldId::member(GroupKind::Cdj, Member::Fee, 1)),
        Some("80")
    );
    assert_eq!(store.scalar(ScalarField::Venue), "500");
    assert_eq!(store.get(&FieldId::item(1, 1, ItemMember::Fee)), Some("15"));
    assert!(store.verify_structure().is_ok());
}
