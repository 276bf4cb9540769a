//! Field identifiers for every addressable budget input.
//!
//! A [`FieldId`] is parsed once from its string form and consumed by exhaustive matching
//! everywhere else. The string forms are part of the snapshot wire format and must stay stable.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Semantic kind of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    /// Structural field whose value controls how many sibling fields exist.
    Count,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Count => "count",
        };
        f.write_str(label)
    }
}

/// Fixed, non-repeated budget inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarField {
    ShowTitle,
    ShowDate,
    DirectSupport,
    VjFee,
    Venue,
    LedWall,
    Lights,
    Lasers,
    Sound,
    Mixer,
    Table,
    FacebookAdsXodia,
    FacebookAdsSpaceCampHq,
    InstagramAdsXodia,
    InstagramAdsSpaceCampHq,
    PhysicalFlyers,
    EventbriteAds,
    DoorStaff,
    MerchTable,
    Transportation,
    EventbriteSales,
    DjPresales,
    PromoTeam,
    DoorSales,
    MerchSold,
}

impl ScalarField {
    pub const ALL: [ScalarField; 25] = [
        ScalarField::ShowTitle,
        ScalarField::ShowDate,
        ScalarField::DirectSupport,
        ScalarField::VjFee,
        ScalarField::Venue,
        ScalarField::LedWall,
        ScalarField::Lights,
        ScalarField::Lasers,
        ScalarField::Sound,
        ScalarField::Mixer,
        ScalarField::Table,
        ScalarField::FacebookAdsXodia,
        ScalarField::FacebookAdsSpaceCampHq,
        ScalarField::InstagramAdsXodia,
        ScalarField::InstagramAdsSpaceCampHq,
        ScalarField::PhysicalFlyers,
        ScalarField::EventbriteAds,
        ScalarField::DoorStaff,
        ScalarField::MerchTable,
        ScalarField::Transportation,
        ScalarField::EventbriteSales,
        ScalarField::DjPresales,
        ScalarField::PromoTeam,
        ScalarField::DoorSales,
        ScalarField::MerchSold,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ScalarField::ShowTitle => "showTitle",
            ScalarField::ShowDate => "showDate",
            ScalarField::DirectSupport => "directSupport",
            ScalarField::VjFee => "vjFee",
            ScalarField::Venue => "venue",
            ScalarField::LedWall => "ledWall",
            ScalarField::Lights => "lights",
            ScalarField::Lasers => "lasers",
            ScalarField::Sound => "sound",
            ScalarField::Mixer => "mixer",
            ScalarField::Table => "table",
            ScalarField::FacebookAdsXodia => "facebookAdsXodia",
            ScalarField::FacebookAdsSpaceCampHq => "facebookAdsSpaceCampHQ",
            ScalarField::InstagramAdsXodia => "instagramAdsXodia",
            ScalarField::InstagramAdsSpaceCampHq => "instagramAdsSpaceCampHQ",
            ScalarField::PhysicalFlyers => "physicalFlyers",
            ScalarField::EventbriteAds => "eventbriteAds",
            ScalarField::DoorStaff => "doorStaff",
            ScalarField::MerchTable => "merchTable",
            ScalarField::Transportation => "transportation",
            ScalarField::EventbriteSales => "eventbriteSales",
            ScalarField::DjPresales => "djPresales",
            ScalarField::PromoTeam => "promoTeam",
            ScalarField::DoorSales => "doorSales",
            ScalarField::MerchSold => "merchSold",
        }
    }

    /// Human-readable label used by semantic snapshot rows.
    pub fn label(self) -> &'static str {
        match self {
            ScalarField::ShowTitle => "Show Title",
            ScalarField::ShowDate => "Show Date",
            ScalarField::DirectSupport => "Direct Support Fee",
            ScalarField::VjFee => "VJ Fee",
            ScalarField::Venue => "Venue",
            ScalarField::LedWall => "LED Wall",
            ScalarField::Lights => "Lights",
            ScalarField::Lasers => "Lasers",
            ScalarField::Sound => "Sound",
            ScalarField::Mixer => "Mixer",
            ScalarField::Table => "Table",
            ScalarField::FacebookAdsXodia => "Facebook Ads XODIA",
            ScalarField::FacebookAdsSpaceCampHq => "Facebook Ads SPACE CAMP HQ",
            ScalarField::InstagramAdsXodia => "Instagram Ads XODIA",
            ScalarField::InstagramAdsSpaceCampHq => "Instagram Ads SPACE CAMP HQ",
            ScalarField::PhysicalFlyers => "Physical Flyers",
            ScalarField::EventbriteAds => "Eventbrite Ads",
            ScalarField::DoorStaff => "Door Staff",
            ScalarField::MerchTable => "Merch Table",
            ScalarField::Transportation => "Transportation",
            ScalarField::EventbriteSales => "Eventbrite Sales",
            ScalarField::DjPresales => "DJ Presales",
            ScalarField::PromoTeam => "Promo Team",
            ScalarField::DoorSales => "Door Sales",
            ScalarField::MerchSold => "Merch Sold",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            ScalarField::ShowTitle | ScalarField::ShowDate => FieldKind::Text,
            _ => FieldKind::Number,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.id() == id)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label))
    }
}

/// Top-level repeated groups whose instance count is user controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKind {
    Headliner,
    LocalDj,
    Cdj,
    ShowRunner,
    MerchVendor,
}

impl GroupKind {
    /// Fixed regeneration order used by reconciliation.
    pub const ALL: [GroupKind; 5] = [
        GroupKind::Headliner,
        GroupKind::LocalDj,
        GroupKind::Cdj,
        GroupKind::ShowRunner,
        GroupKind::MerchVendor,
    ];

    /// Id prefix shared by every member field of the group.
    pub fn prefix(self) -> &'static str {
        match self {
            GroupKind::Headliner => "headliner",
            GroupKind::LocalDj => "localDJ",
            GroupKind::Cdj => "cdj",
            GroupKind::ShowRunner => "showRunner",
            GroupKind::MerchVendor => "merchVendor",
        }
    }

    /// Label stem used by templated semantic rows, e.g. `Local DJ 2 Fee`.
    pub fn label(self) -> &'static str {
        match self {
            GroupKind::Headliner => "Headliner",
            GroupKind::LocalDj => "Local DJ",
            GroupKind::Cdj => "CDJ",
            GroupKind::ShowRunner => "Show Runner",
            GroupKind::MerchVendor => "Vendor",
        }
    }

    pub fn members(self) -> &'static [Member] {
        match self {
            GroupKind::Headliner => &[Member::Name, Member::Fee, Member::Hotel, Member::Rider],
            GroupKind::LocalDj | GroupKind::MerchVendor => &[Member::Name, Member::Fee],
            GroupKind::Cdj | GroupKind::ShowRunner => &[Member::Fee],
        }
    }

    pub fn has_member(self, member: Member) -> bool {
        self.members().contains(&member)
    }

    pub fn count_field(self) -> CountField {
        CountField::Group(self)
    }

    /// Instance count of a fresh budget.
    pub fn default_count(self) -> usize {
        match self {
            GroupKind::Headliner => 1,
            _ => 0,
        }
    }

    pub fn from_command_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "headliner" | "headliners" => Some(GroupKind::Headliner),
            "localdj" | "localdjs" | "dj" | "djs" => Some(GroupKind::LocalDj),
            "cdj" | "cdjs" => Some(GroupKind::Cdj),
            "showrunner" | "showrunners" | "runners" => Some(GroupKind::ShowRunner),
            "vendor" | "vendors" | "merchvendors" => Some(GroupKind::MerchVendor),
            _ => None,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Leaf kinds of a repeated group instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Member {
    Name,
    Fee,
    Hotel,
    Rider,
}

impl Member {
    pub fn id(self) -> &'static str {
        match self {
            Member::Name => "name",
            Member::Fee => "fee",
            Member::Hotel => "hotel",
            Member::Rider => "rider",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Member::Name => "Name",
            Member::Fee => "Fee",
            Member::Hotel => "Hotel",
            Member::Rider => "Rider",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Member::Name => FieldKind::Text,
            Member::Fee | Member::Hotel | Member::Rider => FieldKind::Number,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "name" => Some(Member::Name),
            "fee" => Some(Member::Fee),
            "hotel" => Some(Member::Hotel),
            "rider" => Some(Member::Rider),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::from_id(label.to_ascii_lowercase().as_str())
    }
}

/// Structural count inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CountField {
    Group(GroupKind),
    OtherCategories,
}

impl CountField {
    pub const ALL: [CountField; 6] = [
        CountField::Group(GroupKind::Headliner),
        CountField::Group(GroupKind::LocalDj),
        CountField::Group(GroupKind::Cdj),
        CountField::Group(GroupKind::ShowRunner),
        CountField::Group(GroupKind::MerchVendor),
        CountField::OtherCategories,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CountField::Group(GroupKind::Headliner) => "numHeadliners",
            CountField::Group(GroupKind::LocalDj) => "numLocalDJs",
            CountField::Group(GroupKind::Cdj) => "numCDJs",
            CountField::Group(GroupKind::ShowRunner) => "numShowRunners",
            CountField::Group(GroupKind::MerchVendor) => "numMerchVendors",
            CountField::OtherCategories => "numOtherCategories",
        }
    }

    pub fn default_count(self) -> usize {
        match self {
            CountField::Group(kind) => kind.default_count(),
            CountField::OtherCategories => 0,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.id() == id)
    }
}

/// Per-category shell fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryField {
    Name,
    ItemCount,
}

/// Leaf kinds of a category item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemMember {
    Name,
    Fee,
}

impl ItemMember {
    pub fn id(self) -> &'static str {
        match self {
            ItemMember::Name => "itemName",
            ItemMember::Fee => "itemFee",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "name" => Some(ItemMember::Name),
            "fee" => Some(ItemMember::Fee),
            _ => None,
        }
    }
}

/// Every addressable field of a budget. Indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Scalar(ScalarField),
    Count(CountField),
    GroupMember {
        kind: GroupKind,
        member: Member,
        index: usize,
    },
    CategoryMeta {
        category: usize,
        field: CategoryField,
    },
    CategoryItem {
        category: usize,
        item: usize,
        member: ItemMember,
    },
}

impl FieldId {
    pub fn member(kind: GroupKind, member: Member, index: usize) -> Self {
        FieldId::GroupMember {
            kind,
            member,
            index,
        }
    }

    pub fn category_name(category: usize) -> Self {
        FieldId::CategoryMeta {
            category,
            field: CategoryField::Name,
        }
    }

    pub fn category_item_count(category: usize) -> Self {
        FieldId::CategoryMeta {
            category,
            field: CategoryField::ItemCount,
        }
    }

    pub fn item(category: usize, item: usize, member: ItemMember) -> Self {
        FieldId::CategoryItem {
            category,
            item,
            member,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::Scalar(field) => field.kind(),
            FieldId::Count(_) => FieldKind::Count,
            FieldId::GroupMember { member, .. } => member.kind(),
            FieldId::CategoryMeta {
                field: CategoryField::Name,
                ..
            } => FieldKind::Text,
            FieldId::CategoryMeta {
                field: CategoryField::ItemCount,
                ..
            } => FieldKind::Count,
            FieldId::CategoryItem {
                member: ItemMember::Name,
                ..
            } => FieldKind::Text,
            FieldId::CategoryItem {
                member: ItemMember::Fee,
                ..
            } => FieldKind::Number,
        }
    }

    /// Structural fields must be applied before any leaf they gate.
    pub fn is_structural(&self) -> bool {
        self.kind() == FieldKind::Count
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Scalar(field) => f.write_str(field.id()),
            FieldId::Count(field) => f.write_str(field.id()),
            FieldId::GroupMember {
                kind,
                member,
                index,
            } => write!(f, "{}_{}_{}", kind.prefix(), member.id(), index),
            FieldId::CategoryMeta {
                category,
                field: CategoryField::Name,
            } => write!(f, "otherCategoryName_{category}"),
            FieldId::CategoryMeta {
                category,
                field: CategoryField::ItemCount,
            } => write!(f, "otherCategoryCount_{category}"),
            FieldId::CategoryItem {
                category,
                item,
                member,
            } => write!(f, "otherCategory_{}_{}_{}", category, member.id(), item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIdError {
    #[error("unrecognised field id `{0}`")]
    Unknown(String),
}

impl FromStr for FieldId {
    type Err = FieldIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_field_id(raw).ok_or_else(|| FieldIdError::Unknown(raw.to_string()))
    }
}

fn parse_field_id(raw: &str) -> Option<FieldId> {
    if let Some(field) = ScalarField::from_id(raw) {
        return Some(FieldId::Scalar(field));
    }
    if let Some(field) = CountField::from_id(raw) {
        return Some(FieldId::Count(field));
    }
    if let Some(rest) = raw.strip_prefix("otherCategoryName_") {
        return parse_index(rest).map(FieldId::category_name);
    }
    if let Some(rest) = raw.strip_prefix("otherCategoryCount_") {
        return parse_index(rest).map(FieldId::category_item_count);
    }
    if let Some(rest) = raw.strip_prefix("otherCategory_") {
        let (category, tail) = rest.split_once('_')?;
        let category = parse_index(category)?;
        let (member, item) = if let Some(item) = tail.strip_prefix("itemName_") {
            (ItemMember::Name, item)
        } else if let Some(item) = tail.strip_prefix("itemFee_") {
            (ItemMember::Fee, item)
        } else {
            return None;
        };
        return parse_index(item).map(|item| FieldId::item(category, item, member));
    }
    for kind in GroupKind::ALL {
        let Some(rest) = raw
            .strip_prefix(kind.prefix())
            .and_then(|rest| rest.strip_prefix('_'))
        else {
            continue;
        };
        let (member, index) = rest.split_once('_')?;
        let member = Member::from_id(member).filter(|member| kind.has_member(*member))?;
        return parse_index(index).map(|index| FieldId::member(kind, member, index));
    }
    None
}

/// Parses a 1-based positional index; rejects signs, blanks and zero.
pub fn parse_index(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<usize>().ok().filter(|index| *index >= 1)
}
