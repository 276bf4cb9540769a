//! Resolution of snapshot row labels to field ids.
//!
//! Three label grammars are accepted side by side: `ID:<fieldId>` rows, fixed semantic labels
//! (`VJ Fee`), and templated labels carrying indices (`Headliner 2 Fee`,
//! `Category 1 Item 3 Name`). Deprecated labels are rewritten through [`LABEL_ALIASES`] first.

use once_cell::sync::Lazy;
use regex::Regex;

use showbudget_domain::{parse_index, FieldId, GroupKind, ItemMember, Member, ScalarField};

pub const EXPLICIT_ID_PREFIX: &str = "ID:";

/// Deprecated labels and the canonical label they stand for.
pub const LABEL_ALIASES: &[(&str, &str)] = &[
    ("Flyer Cost", "Physical Flyers"),
    ("Physical Flyer Cost", "Physical Flyers"),
    ("Flyers", "Physical Flyers"),
    ("Direct Support", "Direct Support Fee"),
];

/// How a field id was derived from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrigin {
    /// `ID:` rows and bare field ids.
    Explicit,
    /// Semantic or templated labels written by older snapshot generations.
    Semantic,
}

/// Labels of the combined ad-spend fields that predate the per-account split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyLabel {
    FacebookAds,
    FacebookAdsAccount,
    InstagramAds,
    InstagramAdsAccount,
}

impl LegacyLabel {
    pub const ALL: [LegacyLabel; 4] = [
        LegacyLabel::FacebookAds,
        LegacyLabel::FacebookAdsAccount,
        LegacyLabel::InstagramAds,
        LegacyLabel::InstagramAdsAccount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LegacyLabel::FacebookAds => "Facebook Ads",
            LegacyLabel::FacebookAdsAccount => "Facebook Ads Account",
            LegacyLabel::InstagramAds => "Instagram Ads",
            LegacyLabel::InstagramAdsAccount => "Instagram Ads Account",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|legacy| legacy.label().eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedLabel {
    Field { id: FieldId, origin: LabelOrigin },
    Legacy(LegacyLabel),
    Unresolved,
}

static GROUP_TEMPLATES: Lazy<Vec<(GroupKind, Regex)>> = Lazy::new(|| {
    GroupKind::ALL
        .into_iter()
        .map(|kind| {
            let stem = match kind {
                GroupKind::MerchVendor => r"(?:Merch\s+)?Vendor".to_string(),
                _ => kind
                    .label()
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+"),
            };
            let pattern = format!(r"(?i)^{stem}\s+(\d+)\s+([a-z]+)$");
            (kind, compile(&pattern))
        })
        .collect()
});

static CATEGORY_NAME: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^Category\s+(\d+)\s+Name$"));

static CATEGORY_ITEM_COUNT: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^Category\s+(\d+)\s+Items(?:\s+Count)?$"));

static CATEGORY_ITEM: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^Category\s+(\d+)\s+Item\s+(\d+)\s+(Name|Fee)$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid label pattern {pattern}: {err}"))
}

/// Rewrites a deprecated label to its canonical form.
pub fn canonical_label(label: &str) -> &str {
    LABEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == label)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(label)
}

pub fn resolve_label(raw: &str) -> ResolvedLabel {
    let label = raw.trim();
    if let Some(id) = label.strip_prefix(EXPLICIT_ID_PREFIX) {
        return match id.trim().parse::<FieldId>() {
            Ok(id) => ResolvedLabel::Field {
                id,
                origin: LabelOrigin::Explicit,
            },
            Err(_) => ResolvedLabel::Unresolved,
        };
    }

    let label = canonical_label(label);
    if let Some(field) = ScalarField::from_label(label) {
        return ResolvedLabel::Field {
            id: FieldId::Scalar(field),
            origin: LabelOrigin::Semantic,
        };
    }
    if let Some(legacy) = LegacyLabel::from_label(label) {
        return ResolvedLabel::Legacy(legacy);
    }
    if let Some(id) = match_template(label) {
        return ResolvedLabel::Field {
            id,
            origin: LabelOrigin::Semantic,
        };
    }
    match label.parse::<FieldId>() {
        Ok(id) => ResolvedLabel::Field {
            id,
            origin: LabelOrigin::Explicit,
        },
        Err(_) => ResolvedLabel::Unresolved,
    }
}

fn match_template(label: &str) -> Option<FieldId> {
    if let Some(caps) = CATEGORY_ITEM.captures(label) {
        let category = parse_index(&caps[1])?;
        let item = parse_index(&caps[2])?;
        let member = ItemMember::from_label(&caps[3])?;
        return Some(FieldId::item(category, item, member));
    }
    if let Some(caps) = CATEGORY_ITEM_COUNT.captures(label) {
        return parse_index(&caps[1]).map(FieldId::category_item_count);
    }
    if let Some(caps) = CATEGORY_NAME.captures(label) {
        return parse_index(&caps[1]).map(FieldId::category_name);
    }
    GROUP_TEMPLATES.iter().find_map(|(kind, pattern)| {
        let caps = pattern.captures(label)?;
        let index = parse_index(&caps[1])?;
        let member = Member::from_label(&caps[2]).filter(|member| kind.has_member(*member))?;
        Some(FieldId::member(*kind, member, index))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use showbudget_domain::{CountField, ItemMember};

    fn field(raw: &str) -> Option<FieldId> {
        match resolve_label(raw) {
            ResolvedLabel::Field { id, .. } => Some(id),
            _ => None,
        }
    }

    #[test]
    fn aliases_resolve_to_the_canonical_field() {
        let canonical = field("Physical Flyers");
        assert_eq!(canonical, Some(FieldId::Scalar(ScalarField::PhysicalFlyers)));
        assert_eq!(field("Flyers"), canonical);
        assert_eq!(field("Flyer Cost"), canonical);
        assert_eq!(field("Physical Flyer Cost"), canonical);
        assert_eq!(
            field("Direct Support"),
            Some(FieldId::Scalar(ScalarField::DirectSupport))
        );
    }

    #[test]
    fn templated_labels_carry_indices() {
        assert_eq!(
            field("Headliner 3 Fee"),
            Some(FieldId::member(GroupKind::Headliner, Member::Fee, 3))
        );
        assert_eq!(
            field("local dj 2 name"),
            Some(FieldId::member(GroupKind::LocalDj, Member::Name, 2))
        );
        assert_eq!(
            field("Merch Vendor 1 Fee"),
            Some(FieldId::member(GroupKind::MerchVendor, Member::Fee, 1))
        );
        assert_eq!(
            field("Show Runner 4 Fee"),
            Some(FieldId::member(GroupKind::ShowRunner, Member::Fee, 4))
        );
        assert_eq!(field("Category 2 Items"), Some(FieldId::category_item_count(2)));
        assert_eq!(
            field("Category 2 Items Count"),
            Some(FieldId::category_item_count(2))
        );
        assert_eq!(
            field("Category 1 Item 5 Fee"),
            Some(FieldId::item(1, 5, ItemMember::Fee))
        );
    }

    #[test]
    fn templated_labels_reject_foreign_members_and_zero() {
        assert_eq!(field("CDJ 1 Name"), None);
        assert_eq!(field("Headliner 0 Fee"), None);
    }

    #[test]
    fn explicit_ids_are_used_verbatim() {
        let resolved = resolve_label("ID:numOtherCategories");
        assert_eq!(
            resolved,
            ResolvedLabel::Field {
                id: FieldId::Count(CountField::OtherCategories),
                origin: LabelOrigin::Explicit,
            }
        );
        assert_eq!(resolve_label("ID:notAField"), ResolvedLabel::Unresolved);
        assert_eq!(
            resolve_label("vjFee"),
            ResolvedLabel::Field {
                id: FieldId::Scalar(ScalarField::VjFee),
                origin: LabelOrigin::Explicit,
            }
        );
    }

    #[test]
    fn legacy_and_noise_labels() {
        assert_eq!(
            resolve_label("Facebook Ads"),
            ResolvedLabel::Legacy(LegacyLabel::FacebookAds)
        );
        assert_eq!(
            field("Facebook Ads XODIA"),
            Some(FieldId::Scalar(ScalarField::FacebookAdsXodia))
        );
        assert_eq!(resolve_label("Headliners:"), ResolvedLabel::Unresolved);
        assert_eq!(resolve_label(""), ResolvedLabel::Unresolved);
    }
}
