//! Application of a decoded snapshot onto a [`FieldStore`].
//!
//! Structure is applied before any leaf value: group counts, group regeneration, the category
//! count, each category's item count, item regeneration. Only then are leaf values written,
//! so a leaf is never dropped because its slot had not been materialized yet.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use showbudget_domain::{parse_count, CountField, FieldId, FieldStore, GroupKind, ScalarField};

use crate::codec::DecodedSnapshot;
use crate::error::CoreError;
use crate::group_store::GroupStore;
use crate::labels::{resolve_label, LabelOrigin, LegacyLabel, ResolvedLabel};
use crate::repeater::Repeater;

/// Qualifier that routes a legacy ad-spend value into the SPACE CAMP HQ field.
pub const SPACE_CAMP_QUALIFIER: &str = "SPACE CAMP HQ";

struct LegacySplit {
    amount: LegacyLabel,
    account: LegacyLabel,
    primary: ScalarField,
    alternate: ScalarField,
}

const LEGACY_SPLITS: [LegacySplit; 2] = [
    LegacySplit {
        amount: LegacyLabel::FacebookAds,
        account: LegacyLabel::FacebookAdsAccount,
        primary: ScalarField::FacebookAdsXodia,
        alternate: ScalarField::FacebookAdsSpaceCampHq,
    },
    LegacySplit {
        amount: LegacyLabel::InstagramAds,
        account: LegacyLabel::InstagramAdsAccount,
        primary: ScalarField::InstagramAdsXodia,
        alternate: ScalarField::InstagramAdsSpaceCampHq,
    },
];

/// What an [`apply`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub version: u32,
    /// Fields written, structural fields included.
    pub applied: usize,
    /// Labels that did not resolve or whose field does not exist after regeneration.
    pub dropped: Vec<String>,
    /// Counts raised to cover indices referenced by semantic labels.
    pub inferred_counts: Vec<(FieldId, usize)>,
    /// Fields filled from a legacy combined ad-spend value.
    pub legacy_migrations: Vec<ScalarField>,
}

impl ApplyReport {
    pub fn status(&self) -> String {
        let mut status = format!("Imported {} field(s)", self.applied);
        if !self.dropped.is_empty() {
            status.push_str(&format!(", skipped {} unknown row(s)", self.dropped.len()));
        }
        if !self.legacy_migrations.is_empty() {
            status.push_str(&format!(
                ", migrated {} legacy ad field(s)",
                self.legacy_migrations.len()
            ));
        }
        status.push('.');
        status
    }
}

struct Resolved {
    values: BTreeMap<FieldId, (String, String)>,
    legacy: HashMap<LegacyLabel, String>,
    dropped: Vec<String>,
    group_max: BTreeMap<GroupKind, usize>,
    category_max: usize,
    item_max: BTreeMap<usize, usize>,
}

impl Resolved {
    fn collect(snapshot: &DecodedSnapshot) -> Self {
        let mut resolved = Resolved {
            values: BTreeMap::new(),
            legacy: HashMap::new(),
            dropped: Vec::new(),
            group_max: BTreeMap::new(),
            category_max: 0,
            item_max: BTreeMap::new(),
        };
        for (label, value) in &snapshot.pairs {
            match resolve_label(label) {
                ResolvedLabel::Field { id, origin } => {
                    if origin == LabelOrigin::Semantic {
                        resolved.note_index(&id);
                    }
                    resolved.values.insert(id, (label.clone(), value.clone()));
                }
                ResolvedLabel::Legacy(legacy) => {
                    resolved.legacy.insert(legacy, value.clone());
                }
                ResolvedLabel::Unresolved => {
                    debug!(label = %label, "unresolved snapshot label dropped");
                    resolved.dropped.push(label.clone());
                }
            }
        }
        resolved
    }

    fn note_index(&mut self, id: &FieldId) {
        match *id {
            FieldId::GroupMember { kind, index, .. } => {
                let max = self.group_max.entry(kind).or_default();
                *max = (*max).max(index);
            }
            FieldId::CategoryMeta { category, .. } => {
                self.category_max = self.category_max.max(category);
            }
            FieldId::CategoryItem { category, item, .. } => {
                self.category_max = self.category_max.max(category);
                let max = self.item_max.entry(category).or_default();
                *max = (*max).max(item);
            }
            FieldId::Scalar(_) | FieldId::Count(_) => {}
        }
    }

    fn declared(&self, id: &FieldId, default: usize) -> usize {
        self.values
            .get(id)
            .map(|(_, value)| parse_count(value))
            .unwrap_or(default)
    }

    /// Grows counts to the highest index a semantic label referenced.
    fn infer_counts(&mut self) -> Vec<(FieldId, usize)> {
        let mut wanted: Vec<(FieldId, usize, usize)> = Vec::new();
        for (kind, max) in &self.group_max {
            let id = FieldId::Count(kind.count_field());
            wanted.push((id, *max, kind.default_count()));
        }
        if self.category_max > 0 {
            wanted.push((FieldId::Count(CountField::OtherCategories), self.category_max, 0));
        }
        for (category, max) in &self.item_max {
            wanted.push((FieldId::category_item_count(*category), *max, 0));
        }

        let mut inferred = Vec::new();
        for (id, max, default) in wanted {
            if self.declared(&id, default) < max {
                let label = id.to_string();
                self.values.insert(id, (label, max.to_string()));
                inferred.push((id, max));
            }
        }
        inferred
    }
}

/// Replaces the contents of `store` with `snapshot`.
///
/// The store and the group cache are reset first, so applying the same snapshot twice yields
/// the same store.
pub fn apply(
    store: &mut FieldStore,
    cache: &mut GroupStore,
    snapshot: &DecodedSnapshot,
) -> Result<ApplyReport, CoreError> {
    store.reset();
    cache.clear();

    let mut resolved = Resolved::collect(snapshot);
    let inferred_counts = resolved.infer_counts();
    for (id, count) in &inferred_counts {
        debug!(field = %id, count, "count inferred from semantic labels");
    }

    apply_structure(store, cache, &resolved.values)?;

    let mut report = ApplyReport {
        version: snapshot.version,
        inferred_counts,
        ..ApplyReport::default()
    };
    for (id, (label, value)) in &resolved.values {
        if !store.contains(id) {
            debug!(label = %label, field = %id, "snapshot row has no live field");
            report.dropped.push(label.clone());
            continue;
        }
        if !id.is_structural() {
            store.set(id, value.as_str())?;
        }
        report.applied += 1;
    }
    report.dropped.append(&mut resolved.dropped);

    for split in &LEGACY_SPLITS {
        if let Some(field) = migrate_legacy(store, &resolved.legacy, split)? {
            report.legacy_migrations.push(field);
            report.applied += 1;
        }
    }

    info!(
        version = report.version,
        applied = report.applied,
        dropped = report.dropped.len(),
        "snapshot applied"
    );
    Ok(report)
}

fn apply_structure(
    store: &mut FieldStore,
    cache: &mut GroupStore,
    values: &BTreeMap<FieldId, (String, String)>,
) -> Result<(), CoreError> {
    let mut repeater = Repeater::new(store, cache);

    for kind in GroupKind::ALL {
        match values.get(&FieldId::Count(kind.count_field())) {
            Some((_, raw)) => repeater.set_count(kind, raw)?,
            None => repeater.regenerate(kind),
        };
    }

    match values.get(&FieldId::Count(CountField::OtherCategories)) {
        Some((_, raw)) => repeater.set_category_count(raw)?,
        None => repeater.regenerate_categories(),
    };
    for category in 1..=repeater.category_count() {
        match values.get(&FieldId::category_item_count(category)) {
            Some((_, raw)) => repeater.set_item_count(category, raw)?,
            None => repeater.regenerate_items(category)?,
        };
    }
    drop(repeater);

    store.verify_structure()?;
    Ok(())
}

fn migrate_legacy(
    store: &mut FieldStore,
    legacy: &HashMap<LegacyLabel, String>,
    split: &LegacySplit,
) -> Result<Option<ScalarField>, CoreError> {
    let Some(amount) = legacy.get(&split.amount) else {
        return Ok(None);
    };
    let untouched = store.scalar(split.primary).trim().is_empty()
        && store.scalar(split.alternate).trim().is_empty();
    if amount.trim().is_empty() || !untouched {
        debug!(label = split.amount.label(), "legacy ad value ignored");
        return Ok(None);
    }
    let alternate = legacy
        .get(&split.account)
        .map(|account| account.trim().to_uppercase() == SPACE_CAMP_QUALIFIER)
        .unwrap_or(false);
    let target = if alternate {
        split.alternate
    } else {
        split.primary
    };
    store.set(&FieldId::Scalar(target), amount.as_str())?;
    debug!(from = split.amount.label(), to = target.id(), "legacy ad value migrated");
    Ok(Some(target))
}
