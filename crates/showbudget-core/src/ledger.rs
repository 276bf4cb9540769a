use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use showbudget_domain::{
    FieldStore, GroupKind, Member, ScalarField, MARKETING_FIELDS, PRODUCTION_FIELDS,
    SALES_FIELDS,
};

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .unwrap_or_else(|err| panic!("invalid amount pattern: {err}"))
});

/// Reads the leading decimal number of a raw input. Blank or non-numeric input is zero.
pub fn amount(raw: &str) -> f64 {
    LEADING_NUMBER
        .find(raw.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExpenseTotals {
    pub headliners: f64,
    pub support: f64,
    pub production: f64,
    pub gear: f64,
    pub marketing: f64,
    pub staff: f64,
    pub other: f64,
    pub total: f64,
}

impl ExpenseTotals {
    pub fn sections(&self) -> [(&'static str, f64); 7] {
        [
            ("Headliners", self.headliners),
            ("Support", self.support),
            ("Production", self.production),
            ("Gear", self.gear),
            ("Marketing", self.marketing),
            ("Staff", self.staff),
            ("Other", self.other),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RevenueTotals {
    pub eventbrite: f64,
    pub presales: f64,
    pub promo: f64,
    pub door: f64,
    pub merch_sold: f64,
    pub merch_vendors: f64,
    pub total: f64,
}

impl RevenueTotals {
    pub fn sections(&self) -> [(&'static str, f64); 6] {
        [
            ("Eventbrite", self.eventbrite),
            ("Presales", self.presales),
            ("Promo", self.promo),
            ("Door", self.door),
            ("Merch Sold", self.merch_sold),
            ("Merch Vendors", self.merch_vendors),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub expenses: ExpenseTotals,
    pub revenue: RevenueTotals,
    pub net_profit: f64,
}

impl BudgetSummary {
    pub fn is_profitable(&self) -> bool {
        self.net_profit >= 0.0
    }

    /// Signed money text, e.g. `+$120.00` or `-$35.50`.
    pub fn net_profit_display(&self) -> String {
        signed_money(self.net_profit)
    }
}

pub fn money(value: f64) -> String {
    format!("${value:.2}")
}

pub fn signed_money(value: f64) -> String {
    let sign = if value >= 0.0 { '+' } else { '-' };
    format!("{sign}${:.2}", value.abs())
}

/// Derives expense, revenue and profit totals from the live field set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetLedger;

impl BudgetLedger {
    pub fn recompute(store: &FieldStore) -> BudgetSummary {
        let scalar = |field: ScalarField| amount(store.scalar(field));
        let scalars = |fields: &[ScalarField]| fields.iter().map(|f| scalar(*f)).sum::<f64>();

        let headliners = group_total(
            store,
            GroupKind::Headliner,
            &[Member::Fee, Member::Hotel, Member::Rider],
        );
        let support =
            scalar(ScalarField::DirectSupport) + group_total(store, GroupKind::LocalDj, &[Member::Fee]);
        let production = scalars(&PRODUCTION_FIELDS);
        let gear = group_total(store, GroupKind::Cdj, &[Member::Fee])
            + scalars(&[ScalarField::Sound, ScalarField::Mixer, ScalarField::Table]);
        let marketing = scalars(&MARKETING_FIELDS);
        let staff = scalars(&[
            ScalarField::DoorStaff,
            ScalarField::MerchTable,
            ScalarField::Transportation,
        ]) + group_total(store, GroupKind::ShowRunner, &[Member::Fee]);
        let other = store
            .categories()
            .iter()
            .flat_map(|category| category.items.iter())
            .map(|item| amount(&item.fee))
            .sum::<f64>();

        let expenses = ExpenseTotals {
            headliners,
            support,
            production,
            gear,
            marketing,
            staff,
            other,
            total: headliners + support + production + gear + marketing + staff + other,
        };

        let merch_vendors = group_total(store, GroupKind::MerchVendor, &[Member::Fee]);
        let revenue = RevenueTotals {
            eventbrite: scalar(ScalarField::EventbriteSales),
            presales: scalar(ScalarField::DjPresales),
            promo: scalar(ScalarField::PromoTeam),
            door: scalar(ScalarField::DoorSales),
            merch_sold: scalar(ScalarField::MerchSold),
            merch_vendors,
            total: scalars(&SALES_FIELDS) + merch_vendors,
        };

        BudgetSummary {
            net_profit: revenue.total - expenses.total,
            expenses,
            revenue,
        }
    }
}

fn group_total(store: &FieldStore, kind: GroupKind, members: &[Member]) -> f64 {
    store
        .group_slots(kind)
        .iter()
        .flat_map(|slot| members.iter().filter_map(|member| slot.get(*member)))
        .map(amount)
        .sum()
}
