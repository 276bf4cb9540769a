//! Plain-text budget report.

use showbudget_domain::{FieldStore, GroupKind, Member, ScalarField};

use crate::ledger::{amount, money, signed_money, BudgetSummary};

const MIN_LABEL_WIDTH: usize = 32;
const MONEY_WIDTH: usize = 12;
const RULE: &str = "--------------------------------";

enum Row {
    Money { label: String, value: f64 },
    Heading(String),
    Blank,
}

impl Row {
    fn money(label: impl Into<String>, value: f64) -> Self {
        Row::Money {
            label: label.into(),
            value,
        }
    }
}

struct Section {
    title: &'static str,
    rows: Vec<Row>,
}

impl Section {
    fn total(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| match row {
                Row::Money { value, .. } => *value,
                _ => 0.0,
            })
            .sum()
    }
}

/// Renders the budget as a fixed-width text report.
///
/// Money columns are right-aligned after a label column at least 32 characters wide; the
/// net profit line is signed.
pub fn render_report(store: &FieldStore, summary: &BudgetSummary) -> String {
    let sections = expense_sections(store);
    let revenue = vec![
        Row::money("Eventbrite Sales:", summary.revenue.eventbrite),
        Row::money("DJ Presales:", summary.revenue.presales),
        Row::money("Promo Team:", summary.revenue.promo),
        Row::money("Door Sales:", summary.revenue.door),
        Row::money("Merch Sold:", summary.revenue.merch_sold),
        Row::money("Merch Vendors:", summary.revenue.merch_vendors),
    ];

    let mut width = MIN_LABEL_WIDTH;
    for section in &sections {
        width = width.max(section.title.len());
        for row in section.rows.iter().chain(&revenue) {
            if let Row::Money { label, .. } = row {
                width = width.max(label.chars().count());
            }
        }
    }
    let line = |label: &str, value: f64| {
        format!(
            "{:<width$}  {:>money_width$}",
            label,
            money(value),
            width = width,
            money_width = MONEY_WIDTH
        )
    };

    let title = non_empty(store.scalar(ScalarField::ShowTitle)).unwrap_or("UNTITLED EVENT");
    let mut header = format!("EVENT: {}", title.to_uppercase());
    if let Some(date) = non_empty(store.scalar(ScalarField::ShowDate)) {
        header.push_str(&format!("  |  DATE: {date}"));
    }

    let mut lines = vec![header, String::new(), "EXPENSES".into(), RULE.into()];
    let mut total_expenses = 0.0;
    for section in sections.iter().filter(|section| !section.rows.is_empty()) {
        lines.push(section.title.to_uppercase());
        for row in &section.rows {
            lines.push(match row {
                Row::Money { label, value } => line(label, *value),
                Row::Heading(text) => text.clone(),
                Row::Blank => String::new(),
            });
        }
        let total = section.total();
        total_expenses += total;
        lines.push(line(
            &format!("TOTAL {}:", section.title.to_uppercase()),
            total,
        ));
        lines.push(String::new());
    }
    lines.push(RULE.into());
    lines.push(line("TOTAL EXPENSES:", total_expenses));
    lines.push(String::new());

    lines.push("REVENUE".into());
    lines.push(RULE.into());
    for row in &revenue {
        if let Row::Money { label, value } = row {
            lines.push(line(label, *value));
        }
    }
    lines.push(RULE.into());
    lines.push(line("TOTAL REVENUE:", summary.revenue.total));
    lines.push(String::new());

    lines.push("NET PROFIT".into());
    lines.push(RULE.into());
    lines.push(signed_money(summary.net_profit));
    lines.join("\n")
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|value| !value.is_empty())
}

fn number(store: &FieldStore, field: ScalarField) -> f64 {
    amount(store.scalar(field))
}

fn member(store: &FieldStore, kind: GroupKind, index: usize, member: Member) -> (String, f64) {
    let slot = &store.group_slots(kind)[index - 1];
    let name = slot
        .get(Member::Name)
        .and_then(non_empty)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {index}", kind.label()));
    (name, amount(slot.get(member).unwrap_or_default()))
}

fn expense_sections(store: &FieldStore) -> Vec<Section> {
    let headliners = (1..=store.group_slots(GroupKind::Headliner).len())
        .flat_map(|index| {
            [Member::Fee, Member::Hotel, Member::Rider].map(|field| {
                let (name, value) = member(store, GroupKind::Headliner, index, field);
                Row::money(format!("{name} {}:", field.label()), value)
            })
        })
        .collect();

    let mut support = vec![Row::money(
        "Direct Support:",
        number(store, ScalarField::DirectSupport),
    )];
    for index in 1..=store.group_slots(GroupKind::LocalDj).len() {
        let (name, value) = member(store, GroupKind::LocalDj, index, Member::Fee);
        support.push(Row::money(format!("{name} Fee:"), value));
    }

    let production = [
        ("VJ Fee:", ScalarField::VjFee),
        ("Venue:", ScalarField::Venue),
        ("LED Wall:", ScalarField::LedWall),
        ("Lights:", ScalarField::Lights),
        ("Lasers:", ScalarField::Lasers),
    ]
    .into_iter()
    .map(|(label, field)| Row::money(label, number(store, field)))
    .collect();

    let mut gear: Vec<Row> = (1..=store.group_slots(GroupKind::Cdj).len())
        .map(|index| {
            let (_, value) = member(store, GroupKind::Cdj, index, Member::Fee);
            Row::money(format!("CDJ {index}:"), value)
        })
        .collect();
    gear.push(Row::money("Mixer:", number(store, ScalarField::Mixer)));
    gear.push(Row::money("Sound:", number(store, ScalarField::Sound)));
    gear.push(Row::money("Table:", number(store, ScalarField::Table)));

    let marketing = vec![
        Row::Heading("Facebook Ads".into()),
        Row::money("XODIA:", number(store, ScalarField::FacebookAdsXodia)),
        Row::money(
            "SPACE CAMP HQ:",
            number(store, ScalarField::FacebookAdsSpaceCampHq),
        ),
        Row::Blank,
        Row::Heading("Instagram Ads".into()),
        Row::money("XODIA:", number(store, ScalarField::InstagramAdsXodia)),
        Row::money(
            "SPACE CAMP HQ:",
            number(store, ScalarField::InstagramAdsSpaceCampHq),
        ),
        Row::Blank,
        Row::money("Physical Flyers:", number(store, ScalarField::PhysicalFlyers)),
        Row::money("Eventbrite Ads:", number(store, ScalarField::EventbriteAds)),
    ];

    let mut staff = vec![
        Row::money("Door Staff:", number(store, ScalarField::DoorStaff)),
        Row::money("Merch Table:", number(store, ScalarField::MerchTable)),
        Row::money("Transportation:", number(store, ScalarField::Transportation)),
    ];
    for index in 1..=store.group_slots(GroupKind::ShowRunner).len() {
        let (_, value) = member(store, GroupKind::ShowRunner, index, Member::Fee);
        staff.push(Row::money(format!("Show Runner {index}:"), value));
    }

    let mut other = Vec::new();
    for (idx, category) in store.categories().iter().enumerate() {
        let heading = non_empty(&category.name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Category {}", idx + 1));
        other.push(Row::Heading(heading));
        for (item_idx, item) in category.items.iter().enumerate() {
            let name = non_empty(&item.name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Item {}", item_idx + 1));
            other.push(Row::money(format!("{name}:"), amount(&item.fee)));
        }
        other.push(Row::Blank);
    }

    vec![
        Section {
            title: "Headliners",
            rows: headliners,
        },
        Section {
            title: "Support",
            rows: support,
        },
        Section {
            title: "Production",
            rows: production,
        },
        Section {
            title: "Gear Rentals",
            rows: gear,
        },
        Section {
            title: "Marketing",
            rows: marketing,
        },
        Section {
            title: "Staff",
            rows: staff,
        },
        Section {
            title: "Other",
            rows: other,
        },
    ]
}
