//! File names for exported snapshots and reports.

use showbudget_domain::{FieldStore, ScalarField};

pub const DEFAULT_EXPORT_NAME: &str = "budget_export";
const MAX_FILE_NAME_CHARS: usize = 80;
const FORBIDDEN: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Strips path-hostile characters, replaces whitespace runs with `_` and caps the length.
pub fn safe_file_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !FORBIDDEN.contains(ch))
        .collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    let capped: String = joined.chars().take(MAX_FILE_NAME_CHARS).collect();
    if capped.is_empty() {
        DEFAULT_EXPORT_NAME.to_string()
    } else {
        capped
    }
}

/// `budget_<title>_<date>` with placeholders for a blank title or date.
pub fn export_base_name(store: &FieldStore) -> String {
    let title = fallback(store.scalar(ScalarField::ShowTitle), "UNTITLED_EVENT");
    let date = fallback(store.scalar(ScalarField::ShowDate), "NO_DATE");
    safe_file_name(&format!("budget_{title}_{date}"))
}

pub fn snapshot_file_name(store: &FieldStore) -> String {
    format!("{}.csv", export_base_name(store))
}

pub fn report_file_name(store: &FieldStore) -> String {
    let parts: Vec<&str> = [ScalarField::ShowTitle, ScalarField::ShowDate]
        .into_iter()
        .map(|field| store.scalar(field))
        .filter(|value| !value.is_empty())
        .collect();
    let base = if parts.is_empty() {
        DEFAULT_EXPORT_NAME.to_string()
    } else {
        parts.join("_")
    };
    format!("{}.txt", safe_file_name(&base))
}

fn fallback<'a>(value: &'a str, default: &'a str) -> &'a str {
    match value.trim() {
        "" => default,
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showbudget_domain::FieldId;

    #[test]
    fn safe_names_drop_forbidden_characters() {
        assert_eq!(safe_file_name("  Rave: Night / 2  "), "Rave_Night_2");
        assert_eq!(safe_file_name("???"), DEFAULT_EXPORT_NAME);
        assert_eq!(safe_file_name(&"x".repeat(120)).len(), 80);
    }

    #[test]
    fn export_names_use_placeholders() {
        let mut store = FieldStore::new();
        assert_eq!(snapshot_file_name(&store), "budget_UNTITLED_EVENT_NO_DATE.csv");
        assert_eq!(report_file_name(&store), "budget_export.txt");

        store
            .set(&FieldId::Scalar(ScalarField::ShowTitle), "Space Camp")
            .expect("title");
        store
            .set(&FieldId::Scalar(ScalarField::ShowDate), "2025-03-01")
            .expect("date");
        assert_eq!(snapshot_file_name(&store), "budget_Space_Camp_2025-03-01.csv");
        assert_eq!(report_file_name(&store), "Space_Camp_2025-03-01.txt");
    }
}
