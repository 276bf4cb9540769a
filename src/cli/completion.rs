//! Tab completion for the interactive shell.
//!
//! The command word completes from the registry. Arguments complete from the open budget:
//! `set`/`get` offer live field ids and scalar labels, `count` offers the repeated groups,
//! `items` offers existing category numbers and `export` offers its two targets.

use rustyline::{
    completion::{Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use showbudget_domain::{live_fields, FieldStore, ScalarField};

const COUNT_TARGETS: [&str; 6] = ["headliners", "djs", "cdjs", "runners", "vendors", "categories"];
const EXPORT_TARGETS: [&str; 2] = ["snapshot", "report"];

pub(crate) struct BudgetCompleter {
    commands: Vec<String>,
    fields: Vec<String>,
    categories: usize,
}

impl BudgetCompleter {
    pub(crate) fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            fields: Vec::new(),
            categories: 0,
        }
    }

    /// Picks up the fields that exist right now. Called before every prompt.
    pub(crate) fn refresh(&mut self, store: &FieldStore) {
        self.fields = live_fields(store)
            .into_iter()
            .map(|id| id.to_string())
            .chain(ScalarField::ALL.iter().map(|field| field.label().to_string()))
            .collect();
        self.categories = store.categories().len();
    }

    /// Returns where the replaced word starts and the candidates for it.
    pub(crate) fn candidates(&self, prefix: &str) -> (usize, Vec<Pair>) {
        let (words, start) = split_words(prefix);
        let needle = prefix[start..].trim_start_matches('"').to_lowercase();
        let command = words.first().map(|word| word.to_ascii_lowercase());

        let pool: Vec<String> = match (command.as_deref(), words.len()) {
            (None, _) => self.commands.clone(),
            (Some("set" | "get"), 1) => self.fields.clone(),
            (Some("count"), 1) => COUNT_TARGETS.iter().map(|s| s.to_string()).collect(),
            (Some("items"), 1) => (1..=self.categories).map(|n| n.to_string()).collect(),
            (Some("export"), 1) => EXPORT_TARGETS.iter().map(|s| s.to_string()).collect(),
            _ => Vec::new(),
        };

        let pairs = pool
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                replacement: quote_if_spaced(&candidate),
                display: candidate,
            })
            .collect();
        (start, pairs)
    }
}

/// Finished words before the cursor, and the byte offset of the word being typed.
fn split_words(prefix: &str) -> (Vec<&str>, usize) {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_word = false;
    let mut quoted = false;

    for (idx, ch) in prefix.char_indices() {
        if ch.is_whitespace() && !quoted {
            if in_word {
                words.push(prefix[start..idx].trim_matches('"'));
                in_word = false;
            }
            continue;
        }
        if !in_word {
            in_word = true;
            start = idx;
        }
        if ch == '"' {
            quoted = !quoted;
        }
    }
    let current = if in_word { start } else { prefix.len() };
    (words, current)
}

fn quote_if_spaced(candidate: &str) -> String {
    if candidate.contains(char::is_whitespace) {
        format!("\"{candidate}\"")
    } else {
        candidate.to_string()
    }
}

impl Helper for BudgetCompleter {}

impl Completer for BudgetCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Hinter for BudgetCompleter {
    type Hint = String;
}

impl Highlighter for BudgetCompleter {}

impl Validator for BudgetCompleter {}
