//! Core CLI dispatch, errors and shell context helpers.

use std::io;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::warn;

use showbudget_core::{BudgetSession, CoreError};
use showbudget_domain::ScalarField;
use showbudget_storage_json::JsonSnapshotStorage;

pub use crate::errors::CliError;
use crate::errors::BudgetError;
use crate::utils::paths;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

const PROMPT_TITLE_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = paths::config_manager()?;
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.color_enabled && mode == CliMode::Interactive,
        });
        let storage = JsonSnapshotStorage::new(paths::budgets_dir(&config))?;

        let mut app = ShellContext {
            mode,
            registry,
            session: BudgetSession::new(Box::new(storage)),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            running: true,
        };
        app.auto_load_last();
        Ok(app)
    }

    fn auto_load_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(id) = self.config.last_loaded_snapshot.clone() else {
            return;
        };
        match self.session.load(&id) {
            Ok(report) => cli_io::print_success(format!(
                "Automatically loaded last budget `{id}`. {}",
                report.status()
            )),
            Err(err) => warn!(id, error = %err, "could not reopen last budget"),
        }
    }

    pub(crate) fn prompt(&self) -> String {
        let title = self.session.store().scalar(ScalarField::ShowTitle).trim();
        if title.is_empty() {
            return "showbudget> ".into();
        }
        let short: String = title.chars().take(PROMPT_TITLE_WIDTH).collect();
        format!("showbudget[{short}]> ")
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Records `id` as the budget to reopen on the next interactive start.
    pub(crate) fn remember_snapshot(&mut self, id: Option<&str>) -> CommandResult {
        self.config.last_loaded_snapshot = id.map(str::to_string);
        self.config_manager
            .save(&self.config)
            .map_err(|err| CommandError::Core(err.into()))
    }

    /// Asks before a destructive action. Script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Splits one input line and runs it. `exit` also stops the shell.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?").map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Session(err) => {
                self.print_error(&err.status_message());
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }
}

/// Joins the arguments after the leading ones into one value, so unquoted words still work.
pub(crate) fn rest_of(args: &[&str], skip: usize) -> String {
    args.iter().skip(skip).copied().collect::<Vec<_>>().join(" ")
}

pub(crate) fn require_arg<'a>(
    args: &[&'a str],
    index: usize,
    usage: &str,
) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

pub(crate) fn parse_index(raw: &str, what: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "{what} must be a positive number, got `{raw}`"
        ))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Session(#[from] CoreError),
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::new(CliMode::Script)?;
    for line in lines {
        match app.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showbudget_domain::{FieldId, GroupKind, Member};
    use std::sync::Mutex;

    // SHOWBUDGET_HOME is process wide.
    static HOME_LOCK: Mutex<()> = Mutex::new(());

    fn with_home<T>(body: impl FnOnce() -> T) -> T {
        let _guard = HOME_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let home = tempfile::tempdir().expect("tempdir");
        std::env::set_var("SHOWBUDGET_HOME", home.path());
        body()
    }

    #[test]
    fn script_edits_reach_the_session() {
        with_home(|| {
            let app = process_script(&[
                "set \"Show Title\" Warehouse Night",
                "count headliners 2",
                "set headliner_fee_2 750",
            ])
            .expect("script");
            let store = app.session.store();
            assert_eq!(store.scalar(ScalarField::ShowTitle), "Warehouse Night");
            assert_eq!(
                store.get(&FieldId::member(GroupKind::Headliner, Member::Fee, 2)),
                Some("750")
            );
            assert_eq!(app.session.summary().expenses.headliners, 750.0);
        });
    }

    #[test]
    fn exit_stops_the_script() {
        with_home(|| {
            let app = process_script(&["exit", "set venue 100"]).expect("script");
            assert_eq!(app.session.store().scalar(ScalarField::Venue), "");
        });
    }

    #[test]
    fn command_errors_surface_to_the_caller() {
        with_home(|| {
            let mut app = ShellContext::new(CliMode::Script).expect("context");
            assert!(matches!(
                app.process_line("set"),
                Err(CommandError::InvalidArguments(_))
            ));
            assert!(matches!(
                app.process_line("load missing-budget"),
                Err(CommandError::Session(CoreError::NotFound(_)))
            ));
            assert!(matches!(app.process_line("sett venue 1"), Ok(LoopControl::Continue)));
        });
    }

    #[test]
    fn saving_remembers_the_budget() {
        with_home(|| {
            let app = process_script(&["set \"Show Title\" Launch", "save"]).expect("script");
            let remembered = app.config.last_loaded_snapshot.clone().expect("remembered");
            let stored = app.config_manager.load().expect("config");
            assert_eq!(stored.last_loaded_snapshot.as_deref(), Some(remembered.as_str()));
        });
    }

    #[test]
    fn quoted_labels_stay_together() {
        with_home(|| {
            let mut app = ShellContext::new(CliMode::Script).expect("context");
            app.process_line("set \"Physical Flyers\" 45").expect("quoted label");
            assert_eq!(app.session.store().scalar(ScalarField::PhysicalFlyers), "45");
            assert!(matches!(
                app.process_line("set \"unterminated"),
                Ok(LoopControl::Continue)
            ));
            assert!(app.process_line("exit").is_ok());
            assert!(!app.running);
        });
    }

    #[test]
    fn prompt_shows_the_show_title() {
        with_home(|| {
            let mut app = ShellContext::new(CliMode::Script).expect("context");
            assert_eq!(app.prompt(), "showbudget> ");
            app.process_line("set \"Show Title\" Night").expect("title");
            assert_eq!(app.prompt(), "showbudget[Night]> ");
        });
    }
}
