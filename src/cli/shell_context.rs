use dialoguer::theme::ColorfulTheme;

use showbudget_config::{Config, ConfigManager};
use showbudget_core::BudgetSession;
use showbudget_domain::ScalarField;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: BudgetSession,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, title: {:?}, last_loaded: {:?} }}",
            self.running,
            self.session.store().scalar(ScalarField::ShowTitle),
            self.config.last_loaded_snapshot
        )
    }
}
