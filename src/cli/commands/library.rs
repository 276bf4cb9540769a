use showbudget_core::CoreError;
use showbudget_domain::{SavedSnapshot, ScalarField};

use crate::cli::commands::files::print_import_report;
use crate::cli::core::{require_arg, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("save", "Save the budget to the library", "save", cmd_save),
        CommandEntry::new("list", "List saved budgets, newest first", "list", cmd_list),
        CommandEntry::new(
            "load",
            "Open a saved budget by id or list position",
            "load <id|#>",
            cmd_load,
        ),
        CommandEntry::new(
            "delete",
            "Delete a saved budget by id or list position",
            "delete <id|#>",
            cmd_delete,
        ),
    ]
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let id = context.session.save()?;
    context.remember_snapshot(Some(&id))?;
    let title = context.session.store().scalar(ScalarField::ShowTitle).trim();
    io::print_success(format!("Saved `{title}` as {id}."));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let entries = context.session.list()?;
    if entries.is_empty() {
        io::print_info("No saved budgets yet.");
        return Ok(());
    }
    output::section("Saved budgets");
    for (position, entry) in entries.iter().enumerate() {
        output::plain(format!(
            "  {:>2}. {}  [{}]",
            position + 1,
            entry.display_label(),
            entry.id
        ));
    }
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = saved_id(context, require_arg(args, 0, "load <id|#>")?)?;
    let report = context.session.load(&id)?;
    context.remember_snapshot(Some(&id))?;
    print_import_report(&report);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = saved_id(context, require_arg(args, 0, "delete <id|#>")?)?;
    if !context.confirm(&format!("Delete saved budget {id}?"))? {
        io::print_info("Delete cancelled.");
        return Ok(());
    }
    context.session.delete(&id)?;
    if context.config.last_loaded_snapshot.as_deref() == Some(id.as_str()) {
        context.remember_snapshot(None)?;
    }
    io::print_success(format!("Deleted {id}."));
    Ok(())
}

/// Accepts either a snapshot id or a 1-based position in `list` output.
fn saved_id(context: &ShellContext, raw: &str) -> Result<String, CoreError> {
    let Ok(position) = raw.trim_start_matches('#').parse::<usize>() else {
        return Ok(raw.to_string());
    };
    let entries = context.session.list()?;
    Ok(pick(&entries, position).unwrap_or(raw).to_string())
}

fn pick(entries: &[SavedSnapshot], position: usize) -> Option<&str> {
    position
        .checked_sub(1)
        .and_then(|index| entries.get(index))
        .map(|entry| entry.id.as_str())
}
