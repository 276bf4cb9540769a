use std::path::{Path, PathBuf};

use showbudget_core::ApplyReport;
use showbudget_storage_json::{read_snapshot_file, write_snapshot_file};
use tracing::info;

use crate::cli::core::{require_arg, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const MAX_LISTED_DROPS: usize = 5;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("report", "Print the plain-text budget report", "report", cmd_report),
        CommandEntry::new("encode", "Print the budget as snapshot text", "encode", cmd_encode),
        CommandEntry::new(
            "import",
            "Replace the budget with a snapshot file",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new(
            "export",
            "Write the snapshot or the text report to a file",
            "export [snapshot|report] [path]",
            cmd_export,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportKind {
    Snapshot,
    Report,
}

fn cmd_report(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::plain(context.session.report().trim_end());
    Ok(())
}

fn cmd_encode(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::plain(context.session.encode().trim_end_matches('\n'));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = PathBuf::from(require_arg(args, 0, "import <path>")?);
    let text = read_snapshot_file(&path)?;
    let report = context.session.import_text(&text)?;
    info!(path = %path.display(), applied = report.applied, "snapshot imported");
    print_import_report(&report);
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, rest) = match args.first().map(|arg| arg.to_ascii_lowercase()) {
        Some(word) if word == "snapshot" || word == "csv" => (ExportKind::Snapshot, &args[1..]),
        Some(word) if word == "report" || word == "txt" => (ExportKind::Report, &args[1..]),
        _ => (ExportKind::Snapshot, args),
    };
    if rest.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: export [snapshot|report] [path]".into(),
        ));
    }

    let (file_name, body) = match kind {
        ExportKind::Snapshot => (context.session.snapshot_file_name(), context.session.encode()),
        ExportKind::Report => (context.session.report_file_name(), context.session.report()),
    };
    let path = match rest.first() {
        Some(raw) => export_target(Path::new(raw), &file_name),
        None => context.config.resolve_export_dir().join(&file_name),
    };
    write_snapshot_file(&path, &body)?;
    info!(path = %path.display(), ?kind, "budget exported");
    io::print_success(format!("Exported to {}", path.display()));
    Ok(())
}

/// An existing directory receives the generated file name; anything else is the file itself.
fn export_target(raw: &Path, file_name: &str) -> PathBuf {
    if raw.is_dir() {
        raw.join(file_name)
    } else {
        raw.to_path_buf()
    }
}

pub(crate) fn print_import_report(report: &ApplyReport) {
    io::print_success(report.status());
    if report.dropped.is_empty() {
        return;
    }
    let mut listed: Vec<&str> = report
        .dropped
        .iter()
        .take(MAX_LISTED_DROPS)
        .map(String::as_str)
        .collect();
    if report.dropped.len() > MAX_LISTED_DROPS {
        listed.push("...");
    }
    io::print_hint(format!("Skipped: {}", listed.join(", ")));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_receive_the_generated_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            export_target(dir.path(), "budget_Test_NO_DATE.csv"),
            dir.path().join("budget_Test_NO_DATE.csv")
        );
        let file = dir.path().join("mine.csv");
        assert_eq!(export_target(&file, "ignored.csv"), file);
    }
}
