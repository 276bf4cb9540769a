use showbudget_core::{ledger::money, Regenerated};
use showbudget_domain::{live_fields, CountField, FieldId, GroupKind};

use crate::cli::core::{
    parse_index, require_arg, rest_of, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "set",
            "Set a field by id or label",
            "set <field> <value>",
            cmd_set,
        ),
        CommandEntry::new("get", "Show one field value", "get <field>", cmd_get),
        CommandEntry::new(
            "count",
            "Show or change how many instances a group has",
            "count <headliners|djs|cdjs|runners|vendors|categories> [n]",
            cmd_count,
        ),
        CommandEntry::new(
            "items",
            "Show or change the item count of an other-expense category",
            "items <category> [n]",
            cmd_items,
        ),
        CommandEntry::new(
            "fields",
            "List live fields with their values",
            "fields [filter]",
            cmd_fields,
        ),
        CommandEntry::new("totals", "Show expense, revenue and profit totals", "totals", cmd_totals),
        CommandEntry::new("reset", "Discard the budget and start fresh", "reset", cmd_reset),
    ]
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "set <field> <value>";
    let field = context.session.resolve_field(require_arg(args, 0, usage)?)?;
    let value = rest_of(args, 1);
    match context.session.set_field(&field, &value)? {
        Some(regenerated) => report_regenerated(&regenerated),
        None => io::print_success(format!("Updated `{field}`.")),
    }
    Ok(())
}

fn cmd_get(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let field = context
        .session
        .resolve_field(require_arg(args, 0, "get <field>")?)?;
    match context.session.get(&field) {
        Some(value) => output::plain(format!("{field} = {value}")),
        None => {
            return Err(CommandError::Message(format!(
                "`{field}` is not part of the budget right now; raise its count first."
            )))
        }
    }
    Ok(())
}

fn cmd_count(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "count <headliners|djs|cdjs|runners|vendors|categories> [n]";
    let field = count_field(require_arg(args, 0, usage)?)?;
    match args.get(1) {
        None => output::plain(format!(
            "{} = {}",
            field.id(),
            context.session.store().count_input(field)
        )),
        Some(raw) => {
            if let Some(regenerated) = context.session.set_field(&FieldId::Count(field), raw)? {
                report_regenerated(&regenerated);
            }
        }
    }
    Ok(())
}

fn cmd_items(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = parse_index(require_arg(args, 0, "items <category> [n]")?, "category")?;
    match args.get(1) {
        None => {
            let category_slot = context.session.store().category(category).ok_or_else(|| {
                CommandError::Message(format!("category {category} does not exist"))
            })?;
            output::plain(format!(
                "{} = {}",
                FieldId::category_item_count(category),
                category_slot.item_count
            ));
        }
        Some(raw) => {
            let field = FieldId::category_item_count(category);
            if let Some(regenerated) = context.session.set_field(&field, raw)? {
                report_regenerated(&regenerated);
            }
        }
    }
    Ok(())
}

fn cmd_fields(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = args.first().map(|raw| raw.to_lowercase());
    let store = context.session.store();
    let mut shown = 0;
    for field in live_fields(store) {
        let id = field.to_string();
        if let Some(filter) = &filter {
            if !id.to_lowercase().contains(filter) {
                continue;
            }
        }
        output::plain(format!("  {id} = {}", store.get(&field).unwrap_or_default()));
        shown += 1;
    }
    if shown == 0 {
        io::print_info("No fields match.");
    }
    Ok(())
}

fn cmd_totals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.session.summary();
    output::section("Expenses");
    for (label, value) in summary.expenses.sections() {
        output::plain(format!("  {label:<14}{:>12}", money(value)));
    }
    output::plain(format!("  {:<14}{:>12}", "Total", money(summary.expenses.total)));

    output::section("Revenue");
    for (label, value) in summary.revenue.sections() {
        output::plain(format!("  {label:<14}{:>12}", money(value)));
    }
    output::plain(format!("  {:<14}{:>12}", "Total", money(summary.revenue.total)));

    let net = format!("Net profit: {}", summary.net_profit_display());
    if summary.is_profitable() {
        io::print_success(net);
    } else {
        io::print_warning(net);
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Discard the current budget?")? {
        io::print_info("Reset cancelled.");
        return Ok(());
    }
    context.session.reset();
    io::print_success("Started a fresh budget.");
    Ok(())
}

fn count_field(raw: &str) -> Result<CountField, CommandError> {
    if let Some(kind) = GroupKind::from_command_name(raw) {
        return Ok(kind.count_field());
    }
    match raw.to_ascii_lowercase().as_str() {
        "categories" | "category" | "other" => Ok(CountField::OtherCategories),
        _ => CountField::from_id(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{raw}` is not a repeated group"))
        }),
    }
}

fn report_regenerated(regenerated: &Regenerated) {
    if !regenerated.changed() {
        io::print_info(format!("`{}` stays at {}.", regenerated.field, regenerated.current));
        return;
    }
    let mut message = format!(
        "`{}` changed from {} to {}.",
        regenerated.field, regenerated.previous, regenerated.current
    );
    if regenerated.restored > 0 {
        message.push_str(&format!(" Restored {} cached row(s).", regenerated.restored));
    }
    io::print_success(message);
}
