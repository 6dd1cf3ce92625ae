//! The `stats` command: dataset shape and facet value inventories.

use std::{collections::BTreeMap, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};

use crate::cli::{args::StatsCommand, context::CommandContext};

/// Runs the stats command.
pub fn run(ctx: &CommandContext, cmd: &StatsCommand) -> ExitCode {
    let loaded = match ctx.open_dataset(cmd.dataset.as_deref()) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let dataset = &loaded.dataset;

    println!("Dataset: {}", loaded.path.display());
    println!();
    println!("Nodes:     {}", dataset.node_count());
    println!("Items:     {}", dataset.item_count());
    println!("Max depth: {}", dataset.max_depth());

    print_counts("Kinds", "KIND", "NODES", &dataset.kinds());
    print_counts("Tags", "TAG", "USES", &dataset.tags());
    print_counts("Authors", "AUTHOR", "ITEMS", &dataset.authors());
    print_counts("Locations", "LOCATION", "ITEMS", &dataset.locations());

    ExitCode::SUCCESS
}

/// Prints one facet inventory as a table, or a placeholder when the
/// dataset has no values for it.
fn print_counts(title: &str, value_header: &str, count_header: &str, counts: &BTreeMap<String, usize>) {
    println!();
    println!("{title}:");
    if counts.is_empty() {
        println!("  (none)");
        return;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![value_header, count_header]);
    for (value, count) in counts {
        table.add_row(vec![Cell::new(value), Cell::new(count.to_string())]);
    }
    println!("{table}");
}
