//! The `search` command: ranked full-text query over a dataset.

use std::process::ExitCode;

use canopy_filter::{Hit, evaluate_with};
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

use crate::cli::{args::SearchCommand, context::{CommandContext, LoadedDataset}};

/// One search hit in JSON output.
#[derive(Serialize)]
struct JsonHit {
    /// Stable node id.
    id: u32,
    /// Node display name.
    name: String,
    /// Relevance score.
    score: f32,
    /// Root-to-node breadcrumb.
    path: String,
}

/// JSON output for the search command.
#[derive(Serialize)]
struct JsonSearchOutput {
    /// The original query string.
    query: String,
    /// Total matches before the row limit.
    total_matches: usize,
    /// Matches up to the row limit.
    results: Vec<JsonHit>,
}

/// Runs the search command.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    // Surface syntax errors before touching the dataset. Evaluation itself
    // treats a malformed query as matching nothing, which is the right
    // behavior for an interactive filter but useless as CLI feedback.
    match canopy_query::parse(&cmd.query) {
        Ok(Some(_)) => {}
        Ok(None) => {
            eprintln!("error: empty query");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }

    let loaded = match ctx.open_dataset(cmd.dataset.as_deref()) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let index = match loaded.build_index() {
        Ok(index) => index,
        Err(code) => return code,
    };

    let results = evaluate_with(&cmd.query, &index, ctx.term_options(cmd.fuzzy));
    let hits = results.into_ranked();
    let total = hits.len();
    let limit = ctx.limit(cmd.limit);

    if cmd.json {
        return output_json(&cmd.query, &hits, total, limit, &loaded);
    }

    if hits.is_empty() {
        println!("No matching nodes.");
        return ExitCode::SUCCESS;
    }

    let show_scores = !cmd.no_scores;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    let mut header = vec!["ID", "NAME"];
    if show_scores {
        header.push("SCORE");
    }
    header.push("PATH");
    table.set_header(header);

    for hit in hits.iter().take(limit) {
        let mut row = vec![Cell::new(hit.id.to_string()), Cell::new(&hit.name)];
        if show_scores {
            row.push(Cell::new(format!("{:.2}", hit.score)));
        }
        row.push(Cell::new(loaded.path_of(hit.id)));
        table.add_row(row);
    }

    println!("{table}");
    if total > limit {
        println!("({limit} of {total} matches shown)");
    }
    ExitCode::SUCCESS
}

/// Emits results as pretty-printed JSON.
///
/// An empty result list still produces the full envelope so scripted
/// callers get a stable shape.
fn output_json(
    query: &str,
    hits: &[Hit],
    total: usize,
    limit: usize,
    loaded: &LoadedDataset,
) -> ExitCode {
    let output = JsonSearchOutput {
        query: query.to_string(),
        total_matches: total,
        results: hits
            .iter()
            .take(limit)
            .map(|hit| JsonHit {
                id: hit.id.0,
                name: hit.name.clone(),
                score: hit.score,
                path: loaded.path_of(hit.id).to_string(),
            })
            .collect(),
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}
