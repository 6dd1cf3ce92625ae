//! The `filter` command: chained search and facet filtering, printed as
//! an annotated tree outline.

use std::process::ExitCode;

use canopy_filter::{Annotations, DateRange, FacetSelection, FilterPipeline, active_value};
use canopy_model::{NaiveDate, Node, NodeId, parse_loose_date};

use crate::cli::{args::FilterCommand, context::CommandContext};

/// Runs the filter command.
pub fn run(ctx: &CommandContext, cmd: &FilterCommand) -> ExitCode {
    // A blank query just leaves the search facet inactive, but a
    // malformed one should be reported rather than silently matching
    // nothing.
    if !cmd.query.trim().is_empty()
        && let Err(e) = canopy_query::parse(&cmd.query)
    {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let date = match parse_date_range(cmd.from.as_deref(), cmd.to.as_deref()) {
        Ok(date) => date,
        Err(code) => return code,
    };
    let facets = FacetSelection {
        kind: active_value(Some(cmd.kind.clone())),
        tag: active_value(Some(cmd.tag.clone())),
        author: active_value(Some(cmd.author.clone())),
        location: active_value(Some(cmd.location.clone())),
        date,
    };

    let loaded = match ctx.open_dataset(cmd.dataset.as_deref()) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let index = match loaded.build_index() {
        Ok(index) => index,
        Err(code) => return code,
    };

    let mut pipeline = FilterPipeline::new(cmd.query.clone(), facets);
    pipeline.term_options = ctx.term_options(cmd.fuzzy);

    match pipeline.run(loaded.dataset.root(), &index) {
        Some(filtered) => {
            print_outline(&filtered.root, &filtered.annotations, 0);
            ExitCode::SUCCESS
        }
        None => {
            println!("No matching nodes.");
            ExitCode::SUCCESS
        }
    }
}

/// Builds the date facet from the optional `--from`/`--to` bounds.
///
/// A missing bound leaves that side of the range open.
fn parse_date_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Option<DateRange>, ExitCode> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let from = match from {
        Some(raw) => parse_bound(raw)?,
        None => NaiveDate::MIN,
    };
    let to = match to {
        Some(raw) => parse_bound(raw)?,
        None => NaiveDate::MAX,
    };
    Ok(Some(DateRange::new(from, to)))
}

/// Parses one range bound, failing the command when it is unparsable.
fn parse_bound(raw: &str) -> Result<NaiveDate, ExitCode> {
    parse_loose_date(raw).ok_or_else(|| {
        eprintln!("error: invalid date '{raw}' (expected YYYY, YYYY-MM, or YYYY-MM-DD)");
        ExitCode::FAILURE
    })
}

/// Prints the surviving tree as an indented outline.
fn print_outline(node: &Node, annotations: &Annotations, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = if node.name.is_empty() {
        "(unnamed)"
    } else {
        node.name.as_str()
    };
    match marker(node.id, annotations) {
        Some(mark) => println!("{indent}{mark} {name}"),
        None => println!("{indent}{name}"),
    }
    for child in &node.children {
        print_outline(child, annotations, depth + 1);
    }
}

/// Chooses the outline marker for one node.
///
/// `·` means matches sit somewhere below the node, `*` means the node
/// itself satisfies every active filter. Nodes kept purely as context
/// stay unmarked, as does the whole tree when nothing was filtered.
fn marker(id: NodeId, annotations: &Annotations) -> Option<&'static str> {
    if annotations.is_empty() {
        return None;
    }
    let mut is_match = true;
    let mut below = false;
    for map in annotations.values() {
        let flags = map.get(&id).copied().unwrap_or_default();
        is_match &= flags.is_match;
        below |= flags.has_matched_descendants;
    }
    if below {
        Some("·")
    } else if is_match {
        Some("*")
    } else {
        None
    }
}
