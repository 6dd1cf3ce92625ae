//! Clap argument definitions for the `canopy` CLI.

use std::path::PathBuf;

use canopy_filter::FACET_ALL;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "canopy")]
#[command(about = "Faceted browser for hierarchical climate-solutions datasets")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `canopy search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Boolean query: terms, quoted phrases, AND/OR/NOT
    pub query: String,

    /// Dataset JSON file [default: the `dataset` entry in canopy.toml]
    pub dataset: Option<PathBuf>,

    /// Maximum result rows to print [default: 50]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Show relevance scores (default)
    #[arg(long, overrides_with = "no_scores")]
    pub scores: bool,

    /// Hide relevance scores
    #[arg(long, overrides_with = "scores")]
    pub no_scores: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Fuzzy matching edit distance (0=exact, 1-2=fuzzy) [default: 1]
    #[arg(short = 'f', long, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub fuzzy: Option<u8>,
}

/// Arguments for `canopy filter`.
#[derive(Args, Debug, Clone)]
pub struct FilterCommand {
    /// Dataset JSON file [default: the `dataset` entry in canopy.toml]
    pub dataset: Option<PathBuf>,

    /// Boolean search query; blank leaves the search facet inactive
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,

    /// Keep nodes of this type ("all" keeps every type)
    #[arg(long, default_value = FACET_ALL)]
    pub kind: String,

    /// Keep nodes carrying this tag ("all" keeps every tag)
    #[arg(long, default_value = FACET_ALL)]
    pub tag: String,

    /// Keep nodes with content by this author ("all" keeps every author)
    #[arg(long, default_value = FACET_ALL)]
    pub author: String,

    /// Keep nodes with content for this location ("all" keeps every location)
    #[arg(long, default_value = FACET_ALL)]
    pub location: String,

    /// Earliest publication date (YYYY, YYYY-MM, or YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest publication date (YYYY, YYYY-MM, or YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Fuzzy matching edit distance (0=exact, 1-2=fuzzy) [default: 1]
    #[arg(short = 'f', long, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub fuzzy: Option<u8>,
}

/// Arguments for `canopy stats`.
#[derive(Args, Debug, Clone)]
pub struct StatsCommand {
    /// Dataset JSON file [default: the `dataset` entry in canopy.toml]
    pub dataset: Option<PathBuf>,
}

/// Arguments for `canopy parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query to parse
    pub query: String,
}

/// Supported `canopy` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the dataset and print ranked matching nodes
    #[command(after_help = "\
QUERY SYNTAX:
  term              Word must appear (prefix and fuzzy matched)
  term1 term2       Every word must match
  \"phrase\"          Exact phrase match
  term1 AND term2   Both sides must match
  term1 OR term2    Either side matches
  a NOT b           Matches of b removed from matches of a
  NOT term          Everything except matches of term

EXAMPLES:
  canopy search solar data.json
  canopy search '\"heat pump\" OR geothermal' data.json
  canopy search 'energy NOT nuclear' data.json")]
    Search(SearchCommand),

    /// Filter the dataset tree by query and facets
    #[command(after_help = "\
Filters chain: the query runs first, then each facet narrows the
survivors. The result is printed as an indented outline where `*`
marks a node that matched everything itself and `·` marks a node kept
because matches sit below it.

EXAMPLES:
  canopy filter data.json --query solar
  canopy filter data.json --kind sector --tag ocean
  canopy filter data.json --from 2019 --to 2021-06")]
    Filter(FilterCommand),

    /// Show dataset size counts and facet value tables
    Stats(StatsCommand),

    /// Show how canopy parses a query
    Parse(ParseCommand),
}
