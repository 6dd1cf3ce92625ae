//! Facet definitions and the node predicates behind them.
//!
//! Facet values are compared exactly as stored, case included. A facet
//! with no value, a blank value or the `"all"` sentinel is inactive and
//! constrains nothing.

use canopy_model::{NaiveDate, Node, parse_loose_date};

/// Sentinel facet value meaning "no restriction".
pub const FACET_ALL: &str = "all";

/// The filterable dimensions of a dataset tree.
///
/// Variant order is the order facets are applied in, and the order
/// annotation passes are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    /// Free-text search over extracted documents.
    Search,
    /// Node category, such as "sector" or "solution".
    Kind,
    /// Tag attached to the node itself.
    Tag,
    /// Author of any content item under the node.
    Author,
    /// Location of any content item under the node.
    Location,
    /// Publication date of any content item, within a range.
    Date,
}

impl Facet {
    /// Short lowercase label for command output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Kind => "kind",
            Self::Tag => "tag",
            Self::Author => "author",
            Self::Location => "location",
            Self::Date => "date",
        }
    }
}

/// Inclusive publication-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest date admitted.
    pub from: NaiveDate,
    /// Latest date admitted.
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range spanning `from` through `to`, both inclusive.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// True when `date` falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// The facet values a caller has selected.
///
/// `None` fields are inactive facets. Values should pass through
/// [`active_value`] first so sentinels never reach the predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetSelection {
    /// Required node kind.
    pub kind: Option<String>,
    /// Required node tag.
    pub tag: Option<String>,
    /// Required content-item author.
    pub author: Option<String>,
    /// Required content-item location.
    pub location: Option<String>,
    /// Required content-item date window.
    pub date: Option<DateRange>,
}

impl FacetSelection {
    /// True when no facet carries a restriction.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.tag.is_none()
            && self.author.is_none()
            && self.location.is_none()
            && self.date.is_none()
    }

    /// Facets that carry a restriction, in application order.
    pub fn active_facets(&self) -> Vec<Facet> {
        let mut facets = Vec::new();
        if self.kind.is_some() {
            facets.push(Facet::Kind);
        }
        if self.tag.is_some() {
            facets.push(Facet::Tag);
        }
        if self.author.is_some() {
            facets.push(Facet::Author);
        }
        if self.location.is_some() {
            facets.push(Facet::Location);
        }
        if self.date.is_some() {
            facets.push(Facet::Date);
        }
        facets
    }

    /// Tests whether `node` directly satisfies one facet's selected
    /// value. Inactive facets match every node; the search facet is
    /// resolved against the index by the caller and always matches
    /// here.
    pub fn node_matches(&self, facet: Facet, node: &Node) -> bool {
        match facet {
            Facet::Search => true,
            Facet::Kind => self.kind.as_deref().is_none_or(|v| matches_kind(node, v)),
            Facet::Tag => self.tag.as_deref().is_none_or(|v| matches_tag(node, v)),
            Facet::Author => self
                .author
                .as_deref()
                .is_none_or(|v| matches_author(node, v)),
            Facet::Location => self
                .location
                .as_deref()
                .is_none_or(|v| matches_location(node, v)),
            Facet::Date => self
                .date
                .is_none_or(|range| matches_date_range(node, range)),
        }
    }
}

/// Drops inactive facet values: `None`, blank strings and the `"all"`
/// sentinel.
pub fn active_value(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && v != FACET_ALL)
}

/// True when the node's kind equals `kind`.
pub fn matches_kind(node: &Node, kind: &str) -> bool {
    node.kind.as_deref() == Some(kind)
}

/// True when the node's own tag list contains `tag`.
pub fn matches_tag(node: &Node, tag: &str) -> bool {
    node.tags.iter().any(|t| t == tag)
}

/// True when any content item under the node names `author`.
pub fn matches_author(node: &Node, author: &str) -> bool {
    node.items
        .iter()
        .any(|item| item.author.as_deref() == Some(author))
}

/// True when any content item under the node names `location`.
pub fn matches_location(node: &Node, location: &str) -> bool {
    node.items
        .iter()
        .any(|item| item.location.as_deref() == Some(location))
}

/// True when any content item carries a parsable date inside `range`.
///
/// Items whose date is missing or unparsable simply never match.
pub fn matches_date_range(node: &Node, range: DateRange) -> bool {
    node.items.iter().any(|item| {
        item.date
            .as_deref()
            .and_then(parse_loose_date)
            .is_some_and(|date| range.contains(date))
    })
}
