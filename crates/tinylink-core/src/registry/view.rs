//! Derived views over the registry's record set
//!
//! [`apply`] is a pure function: filter by search term first, then sort the
//! filtered subset. It never touches registry state.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use tracing::warn;

use crate::error::Error;
use crate::record::LinkRecord;

/// Column to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Short code, locale-aware string order
    Code,
    /// Target URL, locale-aware string order
    TargetUrl,
    /// Click count, numeric order
    Clicks,
    /// Creation time
    CreatedAt,
    /// Most recent click; never-clicked records always sort last
    LastClicked,
}

impl SortField {
    /// Wire/field name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Code => "code",
            SortField::TargetUrl => "target_url",
            SortField::Clicks => "clicks",
            SortField::CreatedAt => "created_at",
            SortField::LastClicked => "last_clicked",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "code" => Ok(SortField::Code),
            "target_url" | "target" | "url" => Ok(SortField::TargetUrl),
            "clicks" => Ok(SortField::Clicks),
            "created_at" | "created" => Ok(SortField::CreatedAt),
            "last_clicked" => Ok(SortField::LastClicked),
            other => Err(Error::validation(format!(
                "Unknown sort field '{other}'. Valid: code, target_url, clicks, created_at, last_clicked"
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(Error::validation(format!(
                "Unknown sort order '{other}'. Valid: asc, desc"
            ))),
        }
    }
}

/// Column-header sort state of the link table
///
/// Selecting the active field flips the order; selecting another field
/// switches to it in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// Active field
    pub field: SortField,
    /// Active direction
    pub order: SortOrder,
}

impl SortState {
    /// Apply a header click
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.order = self.order.flipped();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }
}

impl Default for SortState {
    /// Newest first
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// Parameters of a derived view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Case-insensitive substring matched against code and target URL
    pub search: String,
    /// Sort to apply; `None` keeps registry order
    pub sort: Option<(SortField, SortOrder)>,
}

impl ViewQuery {
    /// Unfiltered, unsorted view
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Sort by `field` in `order`
    pub fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = Some((field, order));
        self
    }
}

impl From<SortState> for ViewQuery {
    fn from(state: SortState) -> Self {
        ViewQuery::new().sort_by(state.field, state.order)
    }
}

/// Filter then sort `records` according to `query`
pub fn apply(records: &[LinkRecord], query: &ViewQuery) -> Vec<LinkRecord> {
    let term = query.search.to_lowercase();
    let mut out: Vec<LinkRecord> = records
        .iter()
        .filter(|r| r.matches(&term))
        .cloned()
        .collect();

    if let Some((field, order)) = query.sort {
        let collator = root_collator();
        // sort_by is stable, so equal keys keep registry order in both directions
        out.sort_by(|a, b| compare(a, b, field, order, collator.as_ref()));
    }

    out
}

/// Root-locale collator at tertiary strength
fn root_collator() -> Option<CollatorBorrowed<'static>> {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Tertiary);

    match Collator::try_new(Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Collation data unavailable, sorting by code point: {}", e);
            None
        }
    }
}

fn compare(
    a: &LinkRecord,
    b: &LinkRecord,
    field: SortField,
    order: SortOrder,
    collator: Option<&CollatorBorrowed<'static>>,
) -> Ordering {
    let text = |x: &str, y: &str| match collator {
        Some(collator) => collator.compare(x, y),
        None => x.cmp(y),
    };
    let directed = |ord: Ordering| match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    };

    match field {
        SortField::Code => directed(text(&a.code, &b.code)),
        SortField::TargetUrl => directed(text(&a.target_url, &b.target_url)),
        SortField::Clicks => directed(a.clicks.cmp(&b.clicks)),
        SortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
        // Nulls sink regardless of direction
        SortField::LastClicked => match (a.last_clicked, b.last_clicked) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
