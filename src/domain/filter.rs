//! Forest filtering: prune a forest to matching positions and their ancestors.
//!
//! Filtering is a pure projection. Children are always re-derived from the
//! canonical forest by id, so a filtered result can be filtered again without
//! drifting from the source structure.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::{Branch, Forest};
use crate::domain::entities::Position;

/// User filter state. Blank values count as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Exact company match
    pub company: Option<String>,
    /// Exact team match
    pub team: Option<String>,
    /// Case-insensitive substring of name or title
    pub search_text: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn active_company(&self) -> Option<&str> {
        self.company.as_deref().filter(|c| !c.is_empty())
    }

    pub fn active_team(&self) -> Option<&str> {
        self.team.as_deref().filter(|t| !t.is_empty())
    }

    pub fn active_search(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.active_company().is_none()
            && self.active_team().is_none()
            && self.active_search().is_none()
    }

    /// Whether a position satisfies every active criterion on its own fields.
    pub fn matches(&self, position: &Position) -> bool {
        Predicate::new(self).matches(position)
    }
}

/// Criteria prepared once per filter pass.
struct Predicate<'c> {
    company: Option<&'c str>,
    team: Option<&'c str>,
    search: Option<String>,
}

impl<'c> Predicate<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            company: criteria.active_company(),
            team: criteria.active_team(),
            search: criteria.active_search().map(str::to_lowercase),
        }
    }

    fn matches(&self, position: &Position) -> bool {
        let company = self.company.map_or(true, |c| position.company == c);
        let team = self.team.map_or(true, |t| position.team == t);
        let search = self.search.as_deref().map_or(true, |needle| {
            position.name.to_lowercase().contains(needle)
                || position.title.to_lowercase().contains(needle)
        });
        company && team && search
    }
}

/// Prune `roots` to positions matching `criteria` plus their ancestors.
///
/// Only the ids of `roots` are read; each subtree's children come from
/// `forest`. Ids unknown to `forest` are dropped. With no active criteria the
/// input is handed back untouched.
#[instrument(level = "debug", skip_all, fields(roots = roots.len()))]
pub fn filter_forest<'a>(
    forest: &Forest,
    roots: &'a [Branch],
    criteria: &FilterCriteria,
) -> Cow<'a, [Branch]> {
    if criteria.is_empty() {
        return Cow::Borrowed(roots);
    }

    let predicate = Predicate::new(criteria);
    let filtered: Vec<Branch> = roots
        .iter()
        .filter_map(|root| filter_subtree(forest, &root.id, &predicate))
        .collect();

    debug!(kept_roots = filtered.len(), "forest filtered");
    Cow::Owned(filtered)
}

fn filter_subtree(forest: &Forest, id: &str, predicate: &Predicate<'_>) -> Option<Branch> {
    let root = forest.index_of(id)?;
    forest.fold_subtree(root, |position, children| {
        (predicate.matches(position) || !children.is_empty()).then(|| Branch {
            id: position.id.clone(),
            children,
        })
    })
}
