//! Org chart session
//!
//! Owns the current forest and filter state. Every transition either replaces
//! the state wholesale or leaves it untouched on failure.

use std::borrow::Cow;

use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, PositionDetail};
use crate::config::{Labels, Settings};
use crate::domain::{filter_forest, Branch, FilterCriteria, Forest, ForestBuilder, Row};

/// The single working set of an interactive session.
pub struct OrgChartSession {
    builder: ForestBuilder,
    labels: Labels,
    forest: Option<Forest>,
    filters: FilterCriteria,
}

impl Default for OrgChartSession {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl OrgChartSession {
    pub fn new(settings: &Settings) -> Self {
        Self {
            builder: ForestBuilder::new(settings.forest_config()),
            labels: settings.labels.clone(),
            forest: None,
            filters: FilterCriteria::default(),
        }
    }

    /// Build a forest from `rows` and make it current.
    ///
    /// On success the previous forest and all filters are replaced. On failure
    /// the session is left exactly as it was.
    #[instrument(level = "debug", skip_all, fields(rows = rows.len()))]
    pub fn ingest(&mut self, rows: Vec<Row>) -> ApplicationResult<&Forest> {
        let forest = self.builder.build(rows)?;
        info!(
            positions = forest.len(),
            roots = forest.roots().len(),
            "sheet ingested"
        );
        self.filters = FilterCriteria::default();
        Ok(self.forest.insert(forest))
    }

    /// Drop the forest and all filters.
    pub fn reset(&mut self) {
        debug!("session reset");
        self.forest = None;
        self.filters = FilterCriteria::default();
    }

    pub fn is_loaded(&self) -> bool {
        self.forest.is_some()
    }

    pub fn forest(&self) -> Option<&Forest> {
        self.forest.as_ref()
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Replace all criteria at once.
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.filters = criteria;
        self.drop_stale_team();
    }

    pub fn set_company(&mut self, company: Option<String>) {
        self.filters.company = company;
        self.drop_stale_team();
    }

    pub fn set_team(&mut self, team: Option<String>) {
        self.filters.team = team;
        self.drop_stale_team();
    }

    pub fn set_search(&mut self, text: Option<String>) {
        self.filters.search_text = text;
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterCriteria::default();
    }

    /// A team filter only makes sense if the selected company has that team.
    ///
    /// Checked after every company or team change.
    fn drop_stale_team(&mut self) {
        if self.filters.active_company().is_none() {
            return;
        }
        let Some(team) = self.filters.active_team() else {
            return;
        };
        if !self.team_options().iter().any(|t| t == team) {
            debug!(team, "team filter cleared, not offered by selected company");
            self.filters.team = None;
        }
    }

    /// Current forest projected through the current filters.
    pub fn filtered_roots(&self) -> Cow<'_, [Branch]> {
        match &self.forest {
            Some(forest) => filter_forest(forest, forest.outline(), &self.filters),
            None => Cow::Borrowed(&[]),
        }
    }

    /// Distinct non-empty companies, sorted.
    pub fn company_options(&self) -> Vec<String> {
        let Some(forest) = &self.forest else {
            return Vec::new();
        };
        forest
            .positions()
            .map(|p| p.company.as_str())
            .filter(|c| !c.is_empty())
            .unique()
            .sorted()
            .map(str::to_string)
            .collect()
    }

    /// Distinct non-empty teams, sorted, limited to the selected company if any.
    pub fn team_options(&self) -> Vec<String> {
        let Some(forest) = &self.forest else {
            return Vec::new();
        };
        let company = self.filters.active_company();
        forest
            .positions()
            .filter(|p| company.map_or(true, |c| p.company == c))
            .map(|p| p.team.as_str())
            .filter(|t| !t.is_empty())
            .unique()
            .sorted()
            .map(str::to_string)
            .collect()
    }

    /// Detail view of one position.
    pub fn detail(&self, id: &str) -> ApplicationResult<PositionDetail> {
        let forest = self.forest.as_ref().ok_or(ApplicationError::NotLoaded)?;
        let position = forest
            .get(id)
            .ok_or_else(|| ApplicationError::PositionNotFound(id.to_string()))?;
        Ok(PositionDetail::new(
            position,
            forest.children(id).len(),
            forest.subtree(id).count().saturating_sub(1),
            &self.labels,
        ))
    }
}
