//! Forest builder: turns validated sheet rows into a forest of positions.
//!
//! Pipeline: normalize headers → materialize positions → index names → link
//! each position to its manager. Linking is a single forward pass in input
//! order; a position gets at most one parent and is never re-parented.

use generational_arena::Index;
use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::domain::arena::Forest;
use crate::domain::entities::{ForestConfig, Position, Row};
use crate::domain::error::TreeResult;
use crate::domain::name_index::NameIndex;
use crate::domain::normalizer::{normalize, NormalizedSheet};

/// Constructs forests of positions from sheet rows.
pub struct ForestBuilder {
    config: ForestConfig,
    whitespace_regex: Regex,
}

impl Default for ForestBuilder {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl ForestBuilder {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            // Constant pattern, compiling it cannot fail.
            whitespace_regex: Regex::new(r"\s+").expect("whitespace pattern is valid"),
        }
    }

    /// Build a forest from raw rows.
    ///
    /// Fails only on input shape (no rows, missing required columns). Manager
    /// references that cannot be resolved leave the position as a root.
    #[instrument(level = "debug", skip(self, rows), fields(rows = rows.len()))]
    pub fn build(&self, rows: Vec<Row>) -> TreeResult<Forest> {
        let sheet = normalize(rows, &self.config.columns)?;

        let positions = self.materialize(&sheet);
        debug!(
            rows = sheet.rows.len(),
            positions = positions.len(),
            "materialized positions"
        );

        let mut forest = Forest::with_capacity(positions.len());
        for position in positions {
            forest.insert_position(position);
        }

        let index = NameIndex::build(&forest);
        self.link(&mut forest, &index);
        forest.seal();

        debug!(
            positions = forest.len(),
            roots = forest.roots().len(),
            "forest built"
        );
        Ok(forest)
    }

    /// Turn each row into a position, in order.
    ///
    /// Rows without a name are dropped but still consume their ordinal, so ids
    /// reflect the row's place in the sheet.
    pub fn materialize(&self, sheet: &NormalizedSheet) -> Vec<Position> {
        let columns = &self.config.columns;
        sheet
            .rows
            .iter()
            .enumerate()
            .filter_map(|(ordinal, row)| {
                let name = row.text(&columns.collaborator);
                if name.is_empty() {
                    trace!(ordinal, "dropping row without a name");
                    return None;
                }

                let manager = row.text(&columns.manager);
                let team = if sheet.has_team_column {
                    Some(row.text(&columns.team)).filter(|t| !t.is_empty())
                } else {
                    None
                };

                Some(Position {
                    id: self.position_id(&name, ordinal),
                    manager_name: (!manager.is_empty()).then_some(manager),
                    title: row.text(&columns.title),
                    company: row.text(&columns.company),
                    team: team.unwrap_or_else(|| self.config.team_default.clone()),
                    name,
                })
            })
            .collect()
    }

    /// `Ana Maria Souza` at ordinal 3 becomes `Ana-Maria-Souza-3`.
    fn position_id(&self, name: &str, ordinal: usize) -> String {
        format!("{}-{}", self.whitespace_regex.replace_all(name, "-"), ordinal)
    }

    #[instrument(level = "debug", skip_all)]
    fn link(&self, forest: &mut Forest, index: &NameIndex) {
        let order = forest.indices().to_vec();
        for idx in order {
            let Some(node) = forest.get_node(idx) else {
                continue;
            };
            let Some(manager) = node.data.manager_name.as_deref() else {
                continue;
            };

            let Some(parent) = select_parent(forest, index, idx, manager) else {
                debug!(
                    position = %node.data.id,
                    manager,
                    "manager not found, position stays a root"
                );
                continue;
            };

            if forest.is_ancestor_or_self(idx, parent) {
                debug!(
                    position = %node.data.id,
                    manager,
                    "link would close a cycle, position stays a root"
                );
                continue;
            }

            forest.attach(idx, parent);
        }
    }
}

/// Pick the parent for the position at `idx` among positions named `manager`.
///
/// First candidate in the same company wins; otherwise the first candidate
/// overall. The position itself is removed before either rule runs, so a
/// self-named manager resolves to another holder of the name when one exists.
fn select_parent(forest: &Forest, index: &NameIndex, idx: Index, manager: &str) -> Option<Index> {
    let company = forest.get_node(idx).map(|n| n.data.company.as_str())?;
    let candidates: Vec<Index> = index
        .candidates(manager)
        .iter()
        .copied()
        .filter(|&candidate| candidate != idx)
        .collect();

    candidates
        .iter()
        .copied()
        .find(|&candidate| {
            forest
                .get_node(candidate)
                .is_some_and(|n| n.data.company == company)
        })
        .or_else(|| candidates.first().copied())
}

/// Build a forest with the given configuration.
pub fn build_forest(rows: Vec<Row>, config: &ForestConfig) -> TreeResult<Forest> {
    ForestBuilder::new(config.clone()).build(rows)
}
