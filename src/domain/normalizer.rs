//! Header normalization and required-column validation.
//!
//! Runs before any tree logic: trims every column name and checks the first
//! row for the required columns.

use tracing::{debug, instrument};

use crate::domain::entities::{ColumnNames, Row};
use crate::domain::error::ValidationError;

/// Rows with trimmed column names, ready for materialization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSheet {
    pub rows: Vec<Row>,
    /// Whether the first row carries the optional team column
    pub has_team_column: bool,
}

/// Trim every column name of every row.
pub fn normalize_headers(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter().map(Row::trim_columns).collect()
}

/// Check the first row for the required columns.
///
/// Returns whether the optional team column is present.
pub fn validate_columns(rows: &[Row], columns: &ColumnNames) -> Result<bool, ValidationError> {
    let first = rows.first().ok_or(ValidationError::EmptyInput)?;

    let missing: Vec<String> = columns
        .required()
        .iter()
        .filter(|col| !first.contains_column(col))
        .map(|col| col.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingColumns {
            missing,
            found: first.columns().map(str::to_string).collect(),
        });
    }

    Ok(first.contains_column(&columns.team))
}

/// Trim headers, then validate.
#[instrument(level = "debug", skip(rows, columns), fields(rows = rows.len()))]
pub fn normalize(
    rows: Vec<Row>,
    columns: &ColumnNames,
) -> Result<NormalizedSheet, ValidationError> {
    let rows = normalize_headers(rows);
    let has_team_column = validate_columns(&rows, columns)?;
    debug!(has_team_column, "sheet headers validated");
    Ok(NormalizedSheet {
        rows,
        has_team_column,
    })
}
