//! Domain entities: raw sheet rows and materialized positions

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A single spreadsheet cell as delivered by the sheet decoder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Coerce the cell to text.
    ///
    /// Whole numbers print without a fractional part (`42`, not `42.0`).
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Coerce to text and trim surrounding whitespace.
    pub fn to_trimmed(&self) -> String {
        self.to_text().trim().to_string()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// One decoded sheet row: column name to cell value, in source column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for assembling rows in code.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert a cell. An existing column keeps its position and gets the new value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Column names in source order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// Trimmed text of a column; empty when the column is absent.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(CellValue::to_trimmed).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Same row with every column name trimmed.
    ///
    /// When two raw names trim to the same key, the later value wins and the
    /// column stays where the first one was.
    pub fn trim_columns(self) -> Self {
        let mut trimmed = Row::new();
        for (name, value) in self.cells {
            trimmed.insert(name.trim(), value);
        }
        trimmed
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

// Hand-written so that column order survives deserialization; a map type
// would sort the keys.
impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to cell values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Row, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut row = Row::new();
                while let Some((column, value)) = access.next_entry::<String, CellValue>()? {
                    row.insert(column, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Column names the engine reads from a sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    pub company: String,
    pub manager: String,
    pub collaborator: String,
    pub title: String,
    /// Optional column; never required.
    pub team: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            company: "Empresa".into(),
            manager: "G. Imediato".into(),
            collaborator: "Colaborador".into(),
            title: "Cargo".into(),
            team: "Time".into(),
        }
    }
}

impl ColumnNames {
    /// Required columns in reporting order.
    pub fn required(&self) -> [&str; 4] {
        [
            self.company.as_str(),
            self.manager.as_str(),
            self.collaborator.as_str(),
            self.title.as_str(),
        ]
    }
}

/// Inputs that shape one forest build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestConfig {
    pub columns: ColumnNames,
    /// Sentinel team text for positions without a team value
    pub team_default: String,
}

pub const DEFAULT_TEAM: &str = "Não definido";

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            team_default: DEFAULT_TEAM.to_string(),
        }
    }
}

/// One row's organizational role; the unit of the hierarchy.
///
/// Structure (children, parent) lives in the [`Forest`](crate::domain::Forest)
/// that owns the position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    /// Unique within one build, e.g. `Ana-Souza-3`
    pub id: String,
    pub name: String,
    /// Declared manager display name; `None` makes this a candidate root
    pub manager_name: Option<String>,
    pub title: String,
    pub company: String,
    pub team: String,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.title)
        }
    }
}
