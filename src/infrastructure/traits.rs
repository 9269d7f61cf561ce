//! I/O boundary traits for testability
//!
//! Sheet decoding happens outside the engine; these traits are where decoded
//! rows enter it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::Row;
use crate::infrastructure::{InfraError, InfraResult};

/// Supplier of decoded sheet rows.
pub trait RowSource: Send + Sync {
    /// Read every row of the chosen sheet, in sheet order.
    fn read_rows(&self) -> InfraResult<Vec<Row>>;
}

/// Rows stored as a JSON array of objects, one object per row.
///
/// This is the shape spreadsheet-to-JSON converters emit, e.g.
/// `[{"Colaborador": "Ana", "G. Imediato": "", ...}, ...]`.
pub struct JsonFileRowSource {
    path: PathBuf,
}

impl JsonFileRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse JSON content; `path` only labels errors.
    pub fn parse(content: &str, path: &Path) -> InfraResult<Vec<Row>> {
        serde_json::from_str(content).map_err(|e| InfraError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl RowSource for JsonFileRowSource {
    fn read_rows(&self) -> InfraResult<Vec<Row>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| InfraError::io(format!("read {}", self.path.display()), e))?;
        let rows = Self::parse(&content, &self.path)?;
        debug!(path = %self.path.display(), rows = rows.len(), "rows loaded");
        Ok(rows)
    }
}

/// Rows already in memory.
pub struct InMemoryRowSource {
    rows: Vec<Row>,
}

impl InMemoryRowSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl RowSource for InMemoryRowSource {
    fn read_rows(&self) -> InfraResult<Vec<Row>> {
        Ok(self.rows.clone())
    }
}
