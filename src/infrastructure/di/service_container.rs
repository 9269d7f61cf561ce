//! Service container for dependency injection
//!
//! Wires settings and row sources into sessions.

use std::path::Path;
use std::sync::Arc;

use crate::application::OrgChartSession;
use crate::config::Settings;
use crate::infrastructure::traits::{JsonFileRowSource, RowSource};
use crate::infrastructure::InfraResult;

/// Container holding settings and the pieces built from them.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,
}

impl ServiceContainer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Fresh, empty session configured from settings.
    pub fn session(&self) -> OrgChartSession {
        OrgChartSession::new(&self.settings)
    }

    /// Row source for a JSON rows file.
    pub fn json_source(&self, path: &Path) -> JsonFileRowSource {
        JsonFileRowSource::new(path)
    }

    /// Read all rows from `source` and ingest them into a new session.
    pub fn load(&self, source: &dyn RowSource) -> InfraResult<OrgChartSession> {
        let rows = source.read_rows()?;
        let mut session = self.session();
        session.ingest(rows)?;
        Ok(session)
    }
}

