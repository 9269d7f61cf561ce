//! Org chart engine.
//!
//! Rebuilds a forest of reporting trees from flat spreadsheet rows, where each
//! row names its manager by display name, and prunes that forest against user
//! filters without losing ancestor chains.
//!
//! ```
//! use orgforest::domain::{build_forest, filter_forest, FilterCriteria, ForestConfig, Row};
//!
//! let row = |name: &str, manager: &str| {
//!     Row::new()
//!         .with("Empresa", "Acme")
//!         .with("G. Imediato", manager)
//!         .with("Colaborador", name)
//!         .with("Cargo", "")
//! };
//! let forest = build_forest(vec![row("Ana", ""), row("Bia", "Ana")], &ForestConfig::default())?;
//! assert_eq!(forest.roots().len(), 1);
//!
//! let criteria = FilterCriteria::new().with_search("bia");
//! let filtered = filter_forest(&forest, forest.outline(), &criteria);
//! assert_eq!(filtered[0].id, "Ana-0");
//! assert_eq!(filtered[0].children[0].id, "Bia-1");
//! # Ok::<(), orgforest::domain::DomainError>(())
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
