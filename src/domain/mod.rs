//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod filter;
pub mod name_index;
pub mod normalizer;

pub use arena::{Branch, Forest, PositionNode};
pub use builder::{build_forest, ForestBuilder};
pub use entities::*;
pub use error::{DomainError, TreeResult, ValidationError};
pub use filter::{filter_forest, FilterCriteria};
pub use name_index::NameIndex;
pub use normalizer::{normalize, NormalizedSheet};
