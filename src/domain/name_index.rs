//! Display name to positions lookup used to resolve manager references.

use std::collections::HashMap;

use generational_arena::Index;

use crate::domain::arena::Forest;

/// Every position holding a given display name, in materialization order.
///
/// Does not tell "one person, several roles" apart from "two people, same
/// name"; both are just several candidates.
#[derive(Debug, Default)]
pub struct NameIndex {
    by_name: HashMap<String, Vec<Index>>,
}

impl NameIndex {
    pub fn build(forest: &Forest) -> Self {
        let mut by_name: HashMap<String, Vec<Index>> = HashMap::new();
        for &idx in forest.indices() {
            if let Some(node) = forest.get_node(idx) {
                by_name.entry(node.data.name.clone()).or_default().push(idx);
            }
        }
        Self { by_name }
    }

    /// Positions named `name`; empty when nobody holds it.
    pub fn candidates(&self, name: &str) -> &[Index] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
