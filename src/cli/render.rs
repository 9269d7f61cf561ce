//! Text rendering of forests with termtree

use termtree::Tree;

use crate::domain::{Branch, Forest, Position};

/// Convert branches into printable trees.
///
/// A company label is printed when a company filter is active, or when the
/// displayed subtree spans at most one company.
pub fn render_forest(
    forest: &Forest,
    branches: &[Branch],
    company_filtered: bool,
) -> Vec<Tree<String>> {
    branches
        .iter()
        .map(|branch| render_branch(forest, branch, company_filtered))
        .collect()
}

fn render_branch(forest: &Forest, branch: &Branch, company_filtered: bool) -> Tree<String> {
    let show_company = company_filtered || branch.companies(forest).len() <= 1;
    let root = match forest.get(&branch.id) {
        Some(position) => label(position, show_company),
        None => branch.id.clone(),
    };

    let leaves: Vec<_> = branch
        .children
        .iter()
        .map(|child| render_branch(forest, child, company_filtered))
        .collect();

    Tree::new(root).with_leaves(leaves)
}

fn label(position: &Position, show_company: bool) -> String {
    if show_company && !position.company.is_empty() {
        format!("{} [{}]", position, position.company)
    } else {
        position.to_string()
    }
}
