use std::collections::{BTreeSet, HashMap};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::Position;

/// Forest node in the arena: a position plus its structural links.
#[derive(Debug)]
pub struct PositionNode {
    /// Position data for this node
    pub data: Position,
    /// Index of the parent node in the arena, None for roots
    pub parent: Option<Index>,
    /// Indices of child nodes, in materialization order
    pub children: Vec<Index>,
}

/// Structural view over a forest: a position id and its child branches.
///
/// The full forest and every filtered projection of it are expressed as
/// `Vec<Branch>`; position data is looked up in the owning [`Forest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub id: String,
    pub children: Vec<Branch>,
}

impl Branch {
    /// Distinct non-empty companies of the positions in this subtree.
    pub fn companies<'f>(&self, forest: &'f Forest) -> BTreeSet<&'f str> {
        self.walk()
            .filter_map(|branch| forest.get(&branch.id))
            .map(|position| position.company.as_str())
            .filter(|company| !company.is_empty())
            .collect()
    }

    /// Ids of this subtree in pre-order.
    pub fn ids(&self) -> Vec<&str> {
        self.walk().map(|branch| branch.id.as_str()).collect()
    }

    /// Pre-order walk over this branch and everything below it.
    fn walk(&self) -> impl Iterator<Item = &Branch> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let branch = stack.pop()?;
            stack.extend(branch.children.iter().rev());
            Some(branch)
        })
    }
}

// Nested branches can be as deep as the longest reporting chain; unlink them
// onto a heap stack so dropping never recurses.
impl Drop for Branch {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut branch) = stack.pop() {
            stack.append(&mut branch.children);
        }
    }
}

/// Arena-based forest of reporting trees.
///
/// Uses a generational arena for node storage and O(1) lookups. Positions are
/// kept in materialization order; roots are the positions without a parent.
#[derive(Debug, Default)]
pub struct Forest {
    arena: Arena<PositionNode>,
    /// Every position, in materialization order
    order: Vec<Index>,
    by_id: HashMap<String, Index>,
    roots: Vec<Index>,
    outline: Vec<Branch>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
            roots: Vec::new(),
            outline: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_position(&mut self, data: Position) -> Index {
        let id = data.id.clone();
        let idx = self.arena.insert(PositionNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        self.order.push(idx);
        self.by_id.insert(id, idx);
        idx
    }

    /// Record `parent` as the parent of `child`.
    ///
    /// A node keeps the first parent it gets; later calls return false.
    pub(crate) fn attach(&mut self, child: Index, parent: Index) -> bool {
        match self.arena.get(child) {
            Some(node) if node.parent.is_none() => {}
            _ => return false,
        }
        let Some(parent_node) = self.arena.get_mut(parent) else {
            return false;
        };
        parent_node.children.push(child);
        if let Some(child_node) = self.arena.get_mut(child) {
            child_node.parent = Some(parent);
        }
        true
    }

    /// True when `ancestor` is `node` or lies on the parent chain of `node`.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: Index, node: Index) -> bool {
        if ancestor != node && self.arena.get(ancestor).is_some_and(|n| n.children.is_empty()) {
            return false;
        }
        let mut current = Some(node);
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.arena.get(idx).and_then(|n| n.parent);
        }
        false
    }

    /// Compute roots and the full outline once linking is done.
    pub(crate) fn seal(&mut self) {
        self.roots = self
            .order
            .iter()
            .copied()
            .filter(|&idx| self.arena.get(idx).is_some_and(|n| n.parent.is_none()))
            .collect();
        self.outline = self
            .roots
            .iter()
            .filter_map(|&idx| {
                self.fold_subtree(idx, |position, children| {
                    Some(Branch {
                        id: position.id.clone(),
                        children,
                    })
                })
            })
            .collect();
    }

    /// Build a [`Branch`] for the subtree at `root`, bottom-up.
    ///
    /// `finish` sees each position once all of its children are finished, in
    /// child order, and decides whether the position survives. Uses an explicit
    /// stack, so chain length is bounded by memory rather than call depth.
    pub(crate) fn fold_subtree<F>(&self, root: Index, mut finish: F) -> Option<Branch>
    where
        F: FnMut(&Position, Vec<Branch>) -> Option<Branch>,
    {
        struct Frame {
            idx: Index,
            next_child: usize,
            children: Vec<Branch>,
        }

        let mut stack = vec![Frame {
            idx: root,
            next_child: 0,
            children: Vec::new(),
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(node) = self.arena.get(frame.idx) else {
                stack.pop();
                continue;
            };

            if let Some(&child) = node.children.get(frame.next_child) {
                frame.next_child += 1;
                stack.push(Frame {
                    idx: child,
                    next_child: 0,
                    children: Vec::new(),
                });
                continue;
            }

            let children = stack.pop().map(|f| f.children).unwrap_or_default();
            let finished = finish(&node.data, children);
            match stack.last_mut() {
                Some(parent) => parent.children.extend(finished),
                None => return finished,
            }
        }
        None
    }

    pub fn get_node(&self, idx: Index) -> Option<&PositionNode> {
        self.arena.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    /// Position by id.
    pub fn get(&self, id: &str) -> Option<&Position> {
        self.index_of(id)
            .and_then(|idx| self.arena.get(idx))
            .map(|n| &n.data)
    }

    /// Arena indices in materialization order.
    pub fn indices(&self) -> &[Index] {
        &self.order
    }

    /// All positions in materialization order.
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.order
            .iter()
            .filter_map(|&idx| self.arena.get(idx))
            .map(|n| &n.data)
    }

    pub fn roots(&self) -> Vec<&Position> {
        self.roots
            .iter()
            .filter_map(|&idx| self.arena.get(idx))
            .map(|n| &n.data)
            .collect()
    }

    /// Direct reports of a position, in input order. Empty for unknown ids.
    pub fn children(&self, id: &str) -> Vec<&Position> {
        self.index_of(id)
            .and_then(|idx| self.arena.get(idx))
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&child| self.arena.get(child))
                    .map(|n| &n.data)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn parent(&self, id: &str) -> Option<&Position> {
        self.index_of(id)
            .and_then(|idx| self.arena.get(idx))
            .and_then(|node| node.parent)
            .and_then(|parent| self.arena.get(parent))
            .map(|n| &n.data)
    }

    /// Structural view of the whole, unfiltered forest.
    pub fn outline(&self) -> &[Branch] {
        &self.outline
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Pre-order walk of the subtree rooted at `id`, starting with `id` itself.
    pub fn subtree(&self, id: &str) -> SubtreeIterator<'_> {
        SubtreeIterator::new(self, self.index_of(id))
    }

    /// Number of levels in the deepest tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut stack: Vec<(Index, usize)> = self.roots.iter().map(|&root| (root, 1)).collect();
        let mut deepest = 0;
        while let Some((idx, level)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|&child| (child, level + 1)));
        }
        deepest
    }
}

pub struct SubtreeIterator<'a> {
    forest: &'a Forest,
    stack: Vec<Index>,
}

impl<'a> SubtreeIterator<'a> {
    fn new(forest: &'a Forest, start: Option<Index>) -> Self {
        Self {
            forest,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for SubtreeIterator<'a> {
    type Item = &'a Position;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some(&node.data);
            }
        }
        None
    }
}
