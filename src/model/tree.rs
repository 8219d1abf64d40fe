// src/model/tree.rs
//! The discussion tree — reconstructs reply nesting from a flat record stream.
//!
//! A node's position mirrors its reply depth in the source discussion. The
//! tree itself is the synthetic root: it carries no payload and exists only
//! as the attachment point for top-level comments. Children keep insertion
//! order, which is the document order of the rendered output.

use crate::model::record::CommentRecord;
use crate::types::CommentId;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// One comment in the tree, with its replies as ordered children.
#[derive(Debug, Clone)]
pub struct CommentNode {
    key: CommentId,
    value: CommentRecord,
    children: IndexMap<CommentId, CommentNode>,
}

impl CommentNode {
    pub fn new(key: CommentId, value: CommentRecord) -> Self {
        Self {
            key,
            value,
            children: IndexMap::new(),
        }
    }

    #[allow(dead_code)] // Public API - used by library consumers
    pub fn key(&self) -> &CommentId {
        &self.key
    }

    pub fn record(&self) -> &CommentRecord {
        &self.value
    }

    /// Attaches `child` under this node, keyed by the child's own key.
    ///
    /// Inserting an existing key replaces that child (its position is kept).
    /// Returns the stored child so deeper replies can chain onto it.
    pub fn insert(&mut self, child: CommentNode) -> &mut CommentNode {
        insert_into(&mut self.children, child)
    }

    /// Depth-first pre-order search for the node with the given key,
    /// this node included.
    #[allow(dead_code)] // Public API - used by library consumers
    pub fn find(&self, id: &CommentId) -> Option<&CommentNode> {
        if &self.key == id {
            return Some(self);
        }
        self.children.values().find_map(|child| child.find(id))
    }

    #[allow(dead_code)] // Public API - used by library consumers
    pub fn children(&self) -> impl Iterator<Item = &CommentNode> {
        self.children.values()
    }
}

fn insert_into(
    children: &mut IndexMap<CommentId, CommentNode>,
    child: CommentNode,
) -> &mut CommentNode {
    let key = child.key.clone();
    match children.entry(key) {
        Entry::Occupied(mut entry) => {
            entry.insert(child);
            entry.into_mut()
        }
        Entry::Vacant(entry) => entry.insert(child),
    }
}

/// The whole discussion's comment forest, rooted at a payload-less anchor.
#[derive(Debug, Clone, Default)]
pub struct CommentTree {
    children: IndexMap<CommentId, CommentNode>,
}

impl CommentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a top-level comment (reply depth 0).
    pub fn insert(&mut self, child: CommentNode) -> &mut CommentNode {
        insert_into(&mut self.children, child)
    }

    /// Depth-first pre-order search across the whole tree. The synthetic
    /// root has no key, so it never matches.
    #[allow(dead_code)] // Public API - used by library consumers
    pub fn find(&self, id: &CommentId) -> Option<&CommentNode> {
        self.children.values().find_map(|child| child.find(id))
    }

    /// Lazy pre-order traversal yielding `(depth, node)`, depth 0 for
    /// top-level comments. The root is excluded. Iterating twice yields the
    /// same sequence; traversal never mutates the tree.
    pub fn iter(&self) -> Traversal<'_> {
        Traversal {
            stack: self
                .children
                .values()
                .rev()
                .map(|node| (0, node))
                .collect(),
        }
    }

    /// Number of comments in the tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[allow(dead_code)] // Public API - used by library consumers
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Pre-order, depth-first, insertion-order iterator over a [`CommentTree`].
pub struct Traversal<'a> {
    stack: Vec<(usize, &'a CommentNode)>,
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (usize, &'a CommentNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Reversed so the first-inserted child is popped first
        for child in node.children.values().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

impl<'a> IntoIterator for &'a CommentTree {
    type Item = (usize, &'a CommentNode);
    type IntoIter = Traversal<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
