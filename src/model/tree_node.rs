//! Owned tree hierarchy produced by the Newick parser.
//!
//! Provides [TreeNode], a node owning its ordered children, and [PreOrder],
//! a depth-first iterator over a hierarchy.

use serde::Serialize;

// =$========================================================================$=
// TREE NODE
// =$========================================================================$=
/// A node of a rooted tree together with its ordered children.
///
/// # Structure
/// - Every node exclusively owns its `children`; there are no parent
///   back-references. A parent is only ever passed along during traversal.
/// - `attribute` and `annotation` keep the raw text found in the Newick
///   string. The branch length in `attribute` is not interpreted.
/// - `original_child_order` is the 1-based position among siblings, `0` for
///   the root.
/// - `tag` is set by [NodeTagger](crate::tagging::NodeTagger), `label` by
///   each [traversal](crate::substitution::traverse) and overwritten on the
///   next one.
///
/// # Depth
/// Dropping, cloning and comparing use explicit stacks and work for trees
/// of any depth. `Debug` and `Serialize` recurse and are meant for trees of
/// moderate depth.
#[derive(Debug, Default, Serialize)]
pub struct TreeNode {
    /// Node name; unset for the synthetic root and for internal nodes in
    /// bootstrap-value mode
    pub name: Option<String>,
    /// Raw branch-length text after `:`
    pub attribute: String,
    /// Raw text inside `{...}`
    pub annotation: String,
    /// Support value text of an internal node, in bootstrap-value mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_value: Option<String>,
    /// Ordered children
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    /// 1-based position among siblings (`0` for the root)
    pub original_child_order: usize,
    /// Classification assigned after parsing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Nucleotide label of the last traversal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// ============================================================================
// New, Getters, etc. (pub)
// ============================================================================
impl TreeNode {
    /// Creates an unnamed node without children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a named leaf.
    pub fn leaf<S: Into<String>>(name: S) -> Self {
        let mut node = Self::new();
        node.name = Some(name.into());
        node
    }

    /// Creates a node named `name` (or unnamed) without children.
    pub fn with_name(name: Option<String>) -> Self {
        let mut node = Self::new();
        node.name = name;
        node
    }

    /// Sets the branch-length text.
    pub fn with_attribute<S: Into<String>>(mut self, attribute: S) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Appends `child`, assigning its position among siblings.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.add_child(child);
        self
    }

    /// Appends `child`, assigning its position among siblings, and returns
    /// a mutable reference to it.
    pub fn add_child(&mut self, mut child: TreeNode) -> &mut TreeNode {
        child.original_child_order = self.children.len() + 1;
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Name of this node, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Tag of this node, if assigned.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Label of the most recent traversal, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the child at `index` (0-based).
    pub fn child(&self, index: usize) -> Option<&TreeNode> {
        self.children.get(index)
    }

    /// Depth-first pre-order iterator over this node and its descendants,
    /// children visited in order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including this node.
    pub fn num_nodes(&self) -> usize {
        self.iter().count()
    }

    /// Number of leaves in this subtree.
    pub fn num_leaves(&self) -> usize {
        self.iter().filter(|node| node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Finds the first node in pre-order with the given name.
    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.name() == Some(name))
    }
}

// ============================================================================
// Drop, Clone & PartialEq (without recursion)
// ============================================================================
impl TreeNode {
    /// Copy of this node with all fields but the children.
    fn clone_without_children(&self) -> Self {
        Self {
            name: self.name.clone(),
            attribute: self.attribute.clone(),
            annotation: self.annotation.clone(),
            bootstrap_value: self.bootstrap_value.clone(),
            children: Vec::with_capacity(self.children.len()),
            original_child_order: self.original_child_order,
            tag: self.tag.clone(),
            label: self.label.clone(),
        }
    }

    /// Whether all fields but the children are equal.
    fn eq_without_children(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attribute == other.attribute
            && self.annotation == other.annotation
            && self.bootstrap_value == other.bootstrap_value
            && self.original_child_order == other.original_child_order
            && self.tag == other.tag
            && self.label == other.label
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        // Detach descendants level by level so that each node is dropped
        // without children of its own
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl Clone for TreeNode {
    fn clone(&self) -> Self {
        // Each entry pairs a source node with its copy under construction;
        // a copy is complete once it has as many children as its source
        let mut stack = vec![(self, self.clone_without_children())];
        while let Some(&(source, ref copy)) = stack.last() {
            if let Some(child) = source.children.get(copy.children.len()) {
                stack.push((child, child.clone_without_children()));
                continue;
            }
            let Some((_, finished)) = stack.pop() else {
                break;
            };
            match stack.last_mut() {
                Some((_, parent)) => parent.children.push(finished),
                None => return finished,
            }
        }
        Self::new()
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((left, right)) = stack.pop() {
            if !left.eq_without_children(right) || left.children.len() != right.children.len() {
                return false;
            }
            stack.extend(left.children.iter().zip(&right.children));
        }
        true
    }
}

// =$========================================================================$=
// PRE-ORDER ITERATOR
// =$========================================================================$=
/// Depth-first pre-order iterator, created by [TreeNode::iter].
pub struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a TreeNode {
    type Item = &'a TreeNode;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
