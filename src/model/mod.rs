//! Data model for parsed trees.
//!
//! # Tree representation
//! Trees are represented by [TreeNode], an owned hierarchy: each node holds
//! its children in their original order. Unlike an arena, no node indices
//! exist; a node is addressed by walking from the root.
//!
//! The parser fills in structure, names and raw text. Two later passes
//! write into the same nodes:
//! 1. [NodeTagger](crate::tagging::NodeTagger) sets [TreeNode::tag] once.
//! 2. [traverse](crate::substitution::traverse) sets [TreeNode::label],
//!    once per site.

pub mod tree_node;

pub use tree_node::{PreOrder, TreeNode};
