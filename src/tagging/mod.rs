//! Classification of tree nodes into tagged groups.
//!
//! Leaves are matched against an ordered pattern table, internal nodes all
//! receive a single fixed tag. See [NodeTagger].

pub mod tagger;

pub use tagger::{
    DEFAULT_INTERNAL_TAG, DEFAULT_LEAF_TAG, NodeTagger, TagTrack, TaggerConfig, TrackedTag,
    tag_tree,
};
