//! Assigning classification tags to the nodes of a parsed tree.

use crate::model::TreeNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Tag of leaves that match no pattern, unless configured otherwise
pub const DEFAULT_LEAF_TAG: &str = "background";

/// Tag of internal nodes, unless configured otherwise
pub const DEFAULT_INTERNAL_TAG: &str = "test";

// =#========================================================================#=
// TAGGER CONFIG
// =#========================================================================$=
/// Configuration of a [NodeTagger], deserializable as part of
/// [AnalysisConfig](crate::config::AnalysisConfig).
///
/// `patterns` is an ordered list of `(substring, tag)` pairs; the order is
/// significant since the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Ordered `(substring, tag)` pairs
    pub patterns: Vec<(String, String)>,
    /// Tag for leaves matching no pattern
    pub default_leaf_tag: String,
    /// Tag for every internal node
    pub internal_tag: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            default_leaf_tag: DEFAULT_LEAF_TAG.to_string(),
            internal_tag: DEFAULT_INTERNAL_TAG.to_string(),
        }
    }
}

// =#========================================================================#=
// TRACKED TAGS
// =#========================================================================$=
/// Tag assigned to a named node, as recorded by [NodeTagger::tag].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedTag {
    /// The assigned tag
    pub tag: String,
    /// Whether the node has children
    pub internal: bool,
}

/// Map from node name to its [TrackedTag].
///
/// Nodes without name are not recorded. If names repeat, the node visited
/// last in pre-order wins.
pub type TagTrack = HashMap<String, TrackedTag>;

// =#========================================================================#=
// NODE TAGGER
// =#========================================================================$=
/// Assigns a tag to every node of a tree.
///
/// * A leaf gets the tag of the first pattern whose substring occurs in its
///   name, or the default leaf tag if none does or if it has no name.
/// * An internal node (including the root) always gets the internal tag.
///
/// # Example
/// ```
/// use multihit::newick::parse_str;
/// use multihit::tagging::NodeTagger;
///
/// let mut tree = parse_str("(Test_1,Other_2);").unwrap();
/// let tagger = NodeTagger::new("background", "test").with_pattern("Test", "selected");
/// tagger.tag(&mut tree);
///
/// assert_eq!(tree.tag(), Some("test"));
/// assert_eq!(tree.children[0].tag(), Some("selected"));
/// assert_eq!(tree.children[1].tag(), Some("background"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTagger {
    patterns: Vec<(String, String)>,
    default_leaf_tag: String,
    internal_tag: String,
}

impl Default for NodeTagger {
    fn default() -> Self {
        Self::new(DEFAULT_LEAF_TAG, DEFAULT_INTERNAL_TAG)
    }
}

impl NodeTagger {
    /// Creates a tagger without patterns.
    pub fn new<S: Into<String>, T: Into<String>>(default_leaf_tag: S, internal_tag: T) -> Self {
        Self {
            patterns: Vec::new(),
            default_leaf_tag: default_leaf_tag.into(),
            internal_tag: internal_tag.into(),
        }
    }

    /// Creates a tagger from a [TaggerConfig].
    pub fn from_config(config: &TaggerConfig) -> Self {
        Self {
            patterns: config.patterns.clone(),
            default_leaf_tag: config.default_leaf_tag.clone(),
            internal_tag: config.internal_tag.clone(),
        }
    }

    /// Appends a pattern; it is tried after all patterns added before.
    pub fn with_pattern<S: Into<String>, T: Into<String>>(mut self, substring: S, tag: T) -> Self {
        self.patterns.push((substring.into(), tag.into()));
        self
    }

    /// The ordered patterns.
    pub fn patterns(&self) -> &[(String, String)] {
        &self.patterns
    }

    /// Returns the tag for a leaf with the given name.
    pub fn leaf_tag(&self, name: Option<&str>) -> &str {
        let Some(name) = name else {
            return &self.default_leaf_tag;
        };
        self.patterns
            .iter()
            .find(|(substring, _)| name.contains(substring.as_str()))
            .map_or(self.default_leaf_tag.as_str(), |(_, tag)| tag.as_str())
    }

    /// Tags every node of the tree rooted at `root`, overwriting previous
    /// tags, and returns the tags of all named nodes.
    pub fn tag(&self, root: &mut TreeNode) -> TagTrack {
        let mut track = TagTrack::new();
        let mut num_unnamed_leaves = 0usize;

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let internal = !node.is_leaf();
            let tag = if internal {
                self.internal_tag.as_str()
            } else {
                if node.name.is_none() {
                    num_unnamed_leaves += 1;
                }
                self.leaf_tag(node.name())
            };
            node.tag = Some(tag.to_string());

            if let Some(name) = &node.name {
                track.insert(
                    name.clone(),
                    TrackedTag {
                        tag: tag.to_string(),
                        internal,
                    },
                );
            }

            stack.extend(node.children.iter_mut().rev());
        }

        if num_unnamed_leaves > 0 {
            warn!(
                count = num_unnamed_leaves,
                tag = self.default_leaf_tag.as_str(),
                "leaves without name got the default tag"
            );
        }
        debug!(named = track.len(), "tagged tree");
        track
    }
}

/// Tags every node of the tree with a one-off [NodeTagger].
///
/// # Arguments
/// * `root` - Root of the tree to tag
/// * `patterns` - Ordered `(substring, tag)` pairs, first match wins
/// * `default_leaf_tag` - Tag of leaves matching no pattern
/// * `internal_tag` - Tag of every internal node
pub fn tag_tree<S: AsRef<str>, T: AsRef<str>>(
    root: &mut TreeNode,
    patterns: &[(S, T)],
    default_leaf_tag: &str,
    internal_tag: &str,
) -> TagTrack {
    let tagger = patterns
        .iter()
        .fold(NodeTagger::new(default_leaf_tag, internal_tag), |tagger, (substring, tag)| {
            tagger.with_pattern(substring.as_ref(), tag.as_ref())
        });
    tagger.tag(root)
}
