//! Per-site walk comparing each node's label with its parent's.

use crate::model::TreeNode;
use crate::substitution::histogram::{BranchLengthSamples, MAX_MULTIPLICITY, SubstitutionHistogram};
use crate::substitution::inputs::{BranchAttributes, LabelSource};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

/// Model whose branch attribute is sampled, unless configured otherwise
pub const DEFAULT_MODEL_KEY: &str = "unconstrained";

/// Deepest tree walked, unless configured otherwise
pub const DEFAULT_MAX_DEPTH: usize = 100_000;

/// Nucleotide symbols taking part in comparisons
const CANONICAL_NUCLEOTIDES: &[u8] = b"ACGT";

// =#========================================================================#=
// TRAVERSAL CONFIG & ERROR
// =#========================================================================$=
/// Configuration of [traverse].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Key of the branch attribute sampled per multiplicity class
    pub model_key: String,
    /// Maximum number of edges between the start node and any node
    pub max_depth: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            model_key: DEFAULT_MODEL_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TraversalConfig {
    /// Sets the model key.
    pub fn with_model_key<S: Into<String>>(mut self, model_key: S) -> Self {
        self.model_key = model_key.into();
        self
    }

    /// Sets the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Errors aborting a traversal. The caller's accumulators are left
/// untouched when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// The start node has neither its own label nor a parent label.
    #[error("no label for traversal root {name:?}")]
    UnresolvedRootLabel { name: Option<String> },
    /// A changed branch has no attribute for the model.
    #[error("no '{model}' attribute for branch leading to {node:?}")]
    MissingBranchAttribute { node: String, model: String },
    /// More positions changed than a codon has.
    #[error("branch leading to {node:?} changes {diff} positions, at most 3 are counted")]
    MultiplicityOutOfRange { node: String, diff: usize },
    /// The tree is deeper than the configured limit.
    #[error("tree exceeds depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

// =#========================================================================#=
// TRAVERSAL
// =#========================================================================$=
/// Counts positions at which both labels carry a canonical nucleotide
/// (`A`, `C`, `G`, `T`) and these differ.
///
/// Only positions present in both labels are compared.
///
/// # Example
/// ```
/// use multihit::substitution::count_differences;
///
/// assert_eq!(count_differences("ATA", "AAA"), 1);
/// assert_eq!(count_differences("A-G", "ACC"), 1);
/// assert_eq!(count_differences("TTT", "AA"), 2);
/// ```
pub fn count_differences(label: &str, parent_label: &str) -> usize {
    label
        .bytes()
        .zip(parent_label.bytes())
        .filter(|&(own, parent)| {
            own != parent
                && CANONICAL_NUCLEOTIDES.contains(&own)
                && CANONICAL_NUCLEOTIDES.contains(&parent)
        })
        .count()
}

/// Walks the tree rooted at `root` for one site.
///
/// See [traverse_from]; the root has no parent, so it must have its own
/// entry in `labels`.
pub fn traverse<L, A>(
    root: &mut TreeNode,
    labels: &L,
    histogram: &mut SubstitutionHistogram,
    samples: &mut BranchLengthSamples,
    attributes: &A,
    config: &TraversalConfig,
) -> Result<(), TraversalError>
where
    L: LabelSource + ?Sized,
    A: BranchAttributes + ?Sized,
{
    traverse_from(root, None, labels, histogram, samples, attributes, config)
}

/// Walks the subtree rooted at `node` for one site, given the label of its
/// parent, if any.
///
/// Every node gets its label from `labels` by name, or else inherits the
/// label of its parent. For every node with a parent:
/// * `histogram[0]` is incremented.
/// * With `diff` [differences](count_differences) to the parent label and
///   `diff > 0`, `histogram[diff]` is incremented and the node's branch
///   attribute for `config.model_key` is appended to the samples of class
///   `diff`.
///
/// Nodes are visited depth-first in child order, using an explicit stack
/// bounded by `config.max_depth`.
///
/// # Errors
/// A [TraversalError] if the start node has no label, a changed branch has
/// no attribute, more than three positions change, or the tree is too
/// deep. Labels of already visited nodes are then stale, but `histogram`
/// and `samples` are unchanged.
pub fn traverse_from<L, A>(
    node: &mut TreeNode,
    parent_label: Option<&str>,
    labels: &L,
    histogram: &mut SubstitutionHistogram,
    samples: &mut BranchLengthSamples,
    attributes: &A,
    config: &TraversalConfig,
) -> Result<(), TraversalError>
where
    L: LabelSource + ?Sized,
    A: BranchAttributes + ?Sized,
{
    let mut site_histogram = SubstitutionHistogram::new();
    let mut site_samples = BranchLengthSamples::new();

    let mut stack: Vec<(&mut TreeNode, Option<Rc<str>>, usize)> =
        vec![(node, parent_label.map(Rc::from), 0)];

    while let Some((node, parent_label, depth)) = stack.pop() {
        if depth > config.max_depth {
            return Err(TraversalError::DepthLimitExceeded {
                limit: config.max_depth,
            });
        }

        let own_label = node.name().and_then(|name| labels.label(name));
        let label: Rc<str> = match (own_label, &parent_label) {
            (Some(own), _) => Rc::from(own),
            (None, Some(inherited)) => Rc::clone(inherited),
            (None, None) => {
                return Err(TraversalError::UnresolvedRootLabel {
                    name: node.name.clone(),
                });
            }
        };

        if let Some(parent_label) = &parent_label {
            let diff = count_differences(&label, parent_label);
            if diff > 0 {
                let name = node.name().unwrap_or_default();
                if diff > MAX_MULTIPLICITY {
                    return Err(TraversalError::MultiplicityOutOfRange {
                        node: name.to_string(),
                        diff,
                    });
                }
                let length = attributes
                    .branch_attribute(name, &config.model_key)
                    .ok_or_else(|| TraversalError::MissingBranchAttribute {
                        node: name.to_string(),
                        model: config.model_key.clone(),
                    })?;
                site_histogram.record_substitution(diff);
                site_samples.push(diff, length);
            }
            site_histogram.record_visit();
        }

        node.label = Some(label.to_string());
        stack.extend(
            node.children
                .iter_mut()
                .rev()
                .map(|child| (child, Some(Rc::clone(&label)), depth + 1)),
        );
    }

    debug!(
        branches = site_histogram.total(),
        single = site_histogram[1],
        double = site_histogram[2],
        triple = site_histogram[3],
        "traversed site"
    );

    histogram.merge(&site_histogram);
    samples.merge(site_samples);
    Ok(())
}
