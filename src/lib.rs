//! Multihit parses phylogenetic trees from Newick strings and counts, per
//! branch, how many codon positions change at once between reconstructed
//! ancestral and descendant sequences.
//!
//! Core functionality provided:
//! - Newick: A lenient single-pass parser producing an owned [TreeNode]
//!   hierarchy with arbitrary arity, quoted names, raw branch-length text
//!   and `{...}` annotations, plus a writer for the reverse direction.
//! - Tagging: Classifies leaves by an ordered substring table and marks all
//!   internal nodes with a fixed tag. See [tagging].
//! - Substitutions: Walks the tree once per site, propagating labels from
//!   parents to unlabeled children, and builds a histogram of branches by
//!   number of changed positions together with branch-length samples per
//!   class. See [substitution].
//! - Configuration: All options can be loaded from JSON. See [config].
//!
//! Limitations:
//! - Branch lengths are kept as text; numeric values for the statistics
//!   come from a separate [BranchAttributes](substitution::BranchAttributes)
//!   lookup
//! - No tree algorithms beyond traversal (no rerooting, no distances)
//! - Reading result files, statistics and report rendering are left to the
//!   caller
//!
//! # Usage patterns
//! 1. Quick access with default settings via [parse_newick_str] and
//!    [analyze_tree].
//! 2. Configure [NewickParser](newick::NewickParser),
//!    [NodeTagger](tagging::NodeTagger) and
//!    [SubstitutionCounter](substitution::SubstitutionCounter) yourself.
//!
//! ## Example
//! ```
//! use multihit::{analyze_tree, config::AnalysisConfig};
//! use multihit::substitution::{BranchAttributeLookup, LabelMap};
//!
//! let config = AnalysisConfig::from_json_str(r#"{"parser": {"root_name": "root"}}"#)?;
//!
//! let site: LabelMap = [("root", "AAA"), ("Node1", "TTA"), ("C", "TTT")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! let mut attributes = BranchAttributeLookup::new();
//! for (node, length) in [("Node1", 0.2), ("C", 0.4)] {
//!     attributes
//!         .entry(node.to_string())
//!         .or_default()
//!         .insert("unconstrained".to_string(), length);
//! }
//!
//! let analysis = analyze_tree("((A,B)Node1,C);", [&site], &attributes, &config)?;
//!
//! // Node1 changes two positions, C three, A and B inherit from Node1
//! assert_eq!(analysis.summary.counts, [4, 0, 1, 1]);
//! assert_eq!(analysis.summary.mean_branch_lengths, [0.0, 0.2, 0.4]);
//! assert_eq!(analysis.tree.tag(), Some("test"));
//! # Ok::<(), multihit::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod newick;
pub mod parser;
pub mod substitution;
pub mod tagging;

pub use error::{Error, Result};
pub use model::TreeNode;

use crate::config::AnalysisConfig;
use crate::newick::ParseOutcome;
use crate::substitution::{BranchAttributes, LabelSource, SubstitutionSummary};
use crate::tagging::TagTrack;
use tracing::info;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning its root.
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> ParseOutcome {
    newick::parse_str(newick)
}

// ============================================================================
// Quick Analysis API
// ============================================================================
/// Result of [analyze_tree].
#[derive(Debug, Clone)]
pub struct TreeAnalysis {
    /// The tagged tree, carrying the labels of the last site
    pub tree: TreeNode,
    /// Tags of all named nodes
    pub tags: TagTrack,
    /// Substitution statistics over all sites
    pub summary: SubstitutionSummary,
}

/// Parses `newick`, tags the tree and traverses it once per site.
///
/// # Arguments
/// * `newick` - The Newick string
/// * `sites` - One label map per site
/// * `attributes` - Branch attributes, looked up for
///   `config.traversal.model_key`
/// * `config` - Options of all steps
///
/// # Returns
/// * [TreeAnalysis] - The tagged tree, its tags and the summary
/// * [Error] - If parsing or any traversal fails
pub fn analyze_tree<'s, I, L, A>(
    newick: &str,
    sites: I,
    attributes: &A,
    config: &AnalysisConfig,
) -> Result<TreeAnalysis>
where
    I: IntoIterator<Item = &'s L>,
    L: LabelSource + ?Sized + 's,
    A: BranchAttributes + ?Sized,
{
    let mut tree = config.newick_parser().parse_str(newick)?;
    let tags = config.node_tagger().tag(&mut tree);
    let summary = SubstitutionSummary::collect(&mut tree, sites, attributes, &config.traversal)?;

    info!(
        sites = summary.sites,
        branches = summary.counts[0],
        "analyzed tree"
    );

    Ok(TreeAnalysis {
        tree,
        tags,
        summary,
    })
}
