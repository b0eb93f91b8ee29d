//! Accumulating traversals over many sites and reducing the result.

use crate::model::TreeNode;
use crate::substitution::histogram::{BranchLengthSamples, MAX_MULTIPLICITY, SubstitutionHistogram};
use crate::substitution::inputs::{BranchAttributes, LabelSource};
use crate::substitution::traversal::{TraversalConfig, TraversalError, traverse};
use serde::Serialize;

// =#========================================================================#=
// SUBSTITUTION COUNTER
// =#========================================================================$=
/// Accumulators of one tree, filled site by site.
///
/// # Example
/// ```
/// use multihit::newick::parse_str_with_root;
/// use multihit::substitution::{BranchAttributeLookup, LabelMap, SubstitutionCounter};
/// use multihit::substitution::TraversalConfig;
///
/// let mut tree = parse_str_with_root("(A,B);", "root").unwrap();
/// let site: LabelMap = [("root", "AAA"), ("A", "ATA")]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
/// let mut attributes = BranchAttributeLookup::new();
/// attributes.entry("A".to_string()).or_default().insert("unconstrained".to_string(), 0.5);
///
/// let mut counter = SubstitutionCounter::new(TraversalConfig::default());
/// counter.add_site(&mut tree, &site, &attributes).unwrap();
/// let summary = counter.finish(&attributes);
///
/// assert_eq!(summary.counts, [2, 1, 0, 0]);
/// assert_eq!(summary.mean_branch_lengths, [0.5, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubstitutionCounter {
    config: TraversalConfig,
    histogram: SubstitutionHistogram,
    samples: BranchLengthSamples,
    sites: usize,
}

impl SubstitutionCounter {
    /// Creates empty accumulators.
    pub fn new(config: TraversalConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Runs one [traversal](traverse) for the labels of one site.
    pub fn add_site<L, A>(
        &mut self,
        tree: &mut TreeNode,
        labels: &L,
        attributes: &A,
    ) -> Result<(), TraversalError>
    where
        L: LabelSource + ?Sized,
        A: BranchAttributes + ?Sized,
    {
        traverse(
            tree,
            labels,
            &mut self.histogram,
            &mut self.samples,
            attributes,
            &self.config,
        )?;
        self.sites += 1;
        Ok(())
    }

    /// Counts so far.
    pub fn histogram(&self) -> &SubstitutionHistogram {
        &self.histogram
    }

    /// Branch-length samples so far.
    pub fn samples(&self) -> &BranchLengthSamples {
        &self.samples
    }

    /// Number of sites added.
    pub fn num_sites(&self) -> usize {
        self.sites
    }

    /// Reduces the accumulators to a [SubstitutionSummary].
    pub fn finish<A: BranchAttributes + ?Sized>(self, attributes: &A) -> SubstitutionSummary {
        SubstitutionSummary {
            sites: self.sites,
            counts: self.histogram.counts(),
            proportions: [
                self.histogram.proportion(1),
                self.histogram.proportion(2),
                self.histogram.proportion(3),
            ],
            mean_branch_lengths: self.samples.means(),
            tree_length: attributes.total_for_model(&self.config.model_key),
        }
    }
}

// =#========================================================================#=
// SUBSTITUTION SUMMARY
// =#========================================================================$=
/// Reduced substitution statistics of one tree over all sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubstitutionSummary {
    /// Number of sites traversed
    pub sites: usize,
    /// Labeled branches, then branches with 1, 2 and 3 changes
    pub counts: [u64; MAX_MULTIPLICITY + 1],
    /// `counts[k] / counts[0]` for `k` in `1..=3`, `0.0` without branches
    pub proportions: [f64; MAX_MULTIPLICITY],
    /// Mean branch attribute per class, `0.0` for empty classes
    pub mean_branch_lengths: [f64; MAX_MULTIPLICITY],
    /// Sum of the model's branch attribute over all branches
    pub tree_length: f64,
}

impl SubstitutionSummary {
    /// Traverses `tree` once per site and reduces the result.
    ///
    /// # Errors
    /// The first [TraversalError] of any site.
    pub fn collect<'s, I, L, A>(
        tree: &mut TreeNode,
        sites: I,
        attributes: &A,
        config: &TraversalConfig,
    ) -> Result<Self, TraversalError>
    where
        I: IntoIterator<Item = &'s L>,
        L: LabelSource + ?Sized + 's,
        A: BranchAttributes + ?Sized,
    {
        let mut counter = SubstitutionCounter::new(config.clone());
        for labels in sites {
            counter.add_site(tree, labels, attributes)?;
        }
        Ok(counter.finish(attributes))
    }
}
