//! Counting multi-nucleotide substitutions along the branches of a tree.
//!
//! For each site, [traverse] assigns every node a nucleotide label (its own
//! from a [LabelSource], or its parent's) and compares it with the parent's
//! label. Branches are classified by the number of codon positions that
//! change at once:
//!
//! | Slot | Counts |
//! |------|--------|
//! | `histogram[0]` | branches whose child has a label |
//! | `histogram[1..=3]` | branches with 1, 2 or 3 changed positions |
//!
//! For changed branches, a [branch attribute](BranchAttributes) of a fitted
//! model is collected per class into [BranchLengthSamples]; each class
//! reduces to its mean (`0.0` when empty).
//!
//! [SubstitutionCounter] and [SubstitutionSummary] run the traversal over
//! many sites of one tree.

pub mod histogram;
pub mod inputs;
pub mod summary;
pub mod traversal;

pub use histogram::{BranchLengthSamples, MAX_MULTIPLICITY, SubstitutionHistogram};
pub use inputs::{BranchAttributeLookup, BranchAttributes, LabelMap, LabelSource};
pub use summary::{SubstitutionCounter, SubstitutionSummary};
pub use traversal::{
    DEFAULT_MAX_DEPTH, DEFAULT_MODEL_KEY, TraversalConfig, TraversalError, count_differences,
    traverse, traverse_from,
};
