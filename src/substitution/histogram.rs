//! Accumulators filled by the substitution traversal.
//!
//! * [SubstitutionHistogram] counts visited branches and branches per
//!   multiplicity class.
//! * [BranchLengthSamples] collects branch lengths per multiplicity class.

use serde::Serialize;
use std::ops::Index;

/// Largest number of simultaneously changed positions that is counted,
/// i.e. the codon length
pub const MAX_MULTIPLICITY: usize = 3;

// =#========================================================================#=
// SUBSTITUTION HISTOGRAM
// =#========================================================================$=
/// Four-slot counter.
///
/// * Slot `0` counts branches whose child obtained a label.
/// * Slot `k` (`1..=3`) counts branches along which exactly `k` positions
///   changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionHistogram {
    counts: [u64; MAX_MULTIPLICITY + 1],
}

impl SubstitutionHistogram {
    /// Creates an all-zero histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one labeled branch.
    pub fn record_visit(&mut self) {
        self.counts[0] += 1;
    }

    /// Counts one branch with `multiplicity` changed positions.
    ///
    /// # Panics
    /// Panics if `multiplicity` is not in `1..=3`.
    pub fn record_substitution(&mut self, multiplicity: usize) {
        assert!(
            (1..=MAX_MULTIPLICITY).contains(&multiplicity),
            "multiplicity {multiplicity} out of range"
        );
        self.counts[multiplicity] += 1;
    }

    /// Number of labeled branches visited.
    pub fn total(&self) -> u64 {
        self.counts[0]
    }

    /// Count of slot `index`, `0` if out of range.
    pub fn get(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Share of visited branches with `multiplicity` changes;
    /// `0.0` if nothing was visited.
    pub fn proportion(&self, multiplicity: usize) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.get(multiplicity) as f64 / self.total() as f64
    }

    /// All four counts.
    pub fn counts(&self) -> [u64; MAX_MULTIPLICITY + 1] {
        self.counts
    }

    /// Adds the counts of `other` to this histogram.
    pub fn merge(&mut self, other: &SubstitutionHistogram) {
        for (count, added) in self.counts.iter_mut().zip(other.counts) {
            *count += added;
        }
    }
}

impl Index<usize> for SubstitutionHistogram {
    type Output = u64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.counts[index]
    }
}

// =#========================================================================#=
// BRANCH LENGTH SAMPLES
// =#========================================================================$=
/// Branch lengths collected per multiplicity class `1..=3`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BranchLengthSamples {
    classes: [Vec<f64>; MAX_MULTIPLICITY],
}

impl BranchLengthSamples {
    /// Creates empty collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `length` to the class of `multiplicity`.
    ///
    /// # Panics
    /// Panics if `multiplicity` is not in `1..=3`.
    pub fn push(&mut self, multiplicity: usize, length: f64) {
        assert!(
            (1..=MAX_MULTIPLICITY).contains(&multiplicity),
            "multiplicity {multiplicity} out of range"
        );
        self.classes[multiplicity - 1].push(length);
    }

    /// Samples of the class of `multiplicity`; empty if out of range.
    pub fn samples(&self, multiplicity: usize) -> &[f64] {
        multiplicity
            .checked_sub(1)
            .and_then(|i| self.classes.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Arithmetic mean of the class of `multiplicity`, `0.0` if it is empty.
    pub fn mean(&self, multiplicity: usize) -> f64 {
        let samples = self.samples(multiplicity);
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Means of all three classes, see [mean](Self::mean).
    pub fn means(&self) -> [f64; MAX_MULTIPLICITY] {
        [self.mean(1), self.mean(2), self.mean(3)]
    }

    /// Moves all samples of `other` to the end of the matching classes.
    pub fn merge(&mut self, other: BranchLengthSamples) {
        for (class, added) in self.classes.iter_mut().zip(other.classes) {
            class.extend(added);
        }
    }

    /// Total number of samples over all classes.
    pub fn len(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }

    /// Whether no sample was collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
