//! Side inputs of the substitution traversal.
//!
//! The traversal does not care where labels and branch attributes come from;
//! it reads them through [LabelSource] and [BranchAttributes]. Both are
//! implemented for the plain map types [LabelMap] and
//! [BranchAttributeLookup].

use std::collections::{BTreeMap, HashMap};

/// Node name to nucleotide label of one site.
pub type LabelMap = HashMap<String, String>;

/// Node name to per-model numeric branch attribute.
pub type BranchAttributeLookup = HashMap<String, HashMap<String, f64>>;

// =#========================================================================#=
// LABEL SOURCE (Trait)
// =#========================================================================T=
/// Labels of one site, looked up by node name.
pub trait LabelSource {
    /// Returns the label of the node called `name`, if it has its own.
    fn label(&self, name: &str) -> Option<&str>;
}

impl LabelSource for HashMap<String, String> {
    fn label(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl LabelSource for BTreeMap<String, String> {
    fn label(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

// =#========================================================================#=
// BRANCH ATTRIBUTES (Trait)
// =#========================================================================T=
/// Numeric branch attributes, recorded per fitted model.
pub trait BranchAttributes {
    /// Returns the value of `model` for the branch leading to `node`.
    fn branch_attribute(&self, node: &str, model: &str) -> Option<f64>;

    /// Sums the value of `model` over all branches; branches without it
    /// contribute nothing.
    fn total_for_model(&self, model: &str) -> f64;
}

impl BranchAttributes for HashMap<String, HashMap<String, f64>> {
    fn branch_attribute(&self, node: &str, model: &str) -> Option<f64> {
        self.get(node).and_then(|models| models.get(model)).copied()
    }

    fn total_for_model(&self, model: &str) -> f64 {
        self.values().filter_map(|models| models.get(model)).sum()
    }
}

impl BranchAttributes for BTreeMap<String, BTreeMap<String, f64>> {
    fn branch_attribute(&self, node: &str, model: &str) -> Option<f64> {
        self.get(node).and_then(|models| models.get(model)).copied()
    }

    fn total_for_model(&self, model: &str) -> f64 {
        self.values().filter_map(|models| models.get(model)).sum()
    }
}
