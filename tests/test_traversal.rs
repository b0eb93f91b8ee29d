use multihit::model::TreeNode;
use multihit::newick::parse_str_with_root;
use multihit::substitution::{
    BranchAttributeLookup, BranchAttributes, BranchLengthSamples, LabelMap, SubstitutionCounter,
    SubstitutionHistogram, SubstitutionSummary, TraversalConfig, TraversalError,
    count_differences, traverse, traverse_from,
};
use std::collections::{BTreeMap, HashMap};

// --- HELPERS ---
fn labels(entries: &[(&str, &str)]) -> LabelMap {
    entries
        .iter()
        .map(|(name, label)| (name.to_string(), label.to_string()))
        .collect()
}

fn attributes(entries: &[(&str, f64)]) -> BranchAttributeLookup {
    entries
        .iter()
        .map(|(name, value)| {
            let models = HashMap::from([("unconstrained".to_string(), *value)]);
            (name.to_string(), models)
        })
        .collect()
}

fn run(
    tree: &mut TreeNode,
    site: &LabelMap,
    lookup: &BranchAttributeLookup,
) -> Result<(SubstitutionHistogram, BranchLengthSamples), TraversalError> {
    let mut histogram = SubstitutionHistogram::new();
    let mut samples = BranchLengthSamples::new();
    traverse(
        tree,
        site,
        &mut histogram,
        &mut samples,
        lookup,
        &TraversalConfig::default(),
    )?;
    Ok((histogram, samples))
}

// --- TESTS DIFFERENCE COUNTING ---
#[test]
fn test_count_differences() {
    assert_eq!(count_differences("AAA", "AAA"), 0);
    assert_eq!(count_differences("ATA", "AAA"), 1);
    assert_eq!(count_differences("TTA", "AAA"), 2);
    assert_eq!(count_differences("CGT", "GTA"), 3);
}

#[test]
fn test_count_differences_ignores_non_canonical() {
    assert_eq!(count_differences("A-A", "ATA"), 0);
    assert_eq!(count_differences("NNN", "ACG"), 0);
    assert_eq!(count_differences("ACG", "?CT"), 1);
    assert_eq!(count_differences("aaa", "TTT"), 0);
}

#[test]
fn test_count_differences_uses_shared_positions() {
    assert_eq!(count_differences("AAAT", "AAA"), 0);
    assert_eq!(count_differences("T", "AAA"), 1);
    assert_eq!(count_differences("", "AAA"), 0);
}

// --- TESTS LABEL PROPAGATION ---
#[test]
fn test_child_inherits_root_label() {
    let mut tree = parse_str_with_root("(A);", "root").unwrap();
    let site = labels(&[("root", "AAA")]);

    let (histogram, samples) = run(&mut tree, &site, &attributes(&[])).unwrap();

    assert_eq!(tree.children[0].label(), Some("AAA"));
    assert_eq!(histogram.counts(), [1, 0, 0, 0]);
    assert!(samples.is_empty());
}

#[test]
fn test_single_change() {
    let mut tree = parse_str_with_root("(A);", "root").unwrap();
    let site = labels(&[("root", "AAA"), ("A", "ATA")]);

    let (histogram, samples) = run(&mut tree, &site, &attributes(&[("A", 0.25)])).unwrap();

    assert_eq!(histogram[0], 1);
    assert_eq!(histogram[1], 1);
    assert_eq!(histogram[2], 0);
    assert_eq!(samples.samples(1), [0.25]);
    assert_eq!(samples.means(), [0.25, 0.0, 0.0]);
}

#[test]
fn test_inheritance_through_internal_nodes() {
    let mut tree = parse_str_with_root("((A,B)N1,(C,D)N2);", "root").unwrap();
    let site = labels(&[("root", "ACG"), ("N1", "TCG"), ("B", "TCC"), ("D", "GGG")]);
    let lookup = attributes(&[("N1", 1.0), ("B", 2.0), ("D", 3.0)]);

    let (histogram, samples) = run(&mut tree, &site, &lookup).unwrap();

    let n1 = &tree.children[0];
    let n2 = &tree.children[1];
    assert_eq!(n1.label(), Some("TCG"));
    assert_eq!(n1.children[0].label(), Some("TCG"));
    assert_eq!(n1.children[1].label(), Some("TCC"));
    assert_eq!(n2.label(), Some("ACG"));
    assert_eq!(n2.children[0].label(), Some("ACG"));
    assert_eq!(n2.children[1].label(), Some("GGG"));

    // N1: 1 change, B: 1 change (vs N1), D: 2 changes (vs inherited ACG)
    assert_eq!(histogram.counts(), [6, 2, 1, 0]);
    assert_eq!(samples.samples(1), [1.0, 2.0]);
    assert_eq!(samples.samples(2), [3.0]);
    assert_eq!(samples.means(), [1.5, 3.0, 0.0]);
}

#[test]
fn test_gap_against_nucleotide_is_no_change() {
    let mut tree = parse_str_with_root("(A);", "root").unwrap();
    let site = labels(&[("root", "A-G"), ("A", "ATG")]);

    let (histogram, _) = run(&mut tree, &site, &attributes(&[])).unwrap();
    assert_eq!(histogram.counts(), [1, 0, 0, 0]);
}

#[test]
fn test_labels_are_overwritten_per_site() {
    let mut tree = parse_str_with_root("(A,B);", "root").unwrap();
    let lookup = attributes(&[("A", 0.5)]);

    run(&mut tree, &labels(&[("root", "AAA"), ("A", "CAA")]), &lookup).unwrap();
    assert_eq!(tree.children[0].label(), Some("CAA"));

    run(&mut tree, &labels(&[("root", "GGG")]), &lookup).unwrap();
    assert_eq!(tree.children[0].label(), Some("GGG"));
    assert_eq!(tree.children[1].label(), Some("GGG"));
}

#[test]
fn test_traverse_from_subtree() {
    let mut subtree = TreeNode::leaf("X").with_child(TreeNode::leaf("Y"));
    let site = labels(&[("Y", "AAT")]);
    let mut histogram = SubstitutionHistogram::new();
    let mut samples = BranchLengthSamples::new();

    traverse_from(
        &mut subtree,
        Some("AAA"),
        &site,
        &mut histogram,
        &mut samples,
        &attributes(&[("Y", 0.1)]),
        &TraversalConfig::default(),
    )
    .unwrap();

    assert_eq!(subtree.label(), Some("AAA"));
    assert_eq!(histogram.counts(), [2, 1, 0, 0]);
}

#[test]
fn test_other_model_key() {
    let mut tree = parse_str_with_root("(A);", "root").unwrap();
    let site = labels(&[("root", "AAA"), ("A", "CCA")]);
    let mut lookup = attributes(&[("A", 0.5)]);
    lookup.get_mut("A").unwrap().insert("MH".to_string(), 0.75);

    let mut histogram = SubstitutionHistogram::new();
    let mut samples = BranchLengthSamples::new();
    let config = TraversalConfig::default().with_model_key("MH");
    traverse(&mut tree, &site, &mut histogram, &mut samples, &lookup, &config).unwrap();

    assert_eq!(samples.samples(2), [0.75]);
}

#[test]
fn test_btree_inputs() {
    let mut tree = parse_str_with_root("(A);", "root").unwrap();
    let site: BTreeMap<String, String> = [("root", "AAA"), ("A", "AAC")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut lookup: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    lookup
        .entry("A".to_string())
        .or_default()
        .insert("unconstrained".to_string(), 2.0);

    let mut histogram = SubstitutionHistogram::new();
    let mut samples = BranchLengthSamples::new();
    traverse(
        &mut tree,
        &site,
        &mut histogram,
        &mut samples,
        &lookup,
        &TraversalConfig::default(),
    )
    .unwrap();

    assert_eq!(histogram.counts(), [1, 1, 0, 0]);
    assert_eq!(lookup.total_for_model("unconstrained"), 2.0);
}

// --- TESTS FAILURES ---
#[test]
fn test_unresolved_root_label() {
    let mut tree = parse_str_with_root("(A,B);", "root").unwrap();
    let err = run(&mut tree, &labels(&[("A", "AAA")]), &attributes(&[])).unwrap_err();
    assert_eq!(
        err,
        TraversalError::UnresolvedRootLabel {
            name: Some("root".to_string())
        }
    );
}

#[test]
fn test_unnamed_root_is_unresolved() {
    let mut tree = multihit::newick::parse_str("(A,B);").unwrap();
    let err = run(&mut tree, &labels(&[("root", "AAA")]), &attributes(&[])).unwrap_err();
    assert_eq!(err, TraversalError::UnresolvedRootLabel { name: None });
}

#[test]
fn test_missing_branch_attribute() {
    let mut tree = parse_str_with_root("(A);", "root").unwrap();
    let site = labels(&[("root", "AAA"), ("A", "TAA")]);
    let err = run(&mut tree, &site, &attributes(&[("B", 1.0)])).unwrap_err();
    assert_eq!(
        err,
        TraversalError::MissingBranchAttribute {
            node: "A".to_string(),
            model: "unconstrained".to_string()
        }
    );
}

#[test]
fn test_multiplicity_out_of_range() {
    let mut tree = parse_str_with_root("(A);", "root").unwrap();
    let site = labels(&[("root", "AAAA"), ("A", "TTTT")]);
    let err = run(&mut tree, &site, &attributes(&[("A", 1.0)])).unwrap_err();
    assert_eq!(
        err,
        TraversalError::MultiplicityOutOfRange {
            node: "A".to_string(),
            diff: 4
        }
    );
}

#[test]
fn test_failed_traversal_leaves_accumulators_untouched() {
    let mut tree = parse_str_with_root("(A,B);", "root").unwrap();
    let site = labels(&[("root", "AAA"), ("A", "TAA"), ("B", "TTA")]);
    let lookup = attributes(&[("A", 1.0)]);

    let mut histogram = SubstitutionHistogram::new();
    let mut samples = BranchLengthSamples::new();
    let result = traverse(
        &mut tree,
        &site,
        &mut histogram,
        &mut samples,
        &lookup,
        &TraversalConfig::default(),
    );

    assert!(matches!(
        result,
        Err(TraversalError::MissingBranchAttribute { .. })
    ));
    assert_eq!(histogram, SubstitutionHistogram::new());
    assert!(samples.is_empty());
}

#[test]
fn test_depth_limit() {
    let newick = format!("{}A{};", "(".repeat(50), ")".repeat(50));
    let mut tree = parse_str_with_root(&newick, "root").unwrap();
    let site = labels(&[("root", "AAA")]);
    let mut histogram = SubstitutionHistogram::new();
    let mut samples = BranchLengthSamples::new();

    let shallow = TraversalConfig::default().with_max_depth(10);
    let err = traverse(
        &mut tree,
        &site,
        &mut histogram,
        &mut samples,
        &attributes(&[]),
        &shallow,
    )
    .unwrap_err();
    assert_eq!(err, TraversalError::DepthLimitExceeded { limit: 10 });

    let deep = TraversalConfig::default().with_max_depth(50);
    traverse(
        &mut tree,
        &site,
        &mut histogram,
        &mut samples,
        &attributes(&[]),
        &deep,
    )
    .unwrap();
    assert_eq!(histogram.total(), 50);
}

#[test]
fn test_very_deep_tree_does_not_overflow() {
    let depth = 20_000;
    let newick = format!("{}A{};", "(".repeat(depth), ")".repeat(depth));
    let mut tree = parse_str_with_root(&newick, "root").unwrap();
    let site = labels(&[("root", "AAA"), ("A", "CAA")]);

    let (histogram, samples) = run(&mut tree, &site, &attributes(&[("A", 0.1)])).unwrap();
    assert_eq!(histogram.counts(), [depth as u64, 1, 0, 0]);
    assert_eq!(samples.len(), 1);
}

// --- TESTS SUMMARY ---
#[test]
fn test_empty_classes_reduce_to_zero() {
    let samples = BranchLengthSamples::new();
    assert_eq!(samples.means(), [0.0, 0.0, 0.0]);
    assert!(samples.means().iter().all(|m| !m.is_nan()));

    let histogram = SubstitutionHistogram::new();
    assert_eq!(histogram.proportion(1), 0.0);
}

#[test]
fn test_summary_over_sites() {
    let mut tree = parse_str_with_root("((A,B)N,C);", "root").unwrap();
    let lookup = attributes(&[("N", 0.5), ("A", 1.0), ("B", 1.5), ("C", 2.0)]);
    let sites = [
        labels(&[("root", "AAA"), ("N", "AAT"), ("A", "AAT")]),
        labels(&[("root", "CCC"), ("C", "GGC"), ("B", "TTT")]),
        labels(&[("root", "GGG")]),
    ];

    let summary =
        SubstitutionSummary::collect(&mut tree, &sites, &lookup, &TraversalConfig::default())
            .unwrap();

    // Site 1: N one change. Site 2: C two, B three. Site 3: none.
    assert_eq!(summary.sites, 3);
    assert_eq!(summary.counts, [12, 1, 1, 1]);
    assert_eq!(summary.mean_branch_lengths, [0.5, 2.0, 1.5]);
    assert_eq!(summary.proportions, [1.0 / 12.0, 1.0 / 12.0, 1.0 / 12.0]);
    assert_eq!(summary.tree_length, 5.0);
}

#[test]
fn test_counter_stops_at_failing_site() {
    let mut tree = parse_str_with_root("(A);", "root").unwrap();
    let lookup = attributes(&[("A", 1.0)]);
    let mut counter = SubstitutionCounter::new(TraversalConfig::default());

    counter
        .add_site(&mut tree, &labels(&[("root", "AAA"), ("A", "CAA")]), &lookup)
        .unwrap();
    assert!(counter.add_site(&mut tree, &labels(&[]), &lookup).is_err());

    assert_eq!(counter.num_sites(), 1);
    assert_eq!(counter.histogram().counts(), [1, 1, 0, 0]);
    assert_eq!(counter.samples().samples(1), [1.0]);
}

#[test]
fn test_summary_serializes() {
    let summary = SubstitutionSummary {
        sites: 2,
        counts: [4, 1, 0, 0],
        proportions: [0.25, 0.0, 0.0],
        mean_branch_lengths: [0.5, 0.0, 0.0],
        tree_length: 3.0,
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["counts"], serde_json::json!([4, 1, 0, 0]));
    assert_eq!(json["mean_branch_lengths"][0], 0.5);
}
