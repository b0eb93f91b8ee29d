use criterion::{Criterion, criterion_group, criterion_main};
use multihit::newick::parse_str_with_root;
use multihit::substitution::{
    BranchAttributeLookup, LabelMap, SubstitutionSummary, TraversalConfig,
};
use std::collections::HashMap;
use std::hint::black_box;

const CODONS: &[&str] = &["AAA", "AAC", "ACC", "CCC", "GTA", "TTT"];

/// Balanced tree with `2^levels` leaves, every node named.
fn balanced_newick(levels: u32) -> String {
    fn build(level: u32, id: &mut usize, newick: &mut String) {
        *id += 1;
        let name = format!("N{id}");
        if level > 0 {
            newick.push('(');
            build(level - 1, id, newick);
            newick.push(',');
            build(level - 1, id, newick);
            newick.push(')');
        }
        newick.push_str(&name);
        newick.push_str(":0.01");
    }

    let mut newick = String::from("(");
    let mut id = 0;
    build(levels, &mut id, &mut newick);
    newick.push_str(");");
    newick
}

/// Labels for every other node, so that half of them inherit.
fn sites(num_nodes: usize, num_sites: usize) -> Vec<LabelMap> {
    (0..num_sites)
        .map(|site| {
            let mut labels: LabelMap = (1..=num_nodes)
                .step_by(2)
                .map(|id| {
                    let codon = CODONS[(id + site) % CODONS.len()];
                    (format!("N{id}"), codon.to_string())
                })
                .collect();
            labels.insert("root".to_string(), CODONS[site % CODONS.len()].to_string());
            labels
        })
        .collect()
}

fn attributes(num_nodes: usize) -> BranchAttributeLookup {
    (1..=num_nodes)
        .map(|id| {
            let models = HashMap::from([("unconstrained".to_string(), 0.01 * id as f64)]);
            (format!("N{id}"), models)
        })
        .collect()
}

fn newick_parsing(c: &mut Criterion) {
    for levels in [8, 12] {
        let newick = balanced_newick(levels);
        c.bench_function(&format!("parse_balanced_{levels}"), |b| {
            b.iter(|| parse_str_with_root(black_box(&newick), "root").unwrap());
        });
    }
}

fn substitution_counting(c: &mut Criterion) {
    let newick = balanced_newick(10);
    let mut tree = parse_str_with_root(&newick, "root").unwrap();
    let num_nodes = tree.num_nodes() - 1;
    let sites = sites(num_nodes, 100);
    let attributes = attributes(num_nodes);
    let config = TraversalConfig::default();

    c.bench_function("count_100_sites", |b| {
        b.iter(|| {
            SubstitutionSummary::collect(&mut tree, black_box(&sites), &attributes, &config)
                .unwrap()
        });
    });
}

criterion_group!(benches, newick_parsing, substitution_counting);
criterion_main!(benches);
