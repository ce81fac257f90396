//! Classification of candidates the resolver could not place.
//!
//! Unresolved candidates form a graph whose edges point from a candidate to
//! the unresolved candidates it depends on. Strongly connected components
//! with more than one member are cycles; anything that reaches a cycle or a
//! missing validator is blocked for good. What remains only ran out of rounds.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};
use zodgen_core::types::DeclarationCandidate;

use crate::types::{Resolution, UnresolvedCause, UnresolvedEntry, UnresolvedReport};

/// Explain every unresolved candidate in `resolution`, in extraction order.
pub fn classify(
    candidates: &[DeclarationCandidate],
    resolution: &Resolution,
) -> UnresolvedReport {
    if resolution.unresolved.is_empty() {
        return UnresolvedReport::default();
    }

    let known: HashSet<&str> = candidates.iter().map(|c| c.var_name.as_str()).collect();
    let unresolved: Vec<&DeclarationCandidate> = resolution
        .unresolved
        .iter()
        .filter_map(|name| candidates.iter().find(|c| &c.var_name == name))
        .collect();

    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let index: HashMap<&str, NodeIndex> = unresolved
        .iter()
        .map(|c| (c.var_name.as_str(), graph.add_node(c.var_name.as_str())))
        .collect();
    for c in &unresolved {
        for dep in c.foreign_dependencies() {
            if let Some(&to) = index.get(dep) {
                graph.add_edge(index[c.var_name.as_str()], to, ());
            }
        }
    }

    let mut cycle_of: HashMap<NodeIndex, Vec<String>> = HashMap::new();
    for component in tarjan_scc(&graph) {
        if component.len() < 2 {
            continue;
        }
        let mut members: Vec<&DeclarationCandidate> = unresolved
            .iter()
            .copied()
            .filter(|c| component.contains(&index[c.var_name.as_str()]))
            .collect();
        members.sort_by_key(|c| position(&unresolved, &c.var_name));
        let names: Vec<String> = members.iter().map(|c| c.var_name.clone()).collect();
        for node in component {
            cycle_of.insert(node, names.clone());
        }
    }

    let missing_of: HashMap<&str, Vec<String>> = unresolved
        .iter()
        .filter_map(|c| {
            let missing: Vec<String> = c
                .foreign_dependencies()
                .filter(|d| !known.contains(d))
                .map(str::to_string)
                .collect();
            (!missing.is_empty()).then(|| (c.var_name.as_str(), missing))
        })
        .collect();

    // Everything that can reach a cycle or a missing validator never resolves.
    let mut doomed: HashSet<NodeIndex> = HashSet::new();
    let reversed = Reversed(&graph);
    let roots = cycle_of
        .keys()
        .copied()
        .chain(missing_of.keys().map(|name| index[name]));
    for root in roots {
        let mut bfs = Bfs::new(reversed, root);
        while let Some(node) = bfs.next(reversed) {
            doomed.insert(node);
        }
    }

    let entries = unresolved
        .iter()
        .map(|c| {
            let node = index[c.var_name.as_str()];
            let cause = if let Some(members) = cycle_of.get(&node) {
                UnresolvedCause::Cycle {
                    members: members.clone(),
                }
            } else if let Some(missing) = missing_of.get(c.var_name.as_str()) {
                UnresolvedCause::MissingDependency {
                    missing: missing.clone(),
                }
            } else if doomed.contains(&node) {
                let by = c
                    .foreign_dependencies()
                    .filter(|d| index.get(d).is_some_and(|n| doomed.contains(n)))
                    .map(str::to_string)
                    .collect();
                UnresolvedCause::Blocked { by }
            } else {
                UnresolvedCause::Starved
            };
            UnresolvedEntry {
                var_name: c.var_name.clone(),
                type_name: c.type_name.clone(),
                cause,
            }
        })
        .collect();

    UnresolvedReport { entries }
}

fn position(unresolved: &[&DeclarationCandidate], var_name: &str) -> usize {
    unresolved
        .iter()
        .position(|c| c.var_name == var_name)
        .unwrap_or(usize::MAX)
}
