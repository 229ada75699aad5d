//! `connect` (sequential composition) and `union` (alternation) over
//! `SymbolGraph`s. Neither is commutative in the ordering of `initials`/`finals` —
//! that order is what the derivation guide enumerates in.

use crate::graph::{merge_nodes, SymbolGraph};
use crate::symbol::Symbol;

/// Sequential composition: every path through `left` followed by every path
/// through `right`.
pub fn connect(left: &SymbolGraph, right: &SymbolGraph) -> SymbolGraph {
    if left.is_empty() && right.is_empty() {
        return SymbolGraph::empty();
    }
    if left.is_empty() {
        return right.clone();
    }
    if right.is_empty() {
        return left.clone();
    }

    let left_nodes = left.without_singleton_placeholders();
    let right_nodes = right.without_singleton_placeholders();
    let mut nodes = merge_nodes(&left_nodes, &right_nodes);

    for f in left.finals.iter() {
        let anchors: Vec<Symbol> = if f.is_eos() {
            let predecessors = graph_predecessors(&nodes, f);
            for predecessor in &predecessors {
                if let Some(succs) = nodes.get_mut(predecessor) {
                    succs.discard(f);
                }
            }
            predecessors
        } else {
            vec![f.clone()]
        };

        for anchor in &anchors {
            let entry = nodes.entry(anchor.clone()).or_default();
            for initial in right.initials.iter() {
                entry.add(initial.clone());
            }
        }
    }

    SymbolGraph {
        initials: left.initials.clone(),
        nodes,
        finals: right.finals.clone(),
    }
}

/// Alternation: every path through `left` or every path through `right`.
pub fn union(left: &SymbolGraph, right: &SymbolGraph) -> SymbolGraph {
    if left.is_empty() && right.is_empty() {
        return SymbolGraph::empty();
    }
    if left.is_empty() {
        return right.clone();
    }
    if right.is_empty() {
        return left.clone();
    }

    let mut right_initials = right.initials.clone();
    if contains_eos(&left.initials) && contains_eos(&right_initials) {
        if let Some(dup) = first_eos(&right_initials) {
            right_initials.discard(&dup);
        }
    }

    let mut initials = left.initials.clone();
    initials.extend(&right_initials);

    let nodes = merge_nodes(&left.nodes, &right.nodes);

    let mut finals = left.finals.clone();
    finals.extend(&right.finals);

    SymbolGraph {
        initials,
        nodes,
        finals,
    }
}

fn contains_eos(set: &crate::ordered_set::OrderedSet<Symbol>) -> bool {
    set.iter().any(Symbol::is_eos)
}

fn first_eos(set: &crate::ordered_set::OrderedSet<Symbol>) -> Option<Symbol> {
    set.iter().find(|s| s.is_eos()).cloned()
}

fn graph_predecessors(nodes: &crate::graph::NodeMap, search: &Symbol) -> Vec<Symbol> {
    nodes
        .iter()
        .filter(|(_, succs)| succs.contains(search))
        .map(|(parent, _)| parent.clone())
        .collect()
}
