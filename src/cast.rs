//! The cast operator: rewrites a built graph under optional (`[...]`) or star
//! (`{...}`) semantics by rewiring edges and injecting ε-markers.

use crate::graph::{GraphKind, SymbolGraph};
use crate::symbol::Symbol;

/// Applies `kind`'s structural rewrite to `graph`. `Standard` is the identity.
pub fn cast(graph: SymbolGraph, kind: GraphKind) -> SymbolGraph {
    match kind {
        GraphKind::Standard => graph,
        GraphKind::NoneOnce => cast_none_once(graph),
        GraphKind::NoneAny => cast_none_any(graph),
    }
}

/// `[X]`: ensures an ε-marker is present in `initials` so the whole subgraph can
/// be skipped exactly once. Re-casting a graph that already has one is a no-op.
fn cast_none_once(mut graph: SymbolGraph) -> SymbolGraph {
    if contains_eos(&graph.initials) {
        return graph;
    }
    graph.initials.add(Symbol::eos());
    graph
}

/// `{X}`: wires every final back to every initial (the repetition loop), then
/// ensures ε-markers are present in both `initials` and `finals` so the
/// subgraph can be skipped or repeated any number of times.
fn cast_none_any(mut graph: SymbolGraph) -> SymbolGraph {
    let finals_snapshot: Vec<Symbol> = graph.finals.iter().cloned().collect();
    let initials_snapshot: Vec<Symbol> = graph
        .initials
        .iter()
        .filter(|s| !s.is_eos())
        .cloned()
        .collect();

    for f in &finals_snapshot {
        let anchors: Vec<Symbol> = if f.is_eos() {
            let predecessors = graph.predecessors_of(f);
            for predecessor in &predecessors {
                if let Some(succs) = graph.nodes.get_mut(predecessor) {
                    succs.discard(f);
                }
            }
            predecessors
        } else {
            vec![f.clone()]
        };

        for anchor in &anchors {
            let entry = graph.nodes.entry(anchor.clone()).or_default();
            for initial in &initials_snapshot {
                entry.add(initial.clone());
            }
        }
    }

    if contains_eos(&graph.initials) && contains_eos(&graph.finals) {
        return graph;
    }

    if !contains_eos(&graph.initials) {
        graph.initials.add(Symbol::eos());
    }

    if !contains_eos(&graph.finals) {
        let eos_final = Symbol::eos();
        let previous_finals: Vec<Symbol> = graph.finals.iter().cloned().collect();
        for f in &previous_finals {
            graph.nodes.entry(f.clone()).or_default().add(eos_final.clone());
        }
        graph.finals = std::iter::once(eos_final).collect();
    }

    graph
}

fn contains_eos(set: &crate::ordered_set::OrderedSet<Symbol>) -> bool {
    set.iter().any(Symbol::is_eos)
}
