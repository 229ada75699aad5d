//! Builds an atomic `SymbolGraph` from a flat token list with at most one
//! top-level `|`.

use crate::cast::cast;
use crate::graph::GraphKind;
use crate::graph::SymbolGraph;
use crate::symbol::{Symbol, SymbolKind};

/// Converts `"+"` / `Regex("...")` / bare identifier / structural tokens into
/// `Symbol`s, classifying their kind from surface shape.
pub fn token_to_symbol(token: &str) -> Symbol {
    if token.starts_with('"') && token.ends_with('"') {
        Symbol::new(token, SymbolKind::Terminal)
    } else if token.starts_with("Regex(\"") && token.ends_with("\")") {
        let pattern = &token["Regex(\"".len()..token.len() - 2];
        Symbol::new(pattern, SymbolKind::Regex)
    } else if matches!(token, "(" | ")" | "[" | "]" | "{" | "}") {
        Symbol::new(token, SymbolKind::Special)
    } else {
        Symbol::new(token, SymbolKind::NonTerminal)
    }
}

/// Builds a graph from `tokens` (no nested delimiters, at most one top-level
/// `|`), then passes it through `cast` with `kind`.
pub fn construct_subgraph(tokens: &[String], kind: GraphKind) -> SymbolGraph {
    let mut graph = SymbolGraph::empty();

    if tokens.is_empty() {
        return graph;
    }

    let first = token_to_symbol(&tokens[0]);
    graph.initials.add(first.clone());

    if tokens.len() == 1 {
        graph.initials = std::iter::once(first.clone()).collect();
        graph.finals = std::iter::once(first).collect();
        return graph;
    }

    let mut prev = first;
    for token in &tokens[1..] {
        if token == "|" {
            graph.finals.add(prev.clone());
            continue;
        }

        let node = token_to_symbol(token);

        if graph.finals.contains(&prev) {
            graph.initials.add(node.clone());
            prev = node;
            continue;
        }

        graph.nodes.entry(prev).or_default().add(node.clone());
        prev = node;
    }

    graph.finals.add(prev);

    cast(graph, kind)
}
