//! Recursive builder: consumes the token stream produced by the lexer/validator
//! and drives the subgraph constructor and graph algebra to assemble one rule's
//! `SymbolGraph`.
//!
//! Each recursive invocation handles exactly one parenthesized/bracketed/braced
//! group. The outermost call consumes the synthetic `(...)` wrapper the lexer
//! always adds, so every opener it pops is guaranteed (by the validator) to have
//! a matching closer.

use std::collections::VecDeque;

use crate::algebra::{connect, union};
use crate::cast::cast;
use crate::error::Error;
use crate::graph::{GraphKind, SymbolGraph};
use crate::lexer::tokenize;
use crate::subgraph::construct_subgraph;
use crate::validator::validate;

/// Tokenizes, validates, and builds `rhs` into its `SymbolGraph`.
pub fn build_symbol_graph(rhs: &str) -> Result<SymbolGraph, Error> {
    let tokens = tokenize(rhs);
    validate(&tokens)?;
    let mut queue: VecDeque<String> = tokens.into_iter().collect();
    Ok(recurse_build(&mut queue))
}

fn is_opener(token: &str) -> bool {
    matches!(token, "(" | "[" | "{")
}

fn closer_kind(token: &str) -> GraphKind {
    match token {
        ")" => GraphKind::Standard,
        "}" => GraphKind::NoneAny,
        "]" => GraphKind::NoneOnce,
        other => unreachable!("not a closing delimiter: {other}"),
    }
}

fn recurse_build(queue: &mut VecDeque<String>) -> SymbolGraph {
    let mut acc_tokens: Vec<String> = Vec::new();
    let mut acc_graph = SymbolGraph::empty();

    loop {
        let token = queue
            .pop_front()
            .expect("validator guarantees every opener has a matching closer");

        if is_opener(&token) {
            let bottom = construct_subgraph(&acc_tokens, GraphKind::Standard);
            acc_tokens.clear();
            let upper = recurse_build(queue);
            acc_graph = connect(&acc_graph, &connect(&bottom, &upper));
            if queue.is_empty() {
                return acc_graph;
            }
            continue;
        }

        if matches!(token.as_str(), ")" | "]" | "}") {
            let kind = closer_kind(&token);

            if let Some(bar_index) = acc_tokens.iter().position(|t| t == "|") {
                let left = construct_subgraph(&acc_tokens[..bar_index], GraphKind::Standard);
                let right = construct_subgraph(&acc_tokens[bar_index + 1..], GraphKind::Standard);
                acc_graph = connect(&acc_graph, &left);
                let out = union(&acc_graph, &right);
                return cast(out, kind);
            }

            let tail = construct_subgraph(&acc_tokens, GraphKind::Standard);
            return cast(connect(&acc_graph, &tail), kind);
        }

        if token == "|" {
            let next_is_opener = queue.front().map(|t| is_opener(t)).unwrap_or(false);

            if !next_is_opener {
                // Handled when this level's closing delimiter is reached.
                acc_tokens.push(token);
                continue;
            }

            let left = construct_subgraph(&acc_tokens, GraphKind::Standard);
            acc_graph = connect(&acc_graph, &left);
            acc_tokens.clear();

            // Consume the opener ourselves so the recursive call doesn't see it
            // as the start of a second, unwanted nesting level.
            queue.pop_front();
            let rhs_graph = recurse_build(queue);
            acc_graph = union(&acc_graph, &rhs_graph);

            if queue.is_empty() {
                return acc_graph;
            }
            continue;
        }

        acc_tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolKind;

    #[test]
    fn simple_grouping() {
        let graph = build_symbol_graph(r#""(" expression ")""#).unwrap();
        assert_eq!(graph.initials.len(), 1);
        assert_eq!(graph.finals.len(), 1);
        assert!(graph.initials.iter().next().unwrap().content() == "\"(\"");
        assert!(graph.finals.iter().next().unwrap().content() == "\")\"");
    }

    #[test]
    fn top_level_alternation_produces_two_chains() {
        let graph = build_symbol_graph(r#"factor "+" | factor "-""#).unwrap();
        assert_eq!(graph.initials.len(), 2);
        assert_eq!(graph.finals.len(), 2);
        for i in graph.initials.iter() {
            assert_eq!(i.kind(), SymbolKind::NonTerminal);
            assert_eq!(i.content(), "factor");
        }
    }

    #[test]
    fn nested_group_with_alternation_and_regex() {
        let graph = build_symbol_graph(
            r#""(" expression ((factor "-") | Regex("[0-9]*.[0-9]*")) ")""#,
        )
        .unwrap();
        assert_eq!(graph.initials.len(), 1);
        assert_eq!(graph.finals.len(), 1);
        assert_eq!(graph.finals.iter().next().unwrap().content(), "\")\"");
    }

    #[test]
    fn star_injects_eos_and_loops() {
        let graph = build_symbol_graph(
            r#""(" expression {factor "-" Regex("[0-9]*.[0-9]*")} ")""#,
        )
        .unwrap();
        let expr = graph
            .nodes
            .keys()
            .find(|s| s.content() == "expression")
            .unwrap()
            .clone();
        let succs = graph.successors(&expr);
        assert!(succs.iter().any(|s| s.content() == "factor"));
        assert!(succs.iter().any(|s| s.is_eos()));
    }

    #[test]
    fn optional_injects_eos_without_loop() {
        let graph = build_symbol_graph(
            r#""(" expression [factor "-" Regex("[0-9]*.[0-9]*")] ")""#,
        )
        .unwrap();
        let expr = graph
            .nodes
            .keys()
            .find(|s| s.content() == "expression")
            .unwrap()
            .clone();
        let succs = graph.successors(&expr);
        assert!(succs.iter().any(|s| s.content() == "factor"));
        assert!(succs.iter().any(|s| s.is_eos()));

        let regex_sym = graph
            .nodes
            .keys()
            .find(|s| s.kind() == SymbolKind::Regex)
            .unwrap()
            .clone();
        let regex_succs = graph.successors(&regex_sym);
        assert!(regex_succs.iter().any(|s| s.content() == "\")\""));
        assert!(!regex_succs.iter().any(|s| s.content() == "factor"));
    }
}
