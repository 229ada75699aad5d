//! Integration tests covering full grammar-source-to-`SymbolGraph` scenarios:
//! one rule, grouping, alternation, nested groups, star, and optional.

use cfg_guide::{compile, Error, SymbolKind};

fn rule(rhs: &str) -> String {
    format!("start : {rhs}\n")
}

#[test]
fn single_group_chains_terminal_nonterminal_terminal() {
    let built = compile(&rule(r#""(" expression ")""#)).unwrap();
    let graph = &built["start"];

    assert_eq!(graph.initials.len(), 1);
    assert_eq!(graph.finals.len(), 1);
    assert_eq!(graph.initials.iter().next().unwrap().content(), "\"(\"");
    assert_eq!(graph.finals.iter().next().unwrap().content(), "\")\"");
}

#[test]
fn top_level_alternation_keeps_two_distinct_factor_symbols() {
    let built = compile(&rule(r#"factor "+" | factor "-""#)).unwrap();
    let graph = &built["start"];

    assert_eq!(graph.initials.len(), 2);
    assert_eq!(graph.finals.len(), 2);
    let mut initials = graph.initials.iter();
    let first = initials.next().unwrap();
    let second = initials.next().unwrap();
    assert_eq!(first.content(), "factor");
    assert_eq!(second.content(), "factor");
    assert_ne!(first, second);
}

#[test]
fn nested_group_with_alternation_converges_on_closing_paren() {
    let built = compile(&rule(
        r#""(" expression ((factor "-") | Regex("[0-9]*.[0-9]*")) ")""#,
    ))
    .unwrap();
    let graph = &built["start"];

    assert_eq!(graph.initials.len(), 1);
    assert_eq!(graph.finals.len(), 1);
    assert_eq!(graph.finals.iter().next().unwrap().content(), "\")\"");

    let expression = graph
        .nodes
        .keys()
        .find(|s| s.content() == "expression")
        .unwrap();
    let successors = graph.successors(expression);
    assert!(successors.iter().any(|s| s.content() == "factor"));
    assert!(successors.iter().any(|s| s.kind() == SymbolKind::Regex));
}

#[test]
fn star_adds_an_eos_alternative_and_a_loop_edge() {
    let built = compile(&rule(
        r#""(" expression {factor "-" Regex("[0-9]*.[0-9]*")} ")""#,
    ))
    .unwrap();
    let graph = &built["start"];

    let expression = graph
        .nodes
        .keys()
        .find(|s| s.content() == "expression")
        .unwrap()
        .clone();
    let successors = graph.successors(&expression);
    assert!(successors.iter().any(|s| s.content() == "factor"));
    assert!(successors.iter().any(|s| s.is_eos()));

    let regex_symbol = graph
        .nodes
        .keys()
        .find(|s| s.kind() == SymbolKind::Regex)
        .unwrap()
        .clone();
    let regex_successors = graph.successors(&regex_symbol);
    assert!(regex_successors.iter().any(|s| s.content() == "factor"));
    assert!(regex_successors.iter().any(|s| s.content() == "\")\""));
}

#[test]
fn optional_adds_an_eos_alternative_without_a_loop_edge() {
    let built = compile(&rule(
        r#""(" expression [factor "-" Regex("[0-9]*.[0-9]*")] ")""#,
    ))
    .unwrap();
    let graph = &built["start"];

    let expression = graph
        .nodes
        .keys()
        .find(|s| s.content() == "expression")
        .unwrap()
        .clone();
    let successors = graph.successors(&expression);
    assert!(successors.iter().any(|s| s.content() == "factor"));
    assert!(successors.iter().any(|s| s.is_eos()));

    let regex_symbol = graph
        .nodes
        .keys()
        .find(|s| s.kind() == SymbolKind::Regex)
        .unwrap()
        .clone();
    let regex_successors = graph.successors(&regex_symbol);
    assert!(regex_successors.iter().any(|s| s.content() == "\")\""));
    assert!(!regex_successors.iter().any(|s| s.content() == "factor"));
}

#[test]
fn missing_start_rule_is_rejected() {
    let err = compile("a : \"x\"\n").unwrap_err();
    assert!(matches!(err, Error::InvalidGrammar { .. }));
}

#[test]
fn unclosed_group_is_rejected() {
    let err = compile("start : \"(\" expression (factor \"-\"}").unwrap_err();
    assert!(matches!(err, Error::InvalidDelimiters { .. }));
}

#[test]
fn invalid_symbol_token_is_rejected() {
    let err = compile("start : foo@bar").unwrap_err();
    assert!(matches!(err, Error::InvalidSymbol { .. }));
}
