//! Splits a multiline grammar source into `name -> rhs` pairs and drives the
//! builder over each to produce a full compiled grammar.

use indexmap::IndexMap;

use crate::builder::build_symbol_graph;
use crate::error::Error;
use crate::graph::SymbolGraph;
use crate::validator::is_valid_rule_name;

/// A compiled grammar: every rule name mapped to its `SymbolGraph`. Always
/// contains `"start"`.
pub type BuiltGrammar = IndexMap<String, SymbolGraph>;

/// Divides `grammar` into `name -> rhs` pairs. A rule is one or more lines of
/// the form `name : rhs`; a subsequent line with no `:` is a continuation of
/// the most recently opened rule, appended with a single space separator.
pub fn split_into_rules(grammar: &str) -> Result<IndexMap<String, String>, Error> {
    let mut rules: IndexMap<String, String> = IndexMap::new();
    let mut current_rule: Option<String> = None;

    for raw_line in grammar.trim().lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if !line.contains(':') {
            let name = current_rule.clone().ok_or_else(|| Error::InvalidGrammar {
                message: format!("missing ':' in '{line}'"),
            })?;
            let rhs = rules
                .get_mut(&name)
                .expect("current_rule always names a key already inserted into rules");
            rhs.push(' ');
            rhs.push_str(line);
            continue;
        }

        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() != 2 {
            return Err(Error::InvalidGrammar {
                message: format!("invalid grammar rule: {line}"),
            });
        }

        let name = parts[0].trim().to_string();
        let rhs = parts[1].trim().to_string();

        if !is_valid_rule_name(&name) {
            return Err(Error::InvalidGrammar {
                message: format!("invalid rule name: {name}"),
            });
        }
        if rules.contains_key(&name) {
            return Err(Error::InvalidGrammar {
                message: format!("redefinition of grammar rule: {line}"),
            });
        }

        rules.insert(name.clone(), rhs);
        current_rule = Some(name);
    }

    if !rules.contains_key("start") {
        return Err(Error::InvalidGrammar {
            message: "the symbol 'start' is non-existant".to_string(),
        });
    }

    Ok(rules)
}

/// Splits, then builds every rule's RHS into a `SymbolGraph`.
pub fn compile(grammar: &str) -> Result<BuiltGrammar, Error> {
    let rules = split_into_rules(grammar)?;
    let mut built = IndexMap::new();
    for (name, rhs) in rules {
        let graph = build_symbol_graph(&rhs)?;
        built.insert(name, graph);
    }
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_a_multiline_grammar_into_rules() {
        let grammar = r#"
            start : expression
            expression : term ("+" term)
            term : Regex("[0-9]+")
        "#;
        let rules = split_into_rules(grammar).unwrap();
        assert_eq!(rules.get("start").unwrap(), "expression");
        assert_eq!(rules.get("expression").unwrap(), "term (\"+\" term)");
        assert_eq!(rules.get("term").unwrap(), "Regex(\"[0-9]+\")");
    }

    #[test]
    fn continuation_lines_append_with_a_single_space() {
        let grammar = "start : \"a\"\n  \"b\"";
        let rules = split_into_rules(grammar).unwrap();
        assert_eq!(rules.get("start").unwrap(), "\"a\" \"b\"");
    }

    #[test]
    fn missing_start_rule_fails() {
        let err = split_into_rules("a : \"x\"").unwrap_err();
        assert!(matches!(err, Error::InvalidGrammar { .. }));
    }

    #[test]
    fn redefined_rule_fails() {
        let grammar = "start : \"a\"\nstart : \"b\"";
        let err = split_into_rules(grammar).unwrap_err();
        assert!(matches!(err, Error::InvalidGrammar { .. }));
    }

    #[test]
    fn doubled_colon_fails() {
        let err = split_into_rules("start : a : b").unwrap_err();
        assert!(matches!(err, Error::InvalidGrammar { .. }));
    }

    #[test]
    fn compiles_a_full_grammar() {
        let grammar = r#"
            start : expression
            expression : term ("+" term)
            term : Regex("[0-9]+")
        "#;
        let built = compile(grammar).unwrap();
        assert!(built.contains_key("start"));
        assert!(built.contains_key("expression"));
        assert!(built.contains_key("term"));
    }
}
