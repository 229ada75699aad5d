//! Token-level validation: delimiter balance and symbol syntax.

use crate::error::Error;

const SPECIAL_CHARS: &str = "@_!#$%^&*()<>?/\\|}~:";

/// Verifies every token satisfies exactly one of the symbol-syntax shapes
/// (terminal, non-terminal, regex literal, structural), then verifies the
/// delimiters in the stream are balanced.
pub fn validate(tokens: &[String]) -> Result<(), Error> {
    check_symbol_syntax(tokens)?;
    check_delimiter_balance(tokens)?;
    Ok(())
}

fn check_symbol_syntax(tokens: &[String]) -> Result<(), Error> {
    for token in tokens {
        if !is_valid_symbol_syntax(token) {
            return Err(Error::InvalidSymbol {
                token: token.clone(),
            });
        }
    }
    Ok(())
}

fn is_valid_symbol_syntax(token: &str) -> bool {
    is_terminal(token) || is_non_terminal(token) || is_regex(token) || is_structural(token)
}

fn is_terminal(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

fn is_non_terminal(token: &str) -> bool {
    !token.starts_with('"') && !token.ends_with('"') && !token.chars().any(|c| SPECIAL_CHARS.contains(c))
}

/// Whether `name` is syntactically valid as a grammar rule name (the same shape
/// required of a non-terminal reference in an RHS).
pub fn is_valid_rule_name(name: &str) -> bool {
    !name.is_empty() && is_non_terminal(name)
}

fn is_regex(token: &str) -> bool {
    token.starts_with("Regex(\"") && token.ends_with("\")")
}

fn is_structural(token: &str) -> bool {
    token.len() == 1 && "(){}[]|".contains(token)
}

/// Pushes opening tokens with their position; on each closer, the top of the
/// stack must match. At end of stream the stack must be empty.
fn check_delimiter_balance(tokens: &[String]) -> Result<(), Error> {
    let mut stack: Vec<(usize, &str)> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "(" | "[" | "{" => stack.push((index, token.as_str())),
            ")" => expect_opener(&mut stack, tokens, index, "(", ")")?,
            "}" => expect_opener(&mut stack, tokens, index, "{", "}")?,
            "]" => expect_opener(&mut stack, tokens, index, "[", "]")?,
            _ => {}
        }
    }

    if let Some((index, opener)) = stack.pop() {
        return Err(Error::InvalidDelimiters {
            message: format!(
                "non enclosed delimiter `{opener}` in `{}`",
                tokens[..=index].join(" ")
            ),
        });
    }

    Ok(())
}

fn expect_opener(
    stack: &mut Vec<(usize, &str)>,
    tokens: &[String],
    index: usize,
    expected_opener: &str,
    closer: &str,
) -> Result<(), Error> {
    match stack.last() {
        Some((_, top)) if *top == expected_opener => {
            stack.pop();
            Ok(())
        }
        _ => Err(Error::InvalidDelimiters {
            message: format!(
                "no opening delimiter `{expected_opener}` found for `{closer}` in `{} <<{closer}>>`",
                tokens[..index].join(" ")
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn accepts_balanced_groups() {
        let tokens = tokenize(r#""(" expression ")""#);
        assert!(validate(&tokens).is_ok());
    }

    #[test]
    fn rejects_mismatched_closer() {
        let tokens = vec!["(".to_string(), "a".to_string(), "}".to_string()];
        let err = validate(&tokens).unwrap_err();
        assert!(matches!(err, Error::InvalidDelimiters { .. }));
    }

    #[test]
    fn rejects_invalid_symbol_token() {
        let tokens = vec!["foo@bar".to_string()];
        let err = validate(&tokens).unwrap_err();
        assert!(matches!(err, Error::InvalidSymbol { .. }));
    }

    #[test]
    fn accepts_regex_literal() {
        assert!(is_regex(r#"Regex("[0-9]+")"#));
    }
}
