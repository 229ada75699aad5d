//! Normalizes a rule's right-hand side into a flat token stream.

/// Wraps `rhs` in a synthetic outer grouping, pads grouping delimiters with
/// spaces (while respecting quoted and `Regex("...")` literals), and splits on
/// whitespace. The synthetic outer `(...)` gives the recursive builder (C7) a
/// uniform termination point: every opener it sees has a matching closer.
pub fn tokenize(rhs: &str) -> Vec<String> {
    let wrapped = format!("({rhs})");
    let padded = pad_delimiters(&wrapped);
    padded.split_whitespace().map(str::to_owned).collect()
}

/// Space-pads `( [ { ) ] }` outside of quoted and `Regex("...")` literals.
fn pad_delimiters(input: &str) -> String {
    let mut in_quote = false;
    let mut in_regex = false;
    let mut out = String::with_capacity(input.len() + 8);

    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '"' && !in_regex {
            in_quote = !in_quote;
            out.push(c);
        } else if !in_regex && starts_with_at(&chars, i, "Regex") {
            in_regex = true;
            out.push(c);
        } else if !in_quote && !in_regex && "([{".contains(c) {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else if !in_quote && !in_regex && ")]}".contains(c) {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else if c == ')' && in_regex {
            in_regex = false;
            out.push(c);
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

fn starts_with_at(chars: &[char], i: usize, needle: &str) -> bool {
    let needle: Vec<char> = needle.chars().collect();
    if i + needle.len() > chars.len() {
        return false;
    }
    chars[i..i + needle.len()] == needle[..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_and_pads_a_simple_sequence() {
        let tokens = tokenize(r#""(" expression ")""#);
        assert_eq!(tokens, vec!["(", "\"(\"", "expression", "\")\"", ")"]);
    }

    #[test]
    fn does_not_pad_delimiters_inside_a_terminal() {
        let tokens = tokenize(r#""(""#);
        assert_eq!(tokens, vec!["(", "\"(\"", ")"]);
    }

    #[test]
    fn does_not_pad_delimiters_inside_a_regex_literal() {
        let tokens = tokenize(r#"Regex("[0-9]*.[0-9]*")"#);
        assert_eq!(tokens, vec!["(", "Regex(\"[0-9]*.[0-9]*\")", ")"]);
    }

    #[test]
    fn splits_alternation_and_grouping() {
        let tokens = tokenize(r#"(factor "-") | Regex([0-9])"#);
        assert_eq!(
            tokens,
            vec![
                "(", "(", "factor", "\"-\"", ")", "|", "Regex([0-9])", ")"
            ]
        );
    }
}
