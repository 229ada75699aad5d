//! Error taxonomy shared by the grammar compiler and the derivation guide.

use thiserror::Error;

/// Every way a grammar can fail to compile, or a derivation can fail to continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A token violates the symbol-syntax rules (terminal / non-terminal / regex / structural).
    #[error("invalid symbol name {token:?}")]
    InvalidSymbol { token: String },

    /// Opening/closing delimiters are mismatched, or a group was never closed.
    #[error("{message}")]
    InvalidDelimiters { message: String },

    /// A structural problem in the grammar source itself: a missing or doubled `:`,
    /// a redefined rule, an invalid rule name, or a missing `start` rule.
    #[error("{message}")]
    InvalidGrammar { message: String },

    /// A searched Symbol was absent where the algebra guarantees it must exist.
    /// Indicates a bug in the compiler, not a malformed grammar.
    #[error("no symbol matching {content:?} was found")]
    SymbolNotFound { content: String },

    /// The guide encountered a symbol of a kind it cannot resolve to output text.
    #[error("{message}")]
    ParsingError { message: String },
}

pub type CompileResult<T> = Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_delimiters_renders_its_message_verbatim() {
        let err = Error::InvalidDelimiters {
            message: "no opening delimiter `(` found for `)` in `a <<)>>`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no opening delimiter `(` found for `)` in `a <<)>>`"
        );
    }

    #[test]
    fn invalid_symbol_quotes_the_offending_token() {
        let err = Error::InvalidSymbol {
            token: "foo@bar".to_string(),
        };
        assert_eq!(err.to_string(), "invalid symbol name \"foo@bar\"");
    }
}
