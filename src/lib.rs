//! Compiles an EBNF-style grammar into one `SymbolGraph` per rule and walks
//! those graphs to guide a constrained text generator, step by step, through
//! the set of terminals admissible at each point of a derivation.
//!
//! ```
//! use cfg_guide::Guide;
//!
//! let grammar = r#"
//!     start : expression
//!     expression : term ("+" term)
//!     term : Regex("[0-9]+")
//! "#;
//!
//! let guide = Guide::new(grammar).unwrap();
//! let first = guide.next_terminals(None, None).unwrap();
//! assert_eq!(first.len(), 1);
//! ```

mod algebra;
mod builder;
mod cast;
mod error;
mod grammar;
mod graph;
mod guide;
mod lexer;
mod ordered_set;
mod subgraph;
mod symbol;
mod validator;

pub use error::{CompileResult, Error};
pub use grammar::{compile, BuiltGrammar};
pub use graph::{GraphKind, SymbolGraph};
pub use guide::{DerivationState, Frame, Guide, NextTerminals};
pub use ordered_set::OrderedSet;
pub use symbol::{Symbol, SymbolKind};
