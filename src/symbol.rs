//! Grammar symbols. Symbols are distinguished by identity, not just content.

use uuid::Uuid;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The four kinds of symbol that can appear in a compiled grammar.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SymbolKind {
    /// A quoted literal, e.g. `"+"`. Content includes the surrounding quotes.
    Terminal,
    /// A bare reference to another rule, e.g. `expression`.
    NonTerminal,
    /// A `Regex("pattern")` literal. Content is the pattern, unquoted.
    Regex,
    /// Structural tokens and the ε-marker (`EOS_SYMBOL`).
    Special,
}

/// A grammar symbol: its surface content, its kind, and a unique identity.
///
/// Two symbols with identical `content` and `kind` are still distinct unless they
/// also share an `id` — the same surface symbol can appear more than once in one
/// RHS and must remain distinguishable once placed in a graph.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Symbol {
    content: String,
    kind: SymbolKind,
    id: Uuid,
}

impl Symbol {
    /// Mints a new symbol with a fresh identity. Callers classify `kind` themselves;
    /// this constructor does no content sniffing.
    pub fn new(content: impl Into<String>, kind: SymbolKind) -> Self {
        Symbol {
            content: content.into(),
            kind,
            id: Uuid::new_v4(),
        }
    }

    /// Mints a fresh ε-marker symbol (`content == "EOS_SYMBOL"`, kind `Special`).
    ///
    /// Every call mints a distinct identity — ε-markers are never deduplicated
    /// across casts, even though their content is always the same string.
    pub fn eos() -> Self {
        Symbol::new("EOS_SYMBOL", SymbolKind::Special)
    }

    /// The symbol's surface content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The symbol's kind.
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// This symbol's unique identity.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True iff this is an ε-marker (`EOS_SYMBOL`, kind `Special`).
    pub fn is_eos(&self) -> bool {
        self.kind == SymbolKind::Special && self.content == "EOS_SYMBOL"
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.kind == other.kind && self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.content.hash(state);
        self.kind.hash(state);
        self.id.hash(state);
    }
}
