//! The `SymbolGraph`: the compiled representation of one rule's right-hand side.

use indexmap::IndexMap;

use crate::ordered_set::OrderedSet;
use crate::symbol::Symbol;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// `u -> v` in `nodes` means "`v` may immediately follow `u`". Keyed by symbol
/// identity (content + kind + id), never by content alone, since the same surface
/// symbol can occur more than once in one RHS.
pub type NodeMap = IndexMap<Symbol, OrderedSet<Symbol>>;

/// Which structural cast (if any) produced a subgraph. `Standard` is the identity
/// cast; `NoneOnce`/`NoneAny` encode `[...]` (optional) and `{...}` (Kleene star).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GraphKind {
    /// No structural rewrite: `(...)` grouping, or a bare sequence/alternation.
    Standard,
    /// `[...]`: the subgraph may be skipped exactly once.
    NoneOnce,
    /// `{...}`: the subgraph may be skipped, or repeated any number of times.
    NoneAny,
}

/// A graph whose nodes are grammar symbols and whose edges mean "may immediately
/// follow". `initials` are the symbols that may appear first; `finals` are the
/// symbols that may appear last. A symbol with content `"EOS_SYMBOL"` present in
/// `initials` means the whole graph may be skipped (ε); present in `finals` means
/// the frame may terminate there without consuming further input.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SymbolGraph {
    /// Entry points.
    pub initials: OrderedSet<Symbol>,
    /// Adjacency: every key is a non-singleton node reachable from some initial.
    pub nodes: NodeMap,
    /// Exit points.
    pub finals: OrderedSet<Symbol>,
}

impl SymbolGraph {
    /// The empty graph: no initials, no nodes, no finals.
    pub fn empty() -> Self {
        SymbolGraph {
            initials: OrderedSet::new(),
            nodes: IndexMap::new(),
            finals: OrderedSet::new(),
        }
    }

    /// True iff this graph has no initials, no nodes and no finals — the "empty
    /// graph" short-circuit used throughout `connect`/`union`.
    pub fn is_empty(&self) -> bool {
        self.initials.is_empty() && self.nodes.is_empty() && self.finals.is_empty()
    }

    /// Successors of `symbol`, or an empty set if `symbol` has no adjacency entry
    /// (a singleton node with no outgoing edges).
    pub fn successors(&self, symbol: &Symbol) -> OrderedSet<Symbol> {
        self.nodes
            .get(symbol)
            .cloned()
            .unwrap_or_else(OrderedSet::new)
    }

    /// Every symbol in `nodes`' values that points at `search`, i.e. `search`'s
    /// predecessors. Used to resolve ε-marker finals during `connect`/`cast`.
    pub fn predecessors_of(&self, search: &Symbol) -> Vec<Symbol> {
        self.nodes
            .iter()
            .filter(|(_, succs)| succs.contains(search))
            .map(|(parent, _)| parent.clone())
            .collect()
    }

    /// Drops adjacency entries whose value is empty: "singleton placeholder" keys
    /// that re-enter the graph only via `initials`/`finals`, not via an edge.
    /// Keeping both representations during `connect` would double-count them.
    pub fn without_singleton_placeholders(&self) -> NodeMap {
        self.nodes
            .iter()
            .filter(|(_, succs)| !succs.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Key-wise union of two adjacency maps: `left`'s keys first (in `left`'s order),
/// then `right`'s keys not already present, in `right`'s order. Values for keys
/// present only on one side are copied as-is.
pub fn merge_nodes(left: &NodeMap, right: &NodeMap) -> NodeMap {
    let mut out = left.clone();
    for (symbol, succs) in right {
        out.entry(symbol.clone())
            .or_insert_with(OrderedSet::new)
            .extend(succs);
    }
    out
}
