//! The derivation guide: walks a compiled grammar's graphs to enumerate
//! admissible next terminals for a constrained token generator.

use indexmap::IndexMap;
use rand::Rng;
use regex::Regex;

use crate::error::{CompileResult, Error};
use crate::grammar::{compile, BuiltGrammar};
use crate::graph::SymbolGraph;
use crate::ordered_set::OrderedSet;
use crate::symbol::{Symbol, SymbolKind};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// One entry on the derivation stack: the active non-terminal's graph, the
/// label it was entered under, and the cursor within that graph (`None` means
/// "about to consume from `graph.initials`").
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Frame {
    pub graph: SymbolGraph,
    pub label: String,
    pub cursor: Option<Symbol>,
}

/// The complete ordered stack of frames representing how the generator
/// arrived at the current point. Stack bottom is always the `start` frame.
pub type DerivationState = Vec<Frame>;

/// `terminal -> state at the point that terminal was offered`, in the order
/// terminals were first discovered by the traversal.
pub type NextTerminals = IndexMap<Symbol, DerivationState>;

/// Compiles a grammar once, then drives repeated `next_terminals` calls over it.
pub struct Guide {
    grammar: BuiltGrammar,
}

impl Guide {
    /// Compiles `grammar_text` into per-rule graphs.
    pub fn new(grammar_text: &str) -> CompileResult<Self> {
        Ok(Guide {
            grammar: compile(grammar_text)?,
        })
    }

    fn rule_graph(&self, name: &str) -> CompileResult<SymbolGraph> {
        self.grammar
            .get(name)
            .cloned()
            .ok_or_else(|| Error::SymbolNotFound {
                content: name.to_string(),
            })
    }

    /// Produces the ordered map of admissible next terminals given the prior
    /// `state` and the terminal `chosen` from it. The initial call passes both
    /// `None`.
    pub fn next_terminals(
        &self,
        state: Option<DerivationState>,
        chosen: Option<Symbol>,
    ) -> CompileResult<NextTerminals> {
        let mut out = NextTerminals::new();
        self.step(state, chosen, &mut out)?;
        Ok(out)
    }

    fn step(
        &self,
        state: Option<DerivationState>,
        chosen: Option<Symbol>,
        out: &mut NextTerminals,
    ) -> CompileResult<()> {
        let stack = match (state, &chosen) {
            (None, None) => {
                let start = self.rule_graph("start")?;
                let fresh = vec![Frame {
                    graph: start,
                    label: "start".to_string(),
                    cursor: None,
                }];
                return self.step(Some(fresh), None, out);
            }
            (None, Some(_)) => {
                return Err(Error::ParsingError {
                    message: "derivation state is absent while a chosen symbol was given"
                        .to_string(),
                })
            }
            (Some(stack), _) => stack,
        };

        if has_non_terminal_cycle(&stack) {
            log::warn!(
                "non-terminal loop found {}, path will be ignored",
                loop_trace(&stack)
            );
            return Ok(());
        }

        match chosen {
            None => {
                let top = stack.last().expect("non-empty stack");
                let successors = match &top.cursor {
                    None => top.graph.initials.clone(),
                    Some(cursor) => top.graph.successors(cursor),
                };
                self.advance(stack, successors, out)
            }
            Some(chosen_symbol) => {
                if chosen_symbol.is_eos() {
                    let mut stack = stack;
                    stack.pop();
                    return self.step(Some(stack), None, out);
                }

                let mut stack = stack;
                let successors = {
                    let top = stack.last().expect("non-empty stack");
                    top.graph.successors(&chosen_symbol)
                };
                stack
                    .last_mut()
                    .expect("non-empty stack")
                    .cursor = Some(chosen_symbol);
                self.advance(stack, successors, out)
            }
        }
    }

    /// Dispatches one `successors` set reached from `stack`'s top frame: empty
    /// pops the frame and resumes the parent; otherwise each successor is
    /// recorded (terminal/regex), ε-skipped (special), or descended into (a
    /// fresh frame for a non-terminal).
    fn advance(
        &self,
        mut stack: DerivationState,
        successors: OrderedSet<Symbol>,
        out: &mut NextTerminals,
    ) -> CompileResult<()> {
        if successors.is_empty() {
            stack.pop();
            if stack.is_empty() {
                return Ok(());
            }
            return self.step(Some(stack), None, out);
        }

        for successor in successors.iter() {
            if successor.is_eos() {
                let mut popped = stack.clone();
                popped.pop();
                self.step(Some(popped), None, out)?;
                continue;
            }

            match successor.kind() {
                SymbolKind::Terminal | SymbolKind::Regex | SymbolKind::Special => {
                    out.insert(successor.clone(), stack.clone());
                }
                SymbolKind::NonTerminal => {
                    let sub_graph = self.rule_graph(successor.content())?;
                    let mut next_stack = stack.clone();
                    next_stack
                        .last_mut()
                        .expect("non-empty stack")
                        .cursor = Some(successor.clone());
                    next_stack.push(Frame {
                        graph: sub_graph,
                        label: successor.content().to_string(),
                        cursor: None,
                    });
                    self.step(Some(next_stack), None, out)?;
                }
            }
        }

        Ok(())
    }

    /// Resolves raw generator text against the candidates in `next_terminals`,
    /// matching terminal content literally (quotes stripped) and regex content
    /// by full match. If more than one candidate matches the same text, one is
    /// picked uniformly at random via `rng` and a warning is logged.
    pub fn resolve_chosen<R: Rng>(
        &self,
        next_terminals: &NextTerminals,
        text: &str,
        rng: &mut R,
    ) -> CompileResult<Symbol> {
        let mut matches: Vec<Symbol> = Vec::new();

        for symbol in next_terminals.keys() {
            match symbol.kind() {
                SymbolKind::Terminal => {
                    if symbol.content().trim_matches('"') == text {
                        matches.push(symbol.clone());
                    }
                }
                SymbolKind::Regex => {
                    let pattern = anchored_regex(symbol.content())?;
                    if pattern.is_match(text) {
                        matches.push(symbol.clone());
                    }
                }
                other => {
                    return Err(Error::ParsingError {
                        message: format!(
                            "{other:?} is invalid, only Terminal or Regex are valid"
                        ),
                    })
                }
            }
        }

        if matches.is_empty() {
            return Err(Error::SymbolNotFound {
                content: text.to_string(),
            });
        }

        if matches.len() > 1 {
            log::warn!(
                "chosen text {text:?} matches multiple candidate symbols, picking one with equal probability"
            );
            let index = rng.gen_range(0..matches.len());
            return Ok(matches.swap_remove(index));
        }

        Ok(matches.into_iter().next().expect("checked non-empty above"))
    }

    /// Builds a single regex whose alternatives are the candidates in
    /// `next_terminals`: terminal content is escaped literally, regex content is
    /// used verbatim.
    pub fn next_terminals_as_pattern(&self, next_terminals: &NextTerminals) -> CompileResult<String> {
        let mut alternatives: Vec<String> = Vec::new();

        for symbol in next_terminals.keys() {
            match symbol.kind() {
                SymbolKind::Terminal => {
                    alternatives.push(regex::escape(symbol.content().trim_matches('"')));
                }
                SymbolKind::Regex => alternatives.push(symbol.content().to_string()),
                other => {
                    return Err(Error::ParsingError {
                        message: format!(
                            "{other:?} is invalid, only Terminal or Regex are valid"
                        ),
                    })
                }
            }
        }

        let joined = alternatives
            .iter()
            .map(|a| format!("({a})"))
            .collect::<Vec<_>>()
            .join("|");
        Ok(format!("({joined})"))
    }
}

/// Compiles `pattern` wrapped in `^(?:...)$` so a match requires the whole
/// string, not just a leftmost-first substring (`Regex::find`/`is_match` would
/// otherwise accept any substring match, diverging from Python's `re.fullmatch`
/// for alternations like `a|ab` against `"ab"`).
fn anchored_regex(pattern: &str) -> CompileResult<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| Error::ParsingError {
        message: format!("invalid regex {pattern:?}: {source}"),
    })
}

/// A cycle exists when the top frame's label already appears lower in the
/// stack. This subsumes the bottom-vs-top case (e.g. `start` referencing
/// itself indirectly) and also catches shorter cycles between two rules that
/// never pass back through `start`.
fn has_non_terminal_cycle(stack: &[Frame]) -> bool {
    match stack.split_last() {
        Some((top, rest)) => rest.iter().any(|f| f.label == top.label),
        None => false,
    }
}

fn loop_trace(stack: &[Frame]) -> String {
    let mut labels: Vec<&str> = stack.iter().map(|f| f.label.as_str()).collect();
    labels.push(stack[0].label.as_str());
    labels.join(" -> ")
}
