use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};

use super::{GrammarError, EPSILON};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
    Epsilon,
}

impl Symbol {
    pub fn term(name: &str) -> Self {
        Symbol::Terminal(name.to_string())
    }

    pub fn nonterm(name: &str) -> Self {
        Symbol::NonTerminal(name.to_string())
    }

    pub fn non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name.as_str(),
            Symbol::Epsilon => EPSILON,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

pub type Production = Vec<Symbol>;

/// The canonical empty production `[λ]`.
pub fn epsilon_production() -> Production {
    vec![Symbol::Epsilon]
}

pub fn is_epsilon(production: &[Symbol]) -> bool {
    matches!(production, [Symbol::Epsilon])
}

pub(crate) fn push_unique(productions: &mut Vec<Production>, production: Production) {
    if !productions.contains(&production) {
        productions.push(production);
    }
}

/// A context-free grammar. The first key is the start symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grammar {
    pub rules: IndexMap<String, Vec<Production>>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_symbol(&self) -> Option<&str> {
        self.rules.keys().next().map(|name| name.as_str())
    }

    pub fn is_start_symbol(&self, name: &str) -> bool {
        self.start_symbol() == Some(name)
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(|name| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn productions(&self, name: &str) -> Option<&[Production]> {
        self.rules.get(name).map(|productions| productions.as_slice())
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(|productions| productions.len()).sum()
    }

    pub fn add_non_terminal(&mut self, name: &str) {
        self.rules.entry(name.to_string()).or_default();
    }

    pub fn add_production(&mut self, left: &str, right: Production) {
        self.rules.entry(left.to_string()).or_default().push(right);
    }

    /// Appends a rule for a freshly minted non-terminal.
    pub fn insert_fresh(
        &mut self,
        name: String,
        productions: Vec<Production>,
    ) -> Result<(), GrammarError> {
        if self.rules.contains_key(&name) {
            return Err(GrammarError::NameCollision(name));
        }
        self.rules.insert(name, productions);
        Ok(())
    }

    /// Checks that every production is non-empty, that `λ` only appears
    /// alone and that every referenced non-terminal is declared.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for (left, productions) in &self.rules {
            for production in productions {
                if production.is_empty() {
                    return Err(GrammarError::malformed(
                        left,
                        format!("empty production, write {} instead", EPSILON),
                    ));
                }
                if production.len() > 1 && production.contains(&Symbol::Epsilon) {
                    return Err(GrammarError::malformed(
                        left,
                        format!("{} must be the only symbol of its production", EPSILON),
                    ));
                }
                for name in production.iter().filter_map(Symbol::non_terminal) {
                    if !self.rules.contains_key(name) {
                        return Err(GrammarError::malformed(
                            left,
                            format!("undeclared non-terminal {}", name),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Non-terminals reachable from `from` through unit productions only.
    pub(crate) fn unit_reachable(&self, from: &str) -> IndexSet<&str> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        let mut stack = vec![from];
        while let Some(name) = stack.pop() {
            for production in self.rules.get(name).into_iter().flatten() {
                if let [Symbol::NonTerminal(target)] = production.as_slice() {
                    if seen.insert(target.as_str()) {
                        stack.push(target.as_str());
                    }
                }
            }
        }
        seen
    }
}
