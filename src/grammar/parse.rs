use indexmap::{IndexMap, IndexSet};

use super::{GrammarError, Symbol, EPSILON_ALIASES};
use crate::Grammar;

fn classify(token: &str, non_terminals: &IndexSet<&str>) -> Symbol {
    if EPSILON_ALIASES.contains(&token) {
        Symbol::Epsilon
    } else if non_terminals.contains(token) {
        Symbol::nonterm(token)
    } else {
        Symbol::term(token)
    }
}

impl Grammar {
    /// Reads `S -> a B | λ` style grammars. A line starting with `|` adds
    /// alternatives to the previous left side.
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut raw_productions: Vec<(usize, &str, &str)> = Vec::new();

        let mut previous_left: Option<&str> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let error = |message: &str| GrammarError::Parse {
                line: i + 1,
                message: message.to_string(),
            };
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(error("too many \"->\""));
            }
            let (left, rights): (&str, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(error("empty left side"));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(error("left side contains whitespace"));
                }
                (left_str, parts[1].trim())
            } else {
                let rest = parts[0].trim();
                match (previous_left, rest.strip_prefix('|')) {
                    (Some(left), Some(rights)) => (left, rights.trim()),
                    (None, _) => return Err(error("cannot find left side")),
                    (Some(_), None) => return Err(error("expected \"|\" or \"->\"")),
                }
            };

            previous_left = Some(left);
            raw_productions.push((i + 1, left, rights));
        }

        let non_terminals: IndexSet<&str> = raw_productions.iter().map(|(_, l, _)| *l).collect();

        let mut g = Self::new();
        for name in &non_terminals {
            g.add_non_terminal(name);
        }
        for (line, left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols: Vec<Symbol> = right
                    .split_whitespace()
                    .map(|s| classify(s, &non_terminals))
                    .collect();
                if symbols.is_empty() {
                    return Err(GrammarError::Parse {
                        line,
                        message: "empty alternative".to_string(),
                    });
                }
                g.add_production(left, symbols);
            }
        }

        g.validate()?;
        Ok(g)
    }

    /// Reads `{"S": [["A", "b"], ["λ"]]}`, keeping key order.
    pub fn from_json(grammar: &str) -> Result<Self, GrammarError> {
        let raw: IndexMap<String, Vec<Vec<String>>> =
            serde_json::from_str(grammar).map_err(|e| GrammarError::Json(e.to_string()))?;

        let non_terminals: IndexSet<&str> = raw.keys().map(|name| name.as_str()).collect();

        let mut g = Self::new();
        for (left, rights) in &raw {
            g.add_non_terminal(left);
            for right in rights {
                g.add_production(
                    left,
                    right.iter().map(|s| classify(s, &non_terminals)).collect(),
                );
            }
        }

        g.validate()?;
        Ok(g)
    }

    pub fn to_json(&self) -> Result<String, GrammarError> {
        serde_json::to_string(self).map_err(|e| GrammarError::Json(e.to_string()))
    }
}
