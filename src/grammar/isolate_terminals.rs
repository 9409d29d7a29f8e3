use indexmap::IndexMap;
use log::{debug, trace};

use super::{FreshNames, Grammar, GrammarError, Symbol};

pub const ISOLATED_TERMINAL_BASE: &str = "T";

impl Grammar {
    /// Replaces terminals inside productions of two or more symbols with a
    /// fresh non-terminal deriving only that terminal.
    ///
    /// Single-symbol productions are left untouched, so applying the pass
    /// twice changes nothing.
    pub fn isolate_terminals(&self, fresh: &mut FreshNames) -> Result<Grammar, GrammarError> {
        self.validate()?;
        debug!("Isolating terminals in mixed productions");

        let mut g = self.clone();
        // terminal -> non-terminal producing it
        let mut isolated: IndexMap<String, String> = IndexMap::new();

        for (left, productions) in &self.rules {
            let mut new_productions = Vec::with_capacity(productions.len());

            for production in productions {
                if production.len() < 2 {
                    new_productions.push(production.clone());
                    continue;
                }

                let mut new_production = Vec::with_capacity(production.len());
                for symbol in production {
                    let terminal = match symbol {
                        Symbol::Terminal(terminal) => terminal,
                        _ => {
                            new_production.push(symbol.clone());
                            continue;
                        }
                    };
                    let name = match isolated.get(terminal) {
                        Some(name) => name.clone(),
                        None => {
                            let name = fresh.mint(ISOLATED_TERMINAL_BASE, &g);
                            trace!("{} -> {}", name, terminal);
                            g.insert_fresh(name.clone(), vec![vec![symbol.clone()]])?;
                            isolated.insert(terminal.clone(), name.clone());
                            name
                        }
                    };
                    new_production.push(Symbol::NonTerminal(name));
                }
                new_productions.push(new_production);
            }

            g.rules.insert(left.clone(), new_productions);
        }
        Ok(g)
    }
}
