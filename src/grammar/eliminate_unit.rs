use indexmap::IndexMap;
use log::{debug, trace};

use super::{grammar::push_unique, Grammar, GrammarError, Symbol};

fn unit_target(production: &[Symbol]) -> Option<&str> {
    match production {
        [Symbol::NonTerminal(name)] => Some(name.as_str()),
        _ => None,
    }
}

impl Grammar {
    /// Inlines unit productions `N -> M` with the productions of `M`.
    ///
    /// A single pass in key order: `M`'s list is read as already rewritten
    /// when `M` comes before `N`. A production `M -> N` is never copied back
    /// into `N`.
    pub fn eliminate_unit_productions(&self) -> Result<Grammar, GrammarError> {
        self.validate()?;
        self.check_unit_cycles()?;
        debug!("Removing unit productions");

        let mut g = self.clone();
        for left in self.non_terminal_iter() {
            let snapshot = g.rules[left].clone();
            let mut new_productions = Vec::with_capacity(snapshot.len());

            for production in snapshot {
                match unit_target(&production) {
                    Some(target) => {
                        trace!("Inlining {} into {}", target, left);
                        for p in &g.rules[target] {
                            if unit_target(p) != Some(left) {
                                push_unique(&mut new_productions, p.clone());
                            }
                        }
                    }
                    None => push_unique(&mut new_productions, production),
                }
            }

            g.rules.insert(left.to_string(), new_productions);
        }
        Ok(g)
    }

    /// Fails when unit productions tie more than two non-terminals into a
    /// cycle; a single pass cannot resolve those.
    fn check_unit_cycles(&self) -> Result<(), GrammarError> {
        let reachable: IndexMap<&str, _> = self
            .non_terminal_iter()
            .map(|name| (name, self.unit_reachable(name)))
            .collect();

        for (&name, from_name) in &reachable {
            let cycle: Vec<&str> = self
                .non_terminal_iter()
                .filter(|&other| {
                    other != name && from_name.contains(other) && reachable[&other].contains(name)
                })
                .collect();
            if cycle.len() > 1 {
                return Err(GrammarError::non_termination(
                    name,
                    format!("unit productions cycle through {}", cycle.join(", ")),
                ));
            }
        }
        Ok(())
    }
}
