use indexmap::IndexSet;
use log::{debug, info, trace};

use super::{
    grammar::push_unique, is_epsilon, FreshNames, Grammar, GrammarError, Production, Symbol,
    EPSILON,
};

pub const RECURSION_TAIL_BASE: &str = "T";

fn leading_non_terminal(production: &[Symbol]) -> Option<&str> {
    production.first().and_then(Symbol::non_terminal)
}

fn appended(production: &[Symbol], symbol: &Symbol) -> Production {
    production.iter().chain(std::iter::once(symbol)).cloned().collect()
}

/// Replaces the productions leading with `lead` by `prefix ++ rest` for every
/// `prefix` in `replacements`.
fn substitute_leading(
    productions: &[Production],
    lead: &str,
    replacements: &[Production],
) -> Vec<Production> {
    let mut result = Vec::new();
    for production in productions {
        if leading_non_terminal(production) == Some(lead) {
            for prefix in replacements {
                push_unique(
                    &mut result,
                    prefix.iter().chain(production.iter().skip(1)).cloned().collect(),
                );
            }
        } else {
            push_unique(&mut result, production.clone());
        }
    }
    result
}

impl Grammar {
    /// Converts a grammar, normally in CNF, into Greibach normal form.
    ///
    /// Non-terminals are ordered by declaration. Going forward, productions
    /// of `Ai` leading with an earlier `Aj` are expanded and immediate left
    /// recursion on `Ai` is moved into a fresh tail non-terminal. Going
    /// backward, every leading non-terminal is replaced by its productions,
    /// which by then all start with a terminal.
    pub fn to_gnf(&self) -> Result<Grammar, GrammarError> {
        self.validate()?;
        self.check_gnf_preconditions()?;
        debug!("Converting to GNF");

        let mut fresh = FreshNames::new();
        let mut g = self.clone();
        let order: Vec<&str> = self.non_terminal_iter().collect();
        let mut tails: Vec<String> = Vec::new();

        for (i, &current) in order.iter().enumerate() {
            for &earlier in &order[..i] {
                let rewritten = substitute_leading(&g.rules[current], earlier, &g.rules[earlier]);
                g.rules.insert(current.to_string(), rewritten);
            }
            if let Some(tail) = g.eliminate_immediate_left_recursion(current, &mut fresh)? {
                tails.push(tail);
            }
        }

        let back = order
            .iter()
            .rev()
            .copied()
            .chain(tails.iter().map(|tail| tail.as_str()));
        for current in back {
            let mut productions = Vec::new();
            for production in &g.rules[current] {
                match leading_non_terminal(production) {
                    Some(lead) => {
                        trace!("Expanding leading {} of {}", lead, current);
                        for prefix in &g.rules[lead] {
                            push_unique(
                                &mut productions,
                                prefix.iter().chain(production.iter().skip(1)).cloned().collect(),
                            );
                        }
                    }
                    None => push_unique(&mut productions, production.clone()),
                }
            }
            g.rules.insert(current.to_string(), productions);
        }

        info!(
            "GNF has {} productions, {} non-terminals ({} fresh)",
            g.production_count(),
            g.rules.len(),
            tails.len(),
        );
        Ok(g)
    }

    /// `A -> A a | b` becomes `A -> b | b T`, `T -> a | a T`. Returns the
    /// fresh non-terminal, if one was needed.
    fn eliminate_immediate_left_recursion(
        &mut self,
        current: &str,
        fresh: &mut FreshNames,
    ) -> Result<Option<String>, GrammarError> {
        let (recursive, base): (Vec<Production>, Vec<Production>) = self.rules[current]
            .iter()
            .cloned()
            .partition(|p| leading_non_terminal(p) == Some(current));
        if recursive.is_empty() {
            return Ok(None);
        }

        let tail = fresh.mint(RECURSION_TAIL_BASE, self);
        debug!("Eliminating left recursion of {} through {}", current, tail);
        let tail_symbol = Symbol::NonTerminal(tail.clone());

        let mut productions = Vec::with_capacity(base.len() * 2);
        for p in base {
            let with_tail = appended(&p, &tail_symbol);
            push_unique(&mut productions, p);
            push_unique(&mut productions, with_tail);
        }

        let mut tail_productions = Vec::with_capacity(recursive.len() * 2);
        for p in recursive {
            let rest = p[1..].to_vec();
            push_unique(&mut tail_productions, rest.clone());
            push_unique(&mut tail_productions, appended(&rest, &tail_symbol));
        }

        self.rules.insert(current.to_string(), productions);
        self.insert_fresh(tail.clone(), tail_productions)?;
        Ok(Some(tail))
    }

    fn check_gnf_preconditions(&self) -> Result<(), GrammarError> {
        let start = self.start_symbol().unwrap_or_default();
        for (left, productions) in &self.rules {
            if left != start && productions.iter().any(|p| is_epsilon(p)) {
                return Err(GrammarError::malformed(
                    left,
                    format!("only the start symbol may derive {}", EPSILON),
                ));
            }
        }
        if self.rules.get(start).map_or(false, |ps| ps.iter().any(|p| is_epsilon(p))) {
            let referenced = self
                .rules
                .values()
                .flatten()
                .flatten()
                .any(|s| s.non_terminal() == Some(start));
            if referenced {
                return Err(GrammarError::malformed(
                    start,
                    format!("the start symbol derives {} and occurs on a right side", EPSILON),
                ));
            }
        }

        for name in self.non_terminal_iter() {
            if self.unit_reachable(name).contains(name) {
                return Err(GrammarError::non_termination(
                    name,
                    "unit productions lead back to it",
                ));
            }
        }

        // Other useless non-terminals lose all their productions and drop out
        // of the back-substitution; the start symbol must survive.
        let has_productions = self.rules.get(start).map_or(false, |ps| !ps.is_empty());
        if has_productions && !self.productive_non_terminals().contains(start) {
            return Err(GrammarError::non_termination(
                start,
                "the start symbol derives no terminal string, so its left recursion has no base",
            ));
        }
        Ok(())
    }

    /// Non-terminals deriving at least one string of terminals.
    fn productive_non_terminals(&self) -> IndexSet<&str> {
        let mut productive: IndexSet<&str> = IndexSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for (left, productions) in &self.rules {
                if productive.contains(left.as_str()) {
                    continue;
                }
                let derives = productions.iter().any(|production| {
                    production.iter().all(|s| match s {
                        Symbol::NonTerminal(name) => productive.contains(name.as_str()),
                        _ => true,
                    })
                });
                if derives {
                    productive.insert(left.as_str());
                    changed = true;
                }
            }
        }
        productive
    }

    /// Every production starts with a terminal followed only by
    /// non-terminals; the start symbol may also derive `λ`.
    pub fn is_gnf(&self) -> bool {
        self.rules.iter().all(|(left, productions)| {
            productions.iter().all(|production| match production.split_first() {
                Some((Symbol::Terminal(_), rest)) => {
                    rest.iter().all(|s| s.non_terminal().map_or(false, |n| self.contains(n)))
                }
                _ => is_epsilon(production) && self.is_start_symbol(left),
            })
        })
    }
}
