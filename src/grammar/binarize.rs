use log::{debug, trace};

use super::{FreshNames, Grammar, GrammarError, Symbol};

impl Grammar {
    /// Splits every production longer than two symbols into a right-leaning
    /// chain of binary productions.
    ///
    /// `N -> s0 s1 ... sk` becomes `N -> s0 N0`, `N0 -> s1 N1`, ...,
    /// `Nm -> s(k-1) sk`, the fresh names being taken from `fresh` with `N`
    /// as base.
    pub fn binarize(&self, fresh: &mut FreshNames) -> Result<Grammar, GrammarError> {
        self.validate()?;
        debug!("Breaking long productions");

        let mut g = self.clone();
        for (left, productions) in &self.rules {
            let mut new_productions = Vec::with_capacity(productions.len());

            for production in productions {
                if production.len() <= 2 {
                    new_productions.push(production.clone());
                    continue;
                }

                let last = production.len() - 1;
                let mut current = fresh.mint(left, &g);
                trace!("Splitting {} production of length {}", left, production.len());
                new_productions.push(vec![
                    production[0].clone(),
                    Symbol::NonTerminal(current.clone()),
                ]);

                for symbol in &production[1..last - 1] {
                    let next = fresh.mint(left, &g);
                    g.insert_fresh(
                        current,
                        vec![vec![symbol.clone(), Symbol::NonTerminal(next.clone())]],
                    )?;
                    current = next;
                }

                g.insert_fresh(current, vec![production[last - 1..].to_vec()])?;
            }

            g.rules.insert(left.clone(), new_productions);
        }
        Ok(g)
    }
}
