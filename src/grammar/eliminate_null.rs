use indexmap::IndexSet;
use log::{debug, trace};

use super::{
    epsilon_production, grammar::push_unique, is_epsilon, Grammar, GrammarError, Symbol, EPSILON,
};

impl Grammar {
    /// Removes `λ` productions, except on the start symbol.
    ///
    /// Each production gets one extra variant per nullable non-terminal it
    /// mentions, with the first occurrence of that non-terminal deleted.
    pub fn eliminate_null_productions(
        &self,
        nullable: &IndexSet<String>,
    ) -> Result<Grammar, GrammarError> {
        self.validate()?;
        debug!("Removing {}-productions of {:?}", EPSILON, nullable);

        let mut g = Grammar::new();
        for (left, productions) in &self.rules {
            let is_start = self.is_start_symbol(left);
            let mut new_productions: Vec<Vec<Symbol>> = Vec::new();

            for production in productions {
                if is_epsilon(production) && !is_start {
                    trace!("Dropping {} -> {}", left, EPSILON);
                    continue;
                }

                for name in nullable {
                    let position = production
                        .iter()
                        .position(|s| s.non_terminal() == Some(name.as_str()));
                    if let Some(position) = position {
                        let mut variant = production.clone();
                        variant.remove(position);
                        if variant.is_empty() {
                            if is_start {
                                push_unique(&mut new_productions, epsilon_production());
                            }
                            continue;
                        }
                        trace!("Adding {} without {}", left, name);
                        push_unique(&mut new_productions, variant);
                    }
                }

                push_unique(&mut new_productions, production.clone());
            }

            g.rules.insert(left.clone(), new_productions);
        }
        Ok(g)
    }
}
