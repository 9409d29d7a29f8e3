use log::{info, warn};

use super::{is_epsilon, FreshNames, Grammar, GrammarError, Symbol};

impl Grammar {
    /// Runs null elimination, unit elimination, binarization and terminal
    /// isolation.
    ///
    /// Unit elimination is a single pass, so a unit chain pointing forward
    /// (`S -> A`, `A -> B`, `B -> b`) leaves `S -> B` behind and the result
    /// is not in CNF. Check with [`Grammar::is_cnf`].
    pub fn to_cnf(&self) -> Result<Grammar, GrammarError> {
        let mut fresh = FreshNames::new();

        let nullable = self.nullable_non_terminals();
        let g = self.eliminate_null_productions(&nullable)?;
        let g = g.eliminate_unit_productions()?;
        let g = g.binarize(&mut fresh)?;
        let g = g.isolate_terminals(&mut fresh)?;

        info!(
            "CNF has {} productions, {} non-terminals ({} fresh)",
            g.production_count(),
            g.rules.len(),
            fresh.minted().count(),
        );
        if !g.is_cnf() {
            warn!("Result is not in CNF: unit productions are left after a single pass");
        }
        Ok(g)
    }

    /// Every production is one terminal or two declared non-terminals; the
    /// start symbol may also derive `λ`.
    pub fn is_cnf(&self) -> bool {
        self.rules.iter().all(|(left, productions)| {
            productions.iter().all(|production| match production.as_slice() {
                [Symbol::Terminal(_)] => true,
                [Symbol::NonTerminal(a), Symbol::NonTerminal(b)] => {
                    self.contains(a) && self.contains(b)
                }
                p => is_epsilon(p) && self.is_start_symbol(left),
            })
        })
    }
}
