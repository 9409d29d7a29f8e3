use indexmap::IndexSet;

use super::{is_epsilon, Grammar};

impl Grammar {
    /// Non-terminals with an explicit `λ` production, in declaration order.
    pub fn nullable_non_terminals(&self) -> IndexSet<String> {
        self.rules
            .iter()
            .filter(|(_, productions)| productions.iter().any(|p| is_epsilon(p)))
            .map(|(name, _)| name.clone())
            .collect()
    }
}
