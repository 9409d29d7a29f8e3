use std::collections::HashSet;

use super::Grammar;

/// Mints non-terminal names of the form `<base><n>`.
///
/// One generator belongs to one pipeline invocation. The counter only grows,
/// and a name is never handed out twice or when the target grammar already
/// declares it.
#[derive(Debug, Default)]
pub struct FreshNames {
    next: usize,
    minted: HashSet<String>,
}

impl FreshNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, base: &str, grammar: &Grammar) -> String {
        loop {
            let name = format!("{}{}", base, self.next);
            self.next += 1;
            if !grammar.contains(&name) && self.minted.insert(name.clone()) {
                return name;
            }
        }
    }

    pub fn minted(&self) -> impl Iterator<Item = &str> {
        self.minted.iter().map(|name| name.as_str())
    }
}
