pub mod binarize;
pub mod cnf;
pub mod eliminate_null;
pub mod eliminate_unit;
pub mod error;
pub mod fresh;
pub mod gnf;
pub mod grammar;
pub mod isolate_terminals;
pub mod nullable;
pub mod parse;
pub mod pretty_print;
pub use error::GrammarError;
pub use fresh::FreshNames;
pub use grammar::{epsilon_production, is_epsilon, Grammar, Production, Symbol};

pub const EPSILON: &str = "λ";
/// Spellings of the empty string accepted on input.
pub const EPSILON_ALIASES: [&str; 3] = ["λ", "ε", "ϵ"];
