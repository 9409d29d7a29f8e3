extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{FreshNames, Grammar, GrammarError, Production, Symbol};

fn to_json_or_error(result: Result<Grammar, GrammarError>) -> String {
    match result.and_then(|g| g.to_json()) {
        Ok(json) => json,
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}

#[wasm_bindgen]
pub fn cnf_to_json(grammar: &str) -> String {
    to_json_or_error(Grammar::parse(grammar).and_then(|g| g.to_cnf()))
}

#[wasm_bindgen]
pub fn gnf_to_json(grammar: &str) -> String {
    to_json_or_error(Grammar::parse(grammar).and_then(|g| g.to_cnf()?.to_gnf()))
}

#[cfg(test)]
fn productions_of(g: &Grammar, name: &str) -> Vec<String> {
    g.productions(name)
        .unwrap()
        .iter()
        .map(|p| {
            p.iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}



#[cfg(test)]
mod normal_form_tests {
    use crate::grammar::{is_epsilon, GrammarError};
    use crate::{cnf_to_json, gnf_to_json, productions_of, Grammar};

    fn g(text: &str) -> Grammar {
        Grammar::parse(text).unwrap()
    }

    const MIXED: &str = "S -> A | A B a | A b A\n\
                         A -> A a | λ\n\
                         B -> B b | B C\n\
                         C -> C B | C A | b B";

    #[test]
    fn cnf_nullable_operand() {
        let r = g("S -> A B | a\nA -> a A | λ\nB -> b").to_cnf().unwrap();

        assert_eq!(productions_of(&r, "S"), vec!["b", "A B", "a"]);
        assert_eq!(productions_of(&r, "A"), vec!["a", "T0 A"]);
        assert_eq!(productions_of(&r, "B"), vec!["b"]);
        assert_eq!(productions_of(&r, "T0"), vec!["a"]);
        assert!(r.is_cnf());
        assert!(!r.rules.values().flatten().any(|p| is_epsilon(p)));
    }

    #[test]
    fn cnf_input_is_unchanged() {
        let input = g("S -> X Y\nX -> a\nY -> b");
        assert_eq!(input.to_cnf().unwrap(), input);
    }

    #[test]
    fn cnf_forward_unit_chain_is_not_resolved() {
        let r = g("S -> A\nA -> B\nB -> b").to_cnf().unwrap();

        assert_eq!(productions_of(&r, "S"), vec!["B"]);
        assert_eq!(productions_of(&r, "A"), vec!["b"]);
        assert!(!r.is_cnf());
    }

    #[test]
    fn cnf_does_not_touch_input() {
        let input = g(MIXED);
        let before = input.clone();
        let _ = input.to_cnf().unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn cnf_mixed_grammar() {
        let input = g(MIXED);
        let r = input.to_cnf().unwrap();

        assert!(r.is_cnf());
        assert_eq!(
            productions_of(&r, "S"),
            vec!["λ", "a", "A T2", "B T2", "A S0", "T3 A", "A S1"]
        );
        assert_eq!(productions_of(&r, "C"), vec!["C B", "C A", "T3 B"]);
        assert_eq!(productions_of(&r, "S0"), vec!["B T2"]);
        assert_eq!(productions_of(&r, "S1"), vec!["T3 A"]);

        // Only the start symbol may keep λ.
        for (left, productions) in &r.rules {
            if left != "S" {
                assert!(!productions.iter().any(|p| is_epsilon(p)));
            }
        }

        let fresh: Vec<&str> = r.non_terminal_iter().filter(|n| !input.contains(n)).collect();
        assert_eq!(fresh, vec!["S0", "S1", "T2", "T3"]);
    }

    #[test]
    fn gnf_substitutes_leading_non_terminal() {
        let r = g("S -> A B\nA -> a\nB -> b").to_gnf().unwrap();

        assert_eq!(productions_of(&r, "S"), vec!["a B"]);
        assert_eq!(productions_of(&r, "A"), vec!["a"]);
        assert_eq!(productions_of(&r, "B"), vec!["b"]);
        assert!(r.is_gnf());
    }

    #[test]
    fn gnf_immediate_left_recursion() {
        let r = g("S -> S A | b\nA -> a").to_gnf().unwrap();

        assert_eq!(productions_of(&r, "S"), vec!["b", "b T0"]);
        assert_eq!(productions_of(&r, "T0"), vec!["a", "a T0"]);
        assert!(r.is_gnf());
    }

    #[test]
    fn gnf_indirect_left_recursion() {
        let r = g("S -> A B | b\nA -> S A | a\nB -> b").to_gnf().unwrap();

        assert_eq!(
            productions_of(&r, "S"),
            vec!["b A B", "b A T0 B", "a B", "a T0 B", "b"]
        );
        assert_eq!(productions_of(&r, "A"), vec!["b A", "b A T0", "a", "a T0"]);
        assert_eq!(productions_of(&r, "T0"), vec!["b A", "b A T0"]);
        assert!(r.is_gnf());
    }

    #[test]
    fn gnf_after_cnf() {
        let cnf = g("S -> A B | a\nA -> a A | λ\nB -> b").to_cnf().unwrap();
        let r = cnf.to_gnf().unwrap();

        assert_eq!(productions_of(&r, "S"), vec!["b", "a B", "a A B", "a"]);
        assert_eq!(productions_of(&r, "A"), vec!["a", "a A"]);
        assert!(r.is_gnf());
    }

    #[test]
    fn gnf_fresh_names_avoid_cnf_names() {
        let cnf = g("S -> S a | b").to_cnf().unwrap();
        assert_eq!(productions_of(&cnf, "S"), vec!["S T0", "b"]);

        let r = cnf.to_gnf().unwrap();
        assert_eq!(productions_of(&r, "S"), vec!["b", "b T1"]);
        assert_eq!(productions_of(&r, "T1"), vec!["a", "a T1"]);
        assert!(r.is_gnf());
    }

    #[test]
    fn gnf_self_recursion_without_base() {
        let e = g("S -> S a").to_gnf().unwrap_err();
        assert!(matches!(e, GrammarError::NonTerminationRisk { .. }));
    }

    #[test]
    fn gnf_useless_non_terminals_drop_out() {
        let r = g("S -> a | B b\nB -> B b").to_gnf().unwrap();
        assert_eq!(productions_of(&r, "S"), vec!["a"]);
        assert!(r.productions("B").unwrap().is_empty());
        assert_eq!(productions_of(&r, "T0"), vec!["b", "b T0"]);
        assert!(r.is_gnf());
    }

    #[test]
    fn gnf_mixed_grammar() {
        let r = g(MIXED).to_cnf().unwrap().to_gnf().unwrap();

        assert_eq!(
            productions_of(&r, "S"),
            vec!["λ", "a", "a T2", "a T0 T2", "a S0", "a T0 S0", "b A", "a S1", "a T0 S1"]
        );
        assert_eq!(productions_of(&r, "A"), vec!["a", "a T0"]);
        assert!(r.productions("B").unwrap().is_empty());
        assert!(r.is_gnf());
        assert!(!gnf_to_json(MIXED).contains("error"));
    }

    #[test]
    fn gnf_unit_cycle() {
        let e = g("S -> A | a\nA -> S | b").to_gnf().unwrap_err();
        assert!(matches!(e, GrammarError::NonTerminationRisk { .. }));
    }

    #[test]
    fn gnf_epsilon_preconditions() {
        let e = g("S -> A b\nA -> λ | a").to_gnf().unwrap_err();
        assert!(matches!(e, GrammarError::Malformed { ref non_terminal, .. } if non_terminal == "A"));

        let e = g("S -> a S | λ").to_gnf().unwrap_err();
        assert!(matches!(e, GrammarError::Malformed { ref non_terminal, .. } if non_terminal == "S"));

        let r = g("S -> A B | λ\nA -> a\nB -> b").to_gnf().unwrap();
        assert_eq!(productions_of(&r, "S"), vec!["a B", "λ"]);
        assert!(r.is_gnf());
    }

    #[test]
    fn gnf_drops_productions_of_empty_non_terminals() {
        let r = g("S -> A B | b\nA -> λ\nB -> b").to_cnf().unwrap();
        assert!(r.productions("A").unwrap().is_empty());

        let r = r.to_gnf().unwrap();
        assert_eq!(productions_of(&r, "S"), vec!["b"]);
        assert!(r.is_gnf());
    }

    #[test]
    fn wasm_entry_points() {
        assert_eq!(cnf_to_json("S -> a B\nB -> b"), r#"{"S":[["T0","B"]],"B":[["b"]],"T0":[["a"]]}"#);
        assert_eq!(gnf_to_json("S -> a B\nB -> b"), r#"{"S":[["a","B"]],"B":[["b"]],"T0":[["a"]]}"#);
        assert!(cnf_to_json("S -> a -> b").starts_with(r#"{"error":"Line 1"#));
    }
}
