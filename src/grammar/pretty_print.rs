use std::fmt;

use crowbook_text_processing::escape;

use super::{Grammar, EPSILON};

#[derive(Debug, Clone)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\lambda")
    }
}

#[derive(Debug, Clone)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let non_empty = || self.productions.iter().filter(|p| !p.rights.is_empty());
        let left_max_len = non_empty()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        non_empty()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .rules
            .iter()
            .map(|(left, rights)| ProductionOutput {
                left: left.as_str(),
                rights: rights
                    .iter()
                    .map(|right| right.iter().map(|s| s.name()).collect())
                    .collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_production_output_vec().to_plaintext())
    }
}
