use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid JSON grammar: {0}")]
    Json(String),

    /// A production that no grammar of this crate may contain.
    #[error("malformed production of {non_terminal}: {reason}")]
    Malformed {
        non_terminal: String,
        reason: String,
    },

    #[error("fresh non-terminal {0} is already declared")]
    NameCollision(String),

    /// The rewrite would not converge to the requested normal form.
    #[error("cannot normalize {non_terminal}: {reason}")]
    NonTerminationRisk {
        non_terminal: String,
        reason: String,
    },
}

impl GrammarError {
    pub(crate) fn malformed(non_terminal: &str, reason: impl Into<String>) -> Self {
        GrammarError::Malformed {
            non_terminal: non_terminal.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn non_termination(non_terminal: &str, reason: impl Into<String>) -> Self {
        GrammarError::NonTerminationRisk {
            non_terminal: non_terminal.to_string(),
            reason: reason.into(),
        }
    }
}
