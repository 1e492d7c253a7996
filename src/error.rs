//! Error types shared by the parser, the simulator and the analyzers.

/// Result alias used throughout the crate.
pub type CubeResult<T> = Result<T, CubeError>;

/// A malformed formula, with the 0-based character offset where parsing stopped.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("{message} at index {position}")]
pub struct FormulaSyntaxError {
    pub message: String,
    pub position: usize,
}

impl FormulaSyntaxError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum CubeError {
    /// Formula text could not be parsed.
    #[error("formula syntax error: {0}")]
    Syntax(#[from] FormulaSyntaxError),

    /// Input is well-formed but breaks a semantic precondition.
    #[error("validation error: {0}")]
    Validation(String),

    /// A canonical move string handed in by the caller is ill-formed.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("unknown preset: {name}. Available presets: {available}")]
    UnknownPreset { name: String, available: String },
}

impl CubeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_move(msg: impl Into<String>) -> Self {
        Self::InvalidMove(msg.into())
    }

    /// Character offset of a syntax error, for highlighting in an editor.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax(err) => Some(err.position),
            _ => None,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_reports_offset() {
        let err = CubeError::from(FormulaSyntaxError::new("Unsupported character 'Q'", 2));
        assert_eq!(err.position(), Some(2));
        assert!(err.is_syntax());
        assert!(err.to_string().contains("at index 2"));
    }

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CubeError::validation("x")
                .to_string()
                .starts_with("validation error:")
        );
        assert!(
            CubeError::invalid_move("x")
                .to_string()
                .starts_with("invalid move:")
        );
        assert_eq!(CubeError::validation("x").position(), None);
    }
}
