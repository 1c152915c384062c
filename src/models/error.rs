//! Error types for kgex.
//!
//! Epistemic taxonomy:
//! - B_i falsified: Expected failures (bad flag value, unknown model)
//! - K_i violated: Registry misconfiguration detected at startup
//! - I^B materialized: Output stream failures

use thiserror::Error;

/// Top-level error type for kgex.
#[derive(Debug, Error)]
pub enum KgexError {
    // ═══════════════════════════════════════════════════════════════════
    // B_i FALSIFIED - Belief proven wrong (expected failures)
    // ═══════════════════════════════════════════════════════════════════

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Invalid value for --{flag}: {message}")]
    InvalidArgument { flag: String, message: String },

    // ═══════════════════════════════════════════════════════════════════
    // K_i VIOLATED - Registry misconfiguration (fatal at startup)
    // ═══════════════════════════════════════════════════════════════════

    #[error("Duplicate {kind} registration: '{name}'")]
    DuplicateComponent { kind: String, name: String },

    #[error("{kind} '{name}' has no documentation (neither instance nor type level)")]
    MissingDocumentation { kind: String, name: String },

    #[error("Model '{model}' parameter '{parameter}' has unsupported type '{annotation}'")]
    UnsupportedParameterType {
        model: String,
        parameter: String,
        annotation: String,
    },

    #[error("Model '{model}' parameter '{parameter}' default {default} does not match type '{annotation}'")]
    DefaultTypeMismatch {
        model: String,
        parameter: String,
        annotation: String,
        default: String,
    },

    #[error("Model '{model}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { model: String, parameter: String },

    #[error("Model '{model}' parameter '{parameter}' maps to reserved flag '--{flag}'")]
    ReservedParameter {
        model: String,
        parameter: String,
        flag: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // I^B MATERIALIZED - Output failures
    // ═══════════════════════════════════════════════════════════════════

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KgexError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if this error means the registry itself is misconfigured.
    ///
    /// These must stop the command surface from coming up at all.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateComponent { .. }
                | Self::MissingDocumentation { .. }
                | Self::UnsupportedParameterType { .. }
                | Self::DefaultTypeMismatch { .. }
                | Self::DuplicateParameter { .. }
                | Self::ReservedParameter { .. }
        )
    }
}

/// Result type alias for kgex.
pub type Result<T> = std::result::Result<T, KgexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misconfiguration_classification() {
        let err = KgexError::UnsupportedParameterType {
            model: "TransE".to_string(),
            parameter: "criterion".to_string(),
            annotation: "nn.Module".to_string(),
        };
        assert!(err.is_misconfiguration());

        let err = KgexError::UnknownModel("Nope".to_string());
        assert!(!err.is_misconfiguration());
    }

    #[test]
    fn test_io_error_context() {
        let err = KgexError::io(
            "writing table",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
        );
        assert_eq!(err.to_string(), "IO error: writing table");
    }
}
