//! # Error Types

/// Errors from wordloom operations.
#[derive(Debug, thiserror::Error)]
pub enum WordloomError {
    /// A pretrained vector line disagrees with the established width.
    #[error("malformed vector line {line}: expected {expected} values, found {found}")]
    MalformedVectorLine {
        /// The 1-based line number.
        line: usize,
        /// The value count established by the first vector line.
        expected: usize,
        /// The value count actually found.
        found: usize,
    },

    /// A pretrained vector value failed to parse as a float.
    #[error("malformed vector line {line}: {value:?} is not a number")]
    MalformedVectorValue {
        /// The 1-based line number.
        line: usize,
        /// The offending field.
        value: String,
    },

    /// A required sequence-boundary token could not be resolved from the store.
    #[error("special token {token:?} not found in the pretrained store")]
    MissingSpecialToken {
        /// The canonical token name.
        token: &'static str,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Vocabulary artifact serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Tensor artifact serialization error.
    #[error("tensor container error: {0}")]
    Tensor(#[from] safetensors::SafeTensorError),
}

/// Result type for wordloom operations.
pub type WLResult<T> = core::result::Result<T, WordloomError>;
