//! Error type shared by the composers, samplers and config loaders.

use thiserror::Error;

/// Convenience result type for fallible composer operations.
pub type AugmentResult<T> = Result<T, AugmentError>;

/// Errors returned while building or configuring an augmentation pipeline.
///
/// Contract violations at call time (mixing positional and named batch data,
/// a corrupted transform order) are not represented here: they panic.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// A per-transform dropout vector does not have one entry per transform.
    #[error(
        "if dropout is a sequence it must specify the dropout probability for each transform, \
         found {found} probabilities and {expected} transforms"
    )]
    DropoutLength { found: usize, expected: usize },

    /// A random parameter was constructed with unusable arguments.
    #[error("invalid sampler parameters: {0}")]
    InvalidSampler(String),

    /// Reading a config file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A config document could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropout_length_message_names_both_lengths() {
        let err = AugmentError::DropoutLength {
            found: 2,
            expected: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("found 2 probabilities"));
        assert!(msg.contains("3 transforms"));
    }
}
