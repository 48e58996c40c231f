//! Error types.
//!
//! Normal ordering itself is total; failures come from the text adapters
//! ([`ParseError`]), from the configured resource limits, and from combining
//! caller-built terms whose coefficients overflow.

use thiserror::Error;

/// Malformed operator notation. Positions are byte offsets into the input.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    /// Text that does not form an operator.
    #[error("unrecognized input at {position}: {text:?}")]
    Unrecognized { position: usize, text: String },

    /// A braced operator whose momentum is not a word token.
    #[error("malformed index at {position}: {text:?}")]
    MalformedIndex { position: usize, text: String },

    /// A spin token outside of `↑`/`↓`.
    #[error("unsupported spin at {position}: {spin:?}")]
    UnsupportedSpin { position: usize, spin: String },

    /// An empty summand, e.g. `a +  + b`.
    #[error("missing term at {position}")]
    MissingTerm { position: usize },

    /// A coefficient that does not fit into `i64`.
    #[error("invalid coefficient at {position}: {text:?}")]
    Coefficient { position: usize, text: String },
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The input string is longer than [`WickConfig::max_operators`][crate::wick::WickConfig].
    #[error("resource limit exceeded: {len} operators, at most {limit} allowed")]
    TooManyOperators { len: usize, limit: usize },

    /// The expansion would produce more than [`WickConfig::max_terms`][crate::wick::WickConfig] terms.
    #[error("resource limit exceeded: more than {limit} terms")]
    TooManyTerms { limit: usize },

    /// Multiplying two caller-supplied coefficients overflowed `i64`.
    #[error("coefficient overflow: {lhs} * {rhs}")]
    CoefficientOverflow { lhs: i64, rhs: i64 },
}

impl Error {
    /// Whether this is one of the resource-limit conditions.
    pub fn is_resource_limit(&self) -> bool {
        matches!(self, Error::TooManyOperators { .. } | Error::TooManyTerms { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
