// error.rs - Error types for the automaton engine

use thiserror::Error;

/// Errors raised while parsing a `B<digits>/S<digits>` rule string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid rule syntax {spec:?}: {reason}")]
    InvalidRuleSyntax { spec: String, reason: &'static str },
}

/// Errors raised while decoding an RLE body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RleError {
    /// A character outside the `0-9 o b $ !` alphabet.
    #[error("malformed RLE: unexpected {ch:?} at ({x}, {y})")]
    MalformedRle { ch: char, x: usize, y: usize },

    /// A run that would leave the target grid.
    #[error("RLE run of {count} starting at ({x}, {y}) leaves the grid")]
    RunOutOfBounds { count: usize, x: usize, y: usize },

    #[error("RLE body ended before the '!' terminator")]
    MissingTerminator,

    #[error("cannot decode into a {rows}x{cols} grid")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Errors raised while reading a pattern record in `.rle` file layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern has no `x = .., y = ..` header line")]
    MissingHeader,

    #[error("invalid pattern header {0:?}")]
    InvalidHeader(String),

    #[error("pattern dimensions {rows}x{cols} are empty")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error(transparent)]
    Rle(#[from] RleError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Errors raised while loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Umbrella error for fallible [`Engine`](crate::Engine) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Rle(#[from] RleError),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}
