//! Error types for brushwork

use thiserror::Error;

/// Result type alias for brushwork operations
pub type Result<T> = std::result::Result<T, BrushError>;

/// Errors raised while building rules and brushes
#[derive(Error, Debug)]
pub enum BrushError {
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Pattern {pattern:?} has no capture group {group}")]
    UnknownGroup { pattern: String, group: usize },

    #[error("Capture group {0:?} is not a number")]
    GroupIndex(String),

    #[error("Script region {0:?} needs at least 3 capture groups")]
    ScriptRegionGroups(String),

    #[error("Brush {0:?} has no script region and cannot be embedded")]
    NotEmbeddable(String),

    #[error("Invalid brush definition: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No rule with id {0:?}")]
    UnknownRule(String),

    #[error("Rule {0:?} nests itself")]
    RuleCycle(String),

    #[error("Pattern {0:?} has an empty style key")]
    EmptyStyle(String),

    #[error("Rule id {0:?} is used more than once")]
    DuplicateRule(String),

    #[error("Nested-only rule {0:?} has no id and cannot be referenced")]
    UnreachableRule(String),
}
