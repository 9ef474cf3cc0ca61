//! Error types for dispatch construction.
//!
//! Everything here is a build-time error: a `Matcher`, `TransitionTable`,
//! or `EqSpec` that exists has already passed its completeness check, and
//! running it cannot fail.

/// An arm set, transition table, or equality specification does not cover
/// its union type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NonExhaustiveMatch {
    /// Variants with no arm and no catch-all to absorb them.
    #[error("match over `{type_name}` misses variants {missing:?} and has no catch-all")]
    MissingVariants {
        type_name: String,
        missing: Vec<String>,
    },

    /// A variant is claimed by more than one arm. Full-match mode covers
    /// every variant exactly once.
    #[error("duplicate arm for variant `{tag}` of `{type_name}`")]
    DuplicateArm { type_name: String, tag: String },

    /// An arm names a tag the union type does not have.
    #[error("arm names unknown variant `{tag}` of `{type_name}`")]
    UnknownVariant { type_name: String, tag: String },

    /// A catch-all was supplied but every variant already has an arm, so
    /// it can never match. Catch-alls cover a strict subset's remainder.
    #[error("catch-all over `{type_name}` is unreachable: every variant has an arm")]
    UnreachableCatchAll { type_name: String },
}

/// Errors building a transition table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error(transparent)]
    Coverage(#[from] NonExhaustiveMatch),

    /// Transitions replace the whole discriminant and never touch a
    /// payload, so both endpoints of every step must be payload-less.
    #[error("variant `{tag}` of `{type_name}` carries a payload and cannot appear in a transition table")]
    PayloadCarrying { type_name: String, tag: String },
}
