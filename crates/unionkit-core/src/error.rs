//! Error types for definition and construction.
//!
//! Everything here surfaces at union type definition time or at value
//! construction time — never during dispatch or lookup. Absence of a raw
//! value in a lookup is `Option::None`, not an error.

use crate::scalar::{RawValue, ScalarKind};
use crate::schema::FieldType;

/// Errors raised while defining a union type.
///
/// Fatal to the definition: a failed `define()` produces no type, and
/// nothing is retried. A `UnionType` value is proof its definition passed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    /// Two variants share a tag.
    #[error("duplicate variant `{tag}` in union type `{type_name}`")]
    DuplicateVariant { type_name: String, tag: String },

    /// Two variants resolve to the same raw value after default-sequencing.
    #[error("raw value {value} backs both `{first}` and `{second}` in union type `{type_name}`")]
    DuplicateRawValue {
        type_name: String,
        value: RawValue,
        first: String,
        second: String,
    },

    /// A union type declares raw-value backing but a variant carries a
    /// payload shape, or vice versa. The two backings are exclusive.
    #[error("union type `{type_name}` mixes raw-value and payload backing at variant `{tag}`")]
    MixedBacking { type_name: String, tag: String },

    /// An explicit raw value does not belong to the declared scalar kind.
    #[error("raw value {value} for `{tag}` is {found}, union type `{type_name}` declares {declared}")]
    KindMismatch {
        type_name: String,
        tag: String,
        value: RawValue,
        declared: ScalarKind,
        found: ScalarKind,
    },

    /// Default-sequencing ran off the end of the integer range: the
    /// previous resolved value has no successor.
    #[error("variant `{tag}` of `{type_name}` cannot sequence past {prev}")]
    Overflow {
        type_name: String,
        tag: String,
        prev: RawValue,
    },

    /// Two fields of one variant's payload shape share a name. By-name
    /// access resolves through the declared field order, so names must be
    /// unique within a shape.
    #[error("variant `{tag}` of `{type_name}` declares field `{field}` twice")]
    DuplicateField {
        type_name: String,
        tag: String,
        field: String,
    },

    /// A variant omitted its raw value where no default exists (text kinds
    /// always default to the tag; numeric kinds always sequence, so this
    /// only fires for kinds added later without a sequencing rule).
    #[error("variant `{tag}` of `{type_name}` has no raw value and kind {kind} does not default")]
    NoDefault {
        type_name: String,
        tag: String,
        kind: ScalarKind,
    },

    /// The variant list is empty. A closed set with no members has no
    /// constructible values and no meaningful dispatch.
    #[error("union type `{type_name}` defines no variants")]
    Empty { type_name: String },
}

impl DefinitionError {
    /// Stable failure class for fixtures and diagnostics.
    pub fn class(&self) -> &'static str {
        match self {
            DefinitionError::DuplicateVariant { .. } => "duplicate_variant",
            DefinitionError::DuplicateRawValue { .. } => "duplicate_raw_value",
            DefinitionError::MixedBacking { .. } => "mixed_backing",
            DefinitionError::KindMismatch { .. } => "kind_mismatch",
            DefinitionError::Overflow { .. } => "overflow",
            DefinitionError::DuplicateField { .. } => "duplicate_field",
            DefinitionError::NoDefault { .. } => "no_default",
            DefinitionError::Empty { .. } => "empty",
        }
    }
}

/// Errors raised while constructing a value whose payload does not match
/// the variant's declared shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeMismatch {
    /// The tag names no variant of this union type.
    #[error("union type `{type_name}` has no variant `{tag}`")]
    UnknownVariant { type_name: String, tag: String },

    /// The payload carries the wrong number of fields.
    #[error("variant `{tag}` expects {expected} field(s), got {got}")]
    WrongArity {
        tag: String,
        expected: usize,
        got: usize,
    },

    /// A field value does not inhabit the declared field type.
    #[error("field `{field}` of `{tag}` expects {expected:?}")]
    WrongFieldType {
        tag: String,
        field: String,
        expected: FieldType,
    },

    /// A recursive child belongs to a different union type.
    #[error("recursive field `{field}` of `{tag}` holds a `{found}` value, expected `{expected}`")]
    ForeignChild {
        tag: String,
        field: String,
        expected: String,
        found: String,
    },

    /// A payload was supplied for a payload-less variant.
    #[error("variant `{tag}` carries no payload")]
    UnexpectedPayload { tag: String },

    /// No payload was supplied for a payload-carrying variant.
    #[error("variant `{tag}` requires a payload")]
    MissingPayload { tag: String },

    /// A discriminant replacement touched a payload-carrying variant.
    /// Transitions swap the whole tag and never patch a payload, so both
    /// endpoints must be payload-less.
    #[error("variant `{tag}` carries a payload and cannot be transitioned")]
    PayloadCarrying { tag: String },
}
