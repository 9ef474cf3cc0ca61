//! Union type schemas.
//!
//! A [`UnionType`] is a named, closed, ordered set of variants. Closed means
//! the set is fixed when `define()` returns: no variant is ever added or
//! removed afterwards, which is what makes exhaustiveness checking a
//! definition-time property rather than a runtime hope.
//!
//! Declaration order is semantic — it drives raw-value default-sequencing
//! and dispatch arm ordering — so the registry is an [`IndexMap`], not a
//! hash map.

use crate::scalar::{RawValue, ScalarKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type vocabulary payload fields draw from.
///
/// `SelfRef` is a recursive reference to the enclosing union type; at the
/// value level it is always behind a `Box`, so values stay statically
/// finite. `SelfSeq` is an ordered sequence of such references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Int,
    Float,
    Text,
    Bool,
    SelfRef,
    SelfSeq,
}

/// One named, typed field of a `fields(...)` payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The payload a variant carries: nothing, one anonymous value, or an
/// ordered list of named fields. Fixed per variant for the lifetime of
/// the union type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    #[default]
    None,
    Single(FieldType),
    Fields(Vec<FieldDef>),
}

impl PayloadShape {
    /// Number of payload cells this shape declares.
    pub fn arity(&self) -> usize {
        match self {
            PayloadShape::None => 0,
            PayloadShape::Single(_) => 1,
            PayloadShape::Fields(fields) => fields.len(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PayloadShape::None)
    }

    /// Position of a named field, if this shape has one.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        match self {
            PayloadShape::Fields(fields) => fields.iter().position(|f| f.name == name),
            _ => None,
        }
    }
}

/// How a union type backs its variants: payload shapes, or one scalar
/// raw value per variant. Mutually exclusive per union type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backing {
    Payload,
    Raw(ScalarKind),
}

/// One variant of a union type, with its resolved raw value when the
/// type is raw-backed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub tag: String,
    pub shape: PayloadShape,
    /// Resolved at define time by the default-sequencing pass.
    /// `Some` exactly when the union type is raw-backed.
    pub raw: Option<RawValue>,
}

/// A named, closed set of variants.
///
/// Immutable after definition and freely shareable; values hold an
/// `Arc<UnionType>` back to their type. Construction goes through
/// [`UnionTypeBuilder`](crate::builder::UnionTypeBuilder) or a
/// [`DefSpec`](crate::builder::DefSpec), both of which validate before a
/// `UnionType` ever exists.
#[derive(Debug)]
pub struct UnionType {
    pub(crate) name: String,
    pub(crate) backing: Backing,
    pub(crate) variants: IndexMap<String, Variant>,
    /// Raw-value lookup table, populated exactly when raw-backed.
    /// Built eagerly by the sequencing pass, never computed at lookup time.
    pub(crate) raw_table: IndexMap<RawValue, String>,
}

impl UnionType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backing(&self) -> Backing {
        self.backing
    }

    /// The declared scalar kind, when raw-backed.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.backing {
            Backing::Raw(kind) => Some(kind),
            Backing::Payload => None,
        }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variants in declaration order.
    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }

    /// Tags in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    pub fn variant(&self, tag: &str) -> Option<&Variant> {
        self.variants.get(tag)
    }

    /// Declaration-order index of a tag.
    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.variants.get_index_of(tag)
    }

    pub fn variant_at(&self, index: usize) -> Option<&Variant> {
        self.variants.get_index(index).map(|(_, v)| v)
    }

    /// The resolved tag→raw-value pairs, in declaration order.
    /// Empty for payload-backed types.
    pub fn raw_pairs(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.variants
            .values()
            .filter_map(|v| v.raw.as_ref().map(|raw| (v.tag.as_str(), raw)))
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, tag) in self.variants.keys().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{tag}")?;
        }
        write!(f, ")")
    }
}
