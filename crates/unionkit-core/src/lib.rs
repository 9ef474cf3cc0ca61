//! # Unionkit Core
//!
//! Closed tagged unions as data: a [`UnionType`] is a named, ordered,
//! closed set of variants, each carrying either a payload shape or a
//! scalar raw value. Every invariant is checked once, at definition time —
//! a `UnionType` that exists is one whose tags are unique, whose backing
//! is unmixed, and whose raw-value table has no collisions.
//!
//! ## Architecture
//!
//! ```text
//! ScalarKind / RawValue   ← The restricted scalar vocabulary (int|float|text)
//!     │
//! FieldType / PayloadShape ← What a variant may carry
//!     │
//! DefSpec / UnionTypeBuilder ← Declaration, then one validation pass
//!     │
//! UnionType               ← Sealed definition + eager raw-value table
//!     │
//! UnionValue              ← Instances: construct / extract / look up
//! ```
//!
//! Values are plain data. The recursive variants (`SelfRef`, `SelfSeq`)
//! own their children exclusively through explicit indirection, and a
//! worklist `Drop` keeps destruction iterative at any depth.
//!
//! Exhaustive dispatch over these types lives in the companion
//! `unionkit-match` crate; this crate only promises that the variant set
//! a dispatcher sees is closed and final.

pub mod builder;
pub mod codec;
pub mod error;
pub mod scalar;
pub mod schema;
pub mod value;

pub use builder::{DefSpec, UnionTypeBuilder, VariantSpec};
pub use error::{DefinitionError, ShapeMismatch};
pub use scalar::{RawValue, ScalarKind};
pub use schema::{Backing, FieldDef, FieldType, PayloadShape, UnionType, Variant};
pub use value::{FieldValue, Payload, UnionValue};
