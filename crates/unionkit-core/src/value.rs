//! Union values.
//!
//! A [`UnionValue`] is an instance of a [`UnionType`]: the selected variant
//! plus its payload cells. Values are plain data — `Clone`, structurally
//! comparable, safe to read from any number of threads. The only mutation
//! a value admits is [`UnionValue::set_variant`], a full discriminant
//! replacement between payload-less variants, and it requires `&mut`
//! (exclusive access is the borrow checker's problem, not a lock's).
//!
//! Recursive children are exclusively owned through `Box`/`Vec`. Dropping
//! a root drops every descendant exactly once, via an explicit worklist so
//! a very deep chain cannot overflow the stack.

use crate::error::ShapeMismatch;
use crate::scalar::RawValue;
use crate::schema::{FieldType, PayloadShape, UnionType, Variant};
use std::fmt;
use std::sync::Arc;

/// One payload cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// A recursive child of the same union type, behind its indirection.
    Nested(Box<UnionValue>),
    /// An ordered sequence of recursive children.
    Seq(Vec<UnionValue>),
}

impl FieldValue {
    /// Whether this cell owns recursive children.
    fn has_children(&self) -> bool {
        matches!(self, FieldValue::Nested(_) | FieldValue::Seq(_))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<UnionValue> for FieldValue {
    fn from(v: UnionValue) -> Self {
        FieldValue::Nested(Box::new(v))
    }
}

impl From<Vec<UnionValue>> for FieldValue {
    fn from(v: Vec<UnionValue>) -> Self {
        FieldValue::Seq(v)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(v) => write!(f, "{v:?}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Nested(v) => write!(f, "{v}"),
            FieldValue::Seq(vs) => {
                write!(f, "[")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// The payload of one value: nothing, one anonymous cell, or an ordered
/// tuple of cells mirroring the variant's declared field order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    Empty,
    Single(FieldValue),
    Fields(Vec<FieldValue>),
}

impl Payload {
    pub fn single(v: impl Into<FieldValue>) -> Payload {
        Payload::Single(v.into())
    }

    /// An ordered tuple of cells, one per declared field.
    pub fn tuple<I: Into<FieldValue>>(cells: impl IntoIterator<Item = I>) -> Payload {
        Payload::Fields(cells.into_iter().map(Into::into).collect())
    }

    /// Number of cells.
    pub fn arity(&self) -> usize {
        match self {
            Payload::Empty => 0,
            Payload::Single(_) => 1,
            Payload::Fields(cells) => cells.len(),
        }
    }

    /// The cells as an ordered slice (a `Single` payload is a 1-tuple).
    pub fn cells(&self) -> &[FieldValue] {
        match self {
            Payload::Empty => &[],
            Payload::Single(cell) => std::slice::from_ref(cell),
            Payload::Fields(cells) => cells.as_slice(),
        }
    }

    fn into_cells(self) -> Vec<FieldValue> {
        match self {
            Payload::Empty => Vec::new(),
            Payload::Single(cell) => vec![cell],
            Payload::Fields(cells) => cells,
        }
    }

    fn has_children(&self) -> bool {
        self.cells().iter().any(FieldValue::has_children)
    }
}

/// An instance of a union type: tag plus payload.
pub struct UnionValue {
    ty: Arc<UnionType>,
    index: usize,
    payload: Payload,
}

impl UnionType {
    /// Construct a value of the named variant, validating the payload
    /// against the variant's declared shape: cell count, then each cell's
    /// type in order. Recursive children must belong to this union type.
    ///
    /// The stored payload is normalized to the declared shape, so a
    /// 1-tuple supplied for a `single(T)` variant and a `Single` payload
    /// are the same value afterwards.
    pub fn construct(
        self: &Arc<Self>,
        tag: &str,
        payload: Payload,
    ) -> Result<UnionValue, ShapeMismatch> {
        let (index, _, variant) =
            self.variants
                .get_full(tag)
                .ok_or_else(|| ShapeMismatch::UnknownVariant {
                    type_name: self.name.clone(),
                    tag: tag.to_string(),
                })?;

        let expected = variant.shape.arity();
        let got = payload.arity();
        if got != expected {
            return Err(match (expected, got) {
                (0, _) => ShapeMismatch::UnexpectedPayload { tag: tag.into() },
                (_, 0) => ShapeMismatch::MissingPayload { tag: tag.into() },
                _ => ShapeMismatch::WrongArity {
                    tag: tag.into(),
                    expected,
                    got,
                },
            });
        }

        let cells = payload.into_cells();
        for (pos, cell) in cells.iter().enumerate() {
            let (field_name, field_ty) = match &variant.shape {
                PayloadShape::None => unreachable!("arity 0 checked above"),
                PayloadShape::Single(ty) => ("value", *ty),
                PayloadShape::Fields(defs) => (defs[pos].name.as_str(), defs[pos].ty),
            };
            self.check_cell(tag, field_name, field_ty, cell)?;
        }

        let payload = match &variant.shape {
            PayloadShape::None => Payload::Empty,
            PayloadShape::Single(_) => {
                let mut cells = cells;
                Payload::Single(cells.remove(0))
            }
            PayloadShape::Fields(_) => Payload::Fields(cells),
        };

        Ok(UnionValue {
            ty: Arc::clone(self),
            index,
            payload,
        })
    }

    /// Construct a payload-less variant.
    pub fn make(self: &Arc<Self>, tag: &str) -> Result<UnionValue, ShapeMismatch> {
        self.construct(tag, Payload::Empty)
    }

    fn check_cell(
        &self,
        tag: &str,
        field: &str,
        expected: FieldType,
        cell: &FieldValue,
    ) -> Result<(), ShapeMismatch> {
        let ok = match (expected, cell) {
            (FieldType::Int, FieldValue::Int(_)) => true,
            (FieldType::Float, FieldValue::Float(_)) => true,
            (FieldType::Text, FieldValue::Text(_)) => true,
            (FieldType::Bool, FieldValue::Bool(_)) => true,
            (FieldType::SelfRef, FieldValue::Nested(child)) => {
                return self.check_child(tag, field, child);
            }
            (FieldType::SelfSeq, FieldValue::Seq(children)) => {
                for child in children {
                    self.check_child(tag, field, child)?;
                }
                return Ok(());
            }
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(ShapeMismatch::WrongFieldType {
                tag: tag.into(),
                field: field.into(),
                expected,
            })
        }
    }

    fn check_child(&self, tag: &str, field: &str, child: &UnionValue) -> Result<(), ShapeMismatch> {
        if child.type_name() == self.name {
            Ok(())
        } else {
            Err(ShapeMismatch::ForeignChild {
                tag: tag.into(),
                field: field.into(),
                expected: self.name.clone(),
                found: child.type_name().to_string(),
            })
        }
    }
}

impl UnionValue {
    fn variant(&self) -> &Variant {
        self.ty
            .variant_at(self.index)
            .expect("variant index is in range by construction")
    }

    /// The owning union type.
    pub fn ty(&self) -> &Arc<UnionType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// The selected variant's tag.
    pub fn tag(&self) -> &str {
        &self.variant().tag
    }

    /// Declaration-order index of the selected variant.
    pub fn variant_index(&self) -> usize {
        self.index
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Ordered tuple view of the payload cells.
    ///
    /// Equivalent to by-name access: `field_named(n)` is exactly
    /// `cells()[position of n in the declared shape]`.
    pub fn cells(&self) -> &[FieldValue] {
        self.payload.cells()
    }

    /// Positional cell access.
    pub fn cell(&self, index: usize) -> Option<&FieldValue> {
        self.payload.cells().get(index)
    }

    /// By-name cell access, resolved through the declared field order.
    pub fn field_named(&self, name: &str) -> Option<&FieldValue> {
        let pos = self.variant().shape.position_of(name)?;
        self.cell(pos)
    }

    /// The scalar raw value backing this value's variant.
    ///
    /// `Some` for every value of a raw-backed union type — the value is
    /// resolved at definition time and carried by the variant, so this
    /// accessor computes nothing. `None` for payload-backed types.
    pub fn raw_value(&self) -> Option<&RawValue> {
        self.variant().raw.as_ref()
    }

    /// Single-pattern probe: does this value have the given tag?
    pub fn is(&self, tag: &str) -> bool {
        self.variant().tag == tag
    }

    /// Single-pattern probe binding the payload cells on a tag match.
    /// Never requires exhaustiveness; mismatch is `None`.
    pub fn cells_if(&self, tag: &str) -> Option<&[FieldValue]> {
        self.is(tag).then(|| self.cells())
    }

    /// Single-pattern probe running `f` over the cells on a tag match.
    pub fn map_if<T>(&self, tag: &str, f: impl FnOnce(&[FieldValue]) -> T) -> Option<T> {
        self.cells_if(tag).map(f)
    }

    /// Replace the discriminant in place.
    ///
    /// Both the current and the target variant must be payload-less: a
    /// transition never patches a payload, it swaps the whole tag. This is
    /// the only mutation a value admits, and it takes `&mut self` —
    /// concurrent use on one value requires external exclusion, which the
    /// borrow checker enforces within safe Rust.
    pub fn set_variant(&mut self, tag: &str) -> Result<(), ShapeMismatch> {
        if !self.variant().shape.is_none() {
            return Err(ShapeMismatch::PayloadCarrying {
                tag: self.tag().to_string(),
            });
        }
        let (index, _, target) =
            self.ty
                .variants
                .get_full(tag)
                .ok_or_else(|| ShapeMismatch::UnknownVariant {
                    type_name: self.type_name().to_string(),
                    tag: tag.to_string(),
                })?;
        if !target.shape.is_none() {
            return Err(ShapeMismatch::PayloadCarrying {
                tag: tag.to_string(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Total number of values in this tree, the root included.
    pub fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&UnionValue> = vec![self];
        while let Some(v) = stack.pop() {
            count += 1;
            for cell in v.cells() {
                match cell {
                    FieldValue::Nested(child) => stack.push(child),
                    FieldValue::Seq(children) => stack.extend(children.iter()),
                    _ => {}
                }
            }
        }
        count
    }
}

impl Clone for UnionValue {
    fn clone(&self) -> Self {
        UnionValue {
            ty: Arc::clone(&self.ty),
            index: self.index,
            payload: self.payload.clone(),
        }
    }
}

/// Structural equality: same union type, same tag, payload cells equal in
/// order (recursively, each cell by its own equality). For raw-backed
/// types this coincides with raw-value equality, since raw values are
/// unique per variant.
impl PartialEq for UnionValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name()
            && self.index == other.index
            && self.payload == other.payload
    }
}

impl fmt::Debug for UnionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionValue")
            .field("type", &self.type_name())
            .field("tag", &self.tag())
            .field("payload", &self.payload)
            .finish()
    }
}

impl fmt::Display for UnionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())?;
        match &self.payload {
            Payload::Empty => Ok(()),
            Payload::Single(cell) => write!(f, "({cell})"),
            Payload::Fields(cells) => {
                write!(f, "(")?;
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{cell}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Worklist drop: a recursive value of any depth is destroyed without
/// recursing. Children are pulled out of the payload and drained one at a
/// time; each drained child drops with an already-empty payload.
impl Drop for UnionValue {
    fn drop(&mut self) {
        if !self.payload.has_children() {
            return;
        }
        let mut stack: Vec<UnionValue> = Vec::new();
        take_children(&mut self.payload, &mut stack);
        while let Some(mut v) = stack.pop() {
            take_children(&mut v.payload, &mut stack);
        }
    }
}

fn take_children(payload: &mut Payload, out: &mut Vec<UnionValue>) {
    for cell in std::mem::take(payload).into_cells() {
        match cell {
            FieldValue::Nested(child) => out.push(*child),
            FieldValue::Seq(children) => out.extend(children),
            _ => {}
        }
    }
}
