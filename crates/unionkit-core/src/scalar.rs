//! Scalar raw values.
//!
//! A raw-backed union type associates each variant with exactly one scalar
//! drawn from a restricted kind set: integer, floating point, or text. The
//! kind is declared once per union type and shared by every variant.
//!
//! Floats are wrapped in [`OrderedFloat`] so raw values are `Eq + Hash` and
//! duplicate detection at define time is total (NaN collides with NaN).

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The scalar kind a raw-backed union type declares for all its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Int,
    Float,
    Text,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Int => write!(f, "int"),
            ScalarKind::Float => write!(f, "float"),
            ScalarKind::Text => write!(f, "text"),
        }
    }
}

/// A scalar raw value backing one variant.
///
/// Untagged on the wire: `3` parses as `Int`, `3.5` as `Float`, `"up"` as
/// `Text`, which is what definition fixtures write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
}

impl RawValue {
    pub fn int(v: i64) -> Self {
        RawValue::Int(v)
    }

    pub fn float(v: f64) -> Self {
        RawValue::Float(OrderedFloat(v))
    }

    pub fn text(v: impl Into<String>) -> Self {
        RawValue::Text(v.into())
    }

    /// The kind this value belongs to.
    pub fn kind(&self) -> ScalarKind {
        match self {
            RawValue::Int(_) => ScalarKind::Int,
            RawValue::Float(_) => ScalarKind::Float,
            RawValue::Text(_) => ScalarKind::Text,
        }
    }

    /// The next value in default-sequencing order: +1 for numeric kinds,
    /// `None` when the integer range runs out.
    ///
    /// Text raw values do not sequence — an omitted text value defaults to
    /// the variant's own tag, never to a successor.
    pub(crate) fn succ(&self) -> Option<RawValue> {
        match self {
            RawValue::Int(v) => v.checked_add(1).map(RawValue::Int),
            RawValue::Float(v) => Some(RawValue::Float(OrderedFloat(v.0 + 1.0))),
            RawValue::Text(_) => None,
        }
    }

    /// The starting value for a numeric kind when no prior value exists.
    pub(crate) fn origin(kind: ScalarKind) -> Option<RawValue> {
        match kind {
            ScalarKind::Int => Some(RawValue::Int(0)),
            ScalarKind::Float => Some(RawValue::Float(OrderedFloat(0.0))),
            ScalarKind::Text => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Int(v) => write!(f, "{v}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::float(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(RawValue::int(3).kind(), ScalarKind::Int);
        assert_eq!(RawValue::float(3.5).kind(), ScalarKind::Float);
        assert_eq!(RawValue::text("up").kind(), ScalarKind::Text);
    }

    #[test]
    fn numeric_succession() {
        assert_eq!(RawValue::int(7).succ(), Some(RawValue::int(8)));
        assert_eq!(RawValue::float(1.5).succ(), Some(RawValue::float(2.5)));
        assert_eq!(RawValue::text("x").succ(), None);
    }

    #[test]
    fn succession_stops_at_int_max() {
        assert_eq!(RawValue::int(i64::MAX).succ(), None);
        assert_eq!(RawValue::int(i64::MAX - 1).succ(), Some(RawValue::int(i64::MAX)));
    }

    #[test]
    fn nan_is_self_equal() {
        // OrderedFloat gives total equality, so a duplicate NaN is
        // detectable at define time like any other collision.
        assert_eq!(RawValue::float(f64::NAN), RawValue::float(f64::NAN));
    }

    #[test]
    fn untagged_wire_form() {
        let v: RawValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, RawValue::int(3));
        let v: RawValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(v, RawValue::float(3.5));
        let v: RawValue = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(v, RawValue::text("up"));
    }
}
