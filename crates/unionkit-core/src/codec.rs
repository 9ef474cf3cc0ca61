//! Raw-value lookup.
//!
//! The failable half of the raw-value codec. Lookups return `Option`:
//! absence of a matching variant is an expected outcome callers branch on,
//! never an error that unwinds. The resolving direction lives on the value
//! itself ([`UnionValue::raw_value`](crate::value::UnionValue::raw_value))
//! and is total for raw-backed types.

use crate::scalar::RawValue;
use crate::schema::UnionType;
use crate::value::UnionValue;
use std::sync::Arc;

impl UnionType {
    /// Look up the variant backed by `raw` and construct its value.
    ///
    /// `None` when no variant of this type resolves to `raw` — including
    /// every lookup against a payload-backed type, whose table is empty.
    pub fn from_raw(self: &Arc<Self>, raw: &RawValue) -> Option<UnionValue> {
        let tag = self.raw_table.get(raw)?;
        // Raw-backed variants are payload-less by the backing exclusivity
        // check, so construction cannot fail.
        self.make(tag).ok()
    }

    /// Look up through a caller-supplied coercion: `text` is adapted into
    /// a raw value first, then resolved as [`from_raw`](Self::from_raw).
    ///
    /// The coercion is the pluggable seam for domain-specific
    /// representations (say, `"28.5, 53.2"` parsed into a scalar by a
    /// geometry layer). The core neither validates nor caches it.
    pub fn from_coerced(
        self: &Arc<Self>,
        text: &str,
        coerce: impl Fn(&str) -> Option<RawValue>,
    ) -> Option<UnionValue> {
        self.from_raw(&coerce(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::UnionTypeBuilder;
    use crate::scalar::ScalarKind;
    use crate::schema::FieldType;

    fn planet() -> Arc<UnionType> {
        UnionTypeBuilder::new("planet")
            .raw(ScalarKind::Int)
            .variant_raw("mercury", RawValue::int(1))
            .variant("venus")
            .variant("earth")
            .variant("mars")
            .define()
            .unwrap()
    }

    #[test]
    fn round_trip() {
        let planet = planet();
        for (tag, raw) in planet.raw_pairs() {
            let v = planet.from_raw(raw).unwrap();
            assert_eq!(v.tag(), tag);
            assert_eq!(v.raw_value(), Some(raw));
        }
    }

    #[test]
    fn absence_is_none_not_an_error() {
        let planet = planet();
        assert!(planet.from_raw(&RawValue::int(9)).is_none());
        // Wrong kind entirely: still just absent.
        assert!(planet.from_raw(&RawValue::text("mars")).is_none());
    }

    #[test]
    fn payload_backed_types_have_empty_tables() {
        let expr = UnionTypeBuilder::new("expr")
            .variant_single("num", FieldType::Int)
            .define()
            .unwrap();
        assert!(expr.from_raw(&RawValue::int(0)).is_none());
        let v = expr.construct("num", crate::value::Payload::single(0i64)).unwrap();
        assert_eq!(v.raw_value(), None);
    }

    #[test]
    fn coercion_runs_before_lookup() {
        let planet = planet();
        let trim_ordinal = |s: &str| s.strip_suffix("th").and_then(|n| n.parse().ok()).map(RawValue::Int);

        let v = planet.from_coerced("3rd", trim_ordinal);
        assert!(v.is_none()); // coercion itself failed

        let v = planet.from_coerced("4th", trim_ordinal).unwrap();
        assert_eq!(v.tag(), "mars");
    }
}
