//! Mutating transitions.
//!
//! A [`TransitionTable`] is a pure tag→tag function over one union type,
//! plus an in-place applier. It is the only sanctioned mutation of a
//! [`UnionValue`]: the discriminant is replaced whole, payloads are never
//! patched. Both endpoints of every step must therefore be payload-less,
//! and since the table must cover every variant (the shared coverage law),
//! a table only exists over fully payload-less types.
//!
//! `advance` takes `&mut UnionValue`; exclusive access comes from the
//! borrow checker, not from any internal locking.

use crate::coverage;
use crate::error::TransitionError;
use std::sync::Arc;
use unionkit_core::{UnionType, UnionValue};

/// A completeness-checked transition table.
#[derive(Debug)]
pub struct TransitionTable {
    ty: Arc<UnionType>,
    /// Successor variant index, indexed by variant index. Fully populated:
    /// coverage requires every variant to be a source exactly once.
    next: Vec<usize>,
}

/// Accumulates steps; checked by [`finish`](TransitionBuilder::finish).
pub struct TransitionBuilder {
    ty: Arc<UnionType>,
    steps: Vec<(String, String)>,
}

impl TransitionTable {
    /// Start a transition table over `ty`.
    pub fn over(ty: &Arc<UnionType>) -> TransitionBuilder {
        TransitionBuilder {
            ty: Arc::clone(ty),
            steps: Vec::new(),
        }
    }

    /// The pure half: the successor of `tag`, or `None` for an unknown tag.
    pub fn next_tag(&self, tag: &str) -> Option<&str> {
        let index = self.ty.index_of(tag)?;
        let next = self.ty.variant_at(self.next[index])?;
        Some(&next.tag)
    }

    /// Advance `value` one step, replacing its discriminant in place.
    ///
    /// Total: the table covers every variant. Panics only when `value`
    /// belongs to a different union type.
    pub fn advance(&self, value: &mut UnionValue) {
        assert_eq!(
            value.type_name(),
            self.ty.name(),
            "advanced a `{}` value through a `{}` transition table",
            value.type_name(),
            self.ty.name(),
        );
        let next = self.next[value.variant_index()];
        let tag = &self
            .ty
            .variant_at(next)
            .expect("successor indices are in range by construction")
            .tag;
        value
            .set_variant(tag)
            .expect("transition endpoints are payload-less by construction");
    }
}

impl TransitionBuilder {
    /// Declare that `from` steps to `to`.
    pub fn step(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.steps.push((from.into(), to.into()));
        self
    }

    /// Check the table and seal it.
    ///
    /// Sources must cover every variant exactly once (the shared coverage
    /// law — a value must never reach a state the table cannot advance),
    /// targets must exist, and every endpoint must be payload-less.
    pub fn finish(self) -> Result<TransitionTable, TransitionError> {
        let sources: Vec<String> = self.steps.iter().map(|(from, _)| from.clone()).collect();
        coverage::check(&self.ty, &sources, false)?;

        let mut next = vec![0usize; self.ty.len()];
        for (from, to) in &self.steps {
            for tag in [from, to] {
                let variant = self.ty.variant(tag).ok_or_else(|| {
                    TransitionError::Coverage(crate::error::NonExhaustiveMatch::UnknownVariant {
                        type_name: self.ty.name().to_string(),
                        tag: tag.clone(),
                    })
                })?;
                if !variant.shape.is_none() {
                    return Err(TransitionError::PayloadCarrying {
                        type_name: self.ty.name().to_string(),
                        tag: tag.clone(),
                    });
                }
            }
            let from_index = self
                .ty
                .index_of(from)
                .expect("sources verified by the coverage check");
            let to_index = self.ty.index_of(to).expect("target existence checked above");
            next[from_index] = to_index;
        }

        Ok(TransitionTable { ty: self.ty, next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NonExhaustiveMatch;
    use unionkit_core::{FieldType, RawValue, ScalarKind, UnionTypeBuilder};

    fn light() -> Arc<UnionType> {
        UnionTypeBuilder::new("light")
            .raw(ScalarKind::Int)
            .variant("off")
            .variant("low")
            .variant("high")
            .define()
            .unwrap()
    }

    #[test]
    fn three_step_cycle_returns_to_start() {
        let ty = light();
        let table = TransitionTable::over(&ty)
            .step("off", "low")
            .step("low", "high")
            .step("high", "off")
            .finish()
            .unwrap();

        let mut v = ty.make("off").unwrap();
        table.advance(&mut v);
        assert_eq!(v.tag(), "low");
        table.advance(&mut v);
        assert_eq!(v.tag(), "high");
        table.advance(&mut v);
        assert_eq!(v.tag(), "off");
    }

    #[test]
    fn raw_value_follows_the_discriminant() {
        let ty = light();
        let table = TransitionTable::over(&ty)
            .step("off", "low")
            .step("low", "high")
            .step("high", "off")
            .finish()
            .unwrap();

        let mut v = ty.make("off").unwrap();
        table.advance(&mut v);
        assert_eq!(v.raw_value(), Some(&RawValue::int(1)));
    }

    #[test]
    fn next_tag_is_pure() {
        let ty = light();
        let table = TransitionTable::over(&ty)
            .step("off", "low")
            .step("low", "high")
            .step("high", "off")
            .finish()
            .unwrap();
        assert_eq!(table.next_tag("high"), Some("off"));
        assert_eq!(table.next_tag("dim"), None);
    }

    #[test]
    fn missing_source_fails_at_build() {
        let ty = light();
        let err = TransitionTable::over(&ty)
            .step("off", "low")
            .finish()
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::Coverage(NonExhaustiveMatch::MissingVariants {
                type_name: "light".into(),
                missing: vec!["low".into(), "high".into()],
            })
        );
    }

    #[test]
    fn duplicate_source_fails_at_build() {
        let ty = light();
        let err = TransitionTable::over(&ty)
            .step("off", "low")
            .step("off", "high")
            .step("low", "off")
            .step("high", "off")
            .finish()
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::Coverage(NonExhaustiveMatch::DuplicateArm {
                type_name: "light".into(),
                tag: "off".into(),
            })
        );
    }

    #[test]
    fn payload_carrying_endpoint_fails_at_build() {
        let ty = UnionTypeBuilder::new("job")
            .variant("idle")
            .variant_single("running", FieldType::Int)
            .define()
            .unwrap();
        let err = TransitionTable::over(&ty)
            .step("idle", "running")
            .step("running", "idle")
            .finish()
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::PayloadCarrying { type_name: "job".into(), tag: "running".into() }
        );
    }
}
