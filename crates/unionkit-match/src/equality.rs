//! Equality specifications.
//!
//! Raw-backed union types need nothing here: two of their values are equal
//! exactly when their raw values are equal, which structural comparison
//! (`UnionValue: PartialEq`) already gives, since raw values are unique
//! per variant.
//!
//! Payload-backed types get an explicit, per-type [`EqSpec`]: a comparator
//! per variant for same-tag pairs, with cross-tag pairs unequal always.
//! The spec is subject to the same coverage law as dispatch — a variant
//! with no comparator and no fallback is a build-time
//! [`NonExhaustiveMatch`], not a silent `false`.

use crate::coverage;
use crate::error::NonExhaustiveMatch;
use std::sync::Arc;
use unionkit_core::{UnionType, UnionValue};

type Cmp<'h> = Box<dyn Fn(&UnionValue, &UnionValue) -> bool + 'h>;

enum Rule<'h> {
    /// Field-by-field equality, recursing into children structurally.
    Structural,
    Custom(Cmp<'h>),
}

/// A completeness-checked equality function over one union type.
pub struct EqSpec<'h> {
    ty: Arc<UnionType>,
    /// One rule per variant index. `None` only when the spec was sealed
    /// with `otherwise_unequal`, which makes the remainder compare false.
    rules: Vec<Option<Rule<'h>>>,
}

/// Accumulates per-variant comparators; checked at seal time.
pub struct EqSpecBuilder<'h> {
    ty: Arc<UnionType>,
    arms: Vec<(String, Rule<'h>)>,
}

impl<'h> std::fmt::Debug for EqSpec<'h> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqSpec")
            .field("ty", &self.ty)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<'h> EqSpec<'h> {
    /// Start an equality specification over `ty`.
    pub fn over(ty: &Arc<UnionType>) -> EqSpecBuilder<'h> {
        EqSpecBuilder {
            ty: Arc::clone(ty),
            arms: Vec::new(),
        }
    }

    /// Evaluate the specification. Total once built.
    ///
    /// Values of a different union type, or of different variants, are
    /// never equal; same-variant pairs go through the variant's rule.
    pub fn eval(&self, a: &UnionValue, b: &UnionValue) -> bool {
        if a.type_name() != self.ty.name() || b.type_name() != self.ty.name() {
            return false;
        }
        if a.variant_index() != b.variant_index() {
            return false;
        }
        match &self.rules[a.variant_index()] {
            Some(Rule::Structural) => a.payload() == b.payload(),
            Some(Rule::Custom(cmp)) => cmp(a, b),
            None => false,
        }
    }
}

impl<'h> EqSpecBuilder<'h> {
    /// Register a custom same-tag comparator for `tag`. The comparator
    /// only ever sees two values of that variant.
    pub fn variant(
        mut self,
        tag: impl Into<String>,
        cmp: impl Fn(&UnionValue, &UnionValue) -> bool + 'h,
    ) -> Self {
        self.arms.push((tag.into(), Rule::Custom(Box::new(cmp))));
        self
    }

    /// Register recursive field-by-field equality for `tag`.
    pub fn structural(mut self, tag: impl Into<String>) -> Self {
        self.arms.push((tag.into(), Rule::Structural));
        self
    }

    /// Check coverage and seal. A variant with no rule fails with
    /// [`NonExhaustiveMatch`] — the same law dispatch obeys.
    pub fn finish(self) -> Result<EqSpec<'h>, NonExhaustiveMatch> {
        self.seal(false)
    }

    /// Seal with an explicit "else not equal" fallback: variants with no
    /// rule compare unequal even to themselves. The fallback counts as
    /// the catch-all for coverage purposes.
    pub fn otherwise_unequal(self) -> Result<EqSpec<'h>, NonExhaustiveMatch> {
        self.seal(true)
    }

    fn seal(self, fallback: bool) -> Result<EqSpec<'h>, NonExhaustiveMatch> {
        let claimed: Vec<String> = self.arms.iter().map(|(tag, _)| tag.clone()).collect();
        coverage::check(&self.ty, &claimed, fallback)?;
        let mut rules: Vec<Option<Rule<'h>>> = Vec::new();
        rules.resize_with(self.ty.len(), || None);
        for (tag, rule) in self.arms {
            let index = self
                .ty
                .index_of(&tag)
                .expect("rule tags verified by the coverage check");
            rules[index] = Some(rule);
        }
        Ok(EqSpec { ty: self.ty, rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unionkit_core::{FieldType, Payload, UnionTypeBuilder};

    fn shape() -> Arc<UnionType> {
        UnionTypeBuilder::new("shape")
            .variant_fields("circle", [("center", FieldType::Text), ("radius", FieldType::Int)])
            .variant_fields("square", [("pos", FieldType::Text), ("size", FieldType::Int)])
            .define()
            .unwrap()
    }

    fn circle(ty: &Arc<UnionType>, center: &str, radius: i64) -> UnionValue {
        ty.construct("circle", Payload::tuple([unionkit_core::FieldValue::from(center), radius.into()]))
            .unwrap()
    }

    fn square(ty: &Arc<UnionType>, pos: &str, size: i64) -> UnionValue {
        ty.construct("square", Payload::tuple([unionkit_core::FieldValue::from(pos), size.into()]))
            .unwrap()
    }

    #[test]
    fn structural_equality_matrix() {
        let ty = shape();
        let eq = EqSpec::over(&ty)
            .structural("circle")
            .structural("square")
            .finish()
            .unwrap();

        assert!(eq.eval(&circle(&ty, "p", 5), &circle(&ty, "p", 5)));
        assert!(!eq.eval(&circle(&ty, "p", 5), &circle(&ty, "p", 6)));
        // Same payload, different tag: never equal.
        assert!(!eq.eval(&circle(&ty, "p", 5), &square(&ty, "p", 5)));
    }

    #[test]
    fn missing_variant_rule_fails_at_build() {
        let ty = shape();
        let err = EqSpec::over(&ty).structural("circle").finish().unwrap_err();
        assert_eq!(
            err,
            NonExhaustiveMatch::MissingVariants {
                type_name: "shape".into(),
                missing: vec!["square".into()],
            }
        );
    }

    #[test]
    fn fallback_covers_the_remainder_as_unequal() {
        let ty = shape();
        let eq = EqSpec::over(&ty)
            .structural("circle")
            .otherwise_unequal()
            .unwrap();
        assert!(eq.eval(&circle(&ty, "p", 5), &circle(&ty, "p", 5)));
        // No rule for square: unequal even to itself.
        assert!(!eq.eval(&square(&ty, "p", 5), &square(&ty, "p", 5)));
    }

    #[test]
    fn custom_comparator_runs_on_same_tag_pairs_only() {
        let ty = shape();
        // Circles compare by radius alone; position is ignored.
        let eq = EqSpec::over(&ty)
            .variant("circle", |a, b| a.field_named("radius") == b.field_named("radius"))
            .structural("square")
            .finish()
            .unwrap();
        assert!(eq.eval(&circle(&ty, "p", 5), &circle(&ty, "q", 5)));
        assert!(!eq.eval(&circle(&ty, "p", 5), &square(&ty, "p", 5)));
    }

    #[test]
    fn structural_rules_agree_with_value_equality() {
        let ty = shape();
        let eq = EqSpec::over(&ty)
            .structural("circle")
            .structural("square")
            .finish()
            .unwrap();
        let values = [circle(&ty, "p", 5), circle(&ty, "p", 6), square(&ty, "p", 5)];
        for a in &values {
            for b in &values {
                assert_eq!(eq.eval(a, b), a == b);
            }
        }
    }

    #[test]
    fn foreign_types_are_never_equal() {
        let ty = shape();
        let other = UnionTypeBuilder::new("marker").variant("here").define().unwrap();
        let eq = EqSpec::over(&ty)
            .structural("circle")
            .structural("square")
            .finish()
            .unwrap();
        assert!(!eq.eval(&circle(&ty, "p", 5), &other.make("here").unwrap()));
    }
}
