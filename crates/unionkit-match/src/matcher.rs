//! Full-match dispatch.
//!
//! A [`Matcher`] is an arm set over one union type, checked for
//! completeness when it is built. `dispatch` is total: the only runtime
//! branch is which handler runs, never whether one exists.
//!
//! Arms are tried in declaration order and the first matching arm wins.
//! Since full-match mode rejects duplicate arms, order is observable only
//! through the catch-all, which is last by construction (`otherwise`
//! consumes the builder) and matches exactly the variants with no arm of
//! their own.

use crate::coverage;
use crate::error::NonExhaustiveMatch;
use std::sync::Arc;
use unionkit_core::{UnionType, UnionValue};

type Handler<'h, R> = Box<dyn Fn(&UnionValue) -> R + 'h>;

/// A completeness-checked arm set over one union type.
pub struct Matcher<'h, R> {
    ty: Arc<UnionType>,
    arms: Vec<(usize, Handler<'h, R>)>,
    catch_all: Option<Handler<'h, R>>,
}

/// Accumulates arms in declaration order; nothing is checked until
/// [`finish`](MatcherBuilder::finish) or
/// [`otherwise`](MatcherBuilder::otherwise).
pub struct MatcherBuilder<'h, R> {
    ty: Arc<UnionType>,
    arms: Vec<(String, Handler<'h, R>)>,
}

impl<'h, R> std::fmt::Debug for Matcher<'h, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("ty", &self.ty)
            .field("arms", &self.arms.len())
            .field("catch_all", &self.catch_all.is_some())
            .finish()
    }
}

impl<'h, R> Matcher<'h, R> {
    /// Start an arm set over `ty`.
    pub fn over(ty: &Arc<UnionType>) -> MatcherBuilder<'h, R> {
        MatcherBuilder {
            ty: Arc::clone(ty),
            arms: Vec::new(),
        }
    }

    /// Run the arm matching `value`'s variant.
    ///
    /// Total by construction. Panics only if `value` belongs to a
    /// different union type than this matcher was built over — a caller
    /// contract, not a dispatch outcome.
    pub fn dispatch(&self, value: &UnionValue) -> R {
        assert_eq!(
            value.type_name(),
            self.ty.name(),
            "dispatched a `{}` value through a `{}` matcher",
            value.type_name(),
            self.ty.name(),
        );
        let index = value.variant_index();
        for (arm_index, handler) in &self.arms {
            if *arm_index == index {
                return handler(value);
            }
        }
        match &self.catch_all {
            Some(handler) => handler(value),
            None => unreachable!("completeness verified when the matcher was built"),
        }
    }
}

impl<'h, R> MatcherBuilder<'h, R> {
    /// Add an arm for `tag`. Unknown tags and duplicates are reported by
    /// `finish`/`otherwise`, keeping all definition errors in one place.
    pub fn arm(mut self, tag: impl Into<String>, handler: impl Fn(&UnionValue) -> R + 'h) -> Self {
        self.arms.push((tag.into(), Box::new(handler)));
        self
    }

    /// Check completeness and seal the arm set.
    ///
    /// Fails with [`NonExhaustiveMatch`] when a variant has no arm: this
    /// is the one-time check, and the returned `Matcher` is its cached
    /// proof.
    pub fn finish(self) -> Result<Matcher<'h, R>, NonExhaustiveMatch> {
        self.seal(None)
    }

    /// Install a catch-all for every variant without an arm, and seal.
    ///
    /// Consuming the builder keeps the catch-all last by construction.
    /// Fails when the catch-all could never match, or on unknown or
    /// duplicate arms.
    pub fn otherwise(
        self,
        handler: impl Fn(&UnionValue) -> R + 'h,
    ) -> Result<Matcher<'h, R>, NonExhaustiveMatch> {
        self.seal(Some(Box::new(handler)))
    }

    fn seal(self, catch_all: Option<Handler<'h, R>>) -> Result<Matcher<'h, R>, NonExhaustiveMatch> {
        let claimed: Vec<String> = self.arms.iter().map(|(tag, _)| tag.clone()).collect();
        coverage::check(&self.ty, &claimed, catch_all.is_some())?;
        let arms = self
            .arms
            .into_iter()
            .map(|(tag, handler)| {
                let index = self
                    .ty
                    .index_of(&tag)
                    .expect("arm tags verified by the coverage check");
                (index, handler)
            })
            .collect();
        Ok(Matcher {
            ty: self.ty,
            arms,
            catch_all,
        })
    }
}
