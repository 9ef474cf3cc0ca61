//! The completeness checker.
//!
//! One function, shared by match sets, transition tables, and equality
//! specifications, so all three obey the same law: cover every variant of
//! the closed set exactly once, or cover a strict subset and let exactly
//! one catch-all absorb the remainder.
//!
//! The check runs once, when a dispatch structure is built. The built
//! structure is the cached result — holding a `Matcher` is holding proof
//! of exhaustiveness, and dispatch through it is total.

use crate::error::NonExhaustiveMatch;
use std::collections::BTreeSet;
use unionkit_core::UnionType;

/// Verify that `claimed` covers `ty`.
///
/// - every claimed tag must name a variant of `ty`;
/// - no tag may be claimed twice;
/// - without a catch-all, every variant must be claimed;
/// - with a catch-all, at least one variant must be left for it.
pub fn check(
    ty: &UnionType,
    claimed: &[String],
    has_catch_all: bool,
) -> Result<(), NonExhaustiveMatch> {
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for tag in claimed {
        if ty.index_of(tag).is_none() {
            return Err(NonExhaustiveMatch::UnknownVariant {
                type_name: ty.name().to_string(),
                tag: tag.clone(),
            });
        }
        if !seen.insert(tag.clone()) {
            return Err(NonExhaustiveMatch::DuplicateArm {
                type_name: ty.name().to_string(),
                tag: tag.clone(),
            });
        }
    }

    if has_catch_all {
        if seen.len() == ty.len() {
            return Err(NonExhaustiveMatch::UnreachableCatchAll {
                type_name: ty.name().to_string(),
            });
        }
        return Ok(());
    }

    let missing: Vec<String> = ty
        .tags()
        .filter(|tag| !seen.contains(*tag))
        .map(str::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(NonExhaustiveMatch::MissingVariants {
            type_name: ty.name().to_string(),
            missing,
        })
    }
}
