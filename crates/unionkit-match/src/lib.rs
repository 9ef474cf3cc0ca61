//! # Unionkit Match
//!
//! Exhaustive dispatch over `unionkit-core` types. Three structures, one
//! law: cover every variant of the closed set exactly once, or cover a
//! strict subset and let exactly one catch-all absorb the remainder.
//!
//! ```text
//! coverage::check        ← The shared completeness law
//!     │
//! Matcher                ← Arm set → handler dispatch, total once built
//!     │
//! TransitionTable        ← tag→tag replacement, the one sanctioned mutation
//!     │
//! EqSpec                 ← Per-type equality, same coverage law
//! ```
//!
//! Every structure runs its completeness check exactly once, when it is
//! built; the built structure is the cached proof, and running it has no
//! failure path. Single-pattern probes — "does this value have this one
//! shape" — never need any of this and live on
//! [`UnionValue`](unionkit_core::UnionValue) itself (`is`, `cells_if`,
//! `map_if`).

pub mod coverage;
pub mod equality;
pub mod error;
pub mod matcher;
pub mod transition;

pub use equality::{EqSpec, EqSpecBuilder};
pub use error::{NonExhaustiveMatch, TransitionError};
pub use matcher::{Matcher, MatcherBuilder};
pub use transition::{TransitionBuilder, TransitionTable};
