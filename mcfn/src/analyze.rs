//! Incremental per-property checkers driving the pruned enumeration.
//!
//! Each analyzer represents one criterion a function needs to fulfill. The
//! analyzers are not as independent as they may seem: output canonicalization
//! sometimes (and inconsistently) rules out candidates that also violate
//! metastability containment. Dropping one analyzer from the driver can
//! therefore skip more (or fewer) functions than its own property accounts
//! for.

use crate::function::{BitAddress, Function};

mod input_relevance;
mod metastability;
mod output_order;

pub use input_relevance::InputRelevance;
pub use metastability::MetastabilityContaining;
pub use output_order::{can_fit, OutputOrdered};

/// An incremental checker for one necessary property of the target function.
///
/// Analyzers retain state between invocations, which is why this is a trait
/// with exclusive-reference methods rather than a plain function.
pub trait Analyzer {
    /// Checks the candidate, resuming from the most significant place that
    /// changed since the last invocation (0 if there was no last invocation,
    /// which fits as the same case).
    ///
    /// The analyzer may assume that all places below `first_changed` still
    /// hold the values it has already seen, and must discard any cached fact
    /// supported by a place at or beyond `first_changed`. It returns the most
    /// significant place that has to be increased before the property can
    /// hold -- or a satisfied address if the candidate fulfills the property
    /// as is.
    fn analyze(&mut self, f: &Function, first_changed: u32) -> BitAddress;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}
