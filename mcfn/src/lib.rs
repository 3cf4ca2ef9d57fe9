//! Exhaustive enumeration of metastability-containing boolean functions.
//!
//! A function f: B^n -> B^m is metastability-containing when flipping any
//! single input bit changes at most one output bit. This crate enumerates all
//! such functions for given pin counts, restricted to one canonical
//! representative per equivalence class: f(0) = 0, every input pin relevant,
//! every output pin non-constant, all output pins pairwise distinct and
//! ordered by the input pattern of their first activation.
//!
//! The function image doubles as a big multi-radix counter. Instead of
//! visiting every point of the space, each necessary property is tracked by an
//! incremental [`analyze::Analyzer`] that reports the most significant counter
//! digit which has to change before the property can hold again, letting the
//! [`search`] driver skip the whole range of candidates below that digit.
#![deny(unsafe_code)]

pub mod analyze;
pub mod function;
pub mod search;

pub use function::{BitAddress, Function, MAX_BITS};
pub use search::{enumerate, SearchOptions, SearchStats};
