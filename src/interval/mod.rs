//! Interval algebra for disjoint
//!
//! An interval is a start/end pair of `Domain` points with `start <= end` on
//! every axis. All operations are computed per axis and then combined, so the
//! same code serves one axis or five.
//!
//! # Operations
//!
//! - `intersection_with`, `joined_with`, `gap_with`
//! - `is_left_adjacent_to`, `is_right_adjacent_to`, `is_adjacent_to`
//! - `excluding_on` (per-axis None/Single/Split), `excluding`, `separate_using`
//! - `compress_all` / `compress_by_value` on collections
//!
//! # Invariants
//!
//! - Every constructed interval satisfies `start <= end` on every axis
//! - `intersection_with(b)` plus `excluding(b)` reconstitutes `self` exactly,
//!   with no overlap and no gap

mod algebra;
mod compress;
mod errors;
mod remainder;

pub use algebra::Interval;
pub use compress::compress_by_value;
pub use errors::{IntervalError, IntervalResult};
pub use remainder::Remainder;
