//! Multi-axis coordinates
//!
//! Tuples of `Domain1D` points are N-dimensional `Domain`s. Ordering of the
//! tuple is lexicographic (derived), per-axis access goes through the axis
//! index.

use std::cmp::Ordering;

use super::{Domain, Domain1D};

macro_rules! impl_domain_for_tuple {
    ($arity:expr; $($name:ident : $idx:tt),+) => {
        impl<$($name: Domain1D),+> Domain for ($($name,)+) {
            const ARITY: usize = $arity;

            fn bottom() -> Self {
                ($(<$name as Domain1D>::bottom(),)+)
            }

            fn top() -> Self {
                ($(<$name as Domain1D>::top(),)+)
            }

            fn right_adjacent(&self) -> Self {
                ($(Domain1D::right_adjacent(&self.$idx),)+)
            }

            fn left_adjacent(&self) -> Self {
                ($(Domain1D::left_adjacent(&self.$idx),)+)
            }

            fn axis_cmp(&self, other: &Self, axis: usize) -> Ordering {
                match axis {
                    $($idx => self.$idx.cmp(&other.$idx),)+
                    _ => panic!("axis {} out of range for arity {}", axis, $arity),
                }
            }

            fn with_axis(&self, axis: usize, source: &Self) -> Self {
                let mut out = self.clone();
                match axis {
                    $($idx => out.$idx = source.$idx.clone(),)+
                    _ => panic!("axis {} out of range for arity {}", axis, $arity),
                }
                out
            }

            fn is_unbounded_on(&self, axis: usize) -> bool {
                match axis {
                    $($idx => Domain1D::is_unbounded(&self.$idx),)+
                    _ => panic!("axis {} out of range for arity {}", axis, $arity),
                }
            }

            fn ordered_hashes(&self) -> Vec<f64> {
                vec![$(Domain1D::ordered_hash(&self.$idx)),+]
            }
        }
    };
}

impl_domain_for_tuple!(1; A: 0);
impl_domain_for_tuple!(2; A: 0, B: 1);
impl_domain_for_tuple!(3; A: 0, B: 1, C: 2);
impl_domain_for_tuple!(4; A: 0, B: 1, C: 2, D: 3);
impl_domain_for_tuple!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
