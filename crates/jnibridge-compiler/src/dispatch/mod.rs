//! Planning of generated runtime dispatch chains.
//!
//! - [`polymorphic`]: safe downcasts of opaque handles to their most specific
//!   known type
//! - [`exception`]: translation of native exceptions to managed ones, most
//!   specific target first

pub mod exception;
pub mod polymorphic;

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use jnibridge_core::JavaPath;
use jnibridge_registry::TypeHierarchy;

pub use exception::{ExceptionPlan, PlannedException};
pub use polymorphic::{DispatchCandidate, DispatchFlavor, DispatchShape, PolymorphicPlan};

/// Order `items` so that every subtype precedes its supertypes.
///
/// Unrelated items are ordered by binary name, which makes the result a total
/// order on any acyclic hierarchy. Items on a cycle keep name order at the end.
pub fn most_derived_first<T>(
    items: Vec<T>,
    path_of: impl Fn(&T) -> &JavaPath,
    hierarchy: &TypeHierarchy,
) -> Vec<T> {
    let n = items.len();
    let mut supertypes: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut pending = vec![0usize; n];
    for (a, item_a) in items.iter().enumerate() {
        for (b, item_b) in items.iter().enumerate() {
            if a != b && hierarchy.is_strict_subtype(path_of(item_a), path_of(item_b)) {
                supertypes[a].push(b);
                pending[b] += 1;
            }
        }
    }

    let mut order = Vec::with_capacity(n);
    {
        let mut ready: BinaryHeap<Reverse<(&JavaPath, usize)>> = (0..n)
            .filter(|&i| pending[i] == 0)
            .map(|i| Reverse((path_of(&items[i]), i)))
            .collect();
        while let Some(Reverse((_, i))) = ready.pop() {
            order.push(i);
            for &sup in &supertypes[i] {
                pending[sup] -= 1;
                if pending[sup] == 0 {
                    ready.push(Reverse((path_of(&items[sup]), sup)));
                }
            }
        }

        if order.len() < n {
            let mut rest: Vec<usize> = (0..n).filter(|&i| pending[i] > 0).collect();
            rest.sort_by(|&a, &b| path_of(&items[a]).cmp(path_of(&items[b])));
            order.extend(rest);
        }
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}
