//! Grouped descriptive statistics over experiment records
//!
//! Each aggregator folds the record sequence into an ordered map keyed by
//! an immutable tuple of the grouping fields. Output rows are emitted in
//! ascending key order, so identical input always yields identical tables
//! regardless of record order.
//!
//! - [`QualityAggregator`]: `(heuristic, n, m, alfa)` → objective value
//!   dispersion, mean time, mean iterations
//! - [`ScalabilityAggregator`]: `(n, m, heuristic, alfa)` → mean time and
//!   mean value, tagged with size classes

mod quality;
mod scalability;
pub mod stats;

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

pub use quality::{QualityAggregator, QualitySummaryRow};
pub use scalability::{ScalabilityAggregator, ScalabilityRow};

/// Fold items into non-empty groups.
///
/// `init` seeds a group from its first member, `update` absorbs every
/// later member, so no accumulator ever exists without an observation.
pub(crate) fn fold_groups<'a, T, K, A>(
    items: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
    init: impl Fn(&T) -> A,
    mut update: impl FnMut(&mut A, &T),
) -> BTreeMap<K, A>
where
    T: 'a,
    K: Ord,
{
    let mut groups = BTreeMap::new();
    for item in items {
        match groups.entry(key(item)) {
            Entry::Vacant(slot) => {
                slot.insert(init(item));
            }
            Entry::Occupied(mut slot) => update(slot.get_mut(), item),
        }
    }
    groups
}
