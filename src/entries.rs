//! Provides [ZeroEntries], the map operations needed to find and discard zero-valued entries.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use crate::{value::ValueZero, MapValue, Value, ZeroPredicate};

/// A map whose zero-valued entries can be detected and discarded.
///
/// What counts as zero is decided by the [ZeroPredicate] `Z` given to each method, so the same map
/// type can be filtered under different notions of zero.
pub trait ZeroEntries: Sized {
    /// The type of the map's values.
    type Value;

    /// Returns the number of entries in the map.
    fn entry_count(&self) -> usize;

    /// Returns true if at least one entry's value is zero under `Z`. Stops at the first one found.
    fn has_zero_values<Z: ZeroPredicate<Self::Value>>(&self) -> bool;

    /// Returns a new map of the same type holding only the entries whose value is not zero under
    /// `Z`. The map itself is left untouched.
    fn without_zero_values<Z: ZeroPredicate<Self::Value>>(&self) -> Self;
}

impl<K, V, S> ZeroEntries for HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher + Clone,
{
    type Value = V;
    fn entry_count(&self) -> usize {
        self.len()
    }
    fn has_zero_values<Z: ZeroPredicate<V>>(&self) -> bool {
        self.values().any(Z::is_zero)
    }
    fn without_zero_values<Z: ZeroPredicate<V>>(&self) -> Self {
        let mut out = HashMap::with_hasher(self.hasher().clone());
        out.extend(
            self.iter().filter(|(_, v)| !Z::is_zero(v)).map(|(k, v)| (k.clone(), v.clone())),
        );
        out
    }
}

impl<K, V> ZeroEntries for BTreeMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Value = V;
    fn entry_count(&self) -> usize {
        self.len()
    }
    fn has_zero_values<Z: ZeroPredicate<V>>(&self) -> bool {
        self.values().any(Z::is_zero)
    }
    fn without_zero_values<Z: ZeroPredicate<V>>(&self) -> Self {
        self.iter().filter(|(_, v)| !Z::is_zero(v)).map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl ZeroEntries for MapValue {
    type Value = Value;
    fn entry_count(&self) -> usize {
        self.len()
    }
    fn has_zero_values<Z: ZeroPredicate<Value>>(&self) -> bool {
        self.values().any(Z::is_zero)
    }
    fn without_zero_values<Z: ZeroPredicate<Value>>(&self) -> Self {
        self.filtered(|v| !Z::is_zero(v))
    }
}

impl MapValue {
    /// Returns true if at least one entry's value is the zero value of the map's value type.
    pub fn has_zero_values(&self) -> bool {
        ZeroEntries::has_zero_values::<ValueZero>(self)
    }
    /// Returns a new map of the same type without the entries whose value is zero.
    pub fn without_zero_values(&self) -> Self {
        ZeroEntries::without_zero_values::<ValueZero>(self)
    }
}

// --------------------------------------------------------------------------
