//! Provides [EmptyZero], a [zero predicate](ZeroPredicate) for collection types where the zero
//! value is an empty collection.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::{MapValue, ZeroPredicate};

/// A [zero predicate](ZeroPredicate) for collection types, where the zero value is an empty
/// collection.
///
/// In most cases, this predicate behaves the same as [DefaultZero][super::DefaultZero] because
/// typical collection types' implementations of [Default::default] yield empty collections.
/// However, this predicate avoids the need for [PartialEq] and [Default] bounds on the collection
/// type, and on its elements.
pub struct EmptyZero(());

macro_rules! impl_empty {
    ({$($generics:tt)*}, $Coll:ty $(,)?) => {
        impl<$($generics)*> ZeroPredicate<$Coll> for EmptyZero {
            fn is_zero(value: &$Coll) -> bool {
                value.is_empty()
            }
        }
    };
}

impl_empty!({ T }, Vec<T>);
impl_empty!({ T }, [T]);
impl_empty!({ T }, VecDeque<T>);
impl_empty!({ T, S }, HashSet<T, S>);
impl_empty!({ K, V, S }, HashMap<K, V, S>);
impl_empty!({ T }, BTreeSet<T>);
impl_empty!({ K, V }, BTreeMap<K, V>);
impl_empty!({}, String);
impl_empty!({}, str);
impl_empty!({}, MapValue);
