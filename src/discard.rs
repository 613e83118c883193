//! Discarding map entries with a zero value.

use tracing::trace;

use crate::{
    cmp::{CmpOption, FilterTransform, OptionKind},
    value::ValueZero,
    Value, ZeroEntries, ZeroPredicate,
};

/// Returns an option that discards all map entries with a zero value, so that two maps are
/// compared as if entries associated with the zero value were absent.
///
/// The option applies wherever both sides are maps of the same type, they are not both empty, and
/// at least one of them has a zero-valued entry. It can be combined with
/// [equate_empty](crate::equate_empty), in which case a map holding only zero values also equals
/// an empty or absent map. It cannot be combined with [sort_maps](crate::sort_maps);
/// [Options::new](crate::Options::new) rejects that combination.
pub fn discard_map_zeros() -> CmpOption {
    const DISCARD_ZEROS: FilterTransform =
        FilterTransform::new("DiscardZeros", either_has_zero_values, strip_zero_values)
            .incompatible_with(&[OptionKind::SortMaps]);
    CmpOption::Transform(DISCARD_ZEROS)
}

/// Returns true if `x` and `y` are both present, are maps of exactly the same type holding at least
/// one entry between them, and at least one of them has an entry whose value is zero.
pub fn either_has_zero_values(x: Option<&Value>, y: Option<&Value>) -> bool {
    let (Some(Value::Map(x)), Some(Value::Map(y))) = (x, y) else {
        return false;
    };
    if x.key_type() != y.key_type() || x.value_type() != y.value_type() {
        return false;
    }
    let applies = either_has_zeros::<_, ValueZero>(Some(x), Some(y));
    trace!(map_type = %x.map_type(), applies, "checked maps for zero-valued entries");
    applies
}

/// Returns a copy of the map `v` without the entries whose value is zero.
///
/// Only ever called on maps accepted by [either_has_zero_values]; anything else is returned as an
/// unchanged copy.
pub fn strip_zero_values(v: &Value) -> Value {
    match v {
        Value::Map(map) => Value::Map(map.without_zero_values()),
        other => other.clone(),
    }
}

// --------------------------------------------------------------------------
// Statically typed maps

/// Returns true if `x` and `y` are both present, hold at least one entry between them, and at
/// least one of them has an entry whose value is zero under `Z`.
pub fn either_has_zeros<M, Z>(x: Option<&M>, y: Option<&M>) -> bool
where
    M: ZeroEntries,
    Z: ZeroPredicate<M::Value>,
{
    let (Some(x), Some(y)) = (x, y) else {
        return false;
    };
    if x.entry_count() + y.entry_count() == 0 {
        return false;
    }
    x.has_zero_values::<Z>() || y.has_zero_values::<Z>()
}

/// Returns a new map of the same type as `m` holding only the entries whose value is not zero
/// under `Z`.
pub fn discard_zeros<M, Z>(m: &M) -> M
where
    M: ZeroEntries,
    Z: ZeroPredicate<M::Value>,
{
    m.without_zero_values::<Z>()
}

// --------------------------------------------------------------------------
