//! A deep-comparison option that discards map entries with a *zero* value.
//!
//! Two maps that differ only in entries associated with the zero value (for example `0`, `""` or
//! `None`) usually mean the same thing. [discard_map_zeros] returns a [CmpOption] that, at every
//! comparison site where both sides are maps of the same type and at least one of them holds a
//! zero-valued entry, replaces both maps by copies without those entries before comparing.
//!
//! Values are compared through the type-erased [Value] model, which carries enough runtime type
//! information to check type identity and to rebuild empty maps of the same type. The same
//! filter and transform are also available for statically typed maps through [ZeroEntries],
//! parameterized by a [ZeroPredicate].
//!
//! ```
//! use map_zeros::{discard_map_zeros, equal, MapValue, Options, Type, Value};
//!
//! let mut x = MapValue::new(Type::Str, Type::Int)?;
//! x.insert("a", 1)?;
//! x.insert("b", 0)?;
//! let mut y = MapValue::new(Type::Str, Type::Int)?;
//! y.insert("a", 1)?;
//!
//! let (x, y) = (Value::Map(x), Value::Map(y));
//! assert!(!equal(&x, &y, &Options::default()));
//! assert!(equal(&x, &y, &Options::new([discard_map_zeros()])?));
//! # Ok::<(), map_zeros::Error>(())
//! ```

pub use self::{
    cmp::{equal, equate_empty, sort_maps, CmpOption, FilterTransform, OptionKind, Options},
    discard::{
        discard_map_zeros, discard_zeros, either_has_zero_values, either_has_zeros,
        strip_zero_values,
    },
    empty::EmptyZero,
    entries::ZeroEntries,
    error::Error,
    value::{Key, MapValue, StructType, StructValue, Type, Value, ValueZero},
};
#[cfg(feature = "num-traits")]
pub use self::nonzero::NumZero;

pub mod cmp;
mod discard;
mod empty;
mod entries;
mod error;
#[cfg(feature = "num-traits")]
mod nonzero;
#[cfg(feature = "serde")]
mod serde;
pub mod value;

// --------------------------------------------------------------------------

/// Defines which values of type `V` count as *zero*, and so which map entries are discarded by
/// [discard_zeros] and [either_has_zeros].
///
/// There could be multiple definitions of zero for the same type. The basic implementation,
/// [DefaultZero], is based on the [Default] trait.
#[cfg_attr(
    feature = "num-traits",
    doc = "Likewise, [NumZero] is based on the [num_traits::Zero] trait."
)]
pub trait ZeroPredicate<V: ?Sized> {
    /// Returns true if `value` is a zero value of type `V`.
    ///
    /// If `V` implements [PartialEq], then this function should be consistent with it. That is to
    /// say, `Self::is_zero(x) && x == y` should imply `Self::is_zero(y)`.
    fn is_zero(value: &V) -> bool;
}

/// A [zero predicate](ZeroPredicate) based on the [Default] trait: a value is zero if it equals
/// `V::default()`.
pub struct DefaultZero(());
impl<T: PartialEq + Default> ZeroPredicate<T> for DefaultZero {
    fn is_zero(value: &T) -> bool {
        value == &T::default()
    }
}
