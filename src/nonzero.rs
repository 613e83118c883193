//! Provides [NumZero], a [zero predicate](ZeroPredicate) based on [num_traits::Zero].
//!
//! Recommended whenever it is important that the discarded value is numeric zero, even though
//! most numeric types' [Default] implementations also yield a zero value.

use num_traits::Zero;

use crate::ZeroPredicate;

/// A [zero predicate](ZeroPredicate) based on the [Zero] trait.
pub struct NumZero(());

impl<T: Zero> ZeroPredicate<T> for NumZero {
    fn is_zero(value: &T) -> bool {
        value.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{discard_zeros, either_has_zeros};

    use super::*;

    #[test]
    fn numeric_zeros() {
        let x = HashMap::from([("a", 0.0), ("b", -0.0), ("c", 2.5)]);
        let y = HashMap::from([("c", 2.5)]);
        assert!(either_has_zeros::<_, NumZero>(Some(&x), Some(&y)));
        assert_eq!(discard_zeros::<_, NumZero>(&x), y);
    }
}
