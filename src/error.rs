use thiserror::Error;

use crate::{cmp::OptionKind, value::Type};

/// Errors raised while building values or option sets.
///
/// Comparing values never fails: a pair that an option does not apply to is simply compared
/// without it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("option {option} cannot be combined with {conflicts_with}")]
    IncompatibleOptions { option: OptionKind, conflicts_with: OptionKind },
    #[error("option {0} is registered more than once")]
    DuplicateOption(OptionKind),
    #[error("expected a value of type `{expected}`, found `{found}`")]
    TypeMismatch { expected: Type, found: Type },
    #[error("`{0}` cannot be used as a map key type")]
    InvalidKeyType(Type),
    #[error("struct `{name}` has {expected} field(s), but {found} value(s) were given")]
    FieldCount { name: String, expected: usize, found: usize },
}
