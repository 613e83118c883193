//! Comparison options, and the recursive walk that applies them.
//!
//! Options form a closed set ([CmpOption]) and are applied at every comparison site in the order
//! they were registered. An [Options] set is validated once, at construction: options that
//! declare themselves incompatible with each other are rejected there, never during a
//! comparison.

use std::fmt::{self, Debug, Display, Formatter};

use tracing::debug;

use crate::{Error, MapValue, Value};

/// Decides whether a transform applies to a pair of values about to be compared. `None` stands for
/// an absent value.
pub type Filter = fn(Option<&Value>, Option<&Value>) -> bool;

/// Produces the value to compare in place of the original.
pub type Transform = fn(&Value) -> Value;

// --------------------------------------------------------------------------
// Options

/// Identifies an option, for validation and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// A [FilterTransform], by name.
    Transform(&'static str),
    EquateEmpty,
    SortMaps,
}

impl Display for OptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transform(name) => write!(f, "Transformer({name})"),
            Self::EquateEmpty => f.write_str("EquateEmpty"),
            Self::SortMaps => f.write_str("SortMaps"),
        }
    }
}

/// A named transform, applied at the comparison sites accepted by its filter.
///
/// When the filter accepts a pair, each present side is replaced by the transform's output and the
/// comparison restarts at the same site, with this transform suppressed there. It may still apply
/// again to nested values.
#[derive(Clone, Copy)]
pub struct FilterTransform {
    name: &'static str,
    filter: Filter,
    transform: Transform,
    incompatible: &'static [OptionKind],
}

impl FilterTransform {
    pub const fn new(name: &'static str, filter: Filter, transform: Transform) -> Self {
        Self { name, filter, transform, incompatible: &[] }
    }

    /// Declares options that must not be registered alongside this one.
    pub const fn incompatible_with(self, kinds: &'static [OptionKind]) -> Self {
        Self { incompatible: kinds, ..self }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this transform applies to the pair `(x, y)`.
    pub fn applies(&self, x: Option<&Value>, y: Option<&Value>) -> bool {
        (self.filter)(x, y)
    }

    /// Transforms one side of a pair accepted by [applies](Self::applies).
    pub fn apply(&self, value: &Value) -> Value {
        (self.transform)(value)
    }
}

impl Debug for FilterTransform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterTransform")
            .field("name", &self.name)
            .field("incompatible", &self.incompatible)
            .finish_non_exhaustive()
    }
}

/// A comparison option.
#[derive(Debug, Clone, Copy)]
pub enum CmpOption {
    /// Replace values by transformed ones where a filter accepts them.
    Transform(FilterTransform),
    /// Treat empty collections of the same type as equal, and an absent optional collection as
    /// equal to an empty one.
    EquateEmpty,
    /// Compare maps as sequences of entries sorted by key.
    SortMaps,
}

impl CmpOption {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Transform(t) => OptionKind::Transform(t.name),
            Self::EquateEmpty => OptionKind::EquateEmpty,
            Self::SortMaps => OptionKind::SortMaps,
        }
    }

    fn incompatible(&self) -> &'static [OptionKind] {
        match self {
            Self::Transform(t) => t.incompatible,
            Self::EquateEmpty | Self::SortMaps => &[],
        }
    }
}

/// Returns an option that treats empty sequences and maps as equal to each other, provided they
/// have the same type, and an absent optional sequence or map as equal to an empty one.
pub fn equate_empty() -> CmpOption {
    CmpOption::EquateEmpty
}

/// Returns an option that compares maps as sequences of entries sorted by key.
pub fn sort_maps() -> CmpOption {
    CmpOption::SortMaps
}

// --------------------------------------------------------------------------
// Option sets

/// A validated set of comparison options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    opts: Vec<CmpOption>,
    equate_empty: bool,
    sort_maps: bool,
}

impl Options {
    /// Validates and collects a set of options, kept in registration order.
    ///
    /// Fails if an option is registered twice, or if an option is registered alongside one it
    /// declares itself incompatible with, whichever of the two comes first.
    pub fn new<I: IntoIterator<Item = CmpOption>>(opts: I) -> Result<Self, Error> {
        let opts = opts.into_iter().collect::<Vec<_>>();
        for (i, opt) in opts.iter().enumerate() {
            let kind = opt.kind();
            if opts[..i].iter().any(|other| other.kind() == kind) {
                debug!(option = %kind, "rejecting duplicate comparison option");
                return Err(Error::DuplicateOption(kind));
            }
            for &conflict in opt.incompatible() {
                if opts.iter().any(|other| other.kind() == conflict) {
                    debug!(option = %kind, conflicts_with = %conflict, "rejecting option set");
                    return Err(Error::IncompatibleOptions {
                        option: kind,
                        conflicts_with: conflict,
                    });
                }
            }
        }
        let equate_empty = opts.iter().any(|opt| matches!(opt, CmpOption::EquateEmpty));
        let sort_maps = opts.iter().any(|opt| matches!(opt, CmpOption::SortMaps));
        Ok(Self { opts, equate_empty, sort_maps })
    }

    /// The options, in registration order.
    pub fn options(&self) -> &[CmpOption] {
        &self.opts
    }

    /// Compares two possibly absent values under these options.
    pub fn equal(&self, x: Option<&Value>, y: Option<&Value>) -> bool {
        self.site(x, y, &[])
    }

    // `applied` lists the transforms already applied at this site.
    fn site(&self, x: Option<&Value>, y: Option<&Value>, applied: &[usize]) -> bool {
        for (i, opt) in self.opts.iter().enumerate() {
            let CmpOption::Transform(t) = opt else {
                continue;
            };
            if applied.contains(&i) || !t.applies(x, y) {
                continue;
            }
            debug!(transform = t.name, "applying transform");
            let tx = x.map(|v| t.apply(v));
            let ty = y.map(|v| t.apply(v));
            let mut applied = applied.to_vec();
            applied.push(i);
            return self.site(tx.as_ref(), ty.as_ref(), &applied);
        }

        match (x, y) {
            (None, None) => true,
            (Some(x), Some(y)) => {
                if self.equate_empty && both_empty(x, y) {
                    return true;
                }
                self.values(x, y)
            }
            _ => false,
        }
    }

    fn nested(&self, x: &Value, y: &Value) -> bool {
        self.site(Some(x), Some(y), &[])
    }

    fn values(&self, x: &Value, y: &Value) -> bool {
        match (x, y) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Option(tx, a), Value::Option(ty, b)) => {
                if tx != ty {
                    return false;
                }
                match (a.as_deref(), b.as_deref()) {
                    (None, None) => true,
                    (Some(a), Some(b)) => self.nested(a, b),
                    (Some(a), None) if self.equate_empty && ty.is_collection() => {
                        self.nested(a, &ty.zero_value())
                    }
                    (None, Some(b)) if self.equate_empty && tx.is_collection() => {
                        self.nested(&tx.zero_value(), b)
                    }
                    _ => false,
                }
            }
            (Value::Seq(tx, a), Value::Seq(ty, b)) => {
                tx == ty && a.len() == b.len() && a.iter().zip(b).all(|(a, b)| self.nested(a, b))
            }
            (Value::Map(a), Value::Map(b)) => self.maps(a, b),
            (Value::Struct(a), Value::Struct(b)) => {
                a.struct_type() == b.struct_type()
                    && a.fields().zip(b.fields()).all(|((_, a), (_, b))| self.nested(a, b))
            }
            _ => false,
        }
    }

    fn maps(&self, x: &MapValue, y: &MapValue) -> bool {
        if x.key_type() != y.key_type() || x.value_type() != y.value_type() {
            return false;
        }
        if self.sort_maps {
            return x.len() == y.len()
                && x.iter().zip(y).all(|((kx, vx), (ky, vy))| kx == ky && self.nested(vx, vy));
        }
        // A key present on one side only compares its value against an absent one.
        x.keys()
            .chain(y.keys().filter(|k| !x.contains_key(k)))
            .all(|k| self.site(x.get(k), y.get(k), &[]))
    }
}

fn both_empty(x: &Value, y: &Value) -> bool {
    x.is_empty_collection() && y.is_empty_collection() && x.type_of() == y.type_of()
}

/// Compares two values under `opts`.
pub fn equal(x: &Value, y: &Value, opts: &Options) -> bool {
    opts.equal(Some(x), Some(y))
}

// --------------------------------------------------------------------------
