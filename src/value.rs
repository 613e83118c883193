//! A type-erased value model for deep comparison.
//!
//! Every [Value] knows its [Type], including empty and absent ones: an empty [MapValue] still
//! records its key and value types, and [Value::Option] records the type it would hold. This is
//! what lets a comparison option check that two values have exactly the same type, and rebuild
//! an empty container of that type.

use std::{
    collections::{btree_map, BTreeMap},
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use crate::{Error, ZeroPredicate};

// --------------------------------------------------------------------------
// Types

/// The runtime type of a [Value].
///
/// Two values have the same type if their descriptors are equal. Struct types are equal if they
/// have the same name and the same ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Option(Box<Type>),
    Seq(Box<Type>),
    Map(Box<Type>, Box<Type>),
    Struct(Arc<StructType>),
}

impl Type {
    /// Shorthand for `Type::Option(Box::new(inner))`.
    pub fn option(inner: Type) -> Self {
        Self::Option(Box::new(inner))
    }
    /// Shorthand for `Type::Seq(Box::new(elem))`.
    pub fn seq(elem: Type) -> Self {
        Self::Seq(Box::new(elem))
    }
    /// Shorthand for `Type::Map(Box::new(key), Box::new(value))`.
    pub fn map(key: Type, value: Type) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Returns true if values of this type can be used as map keys.
    pub fn is_key_type(&self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::UInt | Self::Str)
    }

    /// Returns true for sequence and map types.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Seq(_) | Self::Map(..))
    }

    /// Returns the zero value of this type.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::UInt => Value::UInt(0),
            Self::Float => Value::Float(0.0),
            Self::Str => Value::Str(String::new()),
            Self::Option(inner) => Value::Option((**inner).clone(), None),
            Self::Seq(elem) => Value::Seq((**elem).clone(), Vec::new()),
            Self::Map(key, value) => Value::Map(MapValue {
                key: (**key).clone(),
                value: (**value).clone(),
                entries: BTreeMap::new(),
            }),
            Self::Struct(ty) => Value::Struct(StructValue {
                fields: ty.fields.iter().map(|(_, field)| field.zero_value()).collect(),
                ty: ty.clone(),
            }),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::UInt => f.write_str("uint"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::Option(inner) => write!(f, "option<{inner}>"),
            Self::Seq(elem) => write!(f, "[]{elem}"),
            Self::Map(key, value) => write!(f, "map[{key}]{value}"),
            Self::Struct(ty) => f.write_str(&ty.name),
        }
    }
}

/// A named struct type with an ordered list of typed fields.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StructType {
    name: String,
    fields: Vec<(String, Type)>,
}

impl StructType {
    pub fn new<N, I, F>(name: N, fields: I) -> Arc<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (F, Type)>,
        F: Into<String>,
    {
        Arc::new(Self {
            name: name.into(),
            fields: fields.into_iter().map(|(name, ty)| (name.into(), ty)).collect(),
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The struct's fields, in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &Type)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), ty))
    }
}

// --------------------------------------------------------------------------
// Keys

/// A map key. Only scalar types can be used as keys; see [Type::is_key_type].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(String),
}

impl Key {
    pub fn type_of(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::UInt(_) => Type::UInt,
            Self::Str(_) => Type::Str,
        }
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}
impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Self::UInt(value.into())
    }
}
impl From<u64> for Key {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}
impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}
impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

// --------------------------------------------------------------------------
// Values

/// A type-erased value.
///
/// The derived [PartialEq] is plain structural equality. Option-aware comparison is provided by
/// [Options::equal](crate::Options::equal).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// An optional value, together with the type of the value it may hold.
    Option(Type, Option<Box<Value>>),
    /// A sequence, together with its element type.
    Seq(Type, Vec<Value>),
    Map(MapValue),
    Struct(StructValue),
}

impl Value {
    /// An absent optional value of type `option<inner>`.
    pub fn none(inner: Type) -> Self {
        Self::Option(inner, None)
    }
    /// A present optional value; its type is taken from `value`.
    pub fn some(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::Option(value.type_of(), Some(Box::new(value)))
    }
    /// A sequence of values that must all have type `elem`.
    pub fn seq<I>(elem: Type, items: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let items = items
            .into_iter()
            .map(|item| check_type(&elem, item.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Seq(elem, items))
    }

    pub fn type_of(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::UInt(_) => Type::UInt,
            Self::Float(_) => Type::Float,
            Self::Str(_) => Type::Str,
            Self::Option(inner, _) => Type::option(inner.clone()),
            Self::Seq(elem, _) => Type::seq(elem.clone()),
            Self::Map(map) => map.map_type(),
            Self::Struct(value) => Type::Struct(value.ty.clone()),
        }
    }

    /// Returns true if this is the zero value of its type.
    ///
    /// Scalars are zero when they equal `false`, `0`, `0.0` (of either sign) or `""`. An option
    /// is zero when absent, a sequence or map when empty, and a struct when all of its fields
    /// are zero. NaN is not zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::UInt(u) => *u == 0,
            Self::Float(x) => *x == 0.0,
            Self::Str(s) => s.is_empty(),
            Self::Option(_, value) => value.is_none(),
            Self::Seq(_, items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::Struct(value) => value.fields.iter().all(Value::is_zero),
        }
    }

    /// Checks that the contents of an option or sequence have the type it declares, recursively.
    ///
    /// The `Option` and `Seq` variants can be built directly with any contents, so values coming
    /// from outside this module are checked before they are stored in a map, sequence or struct.
    /// Maps and structs are checked as they are built.
    pub fn check(&self) -> Result<(), Error> {
        match self {
            Self::Option(inner, Some(value)) => check_type_ref(inner, value),
            Self::Seq(elem, items) => items.iter().try_for_each(|item| check_type_ref(elem, item)),
            _ => Ok(()),
        }
    }

    /// Returns true for empty sequences and maps, and for absent options of a collection type.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            Self::Seq(_, items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::Option(inner, None) => inner.is_collection(),
            _ => false,
        }
    }
}

fn check_type(expected: &Type, value: Value) -> Result<Value, Error> {
    check_type_ref(expected, &value)?;
    Ok(value)
}

fn check_type_ref(expected: &Type, value: &Value) -> Result<(), Error> {
    let found = value.type_of();
    if &found != expected {
        return Err(Error::TypeMismatch { expected: expected.clone(), found });
    }
    value.check()
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}
impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::UInt(value.into())
    }
}
impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}
impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}
impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}
impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Self::Bool(b),
            Key::Int(i) => Self::Int(i),
            Key::UInt(u) => Self::UInt(u),
            Key::Str(s) => Self::Str(s),
        }
    }
}
impl From<MapValue> for Value {
    fn from(value: MapValue) -> Self {
        Self::Map(value)
    }
}
impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Self::Struct(value)
    }
}

/// A [zero predicate](ZeroPredicate) for [Value]s, based on [Value::is_zero].
pub struct ValueZero(());
impl ZeroPredicate<Value> for ValueZero {
    fn is_zero(value: &Value) -> bool {
        value.is_zero()
    }
}

// --------------------------------------------------------------------------
// Maps

/// A map from [Key]s of one type to [Value]s of another type.
///
/// Entries are kept in key order. Both types are fixed at construction, so an empty map still
/// has a well-defined [Type].
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
    key: Type,
    value: Type,
    entries: BTreeMap<Key, Value>,
}

impl MapValue {
    /// Constructs an empty map of type `map[key]value`.
    pub fn new(key: Type, value: Type) -> Result<Self, Error> {
        if !key.is_key_type() {
            return Err(Error::InvalidKeyType(key));
        }
        Ok(Self { key, value, entries: BTreeMap::new() })
    }

    /// Constructs an empty map with the same type as `self`.
    pub fn empty_like(&self) -> Self {
        Self { key: self.key.clone(), value: self.value.clone(), entries: BTreeMap::new() }
    }

    pub fn key_type(&self) -> &Type {
        &self.key
    }
    pub fn value_type(&self) -> &Type {
        &self.value
    }
    /// The type of the map itself.
    pub fn map_type(&self) -> Type {
        Type::map(self.key.clone(), self.value.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Associates a key with a value, and returns the value previously associated with that key.
    /// Fails if either has the wrong type for this map.
    pub fn insert(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, Error> {
        let key = key.into();
        let found = key.type_of();
        if found != self.key {
            return Err(Error::TypeMismatch { expected: self.key.clone(), found });
        }
        let value = check_type(&self.value, value.into())?;
        Ok(self.entries.insert(key, value))
    }

    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.remove(key)
    }

    /// An iterator over the map's entries, in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Key, Value> {
        self.entries.iter()
    }
    /// An iterator over the map's keys, in order.
    pub fn keys(&self) -> btree_map::Keys<'_, Key, Value> {
        self.entries.keys()
    }
    /// An iterator over the map's values, in key order.
    pub fn values(&self) -> btree_map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Builds a map of the same type holding clones of the entries whose value satisfies `keep`.
    pub(crate) fn filtered(&self, mut keep: impl FnMut(&Value) -> bool) -> Self {
        let mut out = self.empty_like();
        out.entries.extend(
            self.entries
                .iter()
                .filter(|(_, value)| keep(value))
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        out
    }
}

impl<'a> IntoIterator for &'a MapValue {
    type Item = (&'a Key, &'a Value);
    type IntoIter = btree_map::Iter<'a, Key, Value>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --------------------------------------------------------------------------
// Structs

/// A value of a [StructType], holding one value per field.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    ty: Arc<StructType>,
    fields: Vec<Value>,
}

impl StructValue {
    /// Constructs a struct from its field values, given in declaration order.
    pub fn new<I>(ty: Arc<StructType>, fields: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let fields = fields.into_iter().map(Into::into).collect::<Vec<Value>>();
        if fields.len() != ty.fields.len() {
            return Err(Error::FieldCount {
                name: ty.name.clone(),
                expected: ty.fields.len(),
                found: fields.len(),
            });
        }
        let fields = ty
            .fields
            .iter()
            .zip(fields)
            .map(|((_, expected), value)| check_type(expected, value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ty, fields })
    }

    pub fn struct_type(&self) -> &Arc<StructType> {
        &self.ty
    }

    /// Returns the value of the named field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        let index = self.ty.fields.iter().position(|(field, _)| field == name)?;
        self.fields.get(index)
    }

    /// The struct's field names and values, in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.ty.fields.iter().map(|(name, _)| name.as_str()).zip(&self.fields)
    }
}

// --------------------------------------------------------------------------
