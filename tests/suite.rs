use itertools::Itertools;
use map_zeros::{
    discard_map_zeros, discard_zeros, either_has_zero_values, either_has_zeros, equal,
    equate_empty, sort_maps, CmpOption, DefaultZero, Error, MapValue, OptionKind, Options,
    StructType, StructValue, Type, Value, ZeroPredicate,
};

macro_rules! typed {
    (mod $mod:ident, $Map:ident, $iter_eq:expr $(,)?) => {
        mod $mod {
            use std::collections::$Map;

            use super::*;

            #[test]
            fn strip_basic() {
                let m = $Map::from([("foo", "v_foo"), ("baz", ""), ("bar", "v_bar")]);
                let stripped = discard_zeros::<_, DefaultZero>(&m);
                assert_eq!(stripped.len(), 2);
                assert_iter_eq(
                    stripped.iter(),
                    [(&"bar", &"v_bar"), (&"foo", &"v_foo")],
                    $iter_eq,
                );
                assert_eq!(m.len(), 3);
            }

            #[test]
            fn strip_zeros_only() {
                let m = $Map::from([("foo", ""), ("bar", "")]);
                let stripped = discard_zeros::<_, DefaultZero>(&m);
                assert!(stripped.is_empty());
            }

            #[test]
            fn strip_is_idempotent() {
                let m = $Map::from([("a", 0), ("b", 1), ("c", 0), ("d", 4)]);
                let once = discard_zeros::<_, DefaultZero>(&m);
                let twice = discard_zeros::<_, DefaultZero>(&once);
                assert_eq!(once, twice);
                assert!(once.len() <= m.len());
            }

            #[test]
            fn strip_does_not_alias() {
                let m = $Map::from([("a", 1), ("b", 0)]);
                let mut stripped = discard_zeros::<_, DefaultZero>(&m);
                stripped.insert("a", 5);
                assert_eq!(m.get("a"), Some(&1));
                assert_eq!(m.get("b"), Some(&0));
            }

            #[test]
            fn filter() {
                let empty = $Map::<&str, i32>::new();
                let zero = $Map::from([("a", 0)]);
                let full = $Map::from([("a", 1)]);
                assert!(!either_has_zeros::<_, DefaultZero>(Some(&empty), Some(&empty)));
                assert!(!either_has_zeros::<_, DefaultZero>(None, Some(&zero)));
                assert!(!either_has_zeros::<_, DefaultZero>(Some(&full), Some(&full)));
                assert!(either_has_zeros::<_, DefaultZero>(Some(&full), Some(&zero)));
                assert!(either_has_zeros::<_, DefaultZero>(Some(&empty), Some(&zero)));
            }

            #[test]
            fn custom_predicate() {
                let m = $Map::from([(1, f64::NAN), (2, 0.0), (3, 1.0)]);
                let stripped = discard_zeros::<_, NaNZero>(&m);
                assert_iter_eq(stripped.keys(), [&2, &3], $iter_eq);
            }
        }
    };
}

typed!(mod btree_map, BTreeMap, Iterator::eq);
typed!(mod hash_map, HashMap, unordered_iter_eq);

// --------------------------------------------------------------------------
// Type-erased values

fn str_int_map(entries: &[(&str, i64)]) -> Value {
    let mut m = MapValue::new(Type::Str, Type::Int).unwrap();
    for &(k, v) in entries {
        m.insert(k, v).unwrap();
    }
    Value::Map(m)
}

fn discarding() -> Options {
    Options::new([discard_map_zeros()]).unwrap()
}

#[test]
fn zero_entry_is_ignored() {
    let x = str_int_map(&[("a", 1), ("b", 0)]);
    let y = str_int_map(&[("a", 1)]);
    assert!(either_has_zero_values(Some(&x), Some(&y)));
    assert!(equal(&x, &y, &discarding()));
    assert!(!equal(&x, &y, &Options::default()));
}

#[test]
fn maps_without_zeros_compare_normally() {
    let x = str_int_map(&[("a", 1), ("b", 2)]);
    let y = str_int_map(&[("a", 1), ("b", 2)]);
    assert!(!either_has_zero_values(Some(&x), Some(&y)));
    assert!(equal(&x, &y, &discarding()));

    let z = str_int_map(&[("a", 1), ("b", 3)]);
    assert!(!equal(&x, &z, &discarding()));
}

#[test]
fn empty_maps_are_not_filtered() {
    let x = str_int_map(&[]);
    let y = str_int_map(&[]);
    assert!(!either_has_zero_values(Some(&x), Some(&y)));
    assert!(equal(&x, &y, &discarding()));
}

#[test]
fn absent_side_is_not_filtered() {
    let x = str_int_map(&[("a", 0)]);
    assert!(!either_has_zero_values(Some(&x), None));
    assert!(!discarding().equal(Some(&x), None));
}

#[test]
fn nonzero_differences_still_reported() {
    let x = str_int_map(&[("a", 1), ("b", 0)]);
    let y = str_int_map(&[("a", 2)]);
    assert!(!equal(&x, &y, &discarding()));
}

#[test]
fn zero_structs_and_options_are_discarded() {
    let ty = StructType::new("Point", [("x", Type::Int), ("y", Type::Int)]);
    let point = |x: i64, y: i64| StructValue::new(ty.clone(), [x, y]).unwrap();

    let mut a = MapValue::new(Type::UInt, Type::Struct(ty.clone())).unwrap();
    a.insert(1u64, point(0, 0)).unwrap();
    a.insert(2u64, point(0, 1)).unwrap();
    let mut b = MapValue::new(Type::UInt, Type::Struct(ty.clone())).unwrap();
    b.insert(2u64, point(0, 1)).unwrap();
    assert!(equal(&a.into(), &b.into(), &discarding()));

    let mut a = MapValue::new(Type::Bool, Type::option(Type::Str)).unwrap();
    a.insert(true, Value::none(Type::Str)).unwrap();
    let b = MapValue::new(Type::Bool, Type::option(Type::Str)).unwrap();
    assert!(equal(&a.into(), &b.into(), &discarding()));
}

#[test]
fn zeros_inside_sequences() {
    let mut x = MapValue::new(Type::Str, Type::Int).unwrap();
    x.insert("k", 0).unwrap();
    let y = MapValue::new(Type::Str, Type::Int).unwrap();
    let xs = Value::seq(Type::map(Type::Str, Type::Int), [x]).unwrap();
    let ys = Value::seq(Type::map(Type::Str, Type::Int), [y]).unwrap();
    assert!(equal(&xs, &ys, &discarding()));
}

#[test]
fn combined_with_equate_empty() {
    let opts = Options::new([discard_map_zeros(), equate_empty()]).unwrap();
    let zeros = str_int_map(&[("a", 0), ("b", 0)]);
    let absent = Value::none(Type::map(Type::Str, Type::Int));

    assert!(equal(&zeros, &str_int_map(&[]), &opts));
    assert!(equal(&Value::some(zeros.clone()), &absent, &opts));
    assert!(equal(&absent, &Value::some(zeros.clone()), &opts));
    assert!(!equal(&Value::some(zeros), &absent, &discarding()));
}

#[test]
fn rejected_with_sort_maps() {
    let expected = Error::IncompatibleOptions {
        option: OptionKind::Transform("DiscardZeros"),
        conflicts_with: OptionKind::SortMaps,
    };
    assert_eq!(Options::new([discard_map_zeros(), sort_maps()]).unwrap_err(), expected);
    assert_eq!(Options::new([sort_maps(), discard_map_zeros()]).unwrap_err(), expected);
    assert_eq!(
        expected.to_string(),
        "option Transformer(DiscardZeros) cannot be combined with SortMaps"
    );
}

#[test]
fn option_kind() {
    let CmpOption::Transform(t) = discard_map_zeros() else {
        panic!("not a transform");
    };
    assert_eq!(t.name(), "DiscardZeros");
    assert_eq!(discard_map_zeros().kind(), OptionKind::Transform("DiscardZeros"));
}

#[test]
fn options_shared_across_threads() {
    let opts = discarding();
    let x = str_int_map(&[("a", 1), ("b", 0)]);
    let y = str_int_map(&[("a", 1), ("c", 0)]);
    let (x, y, opts) = (&x, &y, &opts);
    std::thread::scope(|s| {
        let handles = (0..4).map(|_| s.spawn(move || equal(x, y, opts))).collect_vec();
        assert!(handles.into_iter().all(|h| h.join().unwrap()));
    });
}

#[cfg(feature = "serde")]
#[test]
fn serde_serialize() {
    let x = str_int_map(&[("a", 1), ("b", 0)]);
    let stripped = map_zeros::strip_zero_values(&x);
    assert_eq!(serde_json::to_value(&x).unwrap(), serde_json::json!({ "a": 1, "b": 0 }));
    assert_eq!(serde_json::to_value(&stripped).unwrap(), serde_json::json!({ "a": 1 }));

    let ty = StructType::new("Named", [("name", Type::option(Type::Str))]);
    let v = StructValue::new(ty, [Value::none(Type::Str)]).unwrap();
    assert_eq!(serde_json::to_string(&Value::Struct(v)).unwrap(), r#"{"name":null}"#);
}

// --------------------------------------------------------------------------

fn assert_iter_eq<I, J>(lhs: I, rhs: J, iter_eq: impl FnOnce(I::IntoIter, J::IntoIter) -> bool)
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    J: IntoIterator<Item = I::Item>,
    J::IntoIter: ExactSizeIterator,
{
    let lhs = lhs.into_iter();
    let rhs = rhs.into_iter();
    assert_eq!(lhs.len(), rhs.len());
    assert!(iter_eq(lhs, rhs));
}

fn unordered_iter_eq<I, J>(lhs: I, rhs: J) -> bool
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Ord,
{
    lhs.into_iter().sorted().eq(rhs)
}

/// Treats NaN as the value to discard.
struct NaNZero;
impl ZeroPredicate<f64> for NaNZero {
    fn is_zero(value: &f64) -> bool {
        value.is_nan()
    }
}
