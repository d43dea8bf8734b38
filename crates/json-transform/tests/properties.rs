//! Invariant checks across the patch, merge and resolver subsystems,
//! replayed over a small corpus of documents and paths.

use serde_json::{json, Value};

use json_transform::{apply_patch, merge_into, Op, Resolver};
use json_transform_document::{comparator, deep_equal};
use json_transform_json_pointer::{format_json_pointer, parse_json_pointer};

fn corpus() -> Vec<Value> {
    vec![
        json!({}),
        json!({"a": 1}),
        json!({"a": {"b": [1, 2, {"c": null}]}, "d": "x"}),
        json!({"list": [true, false, "s", 3.5]}),
        json!({"nested": {"deep": {"deeper": {"leaf": 0}}}}),
    ]
}

fn pointer(s: &str) -> Vec<String> {
    parse_json_pointer(s).unwrap()
}

#[test]
fn add_then_remove_roundtrips_to_the_original() {
    let fresh_paths = ["/new", "/x y", "/with~tilde", "/with/slash"];
    for doc in corpus() {
        for raw in fresh_paths {
            // each raw path is a single key (the embedded slash included)
            let path = vec![raw[1..].to_string()];
            let added = apply_patch(
                &doc,
                &[Op::Add { path: path.clone(), value: json!({"v": [1, "two"]}) }],
            )
            .unwrap();
            let removed = apply_patch(&added, &[Op::Remove { path: path.clone() }]).unwrap();
            assert!(
                deep_equal(&removed, &doc),
                "add/remove at {raw} did not roundtrip for {doc}"
            );
        }
    }
}

#[test]
fn move_equals_copy_then_remove() {
    let cases = [
        (json!({"a": {"b": 1}, "c": 2}), "/a/b", "/moved"),
        (json!({"arr": [1, 2, 3], "o": {}}), "/arr/1", "/o/x"),
        (json!({"x": [1], "y": [2]}), "/x/0", "/y/-"),
    ];
    for (doc, from, to) in cases {
        let via_move = apply_patch(
            &doc,
            &[Op::Move { from: pointer(from), path: pointer(to) }],
        )
        .unwrap();
        let via_copy = apply_patch(
            &doc,
            &[
                Op::Copy { from: pointer(from), path: pointer(to) },
                Op::Remove { path: pointer(from) },
            ],
        )
        .unwrap();
        assert!(
            deep_equal(&via_move, &via_copy),
            "move != copy+remove for {doc} {from} -> {to}"
        );
    }
}

#[test]
fn failed_patches_have_no_observable_effect() {
    for doc in corpus() {
        let before = doc.clone();
        let result = apply_patch(
            &doc,
            &[
                Op::Add { path: pointer("/probe"), value: json!(1) },
                Op::Replace { path: pointer("/definitely/not/there"), value: json!(2) },
            ],
        );
        assert!(result.is_err());
        assert!(deep_equal(&doc, &before));
    }
}

#[test]
fn pointer_escaping_roundtrips_awkward_keys() {
    for key in ["plain", "a/b", "a~b", "~1", "~0", "a~1b~0", "/", "~"] {
        let path = vec![key.to_string()];
        let encoded = format_json_pointer(&path);
        assert_eq!(parse_json_pointer(&encoded).unwrap(), path, "key {key:?}");

        // and the encoded pointer addresses the literal key end to end
        let doc = Value::Object({
            let mut m = serde_json::Map::new();
            m.insert(key.to_string(), json!("here"));
            m
        });
        let ok = apply_patch(
            &doc,
            &[Op::Test { path: parse_json_pointer(&encoded).unwrap(), value: json!("here") }],
        );
        assert!(ok.is_ok(), "escaped pointer {encoded:?} missed its key");
    }
}

#[test]
fn merge_of_identical_scalar_is_idempotent() {
    let scalars = [json!("v"), json!(42), json!(true)];
    let paths = ["leaf", "a.b.leaf", "$.x.y"];
    for value in &scalars {
        for path in paths {
            let once = merge_into(json!({}), value, path).unwrap();
            let twice = merge_into(once.clone(), value, path).unwrap();
            assert_eq!(once, twice, "second merge of {value} at {path} changed the doc");
        }
    }
}

#[test]
fn resolver_escape_inverts_one_level() {
    let resolver = Resolver::new(json!({}));
    for suffix in ["", ".a.b", "name", "[0]", "weird text"] {
        let dollar = format!("\\${suffix}");
        assert_eq!(
            resolver.resolve(&dollar).unwrap(),
            Value::String(format!("${suffix}"))
        );
        let hash = format!("\\#{suffix}");
        assert_eq!(
            resolver.resolve(&hash).unwrap(),
            Value::String(format!("#{suffix}"))
        );
    }
}

#[test]
fn comparator_orders_each_comparable_kind() {
    let cmp = comparator();
    let mut numbers = vec![json!(3), json!(1), json!(2.5)];
    numbers.sort_by(&cmp);
    assert_eq!(numbers, vec![json!(1), json!(2.5), json!(3)]);

    let mut strings = vec![json!("b"), json!("a"), json!("ab")];
    strings.sort_by(&cmp);
    assert_eq!(strings, vec![json!("a"), json!("ab"), json!("b")]);

    let mut arrays = vec![json!([1, 2]), json!([]), json!([0])];
    arrays.sort_by(&cmp);
    assert_eq!(arrays, vec![json!([]), json!([0]), json!([1, 2])]);
}

#[test]
fn incomparable_pairs_compare_equal_so_sorts_stay_stable() {
    let cmp = comparator();
    let mixed = [json!(1), json!("a"), json!([0]), json!({"k": 1}), json!(true)];
    for a in &mixed {
        for b in &mixed {
            let forward = cmp(a, b);
            let backward = cmp(b, a);
            // antisymmetric where comparable, equal otherwise
            assert_eq!(forward, backward.reverse(), "cmp({a}, {b}) asymmetric");
        }
    }
    // a stable sort keyed on an always-equal subset keeps input order
    let mut null_and_bool = vec![json!(true), json!(false)];
    null_and_bool.sort_by(&cmp);
    assert_eq!(null_and_bool, vec![json!(false), json!(true)]);
}
