//! # Integration Tests
//!
//! End-to-end properties of the filter engine: whitelist invariant, policy
//! precedence, idempotence, and recursion correctness over realistic
//! payloads. Global policy reconfiguration lives in its own test binary
//! (`global_policy.rs`) because the process-wide set is shared.

use guard_filter::{
    apply_shape, apply_shape_with, array, shape, FieldSpec, PrimitiveKind, SensitivePolicy, Shape,
};
use serde_json::{json, Value};

fn prim(kind: PrimitiveKind) -> FieldSpec {
    FieldSpec::Primitive(kind)
}

fn post_shape() -> Shape {
    shape([
        ("id", prim(PrimitiveKind::Number)),
        ("title", prim(PrimitiveKind::String)),
        (
            "author",
            shape([
                ("id", prim(PrimitiveKind::Number)),
                ("name", prim(PrimitiveKind::String)),
            ])
            .into(),
        ),
        (
            "comments",
            array(shape([
                ("id", prim(PrimitiveKind::Number)),
                ("text", prim(PrimitiveKind::String)),
            ])),
        ),
    ])
}

// ============================================================================
// Whitelist Invariant
// ============================================================================

#[test]
fn test_every_output_key_is_declared() {
    let s = post_shape();
    let raw = json!({
        "id": 1,
        "title": "t",
        "surprise": { "deep": true },
        "author": { "id": 1, "name": "n", "role": "admin" },
        "comments": [{ "id": 1, "text": "c", "flag": 1 }],
        "password": "x"
    });

    let filtered = s.apply(&raw);
    let keys: Vec<&str> = filtered
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    for key in keys {
        assert!(s.get(key).is_some(), "undeclared key '{key}' leaked");
    }
}

#[test]
fn test_unknown_keys_never_copied_at_any_level() {
    let raw = json!({
        "id": 7,
        "title": "deep",
        "author": { "id": 1, "name": "a", "ssn_shadow": "leak" },
        "comments": [{ "id": 1, "text": "hi", "tracking": "leak" }]
    });

    let filtered = post_shape().apply(&raw);
    assert_eq!(
        filtered,
        json!({
            "id": 7,
            "title": "deep",
            "author": { "id": 1, "name": "a" },
            "comments": [{ "id": 1, "text": "hi" }]
        })
    );
}

// ============================================================================
// Policy Precedence
// ============================================================================

#[test]
fn test_policy_wins_over_declaration_at_every_level() {
    let policy = SensitivePolicy::new(["token", "salary"]);
    let s = shape([
        ("name", prim(PrimitiveKind::String)),
        ("salary", prim(PrimitiveKind::Number)),
        (
            "session",
            shape([
                ("id", prim(PrimitiveKind::Number)),
                ("token", prim(PrimitiveKind::String)),
            ])
            .into(),
        ),
    ]);
    let raw = json!({
        "name": "Bob",
        "salary": 50000,
        "session": { "id": 4, "token": "abc" }
    });

    assert_eq!(
        s.apply_with(&raw, &policy),
        json!({ "name": "Bob", "session": { "id": 4 } })
    );
}

#[test]
fn test_custom_policy_scenario() {
    let policy = SensitivePolicy::new(["salary"]);
    let employee = shape([
        ("name", prim(PrimitiveKind::String)),
        ("salary", prim(PrimitiveKind::Number)),
    ]);
    let raw = json!({ "name": "Bob", "salary": 50000 });

    assert_eq!(employee.apply_with(&raw, &policy), json!({ "name": "Bob" }));
}

// ============================================================================
// Idempotence (filtering is a projection)
// ============================================================================

#[test]
fn test_filtering_is_idempotent() {
    let specs: Vec<FieldSpec> = vec![post_shape().into(), array(post_shape())];
    let raws = vec![
        json!({
            "id": 1,
            "title": "t",
            "author": { "id": 1, "name": "n", "password": "p" },
            "comments": [{ "id": 1, "text": "c", "spam": true }],
            "extra": 9
        }),
        json!({ "id": "wrong-kind", "comments": "also wrong" }),
        json!(null),
        json!([{ "id": 1, "title": "t" }, "garbage", 42]),
    ];

    for spec in &specs {
        for raw in &raws {
            let once = apply_shape(spec, raw);
            let twice = apply_shape(spec, &once);
            assert_eq!(once, twice, "spec {spec:?} not idempotent on {raw}");
        }
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_scenario_basic_user() {
    let user = shape([
        ("id", prim(PrimitiveKind::Number)),
        ("name", prim(PrimitiveKind::String)),
        ("email", prim(PrimitiveKind::String)),
    ]);
    let raw = json!({
        "id": 1,
        "name": "John Doe",
        "email": "john@example.com",
        "password": "secret123",
        "internalNotes": "VIP"
    });

    assert_eq!(
        user.apply(&raw),
        json!({ "id": 1, "name": "John Doe", "email": "john@example.com" })
    );
}

#[test]
fn test_scenario_nested_author() {
    let s = shape([(
        "author",
        shape([
            ("id", prim(PrimitiveKind::Number)),
            ("name", prim(PrimitiveKind::String)),
        ])
        .into(),
    )]);
    let raw = json!({ "author": { "id": 1, "name": "John", "password": "123" } });

    assert_eq!(
        s.apply(&raw),
        json!({ "author": { "id": 1, "name": "John" } })
    );
}

#[test]
fn test_scenario_comment_array() {
    let comments = array(shape([
        ("id", prim(PrimitiveKind::Number)),
        ("text", prim(PrimitiveKind::String)),
    ]));
    let raw = json!([
        { "id": 1, "text": "Great post!", "spam": true },
        { "id": 2, "text": "Nice!", "token": "xxx" }
    ]);

    assert_eq!(
        apply_shape(&comments, &raw),
        json!([
            { "id": 1, "text": "Great post!" },
            { "id": 2, "text": "Nice!" }
        ])
    );
}

#[test]
fn test_scenario_employee_record() {
    // A date-bearing record: dob and created_at must be declared `any`
    // because dates arrive as strings after serialization.
    let employee = shape([
        ("id", prim(PrimitiveKind::Any)),
        ("emp_id", prim(PrimitiveKind::String)),
        ("name", prim(PrimitiveKind::String)),
        ("email", prim(PrimitiveKind::String)),
        ("role", prim(PrimitiveKind::String)),
        ("dob", prim(PrimitiveKind::Any)),
        ("created_at", prim(PrimitiveKind::Any)),
    ]);
    let raw = json!({
        "id": "665f1c2e9b1e8a0012345678",
        "emp_id": "E-1009",
        "name": "Ada",
        "email": "ada@example.com",
        "role": "engineer",
        "dob": "1990-04-02T00:00:00Z",
        "created_at": "2026-08-06T10:00:00Z",
        "password": "never",
        "__v": 0
    });

    let filtered = employee.apply(&raw);
    assert_eq!(filtered["dob"], json!("1990-04-02T00:00:00Z"));
    assert_eq!(filtered["emp_id"], json!("E-1009"));
    assert!(filtered.get("password").is_none());
    assert!(filtered.get("__v").is_none());
}

// ============================================================================
// Fail-Safe Degradation
// ============================================================================

#[test]
fn test_hostile_inputs_never_panic() {
    let spec: FieldSpec = post_shape().into();
    let hostile = vec![
        json!(null),
        json!(0),
        json!(""),
        json!([]),
        json!({}),
        json!({ "author": [1, 2, 3], "comments": { "not": "a list" } }),
        json!([[[[[[]]]]]]),
    ];

    for raw in hostile {
        let filtered = apply_shape(&spec, &raw);
        assert!(filtered.is_object());
    }
}

#[test]
fn test_mixed_garbage_array_keeps_only_conforming_elements() {
    let spec = array(shape([("id", prim(PrimitiveKind::Number))]));
    let raw = json!([{ "id": 1 }, "junk", null, { "id": "no" }, { "id": 2 }]);

    // Non-object elements still produce (empty) objects; wrong-typed ids
    // are omitted inside them.
    let filtered = apply_shape(&spec, &raw);
    let items = filtered.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0], json!({ "id": 1 }));
    assert_eq!(items[1], json!({}));
    assert_eq!(items[3], json!({}));
    assert_eq!(items[4], json!({ "id": 2 }));
}

#[test]
fn test_explicit_empty_policy_disables_redaction_layer() {
    let policy = SensitivePolicy::empty();
    let s = shape([("password", prim(PrimitiveKind::String))]);
    let raw = json!({ "password": "visible" });

    // With an empty policy the whitelist is the only layer left.
    assert_eq!(
        apply_shape_with(&s.clone().into(), &raw, &policy),
        json!({ "password": "visible" })
    );

    // The default policy still suppresses it.
    assert_eq!(s.apply(&raw), json!({}));
}

#[test]
fn test_filtered_output_is_serializable() {
    let filtered = post_shape().apply(&json!({
        "id": 1,
        "title": "t",
        "author": { "id": 1, "name": "n" },
        "comments": []
    }));

    let text = serde_json::to_string(&filtered).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, filtered);
}
