use pretty_assertions::assert_eq;

use tether_types::{ShapeData, ShapeTag};

use super::*;

fn unsupported() -> FxHashSet<String> {
    DEFAULT_UNSUPPORTED_TYPES
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn index(classes: &[(&str, &str)]) -> ClassIndex {
    let mut index = ClassIndex::default();
    for (simple, qualified) in classes {
        assert!(index.insert(simple, qualified));
    }
    index
}

fn resolve(pool: &mut ShapePool, classes: &ClassIndex, ty: &HostTypeRef) -> Result<ShapeId, GraphError> {
    let unsupported = unsupported();
    TypeResolver::new(pool, classes, &unsupported).resolve(ty, "Test.Member")
}

// ── Built-ins ───────────────────────────────────────────────────

#[test]
fn keyword_and_system_spellings_agree() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();
    let pairs = [
        ("byte", "System.Byte", ShapeId::BYTE),
        ("short", "System.Int16", ShapeId::INT16),
        ("int", "System.Int32", ShapeId::INT32),
        ("long", "System.Int64", ShapeId::INT64),
        ("float", "System.Single", ShapeId::SINGLE),
        ("double", "System.Double", ShapeId::DOUBLE),
        ("string", "System.String", ShapeId::STRING),
        ("bool", "System.Boolean", ShapeId::BOOLEAN),
        ("char", "System.Char", ShapeId::CHAR),
        ("DateTime", "System.DateTimeOffset", ShapeId::DATE),
        ("void", "System.Void", ShapeId::VOID),
        ("object", "System.Object", ShapeId::OPAQUE),
    ];
    for (keyword, system, expected) in pairs {
        assert_eq!(resolve(&mut pool, &classes, &HostTypeRef::named(keyword)), Ok(expected));
        assert_eq!(resolve(&mut pool, &classes, &HostTypeRef::named(system)), Ok(expected));
    }
}

#[test]
fn unresolved_is_unknown() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();
    assert_eq!(
        resolve(&mut pool, &classes, &HostTypeRef::Unresolved),
        Ok(ShapeId::UNKNOWN)
    );
}

// ── Wrappers ────────────────────────────────────────────────────

#[test]
fn task_forms() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();

    let bare = resolve(&mut pool, &classes, &HostTypeRef::named("Task")).unwrap();
    let qualified =
        resolve(&mut pool, &classes, &HostTypeRef::named("System.Threading.Tasks.Task")).unwrap();
    assert_eq!(bare, qualified);
    assert_eq!(pool.get(bare), &ShapeData::AsyncResult(None));

    let task_int = resolve(
        &mut pool,
        &classes,
        &HostTypeRef::generic("Task", vec![HostTypeRef::named("int")]),
    )
    .unwrap();
    assert_eq!(pool.get(task_int), &ShapeData::AsyncResult(Some(ShapeId::INT32)));
}

#[test]
fn nullable_generic_and_suffix_agree() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();
    let generic = resolve(
        &mut pool,
        &classes,
        &HostTypeRef::generic("System.Nullable", vec![HostTypeRef::named("long")]),
    )
    .unwrap();
    let suffix = resolve(
        &mut pool,
        &classes,
        &HostTypeRef::nullable(HostTypeRef::named("long")),
    )
    .unwrap();
    assert_eq!(generic, suffix);
    assert_eq!(pool.tag(generic), ShapeTag::Nullable);
}

#[test]
fn nested_arrays() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();
    let ty = HostTypeRef::array(HostTypeRef::array(HostTypeRef::named("double")));
    let shape = resolve(&mut pool, &classes, &ty).unwrap();
    assert_eq!(pool.format_shape(shape), "[[double]]");
}

// ── Delegates ───────────────────────────────────────────────────

#[test]
fn func_and_action() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();

    let func = resolve(
        &mut pool,
        &classes,
        &HostTypeRef::generic(
            "Func",
            vec![HostTypeRef::named("int"), HostTypeRef::named("bool")],
        ),
    )
    .unwrap();
    assert_eq!(pool.format_shape(func), "(int32) -> bool");

    let action = resolve(
        &mut pool,
        &classes,
        &HostTypeRef::generic("System.Action", vec![HostTypeRef::named("string")]),
    )
    .unwrap();
    assert_eq!(pool.format_shape(action), "(string) -> void");

    let bare_action = resolve(&mut pool, &classes, &HostTypeRef::named("Action")).unwrap();
    assert_eq!(pool.format_shape(bare_action), "() -> void");
}

#[test]
fn func_without_return_is_invalid() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();
    let err = resolve(&mut pool, &classes, &HostTypeRef::generic("Func", vec![])).unwrap_err();
    assert!(matches!(err, GraphError::InvalidDelegate { .. }));
}

#[test]
fn void_delegate_parameter_is_invalid() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();
    let ty = HostTypeRef::Delegate {
        params: vec![HostTypeRef::void()],
        returns: None,
    };
    let err = resolve(&mut pool, &classes, &ty).unwrap_err();
    assert_eq!(
        err,
        GraphError::InvalidDelegate {
            ty: "(void) => void".to_string(),
            member: "Test.Member".to_string(),
            reason: "a parameter cannot be void",
        }
    );
}

// ── Classes ─────────────────────────────────────────────────────

#[test]
fn exported_classes_by_qualified_and_simple_name() {
    let mut pool = ShapePool::new();
    let classes = index(&[("Person", "Acme.Person"), ("Address", "Acme.Geo.Address")]);

    let qualified = resolve(&mut pool, &classes, &HostTypeRef::named("Acme.Geo.Address")).unwrap();
    let simple = resolve(&mut pool, &classes, &HostTypeRef::named("Address")).unwrap();
    assert_eq!(qualified, simple);
    assert_eq!(pool.user_class(simple), Some(ClassId::from_raw(1)));
}

#[test]
fn ambiguous_simple_name() {
    let mut pool = ShapePool::new();
    let classes = index(&[("Item", "A.Item"), ("Item", "B.Item")]);

    let err = resolve(&mut pool, &classes, &HostTypeRef::named("Item")).unwrap_err();
    assert_eq!(
        err,
        GraphError::AmbiguousClass {
            name: "Item".to_string(),
            member: "Test.Member".to_string(),
            candidates: "`A.Item`, `B.Item`".to_string(),
        }
    );
    // Qualified references stay fine
    assert!(resolve(&mut pool, &classes, &HostTypeRef::named("B.Item")).is_ok());
}

#[test]
fn duplicate_qualified_name_is_rejected() {
    let mut index = ClassIndex::default();
    assert!(index.insert("Item", "A.Item"));
    assert!(!index.insert("Item", "A.Item"));
}

// ── Degradation ─────────────────────────────────────────────────

#[test]
fn unknown_host_types_degrade_to_opaque() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();
    assert_eq!(
        resolve(&mut pool, &classes, &HostTypeRef::named("System.IO.Stream")),
        Ok(ShapeId::OPAQUE)
    );
    assert_eq!(
        resolve(
            &mut pool,
            &classes,
            &HostTypeRef::generic("List", vec![HostTypeRef::named("int")])
        ),
        Ok(ShapeId::OPAQUE)
    );
}

#[test]
fn unimplemented_types_fail_loudly() {
    let mut pool = ShapePool::new();
    let classes = ClassIndex::default();

    let err = resolve(
        &mut pool,
        &classes,
        &HostTypeRef::generic("Span", vec![HostTypeRef::named("byte")]),
    )
    .unwrap_err();
    assert_eq!(
        err,
        GraphError::UnsupportedShape {
            ty: "Span<byte>".to_string(),
            member: "Test.Member".to_string(),
        }
    );

    // Nested inside a wrapper still fails
    let nested = HostTypeRef::nullable(HostTypeRef::named("decimal"));
    assert!(matches!(
        resolve(&mut pool, &classes, &nested),
        Err(GraphError::UnsupportedShape { ty, .. }) if ty == "decimal"
    ));
}
