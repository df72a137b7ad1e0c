use pretty_assertions::assert_eq;

use super::*;

#[test]
fn leaves_at_correct_indices() {
    let pool = ShapePool::new();

    assert_eq!(pool.get(ShapeId::BYTE), &ShapeData::Primitive(PrimitiveKind::Byte));
    assert_eq!(pool.get(ShapeId::INT32), &ShapeData::Primitive(PrimitiveKind::Int32));
    assert_eq!(pool.get(ShapeId::STRING), &ShapeData::Primitive(PrimitiveKind::String));
    assert_eq!(pool.tag(ShapeId::BOOLEAN), ShapeTag::Boolean);
    assert_eq!(pool.tag(ShapeId::CHAR), ShapeTag::CharacterUnit);
    assert_eq!(pool.tag(ShapeId::DATE), ShapeTag::DateValue);
    assert_eq!(pool.tag(ShapeId::VOID), ShapeTag::Void);
    assert_eq!(pool.tag(ShapeId::UNKNOWN), ShapeTag::Unknown);
    assert_eq!(pool.tag(ShapeId::OPAQUE), ShapeTag::OpaqueHostObject);
}

#[test]
fn pool_starts_with_leaves() {
    let pool = ShapePool::new();
    assert_eq!(pool.len(), ShapeId::FIRST_DYNAMIC as usize);
    assert!(!pool.is_empty());
}

// ── Flags ──

#[test]
fn leaf_flags() {
    let pool = ShapePool::new();

    let int = pool.flags(ShapeId::INT32);
    assert!(int.contains(ShapeFlags::IS_PRIMITIVE_LIKE | ShapeFlags::IS_VALUE_TYPE));
    assert!(!int.needs_conversion());

    let string = pool.flags(ShapeId::STRING);
    assert!(string.contains(ShapeFlags::IS_PRIMITIVE_LIKE));
    assert!(!string.contains(ShapeFlags::IS_VALUE_TYPE));

    assert!(pool.flags(ShapeId::CHAR).needs_conversion());
    assert!(!pool.flags(ShapeId::DATE).needs_conversion());
    assert!(pool.flags(ShapeId::OPAQUE).contains(ShapeFlags::IS_HANDLE));
    assert!(!pool.flags(ShapeId::OPAQUE).needs_conversion());
}

#[test]
fn flags_propagate_to_wrappers() {
    let mut pool = ShapePool::new();
    let person = pool.user_exported(ClassId::from_raw(0));
    let list = pool.array(person);
    let maybe = pool.nullable(list);
    let task = pool.async_result(Some(maybe));

    for id in [person, list, maybe, task] {
        let flags = pool.flags(id);
        assert!(flags.needs_conversion(), "{}", pool.format_shape(id));
        assert!(flags.has_user_class(), "{}", pool.format_shape(id));
    }
    // Handle is a category of the leaf only
    assert!(pool.flags(person).contains(ShapeFlags::IS_HANDLE));
    assert!(!pool.flags(list).contains(ShapeFlags::IS_HANDLE));
    assert!(pool.flags(list).contains(ShapeFlags::IS_WRAPPER));
}

#[test]
fn char_conversion_propagates() {
    let mut pool = ShapePool::new();
    let chars = pool.array(ShapeId::CHAR);
    assert!(pool.flags(chars).needs_conversion());

    let ints = pool.array(ShapeId::INT32);
    assert!(!pool.flags(ints).needs_conversion());
}

#[test]
fn mark_client_constructible_repropagates() {
    let mut pool = ShapePool::new();
    let a = ClassId::from_raw(0);
    let b = ClassId::from_raw(1);
    let shape_a = pool.user_exported(a);
    let shape_b = pool.user_exported(b);
    let list_a = pool.array(shape_a);
    let maybe_list_a = pool.nullable(list_a);
    let list_b = pool.array(shape_b);
    let callback = pool.delegate(&[shape_a], ShapeId::VOID);

    assert!(!pool.flags(maybe_list_a).supports_client_construction());

    pool.mark_client_constructible([a]);

    assert!(pool.flags(shape_a).supports_client_construction());
    assert!(pool.flags(list_a).supports_client_construction());
    assert!(pool.flags(maybe_list_a).supports_client_construction());
    assert!(!pool.flags(list_b).supports_client_construction());
    assert!(!pool.flags(callback).supports_client_construction());
    assert!(pool.flags(callback).needs_conversion());

    // Shapes interned after marking see the mark too
    let task_a = pool.async_result(Some(shape_a));
    assert!(pool.flags(task_a).supports_client_construction());
}

// ── Terminal ──

#[test]
fn terminal_strips_wrappers() {
    let mut pool = ShapePool::new();
    let person = pool.user_exported(ClassId::from_raw(4));
    let maybe = pool.nullable(person);
    let list = pool.array(maybe);
    let task = pool.async_result(Some(list));

    assert_eq!(pool.terminal(task), person);
    assert_eq!(pool.user_class(task), Some(ClassId::from_raw(4)));
    assert_eq!(pool.terminal(ShapeId::INT32), ShapeId::INT32);
    assert_eq!(pool.user_class(ShapeId::INT32), None);

    let void_task = pool.async_void();
    assert_eq!(pool.terminal(void_task), ShapeId::VOID);
}

#[test]
fn children_precede_parents() {
    let mut pool = ShapePool::new();
    let list = pool.array(ShapeId::INT16);
    let maybe = pool.nullable(list);
    let d = pool.delegate(&[maybe], list);
    assert!(list < maybe);
    assert!(maybe < d);
}
