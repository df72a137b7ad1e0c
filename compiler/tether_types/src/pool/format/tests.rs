use pretty_assertions::assert_eq;

use crate::{ClassId, ShapeId, ShapePool};

#[test]
fn leaves() {
    let pool = ShapePool::new();
    assert_eq!(pool.format_shape(ShapeId::INT32), "int32");
    assert_eq!(pool.format_shape(ShapeId::BOOLEAN), "bool");
    assert_eq!(pool.format_shape(ShapeId::CHAR), "char");
    assert_eq!(pool.format_shape(ShapeId::OPAQUE), "<opaque>");
}

#[test]
fn wrappers_nest_in_order() {
    let mut pool = ShapePool::new();
    let arr = pool.array(ShapeId::STRING);
    let opt = pool.nullable(arr);
    let task = pool.async_result(Some(opt));
    assert_eq!(pool.format_shape(task), "async<[string]?>");

    let void_task = pool.async_void();
    assert_eq!(pool.format_shape(void_task), "async");
}

#[test]
fn classes_use_names_when_available() {
    let mut pool = ShapePool::new();
    let person = pool.user_exported(ClassId::from_raw(1));
    let list = pool.array(person);

    assert_eq!(pool.format_shape(list), "[class#1]");

    let names = vec!["Acme.Address".to_string(), "Acme.Person".to_string()];
    assert_eq!(pool.format_shape_with(list, names.as_slice()), "[Acme.Person]");
}

#[test]
fn delegates() {
    let mut pool = ShapePool::new();
    let callback = pool.delegate(&[ShapeId::INT32, ShapeId::STRING], ShapeId::VOID);
    assert_eq!(pool.format_shape(callback), "(int32, string) -> void");
}
