use pretty_assertions::assert_eq;

use tether_types::ShapePool;

use crate::{
    build_graph, BuildOptions, ClassDecl, ClassGraph, ConstructorDecl, HostTypeRef, ParamDecl,
    PropertyDecl,
};

use super::*;

fn named(name: &str) -> HostTypeRef {
    HostTypeRef::named(name)
}

fn run(decls: &[ClassDecl]) -> (ClassGraph, ShapePool, Classification) {
    let mut pool = ShapePool::new();
    let graph = build_graph(decls, &mut pool, &BuildOptions::default()).unwrap();
    let result = classify(&graph, &pool);
    (graph, pool, result)
}

fn id(graph: &ClassGraph, name: &str) -> ClassId {
    graph.lookup(name).unwrap().id
}

// ── Primitive properties ────────────────────────────────────────

#[test]
fn primitive_class_is_fully_compatible() {
    let decls = vec![ClassDecl::new("Acme", "Person")
        .with_property(PropertyDecl::read_write("Name", named("string")))
        .with_property(PropertyDecl::read_write("Initial", named("char")))
        .with_property(PropertyDecl::read_write("Born", named("DateTime")))
        .with_property(PropertyDecl::read_only("Tags", HostTypeRef::array(named("string"))))];
    let (graph, _, result) = run(&decls);
    let person = id(&graph, "Acme.Person");

    let compat = result.class(person).unwrap();
    assert!(compat.snapshot);
    assert!(compat.initializer);
    assert!(compat.accepts_initializer);
    assert!(compat.offers_union);
    assert_eq!(compat.member_initializers, vec![0, 1, 2]);
    assert_eq!(result.union_classes().collect::<Vec<_>>(), vec![person]);
}

#[test]
fn wrapped_primitives_are_snapshot_compatible() {
    let deep = HostTypeRef::generic(
        "Task",
        vec![HostTypeRef::nullable(HostTypeRef::array(named("int")))],
    );
    let decls = vec![ClassDecl::new("", "Stats").with_property(PropertyDecl::read_only("Values", deep))];
    let (graph, _, result) = run(&decls);

    let stats = id(&graph, "Stats");
    assert_eq!(
        result.property(stats, 0),
        Some(PropertyCompat {
            snapshot: true,
            initializer: false,
        })
    );
    assert!(result.is_snapshot_compatible(stats));
}

#[test]
fn opaque_and_void_terminals_are_not_snapshot_compatible() {
    let decls = vec![ClassDecl::new("", "Handle")
        .with_property(PropertyDecl::read_only("Stream", named("System.IO.Stream")))
        .with_property(PropertyDecl::read_only("Done", named("Task")))];
    let (graph, _, result) = run(&decls);
    let handle = id(&graph, "Handle");

    assert!(!result.property(handle, 0).unwrap().snapshot);
    assert!(!result.property(handle, 1).unwrap().snapshot);
    assert!(!result.is_snapshot_compatible(handle));
}

#[test]
fn write_only_property_is_not_snapshot_but_may_initialize() {
    let decls = vec![ClassDecl::new("", "Secret")
        .with_property(PropertyDecl::write_only("Password", named("string")))];
    let (graph, _, result) = run(&decls);
    let secret = id(&graph, "Secret");

    let prop = result.property(secret, 0).unwrap();
    assert!(!prop.snapshot);
    assert!(prop.initializer);
    // No readable property blocks the snapshot
    assert!(result.is_snapshot_compatible(secret));
    assert!(result.offers_union(secret));
}

// ── Exported classes ────────────────────────────────────────────

#[test]
fn nested_class_compatibility_recurses() {
    let decls = vec![
        ClassDecl::new("Acme", "Person")
            .with_property(PropertyDecl::read_write("Home", HostTypeRef::nullable(named("Address")))),
        ClassDecl::new("Acme", "Address")
            .with_property(PropertyDecl::read_write("Street", named("string"))),
    ];
    let (graph, _, result) = run(&decls);
    let person = id(&graph, "Acme.Person");

    assert!(result.is_snapshot_compatible(person));
    assert!(result.property(person, 0).unwrap().initializer);
    assert!(result.offers_union(person));
}

#[test]
fn incompatible_member_class_poisons_snapshot() {
    let decls = vec![
        ClassDecl::new("", "Outer").with_property(PropertyDecl::read_only("Inner", named("Inner"))),
        ClassDecl::new("", "Inner").with_property(PropertyDecl::read_only("Raw", named("object"))),
    ];
    let (graph, _, result) = run(&decls);

    assert!(!result.is_snapshot_compatible(id(&graph, "Inner")));
    assert!(!result.is_snapshot_compatible(id(&graph, "Outer")));
}

#[test]
fn initializer_requires_parameterless_member_class() {
    let decls = vec![
        ClassDecl::new("", "Order").with_property(PropertyDecl::read_write("Total", named("Money"))),
        ClassDecl::new("", "Money")
            .with_property(PropertyDecl::read_only("Amount", named("double")))
            .with_constructor(ConstructorDecl::new(
                vec![ParamDecl::new("amount", named("double"))],
                true,
            )),
    ];
    let (graph, _, result) = run(&decls);
    let order = id(&graph, "Order");
    let money = id(&graph, "Money");

    // Money snapshots fine and is initializer-compatible (no settable
    // properties), but cannot be built from a literal.
    assert!(result.is_snapshot_compatible(money));
    assert!(result.is_initializer_compatible(money));
    assert!(!result.accepts_initializer(money));
    assert!(!result.offers_union(money));

    let total = result.property(order, 0).unwrap();
    assert!(total.snapshot);
    assert!(!total.initializer);
    assert!(!result.is_initializer_compatible(order));
    assert!(result.member_initializers(order).is_empty());
}

#[test]
fn one_incompatible_setter_drops_every_member_initializer() {
    let decls = vec![ClassDecl::new("Acme", "Form")
        .with_property(PropertyDecl::read_write("Title", named("string")))
        .with_property(PropertyDecl::read_write(
            "OnSubmit",
            HostTypeRef::generic("Action", vec![named("string")]),
        ))
        .with_property(PropertyDecl::read_write("Count", named("int")))];
    let (graph, _, result) = run(&decls);
    let form = id(&graph, "Acme.Form");

    // Each primitive setter is compatible on its own.
    assert!(result.property(form, 0).unwrap().initializer);
    assert!(!result.property(form, 1).unwrap().initializer);
    assert!(result.property(form, 2).unwrap().initializer);

    let compat = result.class(form).unwrap();
    assert!(!compat.initializer);
    assert!(compat.accepts_initializer);
    assert!(!compat.offers_union);
    assert!(compat.member_initializers.is_empty());
}

#[test]
fn private_constructor_blocks_initializer() {
    let decls = vec![ClassDecl::new("", "Sealed")
        .with_property(PropertyDecl::read_write("Name", named("string")))
        .with_constructor(ConstructorDecl::new(vec![], false))];
    let (graph, _, result) = run(&decls);
    let sealed = id(&graph, "Sealed");

    assert!(result.is_snapshot_compatible(sealed));
    assert!(!result.is_initializer_compatible(sealed));
    assert!(!result.offers_union(sealed));
}

#[test]
fn static_classes_offer_nothing() {
    let decls = vec![ClassDecl::new("", "Config")
        .into_static()
        .with_property(PropertyDecl::read_write("Level", named("int")))];
    let (graph, _, result) = run(&decls);

    let compat = result.class(id(&graph, "Config")).unwrap();
    assert_eq!(compat, &ClassCompat::default());
}

// ── Cycles ──────────────────────────────────────────────────────

#[test]
fn self_reference_is_incompatible() {
    let decls = vec![ClassDecl::new("", "Node")
        .with_property(PropertyDecl::read_write("Value", named("int")))
        .with_property(PropertyDecl::read_write("Next", HostTypeRef::nullable(named("Node"))))];
    let (graph, _, result) = run(&decls);
    let node = id(&graph, "Node");

    assert!(!result.is_snapshot_compatible(node));
    assert!(!result.property(node, 1).unwrap().snapshot);
    assert!(!result.offers_union(node));
}

#[test]
fn mutual_cycle_is_incompatible_regardless_of_order() {
    for flipped in [false, true] {
        let a = ClassDecl::new("", "A").with_property(PropertyDecl::read_only("B", named("B")));
        let b = ClassDecl::new("", "B").with_property(PropertyDecl::read_only("A", named("A")));
        let decls = if flipped { vec![b, a] } else { vec![a, b] };
        let (graph, _, result) = run(&decls);

        assert!(!result.is_snapshot_compatible(id(&graph, "A")));
        assert!(!result.is_snapshot_compatible(id(&graph, "B")));
    }
}

#[test]
fn class_reaching_a_cycle_is_incompatible() {
    let decls = vec![
        ClassDecl::new("", "Root").with_property(PropertyDecl::read_only("Head", named("Link"))),
        ClassDecl::new("", "Link").with_property(PropertyDecl::read_only(
            "Others",
            HostTypeRef::array(named("Link")),
        )),
        ClassDecl::new("", "Leaf").with_property(PropertyDecl::read_only("N", named("int"))),
    ];
    let (graph, _, result) = run(&decls);

    assert!(!result.is_snapshot_compatible(id(&graph, "Root")));
    assert!(!result.is_snapshot_compatible(id(&graph, "Link")));
    assert!(result.is_snapshot_compatible(id(&graph, "Leaf")));
}

// ── Direct classifier queries ───────────────────────────────────

#[test]
fn classifier_memoizes() {
    let decls = vec![ClassDecl::new("", "P").with_property(PropertyDecl::read_only("X", named("int")))];
    let mut pool = ShapePool::new();
    let graph = build_graph(&decls, &mut pool, &BuildOptions::default()).unwrap();
    let classifier = CompatClassifier::new(&graph, &pool);
    let p = id(&graph, "P");

    assert!(classifier.is_snapshot_compatible(p));
    assert!(classifier.is_snapshot_compatible(p));
    assert!(!classifier.is_snapshot_compatible(ClassId::from_raw(42)));
}
