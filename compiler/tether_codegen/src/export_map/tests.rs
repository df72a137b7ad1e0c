use pretty_assertions::assert_eq;

use tether_graph::{ClassDecl, ConstructorDecl, HostTypeRef, MethodDecl, ParamDecl, PropertyDecl};
use tether_types::ShapeId;

use crate::test_helpers::Fixture;

use super::*;

fn named(name: &str) -> HostTypeRef {
    HostTypeRef::named(name)
}

fn build(fx: &Fixture) -> Result<ExportMap, CodegenError> {
    ExportMap::build(fx.model(), &NamingPolicy::default())
}

fn names(class: &ExportedClass) -> Vec<&str> {
    class.functions.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn instance_class_functions() {
    let fx = Fixture::new(vec![ClassDecl::new("Acme", "Person")
        .with_property(PropertyDecl::read_write("Name", named("string")))
        .with_property(PropertyDecl::read_only("Id", named("int")))
        .with_method(MethodDecl::new(
            "Greet",
            vec![ParamDecl::new("value", named("string"))],
            named("string"),
        ))]);
    let map = build(&fx).unwrap();
    let person = map.lookup(&["Acme", "PersonInterop"]).unwrap();

    assert_eq!(
        names(person),
        vec!["ctor", "get_Name", "set_Name", "get_Id", "Greet"]
    );

    let ctor = person.function_for(FunctionKind::Constructor).unwrap();
    assert_eq!(
        ctor.params,
        vec![("init_Name".to_string(), BoundaryType::Shape(ShapeId::STRING))]
    );
    assert_eq!(ctor.returns, BoundaryType::Handle);

    let setter = person.function_for(FunctionKind::Setter(0)).unwrap();
    assert_eq!(
        setter.params,
        vec![
            ("instance".to_string(), BoundaryType::Handle),
            ("value".to_string(), BoundaryType::Shape(ShapeId::STRING)),
        ]
    );
    assert_eq!(setter.returns, BoundaryType::Shape(ShapeId::VOID));

    // Declared parameter names are escaped away from generated locals.
    let greet = person.function_for(FunctionKind::Method(0)).unwrap();
    assert_eq!(greet.params[1].0, "value_");
}

#[test]
fn static_class_has_no_handle() {
    let fx = Fixture::new(vec![ClassDecl::new("Acme.Util", "Clock")
        .into_static()
        .with_property(PropertyDecl::read_only("Now", named("DateTime")))
        .with_method(MethodDecl::new("Reset", vec![], HostTypeRef::void()))]);
    let map = build(&fx).unwrap();
    let clock = map.lookup(&["Acme", "Util", "ClockInterop"]).unwrap();

    assert_eq!(names(clock), vec!["get_Now", "Reset"]);
    assert!(clock.functions.iter().all(|f| f.params.is_empty()));
}

#[test]
fn constructor_params_then_member_initializers() {
    let fx = Fixture::new(vec![
        ClassDecl::new("Acme", "Money")
            .with_property(PropertyDecl::read_only("Amount", named("double")))
            .with_property(PropertyDecl::read_write("Currency", named("string")))
            .with_constructor(ConstructorDecl::new(
                vec![ParamDecl::new("amount", named("double"))],
                true,
            )),
        ClassDecl::new("Acme", "Hidden")
            .with_constructor(ConstructorDecl::new(vec![], false))
            .with_property(PropertyDecl::read_write("X", named("int"))),
    ]);
    let map = build(&fx).unwrap();

    let money = map.lookup_class(fx.class("Acme.Money").id).unwrap();
    let ctor = money.function_for(FunctionKind::Constructor).unwrap();
    let params: Vec<_> = ctor.params.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(params, vec!["amount", "init_Currency"]);

    let hidden = map.lookup_class(fx.class("Acme.Hidden").id).unwrap();
    assert_eq!(names(hidden), vec!["get_X", "set_X"]);
}

#[test]
fn tree_mirrors_namespaces() {
    let fx = Fixture::new(vec![
        ClassDecl::new("Acme", "Person"),
        ClassDecl::new("Acme.Billing", "Invoice"),
        ClassDecl::new("", "Widget"),
    ]);
    let map = build(&fx).unwrap();
    let root = map.root();

    assert_eq!(root.classes.keys().collect::<Vec<_>>(), vec!["WidgetInterop"]);
    let acme = &root.namespaces["Acme"];
    assert_eq!(acme.classes.keys().collect::<Vec<_>>(), vec!["PersonInterop"]);
    assert!(acme.namespaces["Billing"].classes.contains_key("InvoiceInterop"));

    let invoice = fx.class("Acme.Billing.Invoice").id;
    assert_eq!(
        map.lookup_class(invoice),
        map.lookup(&["Acme", "Billing", "InvoiceInterop"])
    );
    assert!(map.lookup_class(invoice).is_some());
    assert!(map.lookup(&[]).is_none());
    assert!(map.lookup(&["Acme", "Missing"]).is_none());
}

// ── Collisions ──────────────────────────────────────────────────

#[test]
fn method_colliding_with_accessor() {
    let fx = Fixture::new(vec![ClassDecl::new("Acme", "Person")
        .with_property(PropertyDecl::read_write("Name", named("string")))
        .with_method(MethodDecl::new("get_Name", vec![], named("string")))]);

    assert_eq!(
        build(&fx).unwrap_err(),
        CodegenError::ExportCollision {
            path: "Acme.PersonInterop.get_Name".to_string(),
            first: "the getter of `Acme.Person.Name`".to_string(),
            second: "method `Acme.Person.get_Name`".to_string(),
        }
    );
}

#[test]
fn class_colliding_with_namespace() {
    let fx = Fixture::new(vec![
        ClassDecl::new("Acme", "Billing"),
        ClassDecl::new("Acme.BillingInterop", "Invoice"),
    ]);

    let err = build(&fx).unwrap_err();
    assert!(
        matches!(&err, CodegenError::ExportCollision { path, .. } if path == "Acme.BillingInterop"),
        "{err}"
    );
}

#[test]
fn member_named_like_the_handle_field() {
    let fx = Fixture::new(vec![
        ClassDecl::new("Acme", "Holder")
            .with_property(PropertyDecl::read_write("instance", named("string"))),
        ClassDecl::new("Acme", "Factory").with_method(MethodDecl::new(
            "instance",
            vec![],
            named("Holder"),
        )),
    ]);

    assert_eq!(
        build(&fx).unwrap_err(),
        CodegenError::ExportCollision {
            path: "Acme.Holder.instance".to_string(),
            first: "the `instance` handle field of every proxy".to_string(),
            second: "property `Acme.Holder.instance`".to_string(),
        }
    );

    // A renamed handle field frees the name.
    let naming = NamingPolicy {
        handle_field: "handle".to_string(),
        ..NamingPolicy::default()
    };
    let map = ExportMap::build(fx.model(), &naming).unwrap();
    let holder = map.lookup(&["Acme", "HolderInterop"]).unwrap();
    assert_eq!(names(holder), vec!["ctor", "get_instance", "set_instance"]);
}

#[test]
fn handle_field_clash_names_methods_too() {
    let fx = Fixture::new(vec![ClassDecl::new("Acme", "Factory").with_method(
        MethodDecl::new("instance", vec![], named("string")),
    )]);

    let err = build(&fx).unwrap_err();
    assert!(
        matches!(&err, CodegenError::ExportCollision { second, .. } if second == "method `Acme.Factory.instance`"),
        "{err}"
    );
}

#[test]
fn static_class_may_use_the_handle_field_name() {
    let fx = Fixture::new(vec![ClassDecl::new("Acme", "Registry")
        .into_static()
        .with_property(PropertyDecl::read_only("instance", named("string")))]);

    let map = build(&fx).unwrap();
    let registry = map.lookup(&["Acme", "RegistryInterop"]).unwrap();
    assert_eq!(names(registry), vec!["get_instance"]);
}
