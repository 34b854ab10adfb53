mod common;

use autorecord::{
    body::{Body, Expr},
    proc::{Arguments, Procedure},
    records::root,
    value::Value,
};
use common::{assert_fields, construct, record, sym};

#[test]
fn child_override_keeps_inherited_position() {
    let parent = record("Parent", &[], Body::new().assign("x", 1).assign("y", 2));
    let child = record("Child", &[parent.clone()], Body::new().assign("y", 99));

    assert_fields!(child, ["x", "y"]);
    assert_eq!(child.fields().get(sym("y")), Some(&Value::from(99)));
    assert_eq!(parent.fields().get(sym("y")), Some(&Value::from(2)));

    let c = construct(&child, Arguments::new());
    assert_eq!(c.repr().unwrap(), "Child(x=1, y=99)");
    let p = construct(&parent, Arguments::new());
    assert_eq!(p.repr().unwrap(), "Parent(x=1, y=2)");
}

#[test]
fn later_parent_wins_on_collision() {
    let p1 = record("P1", &[], Body::new().assign("x", 1));
    let p2 = record("P2", &[], Body::new().assign("x", 2).assign("z", 3));
    let child = record("Both", &[p1, p2], Body::new().assign("w", 4));

    assert_fields!(child, ["x", "z", "w"]);
    assert_eq!(child.fields().get(sym("x")), Some(&Value::from(2)));

    let b = construct(&child, Arguments::new());
    assert_eq!(b.repr().unwrap(), "Both(x=2, z=3, w=4)");
}

#[test]
fn new_required_fields_move_ahead_of_inherited_defaults() {
    let base = record("Base", &[], Body::new().name("id").assign("active", true));
    let child = record("Account", &[base], Body::new().name("owner"));

    assert_fields!(child, ["id", "owner", "active"]);
    let a = construct(&child, Arguments::new().arg(7).arg("ada"));
    assert_eq!(a.repr().unwrap(), "Account(id=7, owner=\"ada\", active=true)");
}

#[test]
fn defaulting_an_inherited_required_field() {
    let base = record("Base", &[], Body::new().name("a").assign("b", 1));
    let child = record("Relaxed", &[base], Body::new().assign("a", 5));

    assert_fields!(child, ["a", "b"]);
    assert_eq!(child.fields().required().count(), 0);
    let r = construct(&child, Arguments::new());
    assert_eq!(r.repr().unwrap(), "Relaxed(a=5, b=1)");
}

#[test]
fn fieldless_child_synthesizes_its_own_members() {
    let parent = record("Shape", &[], Body::new().name("sides"));
    let child = record("Polygon", &[parent.clone()], Body::new());

    assert!(child.defines(sym("__init__")));
    assert!(child.defines(sym("__repr__")));
    let p = construct(&child, Arguments::new().arg(5));
    assert_eq!(p.repr().unwrap(), "Polygon(sides=5)");
}

#[test]
fn members_are_inherited() {
    let describe = Procedure::new("describe", 1, false, |args| {
        let this: &autorecord::records::Record = (&args[0]).try_into()?;
        Ok(Value::from(format!("a thing named {}", this.get(sym("name"))?)))
    });
    let parent = record(
        "Named",
        &[],
        Body::new().name("name").attrs().def("describe", describe),
    );
    let child = record("Pet", &[parent.clone()], Body::new().assign("legs", 4));

    assert!(!child.defines(sym("describe")));
    let pet = construct(&child, Arguments::new().arg("rex"));
    assert_eq!(
        pet.call_method(sym("describe"), Arguments::new()).unwrap(),
        Value::from("a thing named \"rex\"")
    );
    assert_eq!(pet.repr().unwrap(), "Pet(name=\"rex\", legs=4)");
}

#[test]
fn subtyping_follows_every_ancestor() {
    let a = record("A", &[root()], Body::new().name("a"));
    let b = record("B", &[root()], Body::new().name("b"));
    let c = record("C", &[a.clone(), b.clone()], Body::new());
    let d = record("D", &[c.clone()], Body::new());

    assert!(d.is_subtype_of(&d));
    assert!(d.is_subtype_of(&c));
    assert!(d.is_subtype_of(&a));
    assert!(d.is_subtype_of(&b));
    assert!(d.is_subtype_of(&root()));
    assert!(!a.is_subtype_of(&b));

    assert_fields!(d, ["a", "b"]);
    let instance = construct(&d, Arguments::new().arg(1).arg(2));
    assert!(instance.is_instance_of(&b));
    assert!(!instance.is_instance_of(&record("Other", &[], Body::new())));
}

#[test]
fn the_root_record_type() {
    let rt = root();
    assert_eq!(rt.name(), "Record");
    assert!(rt.fields().is_empty());
    let r = construct(&rt, Arguments::new());
    assert_eq!(r.repr().unwrap(), "Record()");
}

#[test]
fn bases_are_visible_to_the_body() {
    let parent = record("Parent", &[], Body::new());
    let child = record(
        "Child",
        &[parent.clone()],
        Body::new().attrs().assign_expr("BASES", Expr::name("__bases__")),
    );
    assert_eq!(
        child.attribute(sym("BASES")),
        Some(Value::list(vec![Value::from(parent)]))
    );
}
