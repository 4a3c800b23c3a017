use keyscene_scene_core::{
    CanvasSize, KindRegistry, ObjectRole, Project, PropertyMap, Resolver, SceneObject, Vec2,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9
}

fn approx_v(a: Vec2, x: f64, y: f64) -> bool {
    approx(a.x, x) && approx(a.y, y)
}

fn mk_project(w: f64, h: f64) -> Project {
    Project::new("test", CanvasSize::new(w, h), 5.0)
}

fn put_anchor(p: &mut Project, name: &str, kind: &str, data: PropertyMap) {
    p.anchors
        .insert(name.to_string(), SceneObject::new(kind, data));
}

fn position(x: f64, y: f64) -> PropertyMap {
    PropertyMap::new().with("x", x).with("y", y).with("useFraction", false)
}

fn rotate(center: &str, angle: f64, offset: f64) -> PropertyMap {
    PropertyMap::new()
        .with("#center", center)
        .with("angle", angle)
        .with("offset", offset)
}

/// it should read inline coordinates literally
#[test]
fn literal_reference() {
    let reg = KindRegistry::with_builtins();
    let p = mk_project(200.0, 100.0);
    let r = Resolver::for_project(&p, &reg);
    assert_eq!(r.resolve("[50,60"), Vec2::new(50.0, 60.0));
}

/// it should scale fractional literals by the canvas size
#[test]
fn fractional_literal_reference() {
    let reg = KindRegistry::with_builtins();
    let p = mk_project(200.0, 100.0);
    let r = Resolver::for_project(&p, &reg);
    assert_eq!(r.resolve("[%0.5,0.5"), Vec2::new(100.0, 50.0));
}

/// it should add chained literal offsets
#[test]
fn literal_offsets_chain() {
    let reg = KindRegistry::with_builtins();
    let p = mk_project(200.0, 100.0);
    let r = Resolver::for_project(&p, &reg);
    assert_eq!(r.resolve("[1,2[10,20[%0.5,0"), Vec2::new(111.0, 22.0));
}

/// it should add an offset suffix to an anchor's position
#[test]
fn anchor_with_offset() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    put_anchor(&mut p, "a", "Position", position(5.0, 5.0));
    let r = Resolver::for_project(&p, &reg);
    assert_eq!(r.resolve("a"), Vec2::new(5.0, 5.0));
    assert_eq!(r.resolve("a[1,-1"), Vec2::new(6.0, 4.0));
    assert_eq!(r.resolve("a[%0.1,0.1"), Vec2::new(25.0, 15.0));
}

/// it should place RotateAround on the circle around its center
#[test]
fn rotate_around_angles() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    put_anchor(&mut p, "o", "Position", position(0.0, 0.0));
    put_anchor(&mut p, "r0", "RotateAround", rotate("o", 0.0, 10.0));
    put_anchor(&mut p, "r90", "RotateAround", rotate("o", 90.0, 10.0));
    put_anchor(&mut p, "lit", "RotateAround", rotate("[0,0", 90.0, 10.0));
    let r = Resolver::for_project(&p, &reg);
    assert!(approx_v(r.resolve("r0"), 10.0, 0.0));
    assert!(approx_v(r.resolve("r90"), 0.0, 10.0));
    assert!(approx_v(r.resolve("lit"), 0.0, 10.0));
}

/// it should evaluate Position, Radius, Offset and Lerp kinds
#[test]
fn builtin_anchor_kinds() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    put_anchor(
        &mut p,
        "frac",
        "Position",
        PropertyMap::new()
            .with("x", 0.25)
            .with("y", 1.0)
            .with("useFraction", true),
    );
    put_anchor(&mut p, "rad", "Radius", PropertyMap::new().with("radius", 7.0));
    put_anchor(
        &mut p,
        "off",
        "Offset",
        PropertyMap::new()
            .with("#origin", "frac")
            .with("x", 1.0)
            .with("y", -1.0),
    );
    put_anchor(
        &mut p,
        "mid",
        "Lerp",
        PropertyMap::new()
            .with("#from", "[0,0")
            .with("#to", "frac")
            .with("frac", 0.5),
    );
    let r = Resolver::for_project(&p, &reg);
    assert_eq!(r.resolve("frac"), Vec2::new(50.0, 100.0));
    assert_eq!(r.resolve("rad"), Vec2::new(7.0, 7.0));
    assert_eq!(r.resolve("off"), Vec2::new(51.0, 99.0));
    assert_eq!(r.resolve("mid"), Vec2::new(25.0, 50.0));
}

/// it should give an undefined vector for missing anchors and unknown kinds
#[test]
fn missing_and_unregistered_anchors_are_undefined() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    put_anchor(&mut p, "spline", "Spline", PropertyMap::new());
    put_anchor(&mut p, "dangling", "Offset", PropertyMap::new().with("#origin", "gone"));
    let r = Resolver::for_project(&p, &reg);
    assert!(!r.resolve("gone").is_defined());
    assert!(!r.resolve("spline").is_defined());
    assert!(!r.resolve("dangling").is_defined());
    assert!(!r.resolve("").is_defined());
    assert!(!r.resolve("[abc,1").is_defined());
    assert!(!r.resolve("[5").is_defined());
}

/// it should stop self and mutual reference cycles with an undefined vector
#[test]
fn cycles_resolve_to_undefined() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    put_anchor(&mut p, "self", "Offset", PropertyMap::new().with("#origin", "self"));
    put_anchor(&mut p, "a", "Offset", PropertyMap::new().with("#origin", "b"));
    put_anchor(&mut p, "b", "Offset", PropertyMap::new().with("#origin", "a"));
    put_anchor(
        &mut p,
        "wide",
        "Lerp",
        PropertyMap::new()
            .with("#from", "wide")
            .with("#to", "wide")
            .with("frac", 0.5),
    );
    let r = Resolver::for_project(&p, &reg);
    assert!(!r.resolve("self").is_defined());
    assert!(!r.resolve("a").is_defined());
    assert!(!r.resolve("b").is_defined());
    assert!(!r.resolve("wide").is_defined());
}

/// it should resolve the same anchor twice when two branches share it
#[test]
fn shared_anchors_are_not_cycles() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    put_anchor(&mut p, "base", "Position", position(10.0, 0.0));
    put_anchor(
        &mut p,
        "mid",
        "Lerp",
        PropertyMap::new()
            .with("#from", "base")
            .with("#to", "base[10,10")
            .with("frac", 0.5),
    );
    let r = Resolver::for_project(&p, &reg);
    assert_eq!(r.resolve("mid"), Vec2::new(15.0, 5.0));
}

/// it should give up on chains deeper than the nesting budget
#[test]
fn depth_budget_limits_long_chains() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    put_anchor(&mut p, "n0", "Position", position(0.0, 0.0));
    for i in 1..=10 {
        let prev = format!("n{}", i - 1);
        put_anchor(
            &mut p,
            &format!("n{i}"),
            "Offset",
            PropertyMap::new()
                .with("#origin", prev)
                .with("x", 1.0)
                .with("y", 0.0),
        );
    }
    let r = Resolver::for_project(&p, &reg);
    assert_eq!(r.resolve("n10"), Vec2::new(10.0, 0.0));
    assert!(!r.clone().with_max_depth(5).resolve("n10").is_defined());
    assert_eq!(r.with_max_depth(11).resolve("n10"), Vec2::new(10.0, 0.0));
}

/// it should turn a visual's anchor undefined once that anchor is deleted
#[test]
fn deleting_an_anchor_leaves_references_dangling() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    p.add_anchor("spot", "Position", &reg).unwrap();
    let r = Resolver::for_project(&p, &reg);
    assert!(r.resolve("spot").is_defined());
    p.remove_object(ObjectRole::Anchor, "spot").unwrap();
    let r = Resolver::for_project(&p, &reg);
    assert!(!r.resolve("spot").is_defined());
}

fn diamond_chain(p: &mut Project, len: usize) {
    put_anchor(p, "n0", "Position", position(1.0, 1.0));
    for i in 1..=len {
        let prev = format!("n{}", i - 1);
        put_anchor(
            p,
            &format!("n{i}"),
            "Lerp",
            PropertyMap::new()
                .with("#from", prev.as_str())
                .with("#to", prev.as_str())
                .with("frac", 0.5),
        );
    }
}

/// it should evaluate an anchor shared by many branches once per level
#[test]
fn deep_diamond_chain_resolves() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    diamond_chain(&mut p, 60);
    let r = Resolver::for_project(&p, &reg);
    assert_eq!(r.resolve("n60"), Vec2::new(1.0, 1.0));
    assert_eq!(r.resolve("n60[1,1"), Vec2::new(2.0, 2.0));

    p.add_visual("dot", "Circle", &reg).unwrap();
    p.set_property(ObjectRole::Visual, "dot", "#pos", "n60").unwrap();
    let frame = keyscene_scene_core::render_frame(
        &p,
        &reg,
        Vec2::new(200.0, 100.0),
        &Default::default(),
    );
    assert!(frame.skipped.is_empty());
}

/// it should still apply the nesting budget to anchors resolved earlier
#[test]
fn remembered_anchors_respect_the_budget() {
    let reg = KindRegistry::with_builtins();
    let mut p = mk_project(200.0, 100.0);
    diamond_chain(&mut p, 40);
    let mut prev = "n40".to_string();
    for i in 1..=5 {
        let name = format!("o{i}");
        put_anchor(
            &mut p,
            &name,
            "Offset",
            PropertyMap::new()
                .with("#origin", prev.as_str())
                .with("x", 0.0)
                .with("y", 0.0),
        );
        prev = name;
    }
    // n40 needs 41 levels, o5 needs 46.
    let r = Resolver::for_project(&p, &reg).with_max_depth(45);
    assert_eq!(r.resolve("n40"), Vec2::new(1.0, 1.0));
    assert!(!r.resolve("o5").is_defined());
    assert_eq!(r.resolve("o4"), Vec2::new(1.0, 1.0));
}
