use keyscene_scene_core::{
    render_frame, CanvasSize, Color, DrawCommand, KindRegistry, ObjectRole, Project, RenderOptions,
    Vec2,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9
}

fn mk_project() -> (Project, KindRegistry) {
    let reg = KindRegistry::with_builtins();
    (
        Project::new("render", CanvasSize::new(200.0, 100.0), 5.0),
        reg,
    )
}

fn set(p: &mut Project, role: ObjectRole, name: &str, prop: &str, v: impl Into<keyscene_scene_core::Value>) {
    p.set_property(role, name, prop, v).unwrap();
}

/// it should scale rect geometry and stroke width by the viewport fit
#[test]
fn rect_is_scaled_and_pivoted() {
    let (mut p, reg) = mk_project();
    p.add_visual("box", "Rect", &reg).unwrap();
    set(&mut p, ObjectRole::Visual, "box", "#pos", "[50,50");
    set(&mut p, ObjectRole::Visual, "box", "#size", "[20,10");
    set(&mut p, ObjectRole::Visual, "box", "lineWidth", 3.0);
    set(&mut p, ObjectRole::Visual, "box", "sizeMul", 2.0);

    let frame = render_frame(&p, &reg, Vec2::new(400.0, 400.0), &RenderOptions::default());
    assert_eq!(frame.layout.scale, 2.0);
    assert_eq!(
        frame.commands.as_slice(),
        &[DrawCommand::StrokeRect {
            pos: Vec2::new(80.0, 90.0),
            size: Vec2::new(80.0, 40.0),
            color: Color::WHITE,
            line_width: 6.0,
        }]
    );
}

/// it should emit filled and stroked ellipses for circles
#[test]
fn circle_fill_and_stroke() {
    let (mut p, reg) = mk_project();
    p.add_visual("c", "Circle", &reg).unwrap();
    set(&mut p, ObjectRole::Visual, "c", "#pos", "[10,20");
    set(&mut p, ObjectRole::Visual, "c", "#size", "[5,5");
    set(&mut p, ObjectRole::Visual, "c", "radiusMul", 2.0);
    let frame = render_frame(&p, &reg, Vec2::new(200.0, 100.0), &RenderOptions::default());
    assert!(matches!(
        frame.commands.as_slice(),
        [DrawCommand::StrokeEllipse { center, radii, line_width, .. }]
            if *center == Vec2::new(10.0, 20.0) && *radii == Vec2::new(10.0, 10.0) && *line_width == 1.0
    ));

    set(&mut p, ObjectRole::Visual, "c", "fill", true);
    let frame = render_frame(&p, &reg, Vec2::new(100.0, 100.0), &RenderOptions::default());
    assert!(matches!(
        frame.commands.as_slice(),
        [DrawCommand::FillEllipse { center, radii, .. }]
            if *center == Vec2::new(5.0, 10.0) && *radii == Vec2::new(5.0, 5.0)
    ));
}

/// it should hide zero-width lines and scale the others
#[test]
fn line_width_rules() {
    let (mut p, reg) = mk_project();
    p.add_visual("l", "Line", &reg).unwrap();
    set(&mut p, ObjectRole::Visual, "l", "#from", "[0,0");
    set(&mut p, ObjectRole::Visual, "l", "#to", "[10,10");
    set(&mut p, ObjectRole::Visual, "l", "lineWidth", 0.0);
    let frame = render_frame(&p, &reg, Vec2::new(400.0, 200.0), &RenderOptions::default());
    assert!(frame.commands.is_empty());
    assert!(frame.skipped.is_empty());

    set(&mut p, ObjectRole::Visual, "l", "lineWidth", 1.5);
    let frame = render_frame(&p, &reg, Vec2::new(400.0, 200.0), &RenderOptions::default());
    assert_eq!(
        frame.commands.as_slice(),
        &[DrawCommand::Line {
            from: Vec2::ZERO,
            to: Vec2::new(20.0, 20.0),
            color: Color::WHITE,
            line_width: 3.0,
        }]
    );
}

/// it should unescape, clamp and fade text
#[test]
fn text_content_and_opacity() {
    let (mut p, reg) = mk_project();
    p.add_visual("t", "Text", &reg).unwrap();
    set(&mut p, ObjectRole::Visual, "t", "#pos", "[%0.5,0.5");
    set(&mut p, ObjectRole::Visual, "t", "text", "ab\\ncd");
    set(&mut p, ObjectRole::Visual, "t", "length", 4.0);
    set(&mut p, ObjectRole::Visual, "t", "opacity", 0.5);
    let frame = render_frame(&p, &reg, Vec2::new(100.0, 50.0), &RenderOptions::default());
    let [DrawCommand::Text {
        pos,
        height,
        text,
        center,
        font,
        color,
    }] = frame.commands.as_slice()
    else {
        panic!("expected one text command, got {:?}", frame.commands);
    };
    assert_eq!(*pos, Vec2::new(50.0, 25.0));
    assert!(approx(*height, 10.0));
    assert_eq!(text, "ab\nc");
    assert!(*center);
    assert_eq!(font, "Verdana");
    assert!(approx(color.alpha(), 127.5));
}

/// it should skip a visual whose anchor was deleted without failing the frame
#[test]
fn dangling_reference_skips_visual() {
    let (mut p, reg) = mk_project();
    p.add_anchor("spot", "Position", &reg).unwrap();
    p.add_visual("dot", "Circle", &reg).unwrap();
    p.add_visual("box", "Rect", &reg).unwrap();
    set(&mut p, ObjectRole::Visual, "dot", "#pos", "spot");

    let frame = render_frame(&p, &reg, Vec2::new(200.0, 100.0), &RenderOptions::default());
    assert_eq!(frame.commands.len(), 2);
    assert!(frame.skipped.is_empty());

    p.remove_object(ObjectRole::Anchor, "spot").unwrap();
    let frame = render_frame(&p, &reg, Vec2::new(200.0, 100.0), &RenderOptions::default());
    assert_eq!(frame.commands.len(), 1);
    assert_eq!(frame.skipped, vec!["dot".to_string()]);
}

/// it should draw visuals in insertion order and ignore unregistered kinds
#[test]
fn draw_order_and_unknown_kinds() {
    let (mut p, reg) = mk_project();
    p.add_visual("line", "Line", &reg).unwrap();
    set(&mut p, ObjectRole::Visual, "line", "#from", "[0,0");
    set(&mut p, ObjectRole::Visual, "line", "#to", "[1,1");
    p.visuals.insert(
        "sprite".into(),
        keyscene_scene_core::SceneObject::new("Sprite", Default::default()),
    );
    p.add_visual("box", "Rect", &reg).unwrap();
    p.add_visual("ring", "Circle", &reg).unwrap();

    let frame = render_frame(&p, &reg, Vec2::new(200.0, 100.0), &RenderOptions::default());
    let ops: Vec<_> = frame
        .commands
        .iter()
        .map(|c| match c {
            DrawCommand::Line { .. } => "line",
            DrawCommand::StrokeRect { .. } => "rect",
            DrawCommand::StrokeEllipse { .. } => "ellipse",
            _ => "other",
        })
        .collect();
    assert_eq!(ops, ["line", "rect", "ellipse"]);
    assert!(frame.skipped.is_empty());
}

/// it should clear with the background first and draw nothing into an empty viewport
#[test]
fn background_and_empty_viewport() {
    let (mut p, reg) = mk_project();
    p.add_visual("box", "Rect", &reg).unwrap();
    let opts = RenderOptions {
        background: Some(Color::BLACK),
        ..RenderOptions::default()
    };
    let frame = render_frame(&p, &reg, Vec2::new(200.0, 100.0), &opts);
    assert_eq!(
        frame.commands.as_slice().first(),
        Some(&DrawCommand::Clear {
            color: Color::BLACK,
            size: Vec2::new(200.0, 100.0)
        })
    );
    assert_eq!(frame.commands.len(), 2);

    let frame = render_frame(&p, &reg, Vec2::new(0.0, 100.0), &opts);
    assert!(frame.commands.is_empty());
}
