//! End-to-end scope conversion tests
//!
//! Run with: cargo test --features tracing --test convert -- --nocapture
//! and RUST_LOG=sewpath=debug to see the converter's logging.

use sewpath::convert::scaling::ScalingSpec;
use sewpath::convert::{Calibration, convert_path};
use sewpath::{ConvertError, ConvertOptions, PathCommand, PathElement, Scope, ScopeKind};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn element(id: &str, d: &str) -> PathElement {
    PathElement::from_path_data(id, d).expect("fixture path data parses")
}

fn assemble(kind: ScopeKind, elements: Vec<PathElement>) -> (sewpath::Part, Vec<ConvertError>) {
    init_tracing();
    let scope = Scope::new(kind, elements);
    let mut diagnostics = Vec::new();
    let part = scope.assemble(&ConvertOptions::default(), &mut diagnostics);
    (part, diagnostics)
}

#[test]
fn relative_curve_renders_absolute_points() {
    let (part, diagnostics) = assemble(
        ScopeKind::Design,
        vec![element("c", "m 10 10 c 5 0 10 5 10 10")],
    );
    assert!(diagnostics.is_empty());
    insta::assert_snapshot!(part.render(), @r"
    // Path: c
    points.c_p1 = new Point(10, 10)
    points.c_p2_cp1 = new Point(15, 10)
    points.c_p2_cp2 = new Point(20, 15)
    points.c_p2_ep = new Point(20, 20)

    paths.c = new Path()
        .move(points.c_p1)
        .curve(points.c_p2_cp1, points.c_p2_cp2, points.c_p2_ep)
    ");
}

#[test]
fn uniform_reference_scales_every_point() {
    let (part, diagnostics) = assemble(
        ScopeKind::from_group_label(Some("part:front")),
        vec![
            element("chest-ref", "M 0 0 L 100 0").with_label("measurement: measurements.chest"),
            element("seam", "M 10 20 L 30 40"),
        ],
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(part.name, "front");
    assert_eq!(
        part.references.iter().map(String::as_str).collect::<Vec<_>>(),
        ["measurements.chest"]
    );
    insta::assert_snapshot!(part.render(), @r"
    scaling_seam = (measurements.chest) / 26.4583
    // Path: seam
    points.seam_p1 = new Point(10 * scaling_seam, 20 * scaling_seam)
    points.seam_p2 = new Point(30 * scaling_seam, 40 * scaling_seam)

    paths.seam = new Path()
        .move(points.seam_p1)
        .line(points.seam_p2)
    ");
}

#[test]
fn anisotropic_references_scale_per_axis() {
    let (part, diagnostics) = assemble(
        ScopeKind::Part("back".into()),
        vec![
            element("seam", "M 1 2 l 3 4"),
            element("wx", "M 0 0 h 96").with_label("measurement-x: measurements.waist / 2"),
            element("wy", "M 0 0 v 96").with_label("measurement-y: options.length"),
        ],
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let seam = part.path("seam").unwrap();
    assert_eq!(
        seam.preamble,
        "scaling_seam_x = (measurements.waist / 2) / 25.4\n\
         scaling_seam_y = (options.length) / 25.4\n"
    );
    assert!(
        seam.points
            .contains("points.seam_p2 = new Point(4 * scaling_seam_x, 6 * scaling_seam_y)")
    );
    assert_eq!(
        part.references.into_iter().collect::<Vec<_>>(),
        ["measurements.waist".to_string(), "options.length".to_string()]
    );
}

#[test]
fn reference_paths_are_not_emitted() {
    let (part, _) = assemble(
        ScopeKind::Design,
        vec![
            element("ref", "M 0 0 L 10 0").with_label("measurement: measurements.neck"),
            element("a", "M 0 0 L 1 1"),
        ],
    );
    let ids: Vec<&str> = part.paths.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a"]);
    assert!(!part.render().contains("ref_p1"));
}

#[test]
fn conflicting_labels_leave_scope_unscaled() {
    let (part, diagnostics) = assemble(
        ScopeKind::Part("front".into()),
        vec![
            element("r1", "M 0 0 L 10 0").with_label("measurement: measurements.chest"),
            element("r2", "M 0 0 L 10 0").with_label("measurement-y: measurements.hps"),
            element("a", "M 5 5 L 6 6"),
        ],
    );
    assert_eq!(
        diagnostics,
        vec![ConvertError::ConflictingScalingModes {
            scope: "front".into()
        }]
    );
    let a = part.path("a").unwrap();
    assert_eq!(a.preamble, "");
    assert!(a.points.contains("points.a_p1 = new Point(5, 5)"));
    assert_eq!(part.paths.len(), 1);
    assert!(part.references.is_empty());
}

#[test]
fn failing_path_is_skipped_and_rest_convert() {
    let (part, diagnostics) = assemble(
        ScopeKind::Selection,
        vec![
            element("first", "M 0 0 L 1 0"),
            PathElement::new("broken", vec![PathCommand::line_to(f64::NAN, 0.0)]),
            PathElement::new("empty", Vec::new()),
            element("last", "M 0 0 L 0 1"),
        ],
    );
    let ids: Vec<&str> = part.paths.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["first", "last"]);
    assert_eq!(part.name, "selection");
    assert_eq!(diagnostics.len(), 2);
    assert!(matches!(
        &diagnostics[0],
        ConvertError::NonFiniteCoordinate { path, index: 0, .. } if path == "broken"
    ));
    assert_eq!(
        diagnostics[1],
        ConvertError::EmptyPath {
            path: "empty".into()
        }
    );
}

#[test]
fn overflowing_path_is_skipped() {
    let (part, diagnostics) = assemble(
        ScopeKind::Design,
        vec![
            element("far", "M 1e308 0 l 1e308 0"),
            element("near", "M 0 0 l 1 0"),
        ],
    );
    let ids: Vec<&str> = part.paths.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["near"]);
    assert!(!part.render().contains("inf"));
    assert!(matches!(
        diagnostics.as_slice(),
        [ConvertError::NonFiniteCoordinate { path, index: 1, .. }] if path == "far"
    ));
}

#[test]
fn short_reference_at_low_precision_leaves_scope_unscaled() {
    init_tracing();
    let scope = Scope::new(
        ScopeKind::Design,
        vec![
            element("ref", "M 0 0 L 1 0").with_label("measurement: measurements.chest"),
            element("a", "M 2 3"),
        ],
    );
    let mut diagnostics = Vec::new();
    let part = scope.assemble(&ConvertOptions::default().with_precision(0), &mut diagnostics);
    assert_eq!(
        diagnostics,
        vec![ConvertError::ZeroLengthReference { path: "ref".into() }]
    );
    assert!(!part.render().contains("/ 0"));
    assert_eq!(part.path("a").unwrap().preamble, "");
}

#[test]
fn unsupported_command_only_skips_itself() {
    let (part, diagnostics) = assemble(
        ScopeKind::Design,
        vec![element("q", "M 0 0 Q 1 1 2 2 L 5 5")],
    );
    assert_eq!(
        diagnostics,
        vec![ConvertError::UnsupportedCommand {
            path: "q".into(),
            letter: 'Q',
            index: 1
        }]
    );
    let q = part.path("q").unwrap();
    assert!(q.points.contains("points.q_p2 = new Point(5, 5)"));
}

#[test]
fn pen_and_names_do_not_leak_between_paths() {
    let (part, _) = assemble(
        ScopeKind::Design,
        vec![element("a", "M 50 50 L 60 60"), element("b", "m 1 1")],
    );
    let b = part.path("b").unwrap();
    assert_eq!(b.points, "// Path: b\npoints.b_p1 = new Point(1, 1)\n");
}

#[test]
fn scaling_does_not_leak_between_scopes() {
    let (scaled, _) = assemble(
        ScopeKind::Part("one".into()),
        vec![
            element("r", "M 0 0 L 96 0").with_label("measurement: measurements.chest"),
            element("a", "M 1 1"),
        ],
    );
    let (plain, _) = assemble(ScopeKind::Part("two".into()), vec![element("a", "M 1 1")]);
    assert!(scaled.render().contains("scaling_a"));
    assert!(!plain.render().contains("scaling_a"));
}

#[test]
fn reassembling_is_byte_identical() {
    let elements = vec![
        element("ref", "M 0 0 L 100 0").with_label("measurement: measurements.chest"),
        element("front", "m 0 0 l 10 0 l 10 10 l 0 10 z"),
        element("2panel-front", "M 0 0 C 1 2 3 4 5 6"),
    ];
    let (first, _) = assemble(ScopeKind::Design, elements.clone());
    let (second, _) = assemble(ScopeKind::Design, elements);
    assert_eq!(first.render(), second.render());
    assert_eq!(first, second);
    assert!(first.render().contains("paths._2panel_front = new Path()"));
}

#[test]
fn debug_mode_echoes_commands() {
    let commands = sewpath::parse_path_data("M 0 0 c 1 1 2 2 3 3").unwrap();
    let options = ConvertOptions::default().with_debug(true);
    let mut diagnostics = Vec::new();
    let code = convert_path("d", &commands, &ScalingSpec::default(), &options, &mut diagnostics).unwrap();
    assert_eq!(
        code.points,
        "// Path: d\n\
         // M 0 0\n\
         points.d_p1 = new Point(0, 0)\n\
         // c 1 1 2 2 3 3\n\
         points.d_p2_cp1 = new Point(1, 1)\n\
         // c 1 1 2 2 3 3\n\
         points.d_p2_cp2 = new Point(2, 2)\n\
         // c 1 1 2 2 3 3\n\
         points.d_p2_ep = new Point(3, 3)\n"
    );
    assert_eq!(
        code.path,
        "paths.d = new Path()\n    // M 0 0\n    .move(points.d_p1)\n    // c 1 1 2 2 3 3\n    .curve(points.d_p2_cp1, points.d_p2_cp2, points.d_p2_ep)"
    );
}

#[test]
fn precision_option_applies_to_coordinates_and_lengths() {
    let commands = sewpath::parse_path_data("M 3.14159265 2.71828").unwrap();
    let options = ConvertOptions::default().with_precision(2);
    let mut diagnostics = Vec::new();
    let code = convert_path("p", &commands, &ScalingSpec::default(), &options, &mut diagnostics).unwrap();
    assert!(code.points.contains("new Point(3.14, 2.72)"));
    assert!(ScalingSpec::default().preamble("p", 2).is_empty());

    let scope = Scope::new(
        ScopeKind::Design,
        vec![
            element("ref", "M 0 0 L 100 0").with_label("measurement: measurements.chest"),
            element("p", "M 1 1"),
        ],
    );
    let part = scope.assemble(&options, &mut diagnostics);
    assert_eq!(
        part.path("p").unwrap().preamble,
        "scaling_p = (measurements.chest) / 26.46\n"
    );
}
