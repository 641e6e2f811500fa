use std::f64::consts::PI;
use std::path::Path;

use chord_rs_renderer::layout::{Drawing, Primitive, TextPlacement, large_arc_flag};
use chord_rs_renderer::table::CsvTable;
use chord_rs_renderer::{ChordDiagram, DiagramOptions, LayoutConfig, RawEdge, render_csv_with_options};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
    assert_eq!(
        svg.matches("<text").count(),
        svg.matches("</text>").count(),
        "{fixture}: unbalanced text elements"
    );
}

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn draw_fixture(name: &str) -> Drawing {
    let input = std::fs::read_to_string(fixture_path(name)).expect("fixture read failed");
    let table = CsvTable::parse(&input, true).expect("csv parse failed");
    ChordDiagram::new().draw_table(&table).expect("draw failed")
}

fn target_span_sum(drawing: &Drawing) -> f64 {
    drawing
        .targets
        .iter()
        .map(|target| target.end_angle - target.start_angle)
        .sum()
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = ["basic.csv", "dated.csv", "messy.csv", "zero_weight.csv"];

    for rel in candidates {
        let path = fixture_path(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        let input = std::fs::read_to_string(&path).expect("fixture read failed");
        let svg = render_csv_with_options(&input, &DiagramOptions::default())
            .unwrap_or_else(|err| panic!("{rel}: render failed: {err}"));
        assert_valid_svg(&svg, rel);
    }
}

#[test]
fn basic_fixture_fills_target_sector() {
    let drawing = draw_fixture("basic.csv");
    let sector = LayoutConfig::default().target_sector;

    let names: Vec<&str> = drawing.targets.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
    assert!((target_span_sum(&drawing) - sector.span()).abs() < EPS);
    assert!((drawing.targets[0].start_angle - sector.start).abs() < EPS);
    assert!((drawing.targets[2].end_angle - sector.end).abs() < EPS);

    // Alpha carries 13 of 28 units.
    let alpha = &drawing.targets[0];
    let expected = sector.span() * 13.0 / 28.0;
    assert!((alpha.end_angle - alpha.start_angle - expected).abs() < EPS);

    assert_eq!(drawing.sources.len(), 3);
    assert_eq!(drawing.curves().count(), 5);
    assert!(drawing.primitive("X_Alpha_1").is_some());
    assert!(drawing.primitive("X_Beta_1").is_some());
}

#[test]
fn source_labels_precede_targets() {
    let drawing = draw_fixture("basic.csv");
    let first_arc = drawing
        .primitives
        .iter()
        .position(|p| matches!(p, Primitive::Arc(_)))
        .expect("arc");
    assert_eq!(first_arc, drawing.sources.len());
    for primitive in &drawing.primitives[..first_arc] {
        assert!(primitive.id().ends_with("_txt"));
    }
}

#[test]
fn dated_fixture_orders_curves_by_date() {
    let drawing = draw_fixture("dated.csv");
    assert!(drawing.use_position_hint);

    let core = drawing
        .targets
        .iter()
        .find(|t| t.name == "core")
        .expect("core target");
    let early = match drawing.primitive("ana_core_0") {
        Some(Primitive::Curve(curve)) => curve.path.end,
        other => panic!("unexpected primitive {other:?}"),
    };
    let late = match drawing.primitive("ben_core_1") {
        Some(Primitive::Curve(curve)) => curve.path.end,
        other => panic!("unexpected primitive {other:?}"),
    };
    // The earliest date in the table lands exactly on the start edge.
    let start = chord_rs_renderer::layout::polar(
        drawing.center,
        LayoutConfig::default().graph_radius,
        core.start_angle,
    );
    assert!((early.x - start.x).abs() < 1e-6 && (early.y - start.y).abs() < 1e-6);
    assert!((late.x - early.x).abs() > 1e-3 || (late.y - early.y).abs() > 1e-3);
}

#[test]
fn messy_fixture_defaults_bad_cells() {
    let drawing = draw_fixture("messy.csv");
    let names: Vec<&str> = drawing.targets.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "invalid", "Beta", "Gamma"]);

    let beta = &drawing.targets[2];
    assert_eq!(beta.total_weight, 0.0);
    assert!((beta.end_angle - beta.start_angle).abs() < EPS);
    assert!(drawing.primitive("Beta_arc").is_none());
    assert!(drawing.primitive("Beta_txt").is_some());

    let gamma = &drawing.targets[3];
    assert_eq!(gamma.total_weight, 7.0);
    assert!(drawing.sources.iter().any(|s| s.name == "invalid"));
}

#[test]
fn zero_weight_fixture_splits_evenly() {
    let drawing = draw_fixture("zero_weight.csv");
    let sector = LayoutConfig::default().target_sector;
    for target in &drawing.targets {
        let span = target.end_angle - target.start_angle;
        assert!((span - sector.span() / 3.0).abs() < EPS);
    }
    assert_eq!(drawing.arcs().count(), 3);
}

fn curve_ends(drawing: &Drawing) -> Vec<(String, f64, f64)> {
    drawing
        .curves()
        .map(|curve| (curve.id.clone(), curve.path.end.x, curve.path.end.y))
        .collect()
}

#[test]
fn empty_hint_column_keeps_weight_ordering() {
    let with_column = CsvTable::parse("t,w,s,date\nA,1,X,\nA,9,Y,\nB,4,X,\nB,2,Z,\n", true)
        .expect("csv parse failed");
    let without_column =
        CsvTable::parse("t,w,s\nA,1,X\nA,9,Y\nB,4,X\nB,2,Z\n", true).expect("csv parse failed");

    let diagram = ChordDiagram::new();
    let drawing = diagram.draw_table(&with_column).expect("draw failed");
    let reference = diagram.draw_table(&without_column).expect("draw failed");

    assert!(!drawing.use_position_hint);
    assert_eq!(curve_ends(&drawing), curve_ends(&reference));

    let ends = curve_ends(&drawing);
    for (i, a) in ends.iter().enumerate() {
        for b in &ends[i + 1..] {
            assert!(
                (a.1 - b.1).abs() > 1e-6 || (a.2 - b.2).abs() > 1e-6,
                "{} and {} end at the same point",
                a.0,
                b.0
            );
        }
    }
}

#[test]
fn too_few_rows_is_rejected() {
    let svg = render_csv_with_options("t,w,s\nA,1,X\nB,2,Y\n", &DiagramOptions::default());
    let err = svg.expect_err("two rows must not render");
    assert!(err.to_string().contains("3"));
}

#[test]
fn options_file_shape_round_trips() {
    let options: DiagramOptions = serde_json::from_str(
        r#"{"canvasSize": 800, "graphRadius": 300, "horizontalLabels": false,
            "colorPalette": [[1, 2, 3]], "dataColumns": {"targetId": 2, "sourceId": 0}}"#,
    )
    .expect("options parse");
    let input = std::fs::read_to_string(fixture_path("basic.csv")).expect("fixture read failed");
    let svg = render_csv_with_options(&input, &options).expect("render failed");
    assert!(svg.contains("width=\"800\""));
    assert!(svg.contains("rgb(1,2,3)"));
    assert!(!svg.contains("<textPath"));
}

fn edges_strategy() -> impl Strategy<Value = Vec<(u8, u32, u8)>> {
    prop::collection::vec((0u8..6, 0u32..500, 0u8..9), 3..40)
}

fn records(edges: &[(u8, u32, u8)]) -> Vec<RawEdge> {
    edges
        .iter()
        .map(|(t, w, s)| RawEdge::new(format!("T{t}"), w.to_string(), format!("S{s}")))
        .collect()
}

proptest! {
    #[test]
    fn targets_tile_the_sector(edges in edges_strategy()) {
        let drawing = ChordDiagram::new().draw(&records(&edges)).unwrap();
        let sector = LayoutConfig::default().target_sector;
        prop_assert!((target_span_sum(&drawing) - sector.span()).abs() < 1e-6);
        for pair in drawing.targets.windows(2) {
            prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() < 1e-9);
        }
    }

    #[test]
    fn target_weights_sum_to_total(edges in edges_strategy()) {
        let diagram = ChordDiagram::new();
        let model = diagram.aggregate(&records(&edges)).unwrap();
        let expected: f64 = edges.iter().map(|(_, w, _)| f64::from(*w)).sum();
        let summed: f64 = model.targets().map(|t| t.total_weight).sum();
        prop_assert!((model.total_weight - expected).abs() < EPS);
        prop_assert!((summed - expected).abs() < EPS);
    }

    #[test]
    fn sources_stay_inside_their_sector(edges in edges_strategy()) {
        let drawing = ChordDiagram::new().draw(&records(&edges)).unwrap();
        let sector = LayoutConfig::default().source_sector;
        for source in &drawing.sources {
            prop_assert!(source.angle >= sector.start - EPS);
            prop_assert!(source.angle <= sector.end + EPS);
        }
    }

    #[test]
    fn large_arc_flag_tracks_half_turn(start in -4.0f64..4.0, span in 0.01f64..6.2) {
        prop_assume!((span - PI).abs() > 1e-9);
        let flag = large_arc_flag(start, start + span);
        prop_assert_eq!(flag, span > PI);
    }

    #[test]
    fn radial_labels_stay_upright(edges in edges_strategy()) {
        let drawing = ChordDiagram::new().draw(&records(&edges)).unwrap();
        for text in drawing.texts() {
            if let TextPlacement::Radial { rotation, .. } = text.placement {
                let normalized = rotation.rem_euclid(360.0);
                prop_assert!(normalized <= 90.0 + 1e-6 || normalized >= 270.0 - 1e-6);
            }
        }
    }
}
