use civil_export::export::{export_land_feature_lines, export_surface, export_surface_triangles};
use civil_export::geometry::Point3;
use civil_export::model::{LandFeatureLine, TinSurface, TinVertex};
use civil_export::report::DiagnosticKind;
use civil_export::{ExportError, Model, ModelSession, Selection};

fn vertex(x: f64, y: f64, z: f64, triangles: &[u64]) -> TinVertex {
    TinVertex {
        location: Point3::new(x, y, z),
        triangles: triangles.to_vec(),
    }
}

fn model() -> Model {
    let mut model = Model::new("Site.dwg");
    model.surfaces.push(TinSurface {
        name: "EG".into(),
        handle: "3C".into(),
        vertices: vec![
            vertex(0.0, 0.0, 1.0, &[10, 11]),
            vertex(10.0, 0.0, 2.0, &[10]),
            vertex(10.0, 10.0, 3.0, &[10, 11]),
            vertex(0.0, 10.0, 4.0, &[11]),
        ],
        hidden_triangles: Vec::new(),
    });
    model.surfaces.push(TinSurface {
        name: "FG".into(),
        handle: "3D".into(),
        vertices: vec![
            vertex(0.0, 0.0, 0.0, &[20, 21, 22]),
            vertex(5.0, 0.0, 0.0, &[20, 21, 22]),
            vertex(5.0, 5.0, 0.0, &[20, 22]),
        ],
        hidden_triangles: vec![22],
    });
    model.feature_lines.push(LandFeatureLine {
        name: "Curb".into(),
        style: None,
        handle: "2B4".into(),
        points: vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.5)],
    });
    model.feature_lines.push(LandFeatureLine {
        name: "Ditch".into(),
        style: Some("Grading".into()),
        handle: "2B5".into(),
        points: Vec::new(),
    });
    model
}

#[test]
fn surface_vertices_and_triangles() {
    let model = model();
    let session = ModelSession::open(&model);
    let export = export_surface(&session, &Selection::handle("3c")).unwrap();
    assert_eq!(export.file_name, "Surface_EG.xml");

    let surface = export
        .document
        .root
        .child("Surfaces")
        .and_then(|s| s.child("Surface"))
        .unwrap();
    assert_eq!(surface.attribute("Name"), Some("EG"));
    let vertices: Vec<_> = surface.child("Vertices").unwrap().children_named("Vertex").collect();
    assert_eq!(vertices.len(), 4);
    assert_eq!(vertices[3].attribute("id"), Some("3"));
    assert_eq!(vertices[3].attribute("Z"), Some("4"));

    let triangles: Vec<Vec<&str>> = surface
        .child("Triangles")
        .unwrap()
        .children_named("Triangle")
        .map(|t| {
            ["V0", "V1", "V2"]
                .iter()
                .map(move |a| t.attribute(a).unwrap())
                .collect()
        })
        .collect();
    assert_eq!(triangles, vec![vec!["0", "1", "2"], vec!["0", "2", "3"]]);
    assert!(export.report.is_clean());
}

#[test]
fn hidden_and_incomplete_triangles_are_dropped() {
    let model = model();
    let session = ModelSession::open(&model);
    let export = export_surface_triangles(&session, &Selection::all()).unwrap();
    assert_eq!(export.file_name, "SurfaceTriangle.xml");

    let surfaces: Vec<_> = export
        .document
        .root
        .child("Surfaces")
        .unwrap()
        .children_named("Surface")
        .collect();
    assert_eq!(surfaces.len(), 2);
    let fg = surfaces[1];
    let triangles: Vec<_> = fg.child("Triangles").unwrap().children_named("Triangle").collect();
    // 20 is complete, 21 only touches two vertices, 22 is hidden
    assert_eq!(triangles.len(), 1);
    assert_eq!(triangles[0].attribute("V2"), Some("2"));
    assert_eq!(export.report.count(DiagnosticKind::IncompleteTriangle), 1);
}

#[test]
fn unknown_surface_is_not_found() {
    let model = model();
    let session = ModelSession::open(&model);
    let err = export_surface(&session, &Selection::handle("ABC")).unwrap_err();
    match err {
        ExportError::NotFound { kind, selector } => {
            assert_eq!(kind, "surface");
            assert_eq!(selector, "ABC");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn land_feature_lines() {
    let model = model();
    let session = ModelSession::open(&model);

    let all = export_land_feature_lines(&session, &Selection::all()).unwrap();
    assert_eq!(all.file_name, "LandFeatureLinesReport.xml");
    let lines: Vec<_> = all
        .document
        .root
        .child("FeatureLines")
        .unwrap()
        .children_named("FeatureLine")
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].attribute("Style"), Some(""));
    assert_eq!(lines[1].attribute("Style"), Some("Grading"));
    assert_eq!(lines[1].attribute("Handle"), Some("2B5"));
    let points: Vec<_> = lines[0].child("Points").unwrap().children_named("Point").collect();
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].attribute("Z"), Some("6.5"));
    assert!(lines[1].child("Points").unwrap().children.is_empty());

    let one = export_land_feature_lines(&session, &Selection::handle(" \"2b4\" ")).unwrap();
    assert_eq!(one.file_name, "LandFeatureLinesReport_Curb.xml");
}
