//! Export operations: walk the session and assemble the output documents.

use std::path::PathBuf;

use log::{debug, info};

use crate::config::{output_file_name, ExportConfig};
use crate::correlator::find_region;
use crate::document::{number, Document, Element};
use crate::error::{ExportError, Result};
use crate::geometry::{push_unique, Point3};
use crate::io::xml::{to_xml_string, write_document};
use crate::model::{AppliedSubassembly, Baseline, CalculatedPoint, Corridor};
use crate::report::{DiagnosticKind, ExportReport};
use crate::session::{normalize_handle, Handled, ModelSession};
use crate::side::classify_side;
use crate::walker::{self, ElementKind, SectionElement, Selection, WalkItem};

/// The export operations offered on the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    LandFeatureLines,
    CorridorFeatureLines,
    SubassemblyShapes,
    SubassemblyLinks,
    Surface,
    SurfaceTriangles,
}

impl ExportKind {
    /// File stem of the output document.
    pub fn file_stem(self) -> &'static str {
        match self {
            ExportKind::LandFeatureLines => "LandFeatureLinesReport",
            ExportKind::CorridorFeatureLines => "CorridorFeatureLines",
            ExportKind::SubassemblyShapes => "CorridorShapes",
            ExportKind::SubassemblyLinks => "CorridorLinks",
            ExportKind::Surface => "Surface",
            ExportKind::SurfaceTriangles => "SurfaceTriangle",
        }
    }

    pub fn run(self, session: &ModelSession<'_>, selection: &Selection) -> Result<Export> {
        match self {
            ExportKind::LandFeatureLines => export_land_feature_lines(session, selection),
            ExportKind::CorridorFeatureLines => export_corridor_feature_lines(session, selection),
            ExportKind::SubassemblyShapes => export_subassembly_shapes(session, selection),
            ExportKind::SubassemblyLinks => export_subassembly_links(session, selection),
            ExportKind::Surface => export_surface(session, selection),
            ExportKind::SurfaceTriangles => export_surface_triangles(session, selection),
        }
    }
}

/// A finished export: the document, where it goes and what was skipped.
#[derive(Debug, Clone)]
pub struct Export {
    pub kind: ExportKind,
    pub document: Document,
    pub file_name: String,
    pub report: ExportReport,
}

impl Export {
    fn new<T: Handled>(
        kind: ExportKind,
        document: Document,
        selection: &Selection,
        picked: &[&T],
        report: ExportReport,
    ) -> Self {
        let narrowed = selection
            .handle
            .as_deref()
            .and_then(normalize_handle)
            .is_some();
        let single = match (narrowed, picked) {
            (true, [only]) => Some(only.name()),
            _ => None,
        };
        Self {
            kind,
            document,
            file_name: output_file_name(kind.file_stem(), single),
            report,
        }
    }

    pub fn to_xml(&self) -> String {
        to_xml_string(&self.document)
    }

    /// Writes the document into the configured directory, replacing any
    /// previous output of the same name. Returns the written path.
    pub fn write_to(&self, config: &ExportConfig) -> Result<PathBuf> {
        let path = config.path_for(&self.file_name);
        write_document(&path, &self.document)?;
        Ok(path)
    }
}

fn point_element(p: Point3) -> Element {
    Element::new("Point")
        .with_attribute("X", number(p.x))
        .with_attribute("Y", number(p.y))
        .with_attribute("Z", number(p.z))
}

/// Exports the stand-alone feature lines of the drawing.
pub fn export_land_feature_lines(session: &ModelSession<'_>, selection: &Selection) -> Result<Export> {
    let picked = session.feature_lines(selection.handle.as_deref())?;
    let mut doc = Document::new(session.name());
    let lines = doc.root.append_child(Element::new("FeatureLines"));
    for fl in &picked {
        let line = lines.append_child(
            Element::new("FeatureLine")
                .with_attribute("Name", &fl.name)
                .with_attribute("Style", fl.style.as_deref().unwrap_or(""))
                .with_attribute("Handle", &fl.handle),
        );
        let points = line.append_child(Element::new("Points"));
        for p in &fl.points {
            points.append_child(point_element(*p));
        }
    }
    info!("Exported {} feature lines", picked.len());
    Ok(Export::new(
        ExportKind::LandFeatureLines,
        doc,
        selection,
        &picked,
        ExportReport::new(),
    ))
}

fn corridor_element(corridor: &Corridor) -> Element {
    Element::new("Corridor").with_attribute("Name", &corridor.name)
}

fn baseline_element(index: usize, baseline: &Baseline) -> Element {
    Element::new("Baseline")
        .with_attribute("Name", &baseline.name)
        .with_attribute("Index", index)
}

fn feature_lines_of_baseline(
    corridor: &Corridor,
    index: usize,
    baseline: &Baseline,
    report: &mut ExportReport,
) -> Element {
    let mut lines = Element::new("FeatureLines");
    for group in &baseline.feature_lines {
        for (n, fl) in group.lines.iter().enumerate() {
            let mut line = Element::new("FeatureLine");
            line.set_attribute("Code", &group.code)
                .set_attribute("Style", fl.style.as_deref().unwrap_or(""));
            let mut points = Element::new("Points");
            let mut offsets = Vec::with_capacity(fl.points.len());
            for (k, p) in fl.points.iter().enumerate() {
                let region = match find_region(&baseline.regions, p.station) {
                    Ok(r) => r,
                    Err(err) => {
                        let context = format!(
                            "{}/baseline {}/feature line {} #{}/point {}",
                            corridor.name, index, group.code, n, k
                        );
                        report.record_error(context, &err);
                        continue;
                    }
                };
                points.append_child(
                    point_element(p.location)
                        .with_attribute("Station", number(p.station))
                        .with_attribute("Offset", number(p.offset))
                        .with_attribute("IsBreak", if p.is_break { "1" } else { "0" })
                        .with_attribute("RegionIndex", region),
                );
                offsets.push(p.offset);
            }
            // side follows the first point actually written
            line.set_attribute("Side", classify_side(offsets));
            line.append_child(points);
            lines.append_child(line);
        }
    }
    lines
}

/// Exports corridor feature lines with per-point region correlation.
///
/// Honours the handle and baseline parts of `selection`.
pub fn export_corridor_feature_lines(
    session: &ModelSession<'_>,
    selection: &Selection,
) -> Result<Export> {
    let picked = session.corridors(selection.handle.as_deref())?;
    let mut report = ExportReport::new();
    let mut doc = Document::new(session.name());
    let corridors = doc.root.append_child(Element::new("Corridors"));
    for corridor in &picked {
        let element = corridors.append_child(corridor_element(corridor));
        let baselines = element.append_child(Element::new("Baselines"));
        for (bi, baseline) in walker::baselines(corridor, selection.baseline) {
            let lines = feature_lines_of_baseline(corridor, bi, baseline, &mut report);
            baselines
                .append_child(baseline_element(bi, baseline))
                .append_child(lines);
        }
    }
    info!(
        "Exported corridor feature lines of {} corridors ({} skipped points)",
        picked.len(),
        report.count(DiagnosticKind::NoRegionMatch)
    );
    Ok(Export::new(
        ExportKind::CorridorFeatureLines,
        doc,
        selection,
        &picked,
        report,
    ))
}

/// Transforms calculated points through the baseline, dropping duplicates.
/// At most one geometry diagnostic is recorded per element.
fn element_points<'a, I>(
    baseline: &Baseline,
    points: I,
    report: &mut ExportReport,
    context: &str,
) -> Vec<Point3>
where
    I: IntoIterator<Item = &'a CalculatedPoint>,
{
    let mut out = Vec::new();
    for cp in points {
        match baseline.station_offset_elevation_to_xyz(cp.soe) {
            Some(p) => {
                push_unique(&mut out, p);
            }
            None => {
                let err = ExportError::EmptyAlignment {
                    baseline: baseline.name.clone(),
                };
                report.record_error(context, &err);
                break;
            }
        }
    }
    out
}

/// Calculated points of a section element, in link order.
fn section_points<'m>(
    subassembly: &'m AppliedSubassembly,
    element: SectionElement<'m>,
    report: &mut ExportReport,
    context: &str,
) -> Vec<&'m CalculatedPoint> {
    match element {
        SectionElement::Link(link) => link.points.iter().collect(),
        SectionElement::Shape(shape) => {
            let mut points = Vec::new();
            for &li in &shape.links {
                match subassembly.links.get(li) {
                    Some(link) => points.extend(link.points.iter()),
                    None => report.record_error(
                        context,
                        &ExportError::UnresolvedReference {
                            kind: "link",
                            index: li,
                        },
                    ),
                }
            }
            points
        }
    }
}

/// Resolves a name through the session; failures become a diagnostic and an
/// empty string.
fn resolve_name<T>(
    resolved: Result<Option<&T>>,
    name: impl Fn(&T) -> &str,
    report: &mut ExportReport,
    context: &str,
) -> String {
    match resolved {
        Ok(Some(def)) => name(def).to_string(),
        Ok(None) => String::new(),
        Err(err) => {
            report.record_error(context, &err);
            String::new()
        }
    }
}

/// Builds the `Shape` or `Link` element of one walk item.
fn section_element(
    item: &WalkItem<'_>,
    assembly_name: &str,
    subassembly: &(String, String),
    report: &mut ExportReport,
) -> Element {
    let (tag, index_attr) = match item.element {
        SectionElement::Shape(_) => ("Shape", "ShapeIndex"),
        SectionElement::Link(_) => ("Link", "LinkIndex"),
    };
    let context = item.context();
    let mut section = Element::new(tag);
    section
        .set_attribute("Corridor", &item.corridor.name)
        .set_attribute("BaselineIndex", item.baseline_index)
        .set_attribute("RegionIndex", item.region_index)
        .set_attribute("AssemblyName", assembly_name)
        .set_attribute("SubassemblyName", &subassembly.0)
        .set_attribute("Handle", &subassembly.1)
        .set_attribute(index_attr, item.element_index)
        .set_attribute("Station", number(item.subassembly.origin.station));
    let codes = section.append_child(Element::new("Codes"));
    for code in item.element.codes() {
        codes.append_child(Element::new("Code").with_attribute("Name", code));
    }
    let calculated = section_points(item.subassembly, item.element, report, &context);
    for p in element_points(item.baseline, calculated, report, &context) {
        section.append_child(point_element(p));
    }
    section
}

/// Subassembly name and handle; empty when the reference does not resolve.
fn subassembly_names(
    session: &ModelSession<'_>,
    subassembly: &AppliedSubassembly,
    report: &mut ExportReport,
    context: &str,
) -> (String, String) {
    match session.subassembly(subassembly.subassembly) {
        Ok(def) => def
            .map(|d| (d.name.clone(), d.handle.clone()))
            .unwrap_or_default(),
        Err(err) => {
            report.record_error(context, &err);
            Default::default()
        }
    }
}

/// Emits the selected baselines and regions as containers and fills each
/// region with the shapes or links the walk yields for it.
fn export_sections(
    session: &ModelSession<'_>,
    selection: &Selection,
    kind: ElementKind,
    export: ExportKind,
) -> Result<Export> {
    let picked = session.corridors(selection.handle.as_deref())?;
    let mut items = walker::walk(session, selection, kind)?.peekable();
    let mut report = ExportReport::new();
    let mut doc = Document::new(session.name());
    let corridors = doc.root.append_child(Element::new("Corridors"));
    for corridor in &picked {
        let element = corridors.append_child(corridor_element(corridor));
        let baselines = element.append_child(Element::new("Baselines"));
        for (bi, baseline) in walker::baselines(corridor, selection.baseline) {
            let baseline_el = baselines.append_child(baseline_element(bi, baseline));
            let regions = baseline_el.append_child(Element::new("Regions"));
            for (ri, region) in walker::regions(baseline, selection.region) {
                debug!("{}: baseline {} region {}", corridor.name, bi, ri);
                let region_el = regions.append_child(
                    Element::new("Region")
                        .with_attribute("Name", &region.name)
                        .with_attribute("Index", ri),
                );
                let region_context = format!("{}/baseline {}/region {}", corridor.name, bi, ri);
                let assembly_name = resolve_name(
                    session.assembly(region.assembly),
                    |a| a.name.as_str(),
                    &mut report,
                    &region_context,
                );
                let mut current: Option<&AppliedSubassembly> = None;
                let mut names = (String::new(), String::new());
                while let Some(item) = items.next_if(|i| std::ptr::eq(i.region, region)) {
                    if !current.is_some_and(|s| std::ptr::eq(s, item.subassembly)) {
                        let context = format!(
                            "{}/station {}",
                            region_context, item.subassembly.origin.station
                        );
                        names = subassembly_names(session, item.subassembly, &mut report, &context);
                        current = Some(item.subassembly);
                    }
                    region_el.append_child(section_element(
                        &item,
                        &assembly_name,
                        &names,
                        &mut report,
                    ));
                }
            }
        }
    }
    info!(
        "Exported {:?} sections of {} corridors ({} diagnostics)",
        kind,
        picked.len(),
        report.diagnostics.len()
    );
    Ok(Export::new(export, doc, selection, &picked, report))
}

/// Exports subassembly shapes grouped by baseline and region.
pub fn export_subassembly_shapes(session: &ModelSession<'_>, selection: &Selection) -> Result<Export> {
    export_sections(
        session,
        selection,
        ElementKind::Shape,
        ExportKind::SubassemblyShapes,
    )
}

/// Exports subassembly links grouped by baseline and region.
pub fn export_subassembly_links(session: &ModelSession<'_>, selection: &Selection) -> Result<Export> {
    export_sections(
        session,
        selection,
        ElementKind::Link,
        ExportKind::SubassemblyLinks,
    )
}

fn export_surfaces_as(
    session: &ModelSession<'_>,
    selection: &Selection,
    export: ExportKind,
) -> Result<Export> {
    let picked = session.surfaces(selection.handle.as_deref())?;
    let mut report = ExportReport::new();
    let mut doc = Document::new(session.name());
    let surfaces = doc.root.append_child(Element::new("Surfaces"));
    for surface in &picked {
        let faces = surface.faces();
        if faces.incomplete > 0 {
            report.record(
                DiagnosticKind::IncompleteTriangle,
                surface.name.clone(),
                format!("{} incomplete triangles dropped", faces.incomplete),
            );
        }
        let element = surfaces.append_child(Element::new("Surface").with_attribute("Name", &surface.name));
        let vertices = element.append_child(Element::new("Vertices"));
        for (id, v) in surface.vertices.iter().enumerate() {
            vertices.append_child(
                Element::new("Vertex")
                    .with_attribute("X", number(v.location.x))
                    .with_attribute("Y", number(v.location.y))
                    .with_attribute("Z", number(v.location.z))
                    .with_attribute("id", id),
            );
        }
        let triangles = element.append_child(Element::new("Triangles"));
        for [a, b, c] in faces.triangles {
            triangles.append_child(
                Element::new("Triangle")
                    .with_attribute("V0", a)
                    .with_attribute("V1", b)
                    .with_attribute("V2", c),
            );
        }
    }
    info!("Exported {} surfaces", picked.len());
    Ok(Export::new(export, doc, selection, &picked, report))
}

/// Exports surface vertices and visible triangles.
pub fn export_surface(session: &ModelSession<'_>, selection: &Selection) -> Result<Export> {
    export_surfaces_as(session, selection, ExportKind::Surface)
}

/// Same document as [`export_surface`], written under the triangle report name.
pub fn export_surface_triangles(session: &ModelSession<'_>, selection: &Selection) -> Result<Export> {
    export_surfaces_as(session, selection, ExportKind::SurfaceTriangles)
}
