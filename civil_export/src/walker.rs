//! Traversal of the corridor hierarchy.
//!
//! Corridor → baseline → region → applied assembly → applied subassembly →
//! shape or link, each level in stored order. Index selectors skip positions
//! without renumbering, so indices always match the unfiltered walk.

use crate::error::Result;
use crate::model::{
    AppliedAssembly, AppliedSubassembly, Baseline, CalculatedLink, CalculatedShape, Corridor,
    Region,
};
use crate::session::ModelSession;

/// Which part of the model an export should visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Corridor (or surface / feature line) handle. `None` visits everything.
    pub handle: Option<String>,
    /// Only visit the baseline at this position.
    pub baseline: Option<usize>,
    /// Only visit the region at this position.
    pub region: Option<usize>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn handle(handle: impl Into<String>) -> Self {
        Self {
            handle: Some(handle.into()),
            ..Self::default()
        }
    }

    /// Restricts the walk to one baseline; negative values mean no filter.
    pub fn with_baseline(mut self, index: i64) -> Self {
        self.baseline = index_filter(index);
        self
    }

    /// Restricts the walk to one region; negative values mean no filter.
    pub fn with_region(mut self, index: i64) -> Self {
        self.region = index_filter(index);
        self
    }
}

/// Converts a command-line index (`-1` for "all") into a filter.
pub fn index_filter(raw: i64) -> Option<usize> {
    usize::try_from(raw).ok()
}

/// Cross-section primitive visited by [`walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Shape,
    Link,
}

#[derive(Debug, Clone, Copy)]
pub enum SectionElement<'m> {
    Shape(&'m CalculatedShape),
    Link(&'m CalculatedLink),
}

impl SectionElement<'_> {
    pub fn codes(&self) -> &[String] {
        match self {
            SectionElement::Shape(s) => &s.codes,
            SectionElement::Link(l) => &l.codes,
        }
    }
}

/// One step of the walk with its full ancestry.
#[derive(Debug, Clone, Copy)]
pub struct WalkItem<'m> {
    pub corridor: &'m Corridor,
    pub baseline_index: usize,
    pub baseline: &'m Baseline,
    pub region_index: usize,
    pub region: &'m Region,
    pub assembly: &'m AppliedAssembly,
    pub subassembly: &'m AppliedSubassembly,
    /// Position of the element within its applied subassembly.
    pub element_index: usize,
    pub element: SectionElement<'m>,
}

impl WalkItem<'_> {
    /// Location string used in diagnostics.
    pub fn context(&self) -> String {
        let kind = match self.element {
            SectionElement::Shape(_) => "shape",
            SectionElement::Link(_) => "link",
        };
        format!(
            "{}/baseline {}/region {}/station {}/{} {}",
            self.corridor.name,
            self.baseline_index,
            self.region_index,
            self.subassembly.origin.station,
            kind,
            self.element_index
        )
    }
}

/// Baselines of `corridor` with their positions, honouring the filter.
pub fn baselines(
    corridor: &Corridor,
    filter: Option<usize>,
) -> impl Iterator<Item = (usize, &Baseline)> + '_ {
    corridor
        .baselines
        .iter()
        .enumerate()
        .filter(move |(i, _)| filter.map_or(true, |f| f == *i))
}

/// Regions of `baseline` with their positions, honouring the filter.
pub fn regions(baseline: &Baseline, filter: Option<usize>) -> impl Iterator<Item = (usize, &Region)> + '_ {
    baseline
        .regions
        .iter()
        .enumerate()
        .filter(move |(i, _)| filter.map_or(true, |f| f == *i))
}

/// Applied subassemblies of every applied assembly in `region`.
fn applied_subassemblies(
    region: &Region,
) -> impl Iterator<Item = (&AppliedAssembly, &AppliedSubassembly)> + '_ {
    region
        .applied_assemblies
        .iter()
        .flat_map(|aa| aa.subassemblies.iter().map(move |asa| (aa, asa)))
}

/// Shapes or links of one applied subassembly with their positions.
fn elements(
    subassembly: &AppliedSubassembly,
    kind: ElementKind,
) -> Box<dyn Iterator<Item = (usize, SectionElement<'_>)> + '_> {
    match kind {
        ElementKind::Shape => Box::new(
            subassembly
                .shapes
                .iter()
                .enumerate()
                .map(|(i, s)| (i, SectionElement::Shape(s))),
        ),
        ElementKind::Link => Box::new(
            subassembly
                .links
                .iter()
                .enumerate()
                .map(|(i, l)| (i, SectionElement::Link(l))),
        ),
    }
}

/// Lazily walks every selected shape or link.
///
/// Fails with [`ExportError::NotFound`](crate::error::ExportError::NotFound)
/// when the handle selector matches no corridor.
pub fn walk<'m>(
    session: &ModelSession<'m>,
    selection: &Selection,
    kind: ElementKind,
) -> Result<impl Iterator<Item = WalkItem<'m>>> {
    let corridors = session.corridors(selection.handle.as_deref())?;
    let (baseline_filter, region_filter) = (selection.baseline, selection.region);
    Ok(corridors.into_iter().flat_map(move |corridor| {
        baselines(corridor, baseline_filter).flat_map(move |(baseline_index, baseline)| {
            regions(baseline, region_filter).flat_map(move |(region_index, region)| {
                applied_subassemblies(region).flat_map(move |(assembly, subassembly)| {
                    elements(subassembly, kind).map(move |(element_index, element)| WalkItem {
                        corridor,
                        baseline_index,
                        baseline,
                        region_index,
                        region,
                        assembly,
                        subassembly,
                        element_index,
                        element,
                    })
                })
            })
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::geometry::StationOffsetElevation;
    use crate::model::Model;

    fn link() -> CalculatedLink {
        CalculatedLink {
            codes: vec!["Top".into()],
            points: Vec::new(),
        }
    }

    fn applied(station: f64, links: usize) -> AppliedAssembly {
        AppliedAssembly {
            station,
            subassemblies: vec![AppliedSubassembly {
                subassembly: None,
                origin: StationOffsetElevation::new(station, 0.0, 0.0),
                shapes: vec![CalculatedShape {
                    codes: vec!["Pave".into()],
                    links: vec![0],
                }],
                links: (0..links).map(|_| link()).collect(),
            }],
        }
    }

    fn region(name: &str, start: f64, end: f64) -> Region {
        Region {
            name: name.into(),
            start,
            end,
            assembly: None,
            applied_assemblies: vec![applied(start, 2), applied(end, 2)],
        }
    }

    fn baseline(name: &str) -> Baseline {
        Baseline {
            name: name.into(),
            alignment: Default::default(),
            start_station: 0.0,
            regions: vec![region("R0", 0.0, 50.0), region("R1", 50.0, 100.0)],
            feature_lines: Vec::new(),
        }
    }

    fn model() -> Model {
        let mut model = Model::new("Road.dwg");
        model.corridors.push(Corridor {
            name: "Main".into(),
            handle: "1A".into(),
            baselines: vec![baseline("BL0"), baseline("BL1"), baseline("BL2")],
        });
        model.corridors.push(Corridor {
            name: "Ramp".into(),
            handle: "1B".into(),
            baselines: vec![baseline("RB0")],
        });
        model
    }

    #[test]
    fn full_walk_visits_everything_in_order() {
        let model = model();
        let session = ModelSession::open(&model);
        let items: Vec<_> = walk(&session, &Selection::all(), ElementKind::Link)
            .unwrap()
            .collect();
        // 4 baselines x 2 regions x 2 applied assemblies x 2 links
        assert_eq!(items.len(), 32);
        assert_eq!(items[0].corridor.name, "Main");
        assert_eq!(items[0].element_index, 0);
        assert_eq!(items[1].element_index, 1);
        assert_eq!(items.last().unwrap().corridor.name, "Ramp");
    }

    #[test]
    fn baseline_selector_keeps_unfiltered_numbering() {
        let model = model();
        let session = ModelSession::open(&model);
        let selection = Selection::handle("1a").with_baseline(1).with_region(-1);
        let items: Vec<_> = walk(&session, &selection, ElementKind::Shape)
            .unwrap()
            .collect();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.baseline_index == 1));
        assert!(items.iter().all(|i| i.baseline.name == "BL1"));
        let regions: Vec<usize> = items.iter().map(|i| i.region_index).collect();
        assert_eq!(regions, vec![0, 0, 1, 1]);
    }

    #[test]
    fn region_selector() {
        let model = model();
        let session = ModelSession::open(&model);
        let selection = Selection::all().with_region(1);
        let items: Vec<_> = walk(&session, &selection, ElementKind::Shape)
            .unwrap()
            .collect();
        assert!(items.iter().all(|i| i.region_index == 1 && i.region.name == "R1"));
        assert_eq!(items.len(), 8);
    }

    #[test]
    fn out_of_range_selector_yields_nothing() {
        let model = model();
        let session = ModelSession::open(&model);
        let selection = Selection::all().with_baseline(9);
        assert_eq!(
            walk(&session, &selection, ElementKind::Link).unwrap().count(),
            0
        );
    }

    #[test]
    fn unknown_corridor_is_not_found() {
        let model = model();
        let session = ModelSession::open(&model);
        let result = walk(&session, &Selection::handle("FF"), ElementKind::Link);
        assert!(matches!(result, Err(ExportError::NotFound { .. })));
    }

    #[test]
    fn negative_index_means_no_filter() {
        assert_eq!(index_filter(-1), None);
        assert_eq!(index_filter(0), Some(0));
        assert_eq!(index_filter(3), Some(3));
    }

    #[test]
    fn context_names_the_element() {
        let model = model();
        let session = ModelSession::open(&model);
        let item = walk(&session, &Selection::all(), ElementKind::Shape)
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(item.context(), "Main/baseline 0/region 0/station 0/shape 0");
    }
}
