//! Station to region correlation.

use crate::error::{ExportError, Result};
use crate::model::Region;

/// Distance in model length units under which a station is considered to sit
/// on a region boundary.
pub const STATION_TOLERANCE: f64 = 1e-4;

impl Region {
    /// Returns `true` if `station` lies strictly inside the region or within
    /// [`STATION_TOLERANCE`] of either end.
    pub fn contains_station(&self, station: f64) -> bool {
        (self.start < station && station < self.end)
            || (station - self.start).abs() < STATION_TOLERANCE
            || (station - self.end).abs() < STATION_TOLERANCE
    }
}

/// Returns the index of the region owning `station`.
///
/// Regions are scanned in stored order and the first match wins, so a station
/// on a shared boundary belongs to the earlier region.
pub fn find_region(regions: &[Region], station: f64) -> Result<usize> {
    regions
        .iter()
        .position(|r| r.contains_station(station))
        .ok_or(ExportError::NoRegionMatch { station })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str, start: f64, end: f64) -> Region {
        Region {
            name: name.into(),
            start,
            end,
            assembly: None,
            applied_assemblies: Vec::new(),
        }
    }

    fn abutting() -> Vec<Region> {
        vec![
            region("R1", 0.0, 100.0),
            region("R2", 100.0, 250.0),
            region("R3", 250.0, 400.0),
        ]
    }

    #[test]
    fn interior_station() {
        assert_eq!(find_region(&abutting(), 175.0).unwrap(), 1);
    }

    #[test]
    fn shared_boundary_goes_to_first_region() {
        let regions = abutting();
        assert_eq!(find_region(&regions, 100.0).unwrap(), 0);
        assert_eq!(find_region(&regions, 250.0).unwrap(), 1);
    }

    #[test]
    fn noise_within_tolerance_still_matches() {
        let regions = abutting();
        assert_eq!(find_region(&regions, 400.0 + 0.9e-4).unwrap(), 2);
        assert_eq!(find_region(&regions, -0.9e-4).unwrap(), 0);
        assert_eq!(find_region(&regions, 100.0 + 0.5e-4).unwrap(), 0);
    }

    #[test]
    fn near_zero_gap_is_bridged() {
        let regions = vec![region("A", 0.0, 50.0), region("B", 50.00005, 90.0)];
        assert_eq!(find_region(&regions, 50.00003).unwrap(), 0);
        assert_eq!(find_region(&regions, 50.0002).unwrap(), 1);
    }

    #[test]
    fn outside_every_region() {
        let err = find_region(&abutting(), 400.5).unwrap_err();
        assert!(matches!(err, ExportError::NoRegionMatch { station } if station == 400.5));
        assert!(find_region(&[], 0.0).is_err());
    }
}
