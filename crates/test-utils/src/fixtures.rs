//! Common test fixtures: synthetic SMAP granules.
//!
//! Every granule uses the 3×3 grid below so tests can reason about pixels
//! directly. Soil-moisture values come from
//! [`create_indexed_grid`](crate::generators::create_indexed_grid) with
//! [`AM_BASE`] or [`PM_BASE`].

use smap_parser::{AttrValue, MemoryContainer, RawArray};

use crate::generators::{create_indexed_grid, create_mesh};

pub const AM_GROUP: &str = "Soil_Moisture_Retrieval_Data_AM";
pub const PM_GROUP: &str = "Soil_Moisture_Retrieval_Data_PM";

/// Latitude of each grid row.
pub const GRID_LATS: [f64; 3] = [41.0, 40.0, 39.0];
/// Longitude of each grid column.
pub const GRID_LONS: [f64; 3] = [-101.0, -100.0, -99.0];

/// A point just off the center cell `(1, 1)`.
pub const CENTER_QUERY: (f64, f64) = (40.1, -100.05);

pub const AM_BASE: f64 = 0.1;
pub const PM_BASE: f64 = 0.3;

pub const AM_START_TIME: &str = "2024-06-01T06:00:00.000Z";
pub const PM_START_TIME: &str = "2024-06-01T18:00:00.000Z";
pub const RANGE_BEGINNING: &str = "2024-06-01";

fn grid_values(base: f64) -> RawArray {
    RawArray::new(vec![3, 3], create_indexed_grid(3, 3, base))
}

fn with_group_coordinates(container: MemoryContainer, group: &str) -> MemoryContainer {
    let (lats, lons) = create_mesh(&GRID_LATS, &GRID_LONS);
    container
        .with_dataset(&format!("/{}/latitude", group), RawArray::new(vec![3, 3], lats))
        .with_dataset(&format!("/{}/longitude", group), RawArray::new(vec![3, 3], lons))
}

/// Both passes with per-group 2D coordinates, the common SPL3SMP_E layout.
///
/// Group timestamps are stored as byte strings, the root range as text.
pub fn smap_granule() -> MemoryContainer {
    let container = MemoryContainer::new()
        .with_dataset(&format!("/{}/soil_moisture", AM_GROUP), grid_values(AM_BASE))
        .with_dataset(&format!("/{}/soil_moisture", PM_GROUP), grid_values(PM_BASE))
        .with_group_attribute(AM_GROUP, "Start_time", AttrValue::Bytes(AM_START_TIME.as_bytes().to_vec()))
        .with_group_attribute(PM_GROUP, "Start_time", AttrValue::Bytes(PM_START_TIME.as_bytes().to_vec()))
        .with_root_attribute("RangeBeginningDate", AttrValue::Text(RANGE_BEGINNING.to_string()));

    let container = with_group_coordinates(container, AM_GROUP);
    with_group_coordinates(container, PM_GROUP)
}

/// Both passes sharing 1D axes under `/EASE2_grid`, no group timestamps.
pub fn ease2_axes_granule() -> MemoryContainer {
    MemoryContainer::new()
        .with_dataset(&format!("/{}/soil_moisture", AM_GROUP), grid_values(AM_BASE))
        .with_dataset(&format!("/{}/soil_moisture", PM_GROUP), grid_values(PM_BASE))
        .with_dataset("/EASE2_grid/map_latitude", RawArray::vector(GRID_LATS.to_vec()))
        .with_dataset("/EASE2_grid/map_longitude", RawArray::vector(GRID_LONS.to_vec()))
        .with_root_attribute("RangeBeginningDate", AttrValue::Bytes(RANGE_BEGINNING.as_bytes().to_vec()))
}

/// Morning pass lacks coordinates; only the afternoon pass is usable.
pub fn pm_only_granule() -> MemoryContainer {
    let container = MemoryContainer::new()
        .with_dataset(&format!("/{}/soil_moisture", AM_GROUP), grid_values(AM_BASE))
        .with_dataset(&format!("/{}/soil_moisture", PM_GROUP), grid_values(PM_BASE))
        .with_group_attribute(PM_GROUP, "Start_time", AttrValue::Text(PM_START_TIME.to_string()));
    with_group_coordinates(container, PM_GROUP)
}

/// Data present in both passes but no coordinates anywhere.
pub fn granule_without_coordinates() -> MemoryContainer {
    MemoryContainer::new()
        .with_dataset(&format!("/{}/soil_moisture", AM_GROUP), grid_values(AM_BASE))
        .with_dataset(&format!("/{}/soil_moisture", PM_GROUP), grid_values(PM_BASE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use smap_parser::GridContainer;

    #[test]
    fn test_smap_granule_layout() {
        let granule = smap_granule();
        assert!(granule.has_group(AM_GROUP));
        assert!(granule.has_group(PM_GROUP));
        assert!(granule.has_dataset("Soil_Moisture_Retrieval_Data_AM/latitude"));
        assert!(!granule.has_dataset("/EASE2_grid/map_latitude"));
    }

    #[test]
    fn test_granule_without_coordinates_layout() {
        let granule = granule_without_coordinates();
        assert!(!granule.has_dataset("Soil_Moisture_Retrieval_Data_AM/latitude"));
        assert!(!granule.has_dataset("Soil_Moisture_Retrieval_Data_PM/longitude"));
    }
}
