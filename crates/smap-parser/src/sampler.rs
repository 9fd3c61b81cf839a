//! Nearest-pixel sampling of soil moisture across candidate groups.

use soil_common::GeoPoint;
use tracing::debug;

use crate::container::GridContainer;
use crate::coords::{nearest_pixel, resolve_coordinates};
use crate::error::SmapResult;
use crate::schema::{GroupSchema, RANGE_BEGINNING_ATTR, SMAP_SCHEMAS, SOIL_MOISTURE_UNITS};

/// Value sampled at the pixel nearest to a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleResult {
    pub value: f64,
    pub units: String,
    /// Group the value was read from.
    pub group_name: String,
    /// Observation timestamp from the granule metadata, or empty.
    pub timestamp_label: String,
    pub pixel_row: usize,
    pub pixel_col: usize,
}

/// Samples a container by walking an ordered list of [`GroupSchema`]s.
///
/// The first schema whose dataset and coordinates all resolve produces the
/// result; later schemas are not consulted. Schemas with a missing group,
/// dataset, or coordinate path are skipped.
///
/// There is no distance bound: a query far outside the grid's coverage still
/// gets the closest edge pixel.
#[derive(Debug, Clone, Copy)]
pub struct GridSampler {
    schemas: &'static [GroupSchema],
}

impl Default for GridSampler {
    fn default() -> Self {
        Self::new(SMAP_SCHEMAS)
    }
}

impl GridSampler {
    pub fn new(schemas: &'static [GroupSchema]) -> Self {
        Self { schemas }
    }

    pub fn schemas(&self) -> &'static [GroupSchema] {
        self.schemas
    }

    /// Sample the container at `point`.
    ///
    /// Returns `Ok(None)` when no schema yields a usable dataset and
    /// coordinate pair. Coordinate arrays that cannot form a mesh are a
    /// [`crate::SmapError::GridShape`] error rather than a skip.
    pub fn sample(&self, container: &dyn GridContainer, point: GeoPoint) -> SmapResult<Option<SampleResult>> {
        for schema in self.schemas {
            let dataset_path = schema.dataset_path();
            if !container.has_group(schema.group) || !container.has_dataset(&dataset_path) {
                debug!(group = schema.group, "Group or dataset absent, skipping");
                continue;
            }

            let lat_path = first_existing(container, schema.latitude_paths);
            let lon_path = first_existing(container, schema.longitude_paths);
            let (Some(lat_path), Some(lon_path)) = (lat_path, lon_path) else {
                debug!(group = schema.group, "Coordinates not found, skipping");
                continue;
            };

            let grid = resolve_coordinates(container.read_array(lat_path)?, container.read_array(lon_path)?)?;
            let (row, col) = nearest_pixel(&grid, point.lat, point.lon);
            let value = container.read_value(&dataset_path, row, col)?;

            let timestamp_label = container
                .attribute_text(schema.group, schema.timestamp_attrs, &[RANGE_BEGINNING_ATTR])
                .unwrap_or_default();

            debug!(
                group = schema.group,
                lat_path,
                lon_path,
                row,
                col,
                value,
                "Sampled nearest pixel"
            );

            return Ok(Some(SampleResult {
                value,
                units: SOIL_MOISTURE_UNITS.to_string(),
                group_name: schema.group.to_string(),
                timestamp_label,
                pixel_row: row,
                pixel_col: col,
            }));
        }

        Ok(None)
    }
}

fn first_existing(container: &dyn GridContainer, paths: &'static [&'static str]) -> Option<&'static str> {
    paths.iter().copied().find(|path| container.has_dataset(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{AttrValue, RawArray};
    use crate::memory::MemoryContainer;
    use crate::SmapError;

    const AM: &str = "Soil_Moisture_Retrieval_Data_AM";
    const PM: &str = "Soil_Moisture_Retrieval_Data_PM";

    fn values_3x3(offset: f64) -> RawArray {
        RawArray::new(vec![3, 3], (0..9).map(|i| offset + i as f64 / 100.0).collect())
    }

    fn lat_2d() -> RawArray {
        RawArray::new(vec![3, 3], vec![41.0, 41.0, 41.0, 40.0, 40.0, 40.0, 39.0, 39.0, 39.0])
    }

    fn lon_2d() -> RawArray {
        RawArray::new(vec![3, 3], vec![-101.0, -100.0, -99.0, -101.0, -100.0, -99.0, -101.0, -100.0, -99.0])
    }

    fn group_with_coords(container: MemoryContainer, group: &str, offset: f64) -> MemoryContainer {
        container
            .with_dataset(&format!("{}/soil_moisture", group), values_3x3(offset))
            .with_dataset(&format!("{}/latitude", group), lat_2d())
            .with_dataset(&format!("{}/longitude", group), lon_2d())
    }

    #[test]
    fn test_center_cell_scenario() {
        let container = group_with_coords(MemoryContainer::new(), AM, 0.1)
            .with_group_attribute(AM, "Start_time", AttrValue::Text("2024-06-01T06:00:00Z".into()));

        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(40.1, -100.05))
            .unwrap()
            .unwrap();

        assert_eq!((result.pixel_row, result.pixel_col), (1, 1));
        assert!((result.value - 0.14).abs() < 1e-12);
        assert_eq!(result.units, "m3/m3");
        assert_eq!(result.group_name, AM);
        assert_eq!(result.timestamp_label, "2024-06-01T06:00:00Z");
    }

    #[test]
    fn test_morning_group_wins_when_both_usable() {
        let container = group_with_coords(MemoryContainer::new(), AM, 0.1);
        let container = group_with_coords(container, PM, 0.5);

        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(40.0, -100.0))
            .unwrap()
            .unwrap();
        assert_eq!(result.group_name, AM);
    }

    #[test]
    fn test_skips_group_missing_coordinates() {
        // AM has data but no coordinates; PM is complete
        let container = MemoryContainer::new()
            .with_dataset(&format!("{}/soil_moisture", AM), values_3x3(0.1));
        let container = group_with_coords(container, PM, 0.5);

        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(41.0, -101.0))
            .unwrap()
            .unwrap();
        assert_eq!(result.group_name, PM);
        assert_eq!((result.pixel_row, result.pixel_col), (0, 0));
        assert!((result.value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_skips_group_missing_dataset() {
        let container = MemoryContainer::new()
            .with_dataset(&format!("{}/latitude", AM), lat_2d())
            .with_dataset(&format!("{}/longitude", AM), lon_2d());
        let container = group_with_coords(container, PM, 0.5);

        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(40.0, -100.0))
            .unwrap()
            .unwrap();
        assert_eq!(result.group_name, PM);
    }

    #[test]
    fn test_no_data_when_every_group_fails() {
        let container = MemoryContainer::new()
            .with_dataset(&format!("{}/soil_moisture", AM), values_3x3(0.1))
            .with_dataset(&format!("{}/soil_moisture", PM), values_3x3(0.5))
            .with_dataset(&format!("{}/latitude", PM), lat_2d());

        let result = GridSampler::default().sample(&container, GeoPoint::new(40.0, -100.0)).unwrap();
        assert!(result.is_none());

        let empty = MemoryContainer::new();
        assert!(GridSampler::default().sample(&empty, GeoPoint::new(0.0, 0.0)).unwrap().is_none());
    }

    #[test]
    fn test_grid_wide_coordinates_preferred() {
        // Shared 1D EASE-2 axes exist alongside per-group 2D arrays that
        // would point elsewhere; the shared axes win.
        let container = MemoryContainer::new()
            .with_dataset(&format!("{}/soil_moisture", AM), values_3x3(0.1))
            .with_dataset(&format!("{}/latitude", AM), RawArray::new(vec![3, 3], vec![0.0; 9]))
            .with_dataset(&format!("{}/longitude", AM), RawArray::new(vec![3, 3], vec![0.0; 9]))
            .with_dataset("/EASE2_grid/map_latitude", RawArray::vector(vec![41.0, 40.0, 39.0]))
            .with_dataset("/EASE2_grid/map_longitude", RawArray::vector(vec![-101.0, -100.0, -99.0]));

        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(39.0, -99.0))
            .unwrap()
            .unwrap();
        assert_eq!((result.pixel_row, result.pixel_col), (2, 2));
    }

    #[test]
    fn test_equatorial_fallback_paths() {
        let container = MemoryContainer::new()
            .with_dataset(&format!("{}/soil_moisture", AM), values_3x3(0.1))
            .with_dataset("/EASE2_grid/map_equatorial_latitude", RawArray::vector(vec![41.0, 40.0, 39.0]))
            .with_dataset("/EASE2_grid/map_longitude", RawArray::vector(vec![-101.0, -100.0, -99.0]));

        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(41.0, -100.0))
            .unwrap()
            .unwrap();
        assert_eq!((result.pixel_row, result.pixel_col), (0, 1));
    }

    #[test]
    fn test_mixed_rank_coordinates_fail_fast() {
        let container = MemoryContainer::new()
            .with_dataset(&format!("{}/soil_moisture", AM), values_3x3(0.1))
            .with_dataset("/EASE2_grid/map_latitude", RawArray::vector(vec![41.0, 40.0, 39.0]))
            .with_dataset(&format!("{}/longitude", AM), lon_2d());

        let result = GridSampler::default().sample(&container, GeoPoint::new(40.0, -100.0));
        assert!(matches!(result, Err(SmapError::GridShape(_))));
    }

    #[test]
    fn test_timestamp_falls_back_to_root_then_empty() {
        let container = group_with_coords(MemoryContainer::new(), AM, 0.1)
            .with_root_attribute(RANGE_BEGINNING_ATTR, AttrValue::Bytes(b"2024-06-01".to_vec()));
        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(40.0, -100.0))
            .unwrap()
            .unwrap();
        assert_eq!(result.timestamp_label, "2024-06-01");

        let container = group_with_coords(MemoryContainer::new(), AM, 0.1);
        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(40.0, -100.0))
            .unwrap()
            .unwrap();
        assert_eq!(result.timestamp_label, "");
    }

    #[test]
    fn test_empty_start_time_uses_range_beginning() {
        let container = group_with_coords(MemoryContainer::new(), AM, 0.1)
            .with_group_attribute(AM, "Start_time", AttrValue::Text(String::new()))
            .with_root_attribute(RANGE_BEGINNING_ATTR, AttrValue::Text("2024-06-01".into()));

        let result = GridSampler::default()
            .sample(&container, GeoPoint::new(40.0, -100.0))
            .unwrap()
            .unwrap();
        assert_eq!(result.timestamp_label, "2024-06-01");
    }

    #[test]
    fn test_binary_and_text_timestamps_match() {
        let text = group_with_coords(MemoryContainer::new(), AM, 0.1)
            .with_group_attribute(AM, "Start_time", AttrValue::Text("2024-06-01T06:00:00Z".into()));
        let binary = group_with_coords(MemoryContainer::new(), AM, 0.1)
            .with_group_attribute(AM, "Start_time", AttrValue::Bytes(b"2024-06-01T06:00:00Z".to_vec()));

        let sampler = GridSampler::default();
        let point = GeoPoint::new(40.0, -100.0);
        let a = sampler.sample(&text, point).unwrap().unwrap();
        let b = sampler.sample(&binary, point).unwrap().unwrap();
        assert_eq!(a.timestamp_label, b.timestamp_label);
    }

    #[test]
    fn test_dataset_smaller_than_grid_is_an_error() {
        let container = MemoryContainer::new()
            .with_dataset(&format!("{}/soil_moisture", AM), RawArray::new(vec![1, 1], vec![0.3]))
            .with_dataset(&format!("{}/latitude", AM), lat_2d())
            .with_dataset(&format!("{}/longitude", AM), lon_2d());

        let result = GridSampler::default().sample(&container, GeoPoint::new(39.0, -99.0));
        assert!(matches!(result, Err(SmapError::InvalidFormat(_))));
    }

    #[test]
    fn test_custom_schema_list() {
        static ONLY_PM: &[GroupSchema] = &[GroupSchema {
            group: "Soil_Moisture_Retrieval_Data_PM",
            dataset: "soil_moisture",
            latitude_paths: &["/Soil_Moisture_Retrieval_Data_PM/latitude"],
            longitude_paths: &["/Soil_Moisture_Retrieval_Data_PM/longitude"],
            timestamp_attrs: &["Start_time"],
        }];

        let container = group_with_coords(MemoryContainer::new(), AM, 0.1);
        assert!(GridSampler::new(ONLY_PM)
            .sample(&container, GeoPoint::new(40.0, -100.0))
            .unwrap()
            .is_none());
    }
}
