//! In-memory [`GridContainer`] used for fixtures and synthetic granules.

use std::collections::{BTreeMap, BTreeSet};

use crate::container::{normalize_path, AttrValue, ContainerOpener, GridContainer, RawArray};
use crate::error::{SmapError, SmapResult};

/// A container whose groups, datasets, and attributes live in maps.
///
/// Built with the `with_*` methods:
///
/// ```
/// use smap_parser::{MemoryContainer, RawArray, AttrValue, GridContainer};
///
/// let container = MemoryContainer::new()
///     .with_dataset("/Soil_Moisture_Retrieval_Data_AM/soil_moisture", RawArray::new(vec![1, 1], vec![0.25]))
///     .with_group_attribute("Soil_Moisture_Retrieval_Data_AM", "Start_time", AttrValue::Text("t0".into()));
///
/// assert!(container.has_group("Soil_Moisture_Retrieval_Data_AM"));
/// assert_eq!(container.read_value("Soil_Moisture_Retrieval_Data_AM/soil_moisture", 0, 0).unwrap(), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    groups: BTreeSet<String>,
    datasets: BTreeMap<String, RawArray>,
    group_attributes: BTreeMap<(String, String), AttrValue>,
    root_attributes: BTreeMap<String, AttrValue>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty top-level group.
    pub fn with_group(mut self, name: &str) -> Self {
        self.groups.insert(normalize_path(name).to_string());
        self
    }

    /// Add a dataset. Its top-level group, if any, is created too.
    pub fn with_dataset(mut self, path: &str, array: RawArray) -> Self {
        let path = normalize_path(path);
        if let Some((group, _)) = path.split_once('/') {
            self.groups.insert(group.to_string());
        }
        self.datasets.insert(path.to_string(), array);
        self
    }

    pub fn with_group_attribute(mut self, group: &str, name: &str, value: AttrValue) -> Self {
        let group = normalize_path(group).to_string();
        self.groups.insert(group.clone());
        self.group_attributes.insert((group, name.to_string()), value);
        self
    }

    pub fn with_root_attribute(mut self, name: &str, value: AttrValue) -> Self {
        self.root_attributes.insert(name.to_string(), value);
        self
    }
}

impl GridContainer for MemoryContainer {
    fn has_group(&self, name: &str) -> bool {
        self.groups.contains(normalize_path(name))
    }

    fn has_dataset(&self, path: &str) -> bool {
        self.datasets.contains_key(normalize_path(path))
    }

    fn read_array(&self, path: &str) -> SmapResult<RawArray> {
        self.datasets
            .get(normalize_path(path))
            .cloned()
            .ok_or_else(|| SmapError::MissingData(path.to_string()))
    }

    fn read_value(&self, path: &str, row: usize, col: usize) -> SmapResult<f64> {
        let array = self
            .datasets
            .get(normalize_path(path))
            .ok_or_else(|| SmapError::MissingData(path.to_string()))?;
        array.get_2d(row, col).ok_or_else(|| {
            SmapError::InvalidFormat(format!(
                "index ({}, {}) outside {} with shape {:?}",
                row, col, path, array.shape
            ))
        })
    }

    fn group_attribute(&self, group: &str, name: &str) -> Option<AttrValue> {
        self.group_attributes
            .get(&(normalize_path(group).to_string(), name.to_string()))
            .cloned()
    }

    fn root_attribute(&self, name: &str) -> Option<AttrValue> {
        self.root_attributes.get(name).cloned()
    }
}

/// Hands out clones of a fixed [`MemoryContainer`], ignoring the bytes.
impl ContainerOpener for MemoryContainer {
    fn open(&self, _data: &[u8]) -> SmapResult<Box<dyn GridContainer>> {
        Ok(Box::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_slash_is_optional() {
        let container =
            MemoryContainer::new().with_dataset("/EASE2_grid/map_latitude", RawArray::vector(vec![1.0]));
        assert!(container.has_dataset("EASE2_grid/map_latitude"));
        assert!(container.has_dataset("/EASE2_grid/map_latitude"));
        assert!(container.has_group("EASE2_grid"));
    }

    #[test]
    fn test_read_value_out_of_bounds() {
        let container =
            MemoryContainer::new().with_dataset("g/d", RawArray::new(vec![1, 2], vec![1.0, 2.0]));
        assert_eq!(container.read_value("g/d", 0, 1).unwrap(), 2.0);
        assert!(matches!(
            container.read_value("g/d", 1, 0),
            Err(SmapError::InvalidFormat(_))
        ));
        assert!(matches!(
            container.read_value("g/missing", 0, 0),
            Err(SmapError::MissingData(_))
        ));
    }

    #[test]
    fn test_attribute_text_group_then_root() {
        let container = MemoryContainer::new()
            .with_group("g")
            .with_root_attribute("RangeBeginningDate", AttrValue::Bytes(b"2024-06-01".to_vec()));
        assert_eq!(
            container.attribute_text("g", &["Start_time"], &["RangeBeginningDate"]),
            Some("2024-06-01".to_string())
        );

        let container = container.with_group_attribute("g", "Start_time", AttrValue::Text("t-am".into()));
        assert_eq!(
            container.attribute_text("g", &["Start_time"], &["RangeBeginningDate"]),
            Some("t-am".to_string())
        );
        assert_eq!(container.attribute_text("g", &["Nope"], &["Nope"]), None);
    }

    #[test]
    fn test_empty_group_attribute_falls_back_to_root() {
        let container = MemoryContainer::new()
            .with_group_attribute("g", "Start_time", AttrValue::Bytes(b"\0\0\0".to_vec()))
            .with_root_attribute("RangeBeginningDate", AttrValue::Text("2024-06-01".into()));
        assert_eq!(
            container.attribute_text("g", &["Start_time"], &["RangeBeginningDate"]),
            Some("2024-06-01".to_string())
        );

        let container = MemoryContainer::new()
            .with_group_attribute("g", "Start_time", AttrValue::Text(String::new()))
            .with_root_attribute("RangeBeginningDate", AttrValue::Text(String::new()));
        assert_eq!(container.attribute_text("g", &["Start_time"], &["RangeBeginningDate"]), None);
    }
}
