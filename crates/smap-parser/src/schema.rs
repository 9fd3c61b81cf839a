//! Candidate data groups of an SPL3SMP_E granule.
//!
//! The order of [`SMAP_SCHEMAS`] is the order the sampler tries them in:
//! morning pass before afternoon pass. Within each schema the coordinate
//! paths are ordered grid-wide first, per-group last, so a shared EASE-2
//! grid definition wins over a group's own arrays when both exist.

/// Static description of one candidate data group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSchema {
    /// Top-level group name.
    pub group: &'static str,
    /// Observation dataset inside `group`.
    pub dataset: &'static str,
    /// Candidate latitude dataset paths, tried in order.
    pub latitude_paths: &'static [&'static str],
    /// Candidate longitude dataset paths, tried in order.
    pub longitude_paths: &'static [&'static str],
    /// Group-level attributes holding the observation timestamp, tried in order.
    pub timestamp_attrs: &'static [&'static str],
}

impl GroupSchema {
    /// Full path of the observation dataset.
    pub fn dataset_path(&self) -> String {
        format!("/{}/{}", self.group, self.dataset)
    }
}

/// Container-level fallback attribute for the observation timestamp.
pub const RANGE_BEGINNING_ATTR: &str = "RangeBeginningDate";

/// Units of the `soil_moisture` dataset.
pub const SOIL_MOISTURE_UNITS: &str = "m3/m3";

/// SPL3SMP_E group schemas, morning pass first.
pub const SMAP_SCHEMAS: &[GroupSchema] = &[
    GroupSchema {
        group: "Soil_Moisture_Retrieval_Data_AM",
        dataset: "soil_moisture",
        latitude_paths: &[
            "/EASE2_grid/map_latitude",
            "/EASE2_grid/map_equatorial_latitude",
            "/Soil_Moisture_Retrieval_Data_AM/latitude",
        ],
        longitude_paths: &[
            "/EASE2_grid/map_longitude",
            "/EASE2_grid/map_equatorial_longitude",
            "/Soil_Moisture_Retrieval_Data_AM/longitude",
        ],
        timestamp_attrs: &["Start_time"],
    },
    GroupSchema {
        group: "Soil_Moisture_Retrieval_Data_PM",
        dataset: "soil_moisture",
        latitude_paths: &[
            "/EASE2_grid/map_latitude",
            "/EASE2_grid/map_equatorial_latitude",
            "/Soil_Moisture_Retrieval_Data_PM/latitude",
        ],
        longitude_paths: &[
            "/EASE2_grid/map_longitude",
            "/EASE2_grid/map_equatorial_longitude",
            "/Soil_Moisture_Retrieval_Data_PM/longitude",
        ],
        timestamp_attrs: &["Start_time"],
    },
];
