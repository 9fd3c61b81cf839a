//! Point query types and input validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{SoilError, SoilResult};

const INPUT_REQUIRED: &str = "lat, lon, date (YYYY-MM-DD) required";

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A validated soil-moisture point query.
///
/// Latitude is within [-90, 90], longitude within [-180, 180], both finite.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub point: GeoPoint,
    pub date: NaiveDate,
}

impl QueryRequest {
    /// Build a query from already-typed values, checking coordinate ranges.
    pub fn new(lat: f64, lon: f64, date: NaiveDate) -> SoilResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(SoilError::invalid_input(format!(
                "lat must be within [-90, 90], got {}",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(SoilError::invalid_input(format!(
                "lon must be within [-180, 180], got {}",
                lon
            )));
        }

        Ok(Self {
            point: GeoPoint::new(lat, lon),
            date,
        })
    }

    /// Parse raw query-string values.
    ///
    /// Any missing or unparseable value yields `InvalidInput`.
    pub fn parse(lat: Option<&str>, lon: Option<&str>, date: Option<&str>) -> SoilResult<Self> {
        let (Some(lat), Some(lon), Some(date)) = (lat, lon, date) else {
            return Err(SoilError::invalid_input(INPUT_REQUIRED));
        };

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| SoilError::invalid_input(INPUT_REQUIRED))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| SoilError::invalid_input(INPUT_REQUIRED))?;
        let date = parse_iso_date(date.trim()).ok_or_else(|| SoilError::invalid_input(INPUT_REQUIRED))?;

        Self::new(lat, lon, date)
    }

    /// The query date formatted as `YYYY-MM-DD`.
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Strict `YYYY-MM-DD`: zero-padded, unsigned, four-digit year.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
