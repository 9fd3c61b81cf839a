//! Common types and utilities shared across the soil-moisture services.

pub mod error;
pub mod query;
pub mod time;

pub use error::{excerpt, SoilError, SoilResult, UPSTREAM_EXCERPT_LEN};
pub use query::{GeoPoint, QueryRequest};
pub use time::{day_window, format_cmr_instant};
