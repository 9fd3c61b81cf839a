//! HTTP request handlers for the soil-moisture API.

pub mod health;
pub mod soil_moisture;
