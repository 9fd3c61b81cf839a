//! Query metrics recorded through the `metrics` facade.

use std::time::Instant;

use metrics::{counter, histogram};

pub const QUERIES_TOTAL: &str = "soil_moisture_queries_total";
pub const QUERY_DURATION_SECONDS: &str = "soil_moisture_query_duration_seconds";

/// Wall-clock timer for one query.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Record a finished query. `outcome` is `"ok"` or an error kind.
pub fn record_query(outcome: &'static str, timer: &Timer) {
    counter!(QUERIES_TOTAL, "outcome" => outcome).increment(1);
    histogram!(QUERY_DURATION_SECONDS).record(timer.elapsed_secs());
}
