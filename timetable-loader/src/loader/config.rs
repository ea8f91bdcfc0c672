//! Loader configuration.

use crate::domain::{DwellStat, VehicleClass};

/// Configuration parameters for a loader run.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Paths between consecutive stops longer than this many links are
    /// reported as suspicious.
    pub max_path_links: usize,

    /// Dwell time (seconds) applied to stops whose mean is unset.
    pub default_dwell_mean: u32,

    /// Dwell deviation (seconds) applied to stops whose deviation is unset.
    pub default_dwell_deviation: u32,

    /// Vehicle class assigned to every departure.
    pub vehicle_class: String,

    /// File name of the error log written next to the trip files.
    pub error_log_name: String,

    /// Record failed path queries in the error log.
    /// When false they are skipped silently.
    pub report_query_errors: bool,

    /// Record trips with no stop inside the network in the error log.
    pub report_routes_outside_network: bool,

    /// Create lines for legs that serve two or more stops but have an
    /// empty route.
    pub promote_routeless_legs: bool,
}

impl LoaderConfig {
    /// Returns the vehicle class used for departures.
    pub fn vehicle(&self) -> VehicleClass {
        VehicleClass(self.vehicle_class.clone())
    }

    /// Returns the dwell stat applied where nothing is set.
    pub fn default_dwell(&self) -> DwellStat {
        DwellStat::new(self.default_dwell_mean, self.default_dwell_deviation)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_path_links: 20,
            default_dwell_mean: 20,
            default_dwell_deviation: 10,
            vehicle_class: "Bus".to_string(),
            error_log_name: "Error Log.txt".to_string(),
            report_query_errors: true,
            report_routes_outside_network: true,
            promote_routeless_legs: true,
        }
    }
}
