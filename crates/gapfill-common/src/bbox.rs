//! Geographic bounds used to crop the input datasets.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees.
///
/// Field names match the `boundaries` block of the YAML configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl GeoBounds {
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    /// Longitudinal extent in degrees.
    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Latitudinal extent in degrees.
    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Check if a point is contained within the bounds (edges inclusive).
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }

    /// Validate ordering and latitude/longitude ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.lon_min >= self.lon_max {
            return Err(format!(
                "lon_min ({}) must be < lon_max ({})",
                self.lon_min, self.lon_max
            ));
        }
        if self.lat_min >= self.lat_max {
            return Err(format!(
                "lat_min ({}) must be < lat_max ({})",
                self.lat_min, self.lat_max
            ));
        }
        if self.lat_min < -90.0 || self.lat_max > 90.0 {
            return Err("latitude bounds must lie within [-90, 90]".to_string());
        }
        if self.lon_min < -180.0 || self.lon_max > 360.0 {
            return Err("longitude bounds must lie within [-180, 360]".to_string());
        }
        Ok(())
    }
}
