//! Geographic location attached to a task.
//!
//! # Responsibility
//! - Represent one immutable latitude/longitude pair.
//! - Render the wire form used by the shared task schema.
//!
//! # Invariants
//! - Both coordinates are fixed at construction and never change.
//! - Wire field names are `lat` and `lng`, exactly.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Immutable coordinate pair owned by at most one task.
///
/// Coordinate ranges are not validated; values outside [-90, 90] and
/// [-180, 180] are stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskLocation {
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lng")]
    longitude: f64,
}

impl TaskLocation {
    /// Creates a location from raw coordinates, accepted as-is.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the stored latitude unchanged.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the stored longitude unchanged.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Display for TaskLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Location at [{}, {}]", self.latitude, self.longitude)
    }
}
