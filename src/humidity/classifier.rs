use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Qualitative humidity label derived from a raw sensor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum HumidityStatus {
    InAir,
    DrySoil,
    SlightlyMoist,
    Moist,
    WaterSubmerged,
    Unknown,
}

impl HumidityStatus {
    /// Label used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InAir => "inAir",
            Self::DrySoil => "drySoil",
            Self::SlightlyMoist => "slightlyMoist",
            Self::Moist => "moist",
            Self::WaterSubmerged => "waterSubmerged",
            Self::Unknown => "unknown",
        }
    }

    /// Label shown to humans by the dashboard.
    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::InAir => "In the air",
            Self::DrySoil => "Dry soil",
            Self::SlightlyMoist => "Slightly moist",
            Self::Moist => "Moist",
            Self::WaterSubmerged => "Submerged in water",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HumidityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed interval of sensor values mapped to a status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub status: HumidityStatus,
    pub min: f64,
    pub max: f64,
}

impl Band {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bands in lookup order. Adjacent bands share their boundary values and
/// 250..300 is not covered; the first matching band wins.
pub const HUMIDITY_BANDS: [Band; 5] = [
    Band { status: HumidityStatus::InAir, min: 850.0, max: 1024.0 },
    Band { status: HumidityStatus::DrySoil, min: 700.0, max: 850.0 },
    Band { status: HumidityStatus::SlightlyMoist, min: 500.0, max: 700.0 },
    Band { status: HumidityStatus::Moist, min: 300.0, max: 500.0 },
    Band { status: HumidityStatus::WaterSubmerged, min: 0.0, max: 250.0 },
];

/// Classify a raw sensor value. Values outside every band (NaN included)
/// are `Unknown`.
#[must_use]
pub fn classify(value: f64) -> HumidityStatus {
    HUMIDITY_BANDS
        .iter()
        .find(|band| band.contains(value))
        .map_or(HumidityStatus::Unknown, |band| band.status)
}
