use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Meter → fot.
pub const FEET_PER_METER: f64 = 3.28084;

/// Ett GPS-punkt fra sporet, slik inntaket leverer det.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    #[serde(default, alias = "step")]
    pub sequence_index: Option<i64>,       // rekkefølge når tid mangler
    #[serde(default, alias = "time")]
    pub timestamp: Option<DateTime<Utc>>,
    pub lat: f64,                          // grader
    pub lon: f64,                          // grader
    #[serde(default, alias = "elevation")]
    pub elevation_m: Option<f64>,          // meter
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64, elevation_m: Option<f64>) -> Self {
        Self {
            sequence_index: None,
            timestamp: None,
            lat,
            lon,
            elevation_m,
        }
    }

    pub fn with_index(mut self, idx: i64) -> Self {
        self.sequence_index = Some(idx);
        self
    }

    pub fn with_time(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Høyde i meter; NaN/uendelig regnes som manglende.
    pub fn elevation(&self) -> Option<f64> {
        self.elevation_m.filter(|m| m.is_finite())
    }

    /// Høyde i fot, `None` når høyde mangler.
    pub fn elevation_f(&self) -> Option<f64> {
        self.elevation().map(|m| m * FEET_PER_METER)
    }
}

/// Overgangen fra forrige punkt til dette. Rad 0 er et "nullsteg".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    #[serde(flatten)]
    pub point: TrackPoint,
    pub elevation_f: Option<f64>,
    pub distance_m: f64,
    pub distance_f: f64,
    pub bearing_deg: Option<f64>,       // [0, 360), None = udefinert
    pub turn_deg: Option<f64>,          // [0, 180]
    pub elevation_delta_m: Option<f64>,
    pub elevation_delta_f: Option<f64>,
    pub grade: Option<f64>,             // stigning (dh / ds)
}

/// Faremerke for et steg. Rekkefølgen her er kun for sortering/telling,
/// presedens styres av regel-lista i `hazard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardLabel {
    #[default]
    Flat,
    LightDescent,
    SteepDescent,
    UltraSteepDescent,
    TurnOnDescent,
    TurnOnSteepDescent,
    Climb,
    SteepClimb,
}

impl HazardLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardLabel::Flat => "flat",
            HazardLabel::LightDescent => "light_descent",
            HazardLabel::SteepDescent => "steep_descent",
            HazardLabel::UltraSteepDescent => "ultra_steep_descent",
            HazardLabel::TurnOnDescent => "turn_on_descent",
            HazardLabel::TurnOnSteepDescent => "turn_on_steep_descent",
            HazardLabel::Climb => "climb",
            HazardLabel::SteepClimb => "steep_climb",
        }
    }
}

impl fmt::Display for HazardLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Steg + glattede signaler + merke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedStep {
    #[serde(flatten)]
    pub step: StepRecord,
    pub avg_grade: Option<f64>,
    pub avg_turn: Option<f64>,
    pub hazard: HazardLabel,
}
