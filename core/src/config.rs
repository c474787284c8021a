use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

use crate::error::{HazardError, Result};

/// Terskelsettet for klassifiseringen. Alle felt kan overstyres enkeltvis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HazardThresholds {
    pub light_descent: f64,       // stigning (negativ)
    pub steep_descent: f64,
    pub ultra_steep_descent: f64,
    pub climb: f64,
    pub steep_climb: f64,
    pub turn: f64,                // grader
}

impl Default for HazardThresholds {
    fn default() -> Self {
        Self {
            light_descent: -0.049,
            steep_descent: -0.099,
            ultra_steep_descent: -0.199,
            climb: 0.049,
            steep_climb: 0.099,
            turn: 19.0,
        }
    }
}

impl HazardThresholds {
    fn as_pairs(&self) -> [(&'static str, f64); 6] {
        [
            ("light_descent", self.light_descent),
            ("steep_descent", self.steep_descent),
            ("ultra_steep_descent", self.ultra_steep_descent),
            ("climb", self.climb),
            ("steep_climb", self.steep_climb),
            ("turn", self.turn),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Korteste steg (m) som får beregnet stigning.
    pub min_step_dist_m: f64,
    /// Bakovervendt vindu for avg_grade/avg_turn (≥ 1).
    pub rolling_window: usize,
    pub thresholds: HazardThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_step_dist_m: 2.0,
            rolling_window: 3,
            thresholds: HazardThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    pub fn with_min_step_dist_m(mut self, dist_m: f64) -> Self {
        self.min_step_dist_m = dist_m;
        self
    }

    /// Leser config fra JSON. Manglende felt får default-verdi.
    pub fn from_json(json_in: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(json_in);
        let cfg: AnalysisConfig = spte::deserialize(&mut de).map_err(|e| {
            HazardError::Configuration(format!("parse error at {}: {}", e.path(), e.inner()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Avviser ugyldig config før noe prosesseres.
    pub fn validate(&self) -> Result<()> {
        if self.rolling_window < 1 {
            return Err(reject(format!(
                "rolling_window must be >= 1, got {}",
                self.rolling_window
            )));
        }
        check_min_step_dist(self.min_step_dist_m)?;
        for (name, value) in self.thresholds.as_pairs() {
            if !value.is_finite() {
                return Err(reject(format!("threshold {name} must be finite, got {value}")));
            }
        }
        Ok(())
    }
}

/// Felles sjekk for config og `compute_step_metrics`.
pub(crate) fn check_min_step_dist(dist_m: f64) -> Result<()> {
    if !dist_m.is_finite() || dist_m < 0.0 {
        return Err(reject(format!("min_step_dist_m must be finite and >= 0, got {dist_m}")));
    }
    Ok(())
}

fn reject(msg: String) -> HazardError {
    log::warn!("rejected analysis config: {msg}");
    HazardError::Configuration(msg)
}
