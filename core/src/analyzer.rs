use std::collections::BTreeMap;

use serde::Serialize;
use serde_path_to_error as spte;

use crate::config::AnalysisConfig;
use crate::error::{HazardError, Result};
use crate::hazard::detect_hazards;
use crate::steps::compute_step_metrics;
use crate::types::{ClassifiedStep, HazardLabel, TrackPoint};

/// Hele pipelinen: punkter → steg-metrikker → faremerker.
///
/// Config valideres før noe beregnes. Tom inn gir tom ut, ett punkt gir
/// ett nullsteg merket `flat`.
pub fn analyze_steps(points: &[TrackPoint], cfg: &AnalysisConfig) -> Result<Vec<ClassifiedStep>> {
    cfg.validate()?;
    let steps = compute_step_metrics(points, cfg.min_step_dist_m)?;
    let classified = detect_hazards(&steps, cfg)?;

    if let Some(m) = crate::metrics::global() {
        m.record_analysis(&classified);
    }
    log::debug!(
        "analyzed {} points (window={}, min_step_dist_m={})",
        classified.len(),
        cfg.rolling_window,
        cfg.min_step_dist_m
    );
    Ok(classified)
}

/// Antall rader per merke (rapport uten utskrift).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HazardSummary {
    pub points: usize,
    pub counts: BTreeMap<HazardLabel, usize>,
}

impl HazardSummary {
    pub fn count(&self, label: HazardLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }
}

pub fn summarize(steps: &[ClassifiedStep]) -> HazardSummary {
    let mut counts = BTreeMap::new();
    for s in steps {
        *counts.entry(s.hazard).or_insert(0usize) += 1;
    }
    HazardSummary {
        points: steps.len(),
        counts,
    }
}

/// JSON-array med punkter → kjernetyper. Feilsti (f.eks. `[3].lat`) med i feilen.
pub fn parse_points_json(json_in: &str) -> Result<Vec<TrackPoint>> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de).map_err(|e| {
        let err = HazardError::input_shape(e.path().to_string(), e.inner().to_string());
        log::warn!("{err}");
        err
    })
}

fn parse_cfg(cfg_json: Option<&str>) -> Result<AnalysisConfig> {
    match cfg_json {
        Some(txt) if !txt.trim().is_empty() => AnalysisConfig::from_json(txt),
        _ => Ok(AnalysisConfig::default()),
    }
}

/// JSON inn / JSON ut – flaten Python-modulen bruker.
pub fn analyze_steps_json(points_json: &str, cfg_json: Option<&str>) -> Result<String> {
    let cfg = parse_cfg(cfg_json)?;
    let points = parse_points_json(points_json)?;
    let out = analyze_steps(&points, &cfg)?;
    Ok(serde_json::to_string(&out)?)
}

/// Som `analyze_steps_json`, men returnerer kun opptellingen.
pub fn hazard_counts_json(points_json: &str, cfg_json: Option<&str>) -> Result<String> {
    let cfg = parse_cfg(cfg_json)?;
    let points = parse_points_json(points_json)?;
    let out = analyze_steps(&points, &cfg)?;
    Ok(serde_json::to_string(&summarize(&out))?)
}
