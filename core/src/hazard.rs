use crate::config::{AnalysisConfig, HazardThresholds};
use crate::error::Result;
use crate::geo::RoundTo;
use crate::smoothing::rolling_mean;
use crate::types::{ClassifiedStep, HazardLabel, StepRecord};

/// Signalene én rad klassifiseres på. `next_grade` er neste rads stigning
/// (None på siste rad).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowSignals {
    pub grade: Option<f64>,
    pub next_grade: Option<f64>,
    pub turn: Option<f64>,
    pub avg_grade: Option<f64>,
    pub avg_turn: Option<f64>,
}

// Stigning sammenlignes avrundet til 2 desimaler, sving til hele grader.
// Udefinert verdi oppfyller aldri et predikat.
#[inline]
fn grade_below(g: Option<f64>, limit: f64) -> bool {
    g.map_or(false, |g| g.round_to(2) < limit)
}

#[inline]
fn grade_above(g: Option<f64>, limit: f64) -> bool {
    g.map_or(false, |g| g.round_to(2) > limit)
}

#[inline]
fn turn_above(t: Option<f64>, limit: f64) -> bool {
    t.map_or(false, |t| t.round_to(0) > limit)
}

#[inline]
fn midpoint(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

fn light_descent(r: &RowSignals, t: &HazardThresholds) -> bool {
    grade_below(r.grade, t.light_descent)
        || grade_below(r.next_grade, midpoint(t.light_descent, t.steep_descent))
}

fn steep_descent(r: &RowSignals, t: &HazardThresholds) -> bool {
    grade_below(r.grade, t.steep_descent)
        || grade_below(r.next_grade, midpoint(t.steep_descent, t.ultra_steep_descent))
}

fn ultra_steep_descent(r: &RowSignals, t: &HazardThresholds) -> bool {
    // look-ahead bruker ultra × 1.1, ikke et midtpunkt
    grade_below(r.grade, t.ultra_steep_descent)
        || grade_below(r.next_grade, t.ultra_steep_descent * 1.1)
}

fn turn_on_descent(r: &RowSignals, t: &HazardThresholds) -> bool {
    let on_turn = turn_above(r.turn, t.turn);
    (on_turn
        && (grade_below(r.next_grade, midpoint(t.light_descent, t.steep_descent))
            || grade_below(r.grade, t.light_descent)))
        || (turn_above(r.avg_turn, t.turn) && grade_below(r.avg_grade, t.light_descent))
}

fn turn_on_steep_descent(r: &RowSignals, t: &HazardThresholds) -> bool {
    let on_turn = turn_above(r.turn, t.turn);
    (on_turn
        && (grade_below(r.next_grade, midpoint(t.steep_descent, t.ultra_steep_descent))
            || grade_below(r.grade, t.steep_descent)))
        || (turn_above(r.avg_turn, t.turn) && grade_below(r.avg_grade, t.steep_descent))
}

fn climb(r: &RowSignals, t: &HazardThresholds) -> bool {
    grade_above(r.grade, t.climb)
}

fn steep_climb(r: &RowSignals, t: &HazardThresholds) -> bool {
    grade_above(r.grade, t.steep_climb)
}

pub type Predicate = fn(&RowSignals, &HazardThresholds) -> bool;

/// Regler i fast rekkefølge. SISTE treff vinner – ikke alvorlighetsgrad.
pub const RULES: [(HazardLabel, Predicate); 7] = [
    (HazardLabel::LightDescent, light_descent),
    (HazardLabel::SteepDescent, steep_descent),
    (HazardLabel::UltraSteepDescent, ultra_steep_descent),
    (HazardLabel::TurnOnDescent, turn_on_descent),
    (HazardLabel::TurnOnSteepDescent, turn_on_steep_descent),
    (HazardLabel::Climb, climb),
    (HazardLabel::SteepClimb, steep_climb),
];

/// Ett merke for én rad; `flat` når ingen regel slår til.
pub fn classify_row(signals: &RowSignals, thresholds: &HazardThresholds) -> HazardLabel {
    let mut label = HazardLabel::Flat;
    for (candidate, applies) in RULES.iter() {
        if applies(signals, thresholds) {
            label = *candidate;
        }
    }
    label
}

/// Glatter stigning/sving og merker hver rad.
pub fn detect_hazards(steps: &[StepRecord], cfg: &AnalysisConfig) -> Result<Vec<ClassifiedStep>> {
    cfg.validate()?;

    let grades: Vec<Option<f64>> = steps.iter().map(|s| s.grade).collect();
    let turns: Vec<Option<f64>> = steps.iter().map(|s| s.turn_deg).collect();
    let avg_grade = rolling_mean(&grades, cfg.rolling_window);
    let avg_turn = rolling_mean(&turns, cfg.rolling_window);

    let mut out = Vec::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        let signals = RowSignals {
            grade: grades[i],
            next_grade: grades.get(i + 1).copied().flatten(),
            turn: turns[i],
            avg_grade: avg_grade[i],
            avg_turn: avg_turn[i],
        };
        let hazard = classify_row(&signals, &cfg.thresholds);
        if hazard != HazardLabel::Flat {
            log::trace!("row {i}: {hazard} ({signals:?})");
        }

        out.push(ClassifiedStep {
            step: step.clone(),
            avg_grade: signals.avg_grade,
            avg_turn: signals.avg_turn,
            hazard,
        });
    }

    Ok(out)
}
