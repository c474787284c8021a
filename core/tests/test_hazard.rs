// core/tests/test_hazard.rs
use trackhazard_core::hazard::{classify_row, detect_hazards, RowSignals, RULES};
use trackhazard_core::{compute_step_metrics, AnalysisConfig, HazardError, HazardLabel, HazardThresholds, TrackPoint};

fn label(grade: Option<f64>, next_grade: Option<f64>, turn: Option<f64>) -> HazardLabel {
    let signals = RowSignals { grade, next_grade, turn, ..Default::default() };
    classify_row(&signals, &HazardThresholds::default())
}

fn smoothed(avg_grade: Option<f64>, avg_turn: Option<f64>) -> HazardLabel {
    let signals = RowSignals { avg_grade, avg_turn, ..Default::default() };
    classify_row(&signals, &HazardThresholds::default())
}

#[test]
fn rules_are_declared_in_fixed_order() {
    let order: Vec<HazardLabel> = RULES.iter().map(|(l, _)| *l).collect();
    assert_eq!(
        order,
        vec![
            HazardLabel::LightDescent,
            HazardLabel::SteepDescent,
            HazardLabel::UltraSteepDescent,
            HazardLabel::TurnOnDescent,
            HazardLabel::TurnOnSteepDescent,
            HazardLabel::Climb,
            HazardLabel::SteepClimb,
        ]
    );
}

#[test]
fn nothing_defined_is_flat() {
    assert_eq!(label(None, None, None), HazardLabel::Flat);
    assert_eq!(label(Some(0.0), Some(0.0), Some(0.0)), HazardLabel::Flat);
}

#[test]
fn last_matching_rule_wins_over_severity() {
    // climb + look-ahead mot bratt nedoverbakke → climb (deklarert sist)
    assert_eq!(label(Some(0.06), Some(-0.2), None), HazardLabel::Climb);
    // alt slår til → steep_climb
    let all = RowSignals {
        grade: Some(0.12),
        next_grade: Some(-0.3),
        turn: Some(40.0),
        avg_grade: Some(-0.3),
        avg_turn: Some(40.0),
    };
    assert_eq!(classify_row(&all, &HazardThresholds::default()), HazardLabel::SteepClimb);
}

#[test]
fn descent_levels_on_current_grade() {
    assert_eq!(label(Some(-0.06), None, None), HazardLabel::LightDescent);
    assert_eq!(label(Some(-0.12), None, None), HazardLabel::SteepDescent);
    assert_eq!(label(Some(-0.25), None, None), HazardLabel::UltraSteepDescent);
}

#[test]
fn grade_rounding_is_half_even_at_boundary() {
    // -0.045 → -0.04 (ikke -0.05) → ikke under -0.049
    assert_eq!(label(Some(-0.045), None, None), HazardLabel::Flat);
    assert_eq!(label(Some(-0.0495), None, None), HazardLabel::LightDescent);
    assert_eq!(label(Some(-0.055), None, None), HazardLabel::LightDescent);
    // 0.105 → 0.10 > 0.099
    assert_eq!(label(Some(0.105), None, None), HazardLabel::SteepClimb);
    assert_eq!(label(Some(0.049), None, None), HazardLabel::Flat);
}

#[test]
fn look_ahead_uses_midpoints_and_ultra_factor() {
    // midtpunkt light/steep = -0.074
    assert_eq!(label(None, Some(-0.08), None), HazardLabel::LightDescent);
    assert_eq!(label(None, Some(-0.07), None), HazardLabel::Flat);
    // midtpunkt steep/ultra = -0.149
    assert_eq!(label(None, Some(-0.16), None), HazardLabel::SteepDescent);
    // ultra × 1.1 = -0.2189
    assert_eq!(label(None, Some(-0.21), None), HazardLabel::SteepDescent);
    assert_eq!(label(None, Some(-0.22), None), HazardLabel::UltraSteepDescent);
}

#[test]
fn turn_rounding_and_threshold() {
    assert_eq!(label(Some(-0.06), None, Some(19.5)), HazardLabel::TurnOnDescent);
    assert_eq!(label(Some(-0.06), None, Some(19.4)), HazardLabel::LightDescent);
    // 18.5 → 18
    assert_eq!(label(Some(-0.06), None, Some(18.5)), HazardLabel::LightDescent);
    assert_eq!(label(Some(-0.12), None, Some(30.0)), HazardLabel::TurnOnSteepDescent);
    // sving uten nedoverbakke er ingen fare
    assert_eq!(label(Some(0.0), None, Some(90.0)), HazardLabel::Flat);
}

#[test]
fn turn_with_look_ahead_descent() {
    assert_eq!(label(Some(0.0), Some(-0.08), Some(25.0)), HazardLabel::TurnOnDescent);
    assert_eq!(label(Some(0.0), Some(-0.16), Some(25.0)), HazardLabel::TurnOnSteepDescent);
}

#[test]
fn smoothed_turn_on_descent() {
    assert_eq!(smoothed(Some(-0.06), Some(25.0)), HazardLabel::TurnOnDescent);
    assert_eq!(smoothed(Some(-0.12), Some(25.0)), HazardLabel::TurnOnSteepDescent);
    assert_eq!(smoothed(Some(-0.12), None), HazardLabel::Flat);
    assert_eq!(smoothed(None, Some(25.0)), HazardLabel::Flat);
}

#[test]
fn custom_thresholds_are_respected() {
    let strict = HazardThresholds { light_descent: -0.02, ..Default::default() };
    let signals = RowSignals { grade: Some(-0.03), ..Default::default() };
    assert_eq!(classify_row(&signals, &strict), HazardLabel::LightDescent);
    assert_eq!(classify_row(&signals, &HazardThresholds::default()), HazardLabel::Flat);
}

fn descending_track(n: usize) -> Vec<TrackPoint> {
    // ~11 m per steg østover, 1 m ned per steg (≈ -0.09)
    (0..n)
        .map(|i| TrackPoint::new(0.0, i as f64 * 0.0001, Some(100.0 - i as f64)))
        .collect()
}

#[test]
fn last_row_has_no_look_ahead() {
    // siste rad flat, nest siste bratt ned: look-ahead treffer rad n-3, ikke siste
    let mut points = descending_track(4);
    points.push(TrackPoint::new(0.0, 0.0004, Some(97.0)));
    let steps = compute_step_metrics(&points, 2.0).unwrap();
    let out = detect_hazards(&steps, &AnalysisConfig::default()).unwrap();

    assert_eq!(out.len(), 5);
    assert_eq!(out[4].step.grade, Some(0.0));
    assert_eq!(out[4].hazard, HazardLabel::Flat);
    // rad 0: grade udefinert, men neste rad er -0.09 → look-ahead
    assert_eq!(out[0].hazard, HazardLabel::LightDescent);
}

#[test]
fn rolling_window_controls_smoothed_columns() {
    let points = descending_track(6);
    let steps = compute_step_metrics(&points, 2.0).unwrap();

    let w3 = detect_hazards(&steps, &AnalysisConfig::default()).unwrap();
    // rad 0 har ingen grade → første fulle vindu er rad 1..=3
    assert_eq!(w3[2].avg_grade, None);
    assert!(w3[3].avg_grade.is_some());
    // turn udefinert på rad 0 og 1
    assert_eq!(w3[3].avg_turn, None);
    assert!((w3[4].avg_turn.unwrap()).abs() < 1e-9);

    let w1 = detect_hazards(&steps, &AnalysisConfig::default().with_rolling_window(1)).unwrap();
    for s in &w1 {
        assert_eq!(s.avg_grade, s.step.grade);
        assert_eq!(s.avg_turn, s.step.turn_deg);
    }

    let wide = detect_hazards(&steps, &AnalysisConfig::default().with_rolling_window(10)).unwrap();
    assert!(wide.iter().all(|s| s.avg_grade.is_none() && s.avg_turn.is_none()));
}

#[test]
fn zero_rolling_window_is_rejected() {
    let steps = compute_step_metrics(&descending_track(3), 2.0).unwrap();
    let cfg = AnalysisConfig::default().with_rolling_window(0);
    assert!(matches!(detect_hazards(&steps, &cfg), Err(HazardError::Configuration(_))));
}

#[test]
fn detect_hazards_keeps_step_columns() {
    let steps = compute_step_metrics(&descending_track(4), 2.0).unwrap();
    let out = detect_hazards(&steps, &AnalysisConfig::default()).unwrap();
    for (s, c) in steps.iter().zip(out.iter()) {
        assert_eq!(&c.step, s);
    }
}

#[test]
fn default_label_is_flat() {
    assert_eq!(HazardLabel::default(), HazardLabel::Flat);
    assert_eq!(classify_row(&RowSignals::default(), &HazardThresholds::default()), HazardLabel::default());
}
