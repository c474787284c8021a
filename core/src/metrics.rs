use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::types::{ClassifiedStep, HazardLabel};

/// Tellere for analysekjøringer. Egen registry slik at vertsprosessen
/// selv bestemmer om/hvordan de eksponeres.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub analyses_total: IntCounter,
    pub steps_total: IntCounter,
    pub undefined_grade_total: IntCounter,
    pub hazard_labels_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let analyses_total = IntCounter::new("trackhazard_analyses_total", "Completed track analyses")?;
        let steps_total = IntCounter::new("trackhazard_steps_total", "Step rows classified")?;
        let undefined_grade_total = IntCounter::new(
            "trackhazard_undefined_grade_total",
            "Step rows where grade was undefined",
        )?;
        let hazard_labels_total = IntCounterVec::new(
            Opts::new("trackhazard_hazard_labels_total", "Step rows per hazard label"),
            &["label"],
        )?;

        registry.register(Box::new(analyses_total.clone()))?;
        registry.register(Box::new(steps_total.clone()))?;
        registry.register(Box::new(undefined_grade_total.clone()))?;
        registry.register(Box::new(hazard_labels_total.clone()))?;

        Ok(Self {
            registry,
            analyses_total,
            steps_total,
            undefined_grade_total,
            hazard_labels_total,
        })
    }

    pub fn record_analysis(&self, steps: &[ClassifiedStep]) {
        self.analyses_total.inc();
        self.steps_total.inc_by(steps.len() as u64);
        for s in steps {
            if s.step.grade.is_none() {
                self.undefined_grade_total.inc();
            }
            self.hazard_labels_total.with_label_values(&[s.hazard.as_str()]).inc();
        }
    }

    pub fn label_count(&self, label: HazardLabel) -> u64 {
        self.hazard_labels_total.with_label_values(&[label.as_str()]).get()
    }

    /// Prometheus tekstformat.
    pub fn gather_text(&self) -> String {
        let mut buf = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buf) {
            log::warn!("metrics encode failed: {e}");
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

static GLOBAL: Lazy<Option<Metrics>> = Lazy::new(|| match Metrics::new() {
    Ok(m) => Some(m),
    Err(e) => {
        log::warn!("metrics disabled, registration failed: {e}");
        None
    }
});

/// Prosess-globale tellere (None hvis registreringen feilet).
pub fn global() -> Option<&'static Metrics> {
    (*GLOBAL).as_ref()
}

pub fn gather_text() -> String {
    global().map(Metrics::gather_text).unwrap_or_default()
}
