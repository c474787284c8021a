//! Steg-metrikker og faremerker (nedoverbakke + sving) for GPS-spor.
//!
//! Flyt: `TrackPoint`-er → [`steps::compute_step_metrics`] →
//! [`hazard::detect_hazards`]. [`analyze_steps`] gjør begge.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod geo;
pub mod hazard;
pub mod metrics;
pub mod smoothing;
pub mod steps;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use analyzer::{analyze_steps, analyze_steps_json, hazard_counts_json, summarize, HazardSummary};
pub use config::{AnalysisConfig, HazardThresholds};
pub use error::{HazardError, Result};
pub use hazard::detect_hazards;
pub use steps::compute_step_metrics;
pub use types::{ClassifiedStep, HazardLabel, StepRecord, TrackPoint};
