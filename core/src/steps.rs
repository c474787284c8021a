use crate::config::check_min_step_dist;
use crate::error::{HazardError, Result};
use crate::geo::{haversine_m, step_bearing_deg, turn_deg};
use crate::types::{StepRecord, TrackPoint, FEET_PER_METER};

/// Hvilken nøkkel sporet ble sortert på.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKey {
    Timestamp,
    SequenceIndex,
    InputOrder,
}

/// Stabil sortering: tid hvis minst ett punkt har tid, ellers sequence_index,
/// ellers inn-rekkefølgen. Punkter uten nøkkel havner sist; like nøkler
/// beholder innbyrdes rekkefølge.
pub fn sort_points(points: &[TrackPoint]) -> (Vec<TrackPoint>, OrderKey) {
    let mut sorted = points.to_vec();

    let key = if points.iter().any(|p| p.timestamp.is_some()) {
        sorted.sort_by_key(|p| (p.timestamp.is_none(), p.timestamp));
        OrderKey::Timestamp
    } else if points.iter().any(|p| p.sequence_index.is_some()) {
        sorted.sort_by_key(|p| (p.sequence_index.is_none(), p.sequence_index));
        OrderKey::SequenceIndex
    } else {
        OrderKey::InputOrder
    };

    (sorted, key)
}

/// lat/lon må være endelige tall.
pub fn validate_points(points: &[TrackPoint]) -> Result<()> {
    for (i, p) in points.iter().enumerate() {
        if !p.lat.is_finite() {
            return Err(HazardError::input_shape(format!("[{i}].lat"), format!("non-finite latitude {}", p.lat)));
        }
        if !p.lon.is_finite() {
            return Err(HazardError::input_shape(format!("[{i}].lon"), format!("non-finite longitude {}", p.lon)));
        }
    }
    Ok(())
}

fn zero_step(point: &TrackPoint) -> StepRecord {
    StepRecord {
        point: point.clone(),
        elevation_f: point.elevation_f(),
        distance_m: 0.0,
        distance_f: 0.0,
        bearing_deg: None,
        turn_deg: None,
        elevation_delta_m: Some(0.0),
        elevation_delta_f: Some(0.0),
        grade: None,
    }
}

#[inline]
fn diff(prev: Option<f64>, cur: Option<f64>) -> Option<f64> {
    match (prev, cur) {
        (Some(a), Some(b)) => Some(b - a),
        _ => None,
    }
}

/// Steg-metrikker for et spor: én rad per punkt, rad 0 er nullsteget.
///
/// 1) sorter  2) avstand/kurs per par  3) sving mot forrige kurs
/// 4) høydeendring  5) stigning der steget er langt nok.
pub fn compute_step_metrics(points: &[TrackPoint], min_step_dist_m: f64) -> Result<Vec<StepRecord>> {
    check_min_step_dist(min_step_dist_m)?;
    validate_points(points)?;

    let (mut sorted, key) = sort_points(points);
    // ikke-endelig høyde bæres som manglende
    for p in sorted.iter_mut() {
        p.elevation_m = p.elevation();
    }
    log::debug!("step metrics: {} points ordered by {:?}", sorted.len(), key);

    let Some(first) = sorted.first() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(sorted.len());
    out.push(zero_step(first));

    for w in sorted.windows(2) {
        let (a, b) = (&w[0], &w[1]);

        let distance_m = haversine_m(a.lat, a.lon, b.lat, b.lon);
        let bearing = step_bearing_deg(a.lat, a.lon, b.lat, b.lon);

        // sving krever gyldig kurs på både forrige og dette steget
        let prev_bearing = out.last().and_then(|s: &StepRecord| s.bearing_deg);
        let turn = match (prev_bearing, bearing) {
            (Some(p), Some(c)) => Some(turn_deg(p, c)),
            _ => None,
        };

        let elevation_delta_m = diff(a.elevation(), b.elevation());
        let elevation_delta_f = diff(a.elevation_f(), b.elevation_f());

        // for korte steg (GPS-støy i ro) gir ingen stigning – ikke 0
        let grade = match elevation_delta_m {
            Some(dh) if distance_m > 0.0 && distance_m >= min_step_dist_m => Some(dh / distance_m),
            _ => None,
        };

        out.push(StepRecord {
            point: b.clone(),
            elevation_f: b.elevation_f(),
            distance_m,
            distance_f: distance_m * FEET_PER_METER,
            bearing_deg: bearing,
            turn_deg: turn,
            elevation_delta_m,
            elevation_delta_f,
            grade,
        });
    }

    Ok(out)
}
