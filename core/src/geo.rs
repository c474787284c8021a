// core/src/geo.rs
pub const EARTH_RADIUS_M: f64 = 6_371_000.0; // jordradius (m)

// --- RoundTo trait (brukt av terskel-sammenligningene i hazard.rs) ---
/// Avrunding til `dp` desimaler med "round half to even" på den skalerte
/// verdien, slik at -0.045 → -0.04 og 18.5 → 18.
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round_ties_even(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round_ties_even() / factor
    }
}

/// Storsirkelavstand (haversine) i meter.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dphi = phi2 - phi1;
    let dlambda = (lon2 - lon1).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // h kan krype over 1.0 ved antipoder pga. avrunding
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Startkurs på kula, normalisert til [0, 360).
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dlambda = (lon2 - lon1).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Kurs for et steg. Eksakt 0° regnes som udefinert (degenererte par,
/// f.eks. identiske koordinater, gir ellers falske "rett nord"-topper).
pub fn step_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Option<f64> {
    if lat1 == lat2 && lon1 == lon2 {
        return None;
    }
    let b = initial_bearing_deg(lat1, lon1, lat2, lon2);
    if b == 0.0 { None } else { Some(b) }
}

/// Minste vinkel mellom to kurser, [0, 180]. 359° → 1° gir 2°.
pub fn turn_deg(prev_bearing: f64, bearing: f64) -> f64 {
    ((bearing - prev_bearing + 180.0).rem_euclid(360.0) - 180.0).abs()
}
