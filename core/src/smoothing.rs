/// Bakovervendt glidende snitt over `window` rader (raden selv + window-1 før).
/// Raden får `None` når vinduet ikke er fullt eller inneholder en udefinert verdi.
/// Lengden på ut-serien er alltid lik inn-serien.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if window == 0 {
        return out;
    }

    for i in (window - 1)..n {
        let win = &values[i + 1 - window..=i];
        let mut sum = 0.0;
        let mut complete = true;
        for v in win {
            match v {
                Some(x) => sum += x,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            out[i] = Some(sum / window as f64);
        }
    }

    out
}
