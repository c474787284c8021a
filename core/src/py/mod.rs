use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::error::HazardError;

fn to_py_err(e: HazardError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// JSON-array med punkter (+ valgfri config-JSON) → JSON-array med merkede steg.
#[pyfunction]
#[pyo3(signature = (points_json, cfg_json = None))]
fn analyze_steps_json(points_json: &str, cfg_json: Option<&str>) -> PyResult<String> {
    crate::analyzer::analyze_steps_json(points_json, cfg_json).map_err(to_py_err)
}

/// Som over, men kun `{points, counts}`.
#[pyfunction]
#[pyo3(signature = (points_json, cfg_json = None))]
fn hazard_counts_json(points_json: &str, cfg_json: Option<&str>) -> PyResult<String> {
    crate::analyzer::hazard_counts_json(points_json, cfg_json).map_err(to_py_err)
}

#[pyfunction]
fn metrics_text() -> String {
    crate::metrics::gather_text()
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn trackhazard_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_steps_json, m)?)?;
    m.add_function(wrap_pyfunction!(hazard_counts_json, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}
