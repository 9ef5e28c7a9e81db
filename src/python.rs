//! Python bindings via PyO3.

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::adapter::Adapter;
use crate::allocate::allocate;
use crate::config::AdapterConfig;
use crate::editops::{apply_ops_str, editops_str};
use crate::error::AdaptError;
use crate::phonetic::{distance_matrix, segments, string_distance_with2ops};
use crate::types::{CostWeights, Outcome};

fn to_py_err(err: AdaptError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn weights(w_del: u32, w_ins: u32) -> PyResult<CostWeights> {
    CostWeights::new(w_del, w_ins).map_err(to_py_err)
}

// ============================================================================
// EDIT DISTANCE FUNCTIONS
// ============================================================================

#[pyfunction]
#[pyo3(signature = (source, target, howmany_paths=1, w_del=100, w_ins=49))]
fn py_editops(
    source: &str,
    target: &str,
    howmany_paths: usize,
    w_del: u32,
    w_ins: u32,
) -> PyResult<Vec<Vec<String>>> {
    let result = editops_str(source, target, howmany_paths, weights(w_del, w_ins)?);
    Ok(result
        .into_iter()
        .map(|ops| ops.iter().map(ToString::to_string).collect())
        .collect())
}

#[pyfunction]
fn py_apply_edit(source: &str, ops: Vec<String>) -> PyResult<String> {
    apply_ops_str(source, &ops).map_err(to_py_err)
}

#[pyfunction]
fn py_distance_matrix(source: &str, target: &str) -> PyResult<Vec<Vec<u32>>> {
    let matrix = distance_matrix(&segments(source), &segments(target));
    Ok(matrix.outer_iter().map(|row| row.to_vec()).collect())
}

#[pyfunction]
#[pyo3(signature = (source, target, w_del=100, w_ins=49))]
fn py_edit_distance_with2ops(source: &str, target: &str, w_del: u32, w_ins: u32) -> PyResult<u64> {
    Ok(string_distance_with2ops(source, target, weights(w_del, w_ins)?))
}

// ============================================================================
// CANDIDATE FUNCTIONS
// ============================================================================

#[pyfunction]
fn py_get_howmany(
    step: usize,
    ceiling_y: usize,
    ceiling_z: usize,
) -> PyResult<(usize, usize, usize)> {
    Ok(allocate(step, ceiling_y, ceiling_z).as_tuple())
}

/// Returns the candidate list, or an empty list with the undocumented symbol.
#[pyfunction]
#[pyo3(signature = (
    config_json, correspondences, frequencies, inventory, tokens, profile, howmany
))]
fn py_adapt(
    config_json: &str,
    correspondences: HashMap<String, Vec<String>>,
    frequencies: HashMap<String, f64>,
    inventory: Option<Vec<String>>,
    tokens: Vec<String>,
    profile: &str,
    howmany: usize,
) -> PyResult<(Vec<String>, Option<String>)> {
    let config = AdapterConfig::from_json_str(config_json).map_err(to_py_err)?;
    let adapter = Adapter::new(
        config,
        correspondences.into_iter().collect(),
        frequencies.into_iter().collect(),
        inventory,
    )
    .map_err(to_py_err)?;

    Ok(match adapter.adapt(&tokens, profile, howmany).map_err(to_py_err)? {
        Outcome::Candidates(words) => (words, None),
        Outcome::Undocumented(symbol) => (Vec::new(), Some(symbol)),
        Outcome::NoCandidates => (Vec::new(), None),
    })
}

// ============================================================================
// MODULE DEFINITION
// ============================================================================

#[pymodule]
fn langviz_adapt(_py: Python, m: &PyModule) -> PyResult<()> {
    // Edit distance functions
    m.add_function(wrap_pyfunction!(py_editops, m)?)?;
    m.add_function(wrap_pyfunction!(py_apply_edit, m)?)?;
    m.add_function(wrap_pyfunction!(py_distance_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(py_edit_distance_with2ops, m)?)?;

    // Candidate functions
    m.add_function(wrap_pyfunction!(py_get_howmany, m)?)?;
    m.add_function(wrap_pyfunction!(py_adapt, m)?)?;

    Ok(())
}
