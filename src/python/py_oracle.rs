//! Python model adapter.

use numpy::{PyArray1, PyArrayMethods};
use pyo3::prelude::*;

use crate::error::{Error, Result};
use crate::games::othello::Board;
use crate::nn::{Oracle, Prediction};
use crate::training::TrainingExample;

fn oracle_err(err: PyErr) -> Error {
    Error::Oracle(err.to_string())
}

/// Wraps a Python model object as an `Oracle` over Othello boards.
///
/// The model must provide:
/// - `predict(board: ndarray[n, n]) -> (list[float], float)`
/// - `train(examples: list[(ndarray[n, n], list[float], float)])`
/// - `save_checkpoint(path: str)` and `load_checkpoint(path: str)`
///
/// Every call into the model holds the GIL for its duration.
#[pyclass(name = "Oracle")]
pub struct PyOracle {
    model: PyObject,
    board_size: usize,
}

#[pymethods]
impl PyOracle {
    #[new]
    fn py_new(model: PyObject, board_size: usize) -> Self {
        Self::new(model, board_size)
    }

    #[getter]
    fn board_size(&self) -> usize {
        self.board_size
    }

    #[getter]
    fn action_size(&self) -> usize {
        self.board_size * self.board_size + 1
    }

    fn __repr__(&self) -> String {
        format!("Oracle(board_size={})", self.board_size)
    }
}

impl PyOracle {
    /// Wrap `model` for boards of side `board_size`.
    pub fn new(model: PyObject, board_size: usize) -> Self {
        Self { model, board_size }
    }

    fn board_array<'py>(&self, py: Python<'py>, board: &Board) -> PyResult<Bound<'py, PyAny>> {
        let cells: Vec<f32> = board.cells().iter().map(|&c| f32::from(c)).collect();
        let n = self.board_size;
        let array = PyArray1::from_vec_bound(py, cells).reshape([n, n])?;
        Ok(array.into_any())
    }
}

impl Oracle<Board> for PyOracle {
    fn predict(&self, state: &Board) -> Result<Prediction> {
        Python::with_gil(|py| {
            let board = self.board_array(py, state).map_err(oracle_err)?;
            let (priors, value): (Vec<f32>, f32) = self
                .model
                .call_method1(py, "predict", (board,))
                .and_then(|out| out.extract(py))
                .map_err(oracle_err)?;
            Ok(Prediction::new(priors, value))
        })
    }

    fn train(&mut self, examples: &[TrainingExample<Board>]) -> Result<()> {
        Python::with_gil(|py| {
            let batch = examples
                .iter()
                .map(|e| Ok((self.board_array(py, &e.state)?, e.policy.clone(), e.value)))
                .collect::<PyResult<Vec<_>>>()
                .map_err(oracle_err)?;
            self.model
                .call_method1(py, "train", (batch,))
                .map_err(oracle_err)?;
            Ok(())
        })
    }

    fn save_snapshot(&self, path: &std::path::Path) -> Result<()> {
        let path = path.to_string_lossy().into_owned();
        Python::with_gil(|py| {
            self.model
                .call_method1(py, "save_checkpoint", (path,))
                .map_err(oracle_err)?;
            Ok(())
        })
    }

    fn load_snapshot(&mut self, path: &std::path::Path) -> Result<()> {
        let path = path.to_string_lossy().into_owned();
        Python::with_gil(|py| {
            self.model
                .call_method1(py, "load_checkpoint", (path,))
                .map_err(oracle_err)?;
            Ok(())
        })
    }
}
