//! Training loop bindings for Python.

use std::path::PathBuf;

use pyo3::prelude::*;

use crate::games::othello::OthelloGame;
use crate::training::{Coach, IterationReport};

use super::py_config::PyCoachConfig;
use super::py_oracle::PyOracle;

/// Python view of one iteration's outcome.
#[pyclass(name = "IterationReport", get_all)]
#[derive(Clone)]
pub struct PyIterationReport {
    pub iteration: u32,
    pub examples: usize,
    pub previous_wins: u32,
    pub new_wins: u32,
    pub draws: u32,
    pub accepted: bool,
}

impl From<IterationReport> for PyIterationReport {
    fn from(report: IterationReport) -> Self {
        Self {
            iteration: report.iteration,
            examples: report.examples,
            previous_wins: report.result.wins_a,
            new_wins: report.result.wins_b,
            draws: report.result.draws,
            accepted: report.accepted,
        }
    }
}

#[pymethods]
impl PyIterationReport {
    fn __repr__(&self) -> String {
        format!(
            "IterationReport(iteration={}, new/prev={}/{}, draws={}, accepted={})",
            self.iteration, self.new_wins, self.previous_wins, self.draws, self.accepted
        )
    }
}

/// Run the training loop on Othello with Python models.
///
/// `model` is trained; `previous` is a second instance of the same model
/// class used to hold the pre-training snapshot during evaluation. With
/// `resume`, the model (and its `.examples` history, if present) is loaded
/// first; `allow_missing_history` decides whether a missing history is
/// acceptable.
///
/// The GIL is released while the loop runs and reacquired for each model
/// call.
#[pyfunction]
#[pyo3(signature = (model, previous, config, resume = None, allow_missing_history = false))]
pub fn learn(
    py: Python<'_>,
    model: PyObject,
    previous: PyObject,
    config: PyCoachConfig,
    resume: Option<PathBuf>,
    allow_missing_history: bool,
) -> PyResult<Vec<PyIterationReport>> {
    let config = config.0;
    // `OthelloGame::new` panics on an invalid size.
    config.validate()?;
    let n = config.board_size;
    let game = OthelloGame::new(n);
    let mut coach = Coach::new(
        game,
        PyOracle::new(model, n),
        PyOracle::new(previous, n),
        config,
    )?;

    let reports = py.allow_threads(move || {
        if let Some(path) = resume {
            coach.resume(&path, |_| allow_missing_history)?;
        }
        coach.learn()
    })?;

    Ok(reports.into_iter().map(PyIterationReport::from).collect())
}
