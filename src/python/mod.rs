//! Python bindings for othello-zero.
//!
//! Lets a PyTorch (or any Python) model act as the oracle while search,
//! self-play and gating run in Rust.
//!
//! # Quick Start
//!
//! ```python
//! import othello_zero as oz
//!
//! config = oz.CoachConfig(board_size=6, num_iterations=10)
//! reports = oz.learn(MyNet(6), MyNet(6), config)
//! for r in reports:
//!     print(r)
//! ```

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::Error;

mod py_coach;
mod py_config;
mod py_oracle;

pub use py_coach::*;
pub use py_config::*;
pub use py_oracle::*;

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(_) | Error::ResumeAborted(_) => PyIOError::new_err(err.to_string()),
            Error::InvalidConfig(_) | Error::ConfigParse(_) => {
                PyValueError::new_err(err.to_string())
            }
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// othello-zero: self-play training core with Python oracles.
#[pymodule]
fn othello_zero(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyOracle>()?;
    m.add_class::<PyCoachConfig>()?;
    m.add_class::<PyIterationReport>()?;
    m.add_function(wrap_pyfunction!(learn, m)?)?;
    Ok(())
}
