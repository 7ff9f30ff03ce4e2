//! Checkpoint naming inside the checkpoint directory.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Suffix appended to a model file to name its example history.
pub const EXAMPLES_SUFFIX: &str = ".examples";

/// A named oracle snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckpointId {
    /// Pre-training copy used for evaluation and rollback.
    Temp,
    /// Most recently accepted oracle.
    Best,
    /// Oracle accepted at the given iteration.
    Iteration(u32),
}

impl CheckpointId {
    /// File name inside the checkpoint directory.
    #[must_use]
    pub fn file_name(self) -> String {
        match self {
            CheckpointId::Temp => "temp.ckpt".to_string(),
            CheckpointId::Best => "best.ckpt".to_string(),
            CheckpointId::Iteration(n) => format!("checkpoint_{n}.ckpt"),
        }
    }
}

impl fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Maps checkpoint ids to paths under one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    /// Store rooted at `dir`. Nothing is created until `ensure_dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The checkpoint directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if it does not exist.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path of a model checkpoint.
    #[must_use]
    pub fn path(&self, id: CheckpointId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    /// Path of the history saved before training at `iteration`.
    ///
    /// Lives next to the checkpoint of the previous iteration, the model
    /// that produced it.
    #[must_use]
    pub fn history_path(&self, iteration: u32) -> PathBuf {
        examples_path(&self.path(CheckpointId::Iteration(iteration.saturating_sub(1))))
    }
}

/// `<model>.examples` for a model file path.
#[must_use]
pub fn examples_path(model: &Path) -> PathBuf {
    let mut name: OsString = model.as_os_str().to_owned();
    name.push(EXAMPLES_SUFFIX);
    PathBuf::from(name)
}
