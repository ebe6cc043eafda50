//! Run record storage

mod storage;

pub use storage::{EnvironmentInfo, ResultStore, RunSettings, StoredRun};
