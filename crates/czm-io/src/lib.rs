//! File-based data around cohesive-zone fracture tests.
//!
//! This crate provides:
//! - **Transcript extraction**: converged increment windows and keyword
//!   blocks of numbers from solver message files ([`transcript`])
//! - **History-output tables**: effective reaction force and displacement
//!   from exported CSV tables ([`history`])
//! - **Experiment databases** in JSON-lines form, with parallel analysis of
//!   every record ([`database`])
//! - **Design-of-experiments sweeps** over `point_NN` directories ([`sweep`])

pub mod database;
pub mod error;
pub mod history;
pub mod sweep;
pub mod transcript;

pub use database::{
    DATABASE_FILE, ExperimentDatabase, append_record, merge, read_first_record, read_records,
    write_records,
};
pub use error::{IoError, Result};
pub use history::{HistoryColumn, HistoryOutput, LoadDisplacement};
pub use sweep::{DesignOfExperiments, run_post_processing};
pub use transcript::{
    ConvergenceRecord, DataBlock, Increment, Scan, find_converged_increments, increments,
};
