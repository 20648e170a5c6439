//! Structured series from solver message transcripts.
//!
//! A transcript is scanned line by line; line numbers are zero-based
//! throughout. [`find_converged_increments`] splits it into the windows of
//! converged increments, an [`Increment`] locates keyword blocks inside one
//! window and a [`DataBlock`] reads and reshapes the numbers of one block.

mod block;
mod convergence;
mod increment;

pub use block::{DataBlock, Scan};
pub use convergence::{
    CONVERGED, ConvergenceRecord, UNCONVERGED, find_converged_increments, increments,
};
pub use increment::Increment;
