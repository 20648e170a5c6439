//! Converged increment windows of a solver message file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::increment::Increment;
use crate::error::{IoError, Result};

/// Printed at the end of an increment that failed to converge.
pub const UNCONVERGED: &str = "EQUILIBRIUM NOT ACHIEVED WITHIN TOLERANCE";
/// Printed at the end of a converged increment, followed by the step fraction.
pub const CONVERGED: &str = "FRACTION OF STEP COMPLETED";

/// Line windows of the converged increments of a transcript.
///
/// The three sequences are parallel: increment `k` reached step fraction
/// `time[k]` and spans lines `first_line[k]..last_line[k]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceRecord {
    pub time: Vec<f64>,
    pub first_line: Vec<usize>,
    pub last_line: Vec<usize>,
}

impl ConvergenceRecord {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut unconverged = Vec::new();
        let mut record = Self::default();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.contains(UNCONVERGED) {
                unconverged.push(i);
            }
            if line.contains(CONVERGED) {
                let token = line.split_whitespace().last().unwrap_or_default();
                let time = token.parse::<f64>().map_err(|_| IoError::Parse {
                    line: i,
                    token: token.to_string(),
                })?;
                record.time.push(time);
                record.last_line.push(i);
            }
        }

        let mut previous = 0;
        for &last in &record.last_line {
            let boundary = unconverged
                .iter()
                .copied()
                .filter(|&j| j < last)
                .max()
                .unwrap_or(0);
            let first = boundary.max(previous);
            record.first_line.push(first);
            previous = last;
        }

        log::debug!(
            "{} converged and {} unconverged increments",
            record.len(),
            unconverged.len()
        );
        Ok(record)
    }

    pub fn len(&self) -> usize {
        self.last_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_line.is_empty()
    }

    /// `(time, first_line, last_line)` per converged increment.
    pub fn iter(&self) -> impl Iterator<Item = (f64, usize, usize)> + '_ {
        self.time
            .iter()
            .zip(&self.first_line)
            .zip(&self.last_line)
            .map(|((&t, &first), &last)| (t, first, last))
    }
}

/// Scan the transcript at `path` for converged increments.
pub fn find_converged_increments(path: impl AsRef<Path>) -> Result<ConvergenceRecord> {
    let file = File::open(path)?;
    ConvergenceRecord::from_reader(BufReader::new(file))
}

/// One [`Increment`] per converged increment, scoped to its line window.
pub fn increments(path: impl AsRef<Path>) -> Result<Vec<Increment>> {
    let path = path.as_ref();
    let record = find_converged_increments(path)?;
    Ok(record
        .iter()
        .map(|(time, first, last)| {
            let mut increment = Increment::new(path, first, last);
            increment.step_time = Some(time);
            increment
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(sentinels: &[(usize, &str)], lines: usize) -> String {
        let mut text = String::new();
        for i in 0..lines {
            match sentinels.iter().find(|(at, _)| *at == i) {
                Some((_, line)) => text.push_str(line),
                None => text.push_str("      ITERATION SUMMARY"),
            }
            text.push('\n');
        }
        text
    }

    const FAILED: &str = "           FORCE     EQUILIBRIUM NOT ACHIEVED WITHIN TOLERANCE.";

    fn completed(fraction: &str) -> String {
        format!(
            "  TIME INCREMENT COMPLETED  {fraction}    ,  FRACTION OF STEP COMPLETED  {fraction}"
        )
    }

    #[test]
    fn windows_start_after_the_previous_increment() {
        let half = completed("0.500");
        let full = completed("1.000");
        let text = transcript(&[(10, FAILED), (25, half.as_str()), (40, full.as_str())], 45);

        let record = ConvergenceRecord::from_reader(text.as_bytes()).expect("readable");
        assert_eq!(record.time, vec![0.5, 1.0]);
        assert_eq!(record.first_line, vec![10, 25]);
        assert_eq!(record.last_line, vec![25, 40]);
    }

    #[test]
    fn failure_between_converged_increments_bounds_the_window() {
        let a = completed("0.250");
        let b = completed("0.750");
        let c = completed("1.000");
        let sentinels = [
            (5, a.as_str()),
            (8, FAILED),
            (12, FAILED),
            (20, b.as_str()),
            (30, c.as_str()),
        ];
        let text = transcript(&sentinels, 31);

        let record = ConvergenceRecord::from_reader(text.as_bytes()).expect("readable");
        assert_eq!(record.first_line, vec![0, 12, 20]);
        assert_eq!(record.last_line, vec![5, 20, 30]);
    }

    #[test]
    fn transcript_without_sentinels_is_empty() {
        let text = transcript(&[], 12);
        let record = ConvergenceRecord::from_reader(text.as_bytes()).expect("readable");
        assert!(record.is_empty());
        assert_eq!(record.iter().count(), 0);
    }

    #[test]
    fn malformed_fraction_is_an_error() {
        let text = "  FRACTION OF STEP COMPLETED  n/a\n";
        let err = ConvergenceRecord::from_reader(text.as_bytes()).expect_err("not a number");
        assert!(matches!(err, IoError::Parse { line: 0, .. }));
    }
}
