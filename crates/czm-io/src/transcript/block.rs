//! Fixed-shape numeric blocks in a solver transcript.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use nalgebra::DMatrix;

use crate::error::{IoError, Result};

/// Outcome of scanning a transcript for one block.
#[derive(Debug, Clone, PartialEq)]
pub enum Scan {
    /// Every line up to the block's last line was read.
    Complete(Vec<f64>),
    /// The transcript ended after `lines` lines, before the block did.
    Truncated { lines: usize },
}

/// A keyword-labelled block of numbers spanning lines `start..=stop`.
///
/// Line numbers are zero-based. The first line carries the keyword (and
/// optionally `=`) ahead of its numbers; continuation lines hold numbers only.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBlock {
    pub keyword: String,
    pub start: usize,
    pub stop: usize,
    /// `(rows, cols)` of the matrix the values fill.
    pub shape: (usize, usize),
    /// Flat values in transcript order, once resolved.
    pub values: Option<Vec<f64>>,
    /// Values arranged as `shape`, once resolved.
    pub matrix: Option<DMatrix<f64>>,
}

impl DataBlock {
    pub fn new(
        keyword: impl Into<String>,
        start: usize,
        stop: usize,
        shape: (usize, usize),
    ) -> Self {
        Self {
            keyword: keyword.into(),
            start,
            stop,
            shape,
            values: None,
            matrix: None,
        }
    }

    /// Collect the block's numbers from `reader`.
    pub fn scan<R: BufRead>(&self, reader: R) -> Result<Scan> {
        let mut values = Vec::new();
        let mut lines = 0usize;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            lines = i + 1;
            if i < self.start {
                continue;
            }

            let tokens = line.split_whitespace();
            if i == self.start {
                let numbers = tokens.filter(|token| *token != self.keyword && *token != "=");
                push_numbers(&mut values, numbers, i)?;
            } else {
                push_numbers(&mut values, tokens, i)?;
            }

            if i >= self.stop {
                return Ok(Scan::Complete(values));
            }
        }

        Ok(Scan::Truncated { lines })
    }

    /// Resolve the block from the transcript at `path`.
    ///
    /// A transcript that ends early leaves the block unresolved without error.
    pub fn find_value(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let raw = fs::read_to_string(path)?;
        self.resolve(raw.as_bytes(), false)
    }

    /// Like [`find_value`](Self::find_value), but a truncated block is an error.
    pub fn find_value_strict(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let raw = fs::read_to_string(path)?;
        self.resolve(raw.as_bytes(), true)
    }

    pub(crate) fn resolve<R: BufRead>(&mut self, reader: R, strict: bool) -> Result<()> {
        match self.scan(reader)? {
            Scan::Complete(values) => {
                self.values = Some(values);
                Ok(())
            }
            Scan::Truncated { lines } if strict => Err(IoError::Truncated {
                keyword: self.keyword.clone(),
                start: self.start,
                stop: self.stop,
                lines,
            }),
            Scan::Truncated { lines } => {
                log::warn!(
                    "block `{}` (lines {}..={}) truncated: transcript has {lines} lines",
                    self.keyword,
                    self.start,
                    self.stop
                );
                self.values = None;
                Ok(())
            }
        }
    }

    /// Arrange the resolved values as a `rows × cols` matrix.
    ///
    /// The flat values fill `cols` rows of length `rows` which are then
    /// transposed, so consecutive values run down a column:
    ///
    /// ```text
    /// shape (2, 3), values 1 2 3 4 5 6  →  | 1 3 5 |
    ///                                      | 2 4 6 |
    /// ```
    ///
    /// Unresolved blocks are left without a matrix.
    pub fn reshape(&mut self) -> Result<()> {
        let Some(values) = &self.values else {
            self.matrix = None;
            return Ok(());
        };
        let (rows, cols) = self.shape;
        if values.len() != rows * cols {
            return Err(IoError::ShapeMismatch {
                keyword: self.keyword.clone(),
                start: self.start,
                rows,
                cols,
                found: values.len(),
            });
        }
        self.matrix = Some(DMatrix::from_column_slice(rows, cols, values));
        Ok(())
    }
}

fn push_numbers<'a>(
    values: &mut Vec<f64>,
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<()> {
    for token in tokens {
        let value = token.parse::<f64>().map_err(|_| IoError::Parse {
            line,
            token: token.to_string(),
        })?;
        values.push(value);
    }
    Ok(())
}
