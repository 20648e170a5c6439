//! History-output tables exported from finite-element results.
//!
//! The table is comma separated. Three header rows label every column with
//! its node set, output variable and component; numeric rows follow:
//!
//! ```text
//! Node ASSEMBLY.2,Node ASSEMBLY.2,Node ASSEMBLY.2,Node ASSEMBLY.2
//! RF,RF,U,U
//! 1,2,1,2
//! 0.0,0.0,0.0,0.0
//! 0.3,0.4,0.0,2.0
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use czm_analytical::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IoError, Result};

pub const REACTION_FORCE: &str = "RF";
pub const DISPLACEMENT: &str = "U";

const HEADER_ROWS: usize = 3;

/// One component series of one output variable at one node set.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryColumn {
    pub node: String,
    pub output: String,
    pub component: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryOutput {
    pub columns: Vec<HistoryColumn>,
}

/// Effective reaction force and displacement of a specimen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDisplacement {
    #[serde(rename = "NodeSet")]
    pub node_set: Vec<String>,
    #[serde(rename = "Reaction Force")]
    pub reaction_force: Vec<f64>,
    #[serde(rename = "Displacement")]
    pub displacement: Vec<f64>,
}

impl From<LoadDisplacement> for Record {
    fn from(value: LoadDisplacement) -> Self {
        let mut record = Record::new();
        record.insert("NodeSet".to_string(), Value::from(value.node_set));
        record.insert(
            "Reaction Force".to_string(),
            Value::from(value.reaction_force),
        );
        record.insert("Displacement".to_string(), Value::from(value.displacement));
        record
    }
}

impl HistoryOutput {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut header: Vec<Vec<String>> = Vec::with_capacity(HEADER_ROWS);
        let mut columns: Vec<HistoryColumn> = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();

            if header.len() < HEADER_ROWS {
                if let Some(first) = header.first()
                    && first.len() != cells.len()
                {
                    return Err(IoError::History(format!(
                        "header row at line {i} has {} columns, expected {}",
                        cells.len(),
                        first.len()
                    )));
                }
                header.push(cells.iter().map(|cell| cell.to_string()).collect());
                if header.len() == HEADER_ROWS {
                    columns = (0..header[0].len())
                        .map(|c| HistoryColumn {
                            node: header[0][c].clone(),
                            output: header[1][c].clone(),
                            component: header[2][c].clone(),
                            values: Vec::new(),
                        })
                        .collect();
                }
                continue;
            }

            if cells.len() != columns.len() {
                return Err(IoError::History(format!(
                    "line {i} has {} values, expected {}",
                    cells.len(),
                    columns.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(&cells) {
                let value = cell.parse::<f64>().map_err(|_| IoError::Parse {
                    line: i,
                    token: cell.to_string(),
                })?;
                column.values.push(value);
            }
        }

        if header.len() < HEADER_ROWS {
            return Err(IoError::History(format!(
                "expected {HEADER_ROWS} header rows, found {}",
                header.len()
            )));
        }
        Ok(Self { columns })
    }

    /// Node-set labels in order of first appearance.
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = Vec::new();
        for column in &self.columns {
            if !nodes.contains(&column.node.as_str()) {
                nodes.push(&column.node);
            }
        }
        nodes
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |column| column.values.len())
    }

    /// Row-wise Euclidean norm over every component of `output` at `node`.
    ///
    /// `None` when the table has no such column.
    pub fn effective(&self, node: &str, output: &str) -> Option<Vec<f64>> {
        let components: Vec<&HistoryColumn> = self
            .columns
            .iter()
            .filter(|column| column.node == node && column.output == output)
            .collect();
        if components.is_empty() {
            return None;
        }

        let norms = (0..self.rows())
            .map(|row| {
                components
                    .iter()
                    .map(|column| column.values[row].powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect();
        Some(norms)
    }

    /// Reaction force over the full specimen `width` and the opening
    /// displacement, each taken at the first node set carrying it.
    ///
    /// Models are built with unit width, hence the scaling.
    pub fn load_displacement(&self, width: f64) -> Result<LoadDisplacement> {
        let nodes = self.nodes();
        let first_effective = |output: &str| {
            nodes
                .iter()
                .find_map(|node| self.effective(node, output))
                .ok_or_else(|| IoError::History(format!("no `{output}` columns")))
        };

        let reaction_force = first_effective(REACTION_FORCE)?
            .into_iter()
            .map(|force| force * width)
            .collect();
        let displacement = first_effective(DISPLACEMENT)?;

        Ok(LoadDisplacement {
            node_set: nodes.into_iter().map(str::to_string).collect(),
            reaction_force,
            displacement,
        })
    }
}
