//! Design-of-experiments sweeps over point directories.
//!
//! A design is read from JSON such as
//!
//! ```json
//! {
//!     "nPoints": [0, 2],
//!     "Fixed": {"Length": 120.0, "Width": 25.0},
//!     "Crack": [[40.0], [50.0], [60.0]],
//!     "JobID": [["Job_A"], ["Job_B"], ["Job_C"]]
//! }
//! ```
//!
//! Every key besides `nPoints` and `Fixed` is a variable; point `i` takes the
//! first element of entry `i` of each variable list.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use czm_analytical::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::{ExperimentDatabase, merge, read_first_record, write_records};
use crate::error::{IoError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignOfExperiments {
    /// Indices of the points to run.
    #[serde(rename = "nPoints")]
    pub points: Vec<usize>,
    /// Values shared by every point.
    #[serde(rename = "Fixed", default)]
    pub fixed: Record,
    #[serde(flatten)]
    pub variables: BTreeMap<String, Vec<Value>>,
}

impl DesignOfExperiments {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Directory (and record file stem) of point `index`.
    pub fn point_name(index: usize) -> String {
        format!("point_{index:02}")
    }

    /// The fixed values overlaid with the variables of point `index`.
    pub fn point(&self, index: usize) -> Result<Record> {
        let mut record = self.fixed.clone();
        for (key, values) in &self.variables {
            let entry = values.get(index).ok_or_else(|| {
                IoError::Design(format!(
                    "variable `{key}` has {} entries, point {index} requested",
                    values.len()
                ))
            })?;
            let value = match entry {
                Value::Array(items) => items.first().cloned().ok_or_else(|| {
                    IoError::Design(format!("variable `{key}` entry {index} is empty"))
                })?,
                other => other.clone(),
            };
            record.insert(key.clone(), value);
        }
        Ok(record)
    }
}

/// Post-process every selected point of `design` below `root`.
///
/// For each point the record file `point_NN/point_NN.json` is created or
/// updated: values already stored there win over the design's, the output of
/// `post` (called with the point directory) wins over both. The final record
/// replaces the point file and is appended to `root/Database.json`.
pub fn run_post_processing<F>(
    root: impl AsRef<Path>,
    design: &DesignOfExperiments,
    mut post: F,
) -> Result<Vec<Record>>
where
    F: FnMut(&Path, &Record) -> Result<Record>,
{
    let root = root.as_ref();
    fs::create_dir_all(root)?;
    let database = ExperimentDatabase::new(root);

    let mut records = Vec::with_capacity(design.points.len());
    for &index in &design.points {
        let name = DesignOfExperiments::point_name(index);
        let dir: PathBuf = root.join(&name);
        fs::create_dir_all(&dir)?;
        let file = dir.join(format!("{name}.json"));

        let mut record = design.point(index)?;
        if file.exists()
            && let Some(existing) = read_first_record(&file)?
        {
            merge(&mut record, existing);
        }

        let output = post(&dir, &record)?;
        merge(&mut record, output);

        write_records(&file, std::slice::from_ref(&record))?;
        database.append(&record)?;
        log::info!("{name}: post-processed");
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn design() -> DesignOfExperiments {
        serde_json::from_value(json!({
            "nPoints": [0, 2],
            "Fixed": {"Width": 25.0},
            "Crack": [[40.0], [50.0], [60.0]],
            "JobID": [["A"], ["B"], ["C"]]
        }))
        .expect("valid design")
    }

    #[test]
    fn variables_are_collected_from_remaining_keys() {
        let design = design();
        assert_eq!(design.points, vec![0, 2]);
        assert_eq!(design.variables.len(), 2);
        assert_eq!(design.fixed["Width"], json!(25.0));
    }

    #[test]
    fn point_takes_first_element_of_each_entry() {
        let point = design().point(2).expect("three entries");
        assert_eq!(point["Crack"], json!(60.0));
        assert_eq!(point["JobID"], json!("C"));
        assert_eq!(point["Width"], json!(25.0));
    }

    #[test]
    fn point_beyond_variable_list_is_an_error() {
        let err = design().point(3).expect_err("only three entries");
        assert!(matches!(err, IoError::Design(_)));
    }

    #[test]
    fn point_names_are_zero_padded() {
        assert_eq!(DesignOfExperiments::point_name(3), "point_03");
        assert_eq!(DesignOfExperiments::point_name(12), "point_12");
    }
}
