//! Experiment databases: one JSON record per line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use czm_analytical::Record;
use rayon::prelude::*;

use crate::error::Result;

/// File name of the database inside a job directory.
pub const DATABASE_FILE: &str = "Database.json";

/// Copy every key of `source` into `target`, replacing existing values.
pub fn merge(target: &mut Record, source: Record) {
    for (key, value) in source {
        target.insert(key, value);
    }
}

/// Parse a JSON-lines file; blank lines are skipped.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    let mut records: Vec<Record> = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str::<Record>(&line)?);
    }
    Ok(records)
}

/// The first record of a JSON-lines file, `None` if the file holds none.
pub fn read_first_record(path: impl AsRef<Path>) -> Result<Option<Record>> {
    Ok(read_records(path)?.into_iter().next())
}

/// Replace the file's contents with `records`, one per line.
pub fn write_records(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut bytes = Vec::new();
    for record in records {
        serde_json::to_writer(&mut bytes, record)?;
        bytes.push(b'\n');
    }
    fs::write(path, bytes)?;
    Ok(())
}

pub fn append_record(path: impl AsRef<Path>, record: &Record) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut line = serde_json::to_vec(record)?;
    line.push(b'\n');
    file.write_all(&line)?;
    Ok(())
}

/// The `Database.json` of one job directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentDatabase {
    path: PathBuf,
}

impl ExperimentDatabase {
    pub fn new(job_dir: impl AsRef<Path>) -> Self {
        Self {
            path: job_dir.as_ref().join(DATABASE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Vec<Record>> {
        read_records(&self.path)
    }

    pub fn write(&self, records: &[Record]) -> Result<()> {
        write_records(&self.path, records)
    }

    pub fn append(&self, record: &Record) -> Result<()> {
        append_record(&self.path, record)
    }

    /// Run `analysis` on every record and merge its output into the record.
    ///
    /// Records are analysed in parallel and written back in their original
    /// order. The file is only rewritten if every analysis succeeds.
    pub fn run_analysis<F>(&self, analysis: F) -> Result<Vec<Record>>
    where
        F: Fn(&Record) -> Result<Record> + Sync,
    {
        let records = self.read()?;
        log::info!(
            "analysing {} records of {}",
            records.len(),
            self.path.display()
        );

        let records = records
            .into_par_iter()
            .map(|mut record| {
                let output = analysis(&record)?;
                merge(&mut record, output);
                Ok(record)
            })
            .collect::<Result<Vec<_>>>()?;

        self.write(&records)?;
        Ok(records)
    }
}
