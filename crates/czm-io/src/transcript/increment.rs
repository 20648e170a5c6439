//! Blocks belonging to one load increment of a transcript.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::block::DataBlock;
use crate::error::{IoError, Result};

/// The window `start..stop` (exclusive both ends) of a transcript and the
/// numeric blocks found inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Increment {
    pub path: PathBuf,
    pub start: usize,
    pub stop: usize,
    /// Step fraction reached by this increment, when known.
    pub step_time: Option<f64>,
    /// Blocks in the order they were located.
    pub blocks: Vec<DataBlock>,
    /// Resolved blocks grouped by keyword. Groups follow the order in which
    /// their keyword was first located; each group is in transcript order.
    pub data: Vec<(String, Vec<DataBlock>)>,
}

impl Increment {
    pub fn new(path: impl Into<PathBuf>, start: usize, stop: usize) -> Self {
        Self {
            path: path.into(),
            start,
            stop,
            step_time: None,
            blocks: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Register a block for every line inside the window whose text has `key`
    /// at character offset 1 (the column after the fixed-width margin).
    ///
    /// Each block spans `length` lines from the matching one. Returns the
    /// number of blocks added; repeated calls accumulate.
    pub fn find_line_numbers(
        &mut self,
        key: &str,
        length: usize,
        shape: (usize, usize),
    ) -> Result<usize> {
        let file = File::open(&self.path)?;
        self.locate(BufReader::new(file), key, length, shape)
    }

    pub(crate) fn locate<R: BufRead>(
        &mut self,
        reader: R,
        key: &str,
        length: usize,
        shape: (usize, usize),
    ) -> Result<usize> {
        if length == 0 {
            return Err(IoError::EmptyBlock {
                keyword: key.to_string(),
            });
        }

        let before = self.blocks.len();
        for (i, line) in reader.lines().enumerate() {
            if i >= self.stop {
                break;
            }
            let line = line?;
            if i > self.start && line.find(key) == Some(1) {
                self.blocks.push(DataBlock::new(key, i, i + length - 1, shape));
            }
        }
        Ok(self.blocks.len() - before)
    }

    /// Resolve and reshape every block; blocks cut off by the end of the
    /// transcript stay unresolved.
    pub fn find_data(&mut self) -> Result<()> {
        self.resolve(false)
    }

    /// Like [`find_data`](Self::find_data), but a truncated block is an error.
    pub fn find_data_strict(&mut self) -> Result<()> {
        self.resolve(true)
    }

    fn resolve(&mut self, strict: bool) -> Result<()> {
        let raw = fs::read_to_string(&self.path)?;
        for block in &mut self.blocks {
            block.resolve(raw.as_bytes(), strict)?;
            block.reshape()?;
        }

        self.data.clear();
        for block in &self.blocks {
            match self.data.iter_mut().find(|(keyword, _)| *keyword == block.keyword) {
                Some((_, group)) => group.push(block.clone()),
                None => self.data.push((block.keyword.clone(), vec![block.clone()])),
            }
        }
        Ok(())
    }

    /// Blocks of one keyword, in transcript order.
    pub fn entries(&self, keyword: &str) -> &[DataBlock] {
        self.data
            .iter()
            .find(|(key, _)| key == keyword)
            .map(|(_, group)| group.as_slice())
            .unwrap_or(&[])
    }

    /// Keywords of the resolved groups, in discovery order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.iter().map(|(keyword, _)| keyword.as_str())
    }

    pub fn file_name(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "\
 INCREMENT 1
 RF 1 2
 3 4
 XRF 9 9
 U 0.5
 RF 5 6
 7 8
 END
";

    #[test]
    fn keys_must_sit_after_a_one_character_margin() {
        let mut increment = Increment::new("unused", 0, 7);
        let found = increment
            .locate(TRANSCRIPT.as_bytes(), "RF", 2, (2, 2))
            .expect("readable");
        assert_eq!(found, 2);
        assert_eq!(increment.blocks[0].start, 1);
        assert_eq!(increment.blocks[0].stop, 2);
        assert_eq!(increment.blocks[1].start, 5);
    }

    #[test]
    fn window_bounds_are_exclusive() {
        let mut increment = Increment::new("unused", 1, 5);
        let found = increment
            .locate(TRANSCRIPT.as_bytes(), "RF", 2, (2, 2))
            .expect("readable");
        assert_eq!(found, 0);
        let found = increment
            .locate(TRANSCRIPT.as_bytes(), "U", 1, (1, 1))
            .expect("readable");
        assert_eq!(found, 1);
    }

    #[test]
    fn groups_keep_discovery_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("Job.msg");
        std::fs::write(&path, TRANSCRIPT).expect("write transcript");

        let mut increment = Increment::new(&path, 0, 7);
        increment.find_line_numbers("U", 1, (1, 1)).expect("readable");
        increment.find_line_numbers("RF", 2, (2, 2)).expect("readable");
        increment.find_data_strict().expect("complete blocks");

        assert_eq!(increment.keywords().collect::<Vec<_>>(), vec!["U", "RF"]);
        assert_eq!(increment.entries("U")[0].values, Some(vec![0.5]));
        let forces = increment.entries("RF");
        assert_eq!(forces.len(), 2);
        assert_eq!(forces[0].start, 1);
        assert_eq!(forces[1].start, 5);
        assert!(increment.entries("S").is_empty());
    }

    #[test]
    fn zero_length_blocks_are_rejected() {
        let mut increment = Increment::new("unused", 0, 7);
        let err = increment
            .locate(TRANSCRIPT.as_bytes(), "RF", 0, (2, 2))
            .expect_err("empty block");
        assert!(matches!(err, IoError::EmptyBlock { .. }));
    }
}
