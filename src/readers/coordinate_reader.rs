use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// A coordinate string and the (1-based) line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateLine {
    pub line: usize,
    pub text: String,
}

/// Reads one coordinate per line, skipping blank lines and `#` comments.
pub struct CoordinateReader {
    comment_prefix: char,
}

impl CoordinateReader {
    pub fn new() -> Self {
        Self {
            comment_prefix: '#',
        }
    }

    pub fn with_comment_prefix(comment_prefix: char) -> Self {
        Self { comment_prefix }
    }

    pub fn read_lines(&self, path: &Path) -> Result<Vec<CoordinateLine>> {
        let file = File::open(path)?;
        self.read_from(BufReader::new(file))
    }

    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<Vec<CoordinateLine>> {
        let mut lines = Vec::new();
        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with(self.comment_prefix) {
                continue;
            }

            lines.push(CoordinateLine {
                line: index + 1,
                text: trimmed.to_string(),
            });
        }
        Ok(lines)
    }
}

impl Default for CoordinateReader {
    fn default() -> Self {
        Self::new()
    }
}
