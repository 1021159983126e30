use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::ConversionRecord;

pub struct CsvWriter {
    delimiter: u8,
    include_failures: bool,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            include_failures: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Leave lines that failed to convert out of the output.
    pub fn with_failures(mut self, include_failures: bool) -> Self {
        self.include_failures = include_failures;
        self
    }

    /// Write conversion records to a CSV file, creating parent directories.
    pub fn write_records(&self, records: &[ConversionRecord], path: &Path) -> Result<usize> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        self.write_to(records, file)
    }

    /// Returns the number of rows written, header excluded.
    pub fn write_to<W: Write>(&self, records: &[ConversionRecord], writer: W) -> Result<usize> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        let mut written = 0;
        for record in records
            .iter()
            .filter(|r| self.include_failures || r.is_ok())
        {
            csv_writer.serialize(record)?;
            written += 1;
        }
        csv_writer.flush()?;
        Ok(written)
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dms;
    use tempfile::TempDir;

    fn records() -> Vec<ConversionRecord> {
        ["10 30 00 W", "junk"]
            .iter()
            .enumerate()
            .map(|(i, s)| ConversionRecord::from_result(i + 1, s, &Dms::parse(s)))
            .collect()
    }

    #[test]
    fn test_write_to_buffer() -> Result<()> {
        let mut buffer = Vec::new();
        let written = CsvWriter::new().write_to(&records(), &mut buffer)?;
        assert_eq!(written, 2);

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("line,input,decimal,degrees,minutes,seconds,error")
        );
        assert_eq!(lines.next(), Some("1,10 30 00 W,-10.5,-10,-30,0.0,"));
        assert!(lines.next().unwrap().starts_with("2,junk,,,,,"));
        Ok(())
    }

    #[test]
    fn test_write_records_skips_failures() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out").join("coords.tsv");

        let written = CsvWriter::new()
            .with_delimiter(b'\t')
            .with_failures(false)
            .write_records(&records(), &path)?;
        assert_eq!(written, 1);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(&path)?;
        let back: Vec<ConversionRecord> = reader.deserialize().collect::<csv::Result<_>>()?;
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].decimal, Some(-10.5));
        assert_eq!(back[0].error, None);
        Ok(())
    }
}
