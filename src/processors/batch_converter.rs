use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

use crate::error::{FieldToolsError, Result};
use crate::models::{ConversionRecord, Dms};
use crate::readers::{CoordinateLine, CoordinateReader};
use crate::utils::progress::ProgressReporter;

/// Converts many coordinate strings to decimal degrees in parallel.
pub struct BatchConverter {
    max_workers: usize,
    strict: bool,
}

impl BatchConverter {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            strict: false,
        }
    }

    /// Fail on the first bad line instead of recording the error.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn convert_file(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<ConversionRecord>> {
        let lines = CoordinateReader::new().read_lines(path)?;
        info!(path = %path.display(), lines = lines.len(), "converting coordinates");
        self.convert_lines(&lines, progress)
    }

    /// Results come back in input order whatever order the workers finish in.
    pub fn convert_lines(
        &self,
        lines: &[CoordinateLine],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<ConversionRecord>> {
        let processed = AtomicUsize::new(0);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| FieldToolsError::Config(e.to_string()))?;

        let results: Vec<_> = pool.install(|| {
            lines
                .par_iter()
                .map(|line| {
                    let result = Dms::parse(&line.text);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    (line, result)
                })
                .collect()
        });

        let mut records = Vec::with_capacity(results.len());
        for (line, result) in results {
            if let Err(ref e) = result {
                if self.strict {
                    return Err(e.clone().into());
                }
                warn!(line = line.line, input = %line.text, error = %e, "skipping coordinate");
            }
            records.push(ConversionRecord::from_result(line.line, &line.text, &result));
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!("Converted {} coordinates", records.len()));
        }

        Ok(records)
    }
}

impl Default for BatchConverter {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
