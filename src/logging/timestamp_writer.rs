//! A log file that changes name as time passes.
//!
//! Rather than numbering rotated files, the current time, floored to the
//! configured period, is stamped into the file name:
//!
//! ```text
//! logs/app.log  --(period = day)-->  logs/app 2024-03-09.log
//! ```
//!
//! The writer plugs into `tracing_subscriber` as a [`MakeWriter`]. Each event
//! checks the name for "now" and switches files when it has changed.

use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

use crate::logging::Period;

/// Which clock file name stamps are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    #[default]
    Local,
    Utc,
}

impl Clock {
    fn format(&self, timestamp: i64, format: &str) -> String {
        let utc = DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_default();
        match self {
            Clock::Local => utc.with_timezone(&Local).format(format).to_string(),
            Clock::Utc => utc.format(format).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Append,
    Truncate,
}

#[derive(Debug, Default)]
struct OpenFile {
    path: Option<PathBuf>,
    file: Option<File>,
}

impl OpenFile {
    fn ensure(&mut self, path: &Path, mode: WriteMode) -> io::Result<&mut File> {
        if self.path.as_deref() != Some(path) || self.file.is_none() {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    fs::create_dir_all(dir)?;
                }
            }
            let file = match mode {
                WriteMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
                WriteMode::Truncate => File::create(path)?,
            };
            self.path = Some(path.to_path_buf());
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file is not open"))
    }
}

pub struct TimestampFileWriter {
    base_path: PathBuf,
    period: Option<Period>,
    clock: Clock,
    mode: WriteMode,
    state: Mutex<OpenFile>,
}

impl TimestampFileWriter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            period: Some(Period::Day),
            clock: Clock::Local,
            mode: WriteMode::Append,
            state: Mutex::new(OpenFile::default()),
        }
    }

    /// `None` writes straight to the base path.
    pub fn with_period(mut self, period: Option<Period>) -> Self {
        self.period = period;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn period(&self) -> Option<Period> {
        self.period
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File name for unix time `timestamp`.
    pub fn filename_for(&self, timestamp: i64) -> PathBuf {
        let period = match self.period {
            Some(period) => period,
            None => return self.base_path.clone(),
        };

        let floored = match period.seconds() {
            Some(secs) if secs > 0 => {
                let secs = secs as i64;
                timestamp - timestamp.rem_euclid(secs)
            }
            _ => timestamp,
        };

        let stamp = self.clock.format(floored, &period.date_format());
        if stamp.is_empty() {
            return self.base_path.clone();
        }

        let stem = self
            .base_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match self.base_path.extension() {
            Some(ext) => format!("{} {}.{}", stem, stamp, ext.to_string_lossy()),
            None => format!("{} {}", stem, stamp),
        };
        self.base_path.with_file_name(name)
    }

    pub fn current_filename(&self) -> PathBuf {
        self.filename_for(Utc::now().timestamp())
    }

    /// Path of the file currently open, if any.
    pub fn open_path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    /// Close the open file. The next write reopens it.
    pub fn close(&self) {
        let mut state = self.lock();
        state.file = None;
        state.path = None;
    }

    fn lock(&self) -> MutexGuard<'_, OpenFile> {
        // a panic while holding the lock leaves nothing inconsistent
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Handle for one event, holding the lock so its lines stay together.
pub struct TimestampFileHandle<'a> {
    path: PathBuf,
    mode: WriteMode,
    state: MutexGuard<'a, OpenFile>,
}

impl Write for TimestampFileHandle<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.ensure(&self.path, self.mode)?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.state.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for TimestampFileWriter {
    type Writer = TimestampFileHandle<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        TimestampFileHandle {
            path: self.current_filename(),
            mode: self.mode,
            state: self.lock(),
        }
    }
}
