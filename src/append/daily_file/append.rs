// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use jiff::civil::Date;

use crate::Error;
use crate::Layout;
use crate::Retention;
use crate::Trap;
use crate::append::Append;
use crate::append::daily_file::rolling;
use crate::append::daily_file::rolling::DailyFileWriter;
use crate::layout::TopicTextLayout;
use crate::record::Record;
use crate::trap::DefaultTrap;

/// A builder to configure and create a [`DailyFile`] appender.
#[derive(Debug)]
pub struct DailyFileBuilder {
    // required
    basedir: PathBuf,

    // has default
    subdirectory: Option<String>,
    layout: Box<dyn Layout>,
    trap: Box<dyn Trap>,
}

impl DailyFileBuilder {
    /// Create a new daily file appender builder writing under `basedir`.
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
            subdirectory: None,
            layout: Box::new(TopicTextLayout::default()),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Write into `<basedir>/<name>`, typically a device or install id.
    ///
    /// Only the last directory is created on demand; `basedir` must already exist.
    pub fn subdirectory(mut self, name: impl Into<String>) -> Self {
        self.subdirectory = Some(name.into());
        self
    }

    /// Set the layout for the logs.
    ///
    /// Default to [`TopicTextLayout`].
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the trap receiving the errors that do not abort an operation, such as a log file
    /// the retention sweep failed to remove.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`DailyFile`] appender.
    ///
    /// Nothing is created on disk until the first record is appended.
    ///
    /// # Errors
    ///
    /// Return an error if the subdirectory is empty or is not a single plain path component.
    pub fn build(self) -> Result<DailyFile, Error> {
        let DailyFileBuilder {
            basedir,
            subdirectory,
            layout,
            trap,
        } = self;

        let log_dir = match subdirectory {
            None => basedir,
            Some(name) => {
                if !is_single_component(&name) {
                    return Err(Error::new("invalid log subdirectory")
                        .with_context("subdirectory", name));
                }
                basedir.join(name)
            }
        };

        Ok(DailyFile {
            writer: Mutex::new(DailyFileWriter::new(log_dir.clone())),
            log_dir,
            layout,
            trap,
        })
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// An appender that writes log records to one file per day.
///
/// Appends and retention sweeps are serialized, so concurrent records never interleave within
/// a line and a sweep never runs in the middle of an append.
///
/// # Note
///
/// The lock belongs to this value, not to the directory. Two [`DailyFile`]s built for the same
/// directory do not serialize against each other; build one per log directory and share it.
#[derive(Debug)]
pub struct DailyFile {
    log_dir: PathBuf,
    writer: Mutex<DailyFileWriter>,
    layout: Box<dyn Layout>,
    trap: Box<dyn Trap>,
}

impl DailyFile {
    /// Create a new [`DailyFileBuilder`].
    pub fn builder(basedir: impl Into<PathBuf>) -> DailyFileBuilder {
        DailyFileBuilder::new(basedir)
    }

    /// The directory holding the daily log files.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// The log file used for records of `date`.
    pub fn file_path(&self, date: Date) -> PathBuf {
        rolling::file_path(&self.log_dir, date)
    }

    /// Delete log files dated before `today` minus the retention's days.
    ///
    /// Return the number of deleted files. Files that fail to be removed are reported to the
    /// trap and skipped.
    ///
    /// # Errors
    ///
    /// Return an error if the log directory exists but cannot be listed.
    pub fn sweep(&self, today: Date, retention: &Retention) -> Result<usize, Error> {
        let mut writer = self.writer();
        writer.sweep(today, retention, self.trap.as_ref())
    }

    fn writer(&self) -> MutexGuard<'_, DailyFileWriter> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Append for DailyFile {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let bytes = self.layout.format(record)?;
        let mut writer = self.writer();
        writer.write_line(record.time().date(), &bytes)
    }
}
