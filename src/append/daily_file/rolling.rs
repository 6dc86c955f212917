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

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use jiff::Span;
use jiff::civil::Date;

use crate::Error;
use crate::Retention;
use crate::Trap;
use crate::append::daily_file::DATE_FORMAT;
use crate::append::daily_file::LOG_FILE_EXTENSION;

/// Owns the log directory. Every file operation of the appender goes through here, behind the
/// appender's lock.
#[derive(Debug)]
pub(super) struct DailyFileWriter {
    log_dir: PathBuf,
}

#[derive(Debug)]
struct LogFile {
    filepath: PathBuf,
    date: Date,
}

impl DailyFileWriter {
    pub(super) fn new(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }

    pub(super) fn file_path(&self, date: Date) -> PathBuf {
        file_path(&self.log_dir, date)
    }

    /// Append one line to the file of `date`, creating the file and the log directory if
    /// needed.
    pub(super) fn write_line(&mut self, date: Date, line: &[u8]) -> Result<(), Error> {
        self.ensure_log_dir()?;

        let filepath = self.file_path(date);
        let result = match OpenOptions::new().append(true).open(&filepath) {
            Ok(mut file) => {
                let mut bytes = Vec::with_capacity(line.len() + 1);
                bytes.push(b'\n');
                bytes.extend_from_slice(line);
                file.write_all(&bytes)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&filepath)
                .and_then(|mut file| file.write_all(line)),
            Err(err) => Err(err),
        };

        result.map_err(|err| {
            Error::new("failed to write log file")
                .with_path(&filepath)
                .with_source(err)
        })
    }

    /// Delete log files older than the retention allows, counting from `today`.
    ///
    /// A file that cannot be inspected or removed is reported to `trap` and skipped.
    pub(super) fn sweep(
        &mut self,
        today: Date,
        retention: &Retention,
        trap: &dyn Trap,
    ) -> Result<usize, Error> {
        if !retention.auto_delete() {
            return Ok(0);
        }

        let cutoff = cutoff_date(today, retention.normalized_days());
        let mut deleted = 0;
        for file in self.list_logfiles(trap)? {
            if file.date >= cutoff {
                continue;
            }
            match fs::remove_file(&file.filepath) {
                Ok(()) => deleted += 1,
                Err(err) => {
                    let err = Error::new("failed to remove expired log file")
                        .with_path(&file.filepath)
                        .with_source(err);
                    trap.trap(&err);
                }
            }
        }

        Ok(deleted)
    }

    // fs::create_dir on purpose: only the last component is created
    fn ensure_log_dir(&self) -> Result<(), Error> {
        match fs::create_dir(&self.log_dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(err) => Err(Error::new("failed to create log directory")
                .with_path(&self.log_dir)
                .with_source(err)),
        }
    }

    /// Entries that cannot be inspected are reported to `trap` and skipped.
    fn list_logfiles(&self, trap: &dyn Trap) -> Result<Vec<LogFile>, Error> {
        let read_dir = match fs::read_dir(&self.log_dir) {
            Ok(read_dir) => read_dir,
            // nothing was ever written
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => {
                return Err(Error::new("failed to read log dir")
                    .with_path(&self.log_dir)
                    .with_source(err));
            }
        };

        let mut files = vec![];
        for entry in read_dir {
            let (entry, metadata) = match entry.and_then(|e| e.metadata().map(|m| (e, m))) {
                Ok(found) => found,
                Err(err) => {
                    let err = Error::new("failed to read log dir entry")
                        .with_path(&self.log_dir)
                        .with_source(err);
                    trap.trap(&err);
                    continue;
                }
            };
            // the appender only creates files, not directories or symlinks
            if !metadata.is_file() {
                continue;
            }

            let filename = entry.file_name();
            // if the filename is not a UTF-8 string, skip it.
            let Some(date) = filename.to_str().and_then(parse_log_date) else {
                continue;
            };
            files.push(LogFile {
                filepath: entry.path(),
                date,
            });
        }

        Ok(files)
    }
}

pub(super) fn file_path(log_dir: &Path, date: Date) -> PathBuf {
    let date = date.strftime(DATE_FORMAT);
    log_dir.join(format!("{date}{LOG_FILE_EXTENSION}"))
}

/// The date of a `YYYY-MM-DD.log` file name. Anything else is not ours.
fn parse_log_date(filename: &str) -> Option<Date> {
    let stem = filename.strip_suffix(LOG_FILE_EXTENSION)?;
    let date = Date::strptime(DATE_FORMAT, stem).ok()?;
    // reject loose spellings such as `2024-6-2`
    (date.strftime(DATE_FORMAT).to_string() == stem).then_some(date)
}

/// Files dated strictly before the returned date are expired.
fn cutoff_date(today: Date, keep_days: u32) -> Date {
    Span::new()
        .try_days(i64::from(keep_days))
        .and_then(|span| today.checked_sub(span))
        .unwrap_or(Date::MIN)
}
