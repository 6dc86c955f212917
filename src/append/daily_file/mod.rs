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

//! Appender for writing log records to one file per calendar day.
//!
//! Files are named `YYYY-MM-DD.log` after the date of the record being written. The first
//! record of a day creates the file; later records of the same day are appended to it, one
//! line each, separated by a single newline.
//!
//! After a write, [`DailyFile::sweep`] deletes files whose date lies more than the configured
//! number of days in the past. The logger calls it when the topic's retention asks for
//! automatic deletion.
//!
//! # Example
//!
//!```
//! use topiclog::Logger;
//! use topiclog::Retention;
//! use topiclog::Topic;
//! use topiclog::append::DailyFile;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let file = DailyFile::builder(dir.path())
//!     .subdirectory("device-1")
//!     .build()
//!     .unwrap();
//!
//! let sync = Topic::new("Sync", '🔄')
//!     .write_to_file(true)
//!     .retention(Retention::keep_days(7));
//!
//! let logger = Logger::builder().default_topic(sync).file(file).build();
//! logger.output("This line will be written to today's log file.", None);
//! ```

pub use self::append::DailyFile;
pub use self::append::DailyFileBuilder;

mod append;
mod rolling;

/// The date part of a log file name.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The extension of every log file, including the dot.
const LOG_FILE_EXTENSION: &str = ".log";
