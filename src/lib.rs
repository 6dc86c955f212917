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

//! Topiclog is a small logging utility for applications that sort their messages by topic.
//!
//! # Overview
//!
//! Every message is logged under a [`Topic`]: a title and an icon, plus flags deciding whether
//! the message is printed to the console and whether it is appended to a daily log file. Files
//! are named after the day they cover (`2024-06-10.log`) and old files are removed according to
//! the topic's [`Retention`].
//!
//! Logging never fails from the caller's point of view: write errors are reported to a
//! [`Trap`] (standard error by default) and dropped.
//!
//! # Examples
//!
//! Console-only logging with a default topic:
//!
//! ```
//! use topiclog::Topic;
//!
//! let logger = topiclog::builder()
//!     .default_topic(Topic::new("Debug", '🐞'))
//!     .build();
//!
//! logger.output("This is printed to stdout.", None);
//! ```
//!
//! Several topics, some of them persisted to daily files that are kept for a week:
//!
//! ```
//! use topiclog::Logger;
//! use topiclog::Retention;
//! use topiclog::Topic;
//! use topiclog::append::DailyFile;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let debug = Topic::new("Debug", '🐞').retention(Retention::keep_days(7));
//! let network = Topic::new("Network", '🌐').write_to_file(true);
//!
//! let logger = Logger::builder()
//!     .default_topic(debug)
//!     .topic(network.clone())
//!     .file(DailyFile::builder(dir.path()).build().unwrap())
//!     .build();
//!
//! logger.output("printed only", None);
//! logger.output(format_args!("GET {} -> {}", "/status", 200), Some(&network));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod layout;
pub mod record;
pub mod trap;

mod clock;
mod error;
mod logger;
mod topic;

pub use self::append::Append;
pub use self::error::Error;
pub use self::layout::Layout;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::logger::builder;
pub use self::topic::DEFAULT_KEEP_DAYS;
pub use self::topic::Retention;
pub use self::topic::Topic;
pub use self::trap::Trap;
