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

//! A bridge to forward logs from the `log` crate to a [`Logger`].
//!
//! A `log` record goes to the registered topic whose title equals the record's target, and to
//! the default topic otherwise. Levels are not interpreted; the topic's flags decide where the
//! record ends up.

use crate::Logger;
use crate::Topic;

impl Logger {
    fn topic_for_target(&self, target: &str) -> Option<&Topic> {
        self.topic_by_title(target).or(self.default_topic())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.topic_for_target(metadata.target()).is_some()
    }

    fn log(&self, record: &log::Record) {
        if let Some(topic) = self.topic_for_target(record.target()) {
            self.output(record.args(), Some(topic));
        }
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] with the given logger, so that all logs from
/// the log crate are forwarded to it.
///
/// This should be called early in the execution of a Rust program. Any log events that occur
/// before initialization will be ignored.
///
/// This function will set the global maximum log level to `Trace`. To override this, call
/// [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// use topiclog::Logger;
/// use topiclog::Topic;
///
/// let logger = Logger::builder()
///     .default_topic(Topic::new("Debug", '🐞'))
///     .build();
/// if let Err(err) = topiclog::bridge::log::setup_log_crate(logger) {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// log::info!("forwarded to the default topic");
/// ```
pub fn setup_log_crate(logger: Logger) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
