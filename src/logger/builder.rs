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

use jiff::tz::TimeZone;

use crate::Append;
use crate::Logger;
use crate::Topic;
use crate::Trap;
use crate::append::DailyFile;
use crate::append::Stdout;
use crate::clock::Clock;
use crate::trap::DefaultTrap;

/// A builder for configuring a [`Logger`].
///
/// The logger is an ordinary value: keep it where the application keeps its other services
/// and pass it by reference (or in an `Arc`) to the code that logs.
///
/// # Examples
///
/// ```
/// use topiclog::Logger;
/// use topiclog::Topic;
///
/// let logger = Logger::builder()
///     .default_topic(Topic::new("Debug", '🐞'))
///     .topics([Topic::new("Network", '🌐'), Topic::new("Storage", '💾')])
///     .build();
/// assert_eq!(logger.topics().len(), 3);
/// ```
#[must_use = "call `build` to construct a logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    topics: Vec<Topic>,
    default_topic: Option<Topic>,
    console: Option<Box<dyn Append>>,
    file: Option<DailyFile>,
    tz: Option<TimeZone>,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a builder that prints to stdout, has no topics and no log file.
    pub fn new() -> Self {
        Self {
            topics: vec![],
            default_topic: None,
            console: Some(Box::new(Stdout::default())),
            file: None,
            tz: None,
            clock: Clock::DefaultClock,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Register a topic.
    ///
    /// Registering a topic with the same title and icon as an existing one replaces it.
    pub fn topic(mut self, topic: Topic) -> Self {
        match self.topics.iter_mut().find(|t| t.same_as(&topic)) {
            Some(existing) => *existing = topic,
            None => self.topics.push(topic),
        }
        self
    }

    /// Register several topics.
    pub fn topics(self, topics: impl IntoIterator<Item = Topic>) -> Self {
        topics.into_iter().fold(self, |builder, topic| builder.topic(topic))
    }

    /// Set the topic used when no topic is passed to [`Logger::output`]. The topic is
    /// registered as well.
    ///
    /// Its retention also applies to topics that have none of their own.
    pub fn default_topic(mut self, topic: Topic) -> Self {
        self.default_topic = Some(topic.clone());
        self.topic(topic)
    }

    /// Replace the console appender.
    ///
    /// Default to [`Stdout`].
    pub fn console(mut self, console: impl Into<Box<dyn Append>>) -> Self {
        self.console = Some(console.into());
        self
    }

    /// Disable console output regardless of topic flags.
    pub fn no_console(mut self) -> Self {
        self.console = None;
        self
    }

    /// Write topics with `write_to_file` set to the given daily file appender.
    pub fn file(mut self, file: DailyFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Stamp records in the given time zone. It decides both the printed time and which
    /// day's file a record goes to.
    ///
    /// Default to the system time zone.
    pub fn time_zone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Set the trap for errors raised while writing log files.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        let LoggerBuilder {
            topics,
            default_topic,
            console,
            file,
            tz,
            clock,
            trap,
        } = self;

        Logger {
            topics,
            default_topic,
            console,
            file,
            tz,
            clock,
            trap,
        }
    }
}
