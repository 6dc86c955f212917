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

use std::fmt;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::Append;
use crate::Retention;
use crate::Topic;
use crate::Trap;
use crate::append::DailyFile;
use crate::clock::Clock;
use crate::record::Record;

mod builder;

pub use self::builder::LoggerBuilder;

/// Create a new [`LoggerBuilder`] instance for configuring a [`Logger`].
///
/// # Examples
///
/// ```
/// use topiclog::Topic;
///
/// let logger = topiclog::builder()
///     .default_topic(Topic::new("Debug", '🐞'))
///     .build();
/// logger.output("hello", None);
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder::new()
}

/// A logger that routes each call to the console and the daily log file according to its
/// topic.
///
/// [`Logger::output`] never fails and never panics: configuration mistakes make it a no-op and
/// I/O failures go to the configured [`Trap`].
#[derive(Debug)]
pub struct Logger {
    topics: Vec<Topic>,
    default_topic: Option<Topic>,
    console: Option<Box<dyn Append>>,
    file: Option<DailyFile>,
    tz: Option<TimeZone>,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl Logger {
    /// Create a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// All registered topics, the default topic included.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn default_topic(&self) -> Option<&Topic> {
        self.default_topic.as_ref()
    }

    /// Look up a registered topic by its title.
    pub fn topic_by_title(&self, title: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.title() == title)
    }

    /// The daily file appender, if one is configured.
    pub fn file(&self) -> Option<&DailyFile> {
        self.file.as_ref()
    }

    /// Log `payload` under `topic`, or under the default topic when `topic` is `None`.
    ///
    /// Nothing happens if `topic` is not registered, or if it is `None` and no default topic
    /// is configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use topiclog::Logger;
    /// use topiclog::Topic;
    ///
    /// let network = Topic::new("Network", '🌐');
    /// let logger = Logger::builder()
    ///     .default_topic(Topic::new("Debug", '🐞'))
    ///     .topic(network.clone())
    ///     .build();
    ///
    /// logger.output("using the default topic", None);
    /// logger.output(format_args!("GET {} {}", "/status", 200), Some(&network));
    /// ```
    pub fn output(&self, payload: impl fmt::Display, topic: Option<&Topic>) {
        let topic = match topic {
            Some(topic) if self.is_registered(topic) => topic,
            Some(_) => return,
            None => match self.default_topic.as_ref() {
                Some(topic) => topic,
                None => return,
            },
        };

        if !topic.prints_in_console() && !topic.writes_to_file() {
            return;
        }

        let record = Record::builder(topic, &payload).time(self.now()).build();

        if topic.prints_in_console() {
            if let Some(console) = self.console.as_ref() {
                // console failures are not observable
                let _ = console.append(&record);
            }
        }

        if topic.writes_to_file() {
            self.write_to_file(&record);
        }
    }

    /// Flush the console appender.
    pub fn flush(&self) {
        if let Some(console) = self.console.as_ref() {
            let _ = console.flush();
        }
    }

    fn write_to_file(&self, record: &Record) {
        let Some(file) = self.file.as_ref() else {
            return;
        };

        if let Err(err) = file.append(record) {
            self.trap.trap(&err);
        }

        // sweep even after a failed write; freeing space may be what the next write needs
        if let Some(retention) = self.retention_for(record.topic()) {
            if retention.auto_delete() {
                if let Err(err) = file.sweep(record.time().date(), retention) {
                    self.trap.trap(&err);
                }
            }
        }
    }

    fn retention_for<'a>(&'a self, topic: &'a Topic) -> Option<&'a Retention> {
        topic.retention_policy().or_else(|| {
            self.default_topic
                .as_ref()
                .and_then(|default| default.retention_policy())
        })
    }

    fn is_registered(&self, topic: &Topic) -> bool {
        self.topics.iter().any(|registered| registered.same_as(topic))
    }

    fn now(&self) -> Zoned {
        let now = self.clock.now();
        match self.tz.clone() {
            Some(tz) => now.with_time_zone(tz),
            None => now,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::str::FromStr;
    use std::sync::Arc;
    use std::sync::Mutex;

    use jiff::Zoned;
    use tempfile::TempDir;

    use super::*;
    use crate::Error;
    use crate::Layout;
    use crate::clock::ManualClock;
    use crate::layout::TopicTextLayout;

    #[derive(Debug, Clone, Default)]
    struct Capture(Arc<Mutex<Vec<String>>>);

    impl Append for Capture {
        fn append(&self, record: &Record) -> Result<(), Error> {
            let bytes = TopicTextLayout::default().format(record)?;
            let line = String::from_utf8(bytes).unwrap();
            self.0.lock().unwrap().push(line);
            Ok(())
        }
    }

    impl Trap for Capture {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    impl Capture {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    fn at(time: &str) -> Zoned {
        Zoned::from_str(time).unwrap()
    }

    fn logger_at(
        time: &str,
        builder: LoggerBuilder,
        temp_dir: &TempDir,
    ) -> (Logger, Capture, Capture) {
        let console = Capture::default();
        let trap = Capture::default();
        let file = DailyFile::builder(temp_dir.path())
            .subdirectory("logs")
            .build()
            .unwrap();
        let logger = builder
            .console(console.clone())
            .trap(trap.clone())
            .file(file)
            .clock(Clock::ManualClock(ManualClock::new(at(time))))
            .build();
        (logger, console, trap)
    }

    #[test]
    fn test_output_default_topic() {
        let temp_dir = TempDir::new().unwrap();
        let builder = Logger::builder().default_topic(Topic::new("Debug", '🐞'));
        let (logger, console, trap) =
            logger_at("2024-06-10T09:05:03.042[UTC]", builder, &temp_dir);

        logger.output("hello", None);

        assert_eq!(console.lines(), vec!["🐞 Debug\t\t09:05:03.042\t\thello"]);
        assert!(trap.lines().is_empty());
        // console only topic
        assert!(!temp_dir.path().join("logs").exists());
    }

    #[test]
    fn test_output_without_default_topic_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let (logger, console, trap) =
            logger_at("2024-06-10T09:05:03[UTC]", Logger::builder(), &temp_dir);

        logger.output("nobody listens", None);

        assert!(console.lines().is_empty());
        assert!(trap.lines().is_empty());
    }

    #[test]
    fn test_output_unregistered_topic_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let builder = Logger::builder().default_topic(Topic::new("Debug", '🐞'));
        let (logger, console, _) = logger_at("2024-06-10T09:05:03[UTC]", builder, &temp_dir);

        let stranger = Topic::new("Stranger", '👻').write_to_file(true);
        logger.output("ignored", Some(&stranger));

        assert!(console.lines().is_empty());
        assert!(!temp_dir.path().join("logs").exists());
    }

    #[test]
    fn test_output_uses_callers_flags_for_registered_topic() {
        let temp_dir = TempDir::new().unwrap();
        let builder = Logger::builder().topic(Topic::new("Sync", '🔄'));
        let (logger, console, _) = logger_at("2024-06-10T09:05:03[UTC]", builder, &temp_dir);

        let quiet = Topic::new("Sync", '🔄').print_in_console(false);
        logger.output("quiet", Some(&quiet));
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_output_rolls_over_to_new_day() {
        let temp_dir = TempDir::new().unwrap();
        let topic = Topic::new("Sync", '🔄')
            .print_in_console(false)
            .write_to_file(true);
        let builder = Logger::builder().default_topic(topic);
        let (mut logger, console, trap) =
            logger_at("2024-06-10T23:59:59.500[UTC]", builder, &temp_dir);

        logger.output("before midnight", None);
        logger.output("still before midnight", None);
        logger.clock.set_now(at("2024-06-11T00:00:00.250[UTC]"));
        logger.output("after midnight", None);

        let dir = temp_dir.path().join("logs");
        let first = fs::read_to_string(dir.join("2024-06-10.log")).unwrap();
        assert_eq!(
            first,
            "🔄 Sync\t\t23:59:59.500\t\tbefore midnight\n🔄 Sync\t\t23:59:59.500\t\tstill before midnight"
        );
        let second = fs::read_to_string(dir.join("2024-06-11.log")).unwrap();
        assert_eq!(second, "🔄 Sync\t\t00:00:00.250\t\tafter midnight");

        assert!(console.lines().is_empty());
        assert!(trap.lines().is_empty());
    }

    #[test]
    fn test_output_sweeps_with_default_retention() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("2024-06-02.log"), "old").unwrap();
        fs::write(dir.join("2024-06-03.log"), "kept").unwrap();

        let debug = Topic::new("Debug", '🐞').retention(Retention::keep_days(7));
        let sync = Topic::new("Sync", '🔄').write_to_file(true);
        let builder = Logger::builder().default_topic(debug).topic(sync.clone());
        let (logger, _, trap) = logger_at("2024-06-10T12:00:00[UTC]", builder, &temp_dir);

        logger.output("sweep", Some(&sync));

        assert!(!dir.join("2024-06-02.log").exists());
        assert!(dir.join("2024-06-03.log").exists());
        assert!(dir.join("2024-06-10.log").exists());
        assert!(trap.lines().is_empty());
    }

    #[test]
    fn test_output_topic_retention_overrides_default() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("2024-06-02.log"), "old").unwrap();

        let debug = Topic::new("Debug", '🐞').retention(Retention::keep_days(7));
        let sync = Topic::new("Sync", '🔄')
            .write_to_file(true)
            .retention(Retention::disabled());
        let builder = Logger::builder().default_topic(debug).topic(sync.clone());
        let (logger, _, _) = logger_at("2024-06-10T12:00:00[UTC]", builder, &temp_dir);

        logger.output("no sweep", Some(&sync));

        assert!(dir.join("2024-06-02.log").exists());
    }

    #[test]
    fn test_output_reports_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let console = Capture::default();
        let trap = Capture::default();
        let file = DailyFile::builder(temp_dir.path().join("missing"))
            .subdirectory("logs")
            .build()
            .unwrap();
        let topic = Topic::new("Sync", '🔄').write_to_file(true);
        let logger = Logger::builder()
            .default_topic(topic)
            .console(console.clone())
            .trap(trap.clone())
            .file(file)
            .build();

        logger.output("lost", None);

        assert_eq!(console.lines().len(), 1);
        let errors = trap.lines();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("failed to create log directory"));
    }

    #[test]
    fn test_output_reports_unwritable_day_file_and_still_sweeps() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");
        fs::create_dir(&dir).unwrap();
        // today's log path is taken by a directory
        fs::create_dir(dir.join("2024-06-10.log")).unwrap();
        fs::write(dir.join("2000-01-01.log"), "old").unwrap();

        let topic = Topic::new("Sync", '🔄')
            .print_in_console(false)
            .write_to_file(true)
            .retention(Retention::keep_days(1));
        let builder = Logger::builder().default_topic(topic);
        let (logger, _, trap) = logger_at("2024-06-10T12:00:00[UTC]", builder, &temp_dir);

        logger.output("lost", None);

        let errors = trap.lines();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("failed to write log file"));
        assert!(dir.join("2024-06-10.log").is_dir());
        assert!(!dir.join("2000-01-01.log").exists());
    }

    #[test]
    fn test_output_time_zone() {
        let temp_dir = TempDir::new().unwrap();
        let builder = Logger::builder()
            .default_topic(Topic::new("Debug", '🐞'))
            .time_zone(TimeZone::fixed(jiff::tz::offset(-5)));
        let (logger, console, _) = logger_at("2024-06-10T02:00:00[UTC]", builder, &temp_dir);

        logger.output("late night", None);

        assert_eq!(console.lines(), vec!["🐞 Debug\t\t21:00:00.000\t\tlate night"]);
    }
}
