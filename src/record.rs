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

//! Log record types.

use std::fmt;

use jiff::Zoned;

use crate::Topic;

/// A single log call: when it happened, which topic it belongs to and what to print.
///
/// Records are built per call and only borrowed by appenders.
#[derive(Clone)]
pub struct Record<'a> {
    time: Zoned,
    topic: &'a Topic,
    payload: &'a dyn fmt::Display,
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("time", &self.time)
            .field("topic", &self.topic.title())
            .finish_non_exhaustive()
    }
}

impl<'a> Record<'a> {
    /// Create a [`RecordBuilder`] for the given topic and payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use topiclog::Topic;
    /// use topiclog::record::Record;
    ///
    /// let topic = Topic::new("Debug", '🐞');
    /// let record = Record::builder(&topic, &"hello").build();
    /// assert_eq!(record.topic().title(), "Debug");
    /// ```
    pub fn builder(topic: &'a Topic, payload: &'a dyn fmt::Display) -> RecordBuilder<'a> {
        RecordBuilder {
            time: None,
            topic,
            payload,
        }
    }

    /// The time the record was produced.
    pub fn time(&self) -> &Zoned {
        &self.time
    }

    /// The topic this record is logged under.
    pub fn topic(&self) -> &'a Topic {
        self.topic
    }

    /// The message payload.
    pub fn payload(&self) -> &'a dyn fmt::Display {
        self.payload
    }
}

/// Builder for [`Record`].
pub struct RecordBuilder<'a> {
    time: Option<Zoned>,
    topic: &'a Topic,
    payload: &'a dyn fmt::Display,
}

impl fmt::Debug for RecordBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordBuilder")
            .field("time", &self.time)
            .field("topic", &self.topic.title())
            .finish_non_exhaustive()
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set the record time. Default to [`Zoned::now`] at build time.
    pub fn time(mut self, time: Zoned) -> Self {
        self.time = Some(time);
        self
    }

    pub fn build(self) -> Record<'a> {
        Record {
            time: self.time.unwrap_or_else(Zoned::now),
            topic: self.topic,
            payload: self.payload,
        }
    }
}

/// Print a [`Debug`](fmt::Debug)-only value as a payload.
///
/// # Examples
///
/// ```
/// use topiclog::record::DebugPayload;
///
/// let payload = DebugPayload(vec![1, 2, 3]);
/// assert_eq!(payload.to_string(), "[1, 2, 3]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DebugPayload<T>(pub T);

impl<T: fmt::Debug> fmt::Display for DebugPayload<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
