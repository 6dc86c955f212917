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

use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::Error;
use crate::layout::Layout;
use crate::record::Record;

const UNRENDERABLE_PAYLOAD: &str = "<unrenderable payload>";

/// A layout that formats log record as icon-prefixed text.
///
/// Output format:
///
/// ```text
/// 🐞 Debug		09:05:03.042		connected to server
/// 🌐 Network		09:05:03.118		GET /status 200
/// ```
///
/// Fields are separated by two tab characters. The timestamp has millisecond precision and no
/// date; the date is carried by the name of the daily log file.
///
/// You can customize the timezone of the timestamp by setting the `tz` field with a [`TimeZone`]
/// instance. Otherwise, the time zone of the record is used.
///
/// # Examples
///
/// ```
/// use topiclog::layout::TopicTextLayout;
///
/// let layout = TopicTextLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TopicTextLayout {
    tz: Option<TimeZone>,
}

impl TopicTextLayout {
    /// Render timestamps in the given time zone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

impl Layout for TopicTextLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let time = match self.tz.clone() {
            Some(tz) => record.time().with_time_zone(tz),
            None => record.time().clone(),
        };
        let topic = record.topic();

        let mut text = format!(
            "{icon} {title}\t\t{h:02}:{m:02}:{s:02}.{ms:03}\t\t",
            icon = topic.icon(),
            title = topic.title(),
            h = time.hour(),
            m = time.minute(),
            s = time.second(),
            ms = time.millisecond(),
        );

        let prefix = text.len();
        if write!(&mut text, "{}", record.payload()).is_err() {
            text.truncate(prefix);
            text.push_str(UNRENDERABLE_PAYLOAD);
        }

        Ok(text.into_bytes())
    }
}
