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

//! Topics: named log categories with display and persistence settings.

/// Keep log files for a week unless configured otherwise.
pub const DEFAULT_KEEP_DAYS: i32 = 7;

/// Age-based deletion of daily log files.
///
/// `keep_days` may be negative; the sweep uses its absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Retention {
    auto_delete: bool,
    keep_days: i32,
}

impl Default for Retention {
    fn default() -> Self {
        Self {
            auto_delete: true,
            keep_days: DEFAULT_KEEP_DAYS,
        }
    }
}

impl Retention {
    /// Create a retention policy that deletes files older than `keep_days` days.
    pub fn keep_days(keep_days: i32) -> Self {
        Self {
            auto_delete: true,
            keep_days,
        }
    }

    /// A retention policy that never deletes anything.
    pub fn disabled() -> Self {
        Self {
            auto_delete: false,
            ..Self::default()
        }
    }

    /// Whether the sweep should run after writes.
    pub fn auto_delete(&self) -> bool {
        self.auto_delete
    }

    /// The configured number of days, as given.
    pub fn days(&self) -> i32 {
        self.keep_days
    }

    /// The number of days actually kept by the sweep.
    pub fn normalized_days(&self) -> u32 {
        self.keep_days.unsigned_abs()
    }
}

/// A log category.
///
/// Two topics are the same topic when their titles and icons match, see [`Topic::same_as`].
///
/// # Examples
///
/// ```
/// use topiclog::Retention;
/// use topiclog::Topic;
///
/// let network = Topic::new("Network", '🌐')
///     .write_to_file(true)
///     .retention(Retention::keep_days(3));
/// assert!(network.prints_in_console());
/// assert!(network.writes_to_file());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topic {
    title: String,
    icon: char,
    #[cfg_attr(feature = "serde", serde(default = "default_print_in_console"))]
    print_in_console: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    write_to_file: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    retention: Option<Retention>,
}

#[cfg(feature = "serde")]
fn default_print_in_console() -> bool {
    true
}

impl Topic {
    /// Create a topic that prints to the console and does not write to file.
    pub fn new(title: impl Into<String>, icon: char) -> Self {
        Self {
            title: title.into(),
            icon,
            print_in_console: true,
            write_to_file: false,
            retention: None,
        }
    }

    /// Set whether records of this topic are printed to the console.
    #[must_use]
    pub fn print_in_console(mut self, yes: bool) -> Self {
        self.print_in_console = yes;
        self
    }

    /// Set whether records of this topic are appended to the daily log file.
    #[must_use]
    pub fn write_to_file(mut self, yes: bool) -> Self {
        self.write_to_file = yes;
        self
    }

    /// Set the retention policy applied after this topic writes to file.
    #[must_use]
    pub fn retention(mut self, retention: Retention) -> Self {
        self.retention = Some(retention);
        self
    }

    /// The title shown after the icon.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The icon that starts every line of this topic.
    pub fn icon(&self) -> char {
        self.icon
    }

    /// Whether records of this topic are printed to the console.
    pub fn prints_in_console(&self) -> bool {
        self.print_in_console
    }

    /// Whether records of this topic are appended to the daily log file.
    pub fn writes_to_file(&self) -> bool {
        self.write_to_file
    }

    /// The retention policy of this topic, if any.
    pub fn retention_policy(&self) -> Option<&Retention> {
        self.retention.as_ref()
    }

    /// Whether `other` names the same topic, ignoring its output flags.
    pub fn same_as(&self, other: &Topic) -> bool {
        self.title == other.title && self.icon == other.icon
    }
}
