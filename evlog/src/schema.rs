//! Schema definitions for parsed event log records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parser::{self, ParseError};

/// The closed set of user actions an event log line can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SubmitForm,
    ClickButton,
    ViewPage,
    Logout,
}

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [EventType; 4] = [
        EventType::SubmitForm,
        EventType::ClickButton,
        EventType::ViewPage,
        EventType::Logout,
    ];

    /// The token used for this event type in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::SubmitForm => "submit_form",
            EventType::ClickButton => "click_button",
            EventType::ViewPage => "view_page",
            EventType::Logout => "logout",
        }
    }

    /// Look up an event type by its exact token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::validate_event_type(s)
    }
}

/// One parsed log record.
///
/// Only the line parser constructs these; `original_line` is the exact
/// source text of the record, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// When the event happened (local time, no offset).
    pub timestamp: NaiveDateTime,

    /// The acting user.
    pub user_id: u64,

    /// What the user did.
    pub event_type: EventType,

    /// The untouched source line.
    pub original_line: String,
}

/// Events of a whole log file, in input line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
