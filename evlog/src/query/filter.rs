//! Query criteria and their application to an event log.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parser::{validate_date, validate_event_type, validate_user_id, ParseError};
use crate::schema::{Event, EventLog, EventType};
use crate::{Error, Result};

/// Direction of the timestamp sort applied to query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Asc,
    /// Newest first
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::Config(format!(
                "Unknown sort order '{}', expected asc or desc",
                other
            ))),
        }
    }
}

/// Criteria for selecting events. Absent criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub user_id: Option<u64>,
    pub event_type: Option<EventType>,
    /// Earliest timestamp to include.
    pub from: Option<NaiveDateTime>,
    /// Latest timestamp to include.
    pub to: Option<NaiveDateTime>,
    pub order: SortOrder,
    /// Keep at most this many events after sorting.
    pub limit: Option<usize>,
}

impl EventQuery {
    /// Build a query from raw, optional parameter strings.
    ///
    /// Each present value must be valid on its own; the first invalid one is
    /// reported by its parameter name.
    pub fn from_params(
        user_id: Option<&str>,
        event_type: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            user_id: check("userId", user_id, validate_user_id)?,
            event_type: check("eventType", event_type, validate_event_type)?,
            from: check("fromDate", from, validate_date)?,
            to: check("toDate", to, validate_date)?,
            ..Default::default()
        })
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Check whether a single event satisfies every present criterion.
    pub fn matches(&self, event: &Event) -> bool {
        self.user_id.map_or(true, |id| event.user_id == id)
            && self.event_type.map_or(true, |t| event.event_type == t)
            && self.from.map_or(true, |from| event.timestamp >= from)
            && self.to.map_or(true, |to| event.timestamp <= to)
    }

    /// Select matching events sorted by timestamp.
    ///
    /// The sort is stable, so events with equal timestamps keep their log
    /// order. The log itself is left untouched.
    pub fn apply<'a>(&self, log: &'a EventLog) -> Vec<&'a Event> {
        let mut selected: Vec<&Event> = log.iter().filter(|e| self.matches(e)).collect();

        match self.order {
            SortOrder::Asc => selected.sort_by_key(|e| e.timestamp),
            SortOrder::Desc => selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }

        tracing::debug!(
            total = log.len(),
            selected = selected.len(),
            order = %self.order,
            "applied event query"
        );
        selected
    }
}

fn check<T>(
    name: &'static str,
    value: Option<&str>,
    validate: fn(&str) -> std::result::Result<T, ParseError>,
) -> Result<Option<T>> {
    value
        .map(|v| {
            validate(v).map_err(|source| Error::InvalidParameter {
                name,
                value: v.to_string(),
                source,
            })
        })
        .transpose()
}
