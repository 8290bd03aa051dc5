//! Filtering and ordering of parsed events.
//!
//! # Criteria
//!
//! - **userId**: exact user id
//! - **eventType**: one of the closed event types
//! - **fromDate** / **toDate**: inclusive timestamp bounds
//!
//! Raw parameter strings are checked with the same token rules the log
//! grammar uses, so a value is accepted here exactly when it would be
//! accepted inside a log line.

mod filter;

pub use filter::{EventQuery, SortOrder};
