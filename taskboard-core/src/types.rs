use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub type ItemId = u64;

/// Day strings are stored as `dd.MM.yyyy`.
pub const DAY_FORMAT: &str = "%d.%m.%Y";

/// Sentinel stored in `end_day` when no deadline has been set.
pub const END_DAY_UNSET: &str = "0";

pub const NEW_ITEM_TEXT: &str = "New task";

/// The column an item lives in. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    Review,
    Done,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Todo, Status::InProgress, Status::Review, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Review => "review",
            Status::Done => "done",
        }
    }

    /// Column heading shown by the board.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Review => "Review",
            Status::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "todo" => Ok(Status::Todo),
            "in_progress" => Ok(Status::InProgress),
            "review" => Ok(Status::Review),
            "done" => Ok(Status::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A single task on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub status: Status,
    pub start_day: String,
    /// `dd.MM.yyyy`, or [`END_DAY_UNSET`].
    pub end_day: String,
    pub text: String,
}

impl Item {
    /// A freshly created task: default text, no deadline.
    pub fn new(id: ItemId, status: Status, start_day: NaiveDate) -> Self {
        Self {
            id,
            status,
            start_day: format_day(start_day),
            end_day: END_DAY_UNSET.to_string(),
            text: NEW_ITEM_TEXT.to_string(),
        }
    }

    /// Merge the fields present in `patch` into this item. The id never changes.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start_day) = &patch.start_day {
            self.start_day = start_day.clone();
        }
        if let Some(end_day) = &patch.end_day {
            self.end_day = end_day.clone();
        }
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
    }

    pub fn has_end_day(&self) -> bool {
        self.end_day != END_DAY_UNSET
    }
}

/// Partial field update for an existing item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.start_day.is_none()
            && self.end_day.is_none()
            && self.text.is_none()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn start_day(mut self, day: impl Into<String>) -> Self {
        self.start_day = Some(day.into());
        self
    }

    pub fn end_day(mut self, day: impl Into<String>) -> Self {
        self.end_day = Some(day.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a `dd.MM.yyyy` day string. The unset sentinel and anything
/// malformed yield `None`.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() || value == END_DAY_UNSET {
        return None;
    }
    NaiveDate::parse_from_str(value, DAY_FORMAT).ok()
}

/// Pick an id for a new item: the creation time in milliseconds, bumped past
/// the largest existing id when the clock has not moved far enough. When the
/// largest id is already `ItemId::MAX`, the smallest unused id is taken.
pub fn fresh_id(items: &[Item], now_millis: i64) -> ItemId {
    let candidate = now_millis.max(0) as ItemId;
    match items.iter().map(|item| item.id).max() {
        Some(max) if max >= candidate => match max.checked_add(1) {
            Some(next) => next,
            None => smallest_unused_id(items),
        },
        _ => candidate,
    }
}

fn smallest_unused_id(items: &[Item]) -> ItemId {
    let used: HashSet<ItemId> = items.iter().map(|item| item.id).collect();
    // A list holds fewer than ItemId::MAX items, so a gap always exists.
    (0..ItemId::MAX).find(|id| !used.contains(id)).unwrap_or_default()
}
