/// Board state transitions.
///
/// Every event is applied to the complete canonical item list and yields a
/// complete canonical list. Filtered or grouped views are never fed back in.
use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

use crate::types::{fresh_id, Item, ItemId, ItemPatch, Status};

/// Identifier of the trash drop target.
pub const TRASH_TARGET: &str = "trash";

/// Where a dragged item can land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    Column(Status),
    Trash,
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Column(status) => f.write_str(status.as_str()),
            DropTarget::Trash => f.write_str(TRASH_TARGET),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown drop target: {0}")]
pub struct ParseTargetError(pub String);

impl FromStr for DropTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == TRASH_TARGET {
            return Ok(DropTarget::Trash);
        }
        s.parse::<Status>()
            .map(DropTarget::Column)
            .map_err(|_| ParseTargetError(s.to_string()))
    }
}

impl From<Status> for DropTarget {
    fn from(status: Status) -> Self {
        DropTarget::Column(status)
    }
}

/// A target plus the index within that target's group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropLocation {
    pub target: DropTarget,
    pub index: usize,
}

impl DropLocation {
    pub fn new(target: impl Into<DropTarget>, index: usize) -> Self {
        Self {
            target: target.into(),
            index,
        }
    }
}

/// Outcome of a drag gesture as reported by the drag source.
/// `destination` is `None` when the gesture was cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragResult {
    pub item_id: ItemId,
    pub source: DropLocation,
    pub destination: Option<DropLocation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// Add a new item at the head of the list.
    Create {
        status: Status,
        created_at: DateTime<Local>,
    },
    /// Remove every item in `done`.
    DeleteCompleted,
    Edit {
        id: ItemId,
        patch: ItemPatch,
    },
    Trash {
        id: ItemId,
    },
    Drop(DragResult),
}

impl BoardEvent {
    /// Create event stamped with the local clock.
    pub fn create(status: Status) -> Self {
        BoardEvent::Create {
            status,
            created_at: Local::now(),
        }
    }
}

/// Apply `event`, returning `None` when it leaves the list unchanged.
pub fn apply(items: &[Item], event: &BoardEvent) -> Option<Vec<Item>> {
    match event {
        BoardEvent::Create { status, created_at } => Some(create(items, *status, created_at)),
        BoardEvent::DeleteCompleted => delete_completed(items),
        BoardEvent::Edit { id, patch } => edit(items, *id, patch),
        BoardEvent::Trash { id } => trash(items, *id),
        BoardEvent::Drop(drag) => drop_item(items, drag),
    }
}

/// `(state, event) -> state`.
pub fn reduce(items: Vec<Item>, event: &BoardEvent) -> Vec<Item> {
    match apply(&items, event) {
        Some(next) => next,
        None => items,
    }
}

fn create(items: &[Item], status: Status, created_at: &DateTime<Local>) -> Vec<Item> {
    let id = fresh_id(items, created_at.timestamp_millis());
    let mut next = Vec::with_capacity(items.len() + 1);
    next.push(Item::new(id, status, created_at.date_naive()));
    next.extend_from_slice(items);
    next
}

fn delete_completed(items: &[Item]) -> Option<Vec<Item>> {
    if !items.iter().any(|item| item.status == Status::Done) {
        return None;
    }
    Some(
        items
            .iter()
            .filter(|item| item.status != Status::Done)
            .cloned()
            .collect(),
    )
}

fn edit(items: &[Item], id: ItemId, patch: &ItemPatch) -> Option<Vec<Item>> {
    let Some(position) = items.iter().position(|item| item.id == id) else {
        log::debug!("[reducer.edit] No item {}, ignoring", id);
        return None;
    };
    let mut next = items.to_vec();
    next[position].apply(patch);
    Some(next)
}

fn trash(items: &[Item], id: ItemId) -> Option<Vec<Item>> {
    if !items.iter().any(|item| item.id == id) {
        log::debug!("[reducer.trash] No item {}, ignoring", id);
        return None;
    }
    Some(items.iter().filter(|item| item.id != id).cloned().collect())
}

fn drop_item(items: &[Item], drag: &DragResult) -> Option<Vec<Item>> {
    let destination = drag.destination?;

    let status = match destination.target {
        DropTarget::Trash => return trash(items, drag.item_id),
        DropTarget::Column(status) => status,
    };

    if drag.source == destination {
        return None;
    }

    let Some(dragged) = items.iter().find(|item| item.id == drag.item_id) else {
        log::debug!("[reducer.drop] No item {}, ignoring", drag.item_id);
        return None;
    };

    let (mut group, mut others): (Vec<Item>, Vec<Item>) = items
        .iter()
        .filter(|item| item.id != drag.item_id)
        .cloned()
        .partition(|item| item.status == status);

    // An index past the end lands on the same slot as the last valid one.
    let index = destination.index.min(group.len());
    if drag.source.target == destination.target && drag.source.index == index {
        return None;
    }

    let mut moved = dragged.clone();
    moved.status = status;
    group.insert(index, moved);

    // Other groups first, then the destination group.
    others.extend(group);
    Some(others)
}
