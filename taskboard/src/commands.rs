/// Turns parsed commands into board events and renders the result.
use std::fmt::Write;

use taskboard_core::storage::KeyValueStore;
use taskboard_core::types::{parse_day, END_DAY_UNSET};
use taskboard_core::view::BoardView;
use taskboard_core::{Board, BoardEvent, DropTarget, ItemPatch};

use crate::cli::Command;
use crate::error::AppError;

pub fn execute<S: KeyValueStore>(board: &mut Board<S>, command: Command) -> Result<String, AppError> {
    match command {
        Command::List { search } => Ok(render(&board.view(search.as_deref().unwrap_or("")))),

        Command::Add { status } => {
            board.dispatch(&BoardEvent::create(status));
            let id = board.items().first().map(|item| item.id).unwrap_or_default();
            Ok(format!("Added task {} to {}\n", id, status.label()))
        }

        Command::Edit {
            id,
            text,
            start,
            end,
        } => {
            if board.find(id).is_none() {
                return Err(AppError::UnknownItem(id));
            }
            let mut patch = ItemPatch::default();
            patch.text = text;
            patch.start_day = start.map(|day| validate_day("start", day, false)).transpose()?;
            patch.end_day = end.map(|day| validate_day("end", day, true)).transpose()?;
            if patch.is_empty() {
                return Err(AppError::EmptyEdit);
            }
            board.dispatch(&BoardEvent::Edit { id, patch });
            Ok(format!("Updated task {}\n", id))
        }

        Command::Move { id, target, index } => {
            let event = board
                .move_event(id, target, index)
                .ok_or(AppError::UnknownItem(id))?;
            if !board.dispatch(&event) {
                return Ok(format!("Task {} is already there\n", id));
            }
            Ok(match target {
                DropTarget::Trash => format!("Deleted task {}\n", id),
                DropTarget::Column(status) => format!("Moved task {} to {}\n", id, status.label()),
            })
        }

        Command::Trash { id } => {
            if !board.dispatch(&BoardEvent::Trash { id }) {
                return Err(AppError::UnknownItem(id));
            }
            Ok(format!("Deleted task {}\n", id))
        }

        Command::ClearDone => {
            let before = board.items().len();
            board.dispatch(&BoardEvent::DeleteCompleted);
            let removed = before - board.items().len();
            Ok(format!("Deleted {} completed task(s)\n", removed))
        }
    }
}

fn validate_day(field: &'static str, value: String, allow_unset: bool) -> Result<String, AppError> {
    let trimmed = value.trim();
    if allow_unset && trimmed == END_DAY_UNSET {
        return Ok(END_DAY_UNSET.to_string());
    }
    match parse_day(trimmed) {
        Some(_) => Ok(trimmed.to_string()),
        None => Err(AppError::InvalidDay { field, value }),
    }
}

/// Plain-text board: one block per column, expired cards marked with `!`.
pub fn render(view: &BoardView<'_>) -> String {
    let mut out = String::new();
    if !view.query.is_empty() {
        let _ = writeln!(out, "Search: {}", view.query);
    }
    for column in &view.columns {
        let _ = writeln!(out, "{} ({})", column.label, column.cards.len());
        for card in &column.cards {
            let item = card.item;
            let end = if item.has_end_day() { item.end_day.as_str() } else { "-" };
            let _ = writeln!(
                out,
                " {} {}  {}  [{} .. {}]",
                if card.expired { '!' } else { ' ' },
                item.id,
                item.text,
                item.start_day,
                end
            );
        }
    }
    out
}
