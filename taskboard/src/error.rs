use taskboard_core::storage::StorageError;
use taskboard_core::ItemId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No task with id {0}")]
    UnknownItem(ItemId),

    #[error("Invalid {field} day {value:?}: expected dd.MM.yyyy")]
    InvalidDay { field: &'static str, value: String },

    #[error("Nothing to edit: pass --text, --start or --end")]
    EmptyEdit,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
