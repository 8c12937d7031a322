pub mod board;
pub mod config;
pub mod expiry;
pub mod reducer;
pub mod search;
pub mod storage;
pub mod types;
pub mod view;

pub use board::{Board, ITEMS_KEY};
pub use reducer::{BoardEvent, DragResult, DropLocation, DropTarget};
pub use types::{Item, ItemId, ItemPatch, Status};
