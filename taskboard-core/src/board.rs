/// Board session: the canonical item list plus the store it is persisted to.
///
/// Every transition runs through the reducer and is then written back
/// fail-soft. The in-memory list stays authoritative when a write fails.
use std::collections::HashSet;

use crate::reducer::{self, BoardEvent, DragResult, DropLocation, DropTarget};
use crate::storage::{KeyValueStore, PersistedStore, StorageError};
use crate::types::{Item, ItemId};
use crate::view::BoardView;

/// Key the item list is stored under.
pub const ITEMS_KEY: &str = "items";

pub struct Board<S> {
    store: PersistedStore<S>,
    key: String,
    items: Vec<Item>,
}

impl<S: KeyValueStore> Board<S> {
    pub fn load(backend: S) -> Self {
        Self::load_with_key(backend, ITEMS_KEY)
    }

    /// Read the list under `key`. A missing or corrupt entry starts an empty
    /// board and the empty list is written back immediately.
    pub fn load_with_key(backend: S, key: impl Into<String>) -> Self {
        let store = PersistedStore::new(backend);
        let key = key.into();

        let (items, write_back) = match store.try_read::<Vec<Item>>(&key) {
            Ok(Some(items)) => {
                let loaded = items.len();
                let items = dedupe_ids(items);
                let dropped = loaded - items.len();
                if dropped > 0 {
                    log::warn!(
                        "[board.load] Dropped {} item(s) with duplicate ids from {}",
                        dropped,
                        key
                    );
                }
                (items, dropped > 0)
            }
            Ok(None) => (Vec::new(), true),
            Err(e @ StorageError::Corrupt { .. }) => {
                log::warn!("[board.load] {}, starting with an empty board", e);
                (Vec::new(), true)
            }
            Err(e) => {
                log::error!("[board.load] Failed to read {}: {}", key, e);
                (Vec::new(), false)
            }
        };

        let board = Self { store, key, items };
        if write_back {
            let _ = board.save();
        }
        board
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn store(&self) -> &PersistedStore<S> {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Where a drag of `id` starts: its status and index within that status.
    pub fn locate(&self, id: ItemId) -> Option<DropLocation> {
        let item = self.find(id)?;
        let index = self
            .items
            .iter()
            .filter(|other| other.status == item.status)
            .position(|other| other.id == id)?;
        Some(DropLocation::new(item.status, index))
    }

    /// Drop event for moving `id` onto `target` at `index`, sourced from its
    /// current location. `None` when the item does not exist.
    pub fn move_event(&self, id: ItemId, target: DropTarget, index: usize) -> Option<BoardEvent> {
        let source = self.locate(id)?;
        Some(BoardEvent::Drop(DragResult {
            item_id: id,
            source,
            destination: Some(DropLocation { target, index }),
        }))
    }

    /// Apply `event` and persist. Returns whether the list changed;
    /// unchanged lists are not rewritten.
    pub fn dispatch(&mut self, event: &BoardEvent) -> bool {
        match reducer::apply(&self.items, event) {
            Some(next) => {
                self.items = next;
                let _ = self.save();
                true
            }
            None => false,
        }
    }

    /// Write the current list. Failures are logged by the store.
    pub fn save(&self) -> Result<(), StorageError> {
        self.store.write(&self.key, &self.items)
    }

    pub fn view(&self, query: &str) -> BoardView<'_> {
        BoardView::build(&self.items, query)
    }
}

/// Keep the first occurrence of every id.
fn dedupe_ids(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(item.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::local::FileStore;
    use crate::storage::memory::MemoryStore;
    use crate::types::{ItemPatch, Status};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn item(id: ItemId, status: Status) -> Item {
        Item::new(id, status, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap())
    }

    fn stored(board: &Board<MemoryStore>) -> Option<String> {
        board.store().backend().get(ITEMS_KEY).unwrap()
    }

    #[test]
    fn test_load_absent_writes_empty_list() {
        let board = Board::load(MemoryStore::new());
        assert!(board.items().is_empty());
        assert_eq!(stored(&board).as_deref(), Some("[]"));
    }

    #[test]
    fn test_load_corrupt_overwrites_with_empty_list() {
        let backend = MemoryStore::new();
        backend.set(ITEMS_KEY, "[{\"id\": oops").unwrap();
        let board = Board::load(backend);
        assert!(board.items().is_empty());
        assert_eq!(stored(&board).as_deref(), Some("[]"));
    }

    #[test]
    fn test_load_existing_list() {
        let backend = MemoryStore::new();
        let items = vec![item(1, Status::Todo), item(2, Status::Done)];
        backend
            .set(ITEMS_KEY, &serde_json::to_string(&items).unwrap())
            .unwrap();
        let board = Board::load(backend);
        assert_eq!(board.items(), items.as_slice());
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let backend = MemoryStore::new();
        let mut dup = item(1, Status::Review);
        dup.text = "second copy".into();
        let items = vec![item(1, Status::Todo), item(2, Status::Todo), dup];
        backend
            .set(ITEMS_KEY, &serde_json::to_string(&items).unwrap())
            .unwrap();

        let board = Board::load(backend);
        assert_eq!(board.items(), &items[..2]);
        let persisted: Vec<Item> = board.store().read(ITEMS_KEY).unwrap();
        assert_eq!(persisted, items[..2].to_vec());
    }

    #[test]
    fn test_dispatch_persists_changes() {
        let mut board = Board::load(MemoryStore::new());
        assert!(board.dispatch(&BoardEvent::create(Status::Todo)));
        let id = board.items()[0].id;
        assert!(board.dispatch(&BoardEvent::Edit {
            id,
            patch: ItemPatch::default().text("Write tests"),
        }));

        let persisted: Vec<Item> = board.store().read(ITEMS_KEY).unwrap();
        assert_eq!(persisted, board.items());
        assert_eq!(persisted[0].text, "Write tests");
    }

    #[test]
    fn test_noop_dispatch_reports_unchanged() {
        let mut board = Board::load(MemoryStore::new());
        assert!(!board.dispatch(&BoardEvent::Trash { id: 1 }));
        assert!(!board.dispatch(&BoardEvent::DeleteCompleted));
    }

    #[test]
    fn test_failed_write_keeps_memory_authoritative() {
        let mut board = Board::load(MemoryStore::with_quota(8));
        assert!(board.dispatch(&BoardEvent::create(Status::Todo)));
        assert_eq!(board.items().len(), 1);
        assert!(board.save().is_err());
        assert_eq!(stored(&board).as_deref(), Some("[]"));
    }

    #[test]
    fn test_locate_and_move() {
        let backend = MemoryStore::new();
        let items = vec![
            item(1, Status::Todo),
            item(2, Status::Review),
            item(3, Status::Todo),
        ];
        backend
            .set(ITEMS_KEY, &serde_json::to_string(&items).unwrap())
            .unwrap();
        let mut board = Board::load(backend);

        assert_eq!(board.locate(3), Some(DropLocation::new(Status::Todo, 1)));
        assert_eq!(board.locate(2), Some(DropLocation::new(Status::Review, 0)));
        assert_eq!(board.locate(9), None);
        assert!(board.move_event(9, DropTarget::Trash, 0).is_none());

        let event = board
            .move_event(3, DropTarget::Column(Status::Review), 0)
            .unwrap();
        assert!(board.dispatch(&event));
        let view = board.view("");
        assert_eq!(view.column(Status::Review).card_ids(), vec![3, 2]);
        assert_eq!(view.column(Status::Todo).card_ids(), vec![1]);

        let same_spot = board.move_event(3, DropTarget::Column(Status::Review), 0).unwrap();
        assert!(!board.dispatch(&same_spot));

        let to_trash = board.move_event(1, DropTarget::Trash, 0).unwrap();
        assert!(board.dispatch(&to_trash));
        assert!(board.find(1).is_none());
    }

    #[test]
    fn test_file_store_survives_reload() {
        let tmp = TempDir::new().unwrap();
        let mut board = Board::load(FileStore::open(tmp.path()).unwrap());
        board.dispatch(&BoardEvent::create(Status::Todo));
        board.dispatch(&BoardEvent::create(Status::Done));
        let before = board.into_items();

        let reloaded = Board::load(FileStore::open(tmp.path()).unwrap());
        assert_eq!(reloaded.items(), before.as_slice());
        assert!(tmp.path().join("items.json").exists());
    }

    #[test]
    fn test_custom_key() {
        let board = Board::load_with_key(MemoryStore::new(), "board-2");
        assert_eq!(board.key(), "board-2");
        assert_eq!(
            board.store().backend().get("board-2").unwrap().as_deref(),
            Some("[]")
        );
    }
}
