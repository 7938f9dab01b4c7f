//! In-memory reference backend
//!
//! `MemoryGateway` implements [`PersistenceGateway`] over mutex-held maps.
//! It is the backend the test suite runs against and a usable embedded
//! store for applications that do not need durability.
//!
//! Semantics follow the document-store contract: backend-assigned ids and
//! timestamps, defaults applied on note creation, all-or-nothing batch
//! writes, idempotent deletes.

use crate::gateway::{GatewayError, PersistenceGateway};
use crate::models::{Board, BoardOrder, BoardPatch, GeometryUpdate, Note, NotePatch, Position};
use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct BoardRecord {
    owner_id: String,
    /// Insertion sequence, breaks `order` ties deterministically
    seq: u64,
    board: Board,
}

#[derive(Debug, Clone)]
struct NoteRecord {
    owner_id: String,
    note: Note,
}

#[derive(Debug, Default)]
struct Inner {
    boards: HashMap<String, BoardRecord>,
    notes: HashMap<String, NoteRecord>,
    board_seq: u64,
    /// Highest `order` handed out so far; keeps assignment monotonic even
    /// when two boards are created within the same millisecond
    last_order: i64,
}

/// Mutex-held in-memory document store
#[derive(Debug, Default)]
pub struct MemoryGateway {
    inner: Mutex<Inner>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn list_boards(&self, owner_id: &str) -> Result<Vec<Board>> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<&BoardRecord> = inner
            .boards
            .values()
            .filter(|r| r.owner_id == owner_id)
            .collect();
        records.sort_by_key(|r| (r.board.order, r.seq));
        Ok(records.into_iter().map(|r| r.board.clone()).collect())
    }

    async fn create_board(&self, owner_id: &str, name: &str) -> Result<Board> {
        let mut inner = self.inner.lock().unwrap();
        let order = Utc::now().timestamp_millis().max(inner.last_order + 1);
        inner.last_order = order;

        let board = Board {
            id: Self::next_id(),
            name: name.to_string(),
            order,
            tidy_mode_enabled: false,
            created_at: Utc::now(),
        };
        let seq = inner.board_seq;
        inner.board_seq += 1;
        inner.boards.insert(
            board.id.clone(),
            BoardRecord {
                owner_id: owner_id.to_string(),
                seq,
                board: board.clone(),
            },
        );
        Ok(board)
    }

    async fn update_board(&self, id: &str, patch: BoardPatch) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .boards
            .get_mut(id)
            .ok_or_else(|| GatewayError::not_found(format!("board {id}")))?;
        if let Some(name) = patch.name {
            record.board.name = name;
        }
        if let Some(tidy) = patch.tidy_mode_enabled {
            record.board.tidy_mode_enabled = tidy;
        }
        Ok(())
    }

    async fn delete_board(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.boards.remove(id);
        Ok(())
    }

    async fn reorder_boards(&self, orders: &[BoardOrder]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        // validate the whole batch before touching anything
        for entry in orders {
            if !inner.boards.contains_key(&entry.id) {
                return Err(GatewayError::not_found(format!("board {}", entry.id)).into());
            }
        }
        for entry in orders {
            if let Some(record) = inner.boards.get_mut(&entry.id) {
                record.board.order = entry.order;
            }
        }
        Ok(())
    }

    async fn list_notes(&self, owner_id: &str, board_id: &str) -> Result<Vec<Note>> {
        let inner = self.inner.lock().unwrap();
        let mut notes: Vec<Note> = inner
            .notes
            .values()
            .filter(|r| r.owner_id == owner_id && r.note.board_id == board_id)
            .map(|r| r.note.clone())
            .collect();
        // deterministic result order, oldest first
        notes.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(notes)
    }

    async fn create_note(
        &self,
        owner_id: &str,
        board_id: &str,
        title: &str,
        content: &str,
        position: Position,
        z_index: i64,
    ) -> Result<Note> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.boards.contains_key(board_id) {
            return Err(GatewayError::not_found(format!("board {board_id}")).into());
        }
        let note = Note::new(
            Self::next_id(),
            board_id.to_string(),
            title.to_string(),
            content.to_string(),
            position,
            z_index,
        );
        inner.notes.insert(
            note.id.clone(),
            NoteRecord {
                owner_id: owner_id.to_string(),
                note: note.clone(),
            },
        );
        Ok(note)
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .notes
            .get_mut(id)
            .ok_or_else(|| GatewayError::not_found(format!("note {id}")))?;
        if let Some(title) = patch.title {
            record.note.title = title;
        }
        if let Some(content) = patch.content {
            record.note.content = content;
        }
        if let Some(color) = patch.color {
            record.note.color = color;
        }
        record.note.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.notes.remove(id);
        Ok(())
    }

    async fn batch_update_geometry(&self, updates: &[GeometryUpdate]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        // validate the whole batch before touching anything
        for update in updates {
            if !inner.notes.contains_key(&update.id) {
                return Err(GatewayError::not_found(format!("note {}", update.id)).into());
            }
        }
        let now = Utc::now();
        for update in updates {
            if let Some(record) = inner.notes.get_mut(&update.id) {
                record.note.position = update.position;
                record.note.z_index = update.z_index;
                record.note.rotation = update.rotation;
                record.note.size_category = update.size_category;
                record.note.updated_at = now;
            }
        }
        Ok(())
    }

    async fn move_note(
        &self,
        id: &str,
        dest_board_id: &str,
        position: Option<Position>,
        rotation: Option<f64>,
        z_index: Option<i64>,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.boards.contains_key(dest_board_id) {
            return Err(GatewayError::not_found(format!("board {dest_board_id}")).into());
        }
        let record = inner
            .notes
            .get_mut(id)
            .ok_or_else(|| GatewayError::not_found(format!("note {id}")))?;
        record.note.board_id = dest_board_id.to_string();
        if let Some(position) = position {
            record.note.position = position;
        }
        if let Some(rotation) = rotation {
            record.note.rotation = rotation;
        }
        if let Some(z_index) = z_index {
            record.note.z_index = z_index;
        }
        record.note.updated_at = Utc::now();
        Ok(())
    }

    async fn get_note_by_id(&self, id: &str) -> Result<Note> {
        let inner = self.inner.lock().unwrap();
        inner
            .notes
            .get(id)
            .map(|r| r.note.clone())
            .ok_or_else(|| GatewayError::not_found(format!("note {id}")).into())
    }
}
