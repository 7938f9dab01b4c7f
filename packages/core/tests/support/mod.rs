//! Shared helpers for the integration suite
#![allow(dead_code)]

use anyhow::Result;
use corkboard_core::gateway::{MemoryGateway, PersistenceGateway};
use corkboard_core::models::{
    Board, BoardOrder, BoardPatch, GeometryUpdate, Note, NotePatch, Position,
};
use corkboard_core::services::SpatialStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const OWNER: &str = "user-1";

/// Store over a plain in-memory backend, RNG seeded for determinism
pub fn seeded_store() -> (SpatialStore, Arc<MemoryGateway>) {
    corkboard_core::telemetry::init_tracing();
    let gateway = Arc::new(MemoryGateway::new());
    let mut store = SpatialStore::new(gateway.clone());
    store.seed_rng(7);
    (store, gateway)
}

/// In-memory backend with per-method failure injection and write counters.
///
/// `fail_on("batch_update_geometry")` makes every call to that method fail
/// until `clear_failure()`; the inner state is untouched by failed calls.
pub struct FlakyGateway {
    inner: MemoryGateway,
    fail_on: Mutex<Option<&'static str>>,
    batch_writes: AtomicUsize,
    reorder_writes: AtomicUsize,
}

impl FlakyGateway {
    pub fn new() -> Self {
        Self {
            inner: MemoryGateway::new(),
            fail_on: Mutex::new(None),
            batch_writes: AtomicUsize::new(0),
            reorder_writes: AtomicUsize::new(0),
        }
    }

    pub fn fail_on(&self, method: &'static str) {
        *self.fail_on.lock().unwrap() = Some(method);
    }

    pub fn clear_failure(&self) {
        *self.fail_on.lock().unwrap() = None;
    }

    /// Confirmed batch geometry writes
    pub fn batch_writes(&self) -> usize {
        self.batch_writes.load(Ordering::SeqCst)
    }

    /// Confirmed board reorder writes
    pub fn reorder_writes(&self) -> usize {
        self.reorder_writes.load(Ordering::SeqCst)
    }

    fn trip(&self, method: &'static str) -> Result<()> {
        if self.fail_on.lock().unwrap().as_deref() == Some(method) {
            anyhow::bail!("injected {method} failure");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for FlakyGateway {
    async fn list_boards(&self, owner_id: &str) -> Result<Vec<Board>> {
        self.trip("list_boards")?;
        self.inner.list_boards(owner_id).await
    }

    async fn create_board(&self, owner_id: &str, name: &str) -> Result<Board> {
        self.trip("create_board")?;
        self.inner.create_board(owner_id, name).await
    }

    async fn update_board(&self, id: &str, patch: BoardPatch) -> Result<()> {
        self.trip("update_board")?;
        self.inner.update_board(id, patch).await
    }

    async fn delete_board(&self, id: &str) -> Result<()> {
        self.trip("delete_board")?;
        self.inner.delete_board(id).await
    }

    async fn reorder_boards(&self, orders: &[BoardOrder]) -> Result<()> {
        self.trip("reorder_boards")?;
        self.inner.reorder_boards(orders).await?;
        self.reorder_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_notes(&self, owner_id: &str, board_id: &str) -> Result<Vec<Note>> {
        self.trip("list_notes")?;
        self.inner.list_notes(owner_id, board_id).await
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
        self.trip("create_note")?;
        self.inner
            .create_note(owner_id, board_id, title, content, position, z_index)
            .await
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<()> {
        self.trip("update_note")?;
        self.inner.update_note(id, patch).await
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        self.trip("delete_note")?;
        self.inner.delete_note(id).await
    }

    async fn batch_update_geometry(&self, updates: &[GeometryUpdate]) -> Result<()> {
        self.trip("batch_update_geometry")?;
        self.inner.batch_update_geometry(updates).await?;
        self.batch_writes.fetch_add(1, Ordering::SeqCst);
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
        self.trip("move_note")?;
        self.inner
            .move_note(id, dest_board_id, position, rotation, z_index)
            .await
    }

    async fn get_note_by_id(&self, id: &str) -> Result<Note> {
        self.trip("get_note_by_id")?;
        self.inner.get_note_by_id(id).await
    }
}

/// Store over a flaky backend, RNG seeded for determinism
pub fn flaky_store() -> (SpatialStore, Arc<FlakyGateway>) {
    corkboard_core::telemetry::init_tracing();
    let gateway = Arc::new(FlakyGateway::new());
    let mut store = SpatialStore::new(gateway.clone());
    store.seed_rng(7);
    (store, gateway)
}

/// Create a board, activate it and load its (empty) note list
pub async fn board_with_store(store: &mut SpatialStore, name: &str) -> Board {
    let board = store.create_board(OWNER, name).await.expect("create board");
    store.set_active_board(&board.id);
    store
        .load_notes(OWNER, &board.id, false)
        .await
        .expect("load notes");
    board
}
