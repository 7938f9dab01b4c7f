//! Spatial Store - Session State and Mutation Policy
//!
//! This module provides the authoritative in-memory model of boards and
//! notes and mediates every mutation:
//!
//! - Board CRUD, reorder and activation
//! - Note CRUD with cached per-board loads
//! - Optimistic geometry mutation with dirty tracking
//! - Explicit batch flush of unsaved geometry
//!
//! # Design
//!
//! Geometry changes arrive at pointer-move frequency and must apply
//! instantly, so position/rotation/size mutations are synchronous and
//! local-only: each one patches the in-memory note and records its id in
//! the dirty set. [`SpatialStore::save_positions`] is the single path that
//! persists geometry, as one all-or-nothing batch write. Content-field
//! edits (title, content, color) take the opposite route and persist
//! before the local patch.
//!
//! The store is an explicitly constructed object owned by the application
//! root and passed to the presentation layer; there are no ambient
//! singletons. Methods take `&mut self`: a single cooperative writer, so
//! two mutations issued in sequence always apply in that sequence and the
//! only suspension points are gateway calls.
//!
//! # Failure surface
//!
//! Persistence-touching operations return a typed [`StoreError`] and
//! mirror the message into `last_error`; `is_busy` is cleared on both
//! paths. Local-only geometry mutations never fail (an unknown id is a
//! silent no-op).

use crate::gateway::PersistenceGateway;
use crate::models::{
    Board, BoardOrder, BoardPatch, GeometryUpdate, Note, NotePatch, Position, SizeCategory,
};
use crate::services::error::StoreError;
use crate::services::layout::LayoutConfig;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Authoritative session state for boards and notes.
///
/// Owns the board list, the notes of the active board, a lazily populated
/// per-board cache, and the set of note ids with unsaved geometry.
///
/// # Examples
///
/// ```rust,no_run
/// use corkboard_core::gateway::MemoryGateway;
/// use corkboard_core::services::SpatialStore;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), corkboard_core::services::StoreError> {
/// let mut store = SpatialStore::new(Arc::new(MemoryGateway::new()));
/// store.load_boards("user-1").await?;
/// # Ok(())
/// # }
/// ```
pub struct SpatialStore {
    pub(crate) gateway: Arc<dyn PersistenceGateway>,
    pub(crate) config: LayoutConfig,
    pub(crate) rng: StdRng,

    pub(crate) boards: Vec<Board>,
    /// Notes of the active board only
    pub(crate) notes: Vec<Note>,
    /// Lazily populated board id -> notes cache; invalidated only by a
    /// forced reload or an operation that rewrites the entry itself
    pub(crate) board_cache: HashMap<String, Vec<Note>>,
    /// Note ids with locally mutated geometry not yet flushed
    pub(crate) dirty_note_ids: HashSet<String>,

    pub(crate) active_board_id: Option<String>,
    pub(crate) is_busy: bool,
    pub(crate) last_error: Option<String>,
}

impl SpatialStore {
    /// Create a store over `gateway` with the default layout tunables
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self::with_config(gateway, LayoutConfig::default())
    }

    /// Create a store with explicit layout tunables
    pub fn with_config(gateway: Arc<dyn PersistenceGateway>, config: LayoutConfig) -> Self {
        Self {
            gateway,
            config,
            rng: StdRng::from_entropy(),
            boards: Vec::new(),
            notes: Vec::new(),
            board_cache: HashMap::new(),
            dirty_note_ids: HashSet::new(),
            active_board_id: None,
            is_busy: false,
            last_error: None,
        }
    }

    /// Reseed the internal RNG. Placement and rotation draws become
    /// deterministic, which test code relies on.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    //
    // ACCESSORS
    //

    /// Boards sorted by display order
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Notes of the active board
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a loaded note by id
    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == note_id)
    }

    /// Currently active board id, if any
    pub fn active_board_id(&self) -> Option<&str> {
        self.active_board_id.as_deref()
    }

    /// The active board's record, if the id resolves
    pub fn active_board(&self) -> Option<&Board> {
        let id = self.active_board_id.as_deref()?;
        self.boards.iter().find(|b| b.id == id)
    }

    /// True while a gateway call is in flight
    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    /// Human-readable message of the most recent failure
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True when any note carries unsaved geometry
    pub fn has_unsaved_changes(&self) -> bool {
        !self.dirty_note_ids.is_empty()
    }

    /// True when `note_id` carries unsaved geometry
    pub fn is_dirty(&self, note_id: &str) -> bool {
        self.dirty_note_ids.contains(note_id)
    }

    /// Cached notes for a board, without touching the gateway
    pub fn cached_notes(&self, board_id: &str) -> Option<&[Note]> {
        self.board_cache.get(board_id).map(|v| v.as_slice())
    }

    //
    // BOARD OPERATIONS
    //

    /// Fetch all boards for `owner_id` and replace the board list, sorted
    /// by `order` ascending (ties keep fetch order).
    ///
    /// On failure the prior board list is left intact.
    pub async fn load_boards(&mut self, owner_id: &str) -> Result<(), StoreError> {
        self.begin();
        match self.gateway.list_boards(owner_id).await {
            Ok(mut boards) => {
                boards.sort_by_key(|b| b.order);
                tracing::debug!(count = boards.len(), "loaded boards");
                self.boards = boards;
                self.finish();
                Ok(())
            }
            Err(e) => self.fail(StoreError::load_failed("boards", e)),
        }
    }

    /// Persist a new board and append it to the local list on success.
    ///
    /// The backend assigns the initial `order` (timestamp-derived and
    /// monotonically increasing) so a new board lands at the end.
    pub async fn create_board(&mut self, owner_id: &str, name: &str) -> Result<Board, StoreError> {
        self.begin();
        match self.gateway.create_board(owner_id, name).await {
            Ok(board) => {
                self.boards.push(board.clone());
                self.finish();
                Ok(board)
            }
            Err(e) => self.fail(StoreError::write_failed("board", e)),
        }
    }

    /// Persist a rename, then patch the matching board in place
    pub async fn rename_board(&mut self, board_id: &str, name: &str) -> Result<(), StoreError> {
        let patch = BoardPatch {
            name: Some(name.to_string()),
            ..Default::default()
        };
        self.begin();
        match self.gateway.update_board(board_id, patch).await {
            Ok(()) => {
                if let Some(board) = self.boards.iter_mut().find(|b| b.id == board_id) {
                    board.name = name.to_string();
                }
                self.finish();
                Ok(())
            }
            Err(e) => self.fail(StoreError::write_failed(format!("board {board_id}"), e)),
        }
    }

    /// Persist the tidy-mode flag, then patch the matching board in place.
    ///
    /// Tidy mode is a presentation override (notes render at rotation 0);
    /// stored rotations are untouched.
    pub async fn set_tidy_mode(&mut self, board_id: &str, enabled: bool) -> Result<(), StoreError> {
        let patch = BoardPatch {
            tidy_mode_enabled: Some(enabled),
            ..Default::default()
        };
        self.begin();
        match self.gateway.update_board(board_id, patch).await {
            Ok(()) => {
                if let Some(board) = self.boards.iter_mut().find(|b| b.id == board_id) {
                    board.tidy_mode_enabled = enabled;
                }
                self.finish();
                Ok(())
            }
            Err(e) => self.fail(StoreError::write_failed(format!("board {board_id}"), e)),
        }
    }

    /// Replace the board list with `new_order` immediately, then persist
    /// positional `order` values as one batch.
    ///
    /// Optimistic by design: the local list is already swapped when the
    /// write goes out, and a failed write is surfaced only through the log
    /// and `last_error`. There is no rollback; the next `load_boards`
    /// resyncs from persisted state.
    pub async fn reorder_boards(&mut self, new_order: Vec<Board>) {
        self.boards = new_order;
        let orders: Vec<BoardOrder> = self
            .boards
            .iter()
            .enumerate()
            .map(|(index, board)| BoardOrder {
                id: board.id.clone(),
                order: index as i64,
            })
            .collect();
        if let Err(e) = self.gateway.reorder_boards(&orders).await {
            tracing::warn!("board reorder was not persisted: {e:#}");
            self.last_error = Some(format!("Failed to reorder boards: {e}"));
        }
    }

    /// Persist a board deletion and remove it locally.
    ///
    /// Callers must have verified the board holds no notes; the engine
    /// performs no emptiness re-check and never cascade-deletes. If the
    /// deleted board was active, the active board id is cleared. Any cache
    /// entry for the board is dropped.
    pub async fn delete_board(&mut self, board_id: &str) -> Result<(), StoreError> {
        self.begin();
        match self.gateway.delete_board(board_id).await {
            Ok(()) => {
                self.boards.retain(|b| b.id != board_id);
                self.board_cache.remove(board_id);
                if self.active_board_id.as_deref() == Some(board_id) {
                    self.active_board_id = None;
                }
                self.finish();
                Ok(())
            }
            Err(e) => self.fail(StoreError::write_failed(format!("board {board_id}"), e)),
        }
    }

    /// Mark a board active. Pure local state change: loading its notes is
    /// a separate, explicit `load_notes` call so activation and fetching
    /// stay decoupled.
    pub fn set_active_board(&mut self, board_id: &str) {
        self.active_board_id = Some(board_id.to_string());
    }

    //
    // NOTE OPERATIONS
    //

    /// Load the notes of `board_id` into the live list.
    ///
    /// With `force_refresh = false` a cached board is served synchronously
    /// with no gateway call. The cache is never revalidated on its own:
    /// out-of-band mutations to a cached board stay invisible until a
    /// forced refresh.
    pub async fn load_notes(
        &mut self,
        owner_id: &str,
        board_id: &str,
        force_refresh: bool,
    ) -> Result<(), StoreError> {
        if !force_refresh {
            if let Some(cached) = self.board_cache.get(board_id) {
                self.notes = cached.clone();
                self.is_busy = false;
                return Ok(());
            }
        }
        self.begin();
        match self.gateway.list_notes(owner_id, board_id).await {
            Ok(notes) => {
                tracing::debug!(board_id, count = notes.len(), "loaded notes");
                self.board_cache.insert(board_id.to_string(), notes.clone());
                self.notes = notes;
                self.finish();
                Ok(())
            }
            Err(e) => self.fail(StoreError::load_failed("notes", e)),
        }
    }

    /// Create a note on the active board.
    ///
    /// The note receives the next z-index above the board's current
    /// maximum and a provisional pseudo-random position inside the default
    /// spawn range; the persisted, id-bearing note is appended to the live
    /// list and the board cache.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation` when no board is active; otherwise a
    /// `WriteFailed` wrapping the gateway failure.
    pub async fn create_note(
        &mut self,
        owner_id: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError> {
        let board_id = match &self.active_board_id {
            Some(id) => id.clone(),
            None => return Err(StoreError::precondition("no active board")),
        };

        let z_index = self.max_z_index() + 1;
        let position = Position {
            x: self.rng.gen::<f64>() * self.config.spawn_range,
            y: self.rng.gen::<f64>() * self.config.spawn_range,
        };

        self.begin();
        match self
            .gateway
            .create_note(owner_id, &board_id, title, content, position, z_index)
            .await
        {
            Ok(note) => {
                tracing::debug!(note_id = %note.id, board_id = %board_id, "created note");
                self.notes.push(note.clone());
                self.board_cache.insert(board_id, self.notes.clone());
                self.finish();
                Ok(note)
            }
            Err(e) => self.fail(StoreError::write_failed("note", e)),
        }
    }

    /// Persist a content-field patch (title/content/color), then apply it
    /// to the local copy and refresh its update timestamp.
    ///
    /// Content edits are not buffered like geometry: they hit persistence
    /// immediately and the local patch happens only on success.
    pub async fn update_note(
        &mut self,
        note_id: &str,
        patch: NotePatch,
    ) -> Result<(), StoreError> {
        self.begin();
        match self.gateway.update_note(note_id, patch.clone()).await {
            Ok(()) => {
                if let Some(note) = self.notes.iter_mut().find(|n| n.id == note_id) {
                    if let Some(title) = patch.title {
                        note.title = title;
                    }
                    if let Some(content) = patch.content {
                        note.content = content;
                    }
                    if let Some(color) = patch.color {
                        note.color = color;
                    }
                    note.updated_at = Utc::now();
                }
                self.sync_active_cache();
                self.finish();
                Ok(())
            }
            Err(e) => self.fail(StoreError::write_failed(format!("note {note_id}"), e)),
        }
    }

    /// Persist a note deletion, then drop it from the live list, the board
    /// cache and the dirty set.
    pub async fn delete_note(&mut self, note_id: &str) -> Result<(), StoreError> {
        self.begin();
        match self.gateway.delete_note(note_id).await {
            Ok(()) => {
                self.notes.retain(|n| n.id != note_id);
                self.dirty_note_ids.remove(note_id);
                self.sync_active_cache();
                self.finish();
                Ok(())
            }
            Err(e) => self.fail(StoreError::write_failed(format!("note {note_id}"), e)),
        }
    }

    //
    // OPTIMISTIC GEOMETRY MUTATION (local-only, flushed by save_positions)
    //

    /// Move a note and bring it to the front.
    ///
    /// Local-only and synchronous. The note gets `max(z) + 1`; when that
    /// value reaches the ceiling, every z-index of the board is
    /// renormalized to a dense `1..N` preserving relative paint order, so
    /// repeated dragging cannot grow z-indices without bound.
    pub fn update_note_position(&mut self, note_id: &str, position: Position) {
        if !self.notes.iter().any(|n| n.id == note_id) {
            return;
        }
        self.dirty_note_ids.insert(note_id.to_string());

        let new_z = self.max_z_index() + 1;
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == note_id) {
            note.position = position;
            note.z_index = new_z;
        }
        if new_z >= self.config.z_index_ceiling {
            self.renormalize_z_order();
        }
    }

    /// Set a note's tilt. Local-only and synchronous.
    pub fn update_note_rotation(&mut self, note_id: &str, rotation: f64) {
        if !self.notes.iter().any(|n| n.id == note_id) {
            return;
        }
        self.dirty_note_ids.insert(note_id.to_string());
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == note_id) {
            note.rotation = rotation;
        }
    }

    /// Set a note's size category. Local-only and synchronous.
    pub fn update_note_size(&mut self, note_id: &str, size: SizeCategory) {
        if !self.notes.iter().any(|n| n.id == note_id) {
            return;
        }
        self.dirty_note_ids.insert(note_id.to_string());
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == note_id) {
            note.size_category = size;
        }
    }

    /// Flush unsaved geometry as one batch write.
    ///
    /// No-op when the dirty set is empty. On success the entire dirty set
    /// is cleared, not just the ids captured at call time: values are read
    /// synchronously here, so a mutation that lands mid-flight was already
    /// captured, and one landing after the clear stays dirty. The one real
    /// hazard is a second `save_positions` racing the first on the same
    /// ids; callers must serialize saves (e.g. disable the save affordance
    /// while one is in flight).
    ///
    /// On failure the dirty set is untouched so a retry resends the same
    /// payload.
    pub async fn save_positions(&mut self) -> Result<(), StoreError> {
        let updates: Vec<GeometryUpdate> = self
            .notes
            .iter()
            .filter(|n| self.dirty_note_ids.contains(&n.id))
            .map(GeometryUpdate::from_note)
            .collect();
        if updates.is_empty() {
            return Ok(());
        }

        self.begin();
        match self.gateway.batch_update_geometry(&updates).await {
            Ok(()) => {
                tracing::debug!(count = updates.len(), "saved note layout");
                self.sync_active_cache();
                self.dirty_note_ids.clear();
                self.finish();
                Ok(())
            }
            Err(e) => self.fail(StoreError::BatchSaveFailed(e)),
        }
    }

    //
    // INTERNALS
    //

    pub(crate) fn begin(&mut self) {
        self.is_busy = true;
        self.last_error = None;
    }

    pub(crate) fn finish(&mut self) {
        self.is_busy = false;
    }

    /// Record a failure in `last_error`, drop the busy flag and return it
    pub(crate) fn fail<T>(&mut self, error: StoreError) -> Result<T, StoreError> {
        tracing::warn!("{error}");
        self.last_error = Some(error.to_string());
        self.is_busy = false;
        Err(error)
    }

    /// Highest z-index among loaded notes, floored at 0
    pub(crate) fn max_z_index(&self) -> i64 {
        self.notes.iter().map(|n| n.z_index).fold(0, i64::max)
    }

    /// Mirror the live note list into the active board's cache entry
    pub(crate) fn sync_active_cache(&mut self) {
        if let Some(board_id) = &self.active_board_id {
            self.board_cache.insert(board_id.clone(), self.notes.clone());
        }
    }

    /// Reassign dense z-indices `1..N` in current paint order.
    ///
    /// Only the in-memory model changes; notes not already dirty are not
    /// marked, so their compacted z-indices persist only when some later
    /// mutation dirties them.
    fn renormalize_z_order(&mut self) {
        let mut order: Vec<usize> = (0..self.notes.len()).collect();
        order.sort_by_key(|&i| self.notes[i].z_index);
        for (rank, index) in order.into_iter().enumerate() {
            self.notes[index].z_index = rank as i64 + 1;
        }
    }
}
