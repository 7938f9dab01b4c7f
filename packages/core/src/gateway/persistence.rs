//! PersistenceGateway Trait - Document Store Abstraction
//!
//! This module defines the `PersistenceGateway` trait that abstracts the
//! document store backing the spatial engine. The trait is the engine's
//! only suspension point: every other operation is synchronous with
//! respect to the caller's event loop.
//!
//! # Architecture
//!
//! - **Abstraction point**: between `SpatialStore` (session state and
//!   mutation policy) and whatever document store an application wires in
//! - **Async-first**: all methods are async so embedded and network
//!   backends share one contract
//! - **Error handling**: `anyhow::Result` for flexible error context;
//!   the engine maps failures into its own typed error at the call site
//!
//! # Atomicity requirements
//!
//! The engine leans on two backend guarantees and adds no transactions of
//! its own:
//!
//! - `batch_update_geometry` and `reorder_boards` are all-or-nothing
//! - `move_note` rewrites the board reference and the geometry fields in
//!   one atomic document update
//!
//! # Examples
//!
//! ```rust,no_run
//! use corkboard_core::gateway::{MemoryGateway, PersistenceGateway};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let gateway: Arc<dyn PersistenceGateway> = Arc::new(MemoryGateway::new());
//! let board = gateway.create_board("user-1", "Ideas").await?;
//! let boards = gateway.list_boards("user-1").await?;
//! assert_eq!(boards[0].id, board.id);
//! # Ok(())
//! # }
//! ```

use crate::models::{Board, BoardOrder, BoardPatch, GeometryUpdate, Note, NotePatch, Position};
use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over the document store holding boards and notes.
///
/// Implementations must be `Send + Sync`; the store holds one behind an
/// `Arc<dyn PersistenceGateway>`.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    //
    // BOARD OPERATIONS
    //

    /// Fetch all boards owned by `owner_id`, sorted by `order` ascending.
    /// Ties keep insertion order.
    async fn list_boards(&self, owner_id: &str) -> Result<Vec<Board>>;

    /// Create a board.
    ///
    /// The backend assigns the id, a monotonically increasing
    /// timestamp-derived `order`, `tidy_mode_enabled = false` and the
    /// creation timestamp.
    async fn create_board(&self, owner_id: &str, name: &str) -> Result<Board>;

    /// Apply a sparse metadata patch to a board.
    ///
    /// # Errors
    ///
    /// Fails when the board does not exist.
    async fn update_board(&self, id: &str, patch: BoardPatch) -> Result<()>;

    /// Delete a board document. Deleting an absent board succeeds
    /// (idempotent delete). Notes are never cascade-deleted.
    async fn delete_board(&self, id: &str) -> Result<()>;

    /// Batch-write new `order` values. All-or-nothing: either every listed
    /// board is reordered or none is.
    async fn reorder_boards(&self, orders: &[BoardOrder]) -> Result<()>;

    //
    // NOTE OPERATIONS
    //

    /// Fetch all notes of one board for one owner.
    async fn list_notes(&self, owner_id: &str, board_id: &str) -> Result<Vec<Note>>;

    /// Create a note on `board_id` with the provided provisional geometry.
    ///
    /// The backend assigns the id and timestamps and applies the default
    /// color, rotation and size category.
    ///
    /// # Errors
    ///
    /// Fails when the target board does not exist.
    async fn create_note(
        &self,
        owner_id: &str,
        board_id: &str,
        title: &str,
        content: &str,
        position: Position,
        z_index: i64,
    ) -> Result<Note>;

    /// Apply a sparse content patch (title/content/color) and refresh the
    /// note's update timestamp.
    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<()>;

    /// Delete a note document. Deleting an absent note succeeds.
    async fn delete_note(&self, id: &str) -> Result<()>;

    /// Batch-write geometry for several notes. All-or-nothing.
    async fn batch_update_geometry(&self, updates: &[GeometryUpdate]) -> Result<()>;

    /// Atomically rewrite a note's board reference together with any of the
    /// supplied geometry fields.
    ///
    /// # Errors
    ///
    /// Fails when the note or the destination board does not exist.
    async fn move_note(
        &self,
        id: &str,
        dest_board_id: &str,
        position: Option<Position>,
        rotation: Option<f64>,
        z_index: Option<i64>,
    ) -> Result<()>;

    /// Fetch a single note by id.
    ///
    /// # Errors
    ///
    /// Fails when the note does not exist.
    async fn get_note_by_id(&self, id: &str) -> Result<Note>;
}
