//! Engine Services
//!
//! The spatial store and its sub-procedures:
//!
//! - [`SpatialStore`] - session state, board/note CRUD, dirty tracking
//! - transfer protocol (`SpatialStore::move_note_to_board`)
//! - layout algorithms (`grid_positions`, `shuffle_notes`) and
//!   [`LayoutConfig`]
//! - [`StoreError`] - typed operation failures

mod error;
mod layout;
mod spatial_store;
mod transfer;

pub use error::StoreError;
pub use layout::LayoutConfig;
pub use spatial_store::SpatialStore;
