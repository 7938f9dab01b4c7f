//! Cross-board note transfer
//!
//! Moves a note to another board in one atomic gateway update, then
//! reconciles the caches on both sides and activates the destination.
//! During the reconciliation window the note is briefly absent from both
//! live caches; it is never duplicated in persisted state because the
//! board reference and geometry are rewritten together by the backend.

use crate::models::Position;
use crate::services::error::StoreError;
use crate::services::spatial_store::SpatialStore;
use rand::Rng;

impl SpatialStore {
    /// Move a note onto `dest_board_id`.
    ///
    /// The drop position is the caller's if supplied, otherwise a random
    /// point inside the configured drop region. The note also receives a
    /// fresh random tilt and the top z-index of the destination board's
    /// cache (an uncached destination counts as empty).
    ///
    /// On success the note leaves the source board's cache and live list,
    /// is refetched by id for the authoritative server-stamped copy,
    /// joins the destination cache, loses any pending dirty mark (its
    /// geometry was just persisted, and resending it would target the old
    /// board), and the destination becomes the active board.
    ///
    /// On failure nothing local is mutated; the persisted state is
    /// equally untouched, so failure is a no-op rather than a half-move.
    /// The authoritative refetch does mean a drag racing its own
    /// transfer can be overwritten by the fetched copy; the presentation
    /// layer must disable drag on a note while its transfer is in flight.
    pub async fn move_note_to_board(
        &mut self,
        note_id: &str,
        dest_board_id: &str,
        position: Option<Position>,
    ) -> Result<(), StoreError> {
        let position = position.unwrap_or_else(|| Position {
            x: self.rng.gen::<f64>() * self.config.drop_region.width,
            y: self.rng.gen::<f64>() * self.config.drop_region.height,
        });
        let rotation = (self.rng.gen::<f64>() * 2.0 - 1.0) * self.config.max_transfer_tilt;
        let dest_top_z = self
            .board_cache
            .get(dest_board_id)
            .map(|notes| notes.iter().map(|n| n.z_index).fold(0, i64::max))
            .unwrap_or(0);

        self.begin();
        if let Err(e) = self
            .gateway
            .move_note(
                note_id,
                dest_board_id,
                Some(position),
                Some(rotation),
                Some(dest_top_z + 1),
            )
            .await
        {
            return self.fail(StoreError::transfer_failed(note_id, e));
        }

        // drop the note from the source side
        if let Some(source_id) = self.active_board_id.clone() {
            if let Some(cached) = self.board_cache.get_mut(&source_id) {
                cached.retain(|n| n.id != note_id);
            }
        }
        self.notes.retain(|n| n.id != note_id);
        self.dirty_note_ids.remove(note_id);

        // authoritative copy; guards fields the engine does not track
        let fetched = match self.gateway.get_note_by_id(note_id).await {
            Ok(note) => note,
            Err(e) => return self.fail(StoreError::transfer_failed(note_id, e)),
        };

        tracing::info!(note_id, dest_board_id, "moved note across boards");
        let cached = self.board_cache.entry(dest_board_id.to_string()).or_default();
        cached.push(fetched);
        self.notes = cached.clone();
        self.active_board_id = Some(dest_board_id.to_string());
        self.finish();
        Ok(())
    }
}
