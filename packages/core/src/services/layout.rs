//! Layout Algorithms
//!
//! Board-wide placement procedures over the active board's notes:
//!
//! - **Grid**: deterministic row/column placement from the viewport width
//! - **Shuffle**: rejection-sampled random placement that avoids overlap
//!   on a best-effort basis
//!
//! Z-order renormalization, the third board-wide procedure, lives with
//! bring-to-front in the store since it only ever runs as its side effect.

use crate::geometry::{self, Rect, Size};
use crate::models::Position;
use crate::services::spatial_store::SpatialStore;
use rand::Rng;

/// Tunables for placement, paint order and transfer geometry.
///
/// The defaults mirror the note footprint and spacing the presentation
/// layer renders with; applications with different note chrome inject
/// their own values through [`SpatialStore::with_config`].
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Rendered note footprint, in canvas units
    pub note_size: Size,
    /// Gap between grid cells
    pub grid_spacing: f64,
    /// Top margin above the first grid row
    pub grid_top_margin: f64,
    /// Bring-to-front renormalizes once a z-index would reach this value
    pub z_index_ceiling: i64,
    /// Random draws per note before shuffle placement gives up on
    /// avoiding overlap
    pub shuffle_attempts: u32,
    /// Maximum tilt magnitude handed out by shuffle, in degrees
    pub max_tilt: f64,
    /// Maximum tilt magnitude handed out by a cross-board transfer
    pub max_transfer_tilt: f64,
    /// Edge length of the square spawn region for new notes
    pub spawn_range: f64,
    /// Region a transferred note lands in when the caller supplies no
    /// drop position
    pub drop_region: Size,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            note_size: Size::new(200.0, 200.0),
            grid_spacing: 20.0,
            grid_top_margin: 20.0,
            z_index_ceiling: 100,
            shuffle_attempts: 100,
            max_tilt: 5.0,
            max_transfer_tilt: 5.0,
            spawn_range: 100.0,
            drop_region: Size::new(240.0, 400.0),
        }
    }
}

impl SpatialStore {
    /// Compute grid placements for the loaded notes.
    ///
    /// Column count follows the viewport width; notes fill rows in index
    /// order. Deterministic given (note order, viewport width), so the
    /// presentation layer recomputes whenever either changes. Nothing is
    /// mutated and nothing is marked dirty; the grid is an overlay the
    /// consumer renders, matching tidy mode's read-only character.
    pub fn grid_positions(&self, viewport_width: f64) -> Vec<(String, Position)> {
        let note = self.config.note_size;
        let spacing = self.config.grid_spacing;
        let columns = (((viewport_width - spacing) / (note.width + spacing)).floor() as i64)
            .max(1) as usize;

        self.notes
            .iter()
            .enumerate()
            .map(|(index, n)| {
                let row = index / columns;
                let col = index % columns;
                let position = Position {
                    x: col as f64 * (note.width + spacing) + spacing,
                    y: row as f64 * (note.height + spacing) + self.config.grid_top_margin,
                };
                (n.id.clone(), position)
            })
            .collect()
    }

    /// Scatter the loaded notes across `viewport` without overlap, best
    /// effort.
    ///
    /// Each note gets up to the configured number of random draws; the
    /// first draw whose bounding box clears every note already placed in
    /// this pass wins. A note that exhausts its draws keeps the last
    /// candidate even if it overlaps; with a crowded viewport that is the
    /// documented fallback, not a broken invariant. Every note also
    /// receives a fresh random tilt and is marked dirty, so the new
    /// scatter persists on the next `save_positions`.
    pub fn shuffle_notes(&mut self, viewport: Size) {
        let extent = self.config.note_size;
        let attempts = self.config.shuffle_attempts;
        let max_tilt = self.config.max_tilt;

        let mut placed: Vec<Rect> = Vec::with_capacity(self.notes.len());
        let mut placements: Vec<(Position, f64)> = Vec::with_capacity(self.notes.len());
        for _ in 0..self.notes.len() {
            let (position, _fit) = geometry::sample_non_overlapping(
                &mut self.rng,
                viewport,
                extent,
                &placed,
                attempts,
            );
            placed.push(Rect::at(position, extent));
            let rotation = (self.rng.gen::<f64>() * 2.0 - 1.0) * max_tilt;
            placements.push((position, rotation));
        }

        for (note, (position, rotation)) in self.notes.iter_mut().zip(placements) {
            note.position = position;
            note.rotation = rotation;
            self.dirty_note_ids.insert(note.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_rendered_note_chrome() {
        let config = LayoutConfig::default();
        assert_eq!(config.note_size, Size::new(200.0, 200.0));
        assert_eq!(config.z_index_ceiling, 100);
        assert_eq!(config.shuffle_attempts, 100);
    }
}
