//! Board Data Structures
//!
//! A board is a named partition of notes. Boards carry a numeric `order`
//! whose relative ordering is the only meaningful signal; values are not
//! required to be contiguous and ties resolve to original load order.

use crate::models::Note;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named partition of notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Backend-assigned identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Sort key for display order; relative ordering only
    pub order: i64,

    /// Presentation override: render every note at rotation 0.
    /// Stored rotations are untouched while this is on.
    pub tidy_mode_enabled: bool,

    /// Creation timestamp (backend-assigned)
    pub created_at: DateTime<Utc>,
}

impl Board {
    /// Rotation a consumer should render for `note` on this board.
    ///
    /// Tidy mode suppresses the stored tilt without mutating it.
    pub fn effective_rotation(&self, note: &Note) -> f64 {
        if self.tidy_mode_enabled {
            0.0
        } else {
            note.rotation
        }
    }
}

/// Sparse patch for board metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tidy_mode_enabled: Option<bool>,
}

/// One element of a batch board reorder write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardOrder {
    pub id: String,
    pub order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn board(tidy: bool) -> Board {
        Board {
            id: "b1".to_string(),
            name: "Ideas".to_string(),
            order: 0,
            tidy_mode_enabled: tidy,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_rotation_respects_tidy_mode() {
        let mut note = Note::new(
            "n1".to_string(),
            "b1".to_string(),
            String::new(),
            String::new(),
            Position::default(),
            1,
        );
        note.rotation = -3.5;

        assert_eq!(board(false).effective_rotation(&note), -3.5);
        assert_eq!(board(true).effective_rotation(&note), 0.0);
        // stored rotation is never mutated
        assert_eq!(note.rotation, -3.5);
    }
}
