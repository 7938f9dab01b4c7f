//! Note Data Structures
//!
//! This module defines the `Note` struct and the patch/update types the
//! engine exchanges with the persistence gateway.
//!
//! # Architecture
//!
//! - **Board-relative geometry**: `position` is expressed in board canvas
//!   coordinates, non-negative in the canonical model
//! - **Paint order**: `z_index` orders rendering, higher on top; values are
//!   not required to be contiguous
//! - **Opaque content**: `title` and `content` are carried untouched; rich
//!   text authoring is the presentation layer's concern
//!
//! # Examples
//!
//! ```rust
//! use corkboard_core::models::{Note, Position, SizeCategory};
//!
//! let note = Note::new(
//!     "note-1".to_string(),
//!     "board-1".to_string(),
//!     "Shopping".to_string(),
//!     "milk, eggs".to_string(),
//!     Position { x: 40.0, y: 80.0 },
//!     1,
//! );
//! assert_eq!(note.size_category, SizeCategory::Small);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default fill color for freshly created notes
pub const DEFAULT_NOTE_COLOR: &str = "#fff7c0";

/// A point in board canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Discrete note footprint on the board
///
/// Serialized with the single-letter wire tokens the document store uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeCategory {
    #[default]
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

/// A positioned, styled note belonging to exactly one board.
///
/// `id`, `created_at` and `updated_at` are assigned by the persistence
/// backend on creation; the engine treats them as opaque except where an
/// operation explicitly refreshes `updated_at` after a confirmed write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Backend-assigned identifier, stable for the note's lifetime
    pub id: String,

    /// Owning board; exactly one at any instant
    pub board_id: String,

    /// Short label shown on the note face
    pub title: String,

    /// Opaque rich content payload
    pub content: String,

    /// Board-relative canvas position
    pub position: Position,

    /// Fill color token
    pub color: String,

    /// Paint order, higher paints on top
    pub z_index: i64,

    /// Tilt in degrees; boards with tidy mode render this as 0
    pub rotation: f64,

    /// Discrete footprint
    pub size_category: SizeCategory,

    /// Creation timestamp (backend-assigned)
    pub created_at: DateTime<Utc>,

    /// Last confirmed write timestamp
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note with the backend defaults for color, rotation and size
    pub fn new(
        id: String,
        board_id: String,
        title: String,
        content: String,
        position: Position,
        z_index: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            board_id,
            title,
            content,
            position,
            color: DEFAULT_NOTE_COLOR.to_string(),
            z_index,
            rotation: 0.0,
            size_category: SizeCategory::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sparse content-field patch for a note.
///
/// Covers the fields that persist immediately rather than through the dirty
/// set: `title`, `content` and `color`. Geometry travels separately as
/// [`GeometryUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NotePatch {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.color.is_none()
    }
}

/// One element of a batch geometry write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryUpdate {
    pub id: String,
    pub position: Position,
    pub z_index: i64,
    pub rotation: f64,
    pub size_category: SizeCategory,
}

impl GeometryUpdate {
    /// Capture the persistable geometry of a note
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            position: note.position,
            z_index: note.z_index,
            rotation: note.rotation,
            size_category: note.size_category,
        }
    }
}
