//! Data structures shared across the engine

mod board;
mod note;

pub use board::{Board, BoardOrder, BoardPatch};
pub use note::{GeometryUpdate, Note, NotePatch, Position, SizeCategory, DEFAULT_NOTE_COLOR};
