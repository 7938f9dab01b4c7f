//! Corkboard Spatial Engine
//!
//! This crate owns the authoritative in-memory model of notes and boards
//! for a corkboard-style notes application: notes are pinned to named
//! boards, dragged into arbitrary positions, resized, tilted and moved
//! between boards. The engine mediates every mutation, decides what is
//! persisted and when, and protects the invariants that make the model
//! subtle: z-order consistency, dirty-versus-saved divergence,
//! cross-board transfer atomicity and non-overlapping placement.
//!
//! # Architecture
//!
//! - **Optimistic geometry, deferred persistence**: drag-frequency
//!   mutations apply synchronously in memory and are flushed later as one
//!   explicit batch
//! - **Gateway abstraction**: persistence is an async trait; the engine
//!   never talks to a concrete store
//! - **Single cooperative writer**: store methods take `&mut self`, so
//!   mutations never interleave and gateway calls are the only
//!   suspension points
//!
//! # Modules
//!
//! - [`models`] - data structures (Note, Board, patches)
//! - [`geometry`] - pure point/rectangle utilities
//! - [`gateway`] - persistence trait, error type and in-memory backend
//! - [`services`] - the spatial store, transfer protocol and layout
//!   algorithms
//! - [`telemetry`] - tracing subscriber setup for hosts

pub mod gateway;
pub mod geometry;
pub mod models;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use gateway::{GatewayError, MemoryGateway, PersistenceGateway};
pub use models::{Board, BoardOrder, BoardPatch, GeometryUpdate, Note, NotePatch, Position, SizeCategory};
pub use services::{LayoutConfig, SpatialStore, StoreError};
