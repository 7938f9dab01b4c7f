//! Persistence Layer
//!
//! This module abstracts the document store behind the engine:
//!
//! - [`PersistenceGateway`] - the async trait every backend implements
//! - [`MemoryGateway`] - bundled in-memory reference backend
//! - [`GatewayError`] - backend error vocabulary
//!
//! The engine never reaches the store directly; all persistence flows
//! through the trait so applications can wire in any document store that
//! honors the contract's atomicity requirements.

mod error;
mod memory;
mod persistence;

pub use error::GatewayError;
pub use memory::MemoryGateway;
pub use persistence::PersistenceGateway;
