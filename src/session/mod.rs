//! Listening session coordination
//!
//! This module provides the `SessionCoordinator` abstraction that manages:
//! - The per-connection `listening` flag and worker `generation` counter
//! - The voice worker loop (blocking capture, routing, reply, speech)
//! - Ordered event emission toward the transport
//! - Cooperative cancellation and disconnect cleanup

mod config;
mod session;

pub use config::SessionConfig;
pub use session::SessionCoordinator;
