//! WebSocket transport
//!
//! Thin integration layer: accepts connections, decodes client messages,
//! forwards them to the session coordinator, and forwards coordinator events
//! back to the client in emission order.

pub mod messages;
mod routes;
mod state;
mod ws;

pub use messages::{ClientMessage, ServerEvent};
pub use routes::create_router;
pub use state::AppState;
