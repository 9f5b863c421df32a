//! Transport Client
//!
//! Issues the network exchange for one chat message. Every failure is
//! normalized into a fixed fallback reply, so callers never see an error.
//!
//! # Available Transports
//!
//! - **HTTP**: `POST` JSON to the backend chat endpoint (default)
//!
//! # Usage
//!
//! ```ignore
//! use panel_core::transport::{ChatTransport, HttpTransport};
//!
//! let transport = HttpTransport::new("http://localhost:5000/chat", timeout)?;
//! let reply = transport.send("What is the refund policy?").await;
//! ```

mod http;
mod traits;

pub use http::{ChatRequest, ChatResponse, HttpTransport, TransportError};
pub use traits::{ChatReply, ChatTransport, FALLBACK_REPLY};
