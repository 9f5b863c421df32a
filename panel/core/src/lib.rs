//! Panel Core - Headless Response Rendering & Interaction Engine for docchat
//!
//! This crate owns the lifecycle of a chat exchange next to a document
//! viewer: sending the visitor's question, revealing the reply a few
//! characters at a time, rendering it, and turning cited pages into
//! affordances that move the viewer. It knows nothing about terminals or
//! browsers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI Surface                                │
//! │   ┌──────────┐   ┌──────────────┐   ┌──────────┐  ┌──────────┐  │
//! │   │ Sidebar  │   │  Chat (log + │   │ Resizer  │  │  Viewer  │  │
//! │   │          │   │    input)    │   │  handle  │  │   pane   │  │
//! │   └────┬─────┘   └──────┬───────┘   └────┬─────┘  └────┬─────┘  │
//! │        └────────────────┴────────────────┴─────────────┘        │
//! │                           │                                      │
//! │                    SurfaceEvent (up)                             │
//! │                    PanelMessage (down)                           │
//! └───────────────────────────┼──────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼──────────────────────────────────────┐
//! │                       PANEL CORE                                 │
//! │  ┌────────────────────────┴────────────────────────────────────┐ │
//! │  │                         Panel                                │ │
//! │  │  ┌───────────┐  ┌──────────┐  ┌───────────┐  ┌────────────┐ │ │
//! │  │  │ Transport │─▶│  Reveal  │─▶│  Markup + │  │ Navigation │ │ │
//! │  │  │  (HTTP)   │  │Scheduler │  │ Citations │  │   Bridge   │ │ │
//! │  │  └───────────┘  └──────────┘  └───────────┘  └────────────┘ │ │
//! │  └─────────────────────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Panel`]: The exchange orchestrator
//! - [`PanelMessage`]: Messages sent from the Panel to the surface
//! - [`SurfaceEvent`]: Events sent from the surface to the Panel
//! - [`ChatTransport`]: Backend abstraction, with [`HttpTransport`] for production
//! - [`RevealScheduler`]: Progressive disclosure of replies
//! - [`MessageLog`]: Append-only history as displayed
//!
//! # Quick Start
//!
//! ```ignore
//! use panel_core::{Affordances, HttpTransport, Panel, RevealOptions, SurfaceEvent};
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = mpsc::channel(256);
//!
//!     let transport = HttpTransport::new("http://localhost:5000/chat", Duration::from_secs(60))?;
//!     let affordances = Affordances::default().with_viewer("/static/books/handbook.pdf");
//!     let mut panel = Panel::new(transport, RevealOptions::default(), affordances, tx);
//!     panel.start().await?;
//!
//!     panel.handle_event(SurfaceEvent::Submit {
//!         text: "What is the refund policy?".to_string(),
//!     }).await?;
//!
//!     loop {
//!         panel.poll().await;
//!         while let Ok(msg) = rx.try_recv() {
//!             // Apply to display state and render
//!         }
//!         if panel.is_idle() {
//!             break;
//!         }
//!         tokio::time::sleep(Duration::from_millis(16)).await;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`panel`]: The Panel orchestrator and its capabilities
//! - [`transport`]: Chat backend abstraction and HTTP implementation
//! - [`reveal`]: Reveal state and scheduler
//! - [`markup`]: Markdown rendering into styled lines
//! - [`citations`]: Page list to reference block
//! - [`navigation`]: Viewer target and page fragments
//! - [`resize`]: Drag resize controller
//! - [`sidebar`]: Sidebar toggle
//! - [`rating`]: Star rating fills for the document card
//! - [`log`]: Message log
//! - [`exchange`]: One in-flight exchange
//! - [`config`]: TOML configuration file support
//! - [`events`]: Events from UI surfaces to the Panel
//! - [`messages`]: Messages from the Panel to UI surfaces
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod citations;
pub mod config;
pub mod events;
pub mod exchange;
pub mod log;
pub mod markup;
pub mod messages;
pub mod navigation;
pub mod panel;
pub mod rating;
pub mod resize;
pub mod reveal;
pub mod sidebar;
pub mod transport;

// Re-exports for convenience
pub use citations::{annotate, CitationAffordance, CitationBlock};
pub use events::SurfaceEvent;
pub use exchange::Exchange;
pub use log::{EntryContent, MessageEntry, MessageLog};
pub use markup::{render, Markup, MarkupLine, Span, SpanStyle};
pub use messages::{MessageId, MessageRole, PanelMessage};
pub use navigation::{page_target, parse_page, ViewerTarget};
pub use panel::{Affordances, Panel};
pub use rating::{star_fills, STAR_COUNT};
pub use resize::{DragResizer, DragState};
pub use reveal::{RevealOptions, RevealScheduler, RevealState, RevealUpdate};
pub use sidebar::SidebarToggle;
pub use transport::{ChatReply, ChatTransport, HttpTransport, TransportError, FALLBACK_REPLY};

// Config exports
pub use config::{
    default_config_path, load_config_from_path, load_config_with_env, ConfigError,
    ConfigOverrides, ConfigSource, PanelConfig, PanelToml,
};
