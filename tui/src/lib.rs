//! docchat TUI - Terminal chat panel for document questions
//!
//! This crate is a thin display client over `panel-core`: it turns terminal
//! events into surface events, applies the Panel's messages to a display
//! state and renders it.
//!
//! # Architecture
//!
//! - **App**: event loop, key and mouse handling, frame drawing
//! - **PanelClient**: embeds the headless Panel
//! - **DisplayState**: everything the renderer needs, derived from messages
//! - **Widgets**: message log with clickable references, input box,
//!   sidebar and viewer pane

pub mod app;
pub mod display;
pub mod hit;
pub mod layout;
pub mod panel_client;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use panel_client::PanelClient;
