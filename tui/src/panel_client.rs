//! Panel Client
//!
//! Thin wrapper around the Panel for TUI integration.
//! This client embeds the Panel directly (no IPC) and provides
//! a convenient interface for sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! All orchestration happens in the Panel. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to the Panel
//! 3. Receive PanelMessages
//! 4. Render display state based on messages

use tokio::sync::mpsc;

use panel_core::{
    Affordances, ChatTransport, DragResizer, HttpTransport, Panel, PanelConfig, PanelMessage,
    SurfaceEvent,
};

/// Capacity of the Panel -> TUI channel
const CHANNEL_CAPACITY: usize = 1024;

/// Capabilities this surface offers for a given config and terminal width
pub fn affordances(config: &PanelConfig, viewport_width: u16) -> Affordances {
    let mut affordances = Affordances::chat_only().with_sidebar(config.sidebar_collapsed);

    if let Some(ref target) = config.viewer_target {
        affordances = affordances.with_viewer(target.clone());

        let resizer = DragResizer::for_viewport(
            i32::from(viewport_width),
            config.min_width,
            config.reserved_margin,
        );
        if resizer.min_width() < resizer.max_width() {
            affordances = affordances.with_resizer(resizer);
        } else {
            tracing::warn!(
                viewport_width,
                min_width = config.min_width,
                reserved_margin = config.reserved_margin,
                "Terminal too narrow to resize the viewer pane"
            );
        }
    }

    affordances
}

/// Client for communicating with the embedded Panel
pub struct PanelClient<T: ChatTransport = HttpTransport> {
    /// The embedded Panel instance
    panel: Panel<T>,
    /// Receiver for messages from the Panel
    rx: mpsc::Receiver<PanelMessage>,
}

impl PanelClient<HttpTransport> {
    /// Create a client talking HTTP to the configured endpoint
    pub fn new(config: &PanelConfig, viewport_width: u16) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(config.endpoint.clone(), config.timeout)?;
        Ok(Self::with_transport(transport, config, viewport_width))
    }
}

impl<T: ChatTransport + 'static> PanelClient<T> {
    /// Create a client around any transport
    pub fn with_transport(transport: T, config: &PanelConfig, viewport_width: u16) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let panel = Panel::new(
            transport,
            config.reveal,
            affordances(config, viewport_width),
            tx,
        );
        Self { panel, rx }
    }

    /// Announce initial state
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.panel.start().await
    }

    /// Submit the input contents
    pub async fn submit(&mut self, text: String) -> anyhow::Result<()> {
        self.panel.handle_event(SurfaceEvent::Submit { text }).await
    }

    /// Report a click on a log element carrying `data`
    pub async fn activate(&mut self, data: String) -> anyhow::Result<()> {
        self.panel
            .handle_event(SurfaceEvent::AffordanceActivated { data })
            .await
    }

    /// Pointer pressed on the resizer
    pub async fn drag_start(&mut self, x: i32, current_width: i32) -> anyhow::Result<()> {
        self.panel
            .handle_event(SurfaceEvent::DragStart { x, current_width })
            .await
    }

    /// Pointer moved while pressed
    pub async fn drag_move(&mut self, x: i32) -> anyhow::Result<()> {
        self.panel.handle_event(SurfaceEvent::DragMove { x }).await
    }

    /// Pointer released
    pub async fn drag_end(&mut self) -> anyhow::Result<()> {
        self.panel.handle_event(SurfaceEvent::DragEnd).await
    }

    /// Sidebar toggle activated
    pub async fn toggle_sidebar(&mut self) -> anyhow::Result<()> {
        self.panel.handle_event(SurfaceEvent::ToggleSidebar).await
    }

    /// Apply finished background work (must be called regularly)
    pub async fn poll(&mut self) -> bool {
        self.panel.poll().await
    }

    /// Receive all pending messages from the Panel (non-blocking)
    pub fn recv_all(&mut self) -> Vec<PanelMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Whether an exchange is in flight
    pub fn is_busy(&self) -> bool {
        self.panel.is_busy()
    }

    /// Whether nothing is in flight or revealing
    pub fn is_idle(&self) -> bool {
        self.panel.is_idle()
    }

    /// Abort in-flight work
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        self.panel.shutdown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affordances_without_document() {
        let config = PanelConfig::default();
        let affordances = affordances(&config, 120);
        assert!(affordances.chat);
        assert!(affordances.viewer.is_none());
        assert!(affordances.resizer.is_none());
        assert!(affordances.sidebar.is_some());
    }

    #[test]
    fn test_affordances_with_document() {
        let mut config = PanelConfig::default();
        config.viewer_target = Some("/static/books/handbook.pdf".to_string());
        config.min_width = 20;
        config.reserved_margin = 40;
        let affordances = affordances(&config, 120);
        assert_eq!(
            affordances.viewer.as_deref(),
            Some("/static/books/handbook.pdf")
        );
        let resizer = affordances.resizer.unwrap();
        assert_eq!(resizer.min_width(), 20);
        assert_eq!(resizer.max_width(), 80);
    }

    #[test]
    fn test_narrow_terminal_disables_resizer_only() {
        let mut config = PanelConfig::default();
        config.viewer_target = Some("/doc.pdf".to_string());
        config.min_width = 20;
        config.reserved_margin = 40;
        let affordances = affordances(&config, 50);
        assert!(affordances.viewer.is_some());
        assert!(affordances.resizer.is_none());
    }
}
