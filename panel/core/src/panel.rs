//! Panel - The Exchange Orchestrator
//!
//! The Panel wires a submit to the transport, the transport's reply to the
//! reveal scheduler, and activated citations to the document viewer. It owns
//! the busy flag and the message log.
//!
//! # Driving the Panel
//!
//! The host loop is the only thing that mutates Panel state:
//!
//! ```text
//! loop {
//!     select! {
//!         event = surface_events => panel.handle_event(event).await?,
//!         _ = frame_tick => { panel.poll().await; }
//!     }
//!     drain PanelMessages and render
//! }
//! ```
//!
//! The network call and the reveal timer chain run as spawned tasks that
//! only hand values back over channels; `poll` applies them.
//!
//! # Capabilities
//!
//! Every surface feature is optional. A Panel built without a viewer ignores
//! citation activation, one without a resizer ignores drag events, and so on.
//! Missing capabilities never affect the others.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::events::SurfaceEvent;
use crate::exchange::Exchange;
use crate::log::MessageLog;
use crate::messages::{MessageRole, PanelMessage};
use crate::navigation::ViewerTarget;
use crate::resize::DragResizer;
use crate::reveal::{RevealOptions, RevealScheduler, RevealUpdate};
use crate::sidebar::SidebarToggle;
use crate::transport::{ChatReply, ChatTransport};

/// Upper bound on reveal updates applied by one `poll` call
///
/// Keeps a single poll from flooding the surface channel when the host loop
/// has fallen behind.
const MAX_UPDATES_PER_POLL: usize = 64;

/// Surface capabilities the Panel was given
#[derive(Clone, Debug)]
pub struct Affordances {
    /// Input box and message log are present
    pub chat: bool,
    /// Document viewer with its initial navigation target
    pub viewer: Option<String>,
    /// Collapsible sidebar
    pub sidebar: Option<SidebarToggle>,
    /// Drag handle for the viewer pane
    pub resizer: Option<DragResizer>,
}

impl Default for Affordances {
    fn default() -> Self {
        Self {
            chat: true,
            viewer: None,
            sidebar: None,
            resizer: None,
        }
    }
}

impl Affordances {
    /// Chat only, no viewer, sidebar or resizer
    #[must_use]
    pub fn chat_only() -> Self {
        Self::default()
    }

    /// No capabilities at all
    #[must_use]
    pub fn none() -> Self {
        Self {
            chat: false,
            ..Self::default()
        }
    }

    /// Add a document viewer starting at `target`
    #[must_use]
    pub fn with_viewer(mut self, target: impl Into<String>) -> Self {
        self.viewer = Some(target.into());
        self
    }

    /// Add a sidebar toggle
    #[must_use]
    pub fn with_sidebar(mut self, collapsed: bool) -> Self {
        self.sidebar = Some(SidebarToggle::new(collapsed));
        self
    }

    /// Add a pane resizer
    #[must_use]
    pub fn with_resizer(mut self, resizer: DragResizer) -> Self {
        self.resizer = Some(resizer);
        self
    }
}

/// The Panel - headless exchange orchestrator
pub struct Panel<T: ChatTransport> {
    /// Chat transport
    transport: Arc<T>,
    /// How replies are revealed
    reveal_options: RevealOptions,
    /// Whether the chat capability is present
    chat_enabled: bool,
    /// Displayed history
    log: MessageLog,
    /// Reveal timer chains
    scheduler: RevealScheduler,
    /// Reveals begun but not yet swapped to rendered content
    active_reveals: usize,
    /// Exchange waiting on the transport
    current: Option<Exchange>,
    /// Reply of the in-flight exchange
    pending_reply: Option<oneshot::Receiver<ChatReply>>,
    /// Task performing the in-flight request
    request: Option<JoinHandle<()>>,
    /// Viewer navigation state
    viewer: Option<ViewerTarget>,
    /// Sidebar visibility
    sidebar: Option<SidebarToggle>,
    /// Viewer pane resizer
    resizer: Option<DragResizer>,
    /// Channel to send messages to UI surface
    tx: mpsc::Sender<PanelMessage>,
}

impl<T: ChatTransport + 'static> Panel<T> {
    /// Create a new Panel
    pub fn new(
        transport: T,
        reveal_options: RevealOptions,
        affordances: Affordances,
        tx: mpsc::Sender<PanelMessage>,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            reveal_options,
            chat_enabled: affordances.chat,
            log: MessageLog::new(),
            scheduler: RevealScheduler::new(),
            active_reveals: 0,
            current: None,
            pending_reply: None,
            request: None,
            viewer: affordances.viewer.map(ViewerTarget::new),
            sidebar: affordances.sidebar,
            resizer: affordances.resizer,
            tx,
        }
    }

    /// Message log
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Whether an exchange is waiting on the transport
    pub fn is_busy(&self) -> bool {
        self.current.as_ref().is_some_and(|e| e.busy)
    }

    /// Whether any reply is still revealing
    pub fn is_revealing(&self) -> bool {
        self.active_reveals > 0
    }

    /// Nothing in flight and nothing left to reveal
    pub fn is_idle(&self) -> bool {
        !self.is_busy() && !self.is_revealing()
    }

    /// Viewer navigation state, if the viewer capability is present
    pub fn viewer(&self) -> Option<&ViewerTarget> {
        self.viewer.as_ref()
    }

    /// Sidebar state, if the sidebar capability is present
    pub fn sidebar(&self) -> Option<&SidebarToggle> {
        self.sidebar.as_ref()
    }

    /// Resizer, if the resize capability is present
    pub fn resizer(&self) -> Option<&DragResizer> {
        self.resizer.as_ref()
    }

    /// Reveal options in effect
    pub fn reveal_options(&self) -> RevealOptions {
        self.reveal_options
    }

    /// Announce initial surface state
    pub async fn start(&mut self) -> anyhow::Result<()> {
        info!(
            transport = self.transport.name(),
            chat = self.chat_enabled,
            viewer = self.viewer.is_some(),
            "Panel started"
        );

        if let Some(sidebar) = self.sidebar {
            self.send(PanelMessage::Sidebar {
                collapsed: sidebar.is_collapsed(),
                label: sidebar.label().to_string(),
            })
            .await;
        }

        Ok(())
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::Submit { text } => self.handle_submit(&text).await?,

            SurfaceEvent::AffordanceActivated { data } => {
                let Some(viewer) = self.viewer.as_mut() else {
                    debug!(data = %data, "No viewer, ignoring activation");
                    return Ok(());
                };
                if let Some(page) = viewer.activate(&data) {
                    let target = viewer.target().to_string();
                    info!(page, target = %target, "Viewer navigated");
                    self.send(PanelMessage::ViewerNavigate { target, page })
                        .await;
                }
            }

            SurfaceEvent::DragStart { x, current_width } => {
                if let Some(resizer) = self.resizer.as_mut() {
                    resizer.begin(x, current_width);
                    self.send(PanelMessage::Resizing { active: true }).await;
                }
            }

            SurfaceEvent::DragMove { x } => {
                if let Some(width) = self.resizer.as_mut().and_then(|r| r.drag(x)) {
                    self.send(PanelMessage::PaneWidth { width }).await;
                }
            }

            SurfaceEvent::DragEnd => {
                if self.resizer.as_mut().is_some_and(DragResizer::end) {
                    self.send(PanelMessage::Resizing { active: false }).await;
                }
            }

            SurfaceEvent::ToggleSidebar => {
                if let Some(sidebar) = self.sidebar.as_mut() {
                    let collapsed = sidebar.toggle();
                    let label = sidebar.label().to_string();
                    self.send(PanelMessage::Sidebar { collapsed, label }).await;
                }
            }
        }

        Ok(())
    }

    /// Submit a message for a new exchange
    async fn handle_submit(&mut self, text: &str) -> anyhow::Result<()> {
        if !self.chat_enabled {
            debug!("No chat capability, ignoring submit");
            return Ok(());
        }

        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        if self.is_busy() {
            debug!("Exchange in flight, ignoring submit");
            return Ok(());
        }

        let id = self.log.append_user(text);
        self.send(PanelMessage::Message {
            id,
            role: MessageRole::User,
            content: text.to_string(),
        })
        .await;
        self.send(PanelMessage::InputCleared).await;

        self.current = Some(Exchange::new(text));
        self.send(PanelMessage::Busy { busy: true }).await;

        info!(
            transport = self.transport.name(),
            chars = text.chars().count(),
            "Sending message"
        );

        let (reply_tx, reply_rx) = oneshot::channel();
        let transport = Arc::clone(&self.transport);
        let message = text.to_string();
        self.request = Some(tokio::spawn(async move {
            let reply = transport.send(&message).await;
            let _ = reply_tx.send(reply);
        }));
        self.pending_reply = Some(reply_rx);

        Ok(())
    }

    /// Apply whatever the background tasks have produced
    ///
    /// Call this regularly from the host loop. Returns true if anything
    /// changed.
    pub async fn poll(&mut self) -> bool {
        let mut activity = self.poll_reply().await;

        for _ in 0..MAX_UPDATES_PER_POLL {
            let Some(update) = self.scheduler.try_next() else {
                break;
            };
            self.apply_update(update).await;
            activity = true;
        }

        activity
    }

    /// Receive the in-flight reply, if it has arrived, and start revealing it
    async fn poll_reply(&mut self) -> bool {
        let Some(rx) = self.pending_reply.as_mut() else {
            return false;
        };

        let reply = match rx.try_recv() {
            Ok(reply) => reply,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("Transport task ended without a reply");
                ChatReply::fallback()
            }
        };
        self.pending_reply = None;
        self.request = None;

        let Some(mut exchange) = self.current.take() else {
            return false;
        };
        exchange.resolve(reply);
        self.send(PanelMessage::Busy {
            busy: exchange.busy,
        })
        .await;

        let id = self.log.begin_assistant();
        self.send(PanelMessage::RevealStarted { id: id.clone() })
            .await;

        self.active_reveals += 1;
        self.scheduler.begin(
            id,
            exchange.reply_text.unwrap_or_default(),
            exchange.cited_pages,
            self.reveal_options,
        );

        true
    }

    /// Apply one reveal update to the log and tell the surface
    async fn apply_update(&mut self, update: RevealUpdate) {
        match update {
            RevealUpdate::Progress { id, revealed } => {
                if !self.log.update_progress(&id, &revealed) {
                    debug!(id = %id, "Dropping progress for settled entry");
                    return;
                }
                self.send(PanelMessage::RevealProgress { id, revealed })
                    .await;
            }
            RevealUpdate::Finished {
                id,
                markup,
                citations,
            } => {
                if !self.log.complete(&id, markup.clone(), citations.clone()) {
                    debug!(id = %id, "Dropping completion for settled entry");
                    return;
                }
                self.active_reveals = self.active_reveals.saturating_sub(1);
                debug!(
                    id = %id,
                    citations = citations.as_ref().map_or(0, |c| c.affordances.len()),
                    "Reveal finished"
                );
                self.send(PanelMessage::RevealFinished {
                    id,
                    markup,
                    citations,
                })
                .await;
            }
        }

        self.send(PanelMessage::ScrollToLatest).await;
    }

    /// Shut down the Panel, aborting in-flight work
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        self.scheduler.cancel();
        if let Some(request) = self.request.take() {
            request.abort();
        }
        self.pending_reply = None;
        self.current = None;
        self.active_reveals = 0;
        info!(entries = self.log.len(), "Panel shut down");
        Ok(())
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: PanelMessage) {
        if let Err(e) = self.tx.send(msg).await {
            warn!("Failed to send message to surface: {}", e);
        }
    }
}

impl<T: ChatTransport> Drop for Panel<T> {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            request.abort();
        }
    }
}
