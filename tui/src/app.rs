//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - PanelClient for orchestration
//! - DisplayState for rendering
//!
//! The App:
//! 1. Converts terminal events to SurfaceEvents
//! 2. Sends events to the embedded Panel via PanelClient
//! 3. Receives PanelMessages and updates DisplayState
//! 4. Renders based on DisplayState, rebuilding the click map each frame

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use panel_core::{PanelConfig, PanelMessage};

use crate::display::DisplayState;
use crate::hit::contains;
use crate::layout::{self, LayoutParams, Regions};
use crate::panel_client::PanelClient;
use crate::theme;
use crate::widgets::{
    InputBox, InputState, MessageLog, MessageLogState, Sidebar, ViewerPane, SPINNER_FRAMES,
};

/// Frame tick for polling the Panel
const FRAME_TICK: Duration = Duration::from_millis(16);

/// Spinner advance interval
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Lines scrolled per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Panel Integration ===
    /// Client for communicating with the embedded Panel
    panel: PanelClient,
    /// Display state derived from PanelMessages
    display: DisplayState,

    // === Input State ===
    /// Message being typed
    input: InputState,
    /// Maximum input height in lines
    input_max_lines: u16,
    /// Message log scroll and click map
    log_state: MessageLogState,

    // === Layout ===
    /// Regions drawn in the last frame
    regions: Regions,
    /// Sidebar toggle label drawn in the last frame
    toggle_area: Option<Rect>,

    // === Misc State ===
    /// Busy spinner frame
    spinner_frame: usize,
    /// Last spinner advance
    last_spin: Instant,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &PanelConfig) -> anyhow::Result<Self> {
        let size = crossterm::terminal::size()?;
        let panel = PanelClient::new(config, size.0)?;

        let mut display = DisplayState::new().with_document(
            config.document_title.clone(),
            config.document_rating,
        );
        if let Some(ref target) = config.viewer_target {
            let width = u16::try_from(config.viewer_width.max(0)).unwrap_or(u16::MAX);
            display = display.with_viewer(target.clone(), width);
        }
        display.sidebar_collapsed = config.sidebar_collapsed;

        Ok(Self {
            running: true,
            panel,
            display,
            input: InputState::new(),
            input_max_lines: config.input_max_lines,
            log_state: MessageLogState::default(),
            regions: Regions::default(),
            toggle_area: None,
            spinner_frame: 0,
            last_spin: Instant::now(),
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        self.panel.start().await?;
        self.process_panel_messages();

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Check for terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key).await?;
                        }
                        Some(Ok(Event::Mouse(mouse))) => self.handle_mouse(mouse).await?,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(FRAME_TICK) => {}
            }

            // Apply finished network and reveal work
            self.panel.poll().await;

            // Receive and process messages from the Panel
            self.process_panel_messages();

            self.update();
            self.render(terminal)?;
        }

        self.panel.shutdown().await?;
        Ok(())
    }

    /// Process all pending messages from the Panel
    fn process_panel_messages(&mut self) {
        for msg in self.panel.recv_all() {
            match msg {
                PanelMessage::InputCleared => self.input.clear(),
                PanelMessage::ScrollToLatest => self.log_state.scroll_to_latest(),
                _ => {}
            }
            self.display.apply_message(msg);
        }
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: event::KeyEvent) -> anyhow::Result<()> {
        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Newline or submit
            KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
                self.input.newline();
            }
            KeyCode::Enter => {
                // The Panel decides; input is cleared only on InputCleared
                self.panel.submit(self.input.text().to_string()).await?;
            }

            // Sidebar
            KeyCode::F(2) => self.panel.toggle_sidebar().await?,

            // Typing
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),

            // Conversation scrolling
            KeyCode::PageUp => {
                let page = (self.regions.log.height / 2).max(1) as usize;
                self.log_state.scroll_up(page);
            }
            KeyCode::PageDown => {
                let page = (self.regions.log.height / 2).max(1) as usize;
                self.log_state.scroll_down(page);
            }
            KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.log_state.scroll_to_latest();
            }

            _ => {}
        }
        Ok(())
    }

    /// Handle mouse input
    async fn handle_mouse(&mut self, mouse: event::MouseEvent) -> anyhow::Result<()> {
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self
                    .regions
                    .resizer
                    .is_some_and(|r| contains(r, column, row))
                {
                    let width = self.regions.viewer.map_or(0, |v| v.width);
                    self.panel
                        .drag_start(i32::from(column), i32::from(width))
                        .await?;
                } else if self.toggle_area.is_some_and(|r| contains(r, column, row)) {
                    self.panel.toggle_sidebar().await?;
                } else if contains(self.regions.log, column, row) {
                    // One handler for the whole log; the click map says what was hit
                    if let Some(data) = self.log_state.hits.hit(column, row) {
                        let data = data.to_string();
                        self.panel.activate(data).await?;
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.panel.drag_move(i32::from(column)).await?;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.panel.drag_end().await?;
            }
            MouseEventKind::ScrollUp => self.log_state.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.log_state.scroll_down(WHEEL_LINES),
            _ => {}
        }
        Ok(())
    }

    /// Update timers
    fn update(&mut self) {
        if self.display.busy {
            if self.last_spin.elapsed() >= SPINNER_INTERVAL {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                self.last_spin = Instant::now();
            }
        } else {
            self.spinner_frame = 0;
        }
    }

    /// Render the UI
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        terminal.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    /// Draw one frame
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // The input height depends on the chat width, which the layout decides
        let mut params = LayoutParams {
            sidebar: !self.display.sidebar_collapsed,
            viewer_width: self.display.viewer.as_ref().map(|_| self.display.pane_width),
            input_height: 3,
        };
        let provisional = layout::compute(area, params);
        params.input_height = self
            .input
            .height(provisional.input.width.saturating_sub(2), self.input_max_lines);
        self.regions = layout::compute(area, params);

        if let Some(sidebar) = self.regions.sidebar {
            frame.render_widget(Sidebar::new(&self.display.document), sidebar);
        }

        frame.render_stateful_widget(
            MessageLog::new(&self.display.messages),
            self.regions.log,
            &mut self.log_state,
        );

        frame.render_widget(
            InputBox::new(&self.input).busy(self.display.busy, self.spinner_frame),
            self.regions.input,
        );

        if let Some(resizer) = self.regions.resizer {
            let style = if self.display.resizing {
                Style::default().fg(theme::HANDLE_ACTIVE)
            } else {
                theme::dim()
            };
            let glyph = if self.display.resizing { "┃" } else { "│" };
            let buf = frame.buffer_mut();
            for y in resizer.y..resizer.y + resizer.height {
                buf.set_string(resizer.x, y, glyph, style);
            }
        }

        if let (Some(viewer_area), Some(viewer)) = (self.regions.viewer, &self.display.viewer) {
            frame.render_widget(ViewerPane::new(viewer), viewer_area);
        }

        self.draw_status(frame);
    }

    /// Render status bar
    fn draw_status(&mut self, frame: &mut Frame) {
        let area = self.regions.status;
        let toggle = format!("[{}]", self.display.sidebar_label);
        let toggle_width = u16::try_from(toggle.len()).unwrap_or(u16::MAX);
        self.toggle_area = Some(Rect::new(
            area.x + 1,
            area.y,
            toggle_width.min(area.width.saturating_sub(1)),
            1,
        ));

        let state = if self.display.busy {
            format!(" {} waiting for reply", SPINNER_FRAMES[self.spinner_frame])
        } else if self.display.is_revealing() {
            " revealing".to_string()
        } else {
            " ready".to_string()
        };

        let scroll_info = if self.log_state.scroll_offset > 0 {
            format!(" | [^{} lines]", self.log_state.scroll_offset)
        } else {
            String::new()
        };

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                toggle,
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(
                format!(" |{state} | Esc to quit | PgUp/PgDn scroll{scroll_info}"),
                theme::dim(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
