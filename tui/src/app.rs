//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - SessionClient for conversation logic
//! - DisplayState for rendering
//!
//! The App:
//! 1. Converts terminal events to `SurfaceEvent`s
//! 2. Sends them to the embedded session via `SessionClient`
//! 3. Receives `UiDirective`s and updates `DisplayState`
//! 4. Renders based on `DisplayState`

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::Terminal;
use unicode_width::UnicodeWidthStr;

use crate::display::{DisplayRole, DisplayState};
use crate::session_client::SessionClient;
use crate::theme::{
    BORDER_GRAY, DIM_GRAY, DISABLED_GRAY, ERROR_RED, GRACE_GOLD, PENDING_BLUE, SIDEBAR_HEADING,
    USER_SAGE,
};

/// Input box height (lines) for text wrapping
const INPUT_HEIGHT: u16 = 5;

/// Sidebar width when open
const SIDEBAR_WIDTH: u16 = 32;

/// Lines moved per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Welcome placeholder lines
const WELCOME_LINES: &[&str] = &[
    "Welcome to GraceWise",
    "",
    "Ask anything about lesson planning, curriculum or your homeschool day.",
    "",
    "Enter to send | Alt+Enter for a new line",
];

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Session Integration ===
    /// Client for communicating with the embedded session
    client: SessionClient,
    /// Display state derived from directives
    display: DisplayState,

    // === Render State ===
    /// Total rendered conversation lines (for scroll bounds)
    total_lines: usize,
    /// Conversation lines visible at once
    viewport_lines: usize,
    /// Last frame time (for animations)
    last_frame: Instant,
    /// Terminal size
    size: (u16, u16),
}

impl App {
    /// Create a new App around a session client
    pub fn new(client: SessionClient, sidebar_capacity: usize) -> anyhow::Result<Self> {
        let size = crossterm::terminal::size()?;

        Ok(Self {
            running: true,
            client,
            display: DisplayState::new(sidebar_capacity),
            total_lines: 0,
            viewport_lines: 0,
            last_frame: Instant::now(),
            size,
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~10 FPS is plenty for a chat surface
        let frame_duration = Duration::from_millis(100);

        // Async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key);
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse),
                            Event::Resize(w, h) => self.size = (w, h),
                            _ => {}
                        },
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "Terminal event error");
                        }
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            // Receive and apply directives from the session
            self.process_directives();

            // Update animations
            self.update();

            // Render
            self.render(terminal)?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Apply all pending directives from the session
    fn process_directives(&mut self) {
        for directive in self.client.recv_all() {
            self.display.apply(directive);
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: event::KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,

            // New conversation
            KeyCode::Char('n') if ctrl => {
                self.client.start_new();
                // Apply now so the cleared thread is what gets drawn next
                self.process_directives();
            }

            // Sidebar
            KeyCode::Char('b') if ctrl => self.display.toggle_sidebar(),

            // Newline inside the message
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                self.display.insert_newline();
            }

            // Submit message
            KeyCode::Enter => {
                if let Some(input) = self.display.submittable_input() {
                    let input = input.to_string();
                    self.client.submit(input);
                    self.process_directives();
                }
            }

            // Typing
            KeyCode::Char(c) if !ctrl => self.display.insert_char(c),
            KeyCode::Backspace => self.display.backspace(),

            // Conversation scrolling
            KeyCode::PageUp => {
                let page = (self.viewport_lines / 2).max(1);
                self.display.scroll_up(page, self.max_scroll());
            }
            KeyCode::PageDown => {
                let page = (self.viewport_lines / 2).max(1);
                self.display.scroll_down(page);
            }
            KeyCode::Home if ctrl => {
                let max = self.max_scroll();
                self.display.scroll_up(max, max);
            }
            KeyCode::End if ctrl => self.display.scroll_offset = 0,

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: event::MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                let max = self.max_scroll();
                self.display.scroll_up(WHEEL_LINES, max);
            }
            MouseEventKind::ScrollDown => self.display.scroll_down(WHEEL_LINES),
            _ => {}
        }
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_lines)
    }

    /// Update animations and state
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        self.display.update(delta);
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the UI
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let layout = Layout::new(self.size, self.display.sidebar_open);

        // Build conversation lines up front so scroll bounds are current
        let lines = conversation_lines(&self.display, layout.conversation.width);
        self.total_lines = lines.len();
        self.viewport_lines = layout.conversation.height as usize;
        let max_scroll = self.max_scroll();
        if self.display.scroll_offset > max_scroll {
            self.display.scroll_offset = max_scroll;
        }

        let display = &self.display;
        let backend_name = self.client.backend_name().to_string();

        terminal.draw(|frame| {
            let buf = frame.buffer_mut();

            if let Some(sidebar) = layout.sidebar {
                render_sidebar(buf, sidebar, display);
            }
            if display.shows_welcome() {
                render_welcome(buf, layout.conversation);
            } else {
                render_conversation(buf, layout.conversation, &lines, display.scroll_offset);
            }
            render_input(buf, layout.input, display);
            render_status(buf, layout.status, display, &backend_name);
        })?;

        Ok(())
    }
}

/// Screen regions for one frame
struct Layout {
    sidebar: Option<Rect>,
    conversation: Rect,
    input: Rect,
    status: Rect,
}

impl Layout {
    fn new((width, height): (u16, u16), sidebar_open: bool) -> Self {
        let sidebar_width = if sidebar_open {
            SIDEBAR_WIDTH.min(width / 2)
        } else {
            0
        };
        let main_x = sidebar_width;
        let main_width = width.saturating_sub(sidebar_width);
        let input_and_status_height = INPUT_HEIGHT + 1;
        let conversation_height = height.saturating_sub(input_and_status_height);

        Self {
            sidebar: (sidebar_width > 0)
                .then(|| Rect::new(0, 0, sidebar_width, height.saturating_sub(1))),
            conversation: Rect::new(main_x, 0, main_width, conversation_height),
            input: Rect::new(
                main_x,
                conversation_height,
                main_width,
                INPUT_HEIGHT.min(height.saturating_sub(1)),
            ),
            status: Rect::new(0, height.saturating_sub(1), width, 1.min(height)),
        }
    }
}

/// Wrap every bubble (and the pending indicator) into styled lines
fn conversation_lines(display: &DisplayState, width: u16) -> Vec<(String, Style)> {
    let width = width.saturating_sub(2) as usize;
    if width < 10 {
        return Vec::new();
    }

    let mut all_lines: Vec<(String, Style)> = Vec::new();

    for msg in &display.messages {
        let style = match msg.role {
            DisplayRole::User => Style::default().fg(USER_SAGE),
            DisplayRole::Assistant => Style::default().fg(GRACE_GOLD),
            DisplayRole::Error => Style::default().fg(ERROR_RED),
        };

        let content = format!("{}{}", msg.role.prefix(), msg.content);
        for line in textwrap::wrap(&content, width) {
            all_lines.push((line.to_string(), style));
        }
        all_lines.push((String::new(), Style::default()));
    }

    if display.is_pending() {
        all_lines.push((
            format!("{}{}", DisplayRole::Assistant.prefix(), display.pending_dots()),
            Style::default().fg(PENDING_BLUE),
        ));
    }

    all_lines
}

/// Render conversation region
fn render_conversation(
    buf: &mut Buffer,
    area: Rect,
    lines: &[(String, Style)],
    scroll_offset: usize,
) {
    let height = area.height as usize;
    if height < 3 {
        return;
    }

    let visible_end = lines.len().saturating_sub(scroll_offset);
    let visible_start = visible_end.saturating_sub(height);

    let has_content_above = visible_start > 0;
    let has_content_below = scroll_offset > 0;

    for (i, (line, style)) in lines[visible_start..visible_end].iter().enumerate() {
        // Fade edges when more content is off screen
        let final_style = if (has_content_above && i == 0)
            || (has_content_below && i == height.saturating_sub(1))
        {
            Style::default().fg(Color::Rgb(90, 90, 90))
        } else {
            *style
        };

        let display_line: String = line.chars().take(area.width as usize).collect();
        buf.set_string(area.x + 1, area.y + i as u16, &display_line, final_style);
    }
}

/// Render the welcome placeholder, centered
fn render_welcome(buf: &mut Buffer, area: Rect) {
    let top = area.y + area.height.saturating_sub(WELCOME_LINES.len() as u16) / 2;

    for (i, line) in WELCOME_LINES.iter().enumerate() {
        let y = top + i as u16;
        if y >= area.y + area.height {
            break;
        }
        let line: String = line.chars().take(area.width as usize).collect();
        let x = area.x + area.width.saturating_sub(line.width() as u16) / 2;
        let style = if i == 0 {
            Style::default().fg(GRACE_GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM_GRAY)
        };
        buf.set_string(x, y, &line, style);
    }
}

/// Render input region
fn render_input(buf: &mut Buffer, area: Rect, display: &DisplayState) {
    if area.height == 0 {
        return;
    }

    let separator = "-".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &separator, Style::default().fg(BORDER_GRAY));

    let text_height = area.height.saturating_sub(1) as usize;
    let text_width = area.width.saturating_sub(1) as usize;
    if text_width < 5 || text_height < 1 {
        return;
    }

    let (full_input, style) = if display.input_enabled {
        (
            format!("You: {}_", display.input),
            Style::default().fg(USER_SAGE),
        )
    } else {
        (
            format!("You: {}", display.input),
            Style::default().fg(DISABLED_GRAY),
        )
    };

    let wrapped_lines: Vec<String> = full_input
        .split('\n')
        .flat_map(|segment| {
            textwrap::wrap(segment, text_width)
                .into_iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    let skip = wrapped_lines.len().saturating_sub(text_height);
    for (i, line) in wrapped_lines.iter().skip(skip).enumerate() {
        buf.set_string(area.x, area.y + 1 + i as u16, line, style);
    }

    if skip > 0 {
        buf.set_string(
            area.x + area.width.saturating_sub(3),
            area.y,
            "^",
            Style::default().fg(Color::Yellow),
        );
    }
}

/// Render the sidebar of past conversations
fn render_sidebar(buf: &mut Buffer, area: Rect, display: &DisplayState) {
    if area.width < 8 || area.height < 3 {
        return;
    }

    let inner_width = area.width.saturating_sub(3) as usize;
    buf.set_string(
        area.x + 1,
        area.y,
        "--- Conversations ---",
        Style::default().fg(SIDEBAR_HEADING),
    );

    if display.summaries.is_empty() {
        buf.set_string(
            area.x + 1,
            area.y + 2,
            "(none yet)",
            Style::default().fg(DIM_GRAY),
        );
    }

    let mut y = area.y + 2;
    for label in display.summaries.iter() {
        if y >= area.y + area.height {
            break;
        }
        let label: String = label.chars().take(inner_width).collect();
        buf.set_string(area.x + 1, y, &label, Style::default().fg(DIM_GRAY));
        y += 1;
    }

    // Divider between sidebar and thread
    let divider_x = area.x + area.width.saturating_sub(1);
    for y in area.y..area.y + area.height {
        buf.set_string(divider_x, y, "|", Style::default().fg(BORDER_GRAY));
    }
}

/// Render status bar
fn render_status(buf: &mut Buffer, area: Rect, display: &DisplayState, backend_name: &str) {
    if area.height == 0 {
        return;
    }

    let state_str = if display.is_pending() {
        "Thinking"
    } else {
        "Ready"
    };

    let scroll_info = if display.scroll_offset > 0 {
        format!(" [^{} lines - PgDn to scroll]", display.scroll_offset)
    } else {
        String::new()
    };

    let status = format!(
        " {state_str} ({backend_name}) | Enter send | Ctrl+N new | Ctrl+B history | Esc quit{scroll_info}"
    );
    let status: String = status.chars().take(area.width as usize).collect();

    buf.set_string(area.x, area.y, &status, Style::default().fg(BORDER_GRAY));
}

#[cfg(test)]
mod tests {
    use gracewise_conductor::{BubbleKind, MessageId, PendingId, UiDirective};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_layout_without_sidebar() {
        let layout = Layout::new((80, 24), false);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.conversation, Rect::new(0, 0, 80, 18));
        assert_eq!(layout.input, Rect::new(0, 18, 80, INPUT_HEIGHT));
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_layout_with_sidebar() {
        let layout = Layout::new((80, 24), true);
        assert_eq!(layout.sidebar, Some(Rect::new(0, 0, SIDEBAR_WIDTH, 23)));
        assert_eq!(layout.conversation.x, SIDEBAR_WIDTH);
        assert_eq!(layout.conversation.width, 80 - SIDEBAR_WIDTH);
    }

    #[test]
    fn test_conversation_lines_include_pending_indicator() {
        let mut display = DisplayState::default();
        display.apply(UiDirective::Message {
            id: MessageId::new(),
            kind: BubbleKind::User,
            content: "hello".to_string(),
        });
        display.apply(UiDirective::PendingShown {
            indicator: PendingId::new(),
        });

        let lines = conversation_lines(&display, 80);
        let text: Vec<&str> = lines.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(text, vec!["You: hello", "", "GraceWise: ."]);
    }

    #[test]
    fn test_conversation_lines_wrap_long_bubbles() {
        let mut display = DisplayState::default();
        display.apply(UiDirective::Message {
            id: MessageId::new(),
            kind: BubbleKind::Assistant,
            content: "word ".repeat(40),
        });

        let lines = conversation_lines(&display, 42);
        assert!(lines.len() > 2);
        assert!(lines.iter().all(|(l, _)| l.chars().count() <= 40));
    }

    #[test]
    fn test_render_welcome_centers_heading() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        render_welcome(&mut buf, area);

        let heading_row: String = (0..area.width)
            .map(|x| buf[(x, 7)].symbol().to_string())
            .collect();
        assert!(heading_row.contains("Welcome to GraceWise"));
    }
}
