//! UI rendering functions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::app::{AdvicePhase, App};

/// Application title shown in the header.
pub const TITLE: &str = "💸 Financial Literacy Chatbot";

/// Static welcome message shown above the chat area.
pub const WELCOME: &str = "Welcome to the Financial Literacy Chatbot! Ask questions about \
     budgeting, saving, and personal finance tips. The advice here is inspired by The Richest \
     Man in Babylon, a classic book on personal finance principles.";

/// The four fixed sidebar tips, always shown regardless of chat state.
pub const TIPS: [&str; 4] = [
    "Save a fixed percentage of your income each month.",
    "Avoid unnecessary debt.",
    "Invest wisely to grow your wealth.",
    "Track expenses and create a budget.",
];

/// Width of the tips sidebar, including borders.
const SIDEBAR_WIDTH: u16 = 36;

/// Maximum length for the truncated query shown as the advice panel title.
const QUERY_TITLE_MAX_LEN: usize = 40;

const SPINNER_FRAMES: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Spinner glyph for the given frame counter. Advances every other frame.
pub fn spinner_frame(frame_count: u64) -> &'static str {
    SPINNER_FRAMES[(frame_count / 2) as usize % SPINNER_FRAMES.len()]
}

/// Truncates a string to the given maximum number of chars, appending "..." if truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    // Replace newlines with spaces for single-line display
    let single_line: String = s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();

    if single_line.chars().count() <= max_len {
        single_line
    } else {
        let kept: String = single_line
            .chars()
            .take(max_len.saturating_sub(3))
            .collect();
        format!("{}...", kept)
    }
}

/// Status indicator label and color for the footer.
fn phase_indicator(phase: AdvicePhase) -> (&'static str, Color) {
    match phase {
        AdvicePhase::Idle => ("IDLE", Color::Cyan),
        AdvicePhase::Thinking => ("THINKING", Color::Yellow),
        AdvicePhase::Answered => ("READY", Color::Green),
    }
}

/// Draw the main UI.
pub fn draw_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer panel (border + 1 content row + border)
        ])
        .split(f.area());

    draw_title(f, chunks[0]);

    // Body: main column plus fixed-width tips sidebar
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
        .split(chunks[1]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Welcome panel
            Constraint::Min(3),    // Advice panel
            Constraint::Length(3), // Input panel
        ])
        .split(body[0]);

    draw_welcome(f, main[0]);
    draw_advice(f, main[1], app);
    draw_input(f, main[2], app);
    draw_sidebar(f, body[1]);
    draw_footer(f, chunks[2], app);
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, area);
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let welcome = Paragraph::new(WELCOME)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(welcome, area);
}

fn draw_advice(f: &mut Frame, area: Rect, app: &App) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Chat with the Financial Literacy Bot 🤖 ");

    let content: Vec<Line> = match app.phase {
        AdvicePhase::Idle => {
            vec![Line::from(Span::styled(
                "Type a question below and press Enter.",
                Style::default().fg(Color::DarkGray),
            ))]
        }
        AdvicePhase::Thinking => {
            block = block.border_style(Style::default().fg(Color::Yellow));
            vec![Line::from(Span::styled(
                format!("{} Thinking...", spinner_frame(app.frame_count)),
                Style::default().fg(Color::Yellow),
            ))]
        }
        AdvicePhase::Answered => {
            block = block.border_style(Style::default().fg(Color::Green));
            if let Some(query) = &app.last_query {
                block = block.title_bottom(
                    Line::from(format!(" {} ", truncate_str(query, QUERY_TITLE_MAX_LEN)))
                        .right_aligned(),
                );
            }

            let mut lines = vec![
                Line::from(Span::styled(
                    "Here's some advice:",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::raw(""),
            ];
            if let Some(advice) = app.visible_advice() {
                lines.push(Line::raw(advice.to_string()));
            }
            lines
        }
    };

    let advice_panel = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(advice_panel, area);
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    let inner_width = area.width.saturating_sub(2);

    // Keep the cursor in view when the input is wider than the panel
    let prefix: String = app.input.chars().take(app.cursor).collect();
    let cursor_width = prefix.width() as u16;
    let scroll_x = cursor_width.saturating_sub(inner_width.saturating_sub(1));

    let input_panel = Paragraph::new(app.input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" What would you like to know? "),
        )
        .scroll((0, scroll_x));
    f.render_widget(input_panel, area);

    f.set_cursor_position(Position::new(
        area.x + 1 + cursor_width.saturating_sub(scroll_x),
        area.y + 1,
    ));
}

fn draw_sidebar(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for (i, tip) in TIPS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(vec![
            Span::raw("🔸 "),
            Span::raw(*tip),
        ]));
    }

    let sidebar = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" 💡 Financial Tips "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(sidebar, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let shortcuts = "[Enter] Ask  [Esc] Clear  [Ctrl+C] Quit";

    let (status_text, status_color) = phase_indicator(app.phase);
    let status_dot = "● ";

    // Right-align the status indicator after the shortcuts
    let inner_width = area.width.saturating_sub(2) as usize;
    let status_len = status_dot.width() + status_text.width();
    let spacing = inner_width.saturating_sub(shortcuts.width() + status_len);

    let footer_line = Line::from(vec![
        Span::styled(shortcuts, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(spacing)),
        Span::styled(status_dot, Style::default().fg(status_color)),
        Span::styled(status_text, Style::default().fg(status_color)),
    ]);

    let footer = Paragraph::new(footer_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(format!(" {} ", app.session_id)).right_aligned()),
    );
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tips_are_exactly_four_fixed_strings() {
        assert_eq!(TIPS.len(), 4);
        assert_eq!(TIPS[0], "Save a fixed percentage of your income each month.");
        assert_eq!(TIPS[1], "Avoid unnecessary debt.");
        assert_eq!(TIPS[2], "Invest wisely to grow your wealth.");
        assert_eq!(TIPS[3], "Track expenses and create a budget.");
    }

    // truncate_str tests

    #[test]
    fn test_truncate_str_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_str_long_string() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hello world", 10), "hello w...");
    }

    #[test]
    fn test_truncate_str_with_newlines() {
        assert_eq!(truncate_str("hello\nworld", 20), "hello world");
        assert_eq!(truncate_str("a\nb\nc", 10), "a b c");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        // Char-based truncation must not split multibyte sequences
        assert_eq!(truncate_str("💸💸💸💸💸", 10), "💸💸💸💸💸");
        assert_eq!(truncate_str("💸💸💸💸💸💸", 5), "💸💸...");
    }

    #[test]
    fn test_truncate_str_empty() {
        assert_eq!(truncate_str("", 10), "");
    }

    #[test]
    fn test_truncate_str_small_max_len() {
        assert_eq!(truncate_str("hello", 2), "...");
        assert_eq!(truncate_str("hello", 3), "...");
        assert_eq!(truncate_str("hello", 4), "h...");
    }

    // spinner tests

    #[test]
    fn test_spinner_frame_deterministic() {
        assert_eq!(spinner_frame(0), spinner_frame(0));
        assert_eq!(spinner_frame(0), spinner_frame(1));
    }

    #[test]
    fn test_spinner_frame_cycles() {
        let full_cycle = (SPINNER_FRAMES.len() * 2) as u64;
        assert_eq!(spinner_frame(0), spinner_frame(full_cycle));
        assert_ne!(spinner_frame(0), spinner_frame(2));
    }
}
