//! Application state and core logic.

use tracing::{debug, info};

use crate::config::Config;
use crate::resolver;

/// Phase of the advice panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvicePhase {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Cosmetic spinner shown while the (already computed) advice waits.
    Thinking,
    /// Advice visible.
    Answered,
}

/// Main application state.
pub struct App {
    /// Text currently in the input box.
    pub input: String,
    /// Cursor position as a char index into `input`.
    pub cursor: usize,
    /// The most recently submitted query, shown as the advice panel title.
    pub last_query: Option<String>,
    /// Advice for `last_query`. Set at submit time; only displayed once the
    /// thinking phase has elapsed.
    advice: Option<String>,
    pub phase: AdvicePhase,
    /// Frames remaining before Thinking flips to Answered.
    thinking_frames_left: u16,
    /// Frame counter for animations (incremented each render cycle).
    pub frame_count: u64,
    /// Session ID for this MoneyMind invocation (always populated).
    pub session_id: String,
    /// Loaded configuration.
    pub config: Config,
}

impl App {
    pub fn new(config: Config, session_id: String) -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            last_query: None,
            advice: None,
            phase: AdvicePhase::Idle,
            thinking_frames_left: 0,
            frame_count: 0,
            session_id,
            config,
        }
    }

    /// Byte offset into `input` corresponding to the char cursor.
    fn byte_cursor(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_cursor();
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_cursor();
        self.input.remove(at);
    }

    /// Delete the character at the cursor position (delete key).
    pub fn delete_char(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let at = self.byte_cursor();
        self.input.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clear the input box without touching the advice panel.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Submit the current input to the resolver.
    ///
    /// Empty input is ignored: the resolver is never invoked and no advice
    /// is recorded. Whitespace-only input is still a query.
    pub fn submit(&mut self) {
        if self.input.is_empty() {
            debug!("empty_input_ignored");
            return;
        }

        let query = std::mem::take(&mut self.input);
        self.cursor = 0;

        // Log the length only, not the content.
        info!(query_chars = query.chars().count(), "query_submitted");

        let advice = resolver::resolve(&query);
        self.last_query = Some(query);
        self.advice = Some(advice);
        self.thinking_frames_left = self.config.ui.thinking_frames;
        self.phase = if self.thinking_frames_left == 0 {
            AdvicePhase::Answered
        } else {
            AdvicePhase::Thinking
        };
    }

    /// Advance one frame: bump the animation counter and count down the
    /// cosmetic thinking phase.
    pub fn tick(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
        if self.phase == AdvicePhase::Thinking {
            self.thinking_frames_left = self.thinking_frames_left.saturating_sub(1);
            if self.thinking_frames_left == 0 {
                self.phase = AdvicePhase::Answered;
            }
        }
    }

    /// The advice to display, if the thinking phase has elapsed.
    pub fn visible_advice(&self) -> Option<&str> {
        match self.phase {
            AdvicePhase::Answered => self.advice.as_deref(),
            AdvicePhase::Idle | AdvicePhase::Thinking => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;

    fn test_app() -> App {
        // No thinking delay so advice is visible immediately after submit
        let config = Config {
            ui: UiConfig { thinking_frames: 0 },
            ..Config::default()
        };
        App::new(config, "abc123".to_string())
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_empty_submit_is_ignored() {
        let mut app = test_app();
        app.submit();
        assert_eq!(app.phase, AdvicePhase::Idle);
        assert!(app.visible_advice().is_none());
        assert!(app.last_query.is_none());
    }

    #[test]
    fn test_submit_resolves_and_clears_input() {
        let mut app = test_app();
        type_str(&mut app, "How do I save money?");
        app.submit();

        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.last_query.as_deref(), Some("How do I save money?"));
        let advice = app.visible_advice().expect("advice should be visible");
        assert!(!advice.is_empty());
    }

    #[test]
    fn test_whitespace_only_still_resolves() {
        let mut app = test_app();
        type_str(&mut app, "   ");
        app.submit();
        assert!(app.visible_advice().is_some());
    }

    #[test]
    fn test_thinking_phase_hides_advice_until_elapsed() {
        let config = Config {
            ui: UiConfig { thinking_frames: 3 },
            ..Config::default()
        };
        let mut app = App::new(config, "abc123".to_string());
        type_str(&mut app, "budget help");
        app.submit();

        assert_eq!(app.phase, AdvicePhase::Thinking);
        assert!(app.visible_advice().is_none());

        app.tick();
        app.tick();
        assert!(app.visible_advice().is_none());
        app.tick();
        assert_eq!(app.phase, AdvicePhase::Answered);
        assert!(app.visible_advice().is_some());
    }

    #[test]
    fn test_resubmit_replaces_previous_advice() {
        let mut app = test_app();
        type_str(&mut app, "how do I save?");
        app.submit();
        let first = app.visible_advice().unwrap().to_string();

        type_str(&mut app, "what about debt?");
        app.submit();
        let second = app.visible_advice().unwrap().to_string();

        assert_ne!(first, second);
        assert_eq!(app.last_query.as_deref(), Some("what about debt?"));
    }

    #[test]
    fn test_insert_and_cursor_movement() {
        let mut app = test_app();
        type_str(&mut app, "debt");
        assert_eq!(app.cursor, 4);

        app.move_home();
        app.insert_char('-');
        assert_eq!(app.input, "-debt");
        assert_eq!(app.cursor, 1);

        app.move_end();
        assert_eq!(app.cursor, 5);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut app = test_app();
        type_str(&mut app, "abc");

        app.backspace();
        assert_eq!(app.input, "ab");

        app.move_home();
        app.delete_char();
        assert_eq!(app.input, "b");

        // Delete at end of input is a no-op
        app.move_end();
        app.delete_char();
        assert_eq!(app.input, "b");

        // Backspace at start of input is a no-op
        app.move_home();
        app.backspace();
        assert_eq!(app.input, "b");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut app = test_app();
        type_str(&mut app, "💸ok");
        assert_eq!(app.cursor, 3);

        app.move_home();
        app.move_right();
        app.backspace();
        assert_eq!(app.input, "ok");
        assert_eq!(app.cursor, 0);

        app.insert_char('é');
        assert_eq!(app.input, "éok");
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_clear_input_keeps_advice() {
        let mut app = test_app();
        type_str(&mut app, "saving tips");
        app.submit();
        assert!(app.visible_advice().is_some());

        type_str(&mut app, "half typed");
        app.clear_input();
        assert!(app.input.is_empty());
        assert!(app.visible_advice().is_some());
    }
}
