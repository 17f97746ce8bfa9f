//! Main TUI application state and logic

use crate::parser::ast::SourceLocation;
use crate::parser::token::Token;
use crate::parser::{ErrorPolicy, Parser};
use crate::ui::outline::{outline, TreeLine};
use crate::ui::panes::{self, SourceRenderData, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
    Tokens,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tree -> tokens -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Diagnostics => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being viewed
    pub source: String,

    /// Full token stream, including lexically broken tokens
    pub tokens: Vec<Token>,

    /// Syntax tree outline; empty when the program did not parse
    pub outline: Vec<TreeLine>,

    /// Rendered diagnostics ordered by position
    pub diagnostics: Vec<(SourceLocation, String)>,

    /// Diagnostic count per 1-based source line
    pub error_lines: FxHashMap<usize, usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Selected outline row
    pub tree_cursor: usize,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub tree_scroll: usize,
    pub tokens_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Lex and parse `source` and set up the view over the result
    pub fn new(source: String, policy: ErrorPolicy) -> Self {
        let mut parser = Parser::new(&source).with_policy(policy);
        let (outline, diagnostics) = match parser.parse_with_diagnostics() {
            Ok(program) => (outline(&program), Vec::new()),
            Err(diagnostics) => (Vec::new(), diagnostics.entries()),
        };
        let tokens = parser.into_tokens();

        let mut error_lines: FxHashMap<usize, usize> = FxHashMap::default();
        for (location, _) in &diagnostics {
            *error_lines.entry(location.line).or_insert(0) += 1;
        }

        let status_message = if diagnostics.is_empty() {
            format!("Parsed successfully ({} tokens)", tokens.len())
        } else {
            format!("{} problem(s) found", diagnostics.len())
        };
        log::debug!("viewer ready: {}", status_message);

        App {
            source,
            tokens,
            outline,
            diagnostics,
            error_lines,
            focused_pane: FocusedPane::Source,
            tree_cursor: 0,
            source_scroll: SourceScrollState::default(),
            tree_scroll: 0,
            tokens_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Line of the selected tree node, or of the first diagnostic when there is no tree
    pub fn current_line(&self) -> usize {
        if let Some(line) = self.outline.get(self.tree_cursor) {
            return line.location.line;
        }
        self.diagnostics
            .first()
            .map_or(0, |(location, _)| location.line)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Syntax Tree (top) | Tokens (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let source_data = SourceRenderData {
            source: &self.source,
            tokens: &self.tokens,
            error_lines: &self.error_lines,
            current_line: self.current_line(),
        };
        panes::render_source_pane(
            frame,
            left_rows[0],
            &source_data,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.diagnostics,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        panes::render_tree_pane(
            frame,
            right_rows[0],
            &self.outline,
            self.tree_cursor,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_tokens_pane(
            frame,
            right_rows[1],
            &self.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        let node = if self.outline.is_empty() {
            None
        } else {
            Some((self.tree_cursor + 1, self.outline.len()))
        };
        panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.diagnostics.len(),
            node,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the selected line move down visually
                    match self.source_scroll.target_line_row {
                        Some(row) if self.current_line() > 0 => {
                            self.source_scroll.target_line_row = Some(row.saturating_add(1));
                        }
                        _ => {
                            self.source_scroll.offset = self.source_scroll.offset.saturating_sub(1);
                        }
                    }
                }
                FocusedPane::Tree => {
                    self.tree_cursor = self.tree_cursor.saturating_sub(1);
                    self.describe_selection();
                }
                FocusedPane::Tokens => {
                    self.tokens_scroll = self.tokens_scroll.saturating_sub(1);
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => match self.source_scroll.target_line_row {
                    Some(row) if self.current_line() > 0 => {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                    _ => {
                        self.source_scroll.offset = self.source_scroll.offset.saturating_add(1);
                    }
                },
                FocusedPane::Tree => {
                    if self.tree_cursor + 1 < self.outline.len() {
                        self.tree_cursor += 1;
                    }
                    self.describe_selection();
                }
                FocusedPane::Tokens => {
                    self.tokens_scroll = self.tokens_scroll.saturating_add(1);
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_add(1);
                }
            },
            KeyCode::Home => match self.focused_pane {
                FocusedPane::Source | FocusedPane::Tree => {
                    self.tree_cursor = 0;
                    self.describe_selection();
                }
                FocusedPane::Tokens => self.tokens_scroll = 0,
                FocusedPane::Diagnostics => self.diagnostics_scroll = 0,
            },
            KeyCode::End => match self.focused_pane {
                FocusedPane::Source | FocusedPane::Tree => {
                    self.tree_cursor = self.outline.len().saturating_sub(1);
                    self.describe_selection();
                }
                // Clamped to the last page on the next render
                FocusedPane::Tokens => self.tokens_scroll = usize::MAX,
                FocusedPane::Diagnostics => self.diagnostics_scroll = usize::MAX,
            },
            _ => {}
        }
    }

    fn describe_selection(&mut self) {
        if let Some(line) = self.outline.get(self.tree_cursor) {
            self.status_message = format!(
                "{} at line {}, column {}",
                line.label, line.location.line, line.location.column
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    const PROGRAM: &str = "class Main {\n\
                           \x20   public static void main() {\n\
                           \x20       System.out.println(new A().f(2));\n\
                           \x20   }\n\
                           }\n\
                           class A {\n\
                           \x20   public int f(int n) { return n * 2; }\n\
                           }\n";

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut focus = FocusedPane::Source;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, FocusedPane::Source);
        assert_eq!(FocusedPane::Source.prev(), FocusedPane::Diagnostics);
        assert_eq!(FocusedPane::Tree.prev().next(), FocusedPane::Tree);
    }

    #[test]
    fn test_tree_cursor_moves_source_line() {
        let mut app = App::new(PROGRAM.to_string(), ErrorPolicy::FailFast);
        assert!(app.diagnostics.is_empty());
        assert_eq!(app.current_line(), 1);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.tree_cursor, 1);
        assert_eq!(app.current_line(), 2);

        press(&mut app, KeyCode::End);
        assert_eq!(app.tree_cursor, app.outline.len() - 1);
        assert_eq!(app.current_line(), 7);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.tree_cursor, app.outline.len() - 1);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.tree_cursor, 0);
    }

    #[test]
    fn test_broken_program_marks_error_lines() {
        let source = "class Main {\n  public static void main() {\n    x = ;\n  }\n}\n";
        let app = App::new(source.to_string(), ErrorPolicy::Recover);
        assert!(app.outline.is_empty());
        assert_eq!(app.diagnostics.len(), 1);
        assert_eq!(app.error_lines.get(&3), Some(&1));
        assert_eq!(app.current_line(), 3);
    }

    #[test]
    fn test_lexical_errors_reach_the_viewer() {
        let source = "class Main { public static void main() { x = 1 # 2; } }";
        let app = App::new(source.to_string(), ErrorPolicy::FailFast);
        assert_eq!(app.tokens, crate::parser::lexer::tokenize(source).tokens);
        assert_eq!(app.diagnostics.len(), 2);
        assert!(app.diagnostics[0].1.starts_with("Lexer error at line 1, column 48"));
        assert_eq!(app.error_lines.get(&1), Some(&2));
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(PROGRAM.to_string(), ErrorPolicy::FailFast);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_smoke() {
        let mut app = App::new(PROGRAM.to_string(), ErrorPolicy::FailFast);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Source Code"));
        assert!(text.contains("Syntax Tree"));
        assert!(text.contains("Tokens"));
        assert!(text.contains("No problems found"));
        assert!(text.contains("class Main (main)"));
    }

    #[test]
    fn test_render_smoke_with_errors() {
        let mut app = App::new("class Main { # }".to_string(), ErrorPolicy::FailFast);
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        for code in [KeyCode::Tab, KeyCode::Tab, KeyCode::End, KeyCode::BackTab] {
            press(&mut app, code);
            terminal.draw(|f| app.render(f)).unwrap();
        }

        let text = screen_text(&terminal);
        assert!(text.contains("ERROR"));
        assert!(text.contains("did not parse"));
    }
}
