//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the MiniJava
//! program with highlighting taken from the real token stream.
//!
//! # Features
//!
//! - Keywords, types, literals and method names colored by token kind
//! - Text between tokens (comments) dimmed
//! - Lines carrying a diagnostic marked in the error color
//! - The line of the node selected in the tree pane highlighted and kept in view
//! - Line numbering

use crate::parser::token::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the selected line is pinned to (None = center on first render)
    pub target_line_row: Option<usize>,
}

/// Everything the source pane shows
pub struct SourceRenderData<'a> {
    pub source: &'a str,
    pub tokens: &'a [Token],
    /// Diagnostic count per 1-based line
    pub error_lines: &'a FxHashMap<usize, usize>,
    /// 1-based line to highlight, 0 for none
    pub current_line: usize,
}

fn token_style(tokens: &[&Token], index: usize) -> Style {
    let token = tokens[index];
    match token.kind {
        TokenKind::Int | TokenKind::Boolean | TokenKind::Void => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        TokenKind::IntLiteral | TokenKind::BoolLiteral => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        TokenKind::LParen
        | TokenKind::RParen
        | TokenKind::LBracket
        | TokenKind::RBracket
        | TokenKind::LBrace
        | TokenKind::RBrace => Style::default().fg(DEFAULT_THEME.primary),
        TokenKind::Identifier => {
            let is_call = tokens
                .get(index + 1)
                .is_some_and(|next| next.is(TokenKind::LParen));
            if is_call {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            }
        }
        kind if kind.is_keyword() => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Tokens that start on `line_num`; the slice is sorted by position.
fn tokens_on_line(tokens: &[Token], line_num: usize) -> Vec<&Token> {
    let start = tokens.partition_point(|t| t.location.line < line_num);
    let end = tokens.partition_point(|t| t.location.line <= line_num);
    tokens[start..end]
        .iter()
        .filter(|t| !t.is(TokenKind::Eof))
        .collect()
}

fn gap_span(text: String) -> Span<'static> {
    if text.trim().is_empty() {
        Span::raw(text)
    } else {
        Span::styled(text, Style::default().fg(DEFAULT_THEME.comment))
    }
}

/// Split one source line into styled spans using the tokens found on it.
fn highlight_line(line: &str, tokens: &[&Token]) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut column = 0; // 0-based char index

    for (index, token) in tokens.iter().enumerate() {
        let start = token.location.column.saturating_sub(1).min(chars.len());
        if start < column {
            continue;
        }
        if start > column {
            spans.push(gap_span(chars[column..start].iter().collect()));
        }
        let end = (start + token.text.chars().count()).min(chars.len());
        spans.push(Span::styled(
            chars[start..end].iter().collect::<String>(),
            token_style(tokens, index),
        ));
        column = end;
    }

    if column < chars.len() {
        spans.push(gap_span(chars[column..].iter().collect()));
    }

    Line::from(spans)
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: &SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = data.source.lines().collect();
    let total_lines = lines.len();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the selected line at the target visual row
    if data.current_line > 0 && data.current_line <= total_lines {
        scroll_state.offset = (data.current_line - 1).saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == data.current_line;
            let is_error = data.error_lines.contains_key(&line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            let marker = if is_error { "✗" } else { " " };

            let mut content = highlight_line(line, &tokens_on_line(data.tokens, line_num));
            if is_current {
                let bg = if is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.current_line_bg
                };
                for span in &mut content.spans {
                    span.style = span.style.patch(Style::default().bg(bg));
                    if is_error {
                        span.style = span.style.fg(Color::White);
                    }
                }
            }

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.error)),
                Span::styled(format!("{:4} ", line_num), num_style),
            ];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
