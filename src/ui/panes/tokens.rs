//! Token stream pane rendering

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::token::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Render one row per token: position, category and source text
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    let height = visible_height(area);
    *scroll_offset = clamp_scroll(*scroll_offset, tokens.len(), height);

    let items: Vec<ListItem> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(height)
        .map(|token| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4}:{:<3} ", token.location.line, token.location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<12} ", format!("{:?}", token.kind)),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(token.text.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
