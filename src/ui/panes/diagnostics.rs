//! Diagnostics pane rendering

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::ast::SourceLocation;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the lexical and syntax diagnostics, ordered by position
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    entries: &[(SourceLocation, String)],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Diagnostics ", is_focused);

    if entries.is_empty() {
        let paragraph = Paragraph::new("No problems found")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let height = visible_height(area);
    *scroll_offset = clamp_scroll(*scroll_offset, entries.len(), height);

    let items: Vec<ListItem> = entries
        .iter()
        .skip(*scroll_offset)
        .take(height)
        .map(|(_, message)| {
            ListItem::new(message.as_str()).style(Style::default().fg(DEFAULT_THEME.error))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
