//! Syntax tree pane rendering

use super::utils::{follow_selection, pane_block, visible_height};
use crate::ui::outline::TreeLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the syntax tree outline with the cursor row highlighted
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[TreeLine],
    cursor: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Syntax Tree ", is_focused);

    if outline.is_empty() {
        let paragraph = Paragraph::new("(no tree: the program did not parse)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let height = visible_height(area);
    *scroll_offset = follow_selection(*scroll_offset, cursor, height);

    let items: Vec<ListItem> = outline
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(height)
        .map(|(idx, line)| {
            let label_style = if line.depth == 0 {
                Style::default()
                    .fg(DEFAULT_THEME.type_name)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.node)
            };
            let mut item = ListItem::new(Line::from(vec![
                Span::raw("  ".repeat(line.depth)),
                Span::styled(line.label.clone(), label_style),
                Span::styled(
                    format!("  {}:{}", line.location.line, line.location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]));
            if idx == cursor {
                item = item.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }
            item
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
