//! Footer: focus hint, key hints and the Ok/Cancel buttons.

use crate::app::{App, Button, Focus};
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub(super) fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let state = app.ui();
    let footer_focused = state.focus == Focus::Footer;

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Styles::border(footer_focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(rows[0]);

    let left = match &state.status {
        Some(status) => Span::styled(status.clone(), Styles::error()),
        None => Span::raw("Use tab to arrive here -->>>"),
    };
    f.render_widget(Paragraph::new(Line::from(left)), columns[0]);

    let button = |label: &'static str, which: Button| {
        Span::styled(
            format!("[ {} ]", label),
            Styles::button(footer_focused && state.button == which),
        )
    };
    let buttons = Paragraph::new(Line::from(vec![
        button("Ok", Button::Ok),
        Span::raw("  "),
        button("Cancel", Button::Cancel),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(buttons, columns[1]);

    let hints = app.keybindings().hint_line(state.binding_context());
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, Styles::help()))),
        rows[1],
    );
}
