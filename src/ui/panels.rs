//! Body row: label list on the left, devices and path fields on the right.

use crate::app::{App, Focus, Panel};
use crate::plan::PartitionRole;
use crate::theme::{Colors, Styles};
use crate::types::LabelKind;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub(super) fn render_body(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(30)])
        .split(area);

    render_labels(f, app, columns[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border(false))
        .title(Span::styled(" Partition Devices ", Styles::title()));
    let inner = block.inner(columns[1]);
    f.render_widget(block, columns[1]);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    render_devices(f, app, halves[0]);
    render_paths(f, app, halves[1]);
}

fn is_focused(app: &App, panel: Panel) -> bool {
    let state = app.ui();
    state.focus == Focus::Body && state.panel == panel
}

/// Radio-style list: `(X)` marks the selected label
fn render_labels(f: &mut Frame, app: &App, area: Rect) {
    let focused = is_focused(app, Panel::Labels);
    let selected = app.session().selected_label();

    let items: Vec<ListItem> = LabelKind::all()
        .iter()
        .map(|kind| {
            let marker = if *kind == selected { "(X)" } else { "( )" };
            let style = if *kind == selected {
                Style::default().fg(Colors::SECONDARY)
            } else {
                Style::default().fg(Colors::FG_PRIMARY)
            };
            ListItem::new(Line::from(Span::styled(
                format!("{} {}", marker, kind.display_name()),
                style,
            )))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border(focused))
                .title(Span::styled(" Partition Label ", Styles::title())),
        )
        .highlight_style(if focused { Styles::highlight() } else { Style::default() });

    let mut list_state = ListState::default();
    list_state.select(Some(app.ui().label_cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_devices(f: &mut Frame, app: &App, area: Rect) {
    let focused = is_focused(app, Panel::Devices);
    let session = app.session();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border(focused))
        .title(Span::styled(" Found devices ", Styles::title()));

    if session.devices().is_empty() {
        let empty = Paragraph::new("  No disks detected")
            .style(Style::default().fg(Colors::WARNING))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = session
        .devices()
        .iter()
        .map(|device| {
            let chosen = session.selected_device() == Some(device);
            let style = if chosen {
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Colors::FG_PRIMARY)
            };
            ListItem::new(Line::from(Span::styled(format!("< {} >", device), style)))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused { Styles::highlight() } else { Style::default() });

    let mut list_state = ListState::default();
    list_state.select(Some(app.ui().device_cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_paths(f: &mut Frame, app: &App, area: Rect) {
    let focused = is_focused(app, Panel::Paths);
    let paths = app.session().working_paths();

    let lines: Vec<Line> = PartitionRole::all()
        .iter()
        .map(|role| {
            let editing = focused && app.ui().path_field == *role;
            let value = paths.get(*role);
            let value_span = if editing {
                Span::styled(format!("{}_", value), Styles::highlight())
            } else {
                Span::styled(value.to_string(), Style::default().fg(Colors::FG_PRIMARY))
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<6}", role.field_label()),
                    Style::default().fg(Colors::FG_SECONDARY),
                ),
                value_span,
            ])
        })
        .collect();

    let fields = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border(focused))
            .title(Span::styled(" Partition roles ", Styles::title())),
    );
    f.render_widget(fields, area);
}
