//! User interface rendering module
//!
//! - `panels` - Label list, device list and path fields
//! - `footer` - Focus hint, key hints and the Ok/Cancel buttons
//!
//! Layout, top to bottom: details box, body row, footer.

mod footer;
mod panels;

use crate::app::App;
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the whole wizard screen
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(4),
        ])
        .split(f.area());

    render_details(f, app, chunks[0]);
    panels::render_body(f, app, chunks[1]);
    footer::render_footer(f, app, chunks[2]);
}

/// Details box: reversed instructions, then the label blurb or device info
fn render_details(f: &mut Frame, app: &App, area: Rect) {
    let state = app.ui();

    let mut lines = vec![
        Line::from(Span::styled(state.instructions.clone(), Styles::instructions())),
        Line::from(""),
    ];
    lines.extend(
        state
            .description
            .lines()
            .map(|line| Line::from(line.to_string())),
    );

    let details = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border(false))
            .title(Span::styled(" Details ", Styles::title())),
    );
    f.render_widget(details, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::FixedDevices;
    use crate::disk_info::DiskInspector;
    use crate::session::{CompletionHandlers, PlanSession};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    struct SilentInspector;

    impl DiskInspector for SilentInspector {
        fn describe_device(&self, _path: &str) -> String {
            String::new()
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with_device(path: &str) -> App {
        let devices = FixedDevices::from_paths([path]);
        let session = PlanSession::new(&devices, CompletionHandlers::new(|_| {}, || {})).unwrap();
        App::new(session, Box::new(SilentInspector))
    }

    #[test]
    fn test_renders_all_panels() {
        let app = app_with_device("/dev/sdb");
        let text = screen_text(&app);

        assert!(text.contains("Details"));
        assert!(text.contains("Partition Label"));
        assert!(text.contains("Found devices"));
        assert!(text.contains("GPT Partition"));
        assert!(text.contains("/dev/sdb"));
        assert!(text.contains("Use tab to arrive here -->>>"));
    }

    #[test]
    fn test_renders_derived_paths_after_selection() {
        let mut app = app_with_device("/dev/sdb");
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE))
            .unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();

        let text = screen_text(&app);
        assert!(text.contains("/dev/sdb1"));
        assert!(text.contains("/dev/sdb2"));
        assert!(text.contains("/dev/sdb3"));
    }
}
