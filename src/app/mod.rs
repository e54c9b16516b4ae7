//! Application module
//!
//! Contains the event loop and the translation of key events into plan
//! session operations.
//!
//! # Module Structure
//! - `state` - Presentation state types (UiState, Focus, Panel, Button)
//! - Main module - App struct and event loop

mod state;

pub use state::{
    Button, DEVICE_INSTRUCTIONS, Focus, LABEL_INSTRUCTIONS, NO_DEVICES_TEXT, PATH_INSTRUCTIONS,
    Panel, UiState,
};

use crate::components::keybindings::{BindingContext, KeyAction, KeybindingContext};
use crate::disk_info::{DiskInspector, InfoWorker};
use crate::error::Result;
use crate::session::{DetailsChange, PlanSession, SessionError};
use crate::types::LabelKind;
use crate::ui;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tracing::{debug, info};

/// Main application struct
pub struct App {
    session: PlanSession,
    ui: UiState,
    info: InfoWorker,
    keybindings: KeybindingContext,
}

impl App {
    /// Create the application around a started session.
    ///
    /// Disk inspection runs on a worker thread owned by the App.
    pub fn new(session: PlanSession, inspector: Box<dyn DiskInspector>) -> Self {
        let mut app = Self {
            ui: UiState {
                label_cursor: session.selected_label().index(),
                ..UiState::default()
            },
            session,
            info: InfoWorker::spawn(inspector),
            keybindings: KeybindingContext::new(),
        };
        app.show_label_details(app.session.selected_label());
        app
    }

    pub fn session(&self) -> &PlanSession {
        &self.session
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn keybindings(&self) -> &KeybindingContext {
        &self.keybindings
    }

    /// Run the main application loop until the session is committed or cancelled
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        while !self.session.is_terminal() {
            self.poll_info();

            terminal.draw(|f| ui::render(f, self))?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if key_event.kind == KeyEventKind::Press {
                        self.handle_key(key_event)?;
                    }
                }
            }
        }

        info!("Application loop finished: session {}", self.session.state());
        Ok(())
    }

    /// Apply a finished disk inspection to the details panel.
    ///
    /// Returns true when the description changed.
    pub fn poll_info(&mut self) -> bool {
        match self.info.poll() {
            Some(response) => {
                debug!("Disk info received for {}", response.path);
                self.ui.description = response.text;
                true
            }
            None => false,
        }
    }

    /// Handle one key press. Returns true once the session is finalized.
    pub fn handle_key(&mut self, event: KeyEvent) -> Result<bool> {
        let context = self.ui.binding_context();

        match self.keybindings.resolve(context, &event) {
            Some(KeyAction::NextPanel) => {
                self.ui.focus = match self.ui.focus {
                    Focus::Body => Focus::Footer,
                    Focus::Footer => Focus::Body,
                };
            }
            Some(KeyAction::Cancel) => self.session.cancel()?,
            Some(action) => match context {
                BindingContext::LabelList => self.handle_label_list(action)?,
                BindingContext::DeviceList => self.handle_device_list(action)?,
                BindingContext::PathFields => self.handle_path_fields(action)?,
                BindingContext::Buttons => self.handle_buttons(action)?,
            },
            None => {
                if context == BindingContext::PathFields {
                    if let KeyCode::Char(c) = event.code {
                        if !event.modifiers.contains(KeyModifiers::CONTROL) {
                            self.type_into_path_field(c)?;
                        }
                    }
                }
            }
        }

        Ok(self.session.is_terminal())
    }

    fn handle_label_list(&mut self, action: KeyAction) -> Result<()> {
        let labels = LabelKind::all();
        match action {
            KeyAction::MoveUp => {
                self.ui.label_cursor = self.ui.label_cursor.saturating_sub(1);
                self.select_focused_label()?;
            }
            KeyAction::MoveDown => {
                self.ui.label_cursor = (self.ui.label_cursor + 1).min(labels.len() - 1);
                self.select_focused_label()?;
            }
            KeyAction::Accept => self.select_focused_label()?,
            KeyAction::MoveRight => {
                self.ui.panel = Panel::Devices;
                self.ui.instructions = DEVICE_INSTRUCTIONS.to_string();
                self.show_focused_device_info();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_device_list(&mut self, action: KeyAction) -> Result<()> {
        let count = self.session.devices().len();
        match action {
            KeyAction::MoveUp if count > 0 => {
                self.ui.device_cursor = self.ui.device_cursor.saturating_sub(1);
                self.select_focused_device()?;
            }
            KeyAction::MoveDown if count > 0 => {
                self.ui.device_cursor = (self.ui.device_cursor + 1).min(count - 1);
                self.select_focused_device()?;
            }
            KeyAction::Accept => self.select_focused_device()?,
            KeyAction::MoveLeft => {
                self.ui.panel = Panel::Labels;
                self.ui.instructions = LABEL_INSTRUCTIONS.to_string();
                let focused = LabelKind::all()[self.ui.label_cursor];
                self.show_label_details(focused);
            }
            KeyAction::MoveRight => {
                self.ui.panel = Panel::Paths;
                self.ui.instructions = PATH_INSTRUCTIONS.to_string();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_path_fields(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::MoveUp => self.ui.previous_path_field(),
            KeyAction::MoveDown => self.ui.next_path_field(),
            KeyAction::MoveLeft => {
                self.ui.panel = Panel::Devices;
                self.ui.instructions = DEVICE_INSTRUCTIONS.to_string();
                self.show_focused_device_info();
            }
            KeyAction::DeleteChar => {
                let role = self.ui.path_field;
                let mut text = self.session.working_paths().get(role).to_string();
                text.pop();
                self.session.edit_path(role, text)?;
                self.ui.status = None;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_buttons(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::MoveLeft => self.ui.button = Button::Ok,
            KeyAction::MoveRight => self.ui.button = Button::Cancel,
            KeyAction::Accept => match self.ui.button {
                Button::Ok => match self.session.commit() {
                    Ok(_) => self.ui.status = None,
                    Err(err @ SessionError::IncompletePlan { .. }) => {
                        self.ui.status = Some(err.to_string());
                    }
                    Err(err) => return Err(err.into()),
                },
                Button::Cancel => self.session.cancel()?,
            },
            _ => {}
        }
        Ok(())
    }

    fn type_into_path_field(&mut self, c: char) -> Result<()> {
        let role = self.ui.path_field;
        let mut text = self.session.working_paths().get(role).to_string();
        text.push(c);
        self.session.edit_path(role, text)?;
        self.ui.status = None;
        Ok(())
    }

    fn select_focused_label(&mut self) -> Result<()> {
        let kind = LabelKind::all()[self.ui.label_cursor];
        let change = self.session.select_label(kind)?;
        self.apply_details(change);
        Ok(())
    }

    fn select_focused_device(&mut self) -> Result<()> {
        let Some(device) = self.session.devices().get(self.ui.device_cursor).cloned() else {
            self.ui.description = NO_DEVICES_TEXT.to_string();
            return Ok(());
        };
        let change = self.session.select_device(&device)?;
        self.ui.status = None;
        self.apply_details(change);
        Ok(())
    }

    fn apply_details(&mut self, change: DetailsChange) {
        match change {
            DetailsChange::Label(kind) => self.show_label_details(kind),
            DetailsChange::Device(path) => self.request_device_info(&path),
        }
    }

    fn show_label_details(&mut self, kind: LabelKind) {
        self.info.cancel();
        self.ui.description = kind.description().to_string();
    }

    fn show_focused_device_info(&mut self) {
        match self.session.devices().get(self.ui.device_cursor) {
            Some(device) => {
                let path = device.path().to_string();
                self.request_device_info(&path);
            }
            None => {
                self.info.cancel();
                self.ui.description = NO_DEVICES_TEXT.to_string();
            }
        }
    }

    fn request_device_info(&mut self, path: &str) {
        self.info.request(path);
        self.ui.description = format!("Reading {} ...", path);
    }
}
