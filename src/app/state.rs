//! Presentation state for the wizard screen
//!
//! Tracks focus and cursor positions plus the text shown in the details
//! panel. Plan data lives in `PlanSession`; nothing here feeds into commit.

use crate::components::keybindings::BindingContext;
use crate::plan::PartitionRole;

/// Instructions shown while the label list has focus
pub const LABEL_INSTRUCTIONS: &str = "Use UP/DOWN to move, SPACE/ENTER to select";
/// Instructions shown while the device list has focus
pub const DEVICE_INSTRUCTIONS: &str = "Use UP/DOWN to move, ENTER to select";
/// Instructions shown while the path fields have focus
pub const PATH_INSTRUCTIONS: &str = "Use UP/DOWN to move, can be editable, !!! BE CAREFUL !!!";
/// Details text when there is no device to describe
pub const NO_DEVICES_TEXT: &str = "No devices found";

/// Top-level focus: the editing panels or the Ok/Cancel row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Body,
    Footer,
}

/// Panel inside the body, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Labels,
    Devices,
    Paths,
}

/// Footer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Ok,
    Cancel,
}

/// Focus, cursors and details text
#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    pub panel: Panel,
    pub button: Button,
    /// Focused row in the label list
    pub label_cursor: usize,
    /// Focused row in the device list
    pub device_cursor: usize,
    /// Focused path field
    pub path_field: PartitionRole,
    /// Reversed line at the top of the details panel
    pub instructions: String,
    /// Label blurb or device info
    pub description: String,
    /// Last rejected action, shown until the next successful one
    pub status: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::Body,
            panel: Panel::Labels,
            button: Button::Ok,
            label_cursor: 0,
            device_cursor: 0,
            path_field: PartitionRole::Boot,
            instructions: LABEL_INSTRUCTIONS.to_string(),
            description: String::new(),
            status: None,
        }
    }
}

impl UiState {
    /// Keybinding context for the current focus
    pub fn binding_context(&self) -> BindingContext {
        match (self.focus, self.panel) {
            (Focus::Footer, _) => BindingContext::Buttons,
            (Focus::Body, Panel::Labels) => BindingContext::LabelList,
            (Focus::Body, Panel::Devices) => BindingContext::DeviceList,
            (Focus::Body, Panel::Paths) => BindingContext::PathFields,
        }
    }

    /// Move the focused path field up, stopping at boot
    pub fn previous_path_field(&mut self) {
        self.path_field = match self.path_field {
            PartitionRole::Boot | PartitionRole::Swap => PartitionRole::Boot,
            PartitionRole::Root => PartitionRole::Swap,
        };
    }

    /// Move the focused path field down, stopping at root
    pub fn next_path_field(&mut self) {
        self.path_field = match self.path_field {
            PartitionRole::Boot => PartitionRole::Swap,
            PartitionRole::Swap | PartitionRole::Root => PartitionRole::Root,
        };
    }
}
