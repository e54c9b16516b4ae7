//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the focused panel.
//! The registry both resolves raw key events into `KeyAction`s and supplies
//! the hint text shown in the footer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Where keyboard focus currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingContext {
    LabelList,
    DeviceList,
    PathFields,
    Buttons,
}

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Toggle focus between the panels and the Ok/Cancel row
    NextPanel,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Select the focused row or press the focused button
    Accept,
    /// Delete the last character of the focused path field
    DeleteChar,
    /// Abandon the plan
    Cancel,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && event.modifiers.contains(self.modifiers)
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Context-specific keybindings
    context_bindings: HashMap<BindingContext, Vec<Keybinding>>,
    /// Global keybindings (available in all contexts)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            context_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all contexts
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Tab, KeyAction::NextPanel, "Tab", "Panels/Buttons"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Cancel,
                "Ctrl+C",
                "Cancel",
            ),
        ];

        let navigation = vec![
            Keybinding::new(KeyCode::Up, KeyAction::MoveUp, "Up", "Move up"),
            Keybinding::new(KeyCode::Down, KeyAction::MoveDown, "Down", "Move down"),
            Keybinding::new(KeyCode::Left, KeyAction::MoveLeft, "Left", "Previous panel"),
            Keybinding::new(KeyCode::Right, KeyAction::MoveRight, "Right", "Next panel"),
        ];

        let mut label_list = navigation.clone();
        label_list.push(Keybinding::new(KeyCode::Enter, KeyAction::Accept, "Enter", "Select"));
        label_list.push(Keybinding::new(
            KeyCode::Char(' '),
            KeyAction::Accept,
            "Space",
            "Select",
        ));
        self.context_bindings.insert(BindingContext::LabelList, label_list);

        let mut device_list = navigation.clone();
        device_list.push(Keybinding::new(KeyCode::Enter, KeyAction::Accept, "Enter", "Select"));
        self.context_bindings.insert(BindingContext::DeviceList, device_list);

        // Printable characters are text input here, so no Space binding
        let mut path_fields = navigation;
        path_fields.push(Keybinding::new(
            KeyCode::Backspace,
            KeyAction::DeleteChar,
            "Bksp",
            "Delete",
        ));
        self.context_bindings.insert(BindingContext::PathFields, path_fields);

        self.context_bindings.insert(
            BindingContext::Buttons,
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::MoveLeft, "Left", "Ok"),
                Keybinding::new(KeyCode::Right, KeyAction::MoveRight, "Right", "Cancel"),
                Keybinding::new(KeyCode::Enter, KeyAction::Accept, "Enter", "Press"),
            ],
        );
    }

    /// Resolve a key event to an action in the given context
    pub fn resolve(&self, context: BindingContext, event: &KeyEvent) -> Option<KeyAction> {
        self.global_bindings
            .iter()
            .chain(self.bindings_for(context))
            .find(|binding| binding.matches(event))
            .map(|binding| binding.action)
    }

    /// Context-specific bindings (without the global ones)
    pub fn bindings_for(&self, context: BindingContext) -> &[Keybinding] {
        self.context_bindings
            .get(&context)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Footer hint text, e.g. `Up: Move up | Enter: Select | Tab: Panels/Buttons`
    pub fn hint_line(&self, context: BindingContext) -> String {
        self.bindings_for(context)
            .iter()
            .chain(self.global_bindings.iter())
            .map(|binding| format!("{}: {}", binding.display, binding.description))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
