//! Reusable UI components

pub mod keybindings;
