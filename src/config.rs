//! Wizard configuration file handling.
//!
//! A JSON file can preset the label, pin the device list and change the
//! command used for disk details. Every field is optional; command-line
//! flags override whatever the file sets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::LabelKind;

/// Wizard configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WizardConfig {
    /// Label selected when the wizard opens
    pub default_label: LabelKind,
    /// Devices to offer; empty means every disk lsblk reports
    pub devices: Vec<String>,
    /// Command run for the details panel; the device path is appended
    pub inspect_command: Vec<String>,
    /// Print the committed plan as JSON instead of `name = value` lines
    pub json_output: bool,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            default_label: LabelKind::Gpt,
            devices: Vec::new(),
            inspect_command: vec!["fdisk".to_string(), "-l".to_string()],
            json_output: false,
        }
    }
}

impl WizardConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.inspect_command.is_empty() || self.inspect_command[0].trim().is_empty() {
            anyhow::bail!("inspect_command must name a program");
        }

        if let Some(blank) = self.devices.iter().position(|d| d.trim().is_empty()) {
            anyhow::bail!("devices[{}] is empty", blank);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = WizardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inspect_command, vec!["fdisk", "-l"]);
        assert_eq!(config.default_label, LabelKind::Gpt);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partplan.json");

        let config = WizardConfig {
            default_label: LabelKind::Mbr,
            devices: vec!["/dev/sdb".to_string()],
            ..WizardConfig::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = WizardConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{"default_label": "MBR"}"#).unwrap();

        let loaded = WizardConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.default_label, LabelKind::Mbr);
        assert!(loaded.devices.is_empty());
        assert_eq!(loaded.inspect_command, vec!["fdisk", "-l"]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("typo.json");
        fs::write(&path, r#"{"default_lable": "MBR"}"#).unwrap();

        assert!(WizardConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = WizardConfig::load_from_file("/nonexistent/partplan.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/partplan.json"));
    }

    #[test]
    fn test_validate_rejects_empty_command_and_blank_device() {
        let config = WizardConfig {
            inspect_command: Vec::new(),
            ..WizardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = WizardConfig {
            devices: vec!["/dev/sda".to_string(), " ".to_string()],
            ..WizardConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("devices[1]"));
    }
}
