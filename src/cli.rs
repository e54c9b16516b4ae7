use clap::Parser;
use std::path::PathBuf;

use crate::config::WizardConfig;
use crate::types::LabelKind;

/// partplan - plan a boot/swap/root layout for one disk
#[derive(Parser, Debug)]
#[command(name = "partplan")]
#[command(
    about = "Interactive partition planner: choose a label and a disk, review the partition paths"
)]
#[command(version)]
pub struct Cli {
    /// Devices to offer instead of asking lsblk (e.g., /dev/sda /dev/nvme0n1)
    pub devices: Vec<String>,

    /// Label selected when the wizard opens
    #[arg(short, long)]
    pub label: Option<LabelKind>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the committed plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn merge_into(&self, mut config: WizardConfig) -> WizardConfig {
        if let Some(label) = self.label {
            config.default_label = label;
        }
        if !self.devices.is_empty() {
            config.devices = self.devices.clone();
        }
        config.json_output |= self.json;
        config
    }
}
