//! Block device enumeration.
//!
//! The plan session asks a `DeviceEnumerator` for the disks it may offer
//! exactly once, at construction. Two implementations are provided:
//!
//! - `LsblkEnumerator`: every whole disk reported by `lsblk`
//! - `FixedDevices`: an explicit list (from the command line or config)

use crate::error::{PartPlanError, Result};
use crate::process_guard::CommandProcessGroup;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Command;
use tracing::{debug, info};

/// A block device the operator can partition (e.g., `/dev/sda`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceRef {
    path: String,
}

impl DeviceRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Device node path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for DeviceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Source of the devices a session offers.
pub trait DeviceEnumerator {
    /// List devices in display order.
    ///
    /// # Errors
    ///
    /// Any failure here is fatal for the session being constructed.
    fn list_devices(&self) -> Result<Vec<DeviceRef>>;
}

/// Serves a caller-supplied device list.
#[derive(Debug, Clone, Default)]
pub struct FixedDevices(pub Vec<DeviceRef>);

impl FixedDevices {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(DeviceRef::new).collect())
    }
}

impl DeviceEnumerator for FixedDevices {
    fn list_devices(&self) -> Result<Vec<DeviceRef>> {
        Ok(self.0.clone())
    }
}

/// Lists whole disks via `lsblk -J -d -p -o NAME,TYPE`.
#[derive(Debug, Clone)]
pub struct LsblkEnumerator {
    program: String,
}

impl Default for LsblkEnumerator {
    fn default() -> Self {
        Self {
            program: "lsblk".to_string(),
        }
    }
}

impl LsblkEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different `lsblk` binary (mainly for tests).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl DeviceEnumerator for LsblkEnumerator {
    fn list_devices(&self) -> Result<Vec<DeviceRef>> {
        debug!("Enumerating disks with {}", self.program);

        let output = Command::new(&self.program)
            .args(["-J", "-d", "-p", "-o", "NAME,TYPE"])
            .in_new_process_group()
            .output()
            .map_err(|e| {
                PartPlanError::enumeration(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PartPlanError::enumeration(format!(
                "{} exited with {:?}: {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        let devices = parse_lsblk_json(&String::from_utf8_lossy(&output.stdout))?;
        info!("Found {} disk(s)", devices.len());
        Ok(devices)
    }
}

#[derive(Debug, Deserialize)]
struct LsblkOutput {
    #[serde(default)]
    blockdevices: Vec<LsblkDevice>,
}

#[derive(Debug, Deserialize)]
struct LsblkDevice {
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Parse `lsblk -J` output, keeping entries of type `disk`.
///
/// Names without a leading `/` (lsblk run without `-p`) are placed under `/dev`.
pub fn parse_lsblk_json(json: &str) -> Result<Vec<DeviceRef>> {
    let parsed: LsblkOutput = serde_json::from_str(json)
        .map_err(|e| PartPlanError::enumeration(format!("unreadable lsblk output: {}", e)))?;

    Ok(parsed
        .blockdevices
        .into_iter()
        .filter(|dev| dev.kind.as_deref() == Some("disk"))
        .map(|dev| {
            if dev.name.starts_with('/') {
                DeviceRef::new(dev.name)
            } else {
                DeviceRef::new(format!("/dev/{}", dev.name))
            }
        })
        .collect())
}
