//! Partition plan model and the partition path derivation rule.
//!
//! # Design
//!
//! - **Pure logic**: No I/O, no side effects
//! - **Immutable result**: `PlanModel` fields are private; once a model is
//!   handed to a caller nothing can change it
//!
//! # Disk layout
//!
//! ```text
//! <disk>1 - boot
//! <disk>2 - swap
//! <disk>3 - root
//! ```
//!
//! Disks whose name ends in a digit (NVMe, MMC, loop) take a `p` separator:
//! `/dev/nvme0n1` → `/dev/nvme0n1p1`.

use crate::types::LabelKind;
use serde::Serialize;
use std::fmt;
use strum::{Display, EnumIter};

/// Text written by `describe()` for a path that has not been assigned.
pub const UNSET_PATH: &str = "<unset>";

/// The three partition roles a plan assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[derive(Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PartitionRole {
    Boot,
    Swap,
    Root,
}

impl PartitionRole {
    /// All roles in partition-number order.
    pub const fn all() -> &'static [Self] {
        &[Self::Boot, Self::Swap, Self::Root]
    }

    /// Partition number this role receives on the selected disk.
    pub const fn number(self) -> u32 {
        match self {
            Self::Boot => 1,
            Self::Swap => 2,
            Self::Root => 3,
        }
    }

    /// Label shown next to the editable path field.
    pub const fn field_label(self) -> &'static str {
        match self {
            Self::Boot => "Boot:",
            Self::Swap => "Swap:",
            Self::Root => "Root:",
        }
    }
}

/// Separator placed between a disk path and its partition number.
///
/// `"p"` when the disk path ends in an ASCII digit, empty otherwise.
pub fn partition_separator(disk: &str) -> &'static str {
    if disk.ends_with(|c: char| c.is_ascii_digit()) {
        "p"
    } else {
        ""
    }
}

/// Path of partition `number` on `disk`.
pub fn partition_path(disk: &str, number: u32) -> String {
    format!("{}{}{}", disk, partition_separator(disk), number)
}

/// Boot/swap/root device paths. An empty string means unassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartitionPaths {
    pub boot: String,
    pub swap: String,
    pub root: String,
}

impl PartitionPaths {
    /// Derive all three role paths from a disk path.
    ///
    /// ```
    /// use partplan::plan::PartitionPaths;
    ///
    /// let paths = PartitionPaths::derive("/dev/nvme0n1");
    /// assert_eq!(paths.boot, "/dev/nvme0n1p1");
    /// assert_eq!(paths.root, "/dev/nvme0n1p3");
    /// ```
    pub fn derive(disk: &str) -> Self {
        Self {
            boot: partition_path(disk, PartitionRole::Boot.number()),
            swap: partition_path(disk, PartitionRole::Swap.number()),
            root: partition_path(disk, PartitionRole::Root.number()),
        }
    }

    /// Path currently assigned to `role`.
    pub fn get(&self, role: PartitionRole) -> &str {
        match role {
            PartitionRole::Boot => &self.boot,
            PartitionRole::Swap => &self.swap,
            PartitionRole::Root => &self.root,
        }
    }

    /// Replace the path assigned to `role`.
    pub fn set(&mut self, role: PartitionRole, path: String) {
        match role {
            PartitionRole::Boot => self.boot = path,
            PartitionRole::Swap => self.swap = path,
            PartitionRole::Root => self.root = path,
        }
    }

    /// Roles whose path is still empty, in partition-number order.
    pub fn missing_roles(&self) -> Vec<PartitionRole> {
        PartitionRole::all()
            .iter()
            .copied()
            .filter(|role| self.get(*role).is_empty())
            .collect()
    }

    /// Returns true when every role has a non-empty path.
    pub fn is_complete(&self) -> bool {
        self.missing_roles().is_empty()
    }
}

/// A partitioning proposal: label kind, role paths and commit state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanModel {
    label: LabelKind,
    root: Option<String>,
    swap: Option<String>,
    boot: Option<String>,
    committed: bool,
}

impl PlanModel {
    /// Create an uncommitted plan for `label` with no paths assigned.
    pub fn new(label: LabelKind) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    /// Build the committed plan handed out by `PlanSession::commit`.
    pub(crate) fn committed(label: LabelKind, paths: PartitionPaths) -> Self {
        Self {
            label,
            root: Some(paths.root),
            swap: Some(paths.swap),
            boot: Some(paths.boot),
            committed: true,
        }
    }

    pub fn label(&self) -> LabelKind {
        self.label
    }

    pub fn boot(&self) -> Option<&str> {
        self.boot.as_deref()
    }

    pub fn swap(&self) -> Option<&str> {
        self.swap.as_deref()
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Path assigned to `role`, if any.
    pub fn path(&self, role: PartitionRole) -> Option<&str> {
        match role {
            PartitionRole::Boot => self.boot(),
            PartitionRole::Swap => self.swap(),
            PartitionRole::Root => self.root(),
        }
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Human-readable dump of every field in a fixed order.
    ///
    /// ```text
    /// label = GPT
    /// root = /dev/sda3
    /// swap = /dev/sda2
    /// boot = /dev/sda1
    /// committed = true
    /// ```
    pub fn describe(&self) -> String {
        let show = |path: &Option<String>| path.clone().unwrap_or_else(|| UNSET_PATH.to_string());
        [
            format!("label = {}", self.label),
            format!("root = {}", show(&self.root)),
            format!("swap = {}", show(&self.swap)),
            format!("boot = {}", show(&self.boot)),
            format!("committed = {}", self.committed),
        ]
        .join("\n")
    }
}

impl fmt::Display for PlanModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// ============================================================================
// Tests
// ============================================================================
