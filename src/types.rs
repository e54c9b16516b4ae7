//! Partition table label kinds.
//!
//! Each kind carries a fixed `LabelInfo` record with the name shown in the
//! label list and the blurb shown in the details panel.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Display metadata for a partition table label kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelInfo {
    /// Name shown in the label list (e.g., "GPT Partition")
    pub name: &'static str,
    /// Description shown in the details panel
    pub description: &'static str,
}

const GPT_INFO: LabelInfo = LabelInfo {
    name: "GPT Partition",
    description: "New and better. GUID Partition Table: required for UEFI boot and disks over 2 TiB.",
};

const MBR_INFO: LabelInfo = LabelInfo {
    name: "MBR Partition",
    description: "Old and good. Master Boot Record: up to four primary partitions, for legacy BIOS machines.",
};

/// Partition table format written to the selected disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LabelKind {
    /// GUID Partition Table
    #[default]
    Gpt,
    /// Master Boot Record (DOS label)
    Mbr,
}

impl LabelKind {
    /// All label kinds in list order.
    pub const fn all() -> &'static [Self] {
        &[Self::Gpt, Self::Mbr]
    }

    /// Fixed display record for this kind.
    pub const fn info(self) -> &'static LabelInfo {
        match self {
            Self::Gpt => &GPT_INFO,
            Self::Mbr => &MBR_INFO,
        }
    }

    /// Name shown in the label list.
    pub const fn display_name(self) -> &'static str {
        self.info().name
    }

    /// Blurb shown in the details panel when this kind is focused.
    pub const fn description(self) -> &'static str {
        self.info().description
    }

    /// Position of this kind in `all()`.
    pub fn index(self) -> usize {
        Self::all().iter().position(|k| *k == self).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_label_kind_serialization() {
        assert_eq!(LabelKind::Gpt.to_string(), "GPT");
        assert_eq!(LabelKind::Mbr.to_string(), "MBR");
    }

    #[test]
    fn test_label_kind_parsing_is_case_insensitive() {
        assert_eq!(LabelKind::from_str("GPT").unwrap(), LabelKind::Gpt);
        assert_eq!(LabelKind::from_str("mbr").unwrap(), LabelKind::Mbr);
        assert!(LabelKind::from_str("msdos").is_err());
    }

    #[test]
    fn test_label_kind_default_is_gpt() {
        assert_eq!(LabelKind::default(), LabelKind::Gpt);
    }

    #[test]
    fn test_all_matches_iteration_order() {
        let iterated: Vec<LabelKind> = LabelKind::iter().collect();
        assert_eq!(iterated, LabelKind::all());
        assert_eq!(LabelKind::Gpt.index(), 0);
        assert_eq!(LabelKind::Mbr.index(), 1);
    }

    #[test]
    fn test_label_info_records() {
        assert_eq!(LabelKind::Gpt.display_name(), "GPT Partition");
        assert_eq!(LabelKind::Mbr.display_name(), "MBR Partition");
        assert!(LabelKind::Gpt.description().starts_with("New and better"));
        assert!(LabelKind::Mbr.description().starts_with("Old and good"));
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let json = serde_json::to_string(&LabelKind::Mbr).unwrap();
        assert_eq!(json, "\"MBR\"");
        let parsed: LabelKind = serde_json::from_str("\"GPT\"").unwrap();
        assert_eq!(parsed, LabelKind::Gpt);
    }
}
