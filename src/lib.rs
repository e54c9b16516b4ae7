//! partplan library
//!
//! Interactive planning of a boot/swap/root layout for one disk. The
//! wizard only produces a plan; it never writes to any device.

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod devices;
pub mod disk_info;
pub mod error;
pub mod plan;
pub mod process_guard;
pub mod session;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use config::WizardConfig;
pub use devices::{DeviceEnumerator, DeviceRef, FixedDevices, LsblkEnumerator};
pub use disk_info::{CommandInspector, DiskInspector, InfoWorker};
pub use error::{PartPlanError, Result};
pub use plan::{PartitionPaths, PartitionRole, PlanModel, partition_path};
pub use process_guard::CommandProcessGroup;
pub use session::{CompletionHandlers, DetailsChange, PlanSession, SessionError, SessionState};
pub use types::LabelKind;
