//! Plan Session State Machine
//!
//! `PlanSession` owns the partition plan under construction and its
//! finalization contract.
//!
//! # State Flow
//!
//! ```text
//! Idle ──select_label / select_device / edit_*──▶ Idle
//!   │
//!   ├──commit()──▶ Committed   (on_commit runs once with the PlanModel)
//!   └──cancel()──▶ Cancelled   (on_cancel runs once, no PlanModel)
//! ```
//!
//! # Invariants
//!
//! - The device list is fetched once, at construction
//! - `select_device` replaces all three role paths at once
//! - A committed `PlanModel` always has three non-empty paths
//! - Committed and Cancelled are terminal: every later operation returns
//!   `SessionError::Finalized` and no handler runs a second time

use crate::devices::{DeviceEnumerator, DeviceRef};
use crate::error::Result;
use crate::plan::{PartitionPaths, PartitionRole, PlanModel};
use crate::types::LabelKind;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Lifecycle of a plan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Accepting selections and edits
    Idle,
    /// Plan accepted and delivered (terminal)
    Committed,
    /// Plan abandoned (terminal)
    Cancelled,
}

impl SessionState {
    /// Returns true for Committed and Cancelled
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Committed => write!(f, "committed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Errors returned by session operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Commit attempted while one or more role paths are empty
    #[error("Plan is incomplete: no {} path assigned", join_roles(.missing))]
    IncompletePlan { missing: Vec<PartitionRole> },

    /// Operation attempted after commit or cancel
    #[error("Session is already {state}; no further changes are accepted")]
    Finalized { state: SessionState },
}

/// Result type for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

fn join_roles(roles: &[PartitionRole]) -> String {
    roles
        .iter()
        .map(|role| role.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// What the presentation layer should refresh after a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsChange {
    /// Show the blurb for this label kind
    Label(LabelKind),
    /// Fetch and show human-readable info for this device path
    Device(String),
}

/// Handler invoked with the committed plan.
pub type CommitHandler = Box<dyn FnOnce(PlanModel)>;
/// Handler invoked when the plan is abandoned.
pub type CancelHandler = Box<dyn FnOnce()>;

/// The two completion callbacks a session is created with.
pub struct CompletionHandlers {
    on_commit: CommitHandler,
    on_cancel: CancelHandler,
}

impl CompletionHandlers {
    pub fn new(
        on_commit: impl FnOnce(PlanModel) + 'static,
        on_cancel: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            on_commit: Box::new(on_commit),
            on_cancel: Box::new(on_cancel),
        }
    }
}

impl fmt::Debug for CompletionHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionHandlers").finish_non_exhaustive()
    }
}

/// Interactive controller for one partitioning plan.
///
/// # Example
///
/// ```
/// use partplan::devices::{DeviceRef, FixedDevices};
/// use partplan::session::{CompletionHandlers, PlanSession};
/// use partplan::types::LabelKind;
///
/// let devices = FixedDevices::from_paths(["/dev/sdb"]);
/// let handlers = CompletionHandlers::new(|plan| println!("{}", plan), || {});
/// let mut session = PlanSession::new(&devices, handlers).unwrap();
///
/// session.select_label(LabelKind::Gpt).unwrap();
/// session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();
/// let plan = session.commit().unwrap();
/// assert_eq!(plan.boot(), Some("/dev/sdb1"));
///
/// // Terminal: a second commit is rejected
/// assert!(session.commit().is_err());
/// ```
#[derive(Debug)]
pub struct PlanSession {
    devices: Vec<DeviceRef>,
    selected_label: LabelKind,
    selected_device: Option<DeviceRef>,
    working: PartitionPaths,
    state: SessionState,
    /// Taken exactly once, by commit or cancel
    handlers: Option<CompletionHandlers>,
}

impl PlanSession {
    /// Start a session, querying `enumerator` once for the device list.
    ///
    /// # Errors
    ///
    /// Returns the enumerator's error; the session cannot start without devices.
    pub fn new(enumerator: &dyn DeviceEnumerator, handlers: CompletionHandlers) -> Result<Self> {
        let devices = enumerator.list_devices()?;
        info!("Plan session started with {} device(s)", devices.len());

        Ok(Self {
            devices,
            selected_label: LabelKind::default(),
            selected_device: None,
            working: PartitionPaths::default(),
            state: SessionState::Idle,
            handlers: Some(handlers),
        })
    }

    /// Devices offered by this session, in enumeration order.
    pub fn devices(&self) -> &[DeviceRef] {
        &self.devices
    }

    pub fn selected_label(&self) -> LabelKind {
        self.selected_label
    }

    /// Device whose paths were last derived, if any.
    pub fn selected_device(&self) -> Option<&DeviceRef> {
        self.selected_device.as_ref()
    }

    /// Role paths as currently derived or typed.
    pub fn working_paths(&self) -> &PartitionPaths {
        &self.working
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_committed(&self) -> bool {
        self.state == SessionState::Committed
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    fn ensure_idle(&self, operation: &str) -> SessionResult<()> {
        if self.state.is_terminal() {
            warn!("Rejected {} on {} session", operation, self.state);
            return Err(SessionError::Finalized { state: self.state });
        }
        Ok(())
    }

    /// Choose the partition table label.
    pub fn select_label(&mut self, kind: LabelKind) -> SessionResult<DetailsChange> {
        self.ensure_idle("select_label")?;
        debug!("Label selected: {}", kind);
        self.selected_label = kind;
        Ok(DetailsChange::Label(kind))
    }

    /// Choose the target disk and derive boot/swap/root from its path.
    ///
    /// All three working paths are replaced together, discarding any edits.
    pub fn select_device(&mut self, device: &DeviceRef) -> SessionResult<DetailsChange> {
        self.ensure_idle("select_device")?;
        let derived = PartitionPaths::derive(device.path());
        debug!(
            "Device selected: {} -> boot={} swap={} root={}",
            device, derived.boot, derived.swap, derived.root
        );
        self.working = derived;
        self.selected_device = Some(device.clone());
        Ok(DetailsChange::Device(device.path().to_string()))
    }

    /// Overwrite the path for `role` with operator-typed text. No validation.
    pub fn edit_path(&mut self, role: PartitionRole, text: impl Into<String>) -> SessionResult<()> {
        self.ensure_idle("edit_path")?;
        self.working.set(role, text.into());
        Ok(())
    }

    pub fn edit_boot_path(&mut self, text: impl Into<String>) -> SessionResult<()> {
        self.edit_path(PartitionRole::Boot, text)
    }

    pub fn edit_swap_path(&mut self, text: impl Into<String>) -> SessionResult<()> {
        self.edit_path(PartitionRole::Swap, text)
    }

    pub fn edit_root_path(&mut self, text: impl Into<String>) -> SessionResult<()> {
        self.edit_path(PartitionRole::Root, text)
    }

    /// Accept the plan and hand it to `on_commit`.
    ///
    /// # Errors
    ///
    /// - `IncompletePlan` if any role path is empty; the session stays Idle
    /// - `Finalized` if the session was already committed or cancelled
    pub fn commit(&mut self) -> SessionResult<PlanModel> {
        self.ensure_idle("commit")?;

        let missing = self.working.missing_roles();
        if !missing.is_empty() {
            debug!("Commit rejected, missing: {}", join_roles(&missing));
            return Err(SessionError::IncompletePlan { missing });
        }

        let handlers = self
            .handlers
            .take()
            .ok_or(SessionError::Finalized { state: self.state })?;
        self.state = SessionState::Committed;

        let plan = PlanModel::committed(self.selected_label, self.working.clone());
        info!(
            "Plan committed: label={} boot={} swap={} root={}",
            self.selected_label, self.working.boot, self.working.swap, self.working.root
        );

        (handlers.on_commit)(plan.clone());
        Ok(plan)
    }

    /// Abandon the plan and notify `on_cancel`. No `PlanModel` is built.
    pub fn cancel(&mut self) -> SessionResult<()> {
        self.ensure_idle("cancel")?;

        let handlers = self
            .handlers
            .take()
            .ok_or(SessionError::Finalized { state: self.state })?;
        self.state = SessionState::Cancelled;
        info!("Plan cancelled");

        (handlers.on_cancel)();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
