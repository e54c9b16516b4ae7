//! Tests for the plan session lifecycle
//!
//! These tests verify:
//! - The select label / select device / commit flow end to end
//! - Cancel never produces a plan
//! - Rejection of incomplete and repeated finalization
//! - Device enumeration failures surface at construction

use partplan::devices::{DeviceEnumerator, DeviceRef, FixedDevices, LsblkEnumerator};
use partplan::error::PartPlanError;
use partplan::plan::{PartitionPaths, PartitionRole, PlanModel};
use partplan::session::{CompletionHandlers, PlanSession, SessionError, SessionState};
use partplan::types::LabelKind;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Records every handler invocation
#[derive(Default)]
struct Recorder {
    plans: RefCell<Vec<PlanModel>>,
    cancels: Cell<usize>,
}

fn session_with(paths: &[&str]) -> (PlanSession, Rc<Recorder>) {
    let recorder = Rc::new(Recorder::default());
    let on_commit = Rc::clone(&recorder);
    let on_cancel = Rc::clone(&recorder);
    let handlers = CompletionHandlers::new(
        move |plan| on_commit.plans.borrow_mut().push(plan),
        move || on_cancel.cancels.set(on_cancel.cancels.get() + 1),
    );
    let devices = FixedDevices::from_paths(paths.iter().copied());
    let session = PlanSession::new(&devices, handlers).expect("fixed devices never fail");
    (session, recorder)
}

// =============================================================================
// End-to-End Flow
// =============================================================================

#[test]
fn test_single_disk_gpt_commit() {
    let (mut session, recorder) = session_with(&["/dev/sdb"]);

    session.select_label(LabelKind::Gpt).unwrap();
    session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();
    session.commit().unwrap();

    let plans = recorder.plans.borrow();
    assert_eq!(plans.len(), 1);
    let plan = &plans[0];
    assert_eq!(plan.label(), LabelKind::Gpt);
    assert_eq!(plan.boot(), Some("/dev/sdb1"));
    assert_eq!(plan.swap(), Some("/dev/sdb2"));
    assert_eq!(plan.root(), Some("/dev/sdb3"));
    assert!(plan.is_committed());
    assert_eq!(recorder.cancels.get(), 0);
}

#[test]
fn test_committed_plan_describe_output() {
    let (mut session, _recorder) = session_with(&["/dev/sdb"]);
    session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();
    let plan = session.commit().unwrap();

    assert_eq!(
        plan.describe(),
        "label = GPT\nroot = /dev/sdb3\nswap = /dev/sdb2\nboot = /dev/sdb1\ncommitted = true"
    );
    assert_eq!(plan.describe(), plan.describe());
}

#[test]
fn test_nvme_mbr_commit_with_edited_swap() {
    let (mut session, recorder) = session_with(&["/dev/sda", "/dev/nvme0n1"]);

    session.select_label(LabelKind::Mbr).unwrap();
    session.select_device(&DeviceRef::new("/dev/nvme0n1")).unwrap();
    session.edit_swap_path("/dev/sda2").unwrap();
    session.commit().unwrap();

    let plans = recorder.plans.borrow();
    assert_eq!(plans[0].label(), LabelKind::Mbr);
    assert_eq!(plans[0].boot(), Some("/dev/nvme0n1p1"));
    assert_eq!(plans[0].swap(), Some("/dev/sda2"));
    assert_eq!(plans[0].root(), Some("/dev/nvme0n1p3"));
}

#[test]
fn test_reselecting_device_discards_edits() {
    let (mut session, _recorder) = session_with(&["/dev/sda", "/dev/sdb"]);

    session.select_device(&DeviceRef::new("/dev/sda")).unwrap();
    session.edit_root_path("/dev/mapper/root").unwrap();
    session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();

    assert_eq!(session.working_paths(), &PartitionPaths::derive("/dev/sdb"));
}

// =============================================================================
// Cancel
// =============================================================================

#[test]
fn test_cancel_invokes_only_cancel_handler() {
    let (mut session, recorder) = session_with(&["/dev/sdb"]);
    session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();

    session.cancel().unwrap();

    assert_eq!(session.state(), SessionState::Cancelled);
    assert_eq!(recorder.cancels.get(), 1);
    assert!(recorder.plans.borrow().is_empty());
}

// =============================================================================
// Rejected Operations
// =============================================================================

#[test]
fn test_commit_without_device_is_rejected() {
    let (mut session, recorder) = session_with(&["/dev/sdb"]);

    let err = session.commit().unwrap_err();
    assert_eq!(
        err,
        SessionError::IncompletePlan {
            missing: vec![PartitionRole::Boot, PartitionRole::Swap, PartitionRole::Root]
        }
    );
    assert_eq!(session.state(), SessionState::Idle);
    assert!(recorder.plans.borrow().is_empty());

    // Still usable afterwards
    session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();
    assert!(session.commit().is_ok());
}

#[test]
fn test_commit_with_cleared_field_names_the_role() {
    let (mut session, _recorder) = session_with(&["/dev/sdb"]);
    session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();
    session.edit_boot_path("").unwrap();

    let err = session.commit().unwrap_err();
    assert!(err.to_string().contains("boot"));
}

#[test]
fn test_second_finalize_is_rejected_without_handler_calls() {
    let (mut session, recorder) = session_with(&["/dev/sdb"]);
    session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();
    session.commit().unwrap();

    assert_eq!(
        session.commit().unwrap_err(),
        SessionError::Finalized { state: SessionState::Committed }
    );
    assert!(session.cancel().is_err());
    assert!(session.select_label(LabelKind::Mbr).is_err());
    assert!(session.edit_root_path("/dev/sdb9").is_err());

    assert_eq!(recorder.plans.borrow().len(), 1);
    assert_eq!(recorder.cancels.get(), 0);
    assert_eq!(session.selected_label(), LabelKind::Gpt);
}

#[test]
fn test_commit_after_cancel_is_rejected() {
    let (mut session, recorder) = session_with(&["/dev/sdb"]);
    session.select_device(&DeviceRef::new("/dev/sdb")).unwrap();
    session.cancel().unwrap();

    assert!(matches!(
        session.commit(),
        Err(SessionError::Finalized { state: SessionState::Cancelled })
    ));
    assert!(recorder.plans.borrow().is_empty());
}

// =============================================================================
// Construction
// =============================================================================

struct BrokenEnumerator;

impl DeviceEnumerator for BrokenEnumerator {
    fn list_devices(&self) -> partplan::Result<Vec<DeviceRef>> {
        Err(PartPlanError::enumeration("no block devices"))
    }
}

#[test]
fn test_enumeration_failure_is_fatal() {
    let handlers = CompletionHandlers::new(|_| {}, || {});
    let err = PlanSession::new(&BrokenEnumerator, handlers).unwrap_err();
    assert!(matches!(err, PartPlanError::Enumeration(_)));
}

#[test]
fn test_missing_lsblk_fails_construction() {
    let enumerator = LsblkEnumerator::with_program("/nonexistent/lsblk");
    let handlers = CompletionHandlers::new(|_| {}, || {});
    assert!(PlanSession::new(&enumerator, handlers).is_err());
}

#[test]
fn test_devices_keep_enumeration_order() {
    let (session, _recorder) = session_with(&["/dev/sdc", "/dev/sda", "/dev/sdb"]);
    let paths: Vec<&str> = session.devices().iter().map(DeviceRef::path).collect();
    assert_eq!(paths, vec!["/dev/sdc", "/dev/sda", "/dev/sdb"]);
    assert!(session.selected_device().is_none());
    assert_eq!(session.selected_label(), LabelKind::Gpt);
}
