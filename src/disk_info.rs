//! Human-readable disk information for the details panel.
//!
//! `CommandInspector` shells out to `fdisk -l <disk>` (or a configured
//! command). Inspection can take a while, so `InfoWorker` runs it on a
//! dedicated background thread: the UI thread sends an `InfoRequest` and
//! polls for the matching `InfoResponse` without blocking.
//!
//! Only the latest request matters. The worker skips queued requests that
//! a newer one has superseded, and `InfoWorker::poll` drops responses for
//! anything but the latest request id. Results are display text only; they
//! never feed back into the plan.

use crate::process_guard::CommandProcessGroup;
use std::process::Command;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::{debug, error};

/// Prefix of the text returned when inspection fails.
pub const ERROR_TEXT: &str = "<error>";

/// Produces display text describing a device. Never fails: errors are text.
pub trait DiskInspector: Send {
    fn describe_device(&self, path: &str) -> String;
}

/// Runs an external command with the device path appended.
#[derive(Debug, Clone)]
pub struct CommandInspector {
    program: String,
    args: Vec<String>,
}

impl Default for CommandInspector {
    fn default() -> Self {
        Self {
            program: "fdisk".to_string(),
            args: vec!["-l".to_string()],
        }
    }
}

impl CommandInspector {
    /// `fdisk -l <disk>`
    pub fn fdisk() -> Self {
        Self::default()
    }

    /// Build from an argv such as `["fdisk", "-l"]`. Returns `None` when empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn run(&self, path: &str) -> Result<String, String> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .in_new_process_group()
            .output()
            .map_err(|e| format!("{}: {}", self.program, e))
            .and_then(|output| {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    Err(String::from_utf8_lossy(&output.stderr).to_string())
                }
            })
    }
}

impl DiskInspector for CommandInspector {
    fn describe_device(&self, path: &str) -> String {
        match self.run(path) {
            Ok(stdout) => stdout.lines().collect::<Vec<_>>().join("\n"),
            Err(message) => {
                debug!(
                    "Inspecting {} with {} failed: {}",
                    path,
                    self.program,
                    message.trim()
                );
                format_error(&message)
            }
        }
    }
}

fn format_error(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        ERROR_TEXT.to_string()
    } else {
        format!("{}\n{}", ERROR_TEXT, message)
    }
}

/// Unique identifier for each info request/response pair.
pub type InfoRequestId = u64;

#[derive(Debug)]
struct InfoRequest {
    id: InfoRequestId,
    path: String,
}

/// Inspection result for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoResponse {
    pub id: InfoRequestId,
    pub path: String,
    pub text: String,
}

/// Handle to the background inspection thread.
pub struct InfoWorker {
    request_tx: Sender<InfoRequest>,
    response_rx: Receiver<InfoResponse>,
    next_id: InfoRequestId,
    latest: Option<InfoRequestId>,
}

impl InfoWorker {
    /// Spawn the worker thread. It exits when the `InfoWorker` is dropped.
    pub fn spawn(inspector: Box<dyn DiskInspector>) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        spawn_inspector_thread(inspector, request_rx, response_tx);

        Self {
            request_tx,
            response_rx,
            next_id: 1,
            latest: None,
        }
    }

    /// Ask for info on `path`, superseding any outstanding request.
    pub fn request(&mut self, path: &str) -> InfoRequestId {
        let id = self.next_id;
        self.next_id += 1;
        self.latest = Some(id);

        if self
            .request_tx
            .send(InfoRequest {
                id,
                path: path.to_string(),
            })
            .is_err()
        {
            error!("Disk info worker is gone; request {} for {} dropped", id, path);
        }
        id
    }

    /// Forget the outstanding request; its response will be discarded.
    pub fn cancel(&mut self) {
        self.latest = None;
    }

    /// Id of the request whose response is still wanted.
    pub fn pending(&self) -> Option<InfoRequestId> {
        self.latest
    }

    /// Return the response to the latest request if it has arrived.
    pub fn poll(&mut self) -> Option<InfoResponse> {
        loop {
            match self.response_rx.try_recv() {
                Ok(response) if Some(response.id) == self.latest => {
                    self.latest = None;
                    return Some(response);
                }
                Ok(stale) => debug!("Discarding stale disk info for request {}", stale.id),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

fn spawn_inspector_thread(
    inspector: Box<dyn DiskInspector>,
    request_rx: Receiver<InfoRequest>,
    response_tx: Sender<InfoResponse>,
) {
    std::thread::spawn(move || {
        debug!("Disk info worker started");
        while let Ok(mut request) = request_rx.recv() {
            // Skip to the newest queued request
            while let Ok(newer) = request_rx.try_recv() {
                debug!("Request {} superseded by {}", request.id, newer.id);
                request = newer;
            }

            let text = inspector.describe_device(&request.path);
            let response = InfoResponse {
                id: request.id,
                path: request.path,
                text,
            };
            if response_tx.send(response).is_err() {
                break;
            }
        }
        debug!("Disk info worker shut down");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct EchoInspector;

    impl DiskInspector for EchoInspector {
        fn describe_device(&self, path: &str) -> String {
            format!("Disk {}", path)
        }
    }

    fn wait_for(worker: &mut InfoWorker) -> Option<InfoResponse> {
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(5) {
            if let Some(response) = worker.poll() {
                return Some(response);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_command_inspector_joins_stdout_lines() {
        let argv = vec!["printf".to_string(), "line1\\nline2\\n%s".to_string()];
        let inspector = CommandInspector::from_argv(&argv).unwrap();
        assert_eq!(inspector.describe_device("/dev/sda"), "line1\nline2\n/dev/sda");
    }

    #[test]
    fn test_missing_tool_becomes_error_text() {
        let argv = vec!["/nonexistent/fdisk".to_string(), "-l".to_string()];
        let inspector = CommandInspector::from_argv(&argv).unwrap();
        let text = inspector.describe_device("/dev/sda");
        assert!(text.starts_with(ERROR_TEXT));
    }

    #[test]
    fn test_nonzero_exit_becomes_error_text() {
        let argv = vec!["false".to_string()];
        let inspector = CommandInspector::from_argv(&argv).unwrap();
        assert_eq!(inspector.describe_device("/dev/sda"), ERROR_TEXT);
    }

    #[test]
    fn test_from_argv_rejects_empty() {
        assert!(CommandInspector::from_argv(&[]).is_none());
    }

    #[test]
    fn test_worker_returns_latest_response() {
        let mut worker = InfoWorker::spawn(Box::new(EchoInspector));
        let id = worker.request("/dev/sda");
        assert_eq!(worker.pending(), Some(id));

        let response = wait_for(&mut worker).expect("worker should answer");
        assert_eq!(response.id, id);
        assert_eq!(response.text, "Disk /dev/sda");
        assert_eq!(worker.pending(), None);
    }

    #[test]
    fn test_worker_discards_superseded_requests() {
        let mut worker = InfoWorker::spawn(Box::new(EchoInspector));
        worker.request("/dev/sda");
        worker.request("/dev/sdb");
        let latest = worker.request("/dev/sdc");

        let response = wait_for(&mut worker).expect("worker should answer");
        assert_eq!(response.id, latest);
        assert_eq!(response.path, "/dev/sdc");
    }

    #[test]
    fn test_cancelled_request_is_never_delivered() {
        let mut worker = InfoWorker::spawn(Box::new(EchoInspector));
        worker.request("/dev/sda");
        worker.cancel();

        std::thread::sleep(Duration::from_millis(100));
        assert!(worker.poll().is_none());
    }
}
