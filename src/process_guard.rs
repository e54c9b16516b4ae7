//! Process lifecycle management for external commands
//!
//! `lsblk` and `fdisk` are spawned in their own process group with a
//! parent-death signal, so an inspection still running when the wizard
//! exits is terminated with it.
//!
//! Signal handlers restore the terminal before exiting so an interrupted
//! session never leaves the shell in raw mode.

use nix::libc;
use nix::unistd::Pid;
use std::process::Command;

/// Initialize global signal handlers for graceful shutdown
/// Handles SIGINT, SIGTERM and SIGHUP
/// Call this once at program start
pub fn init_signal_handlers() -> Result<(), std::io::Error> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::thread;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;

    thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let signal_name = match sig {
                SIGINT => "SIGINT",
                SIGTERM => "SIGTERM",
                SIGHUP => "SIGHUP",
                _ => "UNKNOWN",
            };

            tracing::info!("Received {} signal, restoring terminal", signal_name);

            let _ = crossterm::terminal::disable_raw_mode();
            let _ = crossterm::execute!(
                std::io::stdout(),
                crossterm::terminal::LeaveAlternateScreen
            );

            // Exit with appropriate code (128 + signal number)
            std::process::exit(128 + sig);
        }
    });

    Ok(())
}

/// Extension trait for std::process::Command to set up process groups
pub trait CommandProcessGroup {
    /// Configure the command to run in its own process group
    /// and to receive SIGTERM when the wizard dies
    fn in_new_process_group(&mut self) -> &mut Self;
}

impl CommandProcessGroup for Command {
    fn in_new_process_group(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;
        unsafe {
            self.pre_exec(|| {
                nix::unistd::setpgid(Pid::from_raw(0), Pid::from_raw(0))
                    .map_err(std::io::Error::other)?;

                if libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM) == -1 {
                    return Err(std::io::Error::last_os_error());
                }

                Ok(())
            });
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_in_new_process_group_runs() {
        let output = Command::new("sh")
            .args(["-c", "echo grouped"])
            .in_new_process_group()
            .output()
            .expect("Failed to spawn sh");

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "grouped");
    }

    #[test]
    fn test_child_leads_its_own_process_group() {
        let output = Command::new("sh")
            .args(["-c", "ps -o pgid= -p $$; echo $$"])
            .in_new_process_group()
            .output()
            .expect("Failed to spawn sh");

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<&str> = stdout.lines().map(str::trim).collect();
        if lines.len() == 2 {
            assert_eq!(lines[0], lines[1], "child PGID should equal its PID");
        }
    }
}
