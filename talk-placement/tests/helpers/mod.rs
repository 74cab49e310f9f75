#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

/// The captured result of one run of the binary.
#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) success: bool,
    pub(crate) stdout: String,
}

pub(crate) fn run_talk_placement(args: &[&str]) -> Run {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let binary = PathBuf::from(env!("CARGO_BIN_EXE_talk-placement"));

    let mut child = Command::new(binary)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run talk-placement.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(Some(status)) => status,
        Ok(None) => {
            let _ = child.kill();
            panic!(
                "talk-placement took more than {} seconds",
                TEST_TIMEOUT.as_secs()
            )
        }
        Err(e) => panic!("error waiting for talk-placement: {e}"),
    };

    let output = child.wait_with_output().expect("Failed to collect the output.");

    Run {
        success: status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    }
}

/// Writes `content` to a file in the temporary directory which is unique to `name`.
pub(crate) fn write_cost_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("talk-placement-{name}-{}.costs", std::process::id()));
    std::fs::write(&path, content).expect("Failed to write the cost file.");
    path
}
