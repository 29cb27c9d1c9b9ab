//! Runs the `muc-solver` binary on programs written to temporary files.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::fs::File;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

/// What the solver wrote to stdout, split into log lines (starting with `%`) and result lines.
#[derive(Debug)]
pub(crate) struct SolverOutput {
    pub(crate) status: ExitStatus,
    pub(crate) result_lines: Vec<String>,
    pub(crate) log_lines: Vec<String>,
}

#[derive(Debug)]
struct Files {
    instance_file: PathBuf,
    log_file: PathBuf,
    err_file: PathBuf,
}

impl Files {
    fn new(instance_name: &str) -> Files {
        let directory = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));

        Files {
            instance_file: directory.join(format!("{instance_name}.lp")),
            log_file: directory.join(format!("{instance_name}.log")),
            err_file: directory.join(format!("{instance_name}.err")),
        }
    }

    fn cleanup(self) -> std::io::Result<()> {
        std::fs::remove_file(self.instance_file)?;
        std::fs::remove_file(self.log_file)?;
        std::fs::remove_file(self.err_file)?;

        Ok(())
    }
}

/// Writes `program` to a file named after `instance_name` and runs the solver on it with `args`.
pub(crate) fn run_muc_solver(instance_name: &str, program: &str, args: &[&str]) -> SolverOutput {
    let files = Files::new(instance_name);
    std::fs::write(&files.instance_file, program).expect("Failed to write the instance file.");

    let solver = PathBuf::from(env!("CARGO_BIN_EXE_muc-solver"));

    let mut child = Command::new(solver)
        .args(args)
        .arg(&files.instance_file)
        .stdout(File::create(&files.log_file).expect("Failed to create log file."))
        .stderr(File::create(&files.err_file).expect("Failed to create error file."))
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let stdout = std::fs::read_to_string(&files.log_file).expect("Failed to read log file.");
    let (log_lines, result_lines): (Vec<String>, Vec<String>) = stdout
        .lines()
        .map(str::to_owned)
        .partition(|line| line.starts_with('%'));

    files.cleanup().expect("Failed to remove the test files.");

    SolverOutput {
        status,
        result_lines,
        log_lines,
    }
}
