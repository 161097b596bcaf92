//! Integration tests for the sqlhint CLI with real databases.
//!
//! These tests are behind the `integration-tests` feature flag and won't run
//! with regular `cargo test`:
//!
//! ```bash
//! cargo test -p sqlhint-cli --features integration-tests --test integration
//! ```

#![cfg(feature = "integration-tests")]

mod sqlite;

use std::process::{Command, Output};

/// Run the sqlhint CLI with the given arguments and return the output.
pub fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlhint"))
        .args(args)
        .output()
        .expect("failed to execute sqlhint CLI")
}

/// Run the sqlhint CLI and assert it succeeds.
pub fn run_cli_success(args: &[&str]) -> Output {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "CLI failed with status {:?}\nstderr: {}\nstdout: {}",
            output.status.code(),
            stderr,
            stdout
        );
    }
    output
}
