use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Build a CLI command isolated to `data_dir` and pointed at `api`.
pub fn cli_command(args: &[&str], data_dir: &Path, api: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tokenstash"));
    cmd.args(args);
    cmd.env("TOKENSTASH_DATA_DIR", data_dir);
    cmd.env("TOKENSTASH_API", api);
    cmd.env_remove("TOKENSTASH_SCOPE");
    cmd.env_remove("TOKENSTASH_KEY");
    cmd.env_remove("TOKENSTASH_PASSWORD");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Run the CLI with an isolated data directory.
pub fn run_cli(args: &[&str], data_dir: &Path, api: &str) -> Output {
    cli_command(args, data_dir, api)
        .output()
        .expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], data_dir: &Path, api: &str) -> String {
    let output = run_cli(args, data_dir, api);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run `tokenstash shell` feeding `input` on stdin.
pub fn run_shell(extra_args: &[&str], input: &str, data_dir: &Path, api: &str) -> Output {
    let mut args = vec!["shell"];
    args.extend_from_slice(extra_args);

    let mut child = cli_command(&args, data_dir, api)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write shell input");

    child.wait_with_output().expect("Failed to wait for CLI")
}
