//! End-to-end tests driving the `netskel` binary.
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

fn fixture() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.join("../netskel-core/tests/fixtures/counters.json")
}

fn netskel() -> Command {
	let mut command = Command::new(env!("CARGO_BIN_EXE_netskel"));
	command.env_remove("RUST_LOG");
	command
}

#[test]
fn test_cli_writes_listing_to_file() -> TestResult {
	let dir = tempdir()?;
	let out = dir.path().join("Acme.Counters.cs");
	let status = netskel()
		.arg(fixture())
		.args(["--no-nullability", "-b", "omit", "-o"])
		.arg(&out)
		.status()?;
	assert!(status.success());

	let text = fs::read_to_string(&out)?;
	assert!(text.starts_with("namespace Acme {\n"), "{text}");
	assert!(text.contains("    public void Increment(int by = 1);\n"), "{text}");
	Ok(())
}

#[test]
fn test_cli_reads_stdin_and_renders_one_type() -> TestResult {
	let mut child = netskel()
		.args(["-", "--type", "Acme.Mode"])
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.spawn()?;
	if let Some(mut stdin) = child.stdin.take() {
		stdin.write_all(&fs::read(fixture())?)?;
	}
	let output = child.wait_with_output()?;
	assert!(output.status.success());
	assert_eq!(
		String::from_utf8(output.stdout)?,
		"public enum Mode {\n  Off = 0,\n  On = 1,\n}\n"
	);
	Ok(())
}

#[test]
fn test_cli_strict_mode_fails() -> TestResult {
	let output = netskel().arg(fixture()).arg("--strict").output()?;
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8(output.stderr)?;
	assert!(stderr.contains("Acme.Counter.Reset"), "{stderr}");
	Ok(())
}

#[test]
fn test_cli_reports_missing_input() -> TestResult {
	let dir = tempdir()?;
	let output = netskel().arg(dir.path().join("absent.json")).output()?;
	assert_eq!(output.status.code(), Some(1));
	assert!(output.stdout.is_empty());
	let stderr = String::from_utf8(output.stderr)?;
	assert!(stderr.contains("absent.json"), "{stderr}");
	Ok(())
}
