#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use proprdr::{FloatPrecision, PropertyError, PropertyStore, Staleness};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

const SAMPLE: &str = "\
# Property File Reader settings
app.name=Property File Reader
app.values.maxConnections=20
app.amount=30.456
app.security.active=true
app.connections.retries=false
app.connections.url=http://localhost:8080/api?debug=true
";

fn proprdr_cmd() -> assert_cmd::Command {
	assert_cmd::Command::cargo_bin("proprdr").unwrap()
}

fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
	let path = dir.path().join("config.properties");
	fs::write(&path, SAMPLE).unwrap();
	path
}

fn append(path: &Path, line: &str) {
	let mut file = OpenOptions::new().append(true).open(path).unwrap();
	writeln!(file, "{line}").unwrap();
}

// ============================================================================
// Store lifecycle tests
// ============================================================================

#[test]
fn test_sample_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let store = PropertyStore::open(write_sample(&temp_dir)).unwrap();

	assert_eq!(store.len(), 6);
	assert_eq!(store.get("app.name").unwrap(), "Property File Reader");
	assert_eq!(store.get_as_int("app.values.maxConnections").unwrap(), 20);
	assert_eq!(
		store
			.get_as_float("app.amount", FloatPrecision::F64)
			.unwrap(),
		30.456
	);
	assert!(store.get_as_bool("app.security.active"));
	assert_eq!(store.get_all("app.connections").len(), 2);
}

#[test]
fn test_change_detection_and_refresh_cycle() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);
	let mut store = PropertyStore::open(&path).unwrap();

	assert!(!store.has_changed().unwrap());

	// Outlast coarse filesystem timestamps.
	thread::sleep(Duration::from_millis(1100));
	append(&path, "app.extra=late arrival");

	assert!(store.has_changed().unwrap());
	assert_eq!(store.staleness().unwrap(), Staleness::PotentiallyStale);
	assert!(!store.contains("app.extra"));

	store.refresh().unwrap();

	assert_eq!(store.get("app.extra").unwrap(), "late arrival");
	assert_eq!(store.len(), 7);
	assert!(!store.has_changed().unwrap());
	assert_eq!(store.staleness().unwrap(), Staleness::Fresh);
}

#[test]
fn test_refresh_after_delete_keeps_entries() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);
	let mut store = PropertyStore::open(&path).unwrap();

	fs::remove_file(&path).unwrap();

	let err = store.refresh().unwrap_err();
	assert!(matches!(err, PropertyError::ResourceUnavailable { .. }));
	assert_eq!(store.len(), 6);
	assert_eq!(store.get_as_int("app.values.maxConnections").unwrap(), 20);
}

#[test]
fn test_live_read_of_edited_key() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);
	let mut store = PropertyStore::open(&path).unwrap();

	fs::write(&path, SAMPLE.replace("=Property File Reader", "=Renamed")).unwrap();

	let updated = store.get_updated("app.name").unwrap();
	assert_eq!(updated.value, "Renamed");
	assert!(updated.stale.is_none());
	assert_eq!(store.get("app.name").unwrap(), "Renamed");

	// Keys not re-read keep their snapshot values.
	assert_eq!(store.get("app.amount").unwrap(), "30.456");
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	proprdr_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("property files"));
}

#[test]
fn test_version_flag() {
	proprdr_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("proprdr"));
}

#[test]
fn test_no_args_shows_help() {
	proprdr_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// show / get / validate tests
// ============================================================================

#[test]
fn test_show_all() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);

	proprdr_cmd()
		.arg("show")
		.arg(&path)
		.assert()
		.success()
		.stdout(predicate::str::contains("app.name=Property File Reader"))
		.stdout(predicate::str::contains("# 6 of 6 properties"));
}

#[test]
fn test_show_prefix() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);

	proprdr_cmd()
		.arg("show")
		.arg(&path)
		.args(["--prefix", "app.connections"])
		.assert()
		.success()
		.stdout(predicate::str::contains("app.connections.retries=false"))
		.stdout(predicate::str::contains("app.name").not())
		.stdout(predicate::str::contains("# 2 of 6 properties"));
}

#[test]
fn test_get_string() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.arg("app.connections.url")
		.assert()
		.success()
		.stdout("http://localhost:8080/api?debug=true\n");
}

#[test]
fn test_get_typed() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.args(["app.values.maxConnections", "--as", "int"])
		.assert()
		.success()
		.stdout("20\n");

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.args(["app.amount", "--as", "float"])
		.assert()
		.success()
		.stdout("30.456\n");

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.args(["app.missing", "--as", "bool"])
		.assert()
		.success()
		.stdout("false\n");
}

#[test]
fn test_get_float_precision() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = temp_dir.path().join("floats.properties");
	fs::write(&path, "big=1e40\n").unwrap();

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.args(["big", "--as", "float", "--bits", "32"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("out of range for a 32-bit float"));

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.args(["big", "--as", "float", "--bits", "64"])
		.assert()
		.success();

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.args(["big", "--as", "float", "--bits", "16"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("unsupported precision 16"));
}

#[test]
fn test_get_conversion_error() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.args(["app.name", "--as", "int"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("not an integer"));
}

#[test]
fn test_get_missing_key() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);

	proprdr_cmd()
		.arg("get")
		.arg(&path)
		.arg("app.nope")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Property not found: app.nope"));
}

#[test]
fn test_get_missing_file() {
	let temp_dir = tempfile::tempdir().unwrap();

	proprdr_cmd()
		.arg("get")
		.arg(temp_dir.path().join("absent.properties"))
		.arg("app.name")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to load"));
}

#[test]
fn test_validate_valid_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_sample(&temp_dir);

	proprdr_cmd()
		.arg("validate")
		.arg(&path)
		.assert()
		.success()
		.stdout(predicate::str::contains("(6 properties)"));
}

#[test]
fn test_validate_malformed_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = temp_dir.path().join("bad.properties");
	fs::write(&path, "app.a=1\nno separator here\n").unwrap();

	proprdr_cmd()
		.arg("validate")
		.arg(&path)
		.assert()
		.failure()
		.stderr(predicate::str::contains("Malformed line 2"));
}
