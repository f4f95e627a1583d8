//! End-to-end script tests against the real `fsim` binary. Unit tests
//! inside `fs_core` exercise the engine directly; this file is the only
//! place that observes the exact line-level wire format of stdout/stderr.

use fs_core::layout::{Superblock, BLOCK_SIZE, TOTAL_BLOCKS};
use std::io::Write;
use std::process::Command;

fn fresh_disk() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    let sb = Superblock::empty();
    let mut bytes = vec![0u8; BLOCK_SIZE * TOTAL_BLOCKS];
    bytes[..BLOCK_SIZE].copy_from_slice(&sb.encode().0);
    f.write_all(&bytes).unwrap();
    f.flush().unwrap();
    f
}

fn run_script(disk_path: &std::path::Path, script: &str) -> std::process::Output {
    let mut script_file = tempfile::NamedTempFile::new().unwrap();
    let script = script.replace("{disk}", &disk_path.to_string_lossy());
    script_file.write_all(script.as_bytes()).unwrap();
    script_file.flush().unwrap();

    Command::new(env!("CARGO_BIN_EXE_fsim"))
        .arg(script_file.path())
        .output()
        .unwrap()
}

#[test]
fn create_and_list_a_file() {
    let disk = fresh_disk();
    let out = run_script(
        disk.path(),
        "M {disk}\nC hello 2\nL\n",
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("hello"));
    assert!(stdout.contains("2 KB"));
}

#[test]
fn commands_before_mount_are_rejected() {
    let disk = fresh_disk();
    let _ = disk; // disk unused, no M line issued
    let out = run_script(disk.path(), "L\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("No file system is mounted"));
}

#[test]
fn lexically_invalid_line_is_reported_with_line_number() {
    let disk = fresh_disk();
    let out = run_script(disk.path(), "M {disk}\nC toolongname 1\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Command Error:"));
    assert!(stderr.contains(", 2"));
}

#[test]
fn duplicate_create_reports_already_exists() {
    let disk = fresh_disk();
    let out = run_script(disk.path(), "M {disk}\nC a 1\nC a 1\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: File or directory a already exists"));
}

#[test]
fn blank_line_is_reported_as_a_command_error() {
    let disk = fresh_disk();
    let out = run_script(disk.path(), "M {disk}\n\nL\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Command Error:"));
    assert!(stderr.contains(", 2"));
}

#[test]
fn non_utf8_buffer_payload_does_not_abort_the_rest_of_the_script() {
    let disk = fresh_disk();
    let mut script_file = tempfile::NamedTempFile::new().unwrap();
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"M ");
    bytes.extend_from_slice(disk.path().to_string_lossy().as_bytes());
    bytes.extend_from_slice(b"\nC hello 1\nB \xff\xfe\nW hello 0\nL\n");
    script_file.write_all(&bytes).unwrap();
    script_file.flush().unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_fsim"))
        .arg(script_file.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("hello"));
}
