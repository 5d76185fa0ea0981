use std::io::Write;
use std::process::Command;

use telecap_core::decode::frame::{encode_end, encode_header, encode_record};
use telecap_core::decode::RawRecord;

fn sample_stream() -> Vec<u8> {
    let mut bytes = Vec::new();
    encode_header(&mut bytes);
    for ts in 0u32..3 {
        let mut r = RawRecord::at(ts);
        r.distance = (ts + 1) * 100_000;
        r.heart_rate = 120 + ts as u8;
        encode_record(&mut bytes, &r);
    }
    encode_end(&mut bytes);
    bytes
}

fn telecap() -> Command {
    Command::new(env!("CARGO_BIN_EXE_telecap"))
}

#[test]
fn converts_file_to_vtt_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ride.tlm");
    let output = dir.path().join("ride.vtt");
    std::fs::write(&input, sample_stream()).unwrap();

    let status = telecap()
        .args(["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap(), "-t", "vtt"])
        .status()
        .unwrap();
    assert!(status.success());

    let payload = std::fs::read_to_string(&output).unwrap();
    assert!(payload.starts_with("WEBVTT\n\n"));
    assert!(payload.contains("  1.00 km"));
    assert!(payload.contains(" 120 bpm"));
}

#[test]
fn streams_stdin_to_stdout_json() {
    let mut child = telecap()
        .args(["-i", "stdin", "-o", "stdout", "-t", "json"])
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&sample_stream()).unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["records"].as_array().unwrap().len(), 3);
    assert_eq!(doc["units"], "metric");
}

#[test]
fn rejects_unknown_format_selector() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ride.tlm");
    std::fs::write(&input, sample_stream()).unwrap();

    let status = telecap()
        .args(["-i", input.to_str().unwrap(), "-o", "stdout", "-t", "xml"])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .unwrap();
    assert!(!status.success());
}
