//! Report tests - packet assembly, tolerance flags, signatures, round-trip

mod common;

use common::{create_test_order, inspectflow, setup_test_project};
use predicates::prelude::*;

// ============================================================================
// Packet assembly
// ============================================================================

#[test]
fn test_packet_open_shows_template() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["packet", "open", "441"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Verify gauge calibration"))
        .stdout(predicate::str::contains("Sign inspector certificate"))
        .stdout(predicate::str::contains("SOP-THREAD-GENERAL.pdf"))
        .stdout(predicate::str::contains("SOP-NDT-MT-LEVEL2.pdf"))
        .stdout(predicate::str::contains("12 row(s)"));
}

#[test]
fn test_packet_open_is_idempotent() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    let first = inspectflow()
        .current_dir(tmp.path())
        .args(["packet", "open", "441", "--format", "json"])
        .output()
        .unwrap();

    // Capture a measurement between opens
    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "1", "--key", "lead", "--value", "0.004"])
        .assert()
        .success();

    let second = inspectflow()
        .current_dir(tmp.path())
        .args(["packet", "open", "441", "--format", "json"])
        .output()
        .unwrap();
    let second_stdout = String::from_utf8_lossy(&second.stdout);

    // Checklist and SOPs identical; captured row data preserved
    let first_stdout = String::from_utf8_lossy(&first.stdout);
    assert!(first_stdout.contains("Verify gauge calibration"));
    assert!(second_stdout.contains("Verify gauge calibration"));
    assert!(second_stdout.contains("0.004"));

    let third = inspectflow()
        .current_dir(tmp.path())
        .args(["packet", "open", "441", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(second.stdout, third.stdout);
}

#[test]
fn test_packet_open_unknown_order_gets_blank_header() {
    let tmp = setup_test_project();

    inspectflow()
        .current_dir(tmp.path())
        .args(["packet", "open", "999"])
        .assert()
        .success()
        .stderr(predicate::str::contains("blank header"))
        .stdout(predicate::str::contains("Verify gauge calibration"));
}

#[test]
fn test_packet_header_seeded_from_order() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "5-1/2\" 8RD L80 PIN");

    inspectflow()
        .current_dir(tmp.path())
        .args(["packet", "open", "441", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PN-8821"))
        .stdout(predicate::str::contains("PIN"));
}

// ============================================================================
// Measurements and tolerance flags
// ============================================================================

#[test]
fn test_report_set_flags_out_of_tolerance() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "1", "--key", "l1", "--value", "0.0021"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OUT OF TOLERANCE"));

    // Exactly at the bound passes (inclusive)
    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "1", "--key", "l1", "--value", "0.002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ok]"));

    // Centered rules check absolute value
    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "2", "--key", "standoff", "--value=-0.126"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OUT OF TOLERANCE"));
}

#[test]
fn test_report_set_keeps_invalid_text() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "1", "--key", "od", "--value", "2.375in"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept for correction"));

    // Raw text survives verbatim for re-editing
    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "show", "441", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.375in"));
}

#[test]
fn test_report_set_unknown_key_fails() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "1", "--key", "bogus", "--value", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown dimension key"));
}

#[test]
fn test_report_row_bounds() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "13", "--key", "l1", "--value", "0.001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "add-row", "441"])
        .assert()
        .success()
        .stdout(predicate::str::contains("13 row(s)"));

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "13", "--key", "l1", "--value", "0.001"])
        .assert()
        .success();

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "remove-row", "441"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 row(s)"));
}

#[test]
fn test_report_result_and_remarks() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args([
            "report", "result", "441", "--row", "1", "--result", "reject", "--remarks",
            "lead out on first thread",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("REJECT"));

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "show", "441", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lead out on first thread"));
}

// ============================================================================
// Signatures
// ============================================================================

#[test]
fn test_sign_and_resign() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "sign", "441", "--role", "operator", "--name", "Alex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed"))
        .stdout(predicate::str::contains("operator-signed"));

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "sign", "441", "--role", "operator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-signed"));

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "sign", "441", "--role", "inspector", "--name", "Sam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn test_show_works_regardless_of_signatures() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    // Unsigned reports still render fully (printing is never blocked)
    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "show", "441"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unsigned"));
}

// ============================================================================
// Round-trip and review summary
// ============================================================================

#[test]
fn test_report_roundtrip_is_stable() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "1", "--key", "id", "--value", "5.3"])
        .assert()
        .success();
    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "sign", "441", "--role", "operator"])
        .assert()
        .success();

    // Load -> serialize twice: structurally identical output
    let first = inspectflow()
        .current_dir(tmp.path())
        .args(["report", "show", "441", "--format", "json"])
        .output()
        .unwrap();
    let second = inspectflow()
        .current_dir(tmp.path())
        .args(["report", "show", "441", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_report_check_summarizes_flags() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "1", "--key", "lead", "--value", "0.0061"])
        .assert()
        .success();
    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "set", "441", "--row", "2", "--key", "od", "--value", "n/a"])
        .assert()
        .success();

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "check", "441"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 out-of-tolerance cell(s)"))
        .stdout(predicate::str::contains("1 invalid cell(s)"))
        .stdout(predicate::str::contains("OUT OF TOLERANCE"));
}

#[test]
fn test_visual_checks_and_notes_persist() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "visual", "441", "--threads", "Pass", "--surface", "minor pitting"])
        .assert()
        .success();

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "notes", "441", "--text", "first article inspection"])
        .assert()
        .success();

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "show", "441", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("minor pitting"))
        .stdout(predicate::str::contains("first article inspection"));
}

#[test]
fn test_header_sets_variant() {
    let tmp = setup_test_project();
    create_test_order(&tmp, "441", "PN-8821", "2-3/8\" 8RD");

    inspectflow()
        .current_dir(tmp.path())
        .args(["report", "header", "441", "--description", "coupling BOX end"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BOX"));
}
