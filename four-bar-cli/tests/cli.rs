use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_four-bar"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(args: &[&str]) -> String {
    let out = run(args);
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "{err}");
    String::from_utf8(out.stdout).unwrap()
}

/// Run a subcommand on the crank rocker `[300, 100, 300, 200]`.
fn crank_rocker(cmd: &str, rest: &[&str]) -> String {
    let mut args = vec![cmd, "-l", "300", "100", "300", "200"];
    args.extend_from_slice(rest);
    stdout(&args)
}

#[test]
fn info() {
    let s = crank_rocker("info", &[]);
    assert!(s.starts_with("[linkage]\n"));
    assert!(s.contains("name = \"Crank-Rocker\""));
    assert!(s.contains("grashof = true"));
    assert!(s.contains("rocker_limits = true"));
    assert!(s.contains("rocker_swing = 63.0679"));
    assert!(s.contains("[limit.state_min]"));
    assert!(s.contains("[limit.state_max]"));
}

#[test]
fn info_without_swing() {
    // The follower of this double rocker travels across 0°
    let s = stdout(&["info", "-l", "100", "190", "5", "100"]);
    assert!(s.contains("name = \"Double-Rocker\""));
    assert!(s.contains("rocker_limits = true"));
    assert!(!s.contains("rocker_swing"));
}

#[test]
fn state_in_degrees() {
    let s = crank_rocker("state", &["90", "--deg"]);
    assert!(s.contains("valid = true"));
    assert!(s.contains("theta2_deg = 90"));
    assert!(s.contains("mode = \"open\""));
}

#[test]
fn state_out_of_reach() {
    let s = stdout(&["state", "-l", "100", "50", "10", "10", "0"]);
    assert!(s.contains("valid = false"));
    assert!(!s.contains("transmission_deg"));
}

#[test]
fn inverse_unreachable() {
    // The follower swings in about [75.5°, 138.6°]
    let s = crank_rocker("inverse", &["0", "--deg"]);
    assert!(s.contains("reachable = false"));
    let s = crank_rocker("inverse", &["100", "--deg"]);
    assert!(s.contains("reachable = true"));
}

#[test]
fn reject_bad_lengths() {
    let out = run(&["info", "-l", "300", "-100", "300", "200"]);
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8(out.stderr).unwrap();
    assert!(err.contains("invalid linkage"));
}

#[test]
fn linkage_file_and_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("fb.ron");
    let ron = "(l1: 300.0, l2: 100.0, l3: 300.0, l4: 200.0, mode: crossed)";
    std::fs::write(&file, ron).unwrap();
    let file = file.to_str().unwrap();
    let s = stdout(&["info", "-f", file]);
    assert!(s.contains("mode = \"crossed\""));
    // Mode override
    let s = stdout(&["info", "-f", file, "-m", "open"]);
    assert!(s.contains("mode = \"open\""));

    let out = dir.path().join("sweep.csv");
    let out_arg = out.to_str().unwrap();
    stdout(&["sweep", "-f", file, "--res", "10", "-o", out_arg]);
    let csv = std::fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 11);
    assert!(csv.starts_with("theta2,"));
}

#[test]
fn bad_linkage_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("fb.ron");
    let ron = "(l1: 300.0, l2: 0.0, l3: 300.0, l4: 200.0)";
    std::fs::write(&file, ron).unwrap();
    let out = run(&["info", "-f", file.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
}
