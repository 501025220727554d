//! Runs the built binary against the bundled doctor roster.

use std::path::PathBuf;
use std::process::Command;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_roster-demo"))
        .arg("--records")
        .arg(data("doctors.json"))
        .arg("--config")
        .arg(data("doctors.yaml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn durg_sorted_by_visits() {
    let out = run(&["--pick", "city=Durg", "--sort", "Most visits", "--json"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let positions: Vec<u64> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["position"].as_u64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 5, 3, 2]);
    assert!(json.get("summary").is_none());
}

#[test]
fn text_output_shows_tiles_with_summary() {
    let out = run(&["--search", "cardio", "--summary"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Dr. Rajiv Dixhit"));
    assert!(stdout.contains("Dr. Ravi Patel"));
    assert!(stdout.contains("2 of 6 records"));
    assert!(stdout.contains("City: [All (2)]"));
}

#[test]
fn unknown_sort_fails_with_choices() {
    let out = run(&["--sort", "Newest"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Most visits"));
}
