use std::{fs, path::Path, process::Command};

fn write_level(dir: &Path) {
    fs::write(dir.join("level.map"), "3 3 0 0\n3 3 0 0\n").expect("map written");
    fs::write(
        dir.join("level.toml"),
        r#"
version = 1
map = "level.map"
save = "save.txt"

[level]
level = { width = 320, height = 160 }
viewport = { width = 320, height = 160 }
actor_start = { x = 160, y = 0 }
"#,
    )
    .expect("settings written");
}

fn run(dir: &Path, script: &str, extra: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tile-scroller"))
        .arg("--config")
        .arg(dir.join("level.toml"))
        .args(["--script", script])
        .args(extra)
        .env("RUST_LOG", "warn")
        .output()
        .expect("binary runs")
}

#[test]
fn scripted_run_moves_actor_and_writes_save_slot() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_level(dir.path());

    let output = run(
        dir.path(),
        "+right step:3 -right +down step:2 +2",
        &["--render", "--cell", "80"],
    );

    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        fs::read_to_string(dir.path().join("save.txt")).expect("save written"),
        "190 20\nRed Level"
    );
    assert_eq!(
        String::from_utf8(output.stdout).expect("utf8 stdout"),
        "##rr\n##rr\n"
    );
}

#[test]
fn second_run_resumes_from_the_save_slot() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_level(dir.path());
    fs::write(dir.path().join("save.txt"), "200 100\nBlue Level").expect("save seeded");

    let output = run(dir.path(), "+left step", &[]);

    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        fs::read_to_string(dir.path().join("save.txt")).expect("save written"),
        "190 100\nBlue Level"
    );
}

#[test]
fn missing_map_fails_with_nonzero_status() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_level(dir.path());
    fs::remove_file(dir.path().join("level.map")).expect("map removed");

    let output = run(dir.path(), "step", &[]);

    assert!(!output.status.success());
}
