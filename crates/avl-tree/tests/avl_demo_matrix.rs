use std::path::PathBuf;
use std::process::{Command, Output};

const DEMO: &str = env!("CARGO_BIN_EXE_avl-demo");

fn demo(args: &[&str]) -> Output {
    Command::new(DEMO)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

/// Writes `contents` to a config file unique to this test.
fn config_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("avl-demo-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn avl_demo_default_run_matrix() {
    let out = demo(&[]);
    assert!(out.status.success());
    let expected = "\
Answer
4:2
    3:1
        1:0
            x:-1
            x:-1
        x:-1
    8:1
        5:0
            x:-1
            x:-1
        10:0
            x:-1
            x:-1
true
true
false
";
    assert_eq!(stdout(&out), expected);
}

#[test]
fn avl_demo_values_and_search_matrix() {
    let out = demo(&["2", "1", "--search", "-1", "--search", "1"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "Answer\n2:1\n    1:0\n        x:-1\n        x:-1\n    x:-1\nfalse\ntrue\n"
    );
}

#[test]
fn avl_demo_config_file_matrix() {
    let path = config_file("ignore", "duplicates = \"ignore\"\n");
    let out = demo(&["5", "5", "--search", "5", "--config", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "Answer\n5:0\n    x:-1\n    x:-1\ntrue\n");
    std::fs::remove_file(path).unwrap();
}

#[test]
fn avl_demo_flag_overrides_config_matrix() {
    let path = config_file("override", "duplicates = \"ignore\"\n");
    let out = demo(&[
        "5",
        "5",
        "--search",
        "5",
        "--config",
        path.to_str().unwrap(),
        "--duplicates",
        "keep",
    ]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "Answer\n5:1\n    x:-1\n    5:0\n        x:-1\n        x:-1\ntrue\n"
    );
    std::fs::remove_file(path).unwrap();
}

#[test]
fn avl_demo_bad_config_matrix() {
    let path = config_file("bad", "duplicates = \"sometimes\"\n");
    let out = demo(&["--config", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Invalid config"), "{stderr}");
    std::fs::remove_file(path).unwrap();

    let missing = std::env::temp_dir().join("avl-demo-missing-config.toml");
    let out = demo(&["--config", missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn avl_demo_traces_rebalance_steps_matrix() {
    let out = Command::new(DEMO)
        .args(["1", "2", "3"])
        .env("RUST_LOG", "avl_tree=trace")
        .output()
        .unwrap();
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("rebalance step"), "{stderr}");
    assert!(stderr.contains("rotate left"), "{stderr}");
}
