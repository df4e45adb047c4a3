//! Runs the `nullfold` binary against temporary projects.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn nullfold(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nullfold"))
        .args(args)
        .current_dir(cwd)
        .env_remove("NULLFOLD_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("nullfold should start")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn clean_project_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.csx"), "a.m();\n").unwrap();

    let output = nullfold(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stderr(&output).is_empty());
}

#[test]
fn suggestions_are_reported_with_exit_code_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.csx"), "if (a != null) a.m();\n").unwrap();

    let output = nullfold(dir.path(), &["--pretty", "false"]);
    assert_eq!(output.status.code(), Some(1));
    let errors = stderr(&output);
    assert!(errors.contains("main.csx:1:1 - suggestion NF6001"), "{errors}");
    assert!(!errors.contains("NF6002"), "{errors}");
    assert!(stdout(&output).contains("Found 1 null check(s) to simplify in 1 file(s)."));
}

#[test]
fn fix_rewrites_and_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("main.csx");
    fs::write(&script, "if (d.myStruct != null) d.myStruct.Value.M();\n").unwrap();

    let output = nullfold(
        dir.path(),
        &["--fix", "--pretty", "false", "--type", "d.myStruct=nullable"],
    );
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(fs::read_to_string(&script).unwrap(), "d.myStruct?.M();\n");
    assert!(stdout(&output).contains("Fixed 1 null check(s) in 1 file(s)."));
}

#[test]
fn config_file_declares_types() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("nullfold.json"),
        r#"{ "types": { "count": "value" }, "include": ["scripts/**/*.csx"] }"#,
    )
    .unwrap();
    fs::create_dir(dir.path().join("scripts")).unwrap();
    fs::write(
        dir.path().join("scripts/a.csx"),
        "if (count != null) count.ToString();\n",
    )
    .unwrap();
    fs::write(dir.path().join("ignored.csx"), "if (a != null) a.m();\n").unwrap();

    let output = nullfold(dir.path(), &["--pretty", "false"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
}

#[test]
fn list_files_prints_discovered_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.csx"), "").unwrap();
    fs::write(dir.path().join("a.csx"), "").unwrap();
    fs::write(dir.path().join("c.txt"), "").unwrap();

    let output = nullfold(dir.path(), &["--list-files"]);
    assert_eq!(output.status.code(), Some(0));
    let listed: Vec<String> = stdout(&output)
        .lines()
        .map(|line| {
            Path::new(line)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(listed, vec!["a.csx", "b.csx"]);
}

#[test]
fn parse_errors_exit_with_code_two() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.csx"), "if (a != null) a.m()\n").unwrap();

    let output = nullfold(dir.path(), &["--pretty", "false"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("error NF1002"));
}

#[test]
fn missing_project_is_a_fatal_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = nullfold(dir.path(), &["--project", "nope.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("config file not found"));
}
