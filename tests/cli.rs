//! Integration tests for CLI (run_to, Args) – exercise convertlf::cli end to end.

mod common;
use common::{pattern, project, read};

use clap::Parser;
use convertlf::cli::{run_to, Args};

fn run_cli(args: &[&str]) -> (i32, String) {
    let argv: Vec<&str> = std::iter::once("convertlf")
        .chain(args.iter().copied())
        .collect();
    let mut out = Vec::new();
    let code = run_to(Args::parse_from(argv), &mut out);
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn cli_no_args_usage_exit_one() {
    let (code, out) = run_cli(&[]);
    assert_eq!(code, 1);
    assert!(out.contains("Usage: convertlf <pattern>"));
    assert!(out.contains("Example: convertlf *.c *.h"));
}

#[test]
fn cli_converts_matching_files() {
    let (_dir, root) = project(&[
        ("a.c", b"int a;\r\nint b;\r\n"),
        ("b.c", b"x\ry\r"),
        ("notes.txt", b"keep\r\n"),
    ]);
    let (code, out) = run_cli(&[&pattern(&root, "*.c")]);
    assert_eq!(code, 0);
    assert_eq!(read(&root, "a.c"), b"int a;\nint b;\n");
    assert_eq!(read(&root, "b.c"), b"x\ny\n");
    assert_eq!(read(&root, "notes.txt"), b"keep\r\n", "not matched by *.c");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("a.c"));
    assert!(lines[1].ends_with("b.c"));
}

#[test]
fn cli_multiple_patterns_in_order() {
    let (_dir, root) = project(&[("x.h", b"1\r\n"), ("y.c", b"2\r\n")]);
    let (code, out) = run_cli(&[&pattern(&root, "*.h"), &pattern(&root, "*.c")]);
    assert_eq!(code, 0);
    let lines: Vec<_> = out.lines().collect();
    assert!(lines[0].ends_with("x.h"));
    assert!(lines[1].ends_with("y.c"));
}

#[test]
fn cli_missing_literal_path_continues() {
    let (_dir, root) = project(&[("ok.txt", b"a\r\nb")]);
    let missing = root.join("missing.txt");
    let ok = root.join("ok.txt");
    let (code, out) = run_cli(&[missing.to_str().unwrap(), ok.to_str().unwrap()]);
    assert_eq!(code, 0, "open failures are recoverable");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Couldn't open "));
    assert!(lines[0].ends_with("missing.txt"));
    assert!(lines[1].ends_with("ok.txt"));
    assert_eq!(read(&root, "ok.txt"), b"a\nb");
}

#[test]
fn cli_unmatched_glob_is_fatal() {
    let (_dir, root) = project(&[("a.c", b"a\r\n")]);
    let (code, out) = run_cli(&[&pattern(&root, "*.rs"), &pattern(&root, "*.c")]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert_eq!(
        read(&root, "a.c"),
        b"a\r\n",
        "patterns after the fatal one are not attempted"
    );
}

#[test]
fn cli_fatal_keeps_earlier_output() {
    let (_dir, root) = project(&[("a.c", b"a\r\n")]);
    let (code, out) = run_cli(&[&pattern(&root, "*.c"), &pattern(&root, "*.nope")]);
    assert_eq!(code, 1);
    assert!(out.trim_end().ends_with("a.c"));
    assert_eq!(read(&root, "a.c"), b"a\n", "no rollback of converted files");
}

#[test]
fn cli_quiet_hides_successes() {
    let (_dir, root) = project(&[("a.c", b"a\r\n")]);
    let missing = root.join("gone.c");
    let (code, out) = run_cli(&["-q", &pattern(&root, "*.c"), missing.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("Couldn't open "));
}

#[test]
fn cli_skips_directories() {
    let (_dir, root) = project(&[("src/main.c", b"m\r\n")]);
    let (code, out) = run_cli(&[&pattern(&root, "*")]);
    assert_eq!(code, 0, "a glob matching only directories is not fatal");
    assert!(out.is_empty());
    assert_eq!(read(&root, "src/main.c"), b"m\r\n", "* does not recurse");
}

#[test]
fn cli_double_star_recurses() {
    let (_dir, root) = project(&[
        ("top.c", b"t\r\n"),
        ("src/main.c", b"m\r\n"),
        ("src/deep/util.c", b"u\r"),
    ]);
    let (code, out) = run_cli(&[&pattern(&root, "**/*.c")]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 3);
    assert_eq!(read(&root, "top.c"), b"t\n");
    assert_eq!(read(&root, "src/main.c"), b"m\n");
    assert_eq!(read(&root, "src/deep/util.c"), b"u\n");
}

#[test]
fn cli_verbose_flag_accepted() {
    let (_dir, root) = project(&[("a.c", b"a\r\n")]);
    let (code, _) = run_cli(&["-vv", &pattern(&root, "*.c")]);
    assert_eq!(code, 0);
}

#[cfg(unix)]
#[test]
fn cli_symlink_loop_converts_each_file_once() {
    let (_dir, root) = project(&[("src/a.c", b"a\r\n")]);
    std::os::unix::fs::symlink(&root, root.join("src/loop")).unwrap();
    let (code, out) = run_cli(&[&pattern(&root, "**/*.c")]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 1);
    assert_eq!(read(&root, "src/a.c"), b"a\n");
}

#[cfg(unix)]
#[test]
fn cli_device_path_does_not_stop_batch() {
    let (_dir, root) = project(&[("a.c", b"a\r\n")]);
    let (code, out) = run_cli(&["/dev/null", &pattern(&root, "*.c")]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 1);
    assert!(out.trim_end().ends_with("a.c"));
    assert_eq!(read(&root, "a.c"), b"a\n");
}
