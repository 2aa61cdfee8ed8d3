mod common;
use common::*;
use ezc::mach::Runtime;
use pretty_assertions::assert_eq;

fn temp_path(name: &str) -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("ezc-{}-{}.txt", name, std::process::id()));
    path.to_string_lossy().into_owned()
}

#[test]
fn test_open_and_write() {
    let path = temp_path("write");
    let mut r = Runtime::default();
    let source = format!("\"{}\" open! first write! second write! print!", path);
    let printed = exec(&mut r, &source);
    assert_eq!(printed, format!("FILE: open [{}]\n", path));
    assert!(stack(&r).is_empty());
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "first\nsecond\n");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_write_long_line() {
    let path = temp_path("long");
    let line = "0123456789abcdef".repeat(1 << 16);
    let mut r = Runtime::default();
    let printed = exec(&mut r, &format!("\"{}\" open! \"{}\" write! del!", path, line));
    assert_eq!(printed, "");
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.len(), line.len() + 1);
    assert_eq!(contents, format!("{}\n", line));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_write_needs_file() {
    let mut r = Runtime::default();
    assert_eq!(
        exec(&mut r, "1 text write!"),
        "TYPE MISMATCH IN test:1 (7..13); `write` DOES NOT ACCEPT int\n"
    );
    assert_eq!(stack(&r), vec!["1"]);
}

#[test]
fn test_write_needs_string() {
    let path = temp_path("needs-string");
    let mut r = Runtime::default();
    let printed = exec(&mut r, &format!("\"{}\" open! 5 write!", path));
    assert!(printed.starts_with("TYPE MISMATCH"));
    assert!(printed.ends_with("`write` DOES NOT ACCEPT int\n"));
    assert_eq!(stack(&r).len(), 1);
    drop(r);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_open_failure() {
    let mut r = Runtime::default();
    let path = std::env::temp_dir()
        .join("ezc-no-such-dir")
        .join("x.txt")
        .to_string_lossy()
        .into_owned();
    let printed = exec(&mut r, &format!("\"{}\" open!", path));
    assert!(printed.starts_with("I/O FAILURE IN test:1"));
    assert!(stack(&r).is_empty());
}

#[test]
fn test_open_needs_string() {
    let mut r = Runtime::default();
    assert_eq!(
        exec(&mut r, "3 open!"),
        "TYPE MISMATCH IN test:1 (2..7); `open` DOES NOT ACCEPT int\n"
    );
    assert!(stack(&r).is_empty());
}
