use std::fs;

use converter_engine::{ensure_output_dir, safe_file_name, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("out.xlsx", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "out.xlsx");
    assert_eq!(fs::read(&first).unwrap(), b"first");

    let second = writer.write("out.xlsx", b"second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"second");
}

#[test]
fn failed_write_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("out.xlsx");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), "x").unwrap();

    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    assert!(writer.write("out.xlsx", b"data").is_err());

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("out.xlsx")]);
}

#[test]
fn rejects_file_as_output_dir() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("out.xlsx", b"data").is_err());
}

#[test]
fn safe_names_stay_inside_directory() {
    assert_eq!(safe_file_name("report.xlsx"), "report.xlsx");
    assert_eq!(safe_file_name("../../etc/passwd"), "etc_passwd");
    assert_eq!(safe_file_name("a:b?.xlsx"), "a_b_.xlsx");
    assert_eq!(safe_file_name("   "), "converted.xlsx");
    assert_eq!(safe_file_name("CON.xlsx"), "CON_.xlsx");
    assert!(safe_file_name(&"x".repeat(500)).len() <= 120);
}
