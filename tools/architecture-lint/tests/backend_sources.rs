//! Lints source trees on disk, including the real backend.

use std::fs;
use std::path::{Path, PathBuf};

use architecture_lint::{ArchitectureLintError, lint_backend_sources};
use rstest::rstest;
use tempfile::TempDir;

fn write_backend(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("tempdir");
    let src_dir = temp_dir.path().join("backend").join("src");
    for (file, contents) in files {
        let path = src_dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write source file");
    }
    temp_dir
}

#[rstest]
fn workspace_backend_respects_layer_boundaries() {
    let backend_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../backend");
    let result = lint_backend_sources(&backend_dir);
    assert!(result.is_ok(), "expected a clean backend, got: {result:?}");
}

#[rstest]
fn only_layer_directories_are_scanned() {
    let temp_dir = write_backend(&[
        ("domain/record.rs", "pub struct Record;"),
        ("inbound/http/records.rs", "use crate::domain::Record; fn h() {}"),
        (
            "server/mod.rs",
            "use crate::outbound::memory::InMemoryRecordRepository; fn wire() {}",
        ),
        ("outbound/memory/notes.txt", "use crate::inbound::http;"),
    ]);

    let result = lint_backend_sources(&temp_dir.path().join("backend"));
    assert!(result.is_ok(), "expected success, got: {result:?}");
}

#[rstest]
fn violations_carry_paths_relative_to_src() {
    let temp_dir = write_backend(&[
        ("domain/record.rs", "pub struct Record;"),
        (
            "inbound/http/records.rs",
            "use crate::outbound::memory::InMemoryRecordRepository; fn h() {}",
        ),
        ("domain/error.rs", "use actix_web::ResponseError; fn h() {}"),
    ]);

    let error = lint_backend_sources(&temp_dir.path().join("backend"))
        .expect_err("violations expected");
    assert!(matches!(error, ArchitectureLintError::Violations(_)));

    let mut files: Vec<PathBuf> = error
        .violations()
        .iter()
        .map(|violation| violation.file.clone())
        .collect();
    files.sort();
    assert_eq!(
        files,
        vec![
            PathBuf::from("domain/error.rs"),
            PathBuf::from("inbound/http/records.rs"),
        ]
    );
}
