use super::*;
use std::fs;
use tempfile::TempDir;

fn sandbox_with_tree() -> (TempDir, Sandbox) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "hello world").unwrap();
    fs::write(dir.path().join("REPORT.md"), "# report").unwrap();
    fs::write(dir.path().join(".hidden"), "secret").unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs").join("guide.txt"), "guide").unwrap();
    fs::write(dir.path().join("docs").join(".draft"), "draft").unwrap();
    let sandbox = Sandbox::new(dir.path());
    (dir, sandbox)
}

fn names(entries: &[FileEntry]) -> Vec<String> {
    let mut names: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();
    names.sort();
    names
}

#[test]
fn test_resolve_empty_identifier_is_root() {
    let (_dir, sandbox) = sandbox_with_tree();
    let path = sandbox.resolve("").unwrap();
    assert_eq!(path, sandbox.root());
}

#[test]
fn test_resolve_joins_under_root() {
    let (_dir, sandbox) = sandbox_with_tree();
    let path = sandbox.resolve("docs/guide.txt").unwrap();
    assert_eq!(path, sandbox.root().join("docs").join("guide.txt"));
}

#[test]
fn test_resolve_rejects_traversal() {
    let (_dir, sandbox) = sandbox_with_tree();
    let result = sandbox.resolve("../outside.txt");
    assert!(matches!(result, Err(SandboxError::InvalidIdentifier(_))));
    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn test_inspect_file() {
    let (_dir, sandbox) = sandbox_with_tree();
    let path = sandbox.resolve("notes.txt").unwrap();
    let entry = sandbox.inspect(&path, "notes.txt", None).unwrap();
    assert_eq!(entry.id, "notes.txt");
    assert_eq!(entry.name, "notes.txt");
    assert_eq!(entry.kind, EntryKind::File);
    assert!(entry.parent_id.is_none());
}

#[test]
fn test_inspect_folder() {
    let (_dir, sandbox) = sandbox_with_tree();
    let path = sandbox.resolve("docs").unwrap();
    let entry = sandbox.inspect(&path, "docs", None).unwrap();
    assert_eq!(entry.kind, EntryKind::Folder);
}

#[test]
fn test_inspect_missing_path() {
    let (_dir, sandbox) = sandbox_with_tree();
    let path = sandbox.resolve("gone.txt").unwrap();
    let result = sandbox.inspect(&path, "gone.txt", None);
    assert!(matches!(result, Err(SandboxError::NotFound(_))));
}

#[test]
fn test_list_root_skips_hidden() {
    let (_dir, sandbox) = sandbox_with_tree();
    let entries = sandbox.list(None, "").unwrap();
    assert_eq!(names(&entries), vec!["REPORT.md", "docs", "notes.txt"]);
    assert!(entries.iter().all(|e| e.parent_id.is_none()));
}

#[test]
fn test_list_stamps_caller_parent_id() {
    let (_dir, sandbox) = sandbox_with_tree();
    let entries = sandbox.list(Some("docs"), "").unwrap();
    assert_eq!(names(&entries), vec!["guide.txt"]);
    assert_eq!(entries[0].id, "docs/guide.txt");
    assert_eq!(entries[0].parent_id.as_deref(), Some("docs"));
}

#[test]
fn test_list_search_is_case_insensitive() {
    let (_dir, sandbox) = sandbox_with_tree();
    let entries = sandbox.list(None, "report").unwrap();
    assert_eq!(names(&entries), vec!["REPORT.md"]);

    let entries = sandbox.list(None, "NOTES").unwrap();
    assert_eq!(names(&entries), vec!["notes.txt"]);
}

#[test]
fn test_list_search_without_match_is_empty() {
    let (_dir, sandbox) = sandbox_with_tree();
    let entries = sandbox.list(None, "zzz").unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_list_missing_parent_is_error() {
    let (_dir, sandbox) = sandbox_with_tree();
    let result = sandbox.list(Some("no-such-dir"), "");
    assert!(matches!(result, Err(SandboxError::NotADirectory(_))));
}

#[test]
fn test_list_file_parent_is_error() {
    let (_dir, sandbox) = sandbox_with_tree();
    let result = sandbox.list(Some("notes.txt"), "");
    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn test_list_is_idempotent() {
    let (_dir, sandbox) = sandbox_with_tree();
    let mut first = sandbox.list(None, "").unwrap();
    let mut second = sandbox.list(None, "").unwrap();
    first.sort_by(|a, b| a.id.cmp(&b.id));
    second.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(first, second);
}

#[test]
fn test_read_file_round_trip() {
    let (_dir, sandbox) = sandbox_with_tree();
    let content = sandbox.read_file("notes.txt").unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_read_file_on_directory() {
    let (_dir, sandbox) = sandbox_with_tree();
    let result = sandbox.read_file("docs");
    assert!(matches!(result, Err(SandboxError::NotAFile(_))));
}

#[test]
fn test_read_file_missing() {
    let (_dir, sandbox) = sandbox_with_tree();
    let result = sandbox.read_file("gone.txt");
    assert!(matches!(result, Err(SandboxError::NotFound(_))));
}

#[test]
fn test_read_file_invalid_utf8_is_read_failure() {
    let (dir, sandbox) = sandbox_with_tree();
    fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0xfd]).unwrap();
    let result = sandbox.read_file("blob.bin");
    match result {
        Err(SandboxError::ReadFailed { .. }) => {}
        other => panic!("Expected ReadFailed, got: {:?}", other),
    }
}

#[test]
fn test_read_bytes_round_trip() {
    let (dir, sandbox) = sandbox_with_tree();
    let binary_data: Vec<u8> = (0..=255).collect();
    fs::write(dir.path().join("blob.bin"), &binary_data).unwrap();
    let bytes = sandbox.read_bytes("blob.bin").unwrap();
    assert_eq!(bytes, binary_data);
}

#[test]
fn test_resolve_file_rejects_directory() {
    let (_dir, sandbox) = sandbox_with_tree();
    let result = sandbox.resolve_file("docs");
    assert!(matches!(result, Err(SandboxError::NotAFile(_))));
}

#[test]
fn test_hidden_file_readable_by_direct_identifier() {
    // Listings hide dotfiles, direct reads do not.
    let (_dir, sandbox) = sandbox_with_tree();
    let content = sandbox.read_file(".hidden").unwrap();
    assert_eq!(content, "secret");
}
