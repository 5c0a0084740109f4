use context_creator::aggregator::{ContextCreator, Document, FileRecord};
use context_creator::errors::ContextError;
use context_creator::filter::FileFilter;
use context_creator::language::get_file_type;
use context_creator::utils::{decode_content, read_file_content};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_format_file_record() {
    let record = FileRecord {
        path: PathBuf::from("/path/to/file.py"),
        relative_path: PathBuf::from("file.py"),
        content: "def hello():\n    print('Hello, world!')".to_string(),
        file_type: "python",
    };

    assert_eq!(
        record.render(),
        "file.py:\n```python\ndef hello():\n    print('Hello, world!')\n```"
    );
}

#[test]
fn test_document_is_sorted_and_labelled() {
    let dir = tempdir().unwrap();
    // created out of order on purpose
    write(dir.path(), "sub/c.md", b"# Title");
    write(dir.path(), "b.txt", b"hello");
    write(dir.path(), "a.py", b"print(1)");

    let document = ContextCreator::new(dir.path(), &[]).unwrap().create_context();

    assert_eq!(
        document.as_str(),
        "a.py:\n```python\nprint(1)\n```\n\n\
         b.txt:\n```text\nhello\n```\n\n\
         sub/c.md:\n```markdown\n# Title\n```"
    );
    assert_eq!(document.file_count(), 3);
}

#[test]
fn test_runs_are_byte_identical() {
    let dir = tempdir().unwrap();
    for (rel, content) in [
        ("z.py", "z"),
        ("m/inner.rs", "fn m() {}"),
        ("a/b/c.txt", "c"),
        ("a/a.md", "a"),
    ] {
        write(dir.path(), rel, content.as_bytes());
    }

    let creator = ContextCreator::new(dir.path(), &[]).unwrap();
    let first = creator.create_context();
    let second = creator.create_context();

    assert_eq!(first.as_str(), second.as_str());
    let order: Vec<&str> = first.files().iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(order, vec!["a/a.md", "a/b/c.txt", "m/inner.rs", "z.py"]);
}

#[test]
fn test_only_git_metadata_gives_empty_document() {
    let dir = tempdir().unwrap();
    write(dir.path(), ".git/HEAD", b"ref: refs/heads/main");

    let document = ContextCreator::new(dir.path(), &[]).unwrap().create_context();

    assert!(document.is_empty());
    assert_eq!(document.as_str(), "");
}

#[test]
fn test_empty_root_gives_empty_document() {
    let dir = tempdir().unwrap();

    let document = ContextCreator::new(dir.path(), &[]).unwrap().create_context();

    assert!(document.is_empty());
    assert_eq!(document.char_count(), 0);
}

#[test]
fn test_extra_exclude_pattern_drops_matching_files() {
    let dir = tempdir().unwrap();
    write(dir.path(), "app.log", b"started");
    write(dir.path(), "app.py", b"print('app')");

    let document = ContextCreator::new(dir.path(), &["*.log".to_string()])
        .unwrap()
        .create_context();

    assert_eq!(document.as_str(), "app.py:\n```python\nprint('app')\n```");
}

#[test]
fn test_gitignore_respected_by_default() {
    let dir = tempdir().unwrap();
    write(dir.path(), ".gitignore", b"*.log\n!important.log\n");
    write(dir.path(), "important.log", b"keep");
    write(dir.path(), "debug.log", b"drop");

    let document = ContextCreator::new(dir.path(), &[]).unwrap().create_context();

    let paths: Vec<&str> = document.files().iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(paths, vec!["important.log"]);
}

#[test]
fn test_custom_filter_replaces_default() {
    let dir = tempdir().unwrap();
    write(dir.path(), "file1.py", b"def func1():\n    return 1");
    write(dir.path(), "file2.txt", b"This is a text file");
    write(dir.path(), "subdir/file3.md", b"# Markdown file");
    write(dir.path(), ".gitignore", b"*.py\n");

    let creator = ContextCreator::with_filter(dir.path(), |_: &Path| true).unwrap();
    let context = creator.create_context().into_string();

    assert!(context.contains("file1.py:\n```python\ndef func1():"));
    assert!(context.contains("file2.txt:\n```text\nThis is a text file"));
    assert!(context.contains("subdir/file3.md:\n```markdown\n# Markdown file"));
    assert!(context.contains(".gitignore:\n```text\n*.py"));
}

#[test]
fn test_explicit_file_filter() {
    let dir = tempdir().unwrap();
    write(dir.path(), "keep.rs", b"fn keep() {}");
    write(dir.path(), "drop.rs", b"fn drop() {}");

    let filter = FileFilter::new(dir.path(), true, &["drop.*".to_string()]).unwrap();
    let document = ContextCreator::with_filter(dir.path(), filter)
        .unwrap()
        .create_context();

    assert_eq!(document.as_str(), "keep.rs:\n```rust\nfn keep() {}\n```");
}

#[test]
fn test_non_utf8_content_falls_back_to_latin1() {
    let dir = tempdir().unwrap();
    write(dir.path(), "legacy.txt", b"caf\xe9 cr\xe8me");

    let records = ContextCreator::new(dir.path(), &[])
        .unwrap()
        .collect_records();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].content, "café crème");
    assert_eq!(records[0].relative_path, PathBuf::from("legacy.txt"));
    assert!(records[0].path.is_absolute());
}

#[test]
fn test_decode_content_prefers_utf8() {
    assert_eq!(decode_content("naïve".as_bytes().to_vec()), "naïve");
    assert_eq!(decode_content(vec![0x80, 0xff]), "\u{80}\u{ff}");
}

#[test]
fn test_read_failure_becomes_inline_marker() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("vanished.txt");

    let content = read_file_content(&missing);

    assert!(
        content.starts_with("[Error reading file: "),
        "Unexpected marker: {}",
        content
    );
}

#[test]
fn test_file_type_lookup() {
    assert_eq!(get_file_type(Path::new("a.py")), "python");
    assert_eq!(get_file_type(Path::new("A.PY")), "python");
    assert_eq!(get_file_type(Path::new("lib.rs")), "rust");
    assert_eq!(get_file_type(Path::new("view.tsx")), "tsx");
    assert_eq!(get_file_type(Path::new("header.h")), "c");
    assert_eq!(get_file_type(Path::new("notes.txt")), "text");
    assert_eq!(get_file_type(Path::new("Makefile")), "text");
    assert_eq!(get_file_type(Path::new("data.unknown")), "text");
}

#[test]
fn test_document_from_records_sorts_by_relative_path() {
    let record = |rel: &str| FileRecord {
        path: PathBuf::from("/root").join(rel),
        relative_path: PathBuf::from(rel),
        content: rel.to_string(),
        file_type: "text",
    };

    let document = Document::from_records(vec![record("b/x"), record("a"), record("B")]);

    let order: Vec<&str> = document.files().iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(order, vec!["B", "a", "b/x"]);
    assert_eq!(document.to_string(), document.as_str());
}

#[test]
fn test_missing_root_is_fatal() {
    let dir = tempdir().unwrap();
    let result = ContextCreator::new(dir.path().join("nope"), &[]);

    assert!(matches!(result, Err(ContextError::RootNotFound(_))));
}
