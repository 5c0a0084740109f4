use context_creator::IgnoreRules;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_missing_gitignore_admits_everything() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, "debug.log", "log");

    let rules = IgnoreRules::load(&root);

    assert!(matches!(rules, IgnoreRules::NoRules));
    assert!(rules.is_empty());
    assert!(rules.admits(&root.join("debug.log")));
}

#[test]
fn test_negation_reincludes_later_match() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, ".gitignore", "*.log\n!important.log\n");
    write(&root, "important.log", "keep");
    write(&root, "debug.log", "drop");

    let rules = IgnoreRules::load(&root);

    assert!(rules.admits(&root.join("important.log")));
    assert!(!rules.admits(&root.join("debug.log")));
}

#[test]
fn test_last_matching_pattern_wins() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, ".gitignore", "!keep.tmp\n*.tmp\n");
    write(&root, "keep.tmp", "tmp");

    let rules = IgnoreRules::load(&root);

    assert!(
        !rules.admits(&root.join("keep.tmp")),
        "A negation followed by a broader ignore should stay ignored"
    );
}

#[test]
fn test_unanchored_patterns_apply_in_subdirectories() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, ".gitignore", "# logs\n\n*.log\n");
    write(&root, "nested/deeper/trace.log", "log");
    write(&root, "nested/deeper/main.py", "print(1)");

    let rules = IgnoreRules::load(&root);

    assert!(!rules.admits(&root.join("nested/deeper/trace.log")));
    assert!(rules.admits(&root.join("nested/deeper/main.py")));
}

#[test]
fn test_anchored_pattern_only_matches_at_root() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, ".gitignore", "/notes.txt\n");
    write(&root, "notes.txt", "top");
    write(&root, "sub/notes.txt", "nested");

    let rules = IgnoreRules::load(&root);

    assert!(!rules.admits(&root.join("notes.txt")));
    assert!(rules.admits(&root.join("sub/notes.txt")));
}

#[test]
fn test_directory_pattern_excludes_contents() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, ".gitignore", "build/\n");
    write(&root, "build/out.py", "print(1)");
    write(&root, "src/build.py", "print(2)");

    let rules = IgnoreRules::load(&root);

    assert!(!rules.admits(&root.join("build/out.py")));
    assert!(rules.admits(&root.join("src/build.py")));
}

#[test]
fn test_relative_paths_resolve_against_root() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, ".gitignore", "*.log\n");
    write(&root, "debug.log", "drop");

    let rules = IgnoreRules::load(&root);

    assert!(!rules.admits(Path::new("debug.log")));
}

#[test]
fn test_paths_outside_root_are_admitted() {
    let dir = tempdir().unwrap();
    let other = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, ".gitignore", "*.log\n");
    write(other.path(), "debug.log", "elsewhere");

    let rules = IgnoreRules::load(&root);

    assert!(rules.admits(&other.path().canonicalize().unwrap().join("debug.log")));
}

#[test]
fn test_unreadable_gitignore_degrades_to_no_rules() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::write(root.join(".gitignore"), [0xff, 0xfe, b'*', b'\n']).unwrap();
    write(&root, "debug.log", "log");

    let rules = IgnoreRules::load(&root);

    assert!(matches!(rules, IgnoreRules::NoRules));
    assert!(rules.admits(&root.join("debug.log")));
}

#[test]
fn test_from_lines_skips_comments_and_blanks() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, "a.tmp", "tmp");
    write(&root, "b.txt", "txt");

    let rules = IgnoreRules::from_lines(&root, None, ["# comment", "", "   ", "*.tmp"]);

    assert!(!rules.is_empty());
    assert!(!rules.admits(&root.join("a.tmp")));
    assert!(rules.admits(&root.join("b.txt")));
}
