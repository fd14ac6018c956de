//! Custom assertions for pipeline tests

use std::path::Path;

/// File names in `dir`, sorted
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| {
            entry
                .expect("Failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Assert that no staging file survived in `dir`
pub fn assert_no_partials(dir: &Path) {
    let leftovers: Vec<String> = listing(dir)
        .into_iter()
        .filter(|name| name.ends_with(".partial"))
        .collect();
    assert!(
        leftovers.is_empty(),
        "staging files left behind in {}: {:?}",
        dir.display(),
        leftovers
    );
}

/// Assert that `path` holds exactly `expected`
pub fn assert_file_bytes(path: &Path, expected: &[u8]) {
    let actual = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    assert_eq!(actual, expected, "unexpected contents in {}", path.display());
}
