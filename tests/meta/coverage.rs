#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";

    // Entry points and module declaration files carry no logic of their own
    fn is_glue(relative: &str) -> bool {
        relative == "lib.rs"
            || relative.ends_with("main.rs")
            || relative.ends_with("mod.rs")
    }

    fn rust_files(root: &Path) -> Result<Vec<PathBuf>, io::Error> {
        let mut files = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn relative_paths(root: &Path) -> BTreeSet<String> {
        let files = rust_files(root).unwrap_or_else(|error| {
            assert!(!root.exists(), "Failed to scan {}: {error}", root.display());
            Vec::new()
        });

        files
            .iter()
            .filter_map(|path| path.strip_prefix(root).ok())
            .map(|path| path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    // Tests every logic-bearing source file has a unit test file at the same path
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = relative_paths(Path::new(SRC_DIR));
        let unit = relative_paths(Path::new(UNIT_DIR));

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_glue(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives the source file it mirrors
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = relative_paths(Path::new(SRC_DIR));
        let unit = relative_paths(Path::new(UNIT_DIR));

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !is_glue(path) && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source counterpart:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every top-level source module is compiled into the unit target
    #[test]
    fn test_unit_target_declares_every_module() {
        let declared = fs::read_to_string(Path::new(UNIT_DIR).join("main.rs")).unwrap_or_default();

        let modules: BTreeSet<String> = relative_paths(Path::new(SRC_DIR))
            .iter()
            .filter_map(|path| path.split_once('/').map(|(module, _)| module.to_string()))
            .collect();

        let undeclared: Vec<&String> = modules
            .iter()
            .filter(|module| !declared.contains(&format!("mod {module};")))
            .collect();

        assert!(
            undeclared.is_empty(),
            "tests/unit/main.rs does not declare: {undeclared:?}"
        );
    }

    // Tests every test file contains at least one test
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new(TESTS_DIR);

        let empty: Vec<String> = relative_paths(tests_dir)
            .into_iter()
            .filter(|path| !is_glue(path))
            .filter(|path| {
                fs::read_to_string(tests_dir.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }

    // Tests every source file opens with a module doc comment
    #[test]
    fn test_src_files_have_module_docs() {
        let src_dir = Path::new(SRC_DIR);

        let undocumented: Vec<String> = relative_paths(src_dir)
            .into_iter()
            .filter(|path| {
                fs::read_to_string(src_dir.join(path))
                    .map(|content| !content.trim_start().starts_with("//!"))
                    .unwrap_or(true)
            })
            .collect();

        assert!(
            undocumented.is_empty(),
            "Source files without a //! module doc: {undocumented:?}"
        );
    }

    // Tests every public module declaration carries a doc line
    #[test]
    fn test_module_declarations_are_documented() {
        let src_dir = Path::new(SRC_DIR);

        let undocumented: Vec<String> = relative_paths(src_dir)
            .into_iter()
            .filter(|path| path == "lib.rs" || path.ends_with("mod.rs"))
            .flat_map(|path| {
                let content = fs::read_to_string(src_dir.join(&path)).unwrap_or_default();
                let lines: Vec<&str> = content.lines().map(str::trim).collect();
                lines
                    .windows(2)
                    .filter(|pair| {
                        pair.get(1).is_some_and(|line| line.starts_with("pub mod "))
                            && pair.first().is_none_or(|line| !line.starts_with("///"))
                    })
                    .filter_map(|pair| pair.get(1).map(|line| format!("  - src/{path}: {line}")))
                    .collect::<Vec<_>>()
            })
            .collect();

        assert!(
            undocumented.is_empty(),
            "Module declarations without a doc line:\n{}",
            undocumented.join("\n")
        );
    }

    // Tests the strict lint levels stay in the manifest
    #[test]
    fn test_manifest_lints_are_strict() {
        let manifest = fs::read_to_string("Cargo.toml").unwrap_or_default();

        let required = [
            "rust_2018_idioms = \"deny\"",
            "missing_docs = \"deny\"",
            "unused = \"deny\"",
            "missing_const_for_fn = \"deny\"",
            "unwrap_used = \"deny\"",
            "expect_used = \"deny\"",
        ];
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|lint| !manifest.lines().any(|line| line.trim() == *lint))
            .collect();

        assert!(missing.is_empty(), "Cargo.toml lints loosened: {missing:?}");
    }
}
