use anyhow::{bail, Result};
use log::{debug, warn};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Directories never searched for type definitions
const DEFAULT_EXCLUDED: &[&str] = &["target"];

/// Finds the Rust source files whose type definitions feed the structural resolver.
///
/// Hidden directories and build output are skipped. Results are sorted so that, when two
/// files define a type with the same name, the same definition wins on every run.
///
/// ```no_run
/// use openapi_schema_gen::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let result = FileScanner::new(PathBuf::from("./my-project")).scan().unwrap();
/// println!("Found {} Rust files", result.rust_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
    excluded: Vec<String>,
}

/// Files found by [`FileScanner::scan`]
pub struct ScanResult {
    pub rust_files: Vec<PathBuf>,
    /// Paths that could not be read; scanning continues past them
    pub warnings: Vec<String>,
}

impl FileScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            excluded: DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Skip every directory named `name`, in addition to `target` and hidden directories
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.excluded.push(name.into());
        self
    }

    /// Collect all `.rs` files under the root.
    ///
    /// # Errors
    ///
    /// Fails if the root does not exist or is not a directory.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root_path.is_dir() {
            bail!("Project path is not a directory: {:?}", self.root_path);
        }

        let mut rust_files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !name.starts_with('.') && !self.excluded.iter().any(|x| *x == name)
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file()
                        && path.extension().and_then(|s| s.to_str()) == Some("rs")
                    {
                        rust_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        debug!(
            "Scanned {:?}: {} Rust files, {} warnings",
            self.root_path,
            rust_files.len(),
            warnings.len()
        );
        Ok(ScanResult {
            rust_files,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(result: &ScanResult, root: &std::path::Path) -> Vec<String> {
        result
            .rust_files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_collects_nested_sources_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/models")).unwrap();
        fs::write(root.join("src/models/user.rs"), "pub struct User {}").unwrap();
        fs::write(root.join("src/lib.rs"), "pub mod models;").unwrap();
        fs::write(root.join("build.rs"), "fn main() {}").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(
            names(&result, root),
            vec!["build.rs", "src/lib.rs", "src/models/user.rs"]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileScanner::new(temp_dir.path().to_path_buf()).scan().unwrap();
        assert!(result.rust_files.is_empty());
    }

    #[test]
    fn test_scan_skips_target_and_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("target")).unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join("target/generated.rs"), "pub struct Gen;").unwrap();
        fs::write(root.join(".git/hook.rs"), "// hook").unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();
        assert_eq!(names(&result, root), vec!["main.rs"]);
    }

    #[test]
    fn test_scan_respects_extra_exclusions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("benches")).unwrap();
        fs::write(root.join("benches/bench.rs"), "fn main() {}").unwrap();
        fs::write(root.join("lib.rs"), "").unwrap();

        let result = FileScanner::new(root.to_path_buf())
            .exclude_dir("benches")
            .scan()
            .unwrap();
        assert_eq!(names(&result, root), vec!["lib.rs"]);
    }

    #[test]
    fn test_scan_filters_non_rust_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("readme.md"), "# README").unwrap();
        fs::write(root.join("api.yaml"), "routes: []").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();
        assert_eq!(names(&result, root), vec!["main.rs"]);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let result = FileScanner::new(PathBuf::from("/nonexistent/project")).scan();
        assert!(result.is_err());
    }
}
