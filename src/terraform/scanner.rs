use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use super::extractor::ResourceExtractor;
use super::model::{ResourceInventory, ResourceStats};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregated result of scanning one Terraform directory.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub stats: ResourceStats,
    pub inventory: ResourceInventory,
    pub files: Vec<ScannedFile>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Scans every `.tf` file directly inside a directory.
///
/// Files are visited in file-name order so repeated scans of the same
/// directory produce identical samples. A file that cannot be read is
/// logged and skipped; it never aborts the scan.
pub struct WorkspaceScanner {
    extractor: ResourceExtractor,
}

impl Default for WorkspaceScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceScanner {
    pub fn new() -> Self {
        Self {
            extractor: ResourceExtractor::new(),
        }
    }

    pub fn scan(&self, dir: &Path) -> ScanReport {
        let mut report = ScanReport::default();

        if !dir.is_dir() {
            warn!("Terraform directory not found: {}", dir.display());
            return report;
        }

        let tf_files = Self::collect_tf_files(dir);
        info!("Found {} Terraform files in {}", tf_files.len(), dir.display());

        for path in tf_files {
            match self.scan_file(&path, &mut report.stats, &mut report.inventory) {
                Ok(size) => {
                    debug!("Scanned {} ({} bytes)", path.display(), size);
                    report.files.push(ScannedFile { path, size });
                }
                Err(err) => {
                    warn!("Skipping {}", err);
                    report.skipped.push(SkippedFile {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Collects all .tf files directly in a directory (not recursive), sorted by name.
    pub fn collect_tf_files(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping directory entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tf"))
            .map(|e| e.into_path())
            .collect()
    }

    /// Reads one file and applies every extractor to it. Nothing is recorded
    /// unless the whole file was read successfully.
    fn scan_file(
        &self,
        path: &Path,
        stats: &mut ResourceStats,
        inventory: &mut ResourceInventory,
    ) -> Result<u64, ScanError> {
        let io_error = |source| ScanError::Io {
            path: path.display().to_string(),
            source,
        };

        let content = std::fs::read_to_string(path).map_err(io_error)?;
        let size = content.len() as u64;
        let lines: Vec<&str> = content.split('\n').collect();

        self.extractor.extract(&lines, &content, stats, inventory);

        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terraform::model::{Category, ResourceKind};
    use std::fs;
    use tempfile::TempDir;

    const USER_A: &str = r#"
resource "databricks_user" "a" {
  user_name = "ana@contoso.com"
}
"#;

    const USER_B: &str = r#"
resource "databricks_user" "b" {
  user_name = "bo@fabrikam.io"
}
"#;

    #[test]
    fn empty_directory_yields_zero_counts() {
        let temp_dir = TempDir::new().unwrap();
        let report = WorkspaceScanner::new().scan(temp_dir.path());

        assert!(report.stats.is_empty());
        assert!(report.inventory.is_empty());
        assert!(report.files.is_empty());
        assert_eq!(report.total_bytes(), 0);
    }

    #[test]
    fn missing_directory_yields_zero_counts() {
        let temp_dir = TempDir::new().unwrap();
        let report = WorkspaceScanner::new().scan(&temp_dir.path().join("absent"));

        assert!(report.stats.is_empty());
        assert!(report.files.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn aggregates_across_files_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b_users.tf"), USER_B).unwrap();
        fs::write(temp_dir.path().join("a_users.tf"), USER_A).unwrap();

        let report = WorkspaceScanner::new().scan(temp_dir.path());

        assert_eq!(report.stats.get(ResourceKind::Users), 2);
        assert_eq!(
            report.inventory.samples(ResourceKind::Users),
            ["ana@contoso.com", "bo@fabrikam.io"]
        );
        assert_eq!(report.files.len(), 2);
        assert!(report.files[0].path.ends_with("a_users.tf"));
        assert_eq!(
            report.total_bytes(),
            (USER_A.len() + USER_B.len()) as u64
        );
    }

    #[test]
    fn only_top_level_tf_files_are_scanned() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("users.tf"), USER_A).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), USER_B).unwrap();
        fs::write(temp_dir.path().join("users.tf.bak"), USER_B).unwrap();
        let nested = temp_dir.path().join("modules");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("nested.tf"), USER_B).unwrap();

        let files = WorkspaceScanner::collect_tf_files(temp_dir.path());

        assert_eq!(files, vec![temp_dir.path().join("users.tf")]);
    }

    #[test]
    fn unreadable_file_does_not_affect_other_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.tf"), USER_A).unwrap();
        fs::write(temp_dir.path().join("c.tf"), USER_B).unwrap();

        let baseline = WorkspaceScanner::new().scan(temp_dir.path());

        let mut broken = b"resource \"databricks_user\" \"x\" {\n  user_name = \"".to_vec();
        broken.extend_from_slice(&[0xff, 0xfe, 0xfd]);
        broken.extend_from_slice(b"\"\n}\n");
        fs::write(temp_dir.path().join("b.tf"), broken).unwrap();

        let report = WorkspaceScanner::new().scan(temp_dir.path());

        assert_eq!(report.stats, baseline.stats);
        assert_eq!(report.inventory, baseline.inventory);
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("b.tf"));
    }

    #[test]
    fn large_files_are_scanned_in_full() {
        let temp_dir = TempDir::new().unwrap();
        let mut content = String::from(USER_A);
        let padding = "# exported by terraformer, do not edit by hand\n";
        while content.len() <= 11 * 1024 * 1024 {
            content.push_str(padding);
        }
        content.push_str(USER_B);
        fs::write(temp_dir.path().join("big.tf"), &content).unwrap();

        let report = WorkspaceScanner::new().scan(temp_dir.path());

        assert_eq!(report.stats.get(ResourceKind::Users), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(report.total_bytes(), content.len() as u64);
    }

    #[test]
    fn repeated_scans_are_identical() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("users.tf"), USER_A).unwrap();
        fs::write(
            temp_dir.path().join("clusters.tf"),
            r#"
resource "databricks_cluster" "etl" {
  cluster_name = "prod-etl"
  node_type_id = "i3.xlarge"
}
"#,
        )
        .unwrap();

        let scanner = WorkspaceScanner::new();
        let first = scanner.scan(temp_dir.path());
        let second = scanner.scan(temp_dir.path());

        assert_eq!(first.stats, second.stats);
        assert_eq!(first.inventory, second.inventory);
        assert_eq!(
            first.inventory.tally(Category::ClusterNodeTypes).get("i3.xlarge"),
            1
        );
    }
}
