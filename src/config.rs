use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::AssessError;
use crate::llm::ServingSettings;

pub const DEFAULT_TF_DIR: &str = "databricks_tf_files";
pub const DEFAULT_OUTPUT_DIR: &str = "output_summary_agent";

#[derive(Debug)]
pub struct Config {
    pub no_color: bool,
    pub verbose: bool,
    pub tf_dir: PathBuf,
    pub output_dir: PathBuf,
    pub title: String,
    pub skip_pdf: bool,
    /// `None` when the language model sections are skipped.
    pub serving: Option<ServingSettings>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, AssessError> {
        let project_root = match cli.project_root {
            Some(path) => Self::resolve_path(&path)?,
            None => std::env::current_dir().map_err(|e| {
                AssessError::Config(format!("Cannot determine current directory: {}", e))
            })?,
        };

        // A missing Terraform directory is reported by the scanner, not here
        let tf_dir = match cli.tf_dir {
            Some(path) => Self::resolve_path(&path)?,
            None => project_root.join(DEFAULT_TF_DIR),
        };

        let output_dir = match cli.output_dir {
            Some(path) => Self::resolve_path(&path)?,
            None => project_root.join(DEFAULT_OUTPUT_DIR),
        };

        let serving = if cli.skip_llm {
            None
        } else {
            Some(Self::serving_settings(cli.host, cli.token, cli.endpoint)?)
        };

        Ok(Self {
            no_color: cli.no_color,
            verbose: cli.verbose,
            tf_dir,
            output_dir,
            title: cli.title,
            skip_pdf: cli.skip_pdf,
            serving,
        })
    }

    fn serving_settings(
        host: Option<String>,
        token: Option<String>,
        endpoint: Option<String>,
    ) -> Result<ServingSettings, AssessError> {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

        let missing: Vec<&str> = [
            ("DATABRICKS_HOST", present(&host)),
            ("DATABRICKS_TOKEN", present(&token)),
            ("DATABRICKS_ENDPOINT", present(&endpoint)),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(AssessError::Config(format!(
                "Missing {} (set the environment variables or pass --skip-llm)",
                missing.join(", ")
            )));
        }

        Ok(ServingSettings {
            host: host.unwrap_or_default().trim().to_string(),
            token: token.unwrap_or_default().trim().to_string(),
            endpoint: endpoint.unwrap_or_default().trim().to_string(),
        })
    }

    /// Resolves a path to an absolute path.
    /// - Absolute paths are returned as-is
    /// - Relative paths are resolved relative to current directory
    pub fn resolve_path(path: &Path) -> Result<PathBuf, AssessError> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().map_err(|e| {
                AssessError::Config(format!("Cannot determine current directory: {}", e))
            })?;
            Ok(current_dir.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::report::DEFAULT_TITLE;

    fn cli() -> Cli {
        Cli {
            no_color: false,
            verbose: false,
            project_root: None,
            tf_dir: None,
            output_dir: None,
            title: DEFAULT_TITLE.to_string(),
            skip_llm: true,
            skip_pdf: false,
            host: None,
            token: None,
            endpoint: None,
        }
    }

    #[test]
    fn title_defaults_to_report_title() {
        let cli = Cli::try_parse_from(["dbassess", "--skip-llm"]).unwrap();
        assert_eq!(cli.title, DEFAULT_TITLE);
    }

    #[test]
    fn from_cli_with_defaults() {
        let config = Config::from_cli(cli()).expect("Config creation should succeed");
        let current_dir = std::env::current_dir().unwrap();

        assert!(!config.no_color);
        assert!(!config.verbose);
        assert_eq!(config.tf_dir, current_dir.join("databricks_tf_files"));
        assert_eq!(config.output_dir, current_dir.join("output_summary_agent"));
        assert!(config.serving.is_none());
    }

    #[test]
    fn from_cli_with_project_root() {
        let temp_dir = std::env::temp_dir();
        let cli = Cli {
            project_root: Some(temp_dir.clone()),
            ..cli()
        };

        let config = Config::from_cli(cli).expect("Config creation should succeed");

        assert_eq!(config.tf_dir, temp_dir.join("databricks_tf_files"));
        assert_eq!(config.output_dir, temp_dir.join("output_summary_agent"));
    }

    #[test]
    fn explicit_dirs_override_project_root() {
        let cli = Cli {
            project_root: Some(PathBuf::from("/srv/project")),
            tf_dir: Some(PathBuf::from("/data/export")),
            output_dir: Some(PathBuf::from("/data/out")),
            ..cli()
        };

        let config = Config::from_cli(cli).expect("Config creation should succeed");

        assert_eq!(config.tf_dir, PathBuf::from("/data/export"));
        assert_eq!(config.output_dir, PathBuf::from("/data/out"));
    }

    #[test]
    fn missing_tf_dir_is_not_an_error() {
        let cli = Cli {
            tf_dir: Some(PathBuf::from("/nonexistent/path/that/does/not/exist")),
            ..cli()
        };

        assert!(Config::from_cli(cli).is_ok());
    }

    #[test]
    fn llm_settings_required_unless_skipped() {
        let cli = Cli {
            skip_llm: false,
            host: Some("https://adb-1.azuredatabricks.net".to_string()),
            token: Some("  ".to_string()),
            ..cli()
        };

        let err = Config::from_cli(cli).unwrap_err().to_string();

        assert!(err.contains("DATABRICKS_TOKEN"));
        assert!(err.contains("DATABRICKS_ENDPOINT"));
        assert!(!err.contains("DATABRICKS_HOST"));
    }

    #[test]
    fn llm_settings_are_trimmed() {
        let cli = Cli {
            skip_llm: false,
            host: Some("https://adb-1.azuredatabricks.net ".to_string()),
            token: Some("dapi123".to_string()),
            endpoint: Some("/serving-endpoints/m/invocations".to_string()),
            ..cli()
        };

        let config = Config::from_cli(cli).expect("Config creation should succeed");
        let serving = config.serving.unwrap();

        assert_eq!(serving.host, "https://adb-1.azuredatabricks.net");
        assert_eq!(serving.token, "dapi123");
    }

    #[test]
    fn resolve_path_absolute_unchanged() {
        let path = PathBuf::from("/absolute/path");
        let resolved = Config::resolve_path(&path).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn resolve_path_relative_joined_with_current_dir() {
        let path = PathBuf::from("relative/path");
        let resolved = Config::resolve_path(&path).unwrap();
        let expected = std::env::current_dir().unwrap().join("relative/path");
        assert_eq!(resolved, expected);
    }
}
