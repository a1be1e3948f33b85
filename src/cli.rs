use std::path::PathBuf;

use clap::Parser;

/// Databricks workspace assessment
///
/// Scans a Terraform export of a Databricks workspace, builds a resource
/// inventory and writes an assessment report (Markdown, HTML and PDF),
/// optionally enriched by a model serving endpoint.
#[derive(Parser, Debug)]
#[command(name = "dbassess")]
#[command(version)]
#[command(about, long_about)]
pub struct Cli {
    /// Suppress colored output (useful for CI/CD pipelines)
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Project root used to resolve the default Terraform and output directories
    #[arg(short = 'p', long = "project-root", env = "PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Directory containing the exported .tf files [default: <root>/databricks_tf_files]
    #[arg(short = 'd', long = "tf-dir")]
    pub tf_dir: Option<PathBuf>,

    /// Directory for the generated report files [default: <root>/output_summary_agent]
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Report title
    #[arg(long = "title", default_value = crate::report::DEFAULT_TITLE)]
    pub title: String,

    /// Skip the language model sections and only render the inventory
    #[arg(long = "skip-llm")]
    pub skip_llm: bool,

    /// Do not attempt to convert the HTML report to PDF
    #[arg(long = "skip-pdf")]
    pub skip_pdf: bool,

    /// Databricks workspace URL
    #[arg(long = "host", env = "DATABRICKS_HOST", hide_env_values = true)]
    pub host: Option<String>,

    /// Databricks personal access token
    #[arg(long = "token", env = "DATABRICKS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Serving endpoint path, e.g. /serving-endpoints/<name>/invocations
    #[arg(long = "endpoint", env = "DATABRICKS_ENDPOINT")]
    pub endpoint: Option<String>,
}
