//! The assessment run: scan, render, ask the model, write.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};

use crate::config::Config;
use crate::error::{AssessError, Result};
use crate::llm::CompletionClient;
use crate::output::{OutputWriter, WrittenFiles};
use crate::report::{render_inventory, Labels, ReportBuilder};
use crate::terraform::{ResourceKind, ScanReport, WorkspaceScanner};

/// Cooperative cancellation shared with the Ctrl-C handler.
///
/// Setting the flag never interrupts a stage that is already running; the
/// pipeline observes it before starting the next one.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Sets the flag on Ctrl-C.
    pub fn install_ctrlc_handler(&self) {
        let flag = self.clone();
        ctrlc::set_handler(move || {
            flag.stop();
        })
        .ok(); // Ignore if handler already set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scan,
    RenderInventory,
    ModelReport,
    WriteOutputs,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::RenderInventory => "render inventory",
            Stage::ModelReport => "model report",
            Stage::WriteOutputs => "write outputs",
        }
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub scan: ScanReport,
    pub files: WrittenFiles,
}

pub struct Pipeline<'a> {
    tf_dir: PathBuf,
    scanner: WorkspaceScanner,
    labels: Labels,
    builder: ReportBuilder<'a>,
    writer: OutputWriter,
    stop: StopFlag,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &Config, client: Option<&'a dyn CompletionClient>, stop: StopFlag) -> Self {
        Self {
            tf_dir: config.tf_dir.clone(),
            scanner: WorkspaceScanner::new(),
            labels: Labels::default(),
            builder: ReportBuilder::new(config.title.clone(), client),
            writer: OutputWriter::new(config.output_dir.clone(), config.skip_pdf, config.no_color),
            stop,
        }
    }

    pub fn writer(&self) -> &OutputWriter {
        &self.writer
    }

    pub fn run(&self) -> Result<RunOutcome> {
        self.enter(Stage::Scan)?;
        let scan = self.scanner.scan(&self.tf_dir);
        info!(
            "Users: {}, Clusters: {}, Jobs: {}",
            scan.stats.get(ResourceKind::Users),
            scan.stats.get(ResourceKind::Clusters),
            scan.stats.get(ResourceKind::Jobs)
        );

        self.enter(Stage::RenderInventory)?;
        let inventory = render_inventory(&scan, &self.labels);

        self.enter(Stage::ModelReport)?;
        let markdown = self.builder.build(&inventory)?;

        self.enter(Stage::WriteOutputs)?;
        let files = self.writer.write(&markdown, self.builder.title(), &scan)?;

        Ok(RunOutcome { scan, files })
    }

    fn enter(&self, stage: Stage) -> Result<()> {
        if self.stop.is_stopped() {
            info!("Stop requested, not starting stage: {}", stage.as_str());
            return Err(AssessError::Stopped);
        }
        debug!("Stage: {}", stage.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &std::path::Path) -> Config {
        Config {
            no_color: true,
            verbose: false,
            tf_dir: root.join("tf"),
            output_dir: root.join("out"),
            title: "Acme Assessment".to_string(),
            skip_pdf: true,
            serving: None,
        }
    }

    /// Requests a stop while the model stage is running.
    struct StoppingClient {
        stop: StopFlag,
    }

    impl CompletionClient for StoppingClient {
        fn complete(&self, _: &str, _: &str, _: u32) -> std::result::Result<String, LlmError> {
            self.stop.stop();
            Ok("analysis".to_string())
        }

        fn model_name(&self) -> &str {
            "stopping"
        }
    }

    #[test]
    fn run_without_model_writes_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());
        fs::create_dir(&config.tf_dir).unwrap();
        fs::write(
            config.tf_dir.join("users.tf"),
            "resource \"databricks_user\" \"a\" {\n  user_name = \"ana@contoso.com\"\n}\n",
        )
        .unwrap();

        let outcome = Pipeline::new(&config, None, StopFlag::new()).run().unwrap();

        assert_eq!(outcome.scan.stats.get(ResourceKind::Users), 1);
        let markdown = fs::read_to_string(&outcome.files.markdown).unwrap();
        assert!(markdown.starts_with("# Acme Assessment"));
        assert!(markdown.contains("| contoso.com | 1 |"));
    }

    #[test]
    fn missing_tf_dir_still_produces_report() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());

        let outcome = Pipeline::new(&config, None, StopFlag::new()).run().unwrap();

        assert!(outcome.scan.stats.is_empty());
        let markdown = fs::read_to_string(&outcome.files.markdown).unwrap();
        assert!(markdown.contains("**Total resources:** 0"));
    }

    #[test]
    fn stop_before_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());
        let stop = StopFlag::new();
        stop.stop();

        let result = Pipeline::new(&config, None, stop).run();

        assert!(matches!(result, Err(AssessError::Stopped)));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn stop_during_stage_takes_effect_at_next_stage() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());
        let stop = StopFlag::new();
        let client = StoppingClient { stop: stop.clone() };

        let result = Pipeline::new(&config, Some(&client), stop.clone()).run();

        assert!(stop.is_stopped());
        assert!(matches!(result, Err(AssessError::Stopped)));
        assert!(!config.output_dir.exists());
    }
}
