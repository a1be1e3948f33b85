//! Writing the assessment artifacts.
//!
//! The Markdown report is the primary artifact. HTML is derived from it,
//! PDF is derived from the HTML when a converter is installed, and the raw
//! scan results are kept next to them as JSON.

pub mod html;
pub mod pdf;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::terraform::ScanReport;
use pdf::PdfRenderer;

pub const REPORT_BASENAME: &str = "Databricks_Assessment_Report";
pub const INVENTORY_FILENAME: &str = "inventory.json";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot serialize inventory: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Paths of the artifacts produced by one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WrittenFiles {
    pub markdown: PathBuf,
    pub html: PathBuf,
    pub pdf: Option<PathBuf>,
    pub inventory: PathBuf,
}

pub struct OutputWriter {
    output_dir: PathBuf,
    skip_pdf: bool,
    no_color: bool,
}

impl OutputWriter {
    pub fn new(output_dir: PathBuf, skip_pdf: bool, no_color: bool) -> Self {
        Self {
            output_dir,
            skip_pdf,
            no_color,
        }
    }

    /// Writes the Markdown, HTML, PDF (best effort) and JSON artifacts.
    pub fn write(
        &self,
        markdown: &str,
        title: &str,
        scan: &ScanReport,
    ) -> Result<WrittenFiles, OutputError> {
        fs::create_dir_all(&self.output_dir)?;

        let markdown_path = self.output_dir.join(format!("{}.md", REPORT_BASENAME));
        fs::write(&markdown_path, markdown)?;
        info!("Written: {}", markdown_path.display());

        let html_path = self.output_dir.join(format!("{}.html", REPORT_BASENAME));
        fs::write(&html_path, html::render_html(markdown, title))?;
        info!("Written: {}", html_path.display());

        let pdf_path = if self.skip_pdf {
            None
        } else {
            self.write_pdf(&html_path)
        };

        let inventory_path = self.output_dir.join(INVENTORY_FILENAME);
        fs::write(&inventory_path, serde_json::to_string_pretty(scan)?)?;
        info!("Written: {}", inventory_path.display());

        Ok(WrittenFiles {
            markdown: markdown_path,
            html: html_path,
            pdf: pdf_path,
            inventory: inventory_path,
        })
    }

    /// PDF failures never fail the run.
    fn write_pdf(&self, html_path: &Path) -> Option<PathBuf> {
        let Some(renderer) = PdfRenderer::locate() else {
            warn!("No HTML to PDF converter found (install weasyprint or wkhtmltopdf), skipping PDF");
            return None;
        };

        let pdf_path = self.output_dir.join(format!("{}.pdf", REPORT_BASENAME));
        match renderer.render(html_path, &pdf_path) {
            Ok(()) => {
                info!("Written: {}", pdf_path.display());
                Some(pdf_path)
            }
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    /// Prints the list of generated files to stdout.
    pub fn write_summary(&self, files: &WrittenFiles) -> Result<(), OutputError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        let header = "----------- Generated files -----------";
        if self.no_color {
            writeln!(handle, "{}", header)?;
        } else {
            writeln!(handle, "{}", header.cyan().bold())?;
        }

        let mut paths = vec![&files.markdown, &files.html];
        if let Some(pdf) = &files.pdf {
            paths.push(pdf);
        }
        paths.push(&files.inventory);

        for path in paths {
            writeln!(handle, "  {}", path.display())?;
        }

        Ok(())
    }
}
