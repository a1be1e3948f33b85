use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use which::which;

use super::OutputError;

/// Supported HTML to PDF converters, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    WeasyPrint,
    Wkhtmltopdf,
}

impl Converter {
    const ALL: [Converter; 2] = [Converter::WeasyPrint, Converter::Wkhtmltopdf];

    pub fn binary(&self) -> &'static str {
        match self {
            Converter::WeasyPrint => "weasyprint",
            Converter::Wkhtmltopdf => "wkhtmltopdf",
        }
    }

    fn args<'a>(&self, html: &'a Path, pdf: &'a Path) -> Vec<&'a std::ffi::OsStr> {
        let mut args: Vec<&std::ffi::OsStr> = Vec::new();
        if *self == Converter::Wkhtmltopdf {
            args.push("--quiet".as_ref());
        }
        args.push(html.as_os_str());
        args.push(pdf.as_os_str());
        args
    }
}

/// Converts the HTML report to PDF with an external converter found on PATH.
pub struct PdfRenderer {
    converter: Converter,
    path: PathBuf,
}

impl PdfRenderer {
    /// Locates the first available converter, if any.
    pub fn locate() -> Option<Self> {
        Converter::ALL.into_iter().find_map(|converter| {
            which(converter.binary()).ok().map(|path| {
                debug!("Found {} at: {:?}", converter.binary(), path);
                Self { converter, path }
            })
        })
    }

    pub fn render(&self, html: &Path, pdf: &Path) -> Result<(), OutputError> {
        let output = Command::new(&self.path)
            .args(self.converter.args(html, pdf))
            .output()
            .map_err(|e| {
                OutputError::Pdf(format!(
                    "Failed to execute {}: {}",
                    self.converter.binary(),
                    e
                ))
            })?;

        if output.status.success() {
            debug!("{} wrote {}", self.converter.binary(), pdf.display());
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let error_message = if !stderr.is_empty() { stderr } else { stdout };
            Err(OutputError::Pdf(format!(
                "{} failed: {}",
                self.converter.binary(),
                error_message.trim()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weasyprint_is_preferred() {
        assert_eq!(Converter::ALL[0], Converter::WeasyPrint);
    }

    #[test]
    fn wkhtmltopdf_runs_quietly() {
        let args = Converter::Wkhtmltopdf.args(Path::new("in.html"), Path::new("out.pdf"));
        assert_eq!(args, ["--quiet", "in.html", "out.pdf"]);

        let args = Converter::WeasyPrint.args(Path::new("in.html"), Path::new("out.pdf"));
        assert_eq!(args, ["in.html", "out.pdf"]);
    }
}
