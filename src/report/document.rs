use chrono::Local;
use log::info;

use crate::llm::{CompletionClient, LlmError};

const SUMMARY_MAX_TOKENS: u32 = 10000;
const DETAILED_MAX_TOKENS: u32 = 30000;

pub const DEFAULT_TITLE: &str = "Databricks Assessment Report";

const SUMMARY_SYSTEM: &str = "You are a technical consultant. Write in pure MARKDOWN format. \
NO HTML tags allowed. Return only markdown text.";

const DETAILED_SYSTEM: &str = "You are a Databricks expert writing a technical report. \
CRITICAL: Write ONLY in pure MARKDOWN format. \
For tables, use ONLY this format: | col1 | col2 | with |---|---| separator. \
NEVER use HTML tags like <table>, <tr>, <td>, <th>. \
Return pure markdown text without any HTML tags.";

const SUMMARY_PROMPT: &str = "Write an executive summary of this Databricks workspace \
for technical leadership. Highlight its scale, the main workloads, the governance \
posture (Unity Catalog adoption, secrets, permissions) and the most important risks \
and recommendations.\n\nWorkspace inventory:\n{inventory}";

const DETAILED_PROMPT: &str = "Write a detailed technical analysis of this Databricks \
workspace. Cover identity and access, compute, SQL analytics, machine learning, \
secrets and security, workspace assets and Unity Catalog. For each area describe the \
current state, notable findings and concrete recommendations. Finish with a \
prioritized action plan.\n\nWorkspace inventory:\n{inventory}";

const MODEL_SKIPPED: &str = "_Language model analysis was skipped for this run._";

/// Assembles the final Markdown report around the rendered inventory.
///
/// The document has a fixed layout: title and generation time, the model's
/// executive summary, the inventory and the model's detailed analysis. Without
/// a client both model sections carry a short notice instead.
pub struct ReportBuilder<'a> {
    title: String,
    client: Option<&'a dyn CompletionClient>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(title: impl Into<String>, client: Option<&'a dyn CompletionClient>) -> Self {
        Self {
            title: title.into(),
            client,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn build(&self, inventory: &str) -> Result<String, LlmError> {
        let summary = self.summary(inventory)?;
        let detailed = self.detailed(inventory)?;

        let mut parts = vec![
            format!("# {}\n\n", self.title),
            format!(
                "*Generated on {}*\n\n",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
            "---\n\n".to_string(),
        ];

        parts.push("## EXECUTIVE SUMMARY\n\n".to_string());
        parts.push(summary);
        parts.push("\n\n---\n\n".to_string());

        parts.push("## INFRASTRUCTURE INVENTORY\n\n".to_string());
        parts.push(inventory.to_string());
        parts.push("\n\n---\n\n".to_string());

        parts.push("# DETAILED ANALYSIS\n\n".to_string());
        parts.push(detailed);
        parts.push("\n\n---\n\n".to_string());

        Ok(parts.concat())
    }

    fn summary(&self, inventory: &str) -> Result<String, LlmError> {
        match self.client {
            Some(client) => {
                info!("Generating executive summary with {}", client.model_name());
                client.complete(
                    SUMMARY_SYSTEM,
                    &SUMMARY_PROMPT.replace("{inventory}", inventory),
                    SUMMARY_MAX_TOKENS,
                )
            }
            None => Ok(MODEL_SKIPPED.to_string()),
        }
    }

    fn detailed(&self, inventory: &str) -> Result<String, LlmError> {
        match self.client {
            Some(client) => {
                info!("Generating detailed analysis with {}", client.model_name());
                client.complete(
                    DETAILED_SYSTEM,
                    &DETAILED_PROMPT.replace("{inventory}", inventory),
                    DETAILED_MAX_TOKENS,
                )
            }
            None => Ok(MODEL_SKIPPED.to_string()),
        }
    }
}
