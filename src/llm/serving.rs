use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::{json, Value};
use ureq::Agent;

use super::{cleaner, CompletionClient, LlmError};

const HTTP_TIMEOUT_SECONDS: u64 = 120;
const LARGE_CONTEXT_MAX_TOKENS: u32 = 32000;
const DEFAULT_MAX_TOKENS: u32 = 8192;
const TEMPERATURE: f64 = 0.7;
const UNKNOWN_MODEL: &str = "unknown";

/// Connection settings for a Databricks model serving endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ServingSettings {
    pub host: String,
    pub token: String,
    pub endpoint: String,
}

impl fmt::Debug for ServingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServingSettings")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ServingSettings {
    /// Full invocation URL. A host without scheme is treated as https.
    pub fn url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let endpoint = if self.endpoint.starts_with('/') {
            self.endpoint.clone()
        } else {
            format!("/{}", self.endpoint)
        };

        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}{}", host, endpoint)
        } else {
            format!("https://{}{}", host, endpoint)
        }
    }
}

/// Chat-completion client for a serving endpoint. One attempt per call.
pub struct ServingEndpointClient {
    agent: Agent,
    url: String,
    token: String,
    model_name: String,
}

impl ServingEndpointClient {
    pub fn new(settings: &ServingSettings) -> Self {
        let model_name = match model_name_from_endpoint(&settings.endpoint) {
            Some(name) => name.to_string(),
            None => {
                warn!(
                    "Cannot derive model name from endpoint '{}', token limits fall back to defaults",
                    settings.endpoint
                );
                UNKNOWN_MODEL.to_string()
            }
        };

        let agent = Agent::config_builder()
            .timeout_per_call(Some(Duration::from_secs(HTTP_TIMEOUT_SECONDS)))
            .http_status_as_error(false)
            .user_agent(format!("dbassess/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .new_agent();

        let url = settings.url();
        debug!("Serving endpoint {} (model {})", url, model_name);

        Self {
            agent,
            url,
            token: settings.token.clone(),
            model_name,
        }
    }

    fn payload(&self, system: &str, user: &str, max_tokens: u32) -> Value {
        let mut payload = json!({
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "max_tokens": clamp_max_tokens(&self.model_name, max_tokens),
        });

        if supports_temperature(&self.model_name) {
            payload["temperature"] = json!(TEMPERATURE);
        }

        payload
    }
}

impl CompletionClient for ServingEndpointClient {
    fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String, LlmError> {
        let payload = self.payload(system, user, max_tokens);
        info!(
            "Calling model {} (max_tokens: {})",
            self.model_name, payload["max_tokens"]
        );

        let body = serde_json::to_string(&payload).map_err(|e| LlmError::Decode(e.to_string()))?;

        let mut response = self
            .agent
            .post(&self.url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(|e| LlmError::Http {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(LlmError::Status {
                status,
                body: text.chars().take(500).collect(),
            });
        }

        let content = message_content(&text)?;
        Ok(cleaner::clean_response(&content))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Extracts the endpoint name from `/serving-endpoints/<name>/invocations`.
pub fn model_name_from_endpoint(endpoint: &str) -> Option<&str> {
    if !endpoint.contains("/serving-endpoints/") {
        return None;
    }

    endpoint.rsplit('/').nth(1).filter(|name| !name.is_empty())
}

pub fn clamp_max_tokens(model_name: &str, requested: u32) -> u32 {
    let model = model_name.to_lowercase();
    let limit = if model.contains("gpt-5") || model.contains("gemini") {
        LARGE_CONTEXT_MAX_TOKENS
    } else {
        DEFAULT_MAX_TOKENS
    };
    requested.min(limit)
}

/// gpt-5 endpoints reject a custom temperature.
pub fn supports_temperature(model_name: &str) -> bool {
    !model_name.to_lowercase().contains("gpt-5")
}

/// Reads `choices[0].message.content`, flattening list and object contents.
fn message_content(body: &str) -> Result<String, LlmError> {
    let value: Value = serde_json::from_str(body).map_err(|e| LlmError::Decode(e.to_string()))?;

    let content = value
        .pointer("/choices/0/message/content")
        .ok_or(LlmError::MissingContent)?;

    let text = match content {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => match map
            .get("text")
            .or_else(|| map.get("content"))
            .and_then(Value::as_str)
        {
            Some(s) => s.to_string(),
            None => content.to_string(),
        },
        Value::Null => return Err(LlmError::MissingContent),
        other => other.to_string(),
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(endpoint: &str) -> ServingSettings {
        ServingSettings {
            host: "https://adb-123.azuredatabricks.net/".to_string(),
            token: "dapi-secret".to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    #[test]
    fn model_name_is_segment_before_invocations() {
        assert_eq!(
            model_name_from_endpoint("/serving-endpoints/databricks-gpt-5/invocations"),
            Some("databricks-gpt-5")
        );
        assert_eq!(model_name_from_endpoint("/api/2.0/chat"), None);
    }

    #[test]
    fn max_tokens_clamped_per_model_family() {
        assert_eq!(clamp_max_tokens("databricks-gpt-5", 30000), 30000);
        assert_eq!(clamp_max_tokens("databricks-gemini-2-5-pro", 40000), 32000);
        assert_eq!(clamp_max_tokens("databricks-claude-sonnet", 30000), 8192);
        assert_eq!(clamp_max_tokens("unknown", 1000), 1000);
    }

    #[test]
    fn temperature_omitted_for_gpt5() {
        let gpt5 = ServingEndpointClient::new(&settings(
            "/serving-endpoints/databricks-GPT-5/invocations",
        ));
        let payload = gpt5.payload("sys", "user", 10000);
        assert!(payload.get("temperature").is_none());
        assert_eq!(payload["max_tokens"], 10000);

        let llama = ServingEndpointClient::new(&settings(
            "/serving-endpoints/databricks-llama-4/invocations",
        ));
        let payload = llama.payload("sys", "user", 10000);
        assert_eq!(payload["temperature"], 0.7);
        assert_eq!(payload["max_tokens"], 8192);
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["content"], "user");
    }

    #[test]
    fn url_joins_host_and_endpoint() {
        assert_eq!(
            settings("/serving-endpoints/m/invocations").url(),
            "https://adb-123.azuredatabricks.net/serving-endpoints/m/invocations"
        );

        let bare = ServingSettings {
            host: "adb-1.cloud.databricks.com".to_string(),
            token: String::new(),
            endpoint: "serving-endpoints/m/invocations".to_string(),
        };
        assert_eq!(
            bare.url(),
            "https://adb-1.cloud.databricks.com/serving-endpoints/m/invocations"
        );
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", settings("/x"));
        assert!(!rendered.contains("dapi-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn message_content_accepts_string_list_and_object() {
        let string = r##"{"choices":[{"message":{"content":"# Report"}}]}"##;
        assert_eq!(message_content(string).unwrap(), "# Report");

        let list = r#"{"choices":[{"message":{"content":["one","two"]}}]}"#;
        assert_eq!(message_content(list).unwrap(), "one\ntwo");

        let object = r#"{"choices":[{"message":{"content":{"text":"body"}}}]}"#;
        assert_eq!(message_content(object).unwrap(), "body");
    }

    #[test]
    fn message_content_missing_is_error() {
        assert!(matches!(
            message_content(r#"{"choices":[]}"#),
            Err(LlmError::MissingContent)
        ));
        assert!(matches!(
            message_content("not json"),
            Err(LlmError::Decode(_))
        ));
    }
}
