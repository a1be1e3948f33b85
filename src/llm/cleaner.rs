//! Normalizes model replies into plain Markdown.
//!
//! Models occasionally answer with HTML tables or wrap the text in a JSON
//! envelope (reasoning summaries, typed text parts). Both are unwrapped here
//! before the reply is embedded into the report.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Extracted JSON text shorter than this is treated as noise.
const MIN_EXTRACTED_LEN: usize = 50;

static TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table[^>]*>(.*?)</table>").expect("valid regex"));
static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("valid regex"));
static CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<t[hd][^>]*>(.*?)</t[hd]>").expect("valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static REASONING_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*\{'type':\s*'reasoning',\s*'summary':\s*\[.*?\]\}\s*").expect("valid regex")
});
static REASONING_DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^\s*\{"type":\s*"reasoning",\s*"summary":\s*\[.*?\]\}\s*"#).expect("valid regex")
});
static TEXT_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{\s*['"]type['"]:\s*['"]text['"],\s*['"]text['"]:\s*['"](.+?)['"]\}"#)
        .expect("valid regex")
});
static UNICODE_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("valid regex"));

/// Cleans one model reply: HTML first, then any JSON envelope.
pub fn clean_response(content: &str) -> String {
    let content = html_to_markdown(content);

    let trimmed = content.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return content;
    }

    if let Some(text) = unwrap_json(trimmed) {
        return text;
    }

    regex_cleanup(&content)
}

/// Converts `<table>` markup into Markdown tables and drops all other tags.
pub fn html_to_markdown(content: &str) -> String {
    let lower = content.to_lowercase();
    let mut result = content.to_string();

    if lower.contains("<table") || lower.contains("<th") || lower.contains("<td") {
        for table in TABLE.captures_iter(content) {
            let rows = markdown_rows(&table[1]);
            if !rows.is_empty() {
                result = result.replace(&table[0], &format!("\n{}\n", rows.join("\n")));
            }
        }
    }

    TAG.replace_all(&result, "").into_owned()
}

fn markdown_rows(table_html: &str) -> Vec<String> {
    let mut rows = Vec::new();

    for row in ROW.captures_iter(table_html) {
        let cells: Vec<String> = CELL
            .captures_iter(&row[1])
            .map(|cell| TAG.replace_all(cell[1].trim(), "").into_owned())
            .collect();

        if cells.is_empty() {
            continue;
        }

        let header = rows.is_empty();
        rows.push(format!("| {} |", cells.join(" | ")));
        if header {
            rows.push(format!("|{}", "---|".repeat(cells.len())));
        }
    }

    rows
}

fn unwrap_json(content: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(content).ok()?;

    if let Some(object) = parsed.as_object() {
        match object.get("type").and_then(Value::as_str) {
            Some("reasoning") => {
                let texts: Vec<&str> = object
                    .get("summary")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|item| item.get("text").and_then(Value::as_str))
                            .collect()
                    })
                    .unwrap_or_default();
                if !texts.is_empty() {
                    return Some(texts.join("\n\n"));
                }
            }
            Some("text") => {
                if let Some(text) = object.get("text").and_then(Value::as_str) {
                    return Some(text.to_string());
                }
            }
            _ => {}
        }
    }

    extract_text(&parsed).filter(|text| text.len() > MIN_EXTRACTED_LEN)
}

fn extract_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(object) => {
            for key in ["text", "content", "markdown", "summary_text"] {
                if let Some(text) = object.get(key).and_then(extract_text) {
                    if text.len() > MIN_EXTRACTED_LEN {
                        return Some(text);
                    }
                }
            }

            object
                .get("summary")
                .and_then(Value::as_array)
                .and_then(|items| join_texts(items))
        }
        Value::Array(items) => join_texts(items),
        _ => None,
    }
}

fn join_texts(items: &[Value]) -> Option<String> {
    let texts: Vec<String> = items
        .iter()
        .filter_map(extract_text)
        .filter(|t| !t.is_empty())
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n\n"))
    }
}

/// Last resort for envelopes that are not valid JSON (e.g. single quotes).
fn regex_cleanup(content: &str) -> String {
    let cleaned = REASONING_SINGLE.replace(content, "");
    let cleaned = REASONING_DOUBLE.replace(&cleaned, "");
    let cleaned = TEXT_PART.replace_all(&cleaned, "$1");

    let cleaned = cleaned
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\u202f", "")
        .replace("\\u00a0", " ");

    UNICODE_ESCAPE.replace_all(&cleaned, "").into_owned()
}
