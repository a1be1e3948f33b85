//! Bounded-window attribute lookup.
//!
//! Terraform exports are not parsed into a syntax tree. Instead, attribute
//! values are recovered by looking at a fixed number of lines following a
//! declaration, which tolerates malformed files at the cost of missing
//! attributes that sit further down a block.

/// Window used when a call site does not ask for a specific size.
pub const DEFAULT_WINDOW: usize = 10;

/// Looks up `key = "value"` within `lines[start..start + window]`.
///
/// The first line containing both `key` and `=` whose text matches
/// `key <ws>* = <ws>* "<value>"` supplies the result. Lines past the window
/// are never inspected, even if the key appears there.
pub fn extract_value(lines: &[&str], start: usize, key: &str, window: usize) -> Option<String> {
    let end = start.saturating_add(window).min(lines.len());
    if start >= end {
        return None;
    }

    lines[start..end]
        .iter()
        .filter(|line| line.contains(key) && line.contains('='))
        .find_map(|line| assignment(line, key))
}

/// Returns true for values that are Terraform interpolations rather than literals.
pub fn is_interpolated(value: &str) -> bool {
    value.starts_with("${")
}

/// Finds the leftmost `key = "..."` assignment on a single line.
pub fn assignment(line: &str, key: &str) -> Option<String> {
    line.match_indices(key)
        .find_map(|(idx, _)| value_after_key(&line[idx + key.len()..]))
}

fn value_after_key(rest: &str) -> Option<String> {
    let rest = rest.trim_start().strip_prefix('=')?;
    let rest = rest.trim_start().strip_prefix('"')?;
    let end = rest.find('"')?;
    if end == 0 {
        return None;
    }
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn finds_value_within_window() {
        let text = r#"resource "databricks_cluster" "this" {
  cluster_name  = "prod-etl"
  node_type_id = "i3.xlarge"
}"#;
        let lines = lines(text);

        assert_eq!(
            extract_value(&lines, 1, "cluster_name", 10),
            Some("prod-etl".to_string())
        );
        assert_eq!(
            extract_value(&lines, 1, "node_type_id", 10),
            Some("i3.xlarge".to_string())
        );
    }

    #[test]
    fn stops_at_window_bound() {
        let mut text = String::from("resource \"databricks_catalog\" \"c\" {\n");
        for _ in 0..10 {
            text.push_str("  comment = \"filler\"\n");
        }
        text.push_str("  name = \"late\"\n}\n");
        let lines = lines(&text);

        assert_eq!(extract_value(&lines, 1, "name", 10), None);
        assert_eq!(
            extract_value(&lines, 1, "name", 11),
            Some("late".to_string())
        );
    }

    #[test]
    fn skips_candidate_lines_that_do_not_match() {
        let lines = lines("  name = var.name\n  name = \"literal\"");
        assert_eq!(
            extract_value(&lines, 0, "name", DEFAULT_WINDOW),
            Some("literal".to_string())
        );
    }

    #[test]
    fn key_match_is_substring_based() {
        // `name` also matches inside `catalog_name`.
        let lines = lines("  catalog_name = \"main\"\n  name = \"bronze\"");
        assert_eq!(
            extract_value(&lines, 0, "name", DEFAULT_WINDOW),
            Some("main".to_string())
        );
    }

    #[test]
    fn empty_quotes_are_not_a_value() {
        let lines = lines("  name = \"\"");
        assert_eq!(extract_value(&lines, 0, "name", DEFAULT_WINDOW), None);
    }

    #[test]
    fn start_past_end_is_absent() {
        let lines = lines("name = \"x\"");
        assert_eq!(extract_value(&lines, 5, "name", DEFAULT_WINDOW), None);
    }

    #[test]
    fn detects_interpolation() {
        assert!(is_interpolated("${var.notebook_path}"));
        assert!(!is_interpolated("/Shared/etl"));
    }
}
