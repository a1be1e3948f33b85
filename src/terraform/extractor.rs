use super::model::{Category, ResourceInventory, ResourceKind, ResourceStats};
use super::rules::{
    Classify, CountOnly, Forms, Rule, Sample, Transform, COUNT_ONLY, JOB_SAMPLE_CAP, JOB_TASK_KINDS,
    JOB_TYPES, JOB_WINDOW, LINE_RULES,
};
use super::value::{assignment, extract_value, is_interpolated};

/// A rule together with its precomputed declaration markers.
struct CompiledRule<R: 'static> {
    rule: &'static R,
    markers: Vec<String>,
}

impl<R: 'static> CompiledRule<R> {
    fn declares(&self, line: &str) -> bool {
        self.markers.iter().any(|m| line.contains(m.as_str()))
    }
}

fn markers(types: &[&str], forms: Forms) -> Vec<String> {
    types
        .iter()
        .flat_map(|t| forms.block_types().iter().map(move |bt| bt.marker(t)))
        .collect()
}

/// Applies the rule tables to the text of one Terraform file.
///
/// Extraction only ever adds to `ResourceStats` and `ResourceInventory`, so
/// calling it for several files in sequence accumulates a workspace-wide view.
pub struct ResourceExtractor {
    line_rules: Vec<CompiledRule<Rule>>,
    count_only: Vec<CompiledRule<CountOnly>>,
    job_markers: Vec<String>,
}

impl Default for ResourceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceExtractor {
    pub fn new() -> Self {
        let line_rules = LINE_RULES
            .iter()
            .map(|rule| CompiledRule {
                rule,
                markers: markers(rule.types, rule.forms),
            })
            .collect();

        let count_only = COUNT_ONLY
            .iter()
            .map(|rule| CompiledRule {
                rule,
                markers: markers(rule.types, rule.forms),
            })
            .collect();

        Self {
            line_rules,
            count_only,
            job_markers: markers(JOB_TYPES, Forms::ResourceAndData),
        }
    }

    /// Runs every rule over one file. `lines` must be `content` split on newlines.
    pub fn extract(
        &self,
        lines: &[&str],
        content: &str,
        stats: &mut ResourceStats,
        inventory: &mut ResourceInventory,
    ) {
        for compiled in &self.line_rules {
            Self::apply_rule(compiled, lines, stats, inventory);
        }
        self.scan_jobs(lines, stats, inventory);
        self.sweep_counts(content, stats);
    }

    fn apply_rule(
        compiled: &CompiledRule<Rule>,
        lines: &[&str],
        stats: &mut ResourceStats,
        inventory: &mut ResourceInventory,
    ) {
        let rule = compiled.rule;

        for (i, line) in lines.iter().enumerate() {
            if !compiled.declares(line) || rule.exclude.iter().any(|e| line.contains(e)) {
                continue;
            }

            stats.increment(rule.kind);

            if let Some(sample) = &rule.sample {
                if let Some(name) = sample_name(lines, i + 1, sample) {
                    inventory.push_sample(rule.kind, name, sample.cap, sample.dedup);
                }
            }

            if let Some(classify) = &rule.classify {
                if let Some(label) = classify_label(lines, i + 1, classify) {
                    inventory.record(classify.category, &label);
                }
            }
        }
    }

    /// Jobs sample their first non-task `name` and tally every task kind
    /// mentioned in the lines following the declaration.
    fn scan_jobs(&self, lines: &[&str], stats: &mut ResourceStats, inventory: &mut ResourceInventory) {
        for (i, line) in lines.iter().enumerate() {
            if !self.job_markers.iter().any(|m| line.contains(m.as_str())) {
                continue;
            }

            stats.increment(ResourceKind::Jobs);

            let start = i + 1;
            let end = start.saturating_add(JOB_WINDOW).min(lines.len());
            let mut named = false;

            for body_line in &lines[start.min(end)..end] {
                if !named
                    && body_line.contains("name")
                    && body_line.contains('=')
                    && !body_line.contains("task")
                {
                    if let Some(name) = assignment(body_line, "name") {
                        named = true;
                        if !is_interpolated(&name) {
                            inventory.push_sample(ResourceKind::Jobs, name, JOB_SAMPLE_CAP, false);
                        }
                    }
                }

                for (task_key, label) in JOB_TASK_KINDS {
                    if body_line.contains(task_key) {
                        inventory.record(Category::JobTaskTypes, label);
                    }
                }
            }
        }
    }

    fn sweep_counts(&self, content: &str, stats: &mut ResourceStats) {
        for compiled in &self.count_only {
            let count: usize = compiled
                .markers
                .iter()
                .map(|m| content.matches(m.as_str()).count())
                .sum();
            stats.add(compiled.rule.kind, count);
        }
    }
}

/// Recovers the display name for a declaration, qualified by its parents
/// (e.g. `catalog.schema.table`) when every parent is present.
fn sample_name(lines: &[&str], start: usize, sample: &Sample) -> Option<String> {
    let name = extract_value(lines, start, sample.key, sample.window)?;
    if is_interpolated(&name) {
        return None;
    }

    let parents: Option<Vec<String>> = sample
        .parents
        .iter()
        .map(|key| extract_value(lines, start, key, sample.window).filter(|v| !is_interpolated(v)))
        .collect();

    match parents {
        Some(mut parts) if !parts.is_empty() => {
            parts.push(name);
            Some(parts.join("."))
        }
        _ => Some(name),
    }
}

fn classify_label(lines: &[&str], start: usize, classify: &Classify) -> Option<String> {
    let value = extract_value(lines, start, classify.key, classify.window)?;

    match classify.transform {
        Transform::AsIs => Some(value),
        Transform::Uppercase => Some(value.to_uppercase()),
        Transform::Extension => {
            if is_interpolated(&value) {
                return None;
            }
            value.rsplit_once('.').map(|(_, ext)| ext.to_string())
        }
    }
}
