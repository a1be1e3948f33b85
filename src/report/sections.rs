//! Markdown sections describing a scanned workspace.
//!
//! Every section returns its lines in order. Blocks for a resource kind are
//! only emitted when that kind was counted at least once; the few headline
//! counts (users, groups, clusters and the executive summary) are always shown.

use crate::terraform::{Category, ResourceInventory, ResourceKind, ResourceStats, ScanReport, ScannedFile, Tally};

use super::labels::Labels;

/// Samples shown for kinds rendered as "first N of M".
const SAMPLE_LIMIT: usize = 10;

pub fn identity(stats: &ResourceStats, inventory: &ResourceInventory, labels: &Labels) -> Vec<String> {
    let mut lines = vec![format!("\n## 1. {}\n", labels.section_identity)];

    lines.push(format!(
        "### {}: {} {} total",
        labels.users_title,
        stats.get(ResourceKind::Users),
        labels.users_title.to_lowercase()
    ));

    let domains = email_domains(inventory.samples(ResourceKind::Users));
    tally_table(&mut lines, labels.distribution_by_domain, labels.domain, labels.quantity, &domains, None, "");

    if stats.get(ResourceKind::ServicePrincipals) > 0 {
        lines.push(format!(
            "\n### {}: {}",
            labels.service_principals_title,
            stats.get(ResourceKind::ServicePrincipals)
        ));
        sample_block(
            &mut lines,
            labels,
            labels.service_principals_title,
            inventory.samples(ResourceKind::ServicePrincipals),
        );
    }

    lines.push(format!(
        "\n### {}: {} {}",
        labels.groups_title,
        stats.get(ResourceKind::Groups),
        labels.groups_title.to_lowercase()
    ));

    if stats.get(ResourceKind::GroupMembers) > 0 {
        lines.push(format!(
            "\n### Group memberships: {} memberships",
            stats.get(ResourceKind::GroupMembers)
        ));
    }

    if stats.get(ResourceKind::Permissions) > 0 {
        lines.push(format!(
            "\n### {}: {} access control lists",
            labels.permissions_title,
            stats.get(ResourceKind::Permissions)
        ));
    }

    lines
}

pub fn compute(stats: &ResourceStats, inventory: &ResourceInventory, labels: &Labels) -> Vec<String> {
    let mut lines = vec![format!("\n## 2. {}\n", labels.section_compute)];

    lines.push(format!(
        "### {}: {} clusters configured",
        labels.clusters_title,
        stats.get(ResourceKind::Clusters)
    ));
    tally_table(
        &mut lines,
        labels.node_types_title,
        labels.node_type,
        labels.quantity,
        inventory.tally(Category::ClusterNodeTypes),
        None,
        "",
    );

    if stats.get(ResourceKind::InstancePools) > 0 {
        lines.push(format!(
            "\n### {}: {} pools",
            labels.instance_pools_title,
            stats.get(ResourceKind::InstancePools)
        ));
    }

    if stats.get(ResourceKind::Jobs) > 0 {
        lines.push(format!(
            "\n### {}: {} jobs",
            labels.jobs_title,
            stats.get(ResourceKind::Jobs)
        ));
        tally_table(
            &mut lines,
            labels.job_types_title,
            "Task",
            labels.quantity,
            inventory.tally(Category::JobTaskTypes),
            None,
            "",
        );
        sample_block(&mut lines, labels, labels.jobs_title, inventory.samples(ResourceKind::Jobs));
    }

    if stats.get(ResourceKind::Notebooks) > 0 {
        lines.push(format!(
            "\n### {}: {} notebooks",
            labels.notebooks_title,
            stats.get(ResourceKind::Notebooks)
        ));
        tally_table(
            &mut lines,
            labels.languages_title,
            "Language",
            labels.quantity,
            inventory.tally(Category::NotebookLanguages),
            None,
            "",
        );
    }

    lines
}

pub fn sql_analytics(stats: &ResourceStats, inventory: &ResourceInventory, labels: &Labels) -> Vec<String> {
    let mut lines = vec![format!("\n## 3. {}\n", labels.section_sql)];

    if stats.get(ResourceKind::Queries) > 0 {
        lines.push(format!("### SQL Queries: {} queries", stats.get(ResourceKind::Queries)));
        sample_block(&mut lines, labels, "Queries", inventory.samples(ResourceKind::Queries));
    }

    if stats.get(ResourceKind::Dashboards) > 0 {
        lines.push(format!("\n### Dashboards: {} dashboards", stats.get(ResourceKind::Dashboards)));
        sample_block(&mut lines, labels, "Dashboards", inventory.samples(ResourceKind::Dashboards));
    }

    if stats.get(ResourceKind::Alerts) > 0 {
        lines.push(format!("\n### Alerts: {} alerts configured", stats.get(ResourceKind::Alerts)));
        sample_block(&mut lines, labels, "Alerts", inventory.samples(ResourceKind::Alerts));
    }

    if stats.get(ResourceKind::SqlEndpoints) > 0 {
        lines.push(format!(
            "\n### SQL Warehouses: {} endpoints",
            stats.get(ResourceKind::SqlEndpoints)
        ));
    }

    if stats.get(ResourceKind::SqlGlobalConfig) > 0 {
        lines.push(format!(
            "\n### SQL Global Config: {} global configurations",
            stats.get(ResourceKind::SqlGlobalConfig)
        ));
    }

    lines
}

pub fn machine_learning(stats: &ResourceStats, inventory: &ResourceInventory, labels: &Labels) -> Vec<String> {
    let mut lines = vec![format!("\n## 4. {}\n", labels.section_ml)];

    if stats.get(ResourceKind::RegisteredModels) > 0 {
        lines.push(format!(
            "### Registered Models: {} models",
            stats.get(ResourceKind::RegisteredModels)
        ));
        sample_block(&mut lines, labels, "Models", inventory.samples(ResourceKind::RegisteredModels));
    }

    if stats.get(ResourceKind::ModelServingEndpoints) > 0 {
        lines.push(format!(
            "\n### Model Serving: {} endpoints",
            stats.get(ResourceKind::ModelServingEndpoints)
        ));
        bullet_list(&mut lines, inventory.samples(ResourceKind::ModelServingEndpoints), None);
    }

    if stats.get(ResourceKind::VectorSearchIndexes) > 0 {
        lines.push(format!(
            "\n### Vector Search Indexes: {} indexes",
            stats.get(ResourceKind::VectorSearchIndexes)
        ));
        bullet_list(
            &mut lines,
            inventory.samples(ResourceKind::VectorSearchIndexes),
            Some(SAMPLE_LIMIT),
        );
    }

    if stats.get(ResourceKind::VectorSearchEndpoints) > 0 {
        lines.push(format!(
            "\n### Vector Search Endpoints: {} endpoints",
            stats.get(ResourceKind::VectorSearchEndpoints)
        ));
    }

    lines
}

pub fn secrets(stats: &ResourceStats, inventory: &ResourceInventory, labels: &Labels) -> Vec<String> {
    let mut lines = vec![format!("\n## 5. {}\n", labels.section_secrets)];

    if stats.get(ResourceKind::SecretScopes) > 0 {
        lines.push(format!(
            "### Secret Scopes: {} scopes",
            stats.get(ResourceKind::SecretScopes)
        ));
        full_list(&mut lines, labels, "scopes", inventory.samples(ResourceKind::SecretScopes));
    }

    if stats.get(ResourceKind::Secrets) > 0 {
        lines.push(format!(
            "\n### Secrets: {} secrets (not listed for security)",
            stats.get(ResourceKind::Secrets)
        ));
    }

    if stats.get(ResourceKind::SecretAcls) > 0 {
        lines.push(format!(
            "\n### Secret ACLs: {} secret ACLs",
            stats.get(ResourceKind::SecretAcls)
        ));
    }

    if stats.get(ResourceKind::ClusterPolicies) > 0 {
        lines.push(format!(
            "\n### Cluster Policies: {} policies",
            stats.get(ResourceKind::ClusterPolicies)
        ));
        full_list(&mut lines, labels, "policies", inventory.samples(ResourceKind::ClusterPolicies));
    }

    if stats.get(ResourceKind::Tokens) > 0 {
        lines.push(format!(
            "\n### Tokens: {} personal access tokens",
            stats.get(ResourceKind::Tokens)
        ));
    }

    if stats.get(ResourceKind::IpAccessLists) > 0 {
        lines.push(format!(
            "\n### IP Access Lists: {} lists",
            stats.get(ResourceKind::IpAccessLists)
        ));
    }

    lines
}

pub fn workspace(stats: &ResourceStats, inventory: &ResourceInventory, labels: &Labels) -> Vec<String> {
    let mut lines = vec![format!("\n## 6. {}\n", labels.section_workspace)];

    if stats.get(ResourceKind::WorkspaceFiles) > 0 {
        lines.push(format!(
            "### Workspace Files: {} files",
            stats.get(ResourceKind::WorkspaceFiles)
        ));
        tally_table(
            &mut lines,
            "File types",
            "Extension",
            labels.quantity,
            inventory.tally(Category::WorkspaceFileTypes),
            Some(SAMPLE_LIMIT),
            ".",
        );
    }

    let counted = [
        (ResourceKind::Directories, "Directories", "directories"),
        (ResourceKind::Repos, "Repos", "repositories"),
        (ResourceKind::NotificationDestinations, "Notification Destinations", "destinations"),
        (ResourceKind::WorkspaceBindings, "Workspace Bindings", "bindings (Unity Catalog)"),
        (ResourceKind::WorkspaceConf, "Workspace Configuration", "settings"),
        (ResourceKind::DbfsFiles, "DBFS Files", "files in DBFS"),
        (ResourceKind::Mounts, "Mounts", "DBFS mounts"),
    ];
    for (kind, title, unit) in counted {
        if stats.get(kind) > 0 {
            lines.push(format!("\n### {}: {} {}", title, stats.get(kind), unit));
        }
    }

    if stats.get(ResourceKind::GlobalInitScripts) > 0 {
        lines.push(format!(
            "\n### Global Init Scripts: {} scripts",
            stats.get(ResourceKind::GlobalInitScripts)
        ));
        full_list(&mut lines, labels, "scripts", inventory.samples(ResourceKind::GlobalInitScripts));
    }

    lines
}

pub fn unity_catalog(stats: &ResourceStats, inventory: &ResourceInventory, labels: &Labels) -> Vec<String> {
    let mut lines = vec![format!("\n## 7. {}\n", labels.section_unity_catalog)];

    if stats.get(ResourceKind::Catalogs) > 0 {
        lines.push(format!(
            "### {}: {} catalogs",
            labels.catalogs_title,
            stats.get(ResourceKind::Catalogs)
        ));
        full_list(&mut lines, labels, "catalogs", inventory.samples(ResourceKind::Catalogs));
    }

    if stats.get(ResourceKind::Schemas) > 0 {
        lines.push(format!(
            "\n### {}: {} schemas",
            labels.schemas_title,
            stats.get(ResourceKind::Schemas)
        ));
    }

    if stats.get(ResourceKind::Tables) > 0 {
        lines.push(format!(
            "\n### {}: {} managed tables",
            labels.tables_title,
            stats.get(ResourceKind::Tables)
        ));
        tally_table(
            &mut lines,
            labels.table_types_title,
            "Type",
            labels.quantity,
            inventory.tally(Category::TableTypes),
            None,
            "",
        );
    }

    if stats.get(ResourceKind::Volumes) > 0 {
        lines.push(format!(
            "\n### {}: {} volumes",
            labels.volumes_title,
            stats.get(ResourceKind::Volumes)
        ));
    }

    let counted = [
        (ResourceKind::ExternalLocations, "External Locations", "external locations"),
        (ResourceKind::StorageCredentials, "Storage Credentials", "storage credentials"),
        (ResourceKind::SystemSchemas, "System Schemas", "system schemas"),
        (ResourceKind::Recipients, "Recipients (Delta Sharing)", "recipients"),
        (ResourceKind::Shares, "Shares (Delta Sharing)", "shares"),
        (ResourceKind::Connections, "Connections", "foreign connections"),
        (ResourceKind::Grants, "Grants", "Unity Catalog grants"),
    ];
    for (kind, title, unit) in counted {
        if stats.get(kind) > 0 {
            lines.push(format!("\n### {}: {} {}", title, stats.get(kind), unit));
        }
    }

    lines
}

pub fn executive_summary(stats: &ResourceStats, files: &[ScannedFile], labels: &Labels) -> Vec<String> {
    let mut lines = vec![format!("\n## {}\n", labels.section_summary)];

    let total_bytes: u64 = files.iter().map(|f| f.size).sum();
    let total_kb = total_bytes as f64 / 1024.0;

    lines.push(format!("**{}:** {}", labels.total_resources, stats.total()));
    lines.push(format!("**{}:** {}", labels.config_files, files.len()));
    lines.push(format!("**{}:** {:.1} KB", labels.total_size, total_kb));

    lines.push(format!("\n**{}:**", labels.main_categories));
    for (title, kind) in [
        (labels.users_title, ResourceKind::Users),
        (labels.groups_title, ResourceKind::Groups),
        (labels.clusters_title, ResourceKind::Clusters),
        (labels.jobs_title, ResourceKind::Jobs),
        (labels.notebooks_title, ResourceKind::Notebooks),
    ] {
        lines.push(format!("  - **{}:** {}", title, stats.get(kind)));
    }

    if stats.get(ResourceKind::Catalogs) > 0 {
        lines.push(format!("\n**{}:**", labels.unity_catalog_governance));
        lines.push(format!("  - {}: {}", labels.catalogs_title, stats.get(ResourceKind::Catalogs)));
        lines.push(format!("  - {}: {}", labels.schemas_title, stats.get(ResourceKind::Schemas)));
        lines.push(format!("  - {}: {}", labels.tables_title, stats.get(ResourceKind::Tables)));
    }

    lines
}

/// Renders every section in report order, preceded by the intro line.
pub fn render_inventory(report: &ScanReport, labels: &Labels) -> String {
    let stats = &report.stats;
    let inventory = &report.inventory;

    let mut parts = vec![format!("*{}*\n", labels.intro(report.files.len()))];
    parts.extend(identity(stats, inventory, labels));
    parts.extend(compute(stats, inventory, labels));
    parts.extend(sql_analytics(stats, inventory, labels));
    parts.extend(machine_learning(stats, inventory, labels));
    parts.extend(secrets(stats, inventory, labels));
    parts.extend(workspace(stats, inventory, labels));
    parts.extend(unity_catalog(stats, inventory, labels));
    parts.extend(executive_summary(stats, &report.files, labels));

    parts.join("\n")
}

fn email_domains(users: &[String]) -> Tally {
    let mut domains = Tally::new();
    for user in users {
        if let Some(domain) = user.split('@').nth(1) {
            domains.increment(domain);
        }
    }
    domains
}

/// Two-column table sorted by descending count, optionally truncated.
fn tally_table(
    lines: &mut Vec<String>,
    heading: &str,
    column: &str,
    count_column: &str,
    tally: &Tally,
    limit: Option<usize>,
    label_prefix: &str,
) {
    if tally.is_empty() {
        return;
    }

    lines.push(format!("\n**{}:**\n", heading));
    lines.push(format!("| {} | {} |", column, count_column));
    lines.push("|---|---|".to_string());

    let rows = tally.sorted_desc();
    let limit = limit.unwrap_or(rows.len());
    for (label, count) in rows.into_iter().take(limit) {
        lines.push(format!("| {}{} | {} |", label_prefix, label, count));
    }
}

/// Lexicographically first `SAMPLE_LIMIT` samples under a "Sample of X (n/m)" caption.
fn sample_block(lines: &mut Vec<String>, labels: &Labels, what: &str, samples: &[String]) {
    if samples.is_empty() {
        return;
    }

    lines.push(format!(
        "\n**{} {} ({}/{}):**",
        labels.sample_of,
        what,
        samples.len().min(SAMPLE_LIMIT),
        samples.len()
    ));
    bullet_list(lines, samples, Some(SAMPLE_LIMIT));
}

/// Every sample, sorted, under a "Configured X" caption.
fn full_list(lines: &mut Vec<String>, labels: &Labels, what: &str, samples: &[String]) {
    if samples.is_empty() {
        return;
    }

    lines.push(format!("\n**{} {}:**", labels.configured, what));
    bullet_list(lines, samples, None);
}

fn bullet_list(lines: &mut Vec<String>, samples: &[String], limit: Option<usize>) {
    let mut sorted: Vec<&String> = samples.iter().collect();
    sorted.sort();
    let limit = limit.unwrap_or(sorted.len());
    for sample in sorted.into_iter().take(limit) {
        lines.push(format!("  - {}", sample));
    }
}
