use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Terraform declaration forms that introduce a tracked block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Resource,
    Data,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Resource => "resource",
            BlockType::Data => "data",
        }
    }

    /// Builds the declaration marker for a provider type, e.g. `resource "databricks_user"`.
    pub fn marker(&self, type_name: &str) -> String {
        format!("{} \"{}\"", self.as_str(), type_name)
    }
}

/// Every resource kind counted during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Users,
    ServicePrincipals,
    Groups,
    GroupMembers,
    Permissions,
    Clusters,
    ClusterPolicies,
    InstancePools,
    Jobs,
    Notebooks,
    Queries,
    Dashboards,
    Alerts,
    SqlEndpoints,
    SqlGlobalConfig,
    RegisteredModels,
    ModelServingEndpoints,
    VectorSearchIndexes,
    VectorSearchEndpoints,
    SecretScopes,
    Secrets,
    SecretAcls,
    WorkspaceFiles,
    Directories,
    Repos,
    NotificationDestinations,
    WorkspaceBindings,
    WorkspaceConf,
    DbfsFiles,
    GlobalInitScripts,
    Mounts,
    Tokens,
    IpAccessLists,
    Catalogs,
    Schemas,
    Tables,
    Volumes,
    Grants,
    ExternalLocations,
    StorageCredentials,
    SystemSchemas,
    Recipients,
    Connections,
    Shares,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 44] = [
        ResourceKind::Users,
        ResourceKind::ServicePrincipals,
        ResourceKind::Groups,
        ResourceKind::GroupMembers,
        ResourceKind::Permissions,
        ResourceKind::Clusters,
        ResourceKind::ClusterPolicies,
        ResourceKind::InstancePools,
        ResourceKind::Jobs,
        ResourceKind::Notebooks,
        ResourceKind::Queries,
        ResourceKind::Dashboards,
        ResourceKind::Alerts,
        ResourceKind::SqlEndpoints,
        ResourceKind::SqlGlobalConfig,
        ResourceKind::RegisteredModels,
        ResourceKind::ModelServingEndpoints,
        ResourceKind::VectorSearchIndexes,
        ResourceKind::VectorSearchEndpoints,
        ResourceKind::SecretScopes,
        ResourceKind::Secrets,
        ResourceKind::SecretAcls,
        ResourceKind::WorkspaceFiles,
        ResourceKind::Directories,
        ResourceKind::Repos,
        ResourceKind::NotificationDestinations,
        ResourceKind::WorkspaceBindings,
        ResourceKind::WorkspaceConf,
        ResourceKind::DbfsFiles,
        ResourceKind::GlobalInitScripts,
        ResourceKind::Mounts,
        ResourceKind::Tokens,
        ResourceKind::IpAccessLists,
        ResourceKind::Catalogs,
        ResourceKind::Schemas,
        ResourceKind::Tables,
        ResourceKind::Volumes,
        ResourceKind::Grants,
        ResourceKind::ExternalLocations,
        ResourceKind::StorageCredentials,
        ResourceKind::SystemSchemas,
        ResourceKind::Recipients,
        ResourceKind::Connections,
        ResourceKind::Shares,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Users => "users",
            ResourceKind::ServicePrincipals => "service_principals",
            ResourceKind::Groups => "groups",
            ResourceKind::GroupMembers => "group_members",
            ResourceKind::Permissions => "permissions",
            ResourceKind::Clusters => "clusters",
            ResourceKind::ClusterPolicies => "cluster_policies",
            ResourceKind::InstancePools => "instance_pools",
            ResourceKind::Jobs => "jobs",
            ResourceKind::Notebooks => "notebooks",
            ResourceKind::Queries => "queries",
            ResourceKind::Dashboards => "dashboards",
            ResourceKind::Alerts => "alerts",
            ResourceKind::SqlEndpoints => "sql_endpoints",
            ResourceKind::SqlGlobalConfig => "sql_global_config",
            ResourceKind::RegisteredModels => "uc_models",
            ResourceKind::ModelServingEndpoints => "model_serving_endpoints",
            ResourceKind::VectorSearchIndexes => "vector_search_indexes",
            ResourceKind::VectorSearchEndpoints => "vector_search_endpoints",
            ResourceKind::SecretScopes => "secret_scopes",
            ResourceKind::Secrets => "secrets",
            ResourceKind::SecretAcls => "secret_acls",
            ResourceKind::WorkspaceFiles => "workspace_files",
            ResourceKind::Directories => "directories",
            ResourceKind::Repos => "repos",
            ResourceKind::NotificationDestinations => "notification_destinations",
            ResourceKind::WorkspaceBindings => "workspace_bindings",
            ResourceKind::WorkspaceConf => "workspace_conf",
            ResourceKind::DbfsFiles => "dbfs_files",
            ResourceKind::GlobalInitScripts => "global_init_scripts",
            ResourceKind::Mounts => "mounts",
            ResourceKind::Tokens => "tokens",
            ResourceKind::IpAccessLists => "ip_access_lists",
            ResourceKind::Catalogs => "uc_catalogs",
            ResourceKind::Schemas => "uc_schemas",
            ResourceKind::Tables => "uc_tables",
            ResourceKind::Volumes => "uc_volumes",
            ResourceKind::Grants => "uc_grants",
            ResourceKind::ExternalLocations => "uc_external_locations",
            ResourceKind::StorageCredentials => "uc_storage_credentials",
            ResourceKind::SystemSchemas => "uc_system_schemas",
            ResourceKind::Recipients => "uc_recipients",
            ResourceKind::Connections => "uc_connections",
            ResourceKind::Shares => "uc_shares",
        }
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Sub-categories tallied by label (node type, task type, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    ClusterNodeTypes,
    JobTaskTypes,
    NotebookLanguages,
    TableTypes,
    WorkspaceFileTypes,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ClusterNodeTypes => "cluster_types",
            Category::JobTaskTypes => "job_types",
            Category::NotebookLanguages => "notebook_languages",
            Category::TableTypes => "uc_table_types",
            Category::WorkspaceFileTypes => "workspace_file_types",
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Count per resource kind. Kinds never seen read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceStats {
    counts: BTreeMap<ResourceKind, usize>,
}

impl ResourceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: ResourceKind, amount: usize) {
        if amount == 0 {
            return;
        }
        *self.counts.entry(kind).or_insert(0) += amount;
    }

    pub fn increment(&mut self, kind: ResourceKind) {
        self.add(kind, 1);
    }

    /// Sum over every kind.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Every kind is written, including those never seen.
impl Serialize for ResourceStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ResourceKind::ALL.len()))?;
        for kind in ResourceKind::ALL {
            map.serialize_entry(kind.as_str(), &self.get(kind))?;
        }
        map.end()
    }
}

/// Label counts that remember first-seen order, so equal counts keep
/// their original relative order when sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn increment(&mut self, label: &str) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((label.to_string(), 1)),
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries ordered by descending count; ties keep insertion order.
    pub fn sorted_desc(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

static EMPTY_TALLY: Tally = Tally::new();

/// Sampled identifiers and categorical tallies gathered during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ResourceInventory {
    samples: BTreeMap<ResourceKind, Vec<String>>,
    tallies: BTreeMap<Category, Tally>,
}

impl ResourceInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self, kind: ResourceKind) -> &[String] {
        self.samples.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends a sample unless the kind already holds `cap` entries.
    /// With `dedup`, a value already present is not added again.
    /// Returns whether the value was stored.
    pub fn push_sample(&mut self, kind: ResourceKind, value: String, cap: usize, dedup: bool) -> bool {
        let samples = self.samples.entry(kind).or_default();
        if samples.len() >= cap || (dedup && samples.contains(&value)) {
            return false;
        }
        samples.push(value);
        true
    }

    pub fn tally(&self, category: Category) -> &Tally {
        self.tallies.get(&category).unwrap_or(&EMPTY_TALLY)
    }

    pub fn record(&mut self, category: Category, label: &str) {
        self.tallies.entry(category).or_default().increment(label);
    }

    pub fn is_empty(&self) -> bool {
        self.samples.values().all(Vec::is_empty) && self.tallies.values().all(Tally::is_empty)
    }
}
