//! Declarative description of every tracked Databricks resource type.
//!
//! Window sizes and sample caps were tuned against real workspace exports.
//! Changing a window changes which attributes are found near block
//! boundaries, so each one is kept as data here rather than unified.

use super::model::{BlockType, Category, ResourceKind};

/// Which declaration forms count for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forms {
    ResourceAndData,
    ResourceOnly,
}

impl Forms {
    pub fn block_types(&self) -> &'static [BlockType] {
        match self {
            Forms::ResourceAndData => &[BlockType::Resource, BlockType::Data],
            Forms::ResourceOnly => &[BlockType::Resource],
        }
    }
}

/// How a sample identifier is recovered for a declaration.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub key: &'static str,
    /// Keys prefixed to the name, outermost first, when every one of them is found.
    pub parents: &'static [&'static str],
    pub window: usize,
    pub cap: usize,
    pub dedup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    AsIs,
    Uppercase,
    /// Label is the text after the last `.` of a literal value.
    Extension,
}

/// A categorical attribute tallied for every declaration.
#[derive(Debug, Clone, Copy)]
pub struct Classify {
    pub category: Category,
    pub key: &'static str,
    pub window: usize,
    pub transform: Transform,
}

/// One line-scanned resource type.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub kind: ResourceKind,
    pub types: &'static [&'static str],
    pub forms: Forms,
    /// A declaration line containing any of these is ignored.
    pub exclude: &'static [&'static str],
    pub sample: Option<Sample>,
    pub classify: Option<Classify>,
}

/// A resource type that is only counted, by substring occurrences in the whole file.
#[derive(Debug, Clone, Copy)]
pub struct CountOnly {
    pub kind: ResourceKind,
    pub types: &'static [&'static str],
    pub forms: Forms,
}

const fn sample(key: &'static str, window: usize, cap: usize) -> Option<Sample> {
    Some(Sample {
        key,
        parents: &[],
        window,
        cap,
        dedup: false,
    })
}

const fn counted(kind: ResourceKind, types: &'static [&'static str]) -> Rule {
    Rule {
        kind,
        types,
        forms: Forms::ResourceAndData,
        exclude: &[],
        sample: None,
        classify: None,
    }
}

const fn named(
    kind: ResourceKind,
    types: &'static [&'static str],
    sample: Option<Sample>,
) -> Rule {
    Rule {
        kind,
        types,
        forms: Forms::ResourceAndData,
        exclude: &[],
        sample,
        classify: None,
    }
}

/// Job declarations are scanned separately; see `JobScan`.
pub const JOB_TYPES: &[&str] = &["databricks_job"];

/// Lines after a job declaration searched for its name and task kinds.
pub const JOB_WINDOW: usize = 49;
pub const JOB_SAMPLE_CAP: usize = 50;

/// Task block keys and the label they are tallied under.
pub const JOB_TASK_KINDS: &[(&str, &str)] = &[
    ("notebook_task", "Notebook"),
    ("spark_jar_task", "JAR"),
    ("spark_python_task", "Python"),
    ("spark_submit_task", "Spark Submit"),
];

/// Line rules in the order they are applied to each file.
pub const LINE_RULES: &[Rule] = &[
    // identity
    named(ResourceKind::Users, &["databricks_user"], sample("user_name", 10, 100)),
    named(
        ResourceKind::ServicePrincipals,
        &["databricks_service_principal"],
        sample("display_name", 10, 100),
    ),
    Rule {
        kind: ResourceKind::Groups,
        types: &["databricks_group"],
        forms: Forms::ResourceAndData,
        exclude: &["member"],
        sample: sample("display_name", 10, 100),
        classify: None,
    },
    // compute
    Rule {
        kind: ResourceKind::Clusters,
        types: &["databricks_cluster"],
        forms: Forms::ResourceAndData,
        exclude: &["policy"],
        sample: sample("cluster_name", 30, 50),
        classify: Some(Classify {
            category: Category::ClusterNodeTypes,
            key: "node_type_id",
            window: 30,
            transform: Transform::AsIs,
        }),
    },
    named(
        ResourceKind::ClusterPolicies,
        &["databricks_cluster_policy"],
        sample("name", 20, 50),
    ),
    Rule {
        kind: ResourceKind::Notebooks,
        types: &["databricks_notebook"],
        forms: Forms::ResourceAndData,
        exclude: &[],
        sample: Some(Sample {
            key: "path",
            parents: &[],
            window: 15,
            cap: 200,
            dedup: true,
        }),
        classify: Some(Classify {
            category: Category::NotebookLanguages,
            key: "language",
            window: 15,
            transform: Transform::Uppercase,
        }),
    },
    // sql analytics
    named(ResourceKind::Queries, &["databricks_query"], sample("name", 20, 100)),
    named(ResourceKind::Dashboards, &["databricks_dashboard"], sample("name", 20, 100)),
    named(ResourceKind::Alerts, &["databricks_alert"], sample("name", 20, 100)),
    counted(ResourceKind::SqlEndpoints, &["databricks_sql_endpoint"]),
    // machine learning
    named(
        ResourceKind::RegisteredModels,
        &["databricks_registered_model"],
        sample("name", 15, 50),
    ),
    named(
        ResourceKind::ModelServingEndpoints,
        &["databricks_model_serving"],
        sample("name", 15, 50),
    ),
    named(
        ResourceKind::VectorSearchIndexes,
        &["databricks_vector_search_index"],
        sample("name", 15, 50),
    ),
    named(
        ResourceKind::VectorSearchEndpoints,
        &["databricks_vector_search_endpoint"],
        sample("name", 15, 50),
    ),
    // secrets
    named(ResourceKind::SecretScopes, &["databricks_secret_scope"], sample("name", 10, 50)),
    // workspace
    Rule {
        kind: ResourceKind::WorkspaceFiles,
        types: &["databricks_workspace_file"],
        forms: Forms::ResourceAndData,
        exclude: &[],
        sample: sample("path", 10, 50),
        classify: Some(Classify {
            category: Category::WorkspaceFileTypes,
            key: "path",
            window: 10,
            transform: Transform::Extension,
        }),
    },
    named(
        ResourceKind::GlobalInitScripts,
        &["databricks_global_init_script"],
        sample("name", 10, 50),
    ),
    // unity catalog
    named(ResourceKind::Catalogs, &["databricks_catalog"], sample("name", 10, 50)),
    named(
        ResourceKind::Schemas,
        &["databricks_schema"],
        Some(Sample {
            key: "name",
            parents: &["catalog_name"],
            window: 15,
            cap: 100,
            dedup: false,
        }),
    ),
    Rule {
        kind: ResourceKind::Tables,
        types: &["databricks_table", "databricks_sql_table"],
        forms: Forms::ResourceAndData,
        exclude: &[],
        sample: Some(Sample {
            key: "name",
            parents: &["catalog_name", "schema_name"],
            window: 25,
            cap: 100,
            dedup: false,
        }),
        classify: Some(Classify {
            category: Category::TableTypes,
            key: "table_type",
            window: 25,
            transform: Transform::AsIs,
        }),
    },
    named(ResourceKind::Volumes, &["databricks_volume"], sample("name", 15, 50)),
    counted(ResourceKind::ExternalLocations, &["databricks_external_location"]),
    counted(ResourceKind::StorageCredentials, &["databricks_storage_credential"]),
    counted(ResourceKind::SystemSchemas, &["databricks_system_schema"]),
    counted(ResourceKind::Recipients, &["databricks_recipient"]),
];

/// Count-only types swept over the raw file text.
pub const COUNT_ONLY: &[CountOnly] = &[
    CountOnly {
        kind: ResourceKind::Grants,
        types: &["databricks_grants"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::GroupMembers,
        types: &["databricks_group_member"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::Secrets,
        types: &["databricks_secret"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::Permissions,
        types: &["databricks_permissions"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::Repos,
        types: &["databricks_repo"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::Mounts,
        types: &["databricks_mount"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::InstancePools,
        types: &["databricks_instance_pool"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::Tokens,
        types: &["databricks_token"],
        forms: Forms::ResourceOnly,
    },
    CountOnly {
        kind: ResourceKind::IpAccessLists,
        types: &["databricks_ip_access_list"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::Directories,
        types: &["databricks_directory"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::Connections,
        types: &["databricks_connection"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::Shares,
        types: &["databricks_share"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::WorkspaceBindings,
        types: &["databricks_workspace_binding"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::WorkspaceConf,
        types: &["databricks_workspace_conf"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::SqlGlobalConfig,
        types: &["databricks_sql_global_config"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::NotificationDestinations,
        types: &["databricks_notification_destination"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::SecretAcls,
        types: &["databricks_secret_acl"],
        forms: Forms::ResourceAndData,
    },
    CountOnly {
        kind: ResourceKind::DbfsFiles,
        types: &["databricks_file"],
        forms: Forms::ResourceAndData,
    },
];
