/// Headings and captions used by the report sections.
#[derive(Debug, Clone)]
pub struct Labels {
    pub analysis_intro: &'static str,
    pub section_identity: &'static str,
    pub section_compute: &'static str,
    pub section_sql: &'static str,
    pub section_ml: &'static str,
    pub section_secrets: &'static str,
    pub section_workspace: &'static str,
    pub section_unity_catalog: &'static str,
    pub section_summary: &'static str,
    pub users_title: &'static str,
    pub service_principals_title: &'static str,
    pub groups_title: &'static str,
    pub permissions_title: &'static str,
    pub distribution_by_domain: &'static str,
    pub domain: &'static str,
    pub quantity: &'static str,
    pub clusters_title: &'static str,
    pub node_types_title: &'static str,
    pub node_type: &'static str,
    pub instance_pools_title: &'static str,
    pub jobs_title: &'static str,
    pub job_types_title: &'static str,
    pub notebooks_title: &'static str,
    pub languages_title: &'static str,
    pub catalogs_title: &'static str,
    pub schemas_title: &'static str,
    pub tables_title: &'static str,
    pub volumes_title: &'static str,
    pub table_types_title: &'static str,
    pub total_resources: &'static str,
    pub config_files: &'static str,
    pub total_size: &'static str,
    pub main_categories: &'static str,
    pub unity_catalog_governance: &'static str,
    pub sample_of: &'static str,
    pub configured: &'static str,
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

impl Labels {
    pub fn english() -> Self {
        Self {
            analysis_intro: "Analysis of {count} Terraform files",
            section_identity: "IDENTITY & ACCESS MANAGEMENT",
            section_compute: "COMPUTE RESOURCES",
            section_sql: "SQL ANALYTICS & BUSINESS INTELLIGENCE",
            section_ml: "MACHINE LEARNING & AI",
            section_secrets: "SECRETS & SECURITY",
            section_workspace: "WORKSPACE & FILES",
            section_unity_catalog: "UNITY CATALOG & GOVERNANCE",
            section_summary: "EXECUTIVE SUMMARY",
            users_title: "Users",
            service_principals_title: "Service Principals",
            groups_title: "Groups",
            permissions_title: "Permissions",
            distribution_by_domain: "Distribution by domain",
            domain: "Domain",
            quantity: "Count",
            clusters_title: "Clusters",
            node_types_title: "Node types",
            node_type: "Node type",
            instance_pools_title: "Instance Pools",
            jobs_title: "Jobs",
            job_types_title: "Task types",
            notebooks_title: "Notebooks",
            languages_title: "Languages",
            catalogs_title: "Catalogs",
            schemas_title: "Schemas",
            tables_title: "Tables",
            volumes_title: "Volumes",
            table_types_title: "Table types",
            total_resources: "Total resources",
            config_files: "Configuration files",
            total_size: "Total size",
            main_categories: "Main categories",
            unity_catalog_governance: "Unity Catalog governance",
            sample_of: "Sample of",
            configured: "Configured",
        }
    }

    /// Intro line with the file count substituted.
    pub fn intro(&self, count: usize) -> String {
        self.analysis_intro.replace("{count}", &count.to_string())
    }
}
