//! Workspace configuration.
//!
//! A `stackform.toml` declares the API endpoint plus weighted resource
//! groups. Loading is fail-fast: a missing file or a field the schema
//! does not know about is an error at startup, not mid-run.

use crate::api_client::ApiClient;
use crate::resource::{Bucket, Cluster, NodeGroup, Policy, Role, Secret};
use anyhow::{Context as _, Result, bail};
use orchestrate::{BoxedResource, DEFAULT_GROUP_WEIGHT, Lifecycle, Resource as _, ResourceGroup};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "stackform.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    pub api: ApiConfig,
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    pub endpoint: String,
    /// Environment variable holding the bearer token, read at startup
    pub token_env: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_group_weight")]
    pub weight: u32,
    #[serde(default, rename = "role")]
    pub roles: Vec<RoleConfig>,
    #[serde(default, rename = "policy")]
    pub policies: Vec<PolicyConfig>,
    #[serde(default, rename = "bucket")]
    pub buckets: Vec<BucketConfig>,
    #[serde(default, rename = "secret")]
    pub secrets: Vec<SecretConfig>,
    #[serde(default, rename = "cluster")]
    pub clusters: Vec<ClusterConfig>,
    #[serde(default, rename = "node_group")]
    pub node_groups: Vec<NodeGroupConfig>,
}

impl GroupConfig {
    pub fn resource_count(&self) -> usize {
        self.roles.len()
            + self.policies.len()
            + self.buckets.len()
            + self.secrets.len()
            + self.clusters.len()
            + self.node_groups.len()
    }
}

/// Per-resource lifecycle gates, shared by every kind.
#[derive(Debug, Default, Deserialize)]
pub struct SkipFlags {
    #[serde(default)]
    pub skip_create: bool,
    #[serde(default)]
    pub skip_update: bool,
    #[serde(default)]
    pub skip_delete: bool,
}

impl SkipFlags {
    fn apply(&self, lifecycle: &mut Lifecycle) {
        lifecycle.skip_create = self.skip_create;
        lifecycle.skip_update = self.skip_update;
        lifecycle.skip_delete = self.skip_delete;
    }
}

#[derive(Debug, Deserialize)]
pub struct RoleConfig {
    pub name: String,
    pub description: Option<String>,
    pub assumed_by: Option<String>,
    #[serde(flatten)]
    pub skip: SkipFlags,
}

#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    pub name: String,
    pub description: Option<String>,
    pub document: serde_json::Value,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(flatten)]
    pub skip: SkipFlags,
}

#[derive(Debug, Deserialize)]
pub struct BucketConfig {
    pub name: String,
    pub region: Option<String>,
    #[serde(default)]
    pub versioning: bool,
    #[serde(flatten)]
    pub skip: SkipFlags,
}

#[derive(Debug, Deserialize)]
pub struct SecretConfig {
    pub name: String,
    pub value: Option<String>,
    pub value_env: Option<String>,
    #[serde(flatten)]
    pub skip: SkipFlags,
}

#[derive(Debug, Deserialize)]
pub struct ClusterConfig {
    pub name: String,
    pub version: Option<String>,
    pub role: Option<String>,
    #[serde(default = "default_true")]
    pub wait_for_creation: bool,
    #[serde(default = "default_true")]
    pub wait_for_deletion: bool,
    #[serde(flatten)]
    pub skip: SkipFlags,
}

#[derive(Debug, Deserialize)]
pub struct NodeGroupConfig {
    pub name: String,
    pub cluster: String,
    #[serde(default = "default_one")]
    pub min_size: u32,
    #[serde(default = "default_one")]
    pub max_size: u32,
    pub instance_type: Option<String>,
    #[serde(flatten)]
    pub skip: SkipFlags,
}

fn default_true() -> bool {
    true
}

fn default_group_weight() -> u32 {
    DEFAULT_GROUP_WEIGHT
}

fn default_one() -> u32 {
    1
}

impl WorkspaceConfig {
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid workspace config")
    }

    /// Build the API client from the `[api]` section.
    pub fn api_client(&self) -> ApiClient {
        let token = self
            .api
            .token_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok());
        if self.api.token_env.is_some() && token.is_none() {
            log::warn!("Token environment variable is not set; calling the API anonymously");
        }
        ApiClient::new(&self.api.endpoint, token)
    }

    /// Materialize the declared groups into engine resource groups.
    pub fn into_groups(self) -> Vec<ResourceGroup<ApiClient>> {
        self.groups.into_iter().map(GroupConfig::into_group).collect()
    }
}

impl GroupConfig {
    fn into_group(self) -> ResourceGroup<ApiClient> {
        let mut group = ResourceGroup::new(self.name)
            .with_weight(self.weight)
            .with_enabled(self.enabled);

        for c in self.roles {
            let mut role = Role::new(&c.name);
            if let Some(description) = &c.description {
                role = role.description(description);
            }
            if let Some(service) = &c.assumed_by {
                role = role.assumed_by(service);
            }
            group.add_resource(with_flags(Box::new(role), &c.skip));
        }
        for c in self.policies {
            let mut policy = Policy::new(&c.name, c.document.clone());
            if let Some(description) = &c.description {
                policy = policy.description(description);
            }
            for role in &c.roles {
                policy = policy.attach_to(role);
            }
            group.add_resource(with_flags(Box::new(policy), &c.skip));
        }
        for c in self.buckets {
            let mut bucket = Bucket::new(&c.name).versioning(c.versioning);
            if let Some(region) = &c.region {
                bucket = bucket.region(region);
            }
            group.add_resource(with_flags(Box::new(bucket), &c.skip));
        }
        for c in self.secrets {
            let mut secret = Secret::new(&c.name);
            if let Some(value) = &c.value {
                secret = secret.value(value);
            }
            if let Some(var) = &c.value_env {
                secret = secret.value_from_env(var);
            }
            group.add_resource(with_flags(Box::new(secret), &c.skip));
        }
        for c in self.clusters {
            let mut cluster = Cluster::new(&c.name)
                .wait_for_creation(c.wait_for_creation)
                .wait_for_deletion(c.wait_for_deletion);
            if let Some(version) = &c.version {
                cluster = cluster.version(version);
            }
            if let Some(role) = &c.role {
                cluster = cluster.role(role);
            }
            group.add_resource(with_flags(Box::new(cluster), &c.skip));
        }
        for c in self.node_groups {
            let mut node_group = NodeGroup::new(&c.name, &c.cluster)
                .size(c.min_size, c.max_size)
                .wait_for_creation(true);
            if let Some(instance_type) = &c.instance_type {
                node_group = node_group.instance_type(instance_type);
            }
            group.add_resource(with_flags(Box::new(node_group), &c.skip));
        }
        group
    }
}

fn with_flags(
    mut resource: BoxedResource<ApiClient>,
    skip: &SkipFlags,
) -> BoxedResource<ApiClient> {
    skip.apply(resource.lifecycle_mut());
    resource
}

/// Resolve and load the workspace config.
///
/// Search order: the explicit `--config` path, then `./stackform.toml`,
/// then the user config directory.
pub fn load(path: Option<&Path>) -> Result<WorkspaceConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match find_default()? {
            Some(p) => p,
            None => bail!(
                "No {CONFIG_FILE} found in the current directory or the user config directory"
            ),
        },
    };
    log::debug!("Loading config from {}", path.display());
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    WorkspaceConfig::parse(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn find_default() -> Result<Option<PathBuf>> {
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }
    if let Some(dir) = dirs::config_dir() {
        let user = dir.join("stackform").join(CONFIG_FILE);
        if user.exists() {
            return Ok(Some(user));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const SAMPLE: &str = r#"
[api]
endpoint = "https://api.example.com"
token_env = "STACKFORM_TOKEN"

[[group]]
name = "platform"
weight = 50

[[group.role]]
name = "app"
assumed_by = "compute.internal"

[[group.bucket]]
name = "prod-artifacts"
region = "eu-west-1"
versioning = true
skip_delete = true

[[group.cluster]]
name = "prod"
version = "1.31"

[[group.node_group]]
name = "workers"
cluster = "prod"
min_size = 2
max_size = 10

[[group]]
name = "staging"
enabled = false
"#;

    #[test]
    fn test_parse_sample_config() {
        let config = WorkspaceConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.api.endpoint, "https://api.example.com");
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.groups[0].weight, 50);
        assert_eq!(config.groups[0].resource_count(), 4);
        assert!(config.groups[0].buckets[0].skip.skip_delete);
        assert!(!config.groups[1].enabled);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let bad = "[api]\nendpoint = \"x\"\nbogus = 1\n";
        assert!(WorkspaceConfig::parse(bad).is_err());
    }

    #[test]
    fn test_into_groups_carries_flags_and_weights() {
        let config = WorkspaceConfig::parse(SAMPLE).unwrap();
        let groups = config.into_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].weight, 50);
        assert_eq!(groups[0].len(), 4);
        assert!(!groups[1].enabled);

        let bucket = groups[0]
            .resources
            .iter()
            .find(|r| r.resource_type() == "bucket")
            .unwrap();
        assert!(bucket.lifecycle().skip_delete);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.groups.len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load(Some(Path::new("/nonexistent/stackform.toml"))).is_err());
    }
}
