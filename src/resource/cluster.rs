use crate::api_client::ApiClient;
use crate::resource::rest;
use orchestrate::{Lifecycle, Resource, Result, WaiterConfig, wait_for};
use serde_json::{Value, json};

const COLLECTION: &str = "clusters";

/// A managed compute cluster.
///
/// Clusters settle asynchronously: the creation call returns while the
/// control plane is still provisioning, so the post hooks poll until the
/// cluster reports `active` (or disappears, on delete).
#[derive(Debug)]
pub struct Cluster {
    name: String,
    version: Option<String>,
    role: Option<String>,
    wait_for_creation: bool,
    wait_for_deletion: bool,
    waiter: WaiterConfig,
    lifecycle: Lifecycle,
}

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            role: None,
            wait_for_creation: true,
            wait_for_deletion: true,
            waiter: WaiterConfig::slow(),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn wait_for_creation(mut self, wait: bool) -> Self {
        self.wait_for_creation = wait;
        self
    }

    pub fn wait_for_deletion(mut self, wait: bool) -> Self {
        self.wait_for_deletion = wait;
        self
    }

    pub fn waiter(mut self, waiter: WaiterConfig) -> Self {
        self.waiter = waiter;
        self
    }

    fn request_body(&self) -> Value {
        json!({
            "name": self.name,
            "version": self.version,
            "role": self.role,
        })
    }
}

impl Resource<ApiClient> for Cluster {
    fn resource_type(&self) -> &'static str {
        "cluster"
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    fn create_resource(&mut self, client: &ApiClient) -> Result<bool> {
        rest::create(client, COLLECTION, &self.request_body())
    }

    fn read_resource(&mut self, client: &ApiClient) -> Result<Option<Value>> {
        rest::read(client, COLLECTION, &self.name)
    }

    fn update_resource(&mut self, client: &ApiClient) -> Result<bool> {
        rest::update(client, COLLECTION, &self.name, &self.request_body())
    }

    fn delete_resource(&mut self, client: &ApiClient) -> Result<bool> {
        rest::delete(client, COLLECTION, &self.name)
    }

    fn post_create(&mut self, client: &ApiClient) -> Result<bool> {
        if !self.wait_for_creation {
            return Ok(true);
        }
        let id = self.id();
        wait_for(&self.waiter, &id, "active", || {
            rest::status_is(client, COLLECTION, &self.name, "active")
        })?;
        Ok(true)
    }

    fn post_delete(&mut self, client: &ApiClient) -> Result<bool> {
        if !self.wait_for_deletion {
            return Ok(true);
        }
        let id = self.id();
        wait_for(&self.waiter, &id, "deleted", || {
            rest::absent(client, COLLECTION, &self.name)
        })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cluster_waits_by_default() {
        let cluster = Cluster::new("prod");
        assert!(cluster.wait_for_creation);
        assert!(cluster.wait_for_deletion);
        assert_eq!(cluster.waiter.delay, Duration::from_secs(30));
        assert_eq!(cluster.waiter.max_attempts, 50);
    }

    #[test]
    fn test_cluster_body() {
        let cluster = Cluster::new("prod").version("1.31").role("app");
        let body = cluster.request_body();
        assert_eq!(body["name"], "prod");
        assert_eq!(body["version"], "1.31");
        assert_eq!(body["role"], "app");
    }
}
