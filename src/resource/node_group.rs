use crate::api_client::ApiClient;
use crate::resource::rest;
use orchestrate::{Lifecycle, Resource, Result, WaiterConfig, wait_for};
use serde_json::{Value, json};

const COLLECTION: &str = "node-groups";

/// A pool of worker nodes attached to a [`Cluster`](super::Cluster).
///
/// Node groups sort after clusters in the install order, so by the time
/// one is created its cluster already exists.
#[derive(Debug)]
pub struct NodeGroup {
    name: String,
    cluster: String,
    min_size: u32,
    max_size: u32,
    instance_type: Option<String>,
    wait_for_creation: bool,
    waiter: WaiterConfig,
    lifecycle: Lifecycle,
}

impl NodeGroup {
    pub fn new(name: impl Into<String>, cluster: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cluster: cluster.into(),
            min_size: 1,
            max_size: 1,
            instance_type: None,
            wait_for_creation: true,
            waiter: WaiterConfig::default(),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn size(mut self, min: u32, max: u32) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    pub fn instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = Some(instance_type.into());
        self
    }

    pub fn wait_for_creation(mut self, wait: bool) -> Self {
        self.wait_for_creation = wait;
        self
    }

    fn request_body(&self) -> Value {
        json!({
            "name": self.name,
            "cluster": self.cluster,
            "min_size": self.min_size,
            "max_size": self.max_size,
            "instance_type": self.instance_type,
        })
    }
}

impl Resource<ApiClient> for NodeGroup {
    fn resource_type(&self) -> &'static str {
        "node_group"
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
        !self.name.is_empty() && !self.cluster.is_empty() && self.min_size <= self.max_size
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
}
