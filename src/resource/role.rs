use crate::api_client::ApiClient;
use crate::resource::rest;
use orchestrate::{Lifecycle, Resource, Result};
use serde_json::{Value, json};

const COLLECTION: &str = "roles";

/// An identity role that workloads assume to call other services.
#[derive(Debug)]
pub struct Role {
    name: String,
    description: Option<String>,
    /// Service principal allowed to assume this role
    assumed_by: Option<String>,
    lifecycle: Lifecycle,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            assumed_by: None,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn assumed_by(mut self, service: impl Into<String>) -> Self {
        self.assumed_by = Some(service.into());
        self
    }

    fn request_body(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "assumed_by": self.assumed_by,
        })
    }
}

impl Resource<ApiClient> for Role {
    fn resource_type(&self) -> &'static str {
        "role"
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
}
