use crate::api_client::ApiClient;
use crate::resource::rest;
use orchestrate::{Lifecycle, Resource, Result};
use serde_json::{Value, json};

const COLLECTION: &str = "policies";

/// An access policy document attached to roles.
#[derive(Debug)]
pub struct Policy {
    name: String,
    description: Option<String>,
    document: Value,
    /// Roles the policy is attached to on creation
    roles: Vec<String>,
    lifecycle: Lifecycle,
}

impl Policy {
    pub fn new(name: impl Into<String>, document: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            document,
            roles: Vec::new(),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn attach_to(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    fn request_body(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "document": self.document,
            "roles": self.roles,
        })
    }
}

impl Resource<ApiClient> for Policy {
    fn resource_type(&self) -> &'static str {
        "policy"
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
        !self.name.is_empty() && self.document.is_object()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_requires_an_object_document() {
        let ok = Policy::new("read-only", json!({ "allow": ["get"] }));
        assert!(ok.is_valid());

        let bad = Policy::new("read-only", Value::Null);
        assert!(!bad.is_valid());
    }

    #[test]
    fn test_policy_body_includes_attached_roles() {
        let policy = Policy::new("read-only", json!({ "allow": ["get"] }))
            .attach_to("app")
            .attach_to("ci");
        let body = policy.request_body();
        assert_eq!(body["roles"], json!(["app", "ci"]));
    }
}
