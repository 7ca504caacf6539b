use crate::api_client::ApiClient;
use crate::resource::rest;
use orchestrate::{Lifecycle, Resource, Result};
use serde_json::{Value, json};

const COLLECTION: &str = "secrets";

/// A named secret stored server-side.
///
/// The value is either given inline or pulled from an environment
/// variable when the request body is built, so config files never
/// carry live credentials.
#[derive(Debug)]
pub struct Secret {
    name: String,
    value: Option<String>,
    value_env: Option<String>,
    lifecycle: Lifecycle,
}

impl Secret {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_env: None,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn value_from_env(mut self, var: impl Into<String>) -> Self {
        self.value_env = Some(var.into());
        self
    }

    fn resolved_value(&self) -> Option<String> {
        if let Some(value) = &self.value {
            return Some(value.clone());
        }
        self.value_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
    }

    fn request_body(&self) -> Value {
        json!({
            "name": self.name,
            "value": self.resolved_value(),
        })
    }
}

impl Resource<ApiClient> for Secret {
    fn resource_type(&self) -> &'static str {
        "secret"
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
        !self.name.is_empty() && (self.value.is_some() || self.value_env.is_some())
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
    fn test_secret_needs_a_value_source() {
        assert!(!Secret::new("db-password").is_valid());
        assert!(Secret::new("db-password").value("hunter2").is_valid());
        assert!(Secret::new("db-password").value_from_env("DB_PASSWORD").is_valid());
    }

    #[test]
    fn test_inline_value_wins_over_env() {
        let secret = Secret::new("db-password")
            .value("inline")
            .value_from_env("STACKFORM_TEST_UNSET_VAR");
        assert_eq!(secret.resolved_value().as_deref(), Some("inline"));
    }
}
