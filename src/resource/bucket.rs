use crate::api_client::ApiClient;
use crate::resource::rest;
use orchestrate::{Lifecycle, Resource, Result};
use serde_json::{Value, json};

const COLLECTION: &str = "buckets";

/// An object-storage bucket.
#[derive(Debug)]
pub struct Bucket {
    name: String,
    region: Option<String>,
    versioning: bool,
    lifecycle: Lifecycle,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: None,
            versioning: false,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn versioning(mut self, enabled: bool) -> Self {
        self.versioning = enabled;
        self
    }

    fn request_body(&self) -> Value {
        json!({
            "name": self.name,
            "region": self.region,
            "versioning": self.versioning,
        })
    }
}

impl Resource<ApiClient> for Bucket {
    fn resource_type(&self) -> &'static str {
        "bucket"
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
        // Bucket names are DNS labels on most backends
        !self.name.is_empty()
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
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
