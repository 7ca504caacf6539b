//! Resource trait and lifecycle state.
//!
//! A resource is a declarative handle to one external infrastructure object.
//! Concrete types implement the four inner operations against their backend
//! client; the provided `create`/`read`/`update`/`delete` wrappers layer the
//! lifecycle policy on top: validation, skip flags, the cache check, vacuous
//! update/delete against absent objects, and failure-to-boolean conversion.
//!
//! Errors never escape the wrappers. Callers of the public entry points
//! check booleans; the log stream carries the detail.

use crate::error::{ResourceError, Result};
use serde_json::Value;
use std::fmt;

/// Lifecycle flags and state carried by every resource.
///
/// Traits have no fields, so concrete types embed this struct and expose it
/// through [`Resource::lifecycle`] / [`Resource::lifecycle_mut`].
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    /// Gate each phase independently (controlled exclusion, not dry-run)
    pub skip_create: bool,
    pub skip_read: bool,
    pub skip_update: bool,
    pub skip_delete: bool,
    /// Skip creation when a live object is already observed (default true)
    pub use_cache: bool,
    /// Last lifecycle outcomes
    pub state: LifecycleState,
}

impl Lifecycle {
    /// Default lifecycle: nothing skipped, cache enabled.
    pub fn new() -> Self {
        Self {
            use_cache: true,
            ..Self::default()
        }
    }
}

/// Last-observed external state and operation outcomes.
#[derive(Debug, Clone, Default)]
pub struct LifecycleState {
    /// Last successfully observed live state. `None` always means
    /// "not confirmed to exist"; only a successful read sets this.
    pub active: Option<Value>,
    /// Outcome of the last create, if one ran
    pub created: Option<bool>,
    /// Outcome of the last update, if one ran
    pub updated: Option<bool>,
    /// Outcome of the last delete, if one ran
    pub deleted: Option<bool>,
}

/// Core trait for declarative infrastructure resources.
///
/// `C` is the backend API client type, constructed once by the worker and
/// shared read-only across all sequential calls.
///
/// Implementors provide the inner operations (`create_resource` etc.) and
/// get the lifecycle wrappers for free. The inner operations return
/// [`Result`] with the closed [`ResourceError`] enum; the wrappers convert
/// every failure to a boolean at this boundary.
pub trait Resource<C>: Send + Sync + fmt::Debug {
    /// Resource type string, e.g. "role", "bucket", "cluster".
    ///
    /// Used for install-order lookup and type filtering.
    fn resource_type(&self) -> &'static str;

    /// Resource name, its identity within the type.
    fn name(&self) -> Option<&str>;

    /// Lifecycle flags and state.
    fn lifecycle(&self) -> &Lifecycle;

    /// Mutable lifecycle flags and state.
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Structural validation before any API call. Default: valid.
    fn is_valid(&self) -> bool {
        true
    }

    /// Identifier for logs and plan output.
    fn id(&self) -> String {
        format!("{}:{}", self.resource_type(), self.name().unwrap_or("unnamed"))
    }

    /// Issue the external creation call.
    ///
    /// Returns `Ok(true)` only if the backend reports the object as durably
    /// created.
    fn create_resource(&mut self, client: &C) -> Result<bool>;

    /// Fetch current external state by name.
    ///
    /// `Ok(None)` is the expected signal for "does not exist yet" - absence
    /// is not an error.
    fn read_resource(&mut self, client: &C) -> Result<Option<Value>>;

    /// Apply a diff to an existing object.
    fn update_resource(&mut self, client: &C) -> Result<bool>;

    /// Issue the external deletion call.
    ///
    /// Returns `Ok(true)` only on a confirmed success signal from the API.
    fn delete_resource(&mut self, client: &C) -> Result<bool>;

    /// Hook after a successful create, e.g. a waiter polling for the
    /// resource to reach its terminal state.
    fn post_create(&mut self, _client: &C) -> Result<bool> {
        Ok(true)
    }

    /// Hook after a successful update.
    fn post_update(&mut self, _client: &C) -> Result<bool> {
        Ok(true)
    }

    /// Hook after a successful delete.
    fn post_delete(&mut self, _client: &C) -> Result<bool> {
        Ok(true)
    }

    /// Read the resource, using the cached live state when allowed.
    ///
    /// Read failures are never fatal: API errors are logged and reported as
    /// `None` ("could not confirm existence").
    fn read(&mut self, client: &C) -> Option<Value> {
        if self.lifecycle().use_cache && self.lifecycle().state.active.is_some() {
            return self.lifecycle().state.active.clone();
        }
        if self.lifecycle().skip_read {
            log::info!("Skipping read: {}", self.id());
            return None;
        }
        match self.read_resource(client) {
            Ok(observed) => {
                self.lifecycle_mut().state.active = observed.clone();
                observed
            }
            Err(ResourceError::NotFound { .. }) => {
                self.lifecycle_mut().state.active = None;
                None
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.id(), e);
                None
            }
        }
    }

    /// Whether a live object was observed on the backend.
    fn is_active(&mut self, client: &C) -> bool {
        // skip_read short-circuits every downstream existence check
        if self.lifecycle().skip_read {
            return true;
        }
        self.read(client).is_some()
    }

    /// Create the resource. Returns true on success.
    fn create(&mut self, client: &C) -> bool {
        if !self.is_valid() {
            log::error!("Invalid resource: {}", self.id());
            return false;
        }
        if self.lifecycle().skip_create {
            log::info!("Skipping create: {}", self.id());
            return true;
        }

        let created = if self.lifecycle().use_cache && self.is_active(client) {
            log::info!("{} already exists", self.id());
            true
        } else {
            match self.create_resource(client) {
                Ok(true) => {
                    log::info!("{} created", self.id());
                    true
                }
                Ok(false) => {
                    log::error!("Failed to create {}", self.id());
                    false
                }
                Err(e) => {
                    log::error!("Failed to create {}: {}", self.id(), e);
                    false
                }
            }
        };
        self.lifecycle_mut().state.created = Some(created);

        if !created {
            return false;
        }
        log::debug!("Running post-create for {}", self.id());
        // Waiter timeouts in post hooks are warnings, not failures: the
        // mutating call was already confirmed by the API.
        if let Err(e) = self.post_create(client) {
            log::warn!("Post-create for {} did not complete: {}", self.id(), e);
        }
        true
    }

    /// Update the resource. Updating an absent resource is a vacuous
    /// success: there is nothing to converge.
    fn update(&mut self, client: &C) -> bool {
        if !self.is_valid() {
            log::error!("Invalid resource: {}", self.id());
            return false;
        }
        if self.lifecycle().skip_update {
            log::info!("Skipping update: {}", self.id());
            return true;
        }
        if !self.is_active(client) {
            log::info!("{} does not exist, nothing to update", self.id());
            return true;
        }

        let updated = match self.update_resource(client) {
            Ok(true) => {
                log::info!("{} updated", self.id());
                true
            }
            Ok(false) => {
                log::error!("Failed to update {}", self.id());
                false
            }
            Err(e) => {
                log::error!("Failed to update {}: {}", self.id(), e);
                false
            }
        };
        self.lifecycle_mut().state.updated = Some(updated);

        if !updated {
            return false;
        }
        log::debug!("Running post-update for {}", self.id());
        if let Err(e) = self.post_update(client) {
            log::warn!("Post-update for {} did not complete: {}", self.id(), e);
        }
        true
    }

    /// Delete the resource. Deleting an absent resource is a vacuous
    /// success.
    fn delete(&mut self, client: &C) -> bool {
        if !self.is_valid() {
            log::error!("Invalid resource: {}", self.id());
            return false;
        }
        if self.lifecycle().skip_delete {
            log::info!("Skipping delete: {}", self.id());
            return true;
        }
        if !self.is_active(client) {
            log::info!("{} does not exist, nothing to delete", self.id());
            return true;
        }

        let deleted = match self.delete_resource(client) {
            Ok(true) => {
                log::info!("{} deleted", self.id());
                true
            }
            Ok(false) => {
                log::error!("Failed to delete {}", self.id());
                false
            }
            Err(e) => {
                log::error!("Failed to delete {}: {}", self.id(), e);
                false
            }
        };
        self.lifecycle_mut().state.deleted = Some(deleted);

        if !deleted {
            return false;
        }
        // The object is gone; the handle must not claim otherwise.
        self.lifecycle_mut().state.active = None;
        log::debug!("Running post-delete for {}", self.id());
        if let Err(e) = self.post_delete(client) {
            log::warn!("Post-delete for {} did not complete: {}", self.id(), e);
        }
        true
    }
}

/// A boxed resource for type-erased storage in groups.
pub type BoxedResource<C> = Box<dyn Resource<C>>;

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Mock client; the mock resources below ignore it.
    #[derive(Debug)]
    pub(crate) struct MockClient;

    /// Scripted resource for lifecycle tests.
    #[derive(Debug)]
    pub(crate) struct MockResource {
        pub name: Option<String>,
        pub kind: &'static str,
        pub lifecycle: Lifecycle,
        pub exists: bool,
        pub valid: bool,
        pub fail_create: bool,
        pub create_calls: usize,
        pub update_calls: usize,
        pub delete_calls: usize,
        pub read_calls: usize,
    }

    impl MockResource {
        pub(crate) fn new(kind: &'static str, name: &str) -> Self {
            Self {
                name: Some(name.to_string()),
                kind,
                lifecycle: Lifecycle::new(),
                exists: false,
                valid: true,
                fail_create: false,
                create_calls: 0,
                update_calls: 0,
                delete_calls: 0,
                read_calls: 0,
            }
        }

        pub(crate) fn existing(kind: &'static str, name: &str) -> Self {
            let mut r = Self::new(kind, name);
            r.exists = true;
            r
        }
    }

    impl Resource<MockClient> for MockResource {
        fn resource_type(&self) -> &'static str {
            self.kind
        }

        fn name(&self) -> Option<&str> {
            self.name.as_deref()
        }

        fn lifecycle(&self) -> &Lifecycle {
            &self.lifecycle
        }

        fn lifecycle_mut(&mut self) -> &mut Lifecycle {
            &mut self.lifecycle
        }

        fn is_valid(&self) -> bool {
            self.valid
        }

        fn create_resource(&mut self, _client: &MockClient) -> Result<bool> {
            self.create_calls += 1;
            if self.fail_create {
                return Err(ResourceError::api("creation rejected"));
            }
            self.exists = true;
            Ok(true)
        }

        fn read_resource(&mut self, _client: &MockClient) -> Result<Option<Value>> {
            self.read_calls += 1;
            if self.exists {
                Ok(Some(json!({ "name": self.name })))
            } else {
                Ok(None)
            }
        }

        fn update_resource(&mut self, _client: &MockClient) -> Result<bool> {
            self.update_calls += 1;
            Ok(true)
        }

        fn delete_resource(&mut self, _client: &MockClient) -> Result<bool> {
            self.delete_calls += 1;
            self.exists = false;
            Ok(true)
        }
    }

    #[test]
    fn test_create_then_cached_create_runs_inner_create_once() {
        let client = MockClient;
        let mut r = MockResource::new("bucket", "data");

        assert!(r.create(&client));
        assert!(r.create(&client));
        // Second call short-circuits via the active-resource cache check
        assert_eq!(r.create_calls, 1);
    }

    #[test]
    fn test_create_failure_is_reported_as_false() {
        let client = MockClient;
        let mut r = MockResource::new("bucket", "data");
        r.fail_create = true;

        assert!(!r.create(&client));
        assert_eq!(r.lifecycle.state.created, Some(false));
    }

    #[test]
    fn test_update_on_absent_resource_is_vacuous_success() {
        let client = MockClient;
        let mut r = MockResource::new("role", "app");

        assert!(r.update(&client));
        assert_eq!(r.update_calls, 0);
    }

    #[test]
    fn test_delete_on_absent_resource_is_vacuous_success() {
        let client = MockClient;
        let mut r = MockResource::new("role", "app");

        assert!(r.delete(&client));
        assert_eq!(r.delete_calls, 0);
    }

    #[test]
    fn test_delete_clears_active_handle() {
        let client = MockClient;
        let mut r = MockResource::existing("role", "app");

        assert!(r.is_active(&client));
        assert!(r.lifecycle.state.active.is_some());
        assert!(r.delete(&client));
        assert_eq!(r.delete_calls, 1);
        assert!(r.lifecycle.state.active.is_none());
    }

    #[test]
    fn test_skip_flags_are_noop_success() {
        let client = MockClient;
        let mut r = MockResource::new("role", "app");
        r.lifecycle.skip_create = true;
        r.lifecycle.skip_update = true;
        r.lifecycle.skip_delete = true;

        assert!(r.create(&client));
        assert!(r.update(&client));
        assert!(r.delete(&client));
        assert_eq!(r.create_calls, 0);
        assert_eq!(r.update_calls, 0);
        assert_eq!(r.delete_calls, 0);
    }

    #[test]
    fn test_invalid_resource_fails_every_operation() {
        let client = MockClient;
        let mut r = MockResource::new("role", "app");
        r.valid = false;

        assert!(!r.create(&client));
        assert!(!r.update(&client));
        assert!(!r.delete(&client));
        assert_eq!(r.create_calls, 0);
    }

    #[test]
    fn test_active_handle_set_only_by_successful_read() {
        let client = MockClient;
        let mut r = MockResource::new("secret", "token");

        assert!(r.read(&client).is_none());
        assert!(r.lifecycle.state.active.is_none());

        r.exists = true;
        assert!(r.read(&client).is_some());
        assert!(r.lifecycle.state.active.is_some());
    }

    #[test]
    fn test_read_uses_cache_when_enabled() {
        let client = MockClient;
        let mut r = MockResource::existing("secret", "token");

        assert!(r.read(&client).is_some());
        assert!(r.read(&client).is_some());
        assert_eq!(r.read_calls, 1);
    }
}
