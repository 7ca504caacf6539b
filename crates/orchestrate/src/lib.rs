//! # Orchestrate
//!
//! Ordered orchestration for declarative infrastructure resources.
//!
//! Given a bag of heterogeneous resource declarations, the engine flattens
//! them, filters by name/type substring, sorts them by a fixed install
//! order, and drives each one through its lifecycle sequentially -
//! continuing past per-resource failures and reporting an aggregate,
//! count-based outcome.
//!
//! ## Core concepts
//!
//! - **Resource**: a declarative handle to one external object, with
//!   create/read/update/delete operations against a backend client
//! - **ResourceGroup**: a named, weighted collection of resources treated
//!   as one deployable unit
//! - **Install weight**: a resource type's position in the canonical
//!   creation order; the engine's entire scheduling algorithm
//! - **Worker**: owns the backend client and drives the sorted sequence,
//!   one resource at a time
//! - **Waiter**: a bounded polling loop for resources that reach their
//!   terminal state asynchronously
//!
//! ## Example
//!
//! ```ignore
//! use orchestrate::{
//!     AutoConfirm, Lifecycle, NoProgress, Resource, ResourceFilter,
//!     ResourceGroup, Result, Worker,
//! };
//! use serde_json::Value;
//!
//! #[derive(Debug)]
//! struct Bucket {
//!     name: String,
//!     lifecycle: Lifecycle,
//! }
//!
//! impl Resource<MyClient> for Bucket {
//!     fn resource_type(&self) -> &'static str { "bucket" }
//!     fn name(&self) -> Option<&str> { Some(&self.name) }
//!     fn lifecycle(&self) -> &Lifecycle { &self.lifecycle }
//!     fn lifecycle_mut(&mut self) -> &mut Lifecycle { &mut self.lifecycle }
//!
//!     fn create_resource(&mut self, client: &MyClient) -> Result<bool> {
//!         client.put_bucket(&self.name)
//!     }
//!     fn read_resource(&mut self, client: &MyClient) -> Result<Option<Value>> {
//!         client.get_bucket(&self.name)
//!     }
//!     fn update_resource(&mut self, client: &MyClient) -> Result<bool> {
//!         self.create_resource(client)
//!     }
//!     fn delete_resource(&mut self, client: &MyClient) -> Result<bool> {
//!         client.remove_bucket(&self.name)
//!     }
//! }
//!
//! let mut group = ResourceGroup::new("storage");
//! group.add_resource(Box::new(Bucket {
//!     name: "data".into(),
//!     lifecycle: Lifecycle::new(),
//! }));
//!
//! let mut worker = Worker::with_groups(MyClient::new()?, vec![group]);
//! let summary = worker.create_resources(
//!     &ResourceFilter::default(),
//!     &mut NoProgress,
//!     &mut AutoConfirm,
//! )?;
//! assert!(summary.is_success());
//! ```
//!
//! ## Failure model
//!
//! Errors are converted to booleans at the resource boundary: the public
//! lifecycle entry points log and return `false` instead of propagating.
//! The worker isolates each resource, never aborts the remaining sequence,
//! and succeeds only when every planned resource succeeded. Absence is not
//! an error anywhere: reading a missing object yields `None`, and
//! updating or deleting one is a vacuous success.

pub mod context;
pub mod error;
pub mod group;
pub mod order;
pub mod resource;
pub mod types;
pub mod waiter;
pub mod worker;

// Re-export main types at crate root
pub use context::{AutoConfirm, AutoDecline, ConfirmCallback, NoProgress, ProgressCallback};
pub use error::{ResourceError, Result};
pub use group::{DEFAULT_GROUP_WEIGHT, ResourceGroup, resources_from_group};
pub use order::{
    DEFAULT_INSTALL_WEIGHT, Flattened, SortOrder, filter_and_flatten, install_weight,
};
pub use resource::{BoxedResource, Lifecycle, LifecycleState, Resource};
pub use types::{OpKind, PlanEntry, ResourceFilter, WorkSummary, WorkerPhase};
pub use waiter::{WaiterConfig, wait_for};
pub use worker::{ApiSession, Worker};
