//! Concrete resource kinds backed by the provisioning API.

pub(crate) mod rest;

mod bucket;
mod cluster;
mod node_group;
mod policy;
mod role;
mod secret;

pub use bucket::Bucket;
pub use cluster::Cluster;
pub use node_group::NodeGroup;
pub use policy::Policy;
pub use role::Role;
pub use secret::Secret;
