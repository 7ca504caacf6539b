//! Resource groups - named, weighted containers of resources.

use crate::resource::{BoxedResource, Resource as _};
use crate::types::ResourceFilter;

/// Default group weight; multiplied by each resource's install weight to
/// produce the effective sort key.
pub const DEFAULT_GROUP_WEIGHT: u32 = 100;

/// A named collection of resources treated as one deployable unit.
///
/// The group holds every resource in a single typed container, populated at
/// construction time. The engine models no dependency edges between the
/// contained resources; install-order weights are the coarse substitute.
pub struct ResourceGroup<C> {
    /// Group name, matched by the group filter
    pub name: String,
    /// Disabled groups are skipped entirely
    pub enabled: bool,
    /// Group weight, scales every contained resource's install weight
    pub weight: u32,
    /// The resources declared in this group
    pub resources: Vec<BoxedResource<C>>,
}

impl<C> ResourceGroup<C> {
    /// Create an empty, enabled group with the default weight.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            weight: DEFAULT_GROUP_WEIGHT,
            resources: Vec::new(),
        }
    }

    /// Set the group weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Enable or disable the group.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Add a single resource.
    pub fn add_resource(&mut self, resource: BoxedResource<C>) {
        self.resources.push(resource);
    }

    /// Add a list of resources.
    pub fn add_resources(&mut self, resources: impl IntoIterator<Item = BoxedResource<C>>) {
        self.resources.extend(resources);
    }

    /// Number of declared resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the group declares no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl<C> std::fmt::Debug for ResourceGroup<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceGroup")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("weight", &self.weight)
            .field("resources", &self.resources.len())
            .finish()
    }
}

/// Flatten one group into the resources passing the name and type filters.
///
/// Filters are case-insensitive substring matches. A resource with no
/// resolvable name is dropped when a name filter is active.
pub fn resources_from_group<'a, C>(
    group: &'a mut ResourceGroup<C>,
    filter: &ResourceFilter,
) -> Vec<&'a mut BoxedResource<C>> {
    let mut matched = Vec::new();
    for resource in &mut group.resources {
        if !filter.matches_name(resource.name()) {
            log::debug!("Skipping {}", resource.id());
            continue;
        }
        if !filter.matches_type(resource.resource_type()) {
            log::debug!("Skipping {}", resource.id());
            continue;
        }
        matched.push(resource);
    }
    matched
}
