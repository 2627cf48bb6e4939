//! Route configurations shared by the HTTP definitions of one template.
//!
//! Several verbs can map to the same route template. Each of those
//! definitions references one `RouteConfiguration` through a `RouteId`
//! handed out by the `RouteRegistry`, which owns the configurations.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RouteId(usize);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfiguration {
    pub route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims_principal_authorization_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_api_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_api_description: Option<String>,
}

impl RouteConfiguration {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RouteRegistry {
    routes: Vec<RouteConfiguration>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, configuration: RouteConfiguration) -> RouteId {
        self.routes.push(configuration);
        RouteId(self.routes.len() - 1)
    }

    pub fn get(&self, id: RouteId) -> Option<&RouteConfiguration> {
        self.routes.get(id.0)
    }

    pub fn get_mut(&mut self, id: RouteId) -> Option<&mut RouteConfiguration> {
        self.routes.get_mut(id.0)
    }

    /// Finds the configuration registered for a template, ignoring a
    /// leading separator.
    pub fn find_by_route(&self, route: &str) -> Option<RouteId> {
        let wanted = strip_leading_separator(route);
        self.routes
            .iter()
            .position(|configuration| strip_leading_separator(&configuration.route) == wanted)
            .map(RouteId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouteId, &RouteConfiguration)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(index, configuration)| (RouteId(index), configuration))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Removes a single leading `/`.
pub fn strip_leading_separator(route: &str) -> &str {
    route.strip_prefix('/').unwrap_or(route)
}

fn is_placeholder_segment(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Last path segment of a route template that is neither empty nor a
/// placeholder.
pub fn infer_open_api_name(route: &str) -> Option<&str> {
    route
        .split('/')
        .rev()
        .find(|segment| !segment.trim().is_empty() && !is_placeholder_segment(segment))
}

/// Sets the configuration's OpenAPI operation name from its template when
/// none was supplied. Repeated calls leave a present name untouched.
pub fn ensure_open_api_name(configuration: &mut RouteConfiguration) {
    let present = configuration
        .open_api_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if present {
        return;
    }
    if let Some(name) = infer_open_api_name(&configuration.route) {
        configuration.open_api_name = Some(name.to_string());
    }
}
